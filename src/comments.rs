// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Carries comments from a replaced region over to its substitution

use std::collections::HashSet;

use crate::token::Position;
use crate::token::Token;
use crate::token::TokenType;
use crate::token::Trivia;
use crate::token::TriviaKind;
use crate::tree::NodeId;
use crate::tree::Tree;

/// Copies to `dst` every comment of the matched slice `src` that `dst` does not already carry,
/// plus the whitespace on the outer edges of the slice.  Trivia is identified by source position,
/// so comments that traveled into `dst` through a variable capture are not duplicated.
pub(crate) fn copy_comments(tree: &mut Tree, src: &[NodeId], dst: Vec<NodeId>) -> Vec<NodeId> {
    let mut copier = Copier {
        seen: HashSet::new(),
        prefix: Vec::new(),
        suffix: Vec::new(),
    };

    // Find all trivia that has already been copied, perhaps because a variable assignment copied
    // some portion of src.
    for &node in &dst {
        for descendant in tree.descendants(node) {
            if let Some(token) = tree.token(descendant) {
                for trivia in &token.prefix {
                    copier.seen.insert(trivia.position());
                }
                for trivia in &token.suffix {
                    copier.seen.insert(trivia.position());
                }
            }
        }
    }

    // Now walk through src, collecting everything uncopied into the boundary buffers.
    for (i, &node) in src.iter().enumerate() {
        copier.copy_node(tree, node, i == 0, i + 1 == src.len());
    }

    if copier.prefix.is_empty() && copier.suffix.is_empty() {
        // Nothing to copy.
        return dst;
    }

    let mut dst = dst;
    if dst.is_empty() {
        // Add a placeholder leaf to which the trivia can attach.
        dst.push(tree.push_leaf(Token::detached(TokenType::Other)));
    }

    // The serializer only emits trivia at leaves, so the boundary buffers go on the outermost
    // leaves of the substitution.
    if let Some(first) = tree.first_leaf(dst[0]) {
        if let Some(token) = tree.token_mut(first) {
            let existing: Vec<Trivia> = token.prefix.drain(..).collect();
            token.prefix.extend(copier.prefix);
            token.prefix.extend(existing);
        }
    }
    if let Some(&last_top) = dst.last() {
        if let Some(last) = tree.last_leaf(last_top) {
            if let Some(token) = tree.token_mut(last) {
                token.suffix.extend(copier.suffix);
            }
        }
    }
    dst
}

struct Copier {
    seen: HashSet<Position>,
    prefix: Vec<Trivia>,
    suffix: Vec<Trivia>,
}

impl Copier {
    /// `left_side` holds only along the leftmost spine of the matched slice, `right_side` only
    /// along the rightmost.
    fn copy_node(&mut self, tree: &Tree, id: NodeId, left_side: bool, right_side: bool) {
        match tree.token(id) {
            Some(token) => {
                self.copy_trivia(&token.prefix, left_side, false);
                self.copy_trivia(&token.suffix, false, right_side);
            }
            None => {
                let children = tree.children(id);
                let count = children.len();
                for (i, &child) in children.iter().enumerate() {
                    self.copy_node(tree, child, left_side && i == 0, right_side && i + 1 == count);
                }
            }
        }
    }

    fn copy_trivia(&mut self, list: &[Trivia], left_side: bool, right_side: bool) {
        for trivia in list {
            if self.seen.contains(&trivia.position()) {
                continue;
            }
            if trivia.kind == TriviaKind::Space && !left_side && !right_side {
                // Whitespace in the middle of the slice belonged to tokens the pattern consumed.
                continue;
            }
            self.seen.insert(trivia.position());
            let buffer = if left_side {
                &mut self.prefix
            } else {
                &mut self.suffix
            };
            buffer.push(trivia.clone());
        }
    }
}
