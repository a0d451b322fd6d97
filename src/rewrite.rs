// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Rewrites every occurrence of a pattern in a subject tree

use std::collections::HashMap;
use std::collections::HashSet;

use log::debug;
use log::trace;
use thiserror::Error;

use crate::comments::copy_comments;
use crate::pattern::Match;
use crate::pattern::Pattern;
use crate::pattern::PatternError;
use crate::token::TokenType;
use crate::tree::NodeId;
use crate::tree::Tree;

/// An error that can occur while rewriting a subject tree
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Pattern has no literal token to anchor the search")]
    AnchorlessPattern,
    #[error("Replacement references variable '{0}' not bound by the pattern")]
    UndefinedVariable(String),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Replaces every occurrence of `pattern` in `subject` with `replacement`, mutating `subject` in
/// place.  Occurrences are rewritten deepest first, so a substitution can participate in an
/// enclosing match, but matching never continues into a region a substitution just produced.
pub fn replace(
    subject: &mut Tree,
    pattern: &Tree,
    replacement: &Tree,
) -> Result<(), RewriteError> {
    check_replacement_variables(pattern, replacement)?;
    let compiled = Pattern::new(pattern)?;

    // Frequency of every leaf text in the subject, and where each text occurs.
    let mut freq: HashMap<String, usize> = HashMap::new();
    let mut occurrences: HashMap<String, Vec<NodeId>> = HashMap::new();
    for node in subject.descendants(subject.root()) {
        if let Some(token) = subject.token(node) {
            *freq.entry(token.text.clone()).or_insert(0) += 1;
            occurrences.entry(token.text.clone()).or_default().push(node);
        }
    }

    // Pick the least frequent literal in the pattern as the anchor for the search.
    let mut anchor: Option<(String, usize)> = None;
    let mut anchor_count = usize::MAX;
    for node in pattern.descendants(pattern.root()) {
        if let Some(token) = pattern.token(node) {
            if token.kind == TokenType::Var || token.kind == TokenType::Splat {
                continue;
            }
            let count = freq.get(&token.text).copied().unwrap_or(0);
            if count < anchor_count {
                anchor = Some((token.text.clone(), pattern[node].depth()));
                anchor_count = count;
            }
        }
    }
    let (anchor_text, anchor_depth) = anchor.ok_or(RewriteError::AnchorlessPattern)?;

    let mut sites = match occurrences.remove(&anchor_text) {
        Some(sites) => sites,
        None => return Ok(()),
    };

    // Order the anchor occurrences by decreasing depth.  The sort is stable, so occurrences in
    // the same sibling list stay adjacent and the `last` check below can skip them.
    sites.sort_by(|a, b| subject[*b].depth().cmp(&subject[*a].depth()));
    debug!(
        "rewriting around {:?}: {} candidate sites",
        anchor_text,
        sites.len()
    );

    let mut last: Option<NodeId> = None;
    for site in sites {
        // The anchor may sit deep inside the pattern.  Pop up until the children of `enclosing`
        // form the sibling list the whole pattern would occupy.
        if subject[site].depth() < anchor_depth {
            continue; // Cannot match here
        }
        let Some(enclosing) = subject.ancestor(site, anchor_depth) else {
            continue;
        };
        // Skip if we are in the same list as the last iteration.
        if last == Some(enclosing) {
            continue;
        }
        last = Some(enclosing);

        let mut start = 0;
        while start < subject.children(enclosing).len() {
            // Look for the next match in the remainder of the sibling list.
            let window = subject.children(enclosing)[start..].to_vec();
            let Some(m) = compiled.find(subject, &window) else {
                break;
            };
            trace!(
                "matched siblings {}..{} under {:?}",
                start + m.start,
                start + m.limit,
                enclosing
            );

            let substituted = substitute(subject, replacement, replacement.root(), &m)?;
            let matched = subject.children(enclosing)[start + m.start..start + m.limit].to_vec();
            let substituted = copy_comments(subject, &matched, substituted);

            let advance = m.start + substituted.len();
            subject.splice_children(enclosing, start + m.start..start + m.limit, substituted);
            let parent = subject[enclosing].parent();
            let depth = subject[enclosing].depth();
            subject.fix_fields(enclosing, parent, depth);

            // Continue matching just past the substituted nodes.
            start += advance;
        }
    }
    Ok(())
}

/// Builds the node list that replaces one match.  Interior replacement nodes contribute their
/// children's substitutions; variable leaves contribute clones of their captured nodes; any other
/// leaf contributes a clone of itself, trivia included.
fn substitute(
    subject: &mut Tree,
    replacement: &Tree,
    id: NodeId,
    m: &Match,
) -> Result<Vec<NodeId>, RewriteError> {
    let token = match replacement.token(id) {
        None => {
            let mut result = Vec::new();
            for &child in replacement.children(id) {
                result.extend(substitute(subject, replacement, child, m)?);
            }
            return Ok(result);
        }
        Some(token) => token,
    };

    if token.kind != TokenType::Var && token.kind != TokenType::Splat {
        return Ok(vec![subject.import_from(replacement, id)]);
    }

    let captured = m
        .bindings
        .get(&token.text)
        .ok_or_else(|| RewriteError::UndefinedVariable(token.text.clone()))?;
    Ok(captured
        .iter()
        .map(|&node| subject.clone_subtree(node))
        .collect())
}

fn check_replacement_variables(
    pattern: &Tree,
    replacement: &Tree,
) -> Result<(), RewriteError> {
    let mut bound = HashSet::new();
    for node in pattern.descendants(pattern.root()) {
        if let Some(token) = pattern.token(node) {
            if token.kind == TokenType::Var || token.kind == TokenType::Splat {
                bound.insert(token.text.clone());
            }
        }
    }
    for node in replacement.descendants(replacement.root()) {
        if let Some(token) = replacement.token(node) {
            if (token.kind == TokenType::Var || token.kind == TokenType::Splat)
                && !bound.contains(&token.text)
            {
                return Err(RewriteError::UndefinedVariable(token.text.clone()));
            }
        }
    }
    Ok(())
}
