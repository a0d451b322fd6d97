// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Parses source text into a node tree
//!
//! This is not a grammar for any particular language.  The parser recognizes the expression
//! patterns that curly-brace languages share, bracket groups and a conventional operator
//! precedence ladder, and reflects their structure in the tree.  Everything else passes through
//! as flat siblings, which is all the pattern matcher needs.

use crate::token::closer_for;
use crate::token::TokenType;
use crate::token::Tokenizer;
use crate::tree::NodeId;
use crate::tree::Tree;

/// Parses a source buffer into a [`Tree`].  Parsing cannot fail; unexpected input simply ends up
/// as leaves in the tree, and serializing the result always reproduces the input exactly.
pub fn parse(input: &str) -> Tree {
    let mut parser = Parser {
        tok: Tokenizer::new(input),
        tree: Tree::new(),
    };
    let root = parser.root();
    let mut tree = parser.tree;
    tree.set_root(root);
    tree
}

struct Parser<'a> {
    tok: Tokenizer<'a>,
    tree: Tree,
}

impl<'a> Parser<'a> {
    fn root(&mut self) -> NodeId {
        let mut n = self.tree.push_interior(Vec::new());
        self.read_exprs(n, "");
        let end = self.tok.read();
        if !end.prefix.is_empty() {
            // Preserve the END token to avoid losing its attachments.
            let leaf = self.tree.push_leaf(end);
            self.tree.add_child(n, leaf);
        }
        // Strip unnecessary levels.
        while self.tree.children(n).len() == 1 {
            n = self.tree.children(n)[0];
        }
        // Wrap a bare top-level token in a node.
        if self.tree[n].is_leaf() {
            n = self.tree.push_interior(vec![n]);
        }
        n
    }

    fn read_exprs(&mut self, dst: NodeId, closer: &str) {
        while self.tok.peek().kind != TokenType::End && !self.looking_at(&[closer]) {
            let child = self.assign();
            self.tree.add_child(dst, child);
        }
    }

    fn assign(&mut self) -> NodeId {
        self.parse_right(
            Self::oror,
            &[
                "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "^=", "|=",
            ],
        )
    }

    fn oror(&mut self) -> NodeId {
        self.parse_left(Self::andand, &["||"])
    }

    fn andand(&mut self) -> NodeId {
        self.parse_left(Self::bitor, &["&&"])
    }

    fn bitor(&mut self) -> NodeId {
        self.parse_left(Self::bitxor, &["|"])
    }

    fn bitxor(&mut self) -> NodeId {
        self.parse_left(Self::bitand, &["^"])
    }

    fn bitand(&mut self) -> NodeId {
        self.parse_left(Self::eq, &["&"])
    }

    fn eq(&mut self) -> NodeId {
        self.parse_left(Self::cmp, &["==", "!="])
    }

    fn cmp(&mut self) -> NodeId {
        self.parse_left(Self::shift, &["<", "<=", ">", ">="])
    }

    fn shift(&mut self) -> NodeId {
        self.parse_left(Self::plus, &["<<", ">>"])
    }

    fn plus(&mut self) -> NodeId {
        self.parse_left(Self::mult, &["+", "-"])
    }

    fn mult(&mut self) -> NodeId {
        self.parse_left(Self::unary, &["*", "/", "%"])
    }

    fn unary(&mut self) -> NodeId {
        if self.looking_at(&["&", "*", "!", "~", "+", "-", "++", "--"]) {
            let op = self.read_leaf();
            let operand = self.unary();
            self.tree.push_interior(vec![op, operand])
        } else {
            self.suffix()
        }
    }

    fn suffix(&mut self) -> NodeId {
        let mut n = self.term();
        loop {
            if self.looking_at(&["++", "--", ".", "->"]) {
                let op = self.read_leaf();
                let next = self.term();
                n = self.tree.push_interior(vec![n, op, next]);
            } else if self.looking_at(&["(", "[", "{"]) {
                let closer = closer_for(&self.tok.peek().text);
                let opener = self.read_leaf();
                let parent = self.tree.push_interior(vec![n, opener]);
                self.read_exprs(parent, closer);
                if self.looking_at(&[closer]) {
                    let close = self.read_leaf();
                    self.tree.add_child(parent, close);
                }
                n = parent;
            } else {
                break;
            }
        }
        n
    }

    fn term(&mut self) -> NodeId {
        if self.looking_at(&["(", "[", "{"]) {
            let closer = closer_for(&self.tok.peek().text);
            let opener = self.read_leaf();
            let group = self.tree.push_interior(vec![opener]);
            self.read_exprs(group, closer);
            if self.looking_at(&[closer]) {
                let close = self.read_leaf();
                self.tree.add_child(group, close);
            }
            group
        } else {
            self.read_leaf()
        }
    }

    fn parse_left(&mut self, sub: fn(&mut Self) -> NodeId, ops: &[&str]) -> NodeId {
        let mut left = sub(self);
        while self.looking_at(ops) {
            let op = self.read_leaf();
            let right = sub(self);
            left = self.tree.push_interior(vec![left, op, right]);
        }
        left
    }

    fn parse_right(&mut self, sub: fn(&mut Self) -> NodeId, ops: &[&str]) -> NodeId {
        let n = sub(self);
        if self.looking_at(ops) {
            let op = self.read_leaf();
            let rest = self.parse_right(sub, ops);
            self.tree.push_interior(vec![n, op, rest])
        } else {
            n
        }
    }

    fn read_leaf(&mut self) -> NodeId {
        let token = self.tok.read();
        self.tree.push_leaf(token)
    }

    /// True iff the next token's text is one of `tokens`.
    fn looking_at(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|text| self.tok.peek().text == *text)
    }
}
