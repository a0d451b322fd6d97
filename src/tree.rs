// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Defines the node trees produced by parsing source text

use std::fmt;
use std::ops::Index;
use std::ops::Range;

use crate::token::Token;

type NodeIndex = u32;

/// A reference to a node in a [`Tree`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(NodeIndex);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a node is a leaf carrying one token, or an interior node carrying a list of children
#[derive(Debug)]
pub enum NodeKind {
    Leaf(Token),
    Interior(Vec<NodeId>),
}

/// One node of a [`Tree`].  The root has depth 0; every other node has depth one more than its
/// parent.
#[derive(Debug)]
pub struct Node {
    parent: Option<NodeId>,
    depth: usize,
    kind: NodeKind,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// The node's token, if it is a leaf.
    pub fn token(&self) -> Option<&Token> {
        match &self.kind {
            NodeKind::Leaf(token) => Some(token),
            NodeKind::Interior(_) => None,
        }
    }

    /// The node's children.  Leaves have none.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Interior(children) => children,
        }
    }
}

/// A tree of nodes parsed from one source buffer.  All nodes live in the tree; they are created,
/// cloned, and spliced through it, and referenced by [`NodeId`].
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    pub(crate) fn new() -> Tree {
        Tree {
            nodes: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
        self.fix_fields(root, None, 0);
    }

    pub(crate) fn push_leaf(&mut self, token: Token) -> NodeId {
        self.push(NodeKind::Leaf(token))
    }

    pub(crate) fn push_interior(&mut self, children: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::Interior(children))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as NodeIndex);
        self.nodes.push(Node {
            parent: None,
            depth: 0,
            kind,
        });
        id
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Interior(children) = &mut self.nodes[parent.index()].kind {
            children.push(child);
        }
    }

    /// Replaces `range` of an interior node's children with `replacement`.  Parent and depth
    /// fields must be repaired afterwards with [`Tree::fix_fields`].
    pub(crate) fn splice_children(
        &mut self,
        parent: NodeId,
        range: Range<usize>,
        replacement: Vec<NodeId>,
    ) {
        if let NodeKind::Interior(children) = &mut self.nodes[parent.index()].kind {
            children.splice(range, replacement);
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self[id].children()
    }

    pub fn token(&self, id: NodeId) -> Option<&Token> {
        self[id].token()
    }

    pub(crate) fn token_mut(&mut self, id: NodeId) -> Option<&mut Token> {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Leaf(token) => Some(token),
            NodeKind::Interior(_) => None,
        }
    }

    /// The ancestor `generations` levels above `id`, if the tree is that deep here.
    pub fn ancestor(&self, id: NodeId, generations: usize) -> Option<NodeId> {
        let mut current = id;
        for _ in 0..generations {
            current = self[current].parent()?;
        }
        Some(current)
    }

    /// All nodes of the subtree rooted at `id`, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Corrects the parent and depth fields throughout the subtree rooted at `id`.  This is the
    /// only supported way to repair those fields after a splice.
    pub fn fix_fields(&mut self, id: NodeId, parent: Option<NodeId>, depth: usize) {
        self.nodes[id.index()].parent = parent;
        self.nodes[id.index()].depth = depth;
        let children = self[id].children().to_vec();
        for child in children {
            self.fix_fields(child, Some(id), depth + 1);
        }
    }

    /// Deep-copies the subtree rooted at `id`.  The copy starts out detached; its parent and
    /// depth are set when it is spliced into place.
    pub(crate) fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        match &self.nodes[id.index()].kind {
            NodeKind::Leaf(token) => {
                let token = token.clone();
                self.push_leaf(token)
            }
            NodeKind::Interior(children) => {
                let children = children.clone();
                let copies = children
                    .iter()
                    .map(|child| self.clone_subtree(*child))
                    .collect();
                self.push_interior(copies)
            }
        }
    }

    /// Deep-copies a subtree of another tree into this one.
    pub(crate) fn import_from(&mut self, other: &Tree, id: NodeId) -> NodeId {
        match &other[id].kind {
            NodeKind::Leaf(token) => self.push_leaf(token.clone()),
            NodeKind::Interior(children) => {
                let copies = children
                    .iter()
                    .map(|child| self.import_from(other, *child))
                    .collect();
                self.push_interior(copies)
            }
        }
    }

    /// The leftmost leaf of the subtree rooted at `id`.
    pub(crate) fn first_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            match &self[current].kind {
                NodeKind::Leaf(_) => return Some(current),
                NodeKind::Interior(children) => current = *children.first()?,
            }
        }
    }

    /// The rightmost leaf of the subtree rooted at `id`.
    pub(crate) fn last_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            match &self[current].kind {
                NodeKind::Leaf(_) => return Some(current),
                NodeKind::Interior(children) => current = *children.last()?,
            }
        }
    }

    /// Reconstructs the source text of the whole tree.  On an unmodified parse this is exactly
    /// the input the tree was parsed from.
    pub fn serialize(&self) -> String {
        let mut result = String::new();
        self.serialize_into(self.root, &mut result);
        result
    }

    /// Reconstructs the source text of a list of sibling nodes.
    pub fn serialize_nodes(&self, nodes: &[NodeId]) -> String {
        let mut result = String::new();
        for node in nodes {
            self.serialize_into(*node, &mut result);
        }
        result
    }

    fn serialize_into(&self, id: NodeId, result: &mut String) {
        for node in self.descendants(id) {
            if let Some(token) = self[node].token() {
                for trivia in &token.prefix {
                    result.push_str(&trivia.text);
                }
                result.push_str(&token.text);
                for trivia in &token.suffix {
                    result.push_str(&trivia.text);
                }
            }
        }
    }

    /// Displays the shape of the subtree rooted at `id`: leaves as `[text]`, interior nodes as a
    /// parenthesized list of their children.
    pub fn display(&self, id: NodeId) -> impl fmt::Display + '_ {
        struct DisplayNode<'a>(&'a Tree, NodeId);

        impl<'a> fmt::Display for DisplayNode<'a> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write_node(self.0, self.1, f)
            }
        }

        fn write_node(tree: &Tree, id: NodeId, f: &mut fmt::Formatter) -> fmt::Result {
            match &tree[id].kind {
                NodeKind::Leaf(token) => write!(f, "[{}]", token.text),
                NodeKind::Interior(children) => {
                    write!(f, "(")?;
                    let mut separator = "";
                    for child in children {
                        write!(f, "{}", separator)?;
                        write_node(tree, *child, f)?;
                        separator = " ";
                    }
                    write!(f, ")")
                }
            }
        }

        DisplayNode(self, id)
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Iterator over a subtree in pre-order, returned by [`Tree::descendants`]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for child in self.tree[id].children().iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}
