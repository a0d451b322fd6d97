// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Compiles pattern trees and finds their occurrences in subject trees
//!
//! A pattern is matched one sibling list at a time.  Every distinct literal token in the pattern
//! is assigned a private rune, the sibling list under scrutiny is encoded as a string over that
//! alphabet, and a synthesized regular expression does the flat matching.  Interior pattern nodes
//! become wildcards in the regex and recurse into a sub-pattern for their children.

use std::collections::HashMap;
use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use crate::token::TokenType;
use crate::tree::NodeId;
use crate::tree::Tree;

/// Subject nodes with no counterpart in the pattern alphabet encode as this rune, so only
/// wildcards can match them.
const PLACEHOLDER: char = '_';

/// An error that can occur while compiling a pattern tree
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Variable '{0}' appears more than once in pattern")]
    DuplicateVariable(String),
    #[error("Pattern has too many distinct tokens to compile")]
    TooManyLiterals,
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// A compiled pattern, ready to be matched against sibling lists of a subject tree
pub struct Pattern {
    top: ListPattern,
    runes: HashMap<String, char>,
}

/// The result of a successful match: the extent of the matched subject nodes within the searched
/// sibling list, and the nodes captured by each variable
#[derive(Debug)]
pub struct Match {
    pub bindings: HashMap<String, Vec<NodeId>>,
    pub start: usize,
    pub limit: usize,
}

impl Pattern {
    /// Compiles the top-level sibling list of a parsed pattern tree.  The top level may match
    /// anywhere in a subject sibling list; nested levels must match their sibling list exactly.
    pub fn new(pattern: &Tree) -> Result<Pattern, PatternError> {
        check_variables(pattern)?;
        let mut runes = HashMap::new();
        let top = ListPattern::compile(
            pattern,
            pattern.children(pattern.root()),
            false,
            &mut runes,
        )?;
        Ok(Pattern { top, runes })
    }

    /// Finds the leftmost occurrence of this pattern in a sibling list of `tree`.
    pub fn find(&self, tree: &Tree, subject: &[NodeId]) -> Option<Match> {
        self.top.find(tree, subject, &self.runes)
    }
}

fn check_variables(pattern: &Tree) -> Result<(), PatternError> {
    let mut seen = HashSet::new();
    for node in pattern.descendants(pattern.root()) {
        if let Some(token) = pattern.token(node) {
            if token.kind == TokenType::Var || token.kind == TokenType::Splat {
                if !seen.insert(token.text.clone()) {
                    return Err(PatternError::DuplicateVariable(token.text.clone()));
                }
            }
        }
    }
    Ok(())
}

/// One element of a compiled sibling-list pattern.  Element `i` of the list corresponds to
/// capture group `i + 1` of the regex.
enum PatternStep {
    /// A literal token, fully checked by its rune in the regex
    Literal,
    /// A variable capturing exactly one sibling
    Single(String),
    /// A variadic variable capturing any number of consecutive siblings
    Splat(String),
    /// An interior pattern node, capturing one sibling whose children must match recursively
    Subtree(ListPattern),
}

struct ListPattern {
    steps: Vec<PatternStep>,
    re: Regex,
}

impl ListPattern {
    fn compile(
        pattern: &Tree,
        list: &[NodeId],
        full_match: bool,
        runes: &mut HashMap<String, char>,
    ) -> Result<ListPattern, PatternError> {
        let mut steps = Vec::with_capacity(list.len());
        let mut source = String::new();
        if full_match {
            source.push('^');
        }
        for node in list {
            match pattern.token(*node) {
                None => {
                    // Match any single subject node here and recurse into its children.
                    source.push_str("(.)");
                    let children = pattern.children(*node);
                    steps.push(PatternStep::Subtree(ListPattern::compile(
                        pattern, children, true, runes,
                    )?));
                }
                Some(token) if token.kind == TokenType::Var => {
                    source.push_str("(.)");
                    steps.push(PatternStep::Single(token.text.clone()));
                }
                Some(token) if token.kind == TokenType::Splat => {
                    source.push_str("(.*)");
                    steps.push(PatternStep::Splat(token.text.clone()));
                }
                Some(token) => {
                    let rune = rune_for(runes, &token.text)?;
                    source.push('(');
                    source.push(rune);
                    source.push(')');
                    steps.push(PatternStep::Literal);
                }
            }
        }
        if full_match {
            source.push('$');
        }
        let re = Regex::new(&source)?;
        Ok(ListPattern { steps, re })
    }

    fn find(
        &self,
        tree: &Tree,
        subject: &[NodeId],
        runes: &HashMap<String, char>,
    ) -> Option<Match> {
        // Encode the subject as a string for the regex, along with a table mapping every byte
        // offset back to the subject index it came from.
        let mut text = String::new();
        let mut subject_at = Vec::new();
        for (i, node) in subject.iter().enumerate() {
            match tree.token(*node) {
                None => text.push(PLACEHOLDER),
                Some(token) => {
                    text.push(runes.get(&token.text).copied().unwrap_or(PLACEHOLDER));
                }
            }
            while subject_at.len() < text.len() {
                subject_at.push(i);
            }
        }
        subject_at.push(subject.len()); // Sentinel

        'candidates: for caps in self.re.captures_iter(&text) {
            let whole = caps.get(0)?;
            let mut result = Match {
                bindings: HashMap::new(),
                start: subject_at[whole.start()],
                limit: subject_at[whole.end()],
            };

            for (i, step) in self.steps.iter().enumerate() {
                if let PatternStep::Literal = step {
                    // The rune only appears where the literal text occurs, so the regex has
                    // already checked everything.
                    continue;
                }

                // Map the capture group's byte range back to subject nodes.  A rune may encode as
                // several bytes, so consecutive duplicates collapse.
                let group = caps.get(i + 1)?;
                let mut captured = Vec::new();
                for j in group.start()..group.end() {
                    let node = subject[subject_at[j]];
                    if captured.last() != Some(&node) {
                        captured.push(node);
                    }
                }

                match step {
                    PatternStep::Single(name) | PatternStep::Splat(name) => {
                        result.bindings.insert(name.clone(), captured);
                    }
                    PatternStep::Subtree(child) => {
                        let Some(&sub) = captured.first() else {
                            continue 'candidates;
                        };
                        let Some(child_match) = child.find(tree, tree.children(sub), runes) else {
                            continue 'candidates;
                        };
                        // Fold the recursive match's variables into this one.
                        result.bindings.extend(child_match.bindings);
                    }
                    PatternStep::Literal => {}
                }
            }

            return Some(result);
        }
        None
    }
}

fn rune_for(runes: &mut HashMap<String, char>, text: &str) -> Result<char, PatternError> {
    if let Some(rune) = runes.get(text) {
        return Ok(*rune);
    }
    // Starting at 128 keeps clear of every regex metacharacter.  The surrogate range cannot be
    // encoded as a char and is skipped.
    let mut code = 128 + runes.len() as u32;
    if code >= 0xD800 {
        code += 0x800;
    }
    let rune = char::from_u32(code).ok_or(PatternError::TooManyLiterals)?;
    runes.insert(text.to_string(), rune);
    Ok(rune)
}
