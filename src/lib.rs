// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! This library finds and rewrites occurrences of an expression pattern in source code written
//! in conventional curly-brace languages (C, C++, and friends).
//!
//! # Overview
//!
//! Source text is parsed into a loose expression tree: the parser knows bracket grouping and the
//! usual operator precedence ladder, but no particular language's grammar.  Comments and
//! whitespace are attached to the neighboring tokens as _trivia_, so serializing an unmodified
//! tree reproduces the input byte for byte.
//!
//! A pattern is ordinary source text plus variables.  `$name` matches exactly one node (a token
//! or a whole subtree); `$name*` matches any number of consecutive siblings.  The replacement
//! may mention the pattern's variables to splice the captured nodes back in:
//!
//! ```
//! use tree_rewrite::parse;
//! use tree_rewrite::replace;
//!
//! let mut subject = parse("f(a,b,c)");
//! let pattern = parse("f($args*)");
//! let replacement = parse("g($args*)");
//! replace(&mut subject, &pattern, &replacement).unwrap();
//! assert_eq!(subject.serialize(), "g(a,b,c)");
//! ```
//!
//! Rewriting works bottom-up, so a substitution can itself become part of an enclosing match,
//! and comments that decorated a rewritten region are carried over to its substitution instead
//! of being dropped.

mod comments;
pub mod parser;
pub mod pattern;
pub mod rewrite;
pub mod token;
pub mod tree;

pub use parser::parse;
pub use pattern::Match;
pub use pattern::Pattern;
pub use pattern::PatternError;
pub use rewrite::replace;
pub use rewrite::RewriteError;
pub use token::Token;
pub use token::TokenType;
pub use token::Tokenizer;
pub use tree::NodeId;
pub use tree::Tree;
