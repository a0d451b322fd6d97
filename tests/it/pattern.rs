// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

use tree_rewrite::parse;
use tree_rewrite::Pattern;
use tree_rewrite::PatternError;

/// Matches `pattern` against the top-level sibling list of `subject`.  A successful match is
/// summarized as its extent plus one sorted `name => capture` line per variable.
fn find(subject: &str, pattern: &str) -> Option<(usize, usize, Vec<String>)> {
    let subject_tree = parse(subject);
    let pattern_tree = parse(pattern);
    let compiled = Pattern::new(&pattern_tree).expect("pattern should compile");
    let found = compiled.find(&subject_tree, subject_tree.children(subject_tree.root()))?;
    let mut bindings: Vec<String> = found
        .bindings
        .iter()
        .map(|(name, nodes)| format!("{} => {}", name, subject_tree.serialize_nodes(nodes)))
        .collect();
    bindings.sort();
    Some((found.start, found.limit, bindings))
}

fn assignments(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[test]
fn matches_literal_tokens() {
    assert_eq!(find("x", "x"), Some((0, 1, vec![])));
    assert_eq!(find("x y z", "x y z"), Some((0, 3, vec![])));
    assert_eq!(find("x y z", "x y"), Some((0, 2, vec![])));
    assert_eq!(find("x y z", "y"), Some((1, 2, vec![])));
    assert_eq!(find("x y z", "w"), None);
}

#[test]
fn matches_single_variables() {
    assert_eq!(find("x", "$a"), Some((0, 1, assignments(&["$a => x"]))));
    assert_eq!(
        find("x y z", "x $a z"),
        Some((0, 3, assignments(&["$a => y "])))
    );
}

#[test]
fn matches_variadic_variables() {
    assert_eq!(
        find("x y", "x $a*"),
        Some((0, 2, assignments(&["$a* => y"])))
    );
    assert_eq!(
        find("x y z", "x $a*"),
        Some((0, 3, assignments(&["$a* => y z"])))
    );
    // A variadic variable may capture nothing at all.
    assert_eq!(find("x", "x $a*"), Some((0, 1, assignments(&["$a* => "]))));
}

#[test]
fn matches_several_variables_at_once() {
    assert_eq!(
        find("x 1 y 2 3 z 4 5", "x $a y $b* z $c*"),
        Some((
            0,
            8,
            assignments(&["$a => 1 ", "$b* => 2 3 ", "$c* => 4 5"])
        ))
    );
}

#[test]
fn recurses_into_subtrees() {
    assert_eq!(find("x(y,z)", "x($a,w)"), None);
    assert_eq!(
        find("x(y,z)", "x($a,z)"),
        Some((0, 6, assignments(&["$a => y"])))
    );
    // A variable can capture a whole subtree.
    assert_eq!(
        find("x(y(z))", "x($a)"),
        Some((0, 4, assignments(&["$a => y(z)"])))
    );
}

#[test]
fn rejects_duplicate_variables() {
    let pattern_tree = parse("f($x,$x)");
    assert!(matches!(
        Pattern::new(&pattern_tree),
        Err(PatternError::DuplicateVariable(name)) if name == "$x"
    ));
}

#[test]
fn treats_single_and_variadic_forms_as_distinct_variables() {
    let pattern_tree = parse("f($x,$x*)");
    assert!(Pattern::new(&pattern_tree).is_ok());
}
