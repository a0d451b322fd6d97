// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

use indoc::indoc;
use tree_rewrite::parse;
use tree_rewrite::replace;
use tree_rewrite::PatternError;
use tree_rewrite::RewriteError;

fn rewrite(subject: &str, pattern: &str, replacement: &str) -> String {
    let mut subject_tree = parse(subject);
    let pattern_tree = parse(pattern);
    let replacement_tree = parse(replacement);
    replace(&mut subject_tree, &pattern_tree, &replacement_tree).expect("rewrite should succeed");
    subject_tree.serialize()
}

#[test]
fn applies_simple_replacements() {
    assert_eq!(rewrite("F", "F", "G"), "G");
    assert_eq!(
        rewrite("x F(1,2,3) y", "F($a,$b,3)", "G($b,$a)"),
        "x G(2,1) y"
    );
}

#[test]
fn duplicates_variadic_captures() {
    assert_eq!(
        rewrite("f(a,b,c)", "f($x*)", "g($x*,$x*)"),
        "g(a,b,c,a,b,c)"
    );
}

#[test]
fn rewrites_every_occurrence() {
    assert_eq!(rewrite("x F F y F", "F", "X Y"), "x X Y X Y y X Y");
    assert_eq!(
        rewrite("x(F)(F)y(F)", "(F)", "(X,Y)"),
        "x(X,Y)(X,Y)y(X,Y)"
    );
}

#[test]
fn applies_matches_bottom_up() {
    assert_eq!(rewrite("(((x+y)))", "$a+$b", "$b+$a"), "(((y+x)))");
    assert_eq!(
        rewrite("(x+y)+1", "$a + 1", "increment($a)"),
        "increment((x+y))"
    );
    // The inner sum is rewritten first, then participates in the outer match.
    assert_eq!(rewrite("x+(y+z)", "$a+$b", "$b+$a"), "(z+y)+x");
    assert_eq!(
        rewrite("(((x+(y+z))))", "$a+$b", "$b+$a"),
        "((((z+y)+x)))"
    );
}

#[test]
fn never_matches_inside_a_substitution() {
    assert_eq!(rewrite("x+y", "$a+$b", "$a/$b+0"), "x/y+0");
    // Overlapping occurrences fire only once.
    assert_eq!(rewrite("x#y#z", "$a#$b", "$b#$a"), "y#x#z");
}

#[test]
fn preserves_comments_around_matches() {
    assert_eq!(rewrite("x/*foo*/+0", "$a+0", "$a"), "x/*foo*/");
    assert_eq!(rewrite("x+0/*foo*/", "$a+0", "$a"), "x/*foo*/");
    assert_eq!(rewrite("/*foo*/0+x", "0+$a", "$a"), "/*foo*/x");
}

#[test]
fn preserves_newlines_around_matches() {
    assert_eq!(rewrite("\nx", "x", "y"), "\ny");
    assert_eq!(rewrite("\nx+0", "$a+0", "$a"), "\nx");
    assert_eq!(rewrite("x\n", "x", "y"), "y\n");
    assert_eq!(rewrite("\n\n\nx\n\n", "x", "y"), "\n\n\ny\n\n");
    assert_eq!(rewrite("\n\n\nx y\n\n", "x y", "z"), "\n\n\nz\n\n");
}

#[test]
fn leaves_non_matching_input_unchanged() {
    assert_eq!(rewrite("x(y,z)", "x($a,w)", "q"), "x(y,z)");
}

#[test]
fn rewrites_a_realistic_buffer() {
    let source = indoc! {r#"
        // tally
        total += price * qty; /* per line */
        total += tax;
    "#};
    let expected = indoc! {r#"
        // tally
        add(total, price * qty); /* per line */
        add(total, tax);
    "#};
    assert_eq!(rewrite(source, "total += $x", "add(total, $x)"), expected);
}

#[test]
fn reports_undefined_replacement_variables() {
    let mut subject = parse("F");
    let pattern = parse("F");
    let replacement = parse("$a");
    assert!(matches!(
        replace(&mut subject, &pattern, &replacement),
        Err(RewriteError::UndefinedVariable(name)) if name == "$a"
    ));
    // The subject is untouched when the rewrite is rejected.
    assert_eq!(subject.serialize(), "F");
}

#[test]
fn rejects_patterns_without_anchors() {
    let mut subject = parse("x+y");
    let pattern = parse("$a");
    let replacement = parse("$a");
    assert!(matches!(
        replace(&mut subject, &pattern, &replacement),
        Err(RewriteError::AnchorlessPattern)
    ));
}

#[test]
fn rejects_duplicate_pattern_variables() {
    let mut subject = parse("f(a,b)");
    let pattern = parse("f($x,$x)");
    let replacement = parse("g($x)");
    assert!(matches!(
        replace(&mut subject, &pattern, &replacement),
        Err(RewriteError::Pattern(PatternError::DuplicateVariable(name))) if name == "$x"
    ));
}
