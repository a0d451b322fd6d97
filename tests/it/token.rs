// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

use std::fmt::Write as _;

use tree_rewrite::token::Tokenizer;
use tree_rewrite::TokenType;

fn scan(input: &str) -> String {
    let mut tokenizer = Tokenizer::new(input);
    let mut result = String::new();
    loop {
        let token = tokenizer.read();
        if token.kind == TokenType::End {
            break;
        }
        write!(result, "{}", token).unwrap();
    }
    result
}

#[test]
fn can_scan_multi_character_operators() {
    for (input, expected) in [
        ("!=", "(OTHER 1.1 !=)"),
        ("%=", "(OTHER 1.1 %=)"),
        ("&&", "(OTHER 1.1 &&)"),
        ("&=", "(OTHER 1.1 &=)"),
        ("*=", "(OTHER 1.1 *=)"),
        ("++", "(OTHER 1.1 ++)"),
        ("+=", "(OTHER 1.1 +=)"),
        ("--", "(OTHER 1.1 --)"),
        ("-=", "(OTHER 1.1 -=)"),
        ("->", "(OTHER 1.1 ->)"),
        ("/=", "(OTHER 1.1 /=)"),
        ("<<", "(OTHER 1.1 <<)"),
        ("<<=", "(OTHER 1.1 <<=)"),
        ("<=", "(OTHER 1.1 <=)"),
        ("==", "(OTHER 1.1 ==)"),
        (">=", "(OTHER 1.1 >=)"),
        (">>", "(OTHER 1.1 >>)"),
        (">>=", "(OTHER 1.1 >>=)"),
        ("^=", "(OTHER 1.1 ^=)"),
        ("|=", "(OTHER 1.1 |=)"),
        ("||", "(OTHER 1.1 ||)"),
    ] {
        assert_eq!(scan(input), expected, "scan({:?})", input);
    }
}

#[test]
fn can_scan_individual_tokens() {
    for (input, expected) in [
        // Empty input
        ("", ""),
        // Various token types by themselves
        (r#""foo""#, r#"(STRING 1.1 "foo")"#),
        ("'foo'", "(STRING 1.1 'foo')"),
        ("// foo\n", ""),
        ("/* foo\nbar */", ""),
        ("foo", "(WORD 1.1 foo)"),
        (" \t", ""),
        ("$x", "(VAR 1.1 $x)"),
        ("$x*", "(SPLAT 1.1 $x*)"),
        ("$", "(OTHER 1.1 $)"),
        ("(", "(OPENER 1.1 ()"),
        ("]", "(CLOSER 1.1 ])"),
        // Combination
        (
            "a1b /*x\ny*/$a$b* 200",
            "(WORD 1.1 a1b)(VAR 2.4 $a)(SPLAT 2.6 $b*)(WORD 2.10 200)",
        ),
        // Early termination
        (r#""foo"#, r#"(STRING 1.1 "foo)"#),
        ("'foo", "(STRING 1.1 'foo)"),
        ("/* foo", ""),
    ] {
        assert_eq!(scan(input), expected, "scan({:?})", input);
    }
}

#[test]
fn attaches_trivia_to_neighboring_tokens() {
    let mut tokenizer = Tokenizer::new("// lead\nx /*mid*/ y\n// trail\n");

    let x = tokenizer.read();
    assert_eq!(x.text, "x");
    let prefixes: Vec<&str> = x.prefix.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(prefixes, vec!["// lead\n"]);
    let suffixes: Vec<&str> = x.suffix.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(suffixes, vec![" ", "/*mid*/", " "]);

    // Trivia after the line break belongs to y; with only the end of input following, y also
    // picks up the trailing trivia as suffix.
    let y = tokenizer.read();
    assert_eq!(y.text, "y");
    assert!(y.prefix.is_empty());
    let suffixes: Vec<&str> = y.suffix.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(suffixes, vec!["\n", "// trail\n"]);

    assert_eq!(tokenizer.read().kind, TokenType::End);
}

#[test]
fn tracks_lines_and_columns() {
    assert_eq!(scan("\tx"), "(WORD 1.9 x)");
    assert_eq!(scan("\n\n  x"), "(WORD 3.3 x)");
}
