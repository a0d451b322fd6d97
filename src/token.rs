// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Splits source text into tokens, attaching neighboring comments and whitespace to them

use std::fmt;

use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// The kind of a token produced by the [`Tokenizer`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenType {
    End,
    Str,
    Comment,
    Word,
    Space,
    Var,
    Splat,
    Other,
    Opener,
    Closer,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::End => "END",
            TokenType::Str => "STRING",
            TokenType::Comment => "COMMENT",
            TokenType::Word => "WORD",
            TokenType::Space => "SPACE",
            TokenType::Var => "VAR",
            TokenType::Splat => "SPLAT",
            TokenType::Other => "OTHER",
            TokenType::Opener => "OPENER",
            TokenType::Closer => "CLOSER",
        };
        write!(f, "{}", name)
    }
}

/// The position of a token within its source text.  Positions identify trivia across copies of a
/// tree: two trivia with the same position are the same comment.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Whether a piece of trivia is a comment or a whitespace run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TriviaKind {
    Comment,
    Space,
}

/// A comment or whitespace run attached to a neighboring content token
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

impl Trivia {
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}

/// The trivia attached to one side of a token.  Most tokens carry at most a couple of pieces.
pub type TriviaList = SmallVec<[Trivia; 2]>;

/// One content token, together with the trivia on either side of it.  Lines and columns are
/// 1-based; `text` holds the exact source bytes the token spans.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenType,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub prefix: TriviaList,
    pub suffix: TriviaList,
}

impl Token {
    /// Creates a token with no source position, used for synthesized leaves.
    pub(crate) fn detached(kind: TokenType) -> Token {
        Token {
            kind,
            line: 0,
            column: 0,
            text: String::new(),
            prefix: TriviaList::new(),
            suffix: TriviaList::new(),
        }
    }

    fn end_at(line: usize, column: usize) -> Token {
        let mut token = Token::detached(TokenType::End);
        token.line = line;
        token.column = column;
        token
    }

    /// Only valid for raw COMMENT and SPACE tokens.
    fn into_trivia(self) -> Trivia {
        let kind = if self.kind == TokenType::Comment {
            TriviaKind::Comment
        } else {
            TriviaKind::Space
        };
        Trivia {
            kind,
            line: self.line,
            column: self.column,
            text: self.text,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.kind == TokenType::Space {
            // Spaces are quoted for clarity.
            write!(f, "({} {}.{} {:?})", self.kind, self.line, self.column, self.text)
        } else {
            write!(f, "({} {}.{} {})", self.kind, self.line, self.column, self.text)
        }
    }
}

type Reader = fn(&str) -> (TokenType, usize);

enum ScanAction {
    Emit(TokenType),
    Read(Reader),
}

/// One candidate for a leading byte: the suffix that must follow the byte, and either a fixed
/// token type or a reader that determines the type and length itself.
struct ScanEntry {
    suffix: &'static str,
    action: ScanAction,
}

impl ScanEntry {
    fn emit(suffix: &'static str, kind: TokenType) -> ScanEntry {
        ScanEntry {
            suffix,
            action: ScanAction::Emit(kind),
        }
    }

    fn read(suffix: &'static str, reader: Reader) -> ScanEntry {
        ScanEntry {
            suffix,
            action: ScanAction::Read(reader),
        }
    }
}

/// Dispatch table from the leading byte of a token to the candidates that can start with that
/// byte.  The first candidate whose suffix matches wins.
struct Scanner {
    table: [Vec<ScanEntry>; 256],
}

static SCANNER: Lazy<Scanner> = Lazy::new(Scanner::new);

impl Scanner {
    fn new() -> Scanner {
        let mut table: [Vec<ScanEntry>; 256] = std::array::from_fn(|_| Vec::new());

        // For now just process C/C++ syntax.
        table[b'(' as usize].push(ScanEntry::emit("", TokenType::Opener));
        table[b')' as usize].push(ScanEntry::emit("", TokenType::Closer));
        table[b'[' as usize].push(ScanEntry::emit("", TokenType::Opener));
        table[b']' as usize].push(ScanEntry::emit("", TokenType::Closer));
        table[b'{' as usize].push(ScanEntry::emit("", TokenType::Opener));
        table[b'}' as usize].push(ScanEntry::emit("", TokenType::Closer));

        // Variable-length tokens.
        table[b'$' as usize].push(ScanEntry::read("", read_var));
        table[b'"' as usize].push(ScanEntry::read("", read_double_quoted));
        table[b'\'' as usize].push(ScanEntry::read("", read_single_quoted));
        table[b'/' as usize].push(ScanEntry::read("/", read_line_comment));
        table[b'/' as usize].push(ScanEntry::read("*", read_block_comment));

        // Spaces and words.
        for b in 0..=255u8 {
            if is_space(b) {
                table[b as usize].push(ScanEntry::read("", read_spaces));
            } else if is_word_byte(b) {
                table[b as usize].push(ScanEntry::read("", read_word));
            }
        }

        // Multi-character operators.  When two operators share a suffix, the longer one must
        // occur first.
        for op in [
            "%=", "&=", "*=", "+=", "-=", "<<=", ">>=", "^=", "|=", "/=", "&&", "||", "++", "--",
            "->", "<<", ">>", "==", "!=", "<=", ">=",
        ] {
            let b = op.as_bytes()[0] as usize;
            table[b].push(ScanEntry::emit(&op[1..], TokenType::Other));
        }

        Scanner { table }
    }
}

fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r' || b == b'\n'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn read_double_quoted(input: &str) -> (TokenType, usize) {
    read_string(input, b'"')
}

fn read_single_quoted(input: &str) -> (TokenType, usize) {
    read_string(input, b'\'')
}

fn read_string(input: &str, delimiter: u8) -> (TokenType, usize) {
    // Caller guarantees input starts with the string opener.
    let bytes = input.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == delimiter {
            return (TokenType::Str, i + 1);
        }
        if bytes[i] == b'\\' {
            i += 1; // Escape next
        }
        i += 1;
    }
    (TokenType::Str, input.len())
}

fn read_line_comment(input: &str) -> (TokenType, usize) {
    match input.find('\n') {
        // Include the newline in the comment token.
        Some(i) => (TokenType::Comment, i + 1),
        None => (TokenType::Comment, input.len()),
    }
}

fn read_block_comment(input: &str) -> (TokenType, usize) {
    // Caller guarantees input starts with "/*".
    let bytes = input.as_bytes();
    let mut i = 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return (TokenType::Comment, i + 2);
        }
        i += 1;
    }
    (TokenType::Comment, input.len())
}

fn read_word(input: &str) -> (TokenType, usize) {
    let bytes = input.as_bytes();
    for i in 1..bytes.len() {
        if !is_word_byte(bytes[i]) {
            return (TokenType::Word, i);
        }
    }
    (TokenType::Word, input.len())
}

fn read_var(input: &str) -> (TokenType, usize) {
    let bytes = input.as_bytes();
    if bytes.len() > 1 && is_word_byte(bytes[1]) {
        let (_, word_len) = read_word(&input[1..]);
        let end = 1 + word_len;
        // Optional trailing '*' marks a variadic variable.
        if bytes.get(end) == Some(&b'*') {
            (TokenType::Splat, end + 1)
        } else {
            (TokenType::Var, end)
        }
    } else {
        (TokenType::Other, 1)
    }
}

fn read_spaces(input: &str) -> (TokenType, usize) {
    let bytes = input.as_bytes();
    for i in 1..bytes.len() {
        if !is_space(bytes[i]) {
            return (TokenType::Space, i);
        }
    }
    (TokenType::Space, input.len())
}

/// Produces the content tokens of a source buffer one at a time.  Comment and whitespace tokens
/// are never returned directly; they are absorbed into the prefix or suffix of the content tokens
/// around them.
pub struct Tokenizer<'a> {
    input: &'a str,
    buffered: Vec<Trivia>,
    peek: Token,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Tokenizer<'a> {
        let mut tokenizer = Tokenizer {
            input,
            buffered: Vec::new(),
            peek: Token::end_at(1, 1),
            line: 1,
            column: 0,
        };
        loop {
            let raw = tokenizer.read_raw();
            match raw.kind {
                TokenType::Comment | TokenType::Space => tokenizer.buffered.push(raw.into_trivia()),
                _ => {
                    tokenizer.peek = raw;
                    break;
                }
            }
        }
        tokenizer
    }

    /// The next content token, without consuming it or attaching its trivia.
    pub fn peek(&self) -> &Token {
        &self.peek
    }

    /// Consumes the next content token.  Trivia buffered so far becomes its prefix; trivia
    /// following it joins its suffix until the first line break, after which trivia is buffered
    /// for the token after this one.  Trivia still pending at the end of input is attached to
    /// this token's suffix so it is not lost.
    pub fn read(&mut self) -> Token {
        let mut result = self.peek.clone();
        result.prefix = std::mem::take(&mut self.buffered).into();
        let mut on_same_line = true;
        loop {
            let raw = self.read_raw();
            match raw.kind {
                TokenType::Comment | TokenType::Space => {
                    if on_same_line && self.line == result.line {
                        result.suffix.push(raw.into_trivia());
                    } else {
                        on_same_line = false;
                        self.buffered.push(raw.into_trivia());
                    }
                }
                _ => {
                    self.peek = raw;
                    break;
                }
            }
        }
        if self.peek.kind == TokenType::End && !self.buffered.is_empty() {
            // Instead of attaching as prefix to the END token, attach here.
            result.suffix.extend(self.buffered.drain(..));
        }
        result
    }

    fn read_raw(&mut self) -> Token {
        if self.input.is_empty() {
            return Token::end_at(self.line, self.column + 1);
        }

        // If no candidate matches, the token is the next character.
        let first = self.input.as_bytes()[0];
        let mut kind = TokenType::Other;
        let mut end = self.input.chars().next().map_or(1, char::len_utf8);
        for entry in &SCANNER.table[first as usize] {
            let sentinel_len = 1 + entry.suffix.len();
            if self.input.len() >= sentinel_len
                && &self.input.as_bytes()[1..sentinel_len] == entry.suffix.as_bytes()
            {
                match entry.action {
                    ScanAction::Emit(entry_kind) => {
                        kind = entry_kind;
                        end = sentinel_len;
                    }
                    ScanAction::Read(reader) => {
                        let (read_kind, read_end) = reader(self.input);
                        kind = read_kind;
                        end = read_end;
                    }
                }
                break;
            }
        }

        let token = Token {
            kind,
            line: self.line,
            column: self.column + 1,
            text: self.input[..end].to_string(),
            prefix: TriviaList::new(),
            suffix: TriviaList::new(),
        };
        self.input = &self.input[end..];

        // Update line and column numbers.
        for ch in token.text.chars() {
            self.column += 1;
            if ch == '\t' {
                while self.column % 8 != 0 {
                    self.column += 1;
                }
            }
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            }
        }

        token
    }
}

/// The closing bracket matching an opener, or the empty string for anything else.
pub(crate) fn closer_for(opener: &str) -> &'static str {
    match opener {
        "(" => ")",
        "{" => "}",
        "[" => "]",
        _ => "",
    }
}
