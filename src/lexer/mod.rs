// Crux - A teaching compiler translating Crux programs into MIPS assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Scanner for the Crux compiler.
//!
//! This module turns a character stream into tokens, one per call. It handles:
//! - Keywords and identifiers
//! - Integer and float literals
//! - Operators and punctuation (longest match)
//! - Line comments (starting with `//`)
//!
//! The scanner never fails: characters outside the lexicon become
//! [`TokenKind::Error`] tokens and scanning continues after them.

mod helpers;
mod identifiers;
mod numbers;
mod operators;
mod tokens;

pub use tokens::{Token, TokenKind};

use helpers::ScannerHelpers;
use identifiers::IdentifierScanner;
use numbers::NumberScanner;
use operators::OperatorScanner;
use std::iter::Fuse;

/// The scanner state for tokenizing a character stream.
pub struct Scanner<I: Iterator<Item = char>> {
    /// The remaining input.
    input: Fuse<I>,
    /// The next unread character.
    lookahead: Option<char>,
    /// Rewound characters, read before `input`. The last one is read first.
    pending: Vec<char>,
    /// Current line number (1-indexed).
    line: usize,
    /// Current column number (1-indexed).
    column: usize,
    /// Whether the EOF token has been produced.
    finished: bool,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Create a new scanner over a character stream.
    pub fn new(input: I) -> Self {
        let mut input = input.fuse();
        let lookahead = input.next();
        Self {
            input,
            lookahead,
            pending: Vec::new(),
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Scan the next token.
    ///
    /// Returns an EOF token once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let (line, column) = (self.line, self.column);
        let token = match self.peek() {
            None => {
                self.finished = true;
                return Token::new(TokenKind::Eof, line, column);
            }
            Some(c) if c.is_ascii_digit() => self.scan_number(line, column),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(line, column),
            Some(_) => self.scan_operator_or_punctuation(line, column),
        };

        self.column += token.text().chars().count();
        token
    }

    /// Skip whitespace and line comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                    self.column += 1;
                }
                '\n' => {
                    self.bump();
                    self.line += 1;
                    self.column = 1;
                }
                '/' => {
                    self.bump();
                    if self.peek() != Some('/') {
                        self.rewind("/");
                        return;
                    }
                    self.column += 1;
                    self.skip_comment();
                }
                _ => return,
            }
        }
    }

    /// Skip the rest of a comment, up to but not including the newline.
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
            self.column += 1;
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    /// Yields every token up to and including EOF, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

/// Tokenize a whole source string, including the trailing EOF token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Scanner::new(source.chars()).collect();
    tracing::trace!(count = tokens.len(), "scanned tokens");
    tokens
}

/// Render the token dump, one token per line.
pub fn dump_tokens(source: &str) -> String {
    let mut output = String::new();
    for token in tokenize(source) {
        output.push_str(&token.to_string());
        output.push('\n');
    }
    output
}
