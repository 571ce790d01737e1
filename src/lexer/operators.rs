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

//! Operator and punctuation scanning for the scanner.
//!
//! This module handles scanning of:
//! - Arithmetic operators (+, -, *, /)
//! - Comparison operators (==, !=, <, >, <=, >=)
//! - Punctuation (parentheses, braces, brackets, `=`, `,`, `;`, `:`, `::`)

use super::helpers::ScannerHelpers;
use super::{Scanner, Token, TokenKind};

/// Trait for operator scanning operations.
pub trait OperatorScanner {
    /// Scan the longest operator or punctuation at the lookahead.
    ///
    /// Characters read past the longest complete lexeme are rewound. If no
    /// complete lexeme was seen, the first character becomes an error token.
    fn scan_operator_or_punctuation(&mut self, line: usize, column: usize) -> Token;
}

impl<I: Iterator<Item = char>> OperatorScanner for Scanner<I> {
    fn scan_operator_or_punctuation(&mut self, line: usize, column: usize) -> Token {
        let mut consumed = String::new();
        let mut longest: Option<(TokenKind, usize)> = None;

        while let Some(c) = self.peek() {
            let mut extended = consumed.clone();
            extended.push(c);
            if !TokenKind::is_special_prefix(&extended) {
                break;
            }
            self.bump();
            consumed = extended;
            if let Some(kind) = TokenKind::special(&consumed) {
                longest = Some((kind, consumed.len()));
            }
        }

        match longest {
            Some((kind, length)) => {
                self.rewind(&consumed[length..]);
                Token::new(kind, line, column)
            }
            None => {
                let mut chars = consumed.chars();
                let offending = match chars.next() {
                    Some(first) => {
                        self.rewind(chars.as_str());
                        first
                    }
                    None => self.bump().unwrap_or_default(),
                };
                Token::with_lexeme(TokenKind::Error, offending.to_string(), line, column)
            }
        }
    }
}
