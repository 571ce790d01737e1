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

//! Number literal scanning for the scanner.
//!
//! Integers are a run of digits. A float needs at least one digit on both
//! sides of the `.`; a `.` that is not followed by a digit is left unread.

use super::helpers::ScannerHelpers;
use super::{Scanner, Token, TokenKind};

/// Trait for number scanning operations.
pub trait NumberScanner {
    /// Scan an integer or float literal starting at the lookahead digit.
    fn scan_number(&mut self, line: usize, column: usize) -> Token;
}

impl<I: Iterator<Item = char>> NumberScanner for Scanner<I> {
    fn scan_number(&mut self, line: usize, column: usize) -> Token {
        let mut lexeme = String::new();
        self.take_digits(&mut lexeme);

        if self.peek() == Some('.') {
            self.bump();
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                lexeme.push('.');
                self.take_digits(&mut lexeme);
                return Token::with_lexeme(TokenKind::Float, lexeme, line, column);
            }
            self.rewind(".");
        }

        Token::with_lexeme(TokenKind::Integer, lexeme, line, column)
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    fn take_digits(&mut self, lexeme: &mut String) {
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.bump();
            lexeme.push(c);
        }
    }
}
