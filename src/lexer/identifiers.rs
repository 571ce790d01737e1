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

//! Identifier and keyword scanning for the scanner.

use super::helpers::ScannerHelpers;
use super::{Scanner, Token, TokenKind};

/// Trait for identifier scanning operations.
pub trait IdentifierScanner {
    /// Scan an identifier or keyword.
    ///
    /// The longest run of letters, digits and underscores is taken first;
    /// it is a keyword only if the whole run matches one exactly.
    fn scan_identifier(&mut self, line: usize, column: usize) -> Token;
}

impl<I: Iterator<Item = char>> IdentifierScanner for Scanner<I> {
    fn scan_identifier(&mut self, line: usize, column: usize) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
                lexeme.push(c);
            } else {
                break;
            }
        }

        match TokenKind::keyword(&lexeme) {
            Some(kind) => Token::new(kind, line, column),
            None => Token::with_lexeme(TokenKind::Identifier, lexeme, line, column),
        }
    }
}
