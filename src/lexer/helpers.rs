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

//! Scanner helper methods for character navigation.
//!
//! The scanner keeps exactly one unread character of lookahead. Characters
//! that were read past the end of a token are rewound into the pending
//! buffer, which is drained before fresh input is read.

use super::Scanner;

/// Trait for scanner helper operations.
pub trait ScannerHelpers {
    /// Peek at the lookahead character without consuming it.
    fn peek(&self) -> Option<char>;

    /// Consume the lookahead character and return it.
    fn bump(&mut self) -> Option<char>;

    /// Push over-read characters back in front of the lookahead.
    fn rewind(&mut self, over_read: &str);
}

impl<I: Iterator<Item = char>> ScannerHelpers for Scanner<I> {
    fn peek(&self) -> Option<char> {
        self.lookahead
    }

    fn bump(&mut self) -> Option<char> {
        let current = self.lookahead;
        self.lookahead = self.pending.pop().or_else(|| self.input.next());
        current
    }

    fn rewind(&mut self, over_read: &str) {
        if over_read.is_empty() {
            return;
        }
        // pending is a stack: the last element is read next
        if let Some(c) = self.lookahead.take() {
            self.pending.push(c);
        }
        self.pending.extend(over_read.chars().rev());
        self.lookahead = self.pending.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_and_peek() {
        let mut scanner = Scanner::new("ab".chars());
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.bump(), Some('a'));
        assert_eq!(scanner.peek(), Some('b'));
        assert_eq!(scanner.bump(), Some('b'));
        assert_eq!(scanner.peek(), None);
        assert_eq!(scanner.bump(), None);
    }

    #[test]
    fn test_rewind_restores_order() {
        let mut scanner = Scanner::new("abcd".chars());
        scanner.bump();
        scanner.bump();
        scanner.bump();
        scanner.rewind("bc");
        let rest: String = std::iter::from_fn(|| scanner.bump()).collect();
        assert_eq!(rest, "bcd");
    }

    #[test]
    fn test_rewind_at_end_of_input() {
        let mut scanner = Scanner::new("1.".chars());
        scanner.bump();
        scanner.bump();
        assert_eq!(scanner.peek(), None);
        scanner.rewind(".");
        assert_eq!(scanner.bump(), Some('.'));
        assert_eq!(scanner.bump(), None);
    }
}
