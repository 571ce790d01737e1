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

//! Parser helper methods for token matching, node creation and symbols.
//!
//! This module provides utility methods for the parser including:
//! - Token matching by kind or by FIRST set (`have`, `accept`, `expect`)
//! - Syntax error recording
//! - Node creation with fresh ids
//! - Declaring and resolving names with sentinel recovery
//! - Scoped parsing that always closes its scope

use super::{NonTerminal, ParseAbort, Parser};
use crate::analyzer::SymbolId;
use crate::ast::{Command, CommandKind, Type};
use crate::error::{Diagnostic, Position};
use crate::lexer::{Token, TokenKind};

/// Trait for parser helper operations.
pub trait ParserHelpers {
    /// Check if the current token has the given kind.
    fn have(&self, kind: TokenKind) -> bool;

    /// Check if the current token can start the given rule.
    fn have_first(&self, rule: NonTerminal) -> bool;

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token;

    /// Consume the current token if it has the given kind.
    fn accept(&mut self, kind: TokenKind) -> bool;

    /// Consume a token of the given kind, or record a syntax error and abort.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseAbort>;

    /// Consume a token that can start the given rule, or record a syntax
    /// error and abort.
    fn expect_first(&mut self, rule: NonTerminal) -> Result<Token, ParseAbort>;

    /// Record `Expected a token from RULE but got KIND.` and abort.
    fn unexpected(&mut self, rule: NonTerminal) -> ParseAbort;

    /// Create a node with a fresh id.
    fn new_node(&mut self, position: Position, kind: CommandKind) -> Command;

    /// Declare the name of an identifier token in the current scope.
    ///
    /// A redeclaration is recorded and answered with a sentinel symbol.
    fn try_declare(&mut self, name: &Token, ty: Type) -> SymbolId;

    /// Resolve the name of an identifier token.
    ///
    /// A missing name is recorded and answered with a sentinel symbol.
    fn try_resolve(&mut self, name: &Token) -> SymbolId;

    /// Run `body` in a new scope. The scope is closed on abort as well.
    fn with_scope<T, F>(&mut self, body: F) -> Result<T, ParseAbort>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseAbort>;
}

impl<I: Iterator<Item = char>> ParserHelpers for Parser<I> {
    fn have(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn have_first(&self, rule: NonTerminal) -> bool {
        rule.starts_with(self.current.kind)
    }

    fn advance(&mut self) -> Token {
        let next = self.scanner.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.have(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseAbort> {
        if self.have(kind) {
            return Ok(self.advance());
        }
        let message = format!("Expected {} but got {}.", kind, self.current.kind);
        self.diagnostics
            .push(Diagnostic::syntax(message, self.current.position()));
        Err(ParseAbort)
    }

    fn expect_first(&mut self, rule: NonTerminal) -> Result<Token, ParseAbort> {
        if self.have_first(rule) {
            return Ok(self.advance());
        }
        Err(self.unexpected(rule))
    }

    fn unexpected(&mut self, rule: NonTerminal) -> ParseAbort {
        let message = format!(
            "Expected a token from {} but got {}.",
            rule, self.current.kind
        );
        self.diagnostics
            .push(Diagnostic::syntax(message, self.current.position()));
        ParseAbort
    }

    fn new_node(&mut self, position: Position, kind: CommandKind) -> Command {
        Command::new(self.next_node_id(), position, kind)
    }

    fn try_declare(&mut self, name: &Token, ty: Type) -> SymbolId {
        match self.symbols.insert(&name.lexeme, ty) {
            Ok(id) => id,
            Err(_) => {
                let message = format!("{} already exists.", name.lexeme);
                self.diagnostics
                    .push(Diagnostic::declare(message.clone(), name.position()));
                self.symbols.error_symbol(message)
            }
        }
    }

    fn try_resolve(&mut self, name: &Token) -> SymbolId {
        match self.symbols.lookup(&name.lexeme) {
            Some(id) => id,
            None => {
                let message = format!("Could not find {}.", name.lexeme);
                self.diagnostics
                    .push(Diagnostic::resolve(message.clone(), name.position()));
                self.symbols.error_symbol(message)
            }
        }
    }

    fn with_scope<T, F>(&mut self, body: F) -> Result<T, ParseAbort>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseAbort>,
    {
        self.symbols.push_scope();
        let result = body(self);
        self.symbols.pop_scope();
        result
    }
}
