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

//! Statement parsing for the parser.
//!
//! This module provides statement parsing functionality:
//! - Assignments and call statements
//! - `if`/`else` and `while`, each block in its own scope
//! - `return`
//! - Statement lists and braced blocks

use super::declarations::DeclarationParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::{NonTerminal, ParseAbort, Parser};
use crate::ast::{Command, CommandKind};
use crate::lexer::TokenKind;

/// Extension trait for statement parsing.
pub trait StatementParser {
    /// `statement := variable-declaration | array-declaration | call-statement
    /// | assignment-statement | if-statement | while-statement | return-statement`
    fn statement(&mut self) -> Result<Command, ParseAbort>;

    /// `statement-list := { statement }`
    fn statement_list(&mut self) -> Result<Command, ParseAbort>;

    /// `statement-block := "{" statement-list "}"`
    ///
    /// The caller owns the scope of the block.
    fn statement_block(&mut self) -> Result<Command, ParseAbort>;

    /// `assignment-statement := "let" designator "=" expression0 ";"`
    fn assignment_statement(&mut self) -> Result<Command, ParseAbort>;

    /// `call-statement := call-expression ";"`
    fn call_statement(&mut self) -> Result<Command, ParseAbort>;

    /// `if-statement := "if" expression0 statement-block [ "else" statement-block ]`
    fn if_statement(&mut self) -> Result<Command, ParseAbort>;

    /// `while-statement := "while" expression0 statement-block`
    fn while_statement(&mut self) -> Result<Command, ParseAbort>;

    /// `return-statement := "return" expression0 ";"`
    fn return_statement(&mut self) -> Result<Command, ParseAbort>;
}

impl<I: Iterator<Item = char>> StatementParser for Parser<I> {
    fn statement(&mut self) -> Result<Command, ParseAbort> {
        if self.have_first(NonTerminal::VariableDeclaration) {
            self.variable_declaration()
        } else if self.have_first(NonTerminal::ArrayDeclaration) {
            self.array_declaration()
        } else if self.have_first(NonTerminal::CallStatement) {
            self.call_statement()
        } else if self.have_first(NonTerminal::AssignmentStatement) {
            self.assignment_statement()
        } else if self.have_first(NonTerminal::IfStatement) {
            self.if_statement()
        } else if self.have_first(NonTerminal::WhileStatement) {
            self.while_statement()
        } else if self.have_first(NonTerminal::ReturnStatement) {
            self.return_statement()
        } else {
            Err(self.unexpected(NonTerminal::Statement))
        }
    }

    fn statement_list(&mut self) -> Result<Command, ParseAbort> {
        let position = self.current.position();
        let mut statements = Vec::new();
        while self.have_first(NonTerminal::Statement) {
            statements.push(self.statement()?);
        }
        Ok(self.new_node(position, CommandKind::StatementList(statements)))
    }

    fn statement_block(&mut self) -> Result<Command, ParseAbort> {
        self.expect(TokenKind::OpenBrace)?;
        let statements = self.statement_list()?;
        self.expect(TokenKind::CloseBrace)?;
        Ok(statements)
    }

    fn assignment_statement(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::Let)?;
        let destination = self.designator()?;
        self.expect(TokenKind::Assign)?;
        let source = self.expression0()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(self.new_node(
            token.position(),
            CommandKind::Assignment {
                destination: Box::new(destination),
                source: Box::new(source),
            },
        ))
    }

    fn call_statement(&mut self) -> Result<Command, ParseAbort> {
        let call = self.call_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(call)
    }

    fn if_statement(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::If)?;
        let condition = self.expression0()?;
        let then_block = self.with_scope(|parser| parser.statement_block())?;
        let else_block = if self.accept(TokenKind::Else) {
            self.with_scope(|parser| parser.statement_block())?
        } else {
            let position = self.current.position();
            self.new_node(position, CommandKind::StatementList(Vec::new()))
        };
        Ok(self.new_node(
            token.position(),
            CommandKind::IfElseBranch {
                condition: Box::new(condition),
                then_block: Box::new(then_block),
                else_block: Box::new(else_block),
            },
        ))
    }

    fn while_statement(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::While)?;
        let condition = self.expression0()?;
        let body = self.with_scope(|parser| parser.statement_block())?;
        Ok(self.new_node(
            token.position(),
            CommandKind::WhileLoop {
                condition: Box::new(condition),
                body: Box::new(body),
            },
        ))
    }

    fn return_statement(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::Return)?;
        let argument = self.expression0()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(self.new_node(
            token.position(),
            CommandKind::Return {
                argument: Box::new(argument),
            },
        ))
    }
}
