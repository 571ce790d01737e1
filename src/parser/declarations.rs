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

//! Declaration parsing for the parser.
//!
//! Variables, arrays and functions, and the `program` rule that ties the
//! top-level declarations together.

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::{NonTerminal, ParseAbort, Parser};
use crate::analyzer::SymbolId;
use crate::ast::{Command, CommandKind, Type};
use crate::error::Diagnostic;
use crate::lexer::{Token, TokenKind};

/// Extension trait for declaration parsing.
pub trait DeclarationParser {
    /// `program := declaration-list EOF`
    fn program(&mut self) -> Result<Command, ParseAbort>;

    /// `declaration-list := { declaration }`
    fn declaration_list(&mut self) -> Result<Command, ParseAbort>;

    /// `declaration := variable-declaration | array-declaration | function-definition`
    fn declaration(&mut self) -> Result<Command, ParseAbort>;

    /// `variable-declaration := "var" IDENTIFIER ":" type ";"`
    fn variable_declaration(&mut self) -> Result<Command, ParseAbort>;

    /// `array-declaration := "array" IDENTIFIER ":" type "[" INTEGER "]" { "[" INTEGER "]" } ";"`
    fn array_declaration(&mut self) -> Result<Command, ParseAbort>;

    /// `function-definition := "func" IDENTIFIER "(" parameter-list ")" ":" type statement-block`
    fn function_definition(&mut self) -> Result<Command, ParseAbort>;

    /// `parameter := IDENTIFIER ":" type`
    fn parameter(&mut self) -> Result<SymbolId, ParseAbort>;

    /// `parameter-list := [ parameter { "," parameter } ]`
    fn parameter_list(&mut self) -> Result<Vec<SymbolId>, ParseAbort>;
}

impl<I: Iterator<Item = char>> DeclarationParser for Parser<I> {
    fn program(&mut self) -> Result<Command, ParseAbort> {
        let declarations = self.declaration_list()?;
        self.expect(TokenKind::Eof)?;
        Ok(declarations)
    }

    fn declaration_list(&mut self) -> Result<Command, ParseAbort> {
        let position = self.current.position();
        let mut declarations = Vec::new();
        while self.have_first(NonTerminal::Declaration) {
            declarations.push(self.declaration()?);
        }
        Ok(self.new_node(position, CommandKind::DeclarationList(declarations)))
    }

    fn declaration(&mut self) -> Result<Command, ParseAbort> {
        if self.have_first(NonTerminal::VariableDeclaration) {
            self.variable_declaration()
        } else if self.have_first(NonTerminal::ArrayDeclaration) {
            self.array_declaration()
        } else if self.have_first(NonTerminal::FunctionDefinition) {
            self.function_definition()
        } else {
            Err(self.unexpected(NonTerminal::Declaration))
        }
    }

    fn variable_declaration(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::Var)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        let ty = self.type_name()?;
        let symbol = self.try_declare(&name, ty);
        self.expect(TokenKind::Semicolon)?;
        Ok(self.new_node(
            token.position(),
            CommandKind::VariableDeclaration { symbol },
        ))
    }

    fn array_declaration(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::Array)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        let base = self.type_name()?;

        let mut extents = Vec::new();
        loop {
            self.expect(TokenKind::OpenBracket)?;
            let extent = self.expect(TokenKind::Integer)?;
            extents.push(self.extent_value(&extent));
            self.expect(TokenKind::CloseBracket)?;
            if !self.have(TokenKind::OpenBracket) {
                break;
            }
        }
        // [3][4] of int is array[3,array[4,int]]
        let ty = extents
            .into_iter()
            .rev()
            .fold(base, |element, extent| Type::array(extent, element));

        let symbol = self.try_declare(&name, ty);
        self.expect(TokenKind::Semicolon)?;
        Ok(self.new_node(token.position(), CommandKind::ArrayDeclaration { symbol }))
    }

    fn function_definition(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect(TokenKind::Func)?;
        let name = self.expect(TokenKind::Identifier)?;
        let function = self.try_declare(&name, Type::func(Vec::new(), Type::Void));
        self.expect(TokenKind::OpenParen)?;

        let (parameters, body) = self.with_scope(|parser| {
            let parameters = parser.parameter_list()?;
            parser.expect(TokenKind::CloseParen)?;
            parser.expect(TokenKind::Colon)?;
            let ret = parser.type_name()?;
            let args = parameters
                .iter()
                .map(|id| parser.symbols.get(*id).ty.clone())
                .collect();
            // complete before the body so recursive calls resolve to the real type
            parser.symbols.set_type(function, Type::func(args, ret));
            let body = parser.statement_block()?;
            Ok((parameters, body))
        })?;

        tracing::trace!(function = %name.lexeme, "parsed function");
        Ok(self.new_node(
            token.position(),
            CommandKind::FunctionDefinition {
                function,
                parameters,
                body: Box::new(body),
            },
        ))
    }

    fn parameter(&mut self) -> Result<SymbolId, ParseAbort> {
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        let ty = self.type_name()?;
        Ok(self.try_declare(&name, ty))
    }

    fn parameter_list(&mut self) -> Result<Vec<SymbolId>, ParseAbort> {
        let mut parameters = Vec::new();
        if self.have_first(NonTerminal::ParameterList) {
            parameters.push(self.parameter()?);
            while self.accept(TokenKind::Comma) {
                parameters.push(self.parameter()?);
            }
        }
        Ok(parameters)
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Value of an array extent. Out-of-range extents are recorded and read
    /// as 0.
    fn extent_value(&mut self, token: &Token) -> u32 {
        match token.lexeme.parse::<u32>() {
            Ok(value) if value <= i32::MAX as u32 => value,
            _ => {
                self.diagnostics.push(Diagnostic::syntax(
                    format!("Integer literal {} is out of range.", token.lexeme),
                    token.position(),
                ));
                0
            }
        }
    }
}
