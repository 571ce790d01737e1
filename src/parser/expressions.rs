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

//! Expression parsing for the parser.
//!
//! This module provides expression parsing functionality:
//! - The three binary precedence levels (comparison, additive, multiplicative)
//! - `not`, grouping, designators, calls and literals
//! - Types given by name

use super::helpers::ParserHelpers;
use super::{NonTerminal, ParseAbort, Parser};
use crate::ast::{Command, CommandKind, CompareOp, Type};
use crate::error::Diagnostic;
use crate::lexer::{Token, TokenKind};

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// `literal := INTEGER | FLOAT | TRUE | FALSE`
    fn literal(&mut self) -> Result<Command, ParseAbort>;

    /// `designator := IDENTIFIER { "[" expression0 "]" }`
    ///
    /// Returns the address of the designated location.
    fn designator(&mut self) -> Result<Command, ParseAbort>;

    /// `type := IDENTIFIER`
    fn type_name(&mut self) -> Result<Type, ParseAbort>;

    /// `expression0 := expression1 [ op0 expression1 ]`
    fn expression0(&mut self) -> Result<Command, ParseAbort>;

    /// `expression1 := expression2 { op1 expression2 }`
    fn expression1(&mut self) -> Result<Command, ParseAbort>;

    /// `expression2 := expression3 { op2 expression3 }`
    fn expression2(&mut self) -> Result<Command, ParseAbort>;

    /// `expression3 := "not" expression3 | "(" expression0 ")" | designator
    /// | call-expression | literal`
    fn expression3(&mut self) -> Result<Command, ParseAbort>;

    /// `call-expression := "::" IDENTIFIER "(" expression-list ")"`
    fn call_expression(&mut self) -> Result<Command, ParseAbort>;

    /// `expression-list := [ expression0 { "," expression0 } ]`
    fn expression_list(&mut self) -> Result<Command, ParseAbort>;
}

impl<I: Iterator<Item = char>> ExpressionParser for Parser<I> {
    fn literal(&mut self) -> Result<Command, ParseAbort> {
        let token = self.expect_first(NonTerminal::Literal)?;
        let kind = match token.kind {
            TokenKind::Integer => CommandKind::LiteralInt(self.integer_value(&token)),
            TokenKind::Float => CommandKind::LiteralFloat(self.float_value(&token)),
            TokenKind::True => CommandKind::LiteralBool(true),
            _ => CommandKind::LiteralBool(false),
        };
        Ok(self.new_node(token.position(), kind))
    }

    fn designator(&mut self) -> Result<Command, ParseAbort> {
        let name = self.expect(TokenKind::Identifier)?;
        let symbol = self.try_resolve(&name);
        let mut location = self.new_node(name.position(), CommandKind::AddressOf { symbol });

        while self.have(TokenKind::OpenBracket) {
            let bracket = self.advance();
            let amount = self.expression0()?;
            self.expect(TokenKind::CloseBracket)?;
            location = self.new_node(
                bracket.position(),
                CommandKind::Index {
                    base: Box::new(location),
                    amount: Box::new(amount),
                },
            );
        }

        Ok(location)
    }

    fn type_name(&mut self) -> Result<Type, ParseAbort> {
        let token = self.expect_first(NonTerminal::Type)?;
        Ok(Type::from_name(&token.lexeme))
    }

    fn expression0(&mut self) -> Result<Command, ParseAbort> {
        let left = self.expression1()?;
        let operation = match CompareOp::from_token(self.current.kind) {
            Some(operation) if self.have_first(NonTerminal::Op0) => operation,
            _ => return Ok(left),
        };
        let operator = self.advance();
        let right = self.expression1()?;
        Ok(self.new_node(
            operator.position(),
            CommandKind::Comparison {
                operation,
                left: Box::new(left),
                right: Box::new(right),
            },
        ))
    }

    fn expression1(&mut self) -> Result<Command, ParseAbort> {
        let mut left = self.expression2()?;
        while self.have_first(NonTerminal::Op1) {
            let operator = self.advance();
            let right = self.expression2()?;
            left = self.binary(&operator, left, right);
        }
        Ok(left)
    }

    fn expression2(&mut self) -> Result<Command, ParseAbort> {
        let mut left = self.expression3()?;
        while self.have_first(NonTerminal::Op2) {
            let operator = self.advance();
            let right = self.expression3()?;
            left = self.binary(&operator, left, right);
        }
        Ok(left)
    }

    fn expression3(&mut self) -> Result<Command, ParseAbort> {
        if self.have(TokenKind::Not) {
            let operator = self.advance();
            let expression = self.expression3()?;
            return Ok(self.new_node(
                operator.position(),
                CommandKind::LogicalNot {
                    expression: Box::new(expression),
                },
            ));
        }
        if self.accept(TokenKind::OpenParen) {
            let expression = self.expression0()?;
            self.expect(TokenKind::CloseParen)?;
            return Ok(expression);
        }
        if self.have_first(NonTerminal::Designator) {
            let position = self.current.position();
            let location = self.designator()?;
            return Ok(self.new_node(
                position,
                CommandKind::Dereference {
                    expression: Box::new(location),
                },
            ));
        }
        if self.have_first(NonTerminal::CallExpression) {
            return self.call_expression();
        }
        if self.have_first(NonTerminal::Literal) {
            return self.literal();
        }
        Err(self.unexpected(NonTerminal::Expression3))
    }

    fn call_expression(&mut self) -> Result<Command, ParseAbort> {
        let call = self.expect(TokenKind::Call)?;
        let name = self.expect(TokenKind::Identifier)?;
        let function = self.try_resolve(&name);
        self.expect(TokenKind::OpenParen)?;
        let arguments = self.expression_list()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(self.new_node(
            call.position(),
            CommandKind::Call {
                function,
                arguments: Box::new(arguments),
            },
        ))
    }

    fn expression_list(&mut self) -> Result<Command, ParseAbort> {
        let position = self.current.position();
        let mut items = Vec::new();
        if self.have_first(NonTerminal::ExpressionList) {
            items.push(self.expression0()?);
            while self.accept(TokenKind::Comma) {
                items.push(self.expression0()?);
            }
        }
        Ok(self.new_node(position, CommandKind::ExpressionList(items)))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Build the node for an additive or multiplicative operator.
    fn binary(&mut self, operator: &Token, left: Command, right: Command) -> Command {
        let (left, right) = (Box::new(left), Box::new(right));
        let kind = match operator.kind {
            TokenKind::Add => CommandKind::Addition { left, right },
            TokenKind::Sub => CommandKind::Subtraction { left, right },
            TokenKind::Mul => CommandKind::Multiplication { left, right },
            TokenKind::Div => CommandKind::Division { left, right },
            TokenKind::And => CommandKind::LogicalAnd { left, right },
            _ => CommandKind::LogicalOr { left, right },
        };
        self.new_node(operator.position(), kind)
    }

    /// Value of an INTEGER token. Out-of-range literals are recorded and
    /// read as 0.
    pub(crate) fn integer_value(&mut self, token: &Token) -> i32 {
        match token.lexeme.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                self.diagnostics.push(Diagnostic::syntax(
                    format!("Integer literal {} is out of range.", token.lexeme),
                    token.position(),
                ));
                0
            }
        }
    }

    /// Value of a FLOAT token. Literals too large for a float are recorded
    /// and read as 0.0.
    pub(crate) fn float_value(&mut self, token: &Token) -> f32 {
        match token.lexeme.parse::<f32>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                self.diagnostics.push(Diagnostic::syntax(
                    format!("Float literal {} is out of range.", token.lexeme),
                    token.position(),
                ));
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser<std::str::Chars<'_>> {
        Parser::new(source.chars())
    }

    #[test]
    fn test_literals() {
        let mut p = parser("42 2.5 true false");
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralInt(42));
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralFloat(2.5));
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralBool(true));
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralBool(false));
    }

    #[test]
    fn test_type_names() {
        let mut p = parser("int float bool void text");
        assert_eq!(p.type_name(), Ok(Type::Int));
        assert_eq!(p.type_name(), Ok(Type::Float));
        assert_eq!(p.type_name(), Ok(Type::Bool));
        assert_eq!(p.type_name(), Ok(Type::Void));
        assert_eq!(p.type_name(), Ok(Type::error("Unknown type: text.")));
    }

    #[test]
    fn test_left_associative_subtraction() {
        let mut p = parser("8 - 3 - 1");
        let tree = p.expression0().unwrap();
        let CommandKind::Subtraction { left, right } = &tree.kind else {
            panic!("expected subtraction");
        };
        assert_eq!(left.name(), "Subtraction");
        assert_eq!(right.kind, CommandKind::LiteralInt(1));
    }

    #[test]
    fn test_comparison_is_not_chained() {
        let mut p = parser("1 < 2 < 3");
        let tree = p.expression0().unwrap();
        assert_eq!(tree.name(), "Comparison");
        assert!(p.have(TokenKind::LessThan));
    }

    #[test]
    fn test_not_and_grouping() {
        let mut p = parser("not (true or false) and true");
        let tree = p.expression0().unwrap();
        let CommandKind::LogicalAnd { left, .. } = &tree.kind else {
            panic!("expected and, got {:?}", tree.kind);
        };
        let CommandKind::LogicalNot { expression } = &left.kind else {
            panic!("expected not");
        };
        assert_eq!(expression.name(), "LogicalOr");
    }

    #[test]
    fn test_call_arguments() {
        let mut p = parser("::printInt(1 + 2)");
        let tree = p.expression3().unwrap();
        let CommandKind::Call { arguments, .. } = &tree.kind else {
            panic!("expected call");
        };
        assert_eq!(arguments.children().len(), 1);
        assert!(p.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_expression_list() {
        let mut p = parser(")");
        let list = p.expression_list().unwrap();
        assert_eq!(list.kind, CommandKind::ExpressionList(vec![]));
    }

    #[test]
    fn test_designator_position() {
        let mut p = parser("  q");
        let _ = p.expression3();
        assert_eq!(p.diagnostics[0].to_string(), "ResolveSymbolError(1,3)[Could not find q.]");
    }

    #[test]
    fn test_out_of_range_literal_reads_zero() {
        let mut p = parser("2147483648 2147483647");
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralInt(0));
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralInt(i32::MAX));
        assert_eq!(p.diagnostics.len(), 1);
    }

    #[test]
    fn test_overflowing_float_literal_reads_zero() {
        let huge = format!("{}.0", "9".repeat(40));
        let mut p = parser(&huge);
        assert_eq!(p.literal().unwrap().kind, CommandKind::LiteralFloat(0.0));
        assert_eq!(
            p.diagnostics[0].message,
            format!("Float literal {} is out of range.", huge)
        );
    }
}
