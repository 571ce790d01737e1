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

//! Grammar rule names and their FIRST sets.
//!
//! The parser decides between alternatives by checking whether the current
//! token is in the FIRST set of a rule. Rule names also appear in syntax
//! errors (`Expected a token from STATEMENT but got ...`).

use std::fmt;

use crate::lexer::TokenKind;

/// A rule of the Crux grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Designator,
    Type,
    Literal,
    CallExpression,
    Op0,
    Op1,
    Op2,
    Expression0,
    Expression1,
    Expression2,
    Expression3,
    ExpressionList,
    Parameter,
    ParameterList,
    VariableDeclaration,
    ArrayDeclaration,
    FunctionDefinition,
    Declaration,
    DeclarationList,
    AssignmentStatement,
    CallStatement,
    IfStatement,
    WhileStatement,
    ReturnStatement,
    Statement,
    StatementList,
    StatementBlock,
    Program,
}

use TokenKind as K;

const LITERAL: &[TokenKind] = &[K::Integer, K::Float, K::True, K::False];
const OP0: &[TokenKind] = &[
    K::GreaterEqual,
    K::LesserEqual,
    K::NotEqual,
    K::Equal,
    K::GreaterThan,
    K::LessThan,
];
const OP1: &[TokenKind] = &[K::Add, K::Sub, K::Or];
const OP2: &[TokenKind] = &[K::Mul, K::Div, K::And];
const EXPRESSION: &[TokenKind] = &[
    K::Not,
    K::OpenParen,
    K::Identifier,
    K::Call,
    K::Integer,
    K::Float,
    K::True,
    K::False,
];
const DECLARATION: &[TokenKind] = &[K::Var, K::Array, K::Func];
const STATEMENT: &[TokenKind] = &[
    K::Var,
    K::Array,
    K::Call,
    K::Let,
    K::If,
    K::While,
    K::Return,
];
const PROGRAM: &[TokenKind] = &[K::Var, K::Array, K::Func, K::Eof];

impl NonTerminal {
    /// Tokens that can start this rule.
    ///
    /// Rules that may derive the empty string list the tokens of their
    /// non-empty alternatives only.
    pub fn first_set(&self) -> &'static [TokenKind] {
        match self {
            NonTerminal::Designator
            | NonTerminal::Type
            | NonTerminal::Parameter
            | NonTerminal::ParameterList => &[K::Identifier],
            NonTerminal::Literal => LITERAL,
            NonTerminal::CallExpression | NonTerminal::CallStatement => &[K::Call],
            NonTerminal::Op0 => OP0,
            NonTerminal::Op1 => OP1,
            NonTerminal::Op2 => OP2,
            NonTerminal::Expression0
            | NonTerminal::Expression1
            | NonTerminal::Expression2
            | NonTerminal::Expression3
            | NonTerminal::ExpressionList => EXPRESSION,
            NonTerminal::VariableDeclaration => &[K::Var],
            NonTerminal::ArrayDeclaration => &[K::Array],
            NonTerminal::FunctionDefinition => &[K::Func],
            NonTerminal::Declaration | NonTerminal::DeclarationList => DECLARATION,
            NonTerminal::AssignmentStatement => &[K::Let],
            NonTerminal::IfStatement => &[K::If],
            NonTerminal::WhileStatement => &[K::While],
            NonTerminal::ReturnStatement => &[K::Return],
            NonTerminal::Statement | NonTerminal::StatementList => STATEMENT,
            NonTerminal::StatementBlock => &[K::OpenBrace],
            NonTerminal::Program => PROGRAM,
        }
    }

    /// Check whether a token kind can start this rule.
    pub fn starts_with(&self, kind: TokenKind) -> bool {
        self.first_set().contains(&kind)
    }

    /// The rule name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::Designator => "DESIGNATOR",
            NonTerminal::Type => "TYPE",
            NonTerminal::Literal => "LITERAL",
            NonTerminal::CallExpression => "CALL_EXPRESSION",
            NonTerminal::Op0 => "OP0",
            NonTerminal::Op1 => "OP1",
            NonTerminal::Op2 => "OP2",
            NonTerminal::Expression0 => "EXPRESSION0",
            NonTerminal::Expression1 => "EXPRESSION1",
            NonTerminal::Expression2 => "EXPRESSION2",
            NonTerminal::Expression3 => "EXPRESSION3",
            NonTerminal::ExpressionList => "EXPRESSION_LIST",
            NonTerminal::Parameter => "PARAMETER",
            NonTerminal::ParameterList => "PARAMETER_LIST",
            NonTerminal::VariableDeclaration => "VARIABLE_DECLARATION",
            NonTerminal::ArrayDeclaration => "ARRAY_DECLARATION",
            NonTerminal::FunctionDefinition => "FUNCTION_DEFINITION",
            NonTerminal::Declaration => "DECLARATION",
            NonTerminal::DeclarationList => "DECLARATION_LIST",
            NonTerminal::AssignmentStatement => "ASSIGNMENT_STATEMENT",
            NonTerminal::CallStatement => "CALL_STATEMENT",
            NonTerminal::IfStatement => "IF_STATEMENT",
            NonTerminal::WhileStatement => "WHILE_STATEMENT",
            NonTerminal::ReturnStatement => "RETURN_STATEMENT",
            NonTerminal::Statement => "STATEMENT",
            NonTerminal::StatementList => "STATEMENT_LIST",
            NonTerminal::StatementBlock => "STATEMENT_BLOCK",
            NonTerminal::Program => "PROGRAM",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
