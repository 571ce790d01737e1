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

//! Expression operator definitions.

use std::fmt;

use crate::lexer::TokenKind;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `!=`
    Ne,
    /// `==`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl CompareOp {
    /// Map a comparison token to its operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::GreaterEqual => Some(CompareOp::Ge),
            TokenKind::LesserEqual => Some(CompareOp::Le),
            TokenKind::NotEqual => Some(CompareOp::Ne),
            TokenKind::Equal => Some(CompareOp::Eq),
            TokenKind::GreaterThan => Some(CompareOp::Gt),
            TokenKind::LessThan => Some(CompareOp::Lt),
            _ => None,
        }
    }

    /// Whether this is `==` or `!=`.
    pub fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Ne => "!=",
            CompareOp::Eq => "==",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
        };
        f.write_str(symbol)
    }
}
