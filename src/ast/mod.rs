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

//! Syntax tree definitions for the Crux compiler.
//!
//! Every node is a [`Command`]: a unique [`NodeId`], the source position it
//! came from, and a [`CommandKind`]. Nodes own their children. Names are
//! referenced through [`SymbolId`]s into the symbol arena built by the
//! parser.

mod expr;
mod types;

pub use expr::*;
pub use types::*;

use crate::analyzer::SymbolId;
use crate::error::Position;

/// Identity of a node, unique within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Node identity, used to key the type map.
    pub id: NodeId,
    /// Source position of the construct.
    pub position: Position,
    /// What the node is.
    pub kind: CommandKind,
}

/// The closed set of syntax tree node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    // Containers
    /// Top-level declarations.
    DeclarationList(Vec<Command>),
    /// Statements of a block.
    StatementList(Vec<Command>),
    /// Call arguments.
    ExpressionList(Vec<Command>),

    // Declarations
    /// `var x : type ;`
    VariableDeclaration { symbol: SymbolId },
    /// `array a : type [n]... ;`
    ArrayDeclaration { symbol: SymbolId },
    /// `func f ( params ) : type { body }`
    FunctionDefinition {
        function: SymbolId,
        parameters: Vec<SymbolId>,
        body: Box<Command>,
    },

    // Locations
    /// The address of a named variable or array.
    AddressOf { symbol: SymbolId },
    /// Load the value stored at an address.
    Dereference { expression: Box<Command> },
    /// The address of one element of an array.
    Index {
        base: Box<Command>,
        amount: Box<Command>,
    },

    // Literals
    LiteralBool(bool),
    LiteralInt(i32),
    LiteralFloat(f32),

    // Operators
    Addition {
        left: Box<Command>,
        right: Box<Command>,
    },
    Subtraction {
        left: Box<Command>,
        right: Box<Command>,
    },
    Multiplication {
        left: Box<Command>,
        right: Box<Command>,
    },
    Division {
        left: Box<Command>,
        right: Box<Command>,
    },
    Comparison {
        operation: CompareOp,
        left: Box<Command>,
        right: Box<Command>,
    },
    LogicalAnd {
        left: Box<Command>,
        right: Box<Command>,
    },
    LogicalOr {
        left: Box<Command>,
        right: Box<Command>,
    },
    LogicalNot { expression: Box<Command> },

    // Statements
    /// `let destination = source ;`
    Assignment {
        destination: Box<Command>,
        source: Box<Command>,
    },
    /// `:: f ( arguments )`
    Call {
        function: SymbolId,
        arguments: Box<Command>,
    },
    /// `if` with an else block, empty when absent.
    IfElseBranch {
        condition: Box<Command>,
        then_block: Box<Command>,
        else_block: Box<Command>,
    },
    WhileLoop {
        condition: Box<Command>,
        body: Box<Command>,
    },
    Return { argument: Box<Command> },

    /// Stands in for a construct that could not be parsed.
    Error { message: String },
}

impl Command {
    /// Create a node.
    pub fn new(id: NodeId, position: Position, kind: CommandKind) -> Self {
        Self { id, position, kind }
    }

    /// The variant name, as used in messages.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            CommandKind::DeclarationList(_) => "DeclarationList",
            CommandKind::StatementList(_) => "StatementList",
            CommandKind::ExpressionList(_) => "ExpressionList",
            CommandKind::VariableDeclaration { .. } => "VariableDeclaration",
            CommandKind::ArrayDeclaration { .. } => "ArrayDeclaration",
            CommandKind::FunctionDefinition { .. } => "FunctionDefinition",
            CommandKind::AddressOf { .. } => "AddressOf",
            CommandKind::Dereference { .. } => "Dereference",
            CommandKind::Index { .. } => "Index",
            CommandKind::LiteralBool(_) => "LiteralBool",
            CommandKind::LiteralInt(_) => "LiteralInt",
            CommandKind::LiteralFloat(_) => "LiteralFloat",
            CommandKind::Addition { .. } => "Addition",
            CommandKind::Subtraction { .. } => "Subtraction",
            CommandKind::Multiplication { .. } => "Multiplication",
            CommandKind::Division { .. } => "Division",
            CommandKind::Comparison { .. } => "Comparison",
            CommandKind::LogicalAnd { .. } => "LogicalAnd",
            CommandKind::LogicalOr { .. } => "LogicalOr",
            CommandKind::LogicalNot { .. } => "LogicalNot",
            CommandKind::Assignment { .. } => "Assignment",
            CommandKind::Call { .. } => "Call",
            CommandKind::IfElseBranch { .. } => "IfElseBranch",
            CommandKind::WhileLoop { .. } => "WhileLoop",
            CommandKind::Return { .. } => "Return",
            CommandKind::Error { .. } => "Error",
        }
    }

    /// The direct children of this node, left to right.
    pub fn children(&self) -> Vec<&Command> {
        match &self.kind {
            CommandKind::DeclarationList(items)
            | CommandKind::StatementList(items)
            | CommandKind::ExpressionList(items) => items.iter().collect(),
            CommandKind::FunctionDefinition { body, .. } => vec![body.as_ref()],
            CommandKind::Dereference { expression } | CommandKind::LogicalNot { expression } => {
                vec![expression.as_ref()]
            }
            CommandKind::Index { base, amount } => vec![base.as_ref(), amount.as_ref()],
            CommandKind::Addition { left, right }
            | CommandKind::Subtraction { left, right }
            | CommandKind::Multiplication { left, right }
            | CommandKind::Division { left, right }
            | CommandKind::Comparison { left, right, .. }
            | CommandKind::LogicalAnd { left, right }
            | CommandKind::LogicalOr { left, right } => vec![left.as_ref(), right.as_ref()],
            CommandKind::Assignment {
                destination,
                source,
            } => vec![destination.as_ref(), source.as_ref()],
            CommandKind::Call { arguments, .. } => vec![arguments.as_ref()],
            CommandKind::IfElseBranch {
                condition,
                then_block,
                else_block,
            } => vec![condition.as_ref(), then_block.as_ref(), else_block.as_ref()],
            CommandKind::WhileLoop { condition, body } => vec![condition.as_ref(), body.as_ref()],
            CommandKind::Return { argument } => vec![argument.as_ref()],
            CommandKind::VariableDeclaration { .. }
            | CommandKind::ArrayDeclaration { .. }
            | CommandKind::AddressOf { .. }
            | CommandKind::LiteralBool(_)
            | CommandKind::LiteralInt(_)
            | CommandKind::LiteralFloat(_)
            | CommandKind::Error { .. } => Vec::new(),
        }
    }

    /// Count this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Command::node_count)
            .sum::<usize>()
    }

    /// Check whether this node or any descendant is an `Error` node.
    pub fn contains_error(&self) -> bool {
        matches!(self.kind, CommandKind::Error { .. })
            || self.children().into_iter().any(Command::contains_error)
    }
}
