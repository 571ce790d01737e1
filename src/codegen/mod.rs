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

//! Code generation module for the Crux compiler.
//!
//! This module turns a type checked syntax tree into MIPS assembly for the
//! SPIM simulator. Expressions are evaluated on an operand stack in memory:
//! every value is pushed as one word and popped by its consumer. It handles:
//! - Global data and stack frames
//! - Expression evaluation
//! - Control flow
//! - Function calls and the built-in runtime
//!
//! # Module Structure
//!
//! - `assignments` - Stores (AssignmentEmitter trait)
//! - `binary_ops` - Arithmetic and logical operators (BinaryOpsEmitter trait)
//! - `comparisons` - Comparison operators (ComparisonEmitter trait)
//! - `control_flow` - if, while and return (ControlFlowEmitter trait)
//! - `declarations` - Functions and storage (DeclarationEmitter trait)
//! - `expressions` - Literals, locations and loads (ExpressionEmitter trait)
//! - `frames` - Activation records
//! - `functions` - Calls (FunctionCallEmitter trait)
//! - `labels` - Label creation (LabelManager trait)
//! - `program` - The assembly buffer
//! - `runtime` - The built-in I/O routines

pub mod assignments;
pub mod binary_ops;
pub mod comparisons;
pub mod control_flow;
pub mod declarations;
pub mod expressions;
pub mod frames;
pub mod functions;
pub mod labels;
pub mod program;
pub mod runtime;

pub use frames::{size_of, ActivationRecord, Location};
pub use program::Program;

use assignments::AssignmentEmitter;
use control_flow::ControlFlowEmitter;
use declarations::DeclarationEmitter;
use expressions::ExpressionEmitter;

use crate::analyzer::{Symbols, TypeMap};
use crate::ast::{Command, CommandKind, Type};
use crate::error::CodegenError;

/// The code generator for MIPS.
pub struct CodeGenerator<'a> {
    /// Node types from the checker.
    pub(crate) types: &'a TypeMap,
    /// Symbols referenced by the tree.
    pub(crate) symbols: &'a Symbols,
    /// The program being built.
    pub(crate) program: Program,
    /// Frame chain, global frame first.
    pub(crate) frames: Vec<ActivationRecord>,
    /// Counter for `label.N`.
    pub(crate) label_counter: u32,
    /// Epilogue label of the function being generated.
    pub(crate) epilogue: Option<String>,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator.
    pub fn new(types: &'a TypeMap, symbols: &'a Symbols) -> Self {
        Self {
            types,
            symbols,
            program: Program::new(),
            frames: vec![ActivationRecord::global()],
            label_counter: 0,
            epilogue: None,
        }
    }

    /// Generate the program for a whole tree, followed by the runtime.
    pub fn generate(mut self, tree: &Command) -> Result<Program, CodegenError> {
        self.generate_command(tree)?;
        runtime::emit_runtime(&mut self.program);
        tracing::debug!(
            code = self.program.code().len(),
            data = self.program.data().len(),
            "code generation finished"
        );
        Ok(self.program)
    }

    /// The checked type of a node.
    pub(crate) fn type_of(&self, node: &Command) -> Result<&'a Type, CodegenError> {
        let types: &'a TypeMap = self.types;
        types.get(node).ok_or(CodegenError::MissingType {
            position: node.position,
        })
    }

    /// Error for an operator without a lowering for its operand type.
    pub(crate) fn no_lowering(
        &self,
        operation: &'static str,
        ty: &Type,
        node: &Command,
    ) -> CodegenError {
        CodegenError::NoLowering {
            operation,
            ty: ty.to_string(),
            position: node.position,
        }
    }

    /// Generate any node.
    pub(crate) fn generate_command(&mut self, node: &Command) -> Result<(), CodegenError> {
        match &node.kind {
            CommandKind::DeclarationList(items) => {
                for item in items {
                    self.generate_command(item)?;
                }
                Ok(())
            }
            CommandKind::StatementList(items) => self.generate_statements(items),
            CommandKind::VariableDeclaration { symbol }
            | CommandKind::ArrayDeclaration { symbol } => self.generate_storage(*symbol),
            CommandKind::FunctionDefinition {
                function,
                parameters,
                body,
            } => self.generate_function(*function, parameters, body),
            CommandKind::Assignment {
                destination,
                source,
            } => self.generate_assignment(destination, source),
            CommandKind::IfElseBranch {
                condition,
                then_block,
                else_block,
            } => self.generate_if(condition, then_block, else_block),
            CommandKind::WhileLoop { condition, body } => self.generate_while(condition, body),
            CommandKind::Return { argument } => self.generate_return(argument),
            CommandKind::Error { message } => Err(CodegenError::ErrorNode {
                position: node.position,
                message: message.clone(),
            }),
            _ => self.generate_expression(node),
        }
    }

    /// Generate a block. The result of a call used as a statement is
    /// dropped from the operand stack.
    fn generate_statements(&mut self, statements: &[Command]) -> Result<(), CodegenError> {
        for statement in statements {
            self.generate_command(statement)?;
            if let CommandKind::Call { .. } = statement.kind {
                if !self.type_of(statement)?.is_void() {
                    self.program.append_instruction("addiu $sp, $sp, 4");
                }
            }
        }
        Ok(())
    }
}

/// Generate the assembly program for a type checked tree.
pub fn generate(tree: &Command, types: &TypeMap, symbols: &Symbols) -> Result<Program, CodegenError> {
    CodeGenerator::new(types, symbols).generate(tree)
}
