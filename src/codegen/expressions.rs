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

//! Expression code generation.
//!
//! Every expression leaves exactly one word on the operand stack:
//! - Literals push their value
//! - `AddressOf` and `Index` push an address
//! - `Dereference` replaces an address by the value stored there, except
//!   for arrays, whose address is their value

use super::binary_ops::BinaryOpsEmitter;
use super::comparisons::ComparisonEmitter;
use super::frames::{resolve, size_of};
use super::functions::FunctionCallEmitter;
use super::CodeGenerator;
use crate::ast::{Command, CommandKind, Type};
use crate::error::CodegenError;

/// Extension trait for expression code generation.
pub trait ExpressionEmitter {
    /// Generate code for an expression, pushing its result.
    fn generate_expression(&mut self, node: &Command) -> Result<(), CodegenError>;

    /// Push the address of a named variable or array.
    fn generate_address_of(&mut self, node: &Command) -> Result<(), CodegenError>;

    /// Push the address of an array element.
    fn generate_index(
        &mut self,
        node: &Command,
        base: &Command,
        amount: &Command,
    ) -> Result<(), CodegenError>;

    /// Load the value behind an address.
    fn generate_dereference(
        &mut self,
        node: &Command,
        expression: &Command,
    ) -> Result<(), CodegenError>;

    /// Boolean negation.
    fn generate_not(&mut self, expression: &Command) -> Result<(), CodegenError>;
}

impl ExpressionEmitter for CodeGenerator<'_> {
    fn generate_expression(&mut self, node: &Command) -> Result<(), CodegenError> {
        match &node.kind {
            CommandKind::LiteralInt(value) => {
                self.program.append_instruction(format!("li $t0, {}", value));
                self.program.push_int("$t0");
            }
            CommandKind::LiteralFloat(value) => {
                self.program
                    .append_instruction(format!("li.s $f0, {:?}", value));
                self.program.push_float("$f0");
            }
            CommandKind::LiteralBool(value) => {
                self.program
                    .append_instruction(format!("li $t0, {}", u8::from(*value)));
                self.program.push_bool("$t0");
            }
            CommandKind::AddressOf { .. } => self.generate_address_of(node)?,
            CommandKind::Index { base, amount } => self.generate_index(node, base, amount)?,
            CommandKind::Dereference { expression } => {
                self.generate_dereference(node, expression)?
            }
            CommandKind::Addition { left, right }
            | CommandKind::Subtraction { left, right }
            | CommandKind::Multiplication { left, right }
            | CommandKind::Division { left, right } => {
                self.generate_arithmetic(node, left, right)?
            }
            CommandKind::LogicalAnd { left, right } | CommandKind::LogicalOr { left, right } => {
                self.generate_logical(node, left, right)?
            }
            CommandKind::LogicalNot { expression } => self.generate_not(expression)?,
            CommandKind::Comparison {
                operation,
                left,
                right,
            } => self.generate_comparison(*operation, left, right)?,
            CommandKind::Call {
                function,
                arguments,
            } => self.generate_call(node, *function, arguments)?,
            CommandKind::ExpressionList(items) => {
                for item in items {
                    self.generate_expression(item)?;
                }
            }
            _ => {
                return Err(CodegenError::NoLowering {
                    operation: node.name(),
                    ty: "expression".to_string(),
                    position: node.position,
                })
            }
        }
        Ok(())
    }

    fn generate_address_of(&mut self, node: &Command) -> Result<(), CodegenError> {
        let CommandKind::AddressOf { symbol } = &node.kind else {
            return Err(self.no_lowering("address", self.type_of(node)?, node));
        };
        let location = resolve(&self.frames, *symbol, self.symbols)?;
        self.program.append_instruction(location.load_address("$t0"));
        self.program.push_address("$t0");
        Ok(())
    }

    fn generate_index(
        &mut self,
        node: &Command,
        base: &Command,
        amount: &Command,
    ) -> Result<(), CodegenError> {
        let element = self.type_of(node)?;
        let Some(element_size) = size_of(element) else {
            return Err(self.no_lowering("indexing", element, node));
        };

        // walk down to the array itself, collecting the indices outermost first
        let mut indices = vec![amount];
        let mut root = base;
        while let CommandKind::Index { base, amount } = &root.kind {
            indices.push(amount.as_ref());
            root = base.as_ref();
        }
        indices.reverse();
        let extents = extents_of(self.type_of(root)?);

        self.generate_expression(root)?;
        let (first, rest) = indices.split_at(1);
        self.generate_expression(first[0])?;
        for (dimension, index) in rest.iter().enumerate() {
            let Some(extent) = extents.get(dimension + 1) else {
                return Err(self.no_lowering("indexing", self.type_of(root)?, node));
            };
            self.generate_expression(index)?;
            self.program.pop_int("$t2");
            self.program.pop_int("$t1");
            self.program.append_instruction(format!("li $t3, {}", extent));
            self.program.append_instruction("mul $t1, $t1, $t3");
            self.program.append_instruction("add $t1, $t1, $t2");
            self.program.push_int("$t1");
        }

        // scale the linear index and add it to the base address
        self.program.pop_int("$t1");
        self.program
            .append_instruction(format!("li $t2, {}", element_size));
        self.program.append_instruction("mul $t1, $t1, $t2");
        self.program.pop_address("$t0");
        self.program.append_instruction("add $t0, $t0, $t1");
        self.program.push_address("$t0");
        Ok(())
    }

    fn generate_dereference(
        &mut self,
        node: &Command,
        expression: &Command,
    ) -> Result<(), CodegenError> {
        self.generate_expression(expression)?;
        match self.type_of(node)? {
            Type::Array { .. } => {}
            Type::Float => {
                self.program.pop_address("$t0");
                self.program.append_instruction("lwc1 $f1, 0($t0)");
                self.program.push_float("$f1");
            }
            Type::Int | Type::Bool => {
                self.program.pop_address("$t0");
                self.program.append_instruction("lw $t1, 0($t0)");
                self.program.push_int("$t1");
            }
            other => return Err(self.no_lowering("dereference", other, node)),
        }
        Ok(())
    }

    fn generate_not(&mut self, expression: &Command) -> Result<(), CodegenError> {
        self.generate_expression(expression)?;
        self.program.pop_bool("$t1");
        self.program.append_instruction("xori $t1, $t1, 1");
        self.program.push_bool("$t1");
        Ok(())
    }
}

/// Extents of an array type, outermost dimension first.
fn extents_of(ty: &Type) -> Vec<u32> {
    let mut extents = Vec::new();
    let mut current = ty;
    while let Type::Array { extent, base } = current {
        extents.push(*extent);
        current = base;
    }
    extents
}
