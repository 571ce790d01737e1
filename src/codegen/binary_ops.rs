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

//! Binary operation code generation.
//!
//! Both operands are evaluated left to right onto the operand stack, then
//! popped (right first) into registers:
//! - Arithmetic on int uses `$t1`/`$t2`, on float `$f1`/`$f2`
//! - Logical `and`/`or` work on the words 0 and 1
//!
//! The result is pushed back as one word.

use super::expressions::ExpressionEmitter;
use super::CodeGenerator;
use crate::ast::{Command, CommandKind, Type};
use crate::error::CodegenError;

/// Extension trait for binary operation code generation.
pub trait BinaryOpsEmitter {
    /// Generate `+`, `-`, `*` or `/`.
    fn generate_arithmetic(
        &mut self,
        node: &Command,
        left: &Command,
        right: &Command,
    ) -> Result<(), CodegenError>;

    /// Generate `and` or `or`.
    fn generate_logical(
        &mut self,
        node: &Command,
        left: &Command,
        right: &Command,
    ) -> Result<(), CodegenError>;
}

/// Mnemonic stem and operation name of an arithmetic node.
fn arithmetic_op(node: &Command) -> Option<(&'static str, &'static str)> {
    match node.kind {
        CommandKind::Addition { .. } => Some(("add", "addition")),
        CommandKind::Subtraction { .. } => Some(("sub", "subtraction")),
        CommandKind::Multiplication { .. } => Some(("mul", "multiplication")),
        CommandKind::Division { .. } => Some(("div", "division")),
        _ => None,
    }
}

impl BinaryOpsEmitter for CodeGenerator<'_> {
    fn generate_arithmetic(
        &mut self,
        node: &Command,
        left: &Command,
        right: &Command,
    ) -> Result<(), CodegenError> {
        let ty = self.type_of(node)?;
        let Some((mnemonic, operation)) = arithmetic_op(node) else {
            return Err(self.no_lowering("arithmetic", ty, node));
        };

        self.generate_expression(left)?;
        self.generate_expression(right)?;

        match ty {
            Type::Int => {
                self.program.pop_int("$t2");
                self.program.pop_int("$t1");
                if mnemonic == "div" {
                    // quotient is left in lo
                    self.program.append_instruction("div $t1, $t2");
                    self.program.append_instruction("mflo $t1");
                } else {
                    self.program
                        .append_instruction(format!("{} $t1, $t1, $t2", mnemonic));
                }
                self.program.push_int("$t1");
            }
            Type::Float => {
                self.program.pop_float("$f2");
                self.program.pop_float("$f1");
                self.program
                    .append_instruction(format!("{}.s $f1, $f1, $f2", mnemonic));
                self.program.push_float("$f1");
            }
            other => return Err(self.no_lowering(operation, other, node)),
        }
        Ok(())
    }

    fn generate_logical(
        &mut self,
        node: &Command,
        left: &Command,
        right: &Command,
    ) -> Result<(), CodegenError> {
        let mnemonic = match node.kind {
            CommandKind::LogicalAnd { .. } => "and",
            CommandKind::LogicalOr { .. } => "or",
            _ => return Err(self.no_lowering("logical", self.type_of(node)?, node)),
        };

        self.generate_expression(left)?;
        self.generate_expression(right)?;
        self.program.pop_bool("$t2");
        self.program.pop_bool("$t1");
        self.program
            .append_instruction(format!("{} $t1, $t1, $t2", mnemonic));
        self.program.push_bool("$t1");
        Ok(())
    }
}
