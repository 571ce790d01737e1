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

//! Comparison code generation.
//!
//! A comparison branches on its operands and materializes the outcome as
//! the word 0 or 1. Integers and booleans use the conditional branches.
//! Floats set the coprocessor flag with `c.eq.s`, `c.lt.s` or `c.le.s`
//! and branch with `bc1t`.

use super::expressions::ExpressionEmitter;
use super::labels::LabelManager;
use super::CodeGenerator;
use crate::ast::{Command, CompareOp, Type};
use crate::error::CodegenError;

/// Extension trait for comparison code generation.
pub trait ComparisonEmitter {
    /// Generate `left op right`, pushing 1 if it holds and 0 otherwise.
    fn generate_comparison(
        &mut self,
        operation: CompareOp,
        left: &Command,
        right: &Command,
    ) -> Result<(), CodegenError>;
}

/// Branch instruction taken when an integer comparison holds.
fn int_branch(operation: CompareOp) -> &'static str {
    match operation {
        CompareOp::Eq => "beq",
        CompareOp::Ne => "bne",
        CompareOp::Lt => "blt",
        CompareOp::Le => "ble",
        CompareOp::Ge => "bge",
        CompareOp::Gt => "bgt",
    }
}

/// Float compare instruction and whether the flag means "false".
///
/// `>` and `>=` are computed with swapped operands; `!=` is `==` with the
/// outcome inverted.
fn float_compare(operation: CompareOp) -> (&'static str, bool) {
    match operation {
        CompareOp::Eq => ("c.eq.s $f1, $f2", false),
        CompareOp::Ne => ("c.eq.s $f1, $f2", true),
        CompareOp::Lt => ("c.lt.s $f1, $f2", false),
        CompareOp::Le => ("c.le.s $f1, $f2", false),
        CompareOp::Gt => ("c.lt.s $f2, $f1", false),
        CompareOp::Ge => ("c.le.s $f2, $f1", false),
    }
}

impl ComparisonEmitter for CodeGenerator<'_> {
    fn generate_comparison(
        &mut self,
        operation: CompareOp,
        left: &Command,
        right: &Command,
    ) -> Result<(), CodegenError> {
        let ty = self.type_of(left)?;
        self.generate_expression(left)?;
        self.generate_expression(right)?;

        let taken = self.new_label();
        let join = self.new_label();
        let (taken_value, fallthrough_value) = match ty {
            Type::Int | Type::Bool => {
                self.program.pop_int("$t2");
                self.program.pop_int("$t1");
                self.program.append_instruction(format!(
                    "{} $t1, $t2, {}",
                    int_branch(operation),
                    taken
                ));
                (1, 0)
            }
            Type::Float => {
                self.program.pop_float("$f2");
                self.program.pop_float("$f1");
                let (compare, inverted) = float_compare(operation);
                self.program.append_instruction(compare);
                self.program.append_instruction(format!("bc1t {}", taken));
                if inverted {
                    (0, 1)
                } else {
                    (1, 0)
                }
            }
            other => {
                return Err(CodegenError::NoLowering {
                    operation: "comparison",
                    ty: other.to_string(),
                    position: left.position,
                })
            }
        };

        self.program
            .append_instruction(format!("li $t0, {}", fallthrough_value));
        self.program.append_instruction(format!("j {}", join));
        self.define_label(&taken);
        self.program
            .append_instruction(format!("li $t0, {}", taken_value));
        self.define_label(&join);
        self.program.push_bool("$t0");
        Ok(())
    }
}
