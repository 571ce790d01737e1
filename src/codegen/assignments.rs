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

//! Assignment code generation.

use super::expressions::ExpressionEmitter;
use super::CodeGenerator;
use crate::ast::{Command, Type};
use crate::error::CodegenError;

/// Extension trait for assignment code generation.
pub trait AssignmentEmitter {
    /// Generate `let destination = source;`.
    ///
    /// The value is evaluated before the destination address.
    fn generate_assignment(
        &mut self,
        destination: &Command,
        source: &Command,
    ) -> Result<(), CodegenError>;
}

impl AssignmentEmitter for CodeGenerator<'_> {
    fn generate_assignment(
        &mut self,
        destination: &Command,
        source: &Command,
    ) -> Result<(), CodegenError> {
        let ty = self.type_of(destination)?;
        self.generate_expression(source)?;
        self.generate_expression(destination)?;
        self.program.pop_address("$t0");
        match ty {
            Type::Float => {
                self.program.pop_float("$f1");
                self.program.append_instruction("swc1 $f1, 0($t0)");
            }
            Type::Int | Type::Bool => {
                self.program.pop_int("$t1");
                self.program.append_instruction("sw $t1, 0($t0)");
            }
            other => return Err(self.no_lowering("assignment", other, destination)),
        }
        Ok(())
    }
}
