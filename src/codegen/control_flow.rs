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

//! Control flow code generation.
//!
//! Conditions are evaluated onto the operand stack and tested with `beqz`.
//! A `return` leaves its value in `$v0` and jumps to the epilogue of the
//! enclosing function.

use super::expressions::ExpressionEmitter;
use super::labels::LabelManager;
use super::CodeGenerator;
use crate::ast::Command;
use crate::error::CodegenError;

/// Extension trait for control flow code generation.
pub trait ControlFlowEmitter {
    /// Generate an if statement. An absent else block is empty.
    fn generate_if(
        &mut self,
        condition: &Command,
        then_block: &Command,
        else_block: &Command,
    ) -> Result<(), CodegenError>;

    /// Generate a while loop.
    fn generate_while(&mut self, condition: &Command, body: &Command) -> Result<(), CodegenError>;

    /// Generate a return statement.
    fn generate_return(&mut self, argument: &Command) -> Result<(), CodegenError>;
}

impl ControlFlowEmitter for CodeGenerator<'_> {
    fn generate_if(
        &mut self,
        condition: &Command,
        then_block: &Command,
        else_block: &Command,
    ) -> Result<(), CodegenError> {
        let else_label = self.new_label();
        let end_label = self.new_label();

        self.generate_expression(condition)?;
        self.program.pop_bool("$t1");
        self.program
            .append_instruction(format!("beqz $t1, {}", else_label));
        self.generate_command(then_block)?;
        self.program.append_instruction(format!("j {}", end_label));
        self.define_label(&else_label);
        self.generate_command(else_block)?;
        self.define_label(&end_label);
        Ok(())
    }

    fn generate_while(&mut self, condition: &Command, body: &Command) -> Result<(), CodegenError> {
        let head_label = self.new_label();
        let exit_label = self.new_label();

        self.define_label(&head_label);
        self.generate_expression(condition)?;
        self.program.pop_bool("$t1");
        self.program
            .append_instruction(format!("beqz $t1, {}", exit_label));
        self.generate_command(body)?;
        self.program.append_instruction(format!("j {}", head_label));
        self.define_label(&exit_label);
        Ok(())
    }

    fn generate_return(&mut self, argument: &Command) -> Result<(), CodegenError> {
        let Some(epilogue) = self.epilogue.clone() else {
            return Err(CodegenError::NoLowering {
                operation: "return",
                ty: "global scope".to_string(),
                position: argument.position,
            });
        };
        self.generate_expression(argument)?;
        // a void call leaves nothing to return
        if !self.type_of(argument)?.is_void() {
            // floats travel as raw words
            self.program.pop_int("$v0");
        }
        self.program.append_instruction(format!("j {}", epilogue));
        Ok(())
    }
}
