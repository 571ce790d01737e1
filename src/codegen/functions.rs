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

//! Function call code generation.
//!
//! The caller pushes the arguments left to right, jumps with `jal`, and
//! removes the arguments again after the call. A non-void result is taken
//! from `$v0` and pushed.

use super::expressions::ExpressionEmitter;
use super::labels::function_label;
use super::CodeGenerator;
use crate::analyzer::SymbolId;
use crate::ast::Command;
use crate::error::CodegenError;

/// Extension trait for function call code generation.
pub trait FunctionCallEmitter {
    /// Generate `::function(arguments)`.
    fn generate_call(
        &mut self,
        node: &Command,
        function: SymbolId,
        arguments: &Command,
    ) -> Result<(), CodegenError>;
}

impl FunctionCallEmitter for CodeGenerator<'_> {
    fn generate_call(
        &mut self,
        node: &Command,
        function: SymbolId,
        arguments: &Command,
    ) -> Result<(), CodegenError> {
        let symbols = self.symbols;
        let count = arguments.children().len();

        self.generate_expression(arguments)?;
        self.program
            .append_instruction(format!("jal {}", function_label(&symbols[function].name)));
        if count > 0 {
            self.program
                .append_instruction(format!("addiu $sp, $sp, {}", 4 * count));
        }
        if !self.type_of(node)?.is_void() {
            self.program.push_int("$v0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{generate_source, line_index};

    #[test]
    fn test_arguments_pushed_in_order() {
        let program = generate_source(
            "func pair(a: int, b: int): void { } func main(): void { ::pair(1, 2); }",
        );
        let first = line_index(&program, "li $t0, 1");
        let second = line_index(&program, "li $t0, 2");
        let call = line_index(&program, "jal func.pair");
        assert!(first < second && second < call);
        assert_eq!(program.code()[call + 1], "addiu $sp, $sp, 8");
    }

    #[test]
    fn test_void_call_pushes_nothing() {
        let program = generate_source("func main(): void { ::println(); }");
        let call = line_index(&program, "jal func.println");
        assert_ne!(program.code()[call + 1], "subu $sp, $sp, 4");
    }

    #[test]
    fn test_result_pushed_for_use() {
        let program = generate_source(
            "func main(): void { var n: int; let n = ::readInt(); }",
        );
        let call = line_index(&program, "jal func.readInt");
        assert_eq!(program.code()[call + 1], "subu $sp, $sp, 4");
        assert_eq!(program.code()[call + 2], "sw $v0, 0($sp)");
    }

    #[test]
    fn test_recursive_call() {
        let program = generate_source(
            "func down(n: int): void { if n > 0 { ::down(n - 1); } } func main(): void { ::down(3); }",
        );
        let entry = line_index(&program, "func.down:");
        let call = line_index(&program, "jal func.down");
        assert!(entry < call);
    }
}
