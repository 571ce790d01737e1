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

//! The built-in I/O runtime.
//!
//! Every built-in is a leaf routine using a SPIM syscall. Arguments are read
//! from the operand stack where the caller pushed them; results come back in
//! `$v0`. The runtime is appended after the user's code, its strings after
//! the user's data.

use super::program::Program;

const SYSCALL_PRINT_INT: u32 = 1;
const SYSCALL_PRINT_FLOAT: u32 = 2;
const SYSCALL_PRINT_STRING: u32 = 4;
const SYSCALL_READ_INT: u32 = 5;
const SYSCALL_READ_FLOAT: u32 = 6;

/// Append the runtime data and routines to a program.
pub fn emit_runtime(program: &mut Program) {
    program.append_data("runtime.true: .asciiz \"true\"");
    program.append_data("runtime.false: .asciiz \"false\"");
    program.append_data("runtime.newline: .asciiz \"\\n\"");

    // readInt(): int
    program.append_label("func.readInt");
    program.append_instruction(format!("li $v0, {}", SYSCALL_READ_INT));
    program.append_instruction("syscall");
    program.append_instruction("jr $ra");

    // readFloat(): float
    program.append_label("func.readFloat");
    program.append_instruction(format!("li $v0, {}", SYSCALL_READ_FLOAT));
    program.append_instruction("syscall");
    program.append_instruction("mfc1 $v0, $f0");
    program.append_instruction("jr $ra");

    // printBool(bool)
    program.append_label("func.printBool");
    program.append_instruction("lw $a0, 0($sp)");
    program.append_instruction("beqz $a0, runtime.printBool.false");
    program.append_instruction("la $a0, runtime.true");
    program.append_instruction("j runtime.printBool.print");
    program.append_label("runtime.printBool.false");
    program.append_instruction("la $a0, runtime.false");
    program.append_label("runtime.printBool.print");
    program.append_instruction(format!("li $v0, {}", SYSCALL_PRINT_STRING));
    program.append_instruction("syscall");
    program.append_instruction("jr $ra");

    // printInt(int)
    program.append_label("func.printInt");
    program.append_instruction("lw $a0, 0($sp)");
    program.append_instruction(format!("li $v0, {}", SYSCALL_PRINT_INT));
    program.append_instruction("syscall");
    program.append_instruction("jr $ra");

    // printFloat(float)
    program.append_label("func.printFloat");
    program.append_instruction("l.s $f12, 0($sp)");
    program.append_instruction(format!("li $v0, {}", SYSCALL_PRINT_FLOAT));
    program.append_instruction("syscall");
    program.append_instruction("jr $ra");

    // println()
    program.append_label("func.println");
    program.append_instruction("la $a0, runtime.newline");
    program.append_instruction(format!("li $v0, {}", SYSCALL_PRINT_STRING));
    program.append_instruction("syscall");
    program.append_instruction("jr $ra");
}
