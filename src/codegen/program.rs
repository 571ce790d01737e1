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

//! The assembly program buffer.
//!
//! Code and data are kept as separate ordered line lists. Code lines can be
//! inserted at an earlier position, which is how function prologues are
//! placed once the frame size is known. All operand stack slots are one
//! word wide.

use std::fmt;
use std::io::{self, Write};

/// An assembly program under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction and label lines of the `.text` segment.
    code: Vec<String>,
    /// Lines of the `.data` segment.
    data: Vec<String>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a code line and return its position.
    pub fn append_instruction(&mut self, line: impl Into<String>) -> usize {
        self.code.push(line.into());
        self.code.len() - 1
    }

    /// Append a label definition and return its position.
    pub fn append_label(&mut self, label: &str) -> usize {
        self.append_instruction(format!("{}:", label))
    }

    /// Insert code lines before `position`.
    pub fn insert_instructions(&mut self, position: usize, lines: &[String]) {
        let position = position.min(self.code.len());
        self.code.splice(position..position, lines.iter().cloned());
    }

    /// Append a data line.
    pub fn append_data(&mut self, line: impl Into<String>) {
        self.data.push(line.into());
    }

    /// Code lines in order.
    pub fn code(&self) -> &[String] {
        &self.code
    }

    /// Data lines in order.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Check if a code label is defined.
    pub fn defines_label(&self, label: &str) -> bool {
        self.code
            .iter()
            .any(|line| line.strip_suffix(':') == Some(label))
    }

    // ========================================
    // Operand Stack
    // ========================================

    pub fn push_int(&mut self, reg: &str) {
        self.append_instruction("subu $sp, $sp, 4");
        self.append_instruction(format!("sw {}, 0($sp)", reg));
    }

    pub fn pop_int(&mut self, reg: &str) {
        self.append_instruction(format!("lw {}, 0($sp)", reg));
        self.append_instruction("addiu $sp, $sp, 4");
    }

    pub fn push_float(&mut self, reg: &str) {
        self.append_instruction("subu $sp, $sp, 4");
        self.append_instruction(format!("swc1 {}, 0($sp)", reg));
    }

    pub fn pop_float(&mut self, reg: &str) {
        self.append_instruction(format!("lwc1 {}, 0($sp)", reg));
        self.append_instruction("addiu $sp, $sp, 4");
    }

    /// Booleans are stored as the words 0 and 1.
    pub fn push_bool(&mut self, reg: &str) {
        self.push_int(reg);
    }

    pub fn pop_bool(&mut self, reg: &str) {
        self.pop_int(reg);
    }

    pub fn push_address(&mut self, reg: &str) {
        self.push_int(reg);
    }

    pub fn pop_address(&mut self, reg: &str) {
        self.pop_int(reg);
    }

    // ========================================
    // Function Frames
    // ========================================

    /// Insert the prologue for a frame with `frame_size` bytes of locals
    /// before `position`.
    pub fn insert_prologue(&mut self, position: usize, frame_size: u32) {
        let prologue = [
            "subu $sp, $sp, 8".to_string(),
            "sw $fp, 0($sp)".to_string(),
            "sw $ra, 4($sp)".to_string(),
            "addi $fp, $sp, 8".to_string(),
            format!("subu $sp, $sp, {}", frame_size),
        ];
        tracing::trace!(position, frame_size, "insert prologue");
        self.insert_instructions(position, &prologue);
    }

    /// Append the epilogue label and the frame teardown.
    pub fn append_epilogue(&mut self, label: &str, frame_size: u32) {
        self.append_label(label);
        self.append_instruction(format!("addu $sp, $sp, {}", frame_size));
        self.append_instruction("lw $ra, 4($sp)");
        self.append_instruction("lw $fp, 0($sp)");
        self.append_instruction("addu $sp, $sp, 8");
        self.append_instruction("jr $ra");
    }

    /// Write the program text.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for Program {
    /// `.data`, the data lines, `.text`, `.globl main` and the code lines.
    /// Instructions are indented, labels are not.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".data")?;
        for line in &self.data {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, ".text")?;
        writeln!(f, ".globl main")?;
        for line in &self.code {
            if line.ends_with(':') {
                writeln!(f, "{}", line)?;
            } else {
                writeln!(f, "    {}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_shapes() {
        let mut program = Program::new();
        program.push_int("$t0");
        program.pop_float("$f2");
        assert_eq!(
            program.code(),
            &[
                "subu $sp, $sp, 4",
                "sw $t0, 0($sp)",
                "lwc1 $f2, 0($sp)",
                "addiu $sp, $sp, 4"
            ]
        );
    }

    #[test]
    fn test_prologue_inserted_after_label() {
        let mut program = Program::new();
        let label = program.append_label("func.f");
        program.append_instruction("li $t0, 1");
        program.insert_prologue(label + 1, 12);
        assert_eq!(program.code()[0], "func.f:");
        assert_eq!(program.code()[1], "subu $sp, $sp, 8");
        assert_eq!(program.code()[5], "subu $sp, $sp, 12");
        assert_eq!(program.code()[6], "li $t0, 1");
    }

    #[test]
    fn test_epilogue() {
        let mut program = Program::new();
        program.append_epilogue("label.3", 4);
        assert_eq!(program.code().first().map(String::as_str), Some("label.3:"));
        assert_eq!(program.code().last().map(String::as_str), Some("jr $ra"));
        assert_eq!(program.code()[1], "addu $sp, $sp, 4");
    }

    #[test]
    fn test_text_layout() {
        let mut program = Program::new();
        program.append_data("cruxdata.x: .word 0");
        program.append_label("main");
        program.append_instruction("jr $ra");
        assert_eq!(
            program.to_string(),
            ".data\ncruxdata.x: .word 0\n.text\n.globl main\nmain:\n    jr $ra\n"
        );
    }

    #[test]
    fn test_defines_label() {
        let mut program = Program::new();
        program.append_label("main");
        program.append_instruction("jr $ra");
        assert!(program.defines_label("main"));
        assert!(!program.defines_label("jr $ra"));
        assert!(!program.defines_label("func.main"));
    }

    #[test]
    fn test_write_to() {
        let program = Program::new();
        let mut buffer = Vec::new();
        program.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), ".data\n.text\n.globl main\n");
    }
}
