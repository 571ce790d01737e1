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

//! Label management for code generation.
//!
//! Control flow labels are `label.N` from a counter that only grows. User
//! functions live at `func.NAME`, except `main`, which the SPIM startup code
//! jumps to by name.

use super::CodeGenerator;

/// Label of a function's entry point.
pub fn function_label(name: &str) -> String {
    if name == "main" {
        name.to_string()
    } else {
        format!("func.{}", name)
    }
}

/// Extension trait for label creation.
pub trait LabelManager {
    /// Generate a fresh `label.N`.
    fn new_label(&mut self) -> String;

    /// Define a label at the current end of the code.
    fn define_label(&mut self, label: &str);
}

impl LabelManager for CodeGenerator<'_> {
    fn new_label(&mut self) -> String {
        let label = format!("label.{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn define_label(&mut self, label: &str) {
        self.program.append_label(label);
    }
}
