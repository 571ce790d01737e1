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

//! Declaration code generation.
//!
//! Global variables and arrays become zero-initialized data. Locals get a
//! slot in the frame of the function being generated. A function body is
//! generated first; its prologue is inserted afterwards, once the frame
//! size is known.

use super::frames::ActivationRecord;
use super::labels::{function_label, LabelManager};
use super::CodeGenerator;
use crate::analyzer::SymbolId;
use crate::ast::Command;
use crate::error::CodegenError;

/// Extension trait for declaration code generation.
pub trait DeclarationEmitter {
    /// Generate a function definition.
    fn generate_function(
        &mut self,
        function: SymbolId,
        parameters: &[SymbolId],
        body: &Command,
    ) -> Result<(), CodegenError>;

    /// Allocate storage for a variable or array declaration.
    fn generate_storage(&mut self, symbol: SymbolId) -> Result<(), CodegenError>;
}

impl DeclarationEmitter for CodeGenerator<'_> {
    fn generate_function(
        &mut self,
        function: SymbolId,
        parameters: &[SymbolId],
        body: &Command,
    ) -> Result<(), CodegenError> {
        let symbols = self.symbols;
        let name = &symbols[function].name;
        tracing::debug!(function = %name, "generating function");

        let entry = self.program.append_label(&function_label(name));
        let frame = ActivationRecord::function(function, parameters, symbols)?;
        self.frames.push(frame);
        let epilogue = self.new_label();
        let previous = self.epilogue.replace(epilogue.clone());

        let result = self.generate_command(body);

        let frame = self.frames.pop();
        self.epilogue = previous;
        result?;

        let frame_size = frame.map(|frame| frame.stack_size()).unwrap_or(0);
        self.program.insert_prologue(entry + 1, frame_size);
        self.program.append_epilogue(&epilogue, frame_size);
        Ok(())
    }

    fn generate_storage(&mut self, symbol: SymbolId) -> Result<(), CodegenError> {
        let symbols = self.symbols;
        let Some(frame) = self.frames.last_mut() else {
            return Err(CodegenError::UnknownStorage {
                name: symbols[symbol].name.clone(),
            });
        };
        if let Some(line) = frame.allocate(symbol, symbols)? {
            self.program.append_data(line);
        }
        Ok(())
    }
}
