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

//! Activation records.
//!
//! A frame maps the symbols of one function to their stack offsets. The
//! global frame maps global symbols to data labels instead. Frames live in
//! a `Vec` indexed by nesting depth: 0 is the global frame, 1 the function
//! being generated.
//!
//! Function frame layout (`$fp` is `$sp` at entry):
//!
//! ```text
//!  ...        arguments, last one at 0($fp)
//!  -4($fp)    saved $ra
//!  -8($fp)    saved $fp
//!  -12($fp)   first word of locals
//! ```

use std::collections::HashMap;

use crate::analyzer::{SymbolId, Symbols};
use crate::ast::Type;
use crate::error::CodegenError;

/// Bytes reserved below `$fp` for the saved `$fp` and `$ra`.
pub const FIXED_FRAME_SIZE: i32 = 8;

/// Prefix of global data labels.
pub const DATA_PREFIX: &str = "cruxdata.";

/// Storage size in bytes of a value of the given type.
pub fn size_of(ty: &Type) -> Option<u32> {
    match ty {
        Type::Bool | Type::Int | Type::Float => Some(4),
        Type::Array { extent, base } => size_of(base).map(|size| extent * size),
        _ => None,
    }
}

/// Where a symbol lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A local at `offset($fp)`.
    Local(i32),
    /// An argument at `offset($fp)`.
    Argument(i32),
    /// A global behind a data label.
    Global(String),
}

impl Location {
    /// Instruction loading the address of this location into `reg`.
    pub fn load_address(&self, reg: &str) -> String {
        match self {
            Location::Local(offset) | Location::Argument(offset) => {
                format!("la {}, {}($fp)", reg, offset)
            }
            Location::Global(label) => format!("la {}, {}", reg, label),
        }
    }
}

/// Who a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOwner {
    Global,
    Function(SymbolId),
}

/// The activation record of one function, or the global frame.
#[derive(Debug, Clone)]
pub struct ActivationRecord {
    owner: FrameOwner,
    /// Locals by symbol: distance below the saved registers.
    locals: HashMap<SymbolId, i32>,
    /// Arguments by symbol: offset above `$fp`.
    arguments: HashMap<SymbolId, i32>,
    /// Globals by symbol: data label.
    globals: HashMap<SymbolId, String>,
    /// Bytes of locals allocated so far.
    stack_size: u32,
}

impl ActivationRecord {
    /// The global frame.
    pub fn global() -> Self {
        Self {
            owner: FrameOwner::Global,
            locals: HashMap::new(),
            arguments: HashMap::new(),
            globals: HashMap::new(),
            stack_size: 0,
        }
    }

    /// The frame of a function. The last parameter is at `0($fp)`, the one
    /// before it right above, and so on.
    pub fn function(
        function: SymbolId,
        parameters: &[SymbolId],
        symbols: &Symbols,
    ) -> Result<Self, CodegenError> {
        let mut arguments = HashMap::new();
        let mut offset = 0;
        for parameter in parameters.iter().rev() {
            arguments.insert(*parameter, offset);
            offset += symbol_size(symbols, *parameter)? as i32;
        }
        Ok(Self {
            owner: FrameOwner::Function(function),
            locals: HashMap::new(),
            arguments,
            globals: HashMap::new(),
            stack_size: 0,
        })
    }

    pub fn is_global(&self) -> bool {
        self.owner == FrameOwner::Global
    }

    /// Bytes of locals in this frame.
    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }

    /// Allocate storage for a declared variable or array.
    ///
    /// Returns the data line to emit for globals.
    pub fn allocate(
        &mut self,
        symbol: SymbolId,
        symbols: &Symbols,
    ) -> Result<Option<String>, CodegenError> {
        let size = symbol_size(symbols, symbol)?;
        if self.is_global() {
            let label = format!("{}{}", DATA_PREFIX, symbols[symbol].name);
            let line = match symbols[symbol].ty {
                Type::Array { .. } => format!("{}: .space {}", label, size),
                _ => format!("{}: .word 0", label),
            };
            self.globals.insert(symbol, label);
            return Ok(Some(line));
        }
        self.stack_size += size;
        self.locals.insert(symbol, self.stack_size as i32);
        Ok(None)
    }

    /// Location of a symbol owned by this frame.
    pub fn lookup(&self, symbol: SymbolId) -> Option<Location> {
        if let Some(offset) = self.locals.get(&symbol) {
            return Some(Location::Local(-FIXED_FRAME_SIZE - offset));
        }
        if let Some(offset) = self.arguments.get(&symbol) {
            return Some(Location::Argument(*offset));
        }
        self.globals
            .get(&symbol)
            .map(|label| Location::Global(label.clone()))
    }
}

/// Resolve a symbol through a frame chain, innermost frame first.
pub fn resolve(
    frames: &[ActivationRecord],
    symbol: SymbolId,
    symbols: &Symbols,
) -> Result<Location, CodegenError> {
    frames
        .iter()
        .rev()
        .find_map(|frame| frame.lookup(symbol))
        .ok_or_else(|| CodegenError::UnknownStorage {
            name: symbols[symbol].name.clone(),
        })
}

fn symbol_size(symbols: &Symbols, symbol: SymbolId) -> Result<u32, CodegenError> {
    let symbol = &symbols[symbol];
    size_of(&symbol.ty).ok_or_else(|| CodegenError::UnknownStorage {
        name: symbol.name.clone(),
    })
}
