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

//! Built-in function registration for the symbol table.
//!
//! This module defines the I/O primitives available in every Crux program
//! without a declaration. Their code is emitted by
//! [`crate::codegen`] as part of the runtime.

use super::symbol_table::SymbolTable;
use crate::ast::Type;

/// Names of all built-in functions.
pub const BUILTIN_NAMES: &[&str] = &[
    "readInt",
    "readFloat",
    "printBool",
    "printInt",
    "printFloat",
    "println",
];

/// Trait for registering built-in functions.
pub trait BuiltinRegistry {
    /// Register all built-in functions in the current scope.
    fn register_builtins(&mut self);

    /// Define a single built-in function.
    fn define_builtin(&mut self, name: &str, params: Vec<Type>, return_type: Type);
}

impl BuiltinRegistry for SymbolTable {
    fn register_builtins(&mut self) {
        // Input functions
        // readInt() -> int
        self.define_builtin("readInt", vec![], Type::Int);

        // readFloat() -> float
        self.define_builtin("readFloat", vec![], Type::Float);

        // Output functions
        // printBool(value)
        self.define_builtin("printBool", vec![Type::Bool], Type::Void);

        // printInt(value)
        self.define_builtin("printInt", vec![Type::Int], Type::Void);

        // printFloat(value)
        self.define_builtin("printFloat", vec![Type::Float], Type::Void);

        // println() - print a newline
        self.define_builtin("println", vec![], Type::Void);
    }

    fn define_builtin(&mut self, name: &str, params: Vec<Type>, return_type: Type) {
        let _ = self.insert(name, Type::func(params, return_type));
    }
}

/// Check whether a name refers to a built-in function.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}
