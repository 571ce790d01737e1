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

//! Semantic analysis for the Crux compiler.
//!
//! This module holds everything that gives names and types meaning:
//! - Symbols, scopes and the symbol table the parser declares into
//! - The built-in I/O functions
//! - The type algebra
//! - The type checker

pub mod builtins;
pub mod operators;
pub mod scope;
pub mod symbol;
pub mod symbol_table;
pub mod type_check;

pub use builtins::{is_builtin, BUILTIN_NAMES};
pub use operators::TypeOperations;
pub use symbol::{Symbol, SymbolId, Symbols};
pub use symbol_table::SymbolTable;
pub use type_check::{CheckResult, TypeChecker, TypeMap};

use crate::ast::Command;

/// Type check a parsed tree.
pub fn check(tree: &Command, symbols: &Symbols) -> CheckResult {
    TypeChecker::new(symbols).check(tree)
}
