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

//! Scope management for the symbol table.
//!
//! A scope represents a lexical region where symbols are defined.
//! Scopes are nested to support block-level variable declarations.

use super::symbol::SymbolId;
use std::collections::HashMap;

/// A scope in the symbol table.
#[derive(Debug, Default)]
pub struct Scope {
    /// Symbols defined in this scope, by name.
    names: HashMap<String, SymbolId>,
    /// Symbols in declaration order.
    order: Vec<SymbolId>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a name in this scope. Returns the existing id if the name is
    /// already taken here.
    pub fn define(&mut self, name: &str, id: SymbolId) -> Result<(), SymbolId> {
        if let Some(existing) = self.names.get(name) {
            return Err(*existing);
        }
        self.names.insert(name.to_string(), id);
        self.order.push(id);
        Ok(())
    }

    /// Look up a name in this scope only.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.names.get(name).copied()
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.order.iter().copied()
    }
}
