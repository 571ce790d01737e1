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

//! Symbol definitions and the symbol arena.
//!
//! Symbols are stored once in [`Symbols`] and referenced everywhere else by
//! [`SymbolId`]. The arena outlives the scope chain, so the type checker and
//! the code generator can still read a symbol after its scope was closed.

use std::fmt;
use std::ops::Index;

use crate::ast::Type;

/// Index of a symbol in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub usize);

/// Symbol table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The symbol name.
    pub name: String,
    /// The declared type. Fixed once the declaration is complete.
    pub ty: Type,
    /// Depth of the declaring scope (0 is the built-in/global scope).
    pub depth: usize,
    /// Whether this is the sentinel substituted after a failed declaration
    /// or lookup.
    pub is_error: bool,
}

impl Symbol {
    /// Create a new symbol.
    pub fn new(name: impl Into<String>, ty: Type, depth: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            depth,
            is_error: false,
        }
    }

    /// Create a sentinel error symbol.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            name: message.clone(),
            ty: Type::error(message),
            depth: 0,
            is_error: true,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error {
            write!(f, "ErrorSymbol({})", self.name)
        } else {
            write!(f, "Symbol({}:{})", self.name, self.ty)
        }
    }
}

/// The arena owning every symbol created during one parse.
#[derive(Debug, Clone, Default)]
pub struct Symbols {
    entries: Vec<Symbol>,
}

impl Symbols {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a symbol and return its id.
    pub fn add(&mut self, symbol: Symbol) -> SymbolId {
        self.entries.push(symbol);
        SymbolId(self.entries.len() - 1)
    }

    /// Get a symbol by id.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.entries.get(id.0)
    }

    /// Complete the type of a symbol. Sentinels keep their error type.
    pub fn set_type(&mut self, id: SymbolId, ty: Type) {
        if let Some(symbol) = self.entries.get_mut(id.0) {
            if !symbol.is_error {
                symbol.ty = ty;
            }
        }
    }

    /// Number of stored symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<SymbolId> for Symbols {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.entries[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut symbols = Symbols::new();
        let id = symbols.add(Symbol::new("x", Type::Int, 1));
        assert_eq!(symbols[id].name, "x");
        assert_eq!(symbols.get(id).map(|s| &s.ty), Some(&Type::Int));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn test_set_type() {
        let mut symbols = Symbols::new();
        let id = symbols.add(Symbol::new("f", Type::Void, 0));
        symbols.set_type(id, Type::func(vec![], Type::Int));
        assert_eq!(symbols[id].ty, Type::func(vec![], Type::Int));
    }

    #[test]
    fn test_sentinel_keeps_error_type() {
        let mut symbols = Symbols::new();
        let id = symbols.add(Symbol::error("x already exists."));
        symbols.set_type(id, Type::Int);
        assert!(symbols[id].ty.is_error());
        assert_eq!(symbols[id].to_string(), "ErrorSymbol(x already exists.)");
    }
}
