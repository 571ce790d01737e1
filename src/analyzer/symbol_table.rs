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

//! Symbol table used by the parser.
//!
//! The symbol table manages a stack of scopes. The root scope holds the
//! built-in functions and the program's global declarations.

use std::fmt;

use super::builtins::BuiltinRegistry;
use super::scope::Scope;
use super::symbol::{Symbol, SymbolId, Symbols};
use crate::ast::Type;

/// The symbol table for name declaration and resolution.
#[derive(Debug)]
pub struct SymbolTable {
    /// Every symbol created so far, including closed scopes.
    symbols: Symbols,
    /// The scope stack (innermost scope last).
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Create a new symbol table with the built-ins in the root scope.
    pub fn new() -> Self {
        let mut table = Self {
            symbols: Symbols::new(),
            scopes: vec![Scope::new()],
        };
        table.register_builtins();
        table
    }

    /// Push a new scope onto the stack.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        tracing::trace!(depth = self.depth(), "enter scope");
    }

    /// Pop the current scope from the stack. The root scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            tracing::trace!(depth = self.depth(), "exit scope");
            self.scopes.pop();
        }
    }

    /// Depth of the current scope (0 for the root scope).
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Declare a name in the current scope.
    ///
    /// Fails with the existing symbol if the name is already declared in the
    /// current scope. Names in enclosing scopes are shadowed.
    pub fn insert(&mut self, name: &str, ty: Type) -> Result<SymbolId, SymbolId> {
        if let Some(existing) = self.current_scope().lookup(name) {
            return Err(existing);
        }
        let id = self.symbols.add(Symbol::new(name, ty, self.depth()));
        if let Some(scope) = self.scopes.last_mut() {
            scope.define(name, id)?;
        }
        Ok(id)
    }

    /// Look up a name, searching from innermost to outermost scope.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// Create a sentinel symbol standing in for a failed declaration or
    /// lookup. It is not visible in any scope.
    pub fn error_symbol(&mut self, message: impl Into<String>) -> SymbolId {
        self.symbols.add(Symbol::error(message))
    }

    /// Complete the type of a declared symbol.
    pub fn set_type(&mut self, id: SymbolId, ty: Type) {
        self.symbols.set_type(id, ty);
    }

    /// Get a symbol by id.
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    /// Give up the scope chain and keep the symbol arena.
    pub fn into_symbols(self) -> Symbols {
        self.symbols
    }

    fn current_scope(&self) -> &Scope {
        // the root scope is never popped
        &self.scopes[self.scopes.len() - 1]
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SymbolTable {
    /// Lists every open scope, outermost first, one symbol per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, scope) in self.scopes.iter().enumerate() {
            let indent = "  ".repeat(depth);
            for id in scope.iter() {
                writeln!(f, "{}{}", indent, self.symbols[id])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_preloaded() {
        let table = SymbolTable::new();
        let print_int = table.lookup("printInt").expect("printInt is built in");
        assert_eq!(
            table.get(print_int).ty,
            Type::func(vec![Type::Int], Type::Void)
        );
        assert!(table.lookup("readFloat").is_some());
        assert_eq!(table.depth(), 0);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = SymbolTable::new();
        let id = table.insert("x", Type::Int).unwrap();
        assert_eq!(table.lookup("x"), Some(id));
        assert_eq!(table.get(id).depth, 0);
        assert_eq!(table.lookup("y"), None);
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        let mut table = SymbolTable::new();
        let first = table.insert("x", Type::Int).unwrap();
        assert_eq!(table.insert("x", Type::Float), Err(first));
    }

    #[test]
    fn test_shadowing() {
        let mut table = SymbolTable::new();
        let outer = table.insert("x", Type::Float).unwrap();
        table.push_scope();
        let inner = table.insert("x", Type::Int).unwrap();
        assert_ne!(outer, inner);
        assert_eq!(table.lookup("x"), Some(inner));
        assert_eq!(table.get(inner).depth, 1);
        table.pop_scope();
        assert_eq!(table.lookup("x"), Some(outer));
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut table = SymbolTable::new();
        table.pop_scope();
        table.pop_scope();
        assert!(table.lookup("println").is_some());
    }

    #[test]
    fn test_error_symbol_is_not_visible() {
        let mut table = SymbolTable::new();
        let id = table.error_symbol("Could not find z.");
        assert!(table.get(id).is_error);
        assert_eq!(table.lookup("Could not find z."), None);
    }

    #[test]
    fn test_closed_scope_symbols_survive() {
        let mut table = SymbolTable::new();
        table.push_scope();
        let local = table.insert("tmp", Type::Bool).unwrap();
        table.pop_scope();
        let symbols = table.into_symbols();
        assert_eq!(symbols[local].name, "tmp");
    }

    #[test]
    fn test_display_lists_scopes() {
        let mut table = SymbolTable::new();
        table.insert("g", Type::Int).unwrap();
        table.push_scope();
        table.insert("l", Type::Bool).unwrap();
        let listing = table.to_string();
        assert!(listing.contains("Symbol(g:int)\n"));
        assert!(listing.contains("  Symbol(l:bool)\n"));
    }
}
