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

//! Parser module for the Crux compiler.
//!
//! A predictive recursive descent parser. It pulls tokens from the scanner
//! one at a time, builds the syntax tree and declares and resolves names in
//! the symbol table as it goes.
//!
//! # Module Structure
//!
//! - `declarations` - Declarations and the program rule (DeclarationParser trait)
//! - `expressions` - Expressions, designators and types (ExpressionParser trait)
//! - `helpers` - Token matching, nodes and symbols (ParserHelpers trait)
//! - `nonterminal` - Grammar rule names and FIRST sets
//! - `statements` - Statements and blocks (StatementParser trait)

// Submodules
pub mod declarations;
pub mod expressions;
pub mod helpers;
pub mod nonterminal;
pub mod statements;

pub use nonterminal::NonTerminal;

// Internal imports from submodules
use declarations::DeclarationParser;
use helpers::ParserHelpers;

use thiserror::Error;

use crate::analyzer::{SymbolTable, Symbols};
use crate::ast::{Command, CommandKind, NodeId};
use crate::error::Diagnostic;
use crate::lexer::{Scanner, Token};

/// Message of the `Error` node returned for an aborted parse.
pub const ABORT_MESSAGE: &str = "Could not complete parsing.";

/// Signal that a grammar violation stopped the parse.
///
/// The diagnostic describing the violation has already been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("could not complete parsing")]
pub struct ParseAbort;

/// The parser state.
pub struct Parser<I: Iterator<Item = char>> {
    /// The token source.
    pub(crate) scanner: Scanner<I>,
    /// The current (not yet consumed) token.
    pub(crate) current: Token,
    /// The scope chain names are declared into and resolved from.
    pub(crate) symbols: SymbolTable,
    /// Syntax and symbol diagnostics in discovery order.
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Id of the next node to create.
    pub(crate) next_id: u32,
}

/// Everything a parse produces.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The syntax tree, or a single `Error` node if the parse was aborted.
    pub tree: Command,
    /// Every symbol declared during the parse.
    pub symbols: Symbols,
    /// Syntax, resolve and declare diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Check if the parse recorded any diagnostic.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Create a new parser over a character stream.
    pub fn new(input: I) -> Self {
        let mut scanner = Scanner::new(input);
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
            next_id: 0,
        }
    }

    // ========================================
    // Program Parsing
    // ========================================

    /// Parse the complete program.
    pub fn parse(mut self) -> ParseResult {
        let tree = match self.program() {
            Ok(tree) => tree,
            Err(ParseAbort) => {
                tracing::debug!(at = %self.current.position(), "parse aborted");
                let position = self.current.position();
                self.new_node(
                    position,
                    CommandKind::Error {
                        message: ABORT_MESSAGE.to_string(),
                    },
                )
            }
        };
        tracing::debug!(
            nodes = tree.node_count(),
            errors = self.diagnostics.len(),
            "parse finished"
        );
        tracing::trace!("global scope:\n{}", self.symbols);

        ParseResult {
            tree,
            symbols: self.symbols.into_symbols(),
            diagnostics: self.diagnostics,
        }
    }

    /// Id for a new node.
    pub(crate) fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Parse a source string into a syntax tree.
pub fn parse(source: &str) -> ParseResult {
    Parser::new(source.chars()).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, Type};
    use crate::error::DiagnosticKind;
    use std::collections::HashSet;

    fn messages(result: &ParseResult) -> Vec<String> {
        result.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    fn declarations(result: &ParseResult) -> &[Command] {
        match &result.tree.kind {
            CommandKind::DeclarationList(items) => items,
            other => panic!("expected a declaration list, got {:?}", other),
        }
    }

    fn function_body(result: &ParseResult, index: usize) -> &[Command] {
        match &declarations(result)[index].kind {
            CommandKind::FunctionDefinition { body, .. } => match &body.kind {
                CommandKind::StatementList(items) => items,
                other => panic!("expected a statement list, got {:?}", other),
            },
            other => panic!("expected a function, got {:?}", other),
        }
    }

    // ========================================
    // Successful Parses
    // ========================================

    #[test]
    fn test_empty_program() {
        let result = parse("");
        assert!(!result.has_errors());
        assert_eq!(result.tree.kind, CommandKind::DeclarationList(vec![]));
    }

    #[test]
    fn test_global_declarations() {
        let result = parse("var x: int; array a: float[3][4]; func main(): void { }");
        assert!(!result.has_errors(), "{:?}", messages(&result));
        let items = declarations(&result);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name(), "VariableDeclaration");
        assert_eq!(items[1].name(), "ArrayDeclaration");
        assert_eq!(items[2].name(), "FunctionDefinition");

        let CommandKind::ArrayDeclaration { symbol } = items[1].kind else {
            panic!("expected array declaration");
        };
        assert_eq!(
            result.symbols[symbol].ty,
            Type::array(3, Type::array(4, Type::Float))
        );
    }

    #[test]
    fn test_function_type_and_parameters() {
        let result = parse("func add(a: int, b: int): int { return a + b; }");
        assert!(!result.has_errors(), "{:?}", messages(&result));
        let CommandKind::FunctionDefinition {
            function,
            ref parameters,
            ..
        } = declarations(&result)[0].kind
        else {
            panic!("expected function");
        };
        assert_eq!(
            result.symbols[function].ty,
            Type::func(vec![Type::Int, Type::Int], Type::Int)
        );
        assert_eq!(parameters.len(), 2);
        assert_eq!(result.symbols[parameters[1]].name, "b");
        assert_eq!(result.symbols[parameters[1]].depth, 1);
    }

    #[test]
    fn test_designator_as_value_is_dereferenced() {
        let result = parse("var x: int; func main(): void { let x = x; }");
        assert!(!result.has_errors());
        let body = function_body(&result, 1);
        let CommandKind::Assignment {
            destination,
            source,
        } = &body[0].kind
        else {
            panic!("expected assignment");
        };
        assert_eq!(destination.name(), "AddressOf");
        assert_eq!(source.name(), "Dereference");
    }

    #[test]
    fn test_index_chain() {
        let result = parse("array a: int[2][2]; func main(): void { let a[0][1] = 5; }");
        assert!(!result.has_errors());
        let body = function_body(&result, 1);
        let CommandKind::Assignment { destination, .. } = &body[0].kind else {
            panic!("expected assignment");
        };
        let CommandKind::Index { base, amount } = &destination.kind else {
            panic!("expected index");
        };
        assert_eq!(amount.kind, CommandKind::LiteralInt(1));
        assert_eq!(base.name(), "Index");
    }

    #[test]
    fn test_precedence() {
        let result = parse("func main(): void { ::printBool(1 + 2 * 3 < 7); }");
        assert!(!result.has_errors());
        let body = function_body(&result, 0);
        let CommandKind::Call { arguments, .. } = &body[0].kind else {
            panic!("expected call");
        };
        let argument = arguments.children()[0];
        let CommandKind::Comparison {
            operation, left, ..
        } = &argument.kind
        else {
            panic!("expected comparison, got {:?}", argument.kind);
        };
        assert_eq!(*operation, CompareOp::Lt);
        let CommandKind::Addition { right, .. } = &left.kind else {
            panic!("expected addition");
        };
        assert_eq!(right.name(), "Multiplication");
    }

    #[test]
    fn test_missing_else_is_empty_block() {
        let result = parse("func main(): void { if true { } }");
        assert!(!result.has_errors());
        let body = function_body(&result, 0);
        let CommandKind::IfElseBranch { else_block, .. } = &body[0].kind else {
            panic!("expected if");
        };
        assert_eq!(else_block.kind, CommandKind::StatementList(vec![]));
    }

    #[test]
    fn test_node_ids_are_unique() {
        let result = parse(
            "var g: int;
             func f(x: int): int { while x > 0 { let x = x - 1; } return x; }
             func main(): void { let g = ::f(3); ::printInt(g); }",
        );
        assert!(!result.has_errors());
        fn collect(node: &Command, seen: &mut HashSet<NodeId>) {
            assert!(seen.insert(node.id), "duplicate id {:?}", node.id);
            for child in node.children() {
                collect(child, seen);
            }
        }
        let mut seen = HashSet::new();
        collect(&result.tree, &mut seen);
        assert_eq!(seen.len(), result.tree.node_count());
    }

    #[test]
    fn test_recursive_call_resolves() {
        let result = parse("func f(n: int): int { return ::f(n); }");
        assert!(!result.has_errors(), "{:?}", messages(&result));
    }

    // ========================================
    // Symbol Errors
    // ========================================

    #[test]
    fn test_duplicate_declaration_in_block() {
        let result = parse("func main(): void { var x: int; var x: int; }");
        assert_eq!(
            messages(&result),
            vec!["DeclareSymbolError(1,37)[x already exists.]"]
        );
        assert_eq!(result.tree.name(), "DeclarationList");
    }

    #[test]
    fn test_shadowing_is_allowed() {
        let result = parse(
            "var x: float;
             func main(): void { var x: int; if true { var x: bool; let x = false; } }",
        );
        assert!(!result.has_errors(), "{:?}", messages(&result));
    }

    #[test]
    fn test_unresolved_name() {
        let result = parse("func main(): void { let y = 1; }");
        assert_eq!(messages(&result), vec!["ResolveSymbolError(1,25)[Could not find y.]"]);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ResolveSymbolError);
    }

    #[test]
    fn test_scope_closed_after_block() {
        let result = parse("func main(): void { if true { var t: int; } let t = 1; }");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message, "Could not find t.");
    }

    #[test]
    fn test_parameter_not_visible_after_function() {
        let result = parse("func f(p: int): void { } func main(): void { let p = 1; }");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message, "Could not find p.");
    }

    // ========================================
    // Syntax Errors
    // ========================================

    #[test]
    fn test_missing_semicolon_aborts() {
        let result = parse("var x: int");
        assert_eq!(
            messages(&result),
            vec!["SyntaxError(1,11)[Expected SEMICOLON but got EOF.]"]
        );
        assert_eq!(
            result.tree.kind,
            CommandKind::Error {
                message: ABORT_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_bad_statement_start() {
        let result = parse("func main(): void { x = 1; }");
        assert_eq!(
            messages(&result),
            vec!["SyntaxError(1,21)[Expected CLOSE_BRACE but got IDENTIFIER.]"]
        );
    }

    #[test]
    fn test_bad_expression_start() {
        let result = parse("func main(): void { let x = ; }");
        let last = result.diagnostics.last().unwrap();
        assert_eq!(
            last.to_string(),
            "SyntaxError(1,29)[Expected a token from EXPRESSION3 but got SEMICOLON.]"
        );
    }

    #[test]
    fn test_trailing_garbage_requires_eof() {
        let result = parse("var x: int; }");
        assert_eq!(
            messages(&result),
            vec!["SyntaxError(1,13)[Expected EOF but got CLOSE_BRACE.]"]
        );
    }

    #[test]
    fn test_error_token_is_syntax_error() {
        let result = parse("var x: int; func main(): void { let x = 1 ! 2; }");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::SyntaxError);
        assert!(result.diagnostics[0].message.ends_with("but got ERROR."));
    }

    #[test]
    fn test_symbol_errors_precede_abort() {
        let result = parse("func main(): void { let q = 1 }");
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ResolveSymbolError);
        assert_eq!(result.diagnostics[1].kind, DiagnosticKind::SyntaxError);
    }

    #[test]
    fn test_integer_out_of_range() {
        let result = parse("func main(): void { ::printInt(99999999999); }");
        assert_eq!(
            messages(&result),
            vec!["SyntaxError(1,32)[Integer literal 99999999999 is out of range.]"]
        );
        assert_eq!(result.tree.name(), "DeclarationList");
    }
}
