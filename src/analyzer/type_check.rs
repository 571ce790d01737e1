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

//! The type checker.
//!
//! One post-order walk over the syntax tree. Every node gets a type in the
//! [`TypeMap`]; every error type produced along the way is recorded as a
//! `TypeError` diagnostic at the node's position.

use std::collections::HashMap;

use super::operators::TypeOperations;
use super::symbol::{SymbolId, Symbols};
use crate::ast::{Command, CommandKind, NodeId, Type};
use crate::error::Diagnostic;

/// Node types computed by the checker.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    types: HashMap<NodeId, Type>,
}

impl TypeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Type of a node, if it was checked.
    pub fn get(&self, node: &Command) -> Option<&Type> {
        self.types.get(&node.id)
    }

    /// Record the type of a node.
    pub fn insert(&mut self, node: &Command, ty: Type) {
        self.types.insert(node.id, ty);
    }

    /// Number of typed nodes.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no node was typed.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Result of type checking a tree.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Type of every checked node.
    pub types: TypeMap,
    /// Type errors in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    /// Check if any type error was found.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// The type checker state.
pub struct TypeChecker<'s> {
    symbols: &'s Symbols,
    types: TypeMap,
    diagnostics: Vec<Diagnostic>,
    current_function: Option<SymbolId>,
}

impl<'s> TypeChecker<'s> {
    /// Create a checker reading declared types from `symbols`.
    pub fn new(symbols: &'s Symbols) -> Self {
        Self {
            symbols,
            types: TypeMap::new(),
            diagnostics: Vec::new(),
            current_function: None,
        }
    }

    /// Check a whole tree.
    pub fn check(mut self, root: &Command) -> CheckResult {
        self.visit(root);
        tracing::debug!(
            nodes = self.types.len(),
            errors = self.diagnostics.len(),
            "type check finished"
        );
        CheckResult {
            types: self.types,
            diagnostics: self.diagnostics,
        }
    }

    /// Record a node's type, reporting it if it is an error.
    fn put(&mut self, node: &Command, ty: Type) -> Type {
        if let Type::Error { message } = &ty {
            self.diagnostics
                .push(Diagnostic::type_error(message.clone(), node.position));
        }
        self.types.insert(node, ty.clone());
        ty
    }

    fn report(&mut self, node: &Command, message: String) {
        self.diagnostics
            .push(Diagnostic::type_error(message, node.position));
    }

    /// Return type of the function being checked.
    fn expected_return(&self) -> Type {
        match self.current_function.map(|id| &self.symbols[id].ty) {
            Some(Type::Func { ret, .. }) => ret.as_ref().clone(),
            _ => Type::Void,
        }
    }

    /// Type of a block: the function's return type if every path through it
    /// returns, void otherwise.
    fn block_type(&self, block: &Command) -> Type {
        if block_returns(block) {
            self.expected_return()
        } else {
            Type::Void
        }
    }

    fn visit(&mut self, node: &Command) -> Type {
        let symbols = self.symbols;
        match &node.kind {
            CommandKind::DeclarationList(items) => {
                for item in items {
                    self.visit(item);
                }
                self.put(node, Type::Void)
            }
            CommandKind::StatementList(items) => {
                for item in items {
                    self.visit(item);
                }
                let ty = self.block_type(node);
                self.put(node, ty)
            }
            CommandKind::ExpressionList(items) => {
                for item in items {
                    self.visit(item);
                }
                self.put(node, Type::Void)
            }
            CommandKind::VariableDeclaration { symbol } => {
                let symbol = &symbols[*symbol];
                let ty = match &symbol.ty {
                    Type::Void | Type::Error { .. } => Type::error(format!(
                        "Variable {} has invalid type {}.",
                        symbol.name, symbol.ty
                    )),
                    _ => Type::Void,
                };
                self.put(node, ty)
            }
            CommandKind::ArrayDeclaration { symbol } => {
                let symbol = &symbols[*symbol];
                let ty = check_array(&symbol.name, &symbol.ty);
                self.put(node, ty)
            }
            CommandKind::FunctionDefinition {
                function,
                parameters,
                body,
            } => self.visit_function(node, *function, parameters, body),
            CommandKind::AddressOf { symbol } => {
                let ty = symbols[*symbol].ty.clone();
                self.put(node, ty)
            }
            CommandKind::Dereference { expression } => {
                let ty = self.visit(expression).deref();
                self.put(node, ty)
            }
            CommandKind::Index { base, amount } => {
                let base = self.visit(base);
                let amount = self.visit(amount);
                self.put(node, base.index(&amount))
            }
            CommandKind::LiteralBool(_) => self.put(node, Type::Bool),
            CommandKind::LiteralInt(_) => self.put(node, Type::Int),
            CommandKind::LiteralFloat(_) => self.put(node, Type::Float),
            CommandKind::Addition { left, right } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.add(&right))
            }
            CommandKind::Subtraction { left, right } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.subtract(&right))
            }
            CommandKind::Multiplication { left, right } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.multiply(&right))
            }
            CommandKind::Division { left, right } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.divide(&right))
            }
            CommandKind::Comparison {
                operation,
                left,
                right,
            } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.compare(*operation, &right))
            }
            CommandKind::LogicalAnd { left, right } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.and(&right))
            }
            CommandKind::LogicalOr { left, right } => {
                let (left, right) = self.visit_pair(left, right);
                self.put(node, left.or(&right))
            }
            CommandKind::LogicalNot { expression } => {
                let ty = self.visit(expression).not();
                self.put(node, ty)
            }
            CommandKind::Assignment {
                destination,
                source,
            } => {
                let (destination, source) = self.visit_pair(destination, source);
                self.put(node, destination.assign(&source))
            }
            CommandKind::Call {
                function,
                arguments,
            } => {
                self.visit(arguments);
                let argument_types = self.argument_types(arguments);
                let ty = symbols[*function].ty.call(&argument_types);
                self.put(node, ty)
            }
            CommandKind::IfElseBranch {
                condition,
                then_block,
                else_block,
            } => {
                let condition = self.visit(condition);
                self.visit(then_block);
                self.visit(else_block);
                let ty = if !matches!(condition, Type::Bool) {
                    Type::error(format!(
                        "IfElseBranch requires bool condition not {}.",
                        condition
                    ))
                } else if block_returns(then_block) && block_returns(else_block) {
                    self.expected_return()
                } else {
                    Type::Void
                };
                self.put(node, ty)
            }
            CommandKind::WhileLoop { condition, body } => {
                let condition = self.visit(condition);
                self.visit(body);
                let ty = if matches!(condition, Type::Bool) {
                    Type::Void
                } else {
                    Type::error(format!(
                        "WhileLoop requires bool condition not {}.",
                        condition
                    ))
                };
                self.put(node, ty)
            }
            CommandKind::Return { argument } => {
                let actual = self.visit(argument);
                let expected = self.expected_return();
                let ty = if actual.equivalent(&expected) {
                    actual
                } else {
                    let name = self
                        .current_function
                        .map(|id| symbols[id].name.clone())
                        .unwrap_or_default();
                    Type::error(format!(
                        "Function {} returns {} not {}.",
                        name, expected, actual
                    ))
                };
                self.put(node, ty)
            }
            CommandKind::Error { message } => self.put(node, Type::error(message.clone())),
        }
    }

    fn visit_pair(&mut self, left: &Command, right: &Command) -> (Type, Type) {
        let left = self.visit(left);
        let right = self.visit(right);
        (left, right)
    }

    fn argument_types(&self, arguments: &Command) -> Vec<Type> {
        arguments
            .children()
            .into_iter()
            .map(|argument| self.types.get(argument).cloned().unwrap_or(Type::Void))
            .collect()
    }

    fn visit_function(
        &mut self,
        node: &Command,
        function: SymbolId,
        parameters: &[SymbolId],
        body: &Command,
    ) -> Type {
        let symbols = self.symbols;
        let symbol = &symbols[function];
        let name = symbol.name.clone();
        let ret = match &symbol.ty {
            Type::Func { ret, .. } => ret.as_ref().clone(),
            other => other.clone(),
        };

        let mut valid = true;
        if name == "main" && (!ret.is_void() || !parameters.is_empty()) {
            self.report(node, "Function main has invalid signature.".to_string());
            valid = false;
        }
        for (position, parameter) in parameters.iter().enumerate() {
            match &symbols[*parameter].ty {
                Type::Void => {
                    self.report(
                        node,
                        format!(
                            "Function {} has a void argument in position {}.",
                            name, position
                        ),
                    );
                    valid = false;
                }
                Type::Error { message } => {
                    let message = format!(
                        "Function {} has an error in argument in position {}: {}",
                        name, position, message
                    );
                    self.report(node, message);
                    valid = false;
                }
                _ => {}
            }
        }

        let enclosing = self.current_function.replace(function);
        self.visit(body);
        if !ret.is_void() && !block_returns(body) {
            self.report(
                node,
                format!("Not all paths in function {} have a return.", name),
            );
            valid = false;
        }
        self.current_function = enclosing;

        let ty = if valid {
            symbols[function].ty.clone()
        } else {
            Type::error(format!("Function {} is invalid.", name))
        };
        // problems were reported individually above
        self.types.insert(node, ty.clone());
        ty
    }
}

/// Validate an array declaration's type: every extent must be positive and
/// the innermost element type must be a value type.
fn check_array(name: &str, ty: &Type) -> Type {
    let mut current = ty;
    while let Type::Array { extent, base } = current {
        if *extent == 0 {
            return Type::error(format!("Array {} has invalid extent 0.", name));
        }
        current = base;
    }
    match current {
        Type::Void | Type::Error { .. } | Type::Func { .. } => Type::error(format!(
            "Array {} has invalid base type {}.",
            name, current
        )),
        _ => ty.clone(),
    }
}

/// Whether a statement leaves the function on every path.
fn definitely_returns(statement: &Command) -> bool {
    match &statement.kind {
        CommandKind::Return { .. } => true,
        CommandKind::IfElseBranch {
            then_block,
            else_block,
            ..
        } => block_returns(then_block) && block_returns(else_block),
        _ => false,
    }
}

/// Whether some statement of a block definitely returns.
fn block_returns(block: &Command) -> bool {
    match &block.kind {
        CommandKind::StatementList(items) => items.iter().any(definitely_returns),
        _ => definitely_returns(block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use crate::parser::parse;

    fn check_source(source: &str) -> Vec<String> {
        let parsed = parse(source);
        assert!(
            parsed.diagnostics.is_empty(),
            "unexpected parse errors: {:?}",
            parsed.diagnostics
        );
        let result = TypeChecker::new(&parsed.symbols).check(&parsed.tree);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::TypeError));
        result
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    // ========================================
    // Accepted Programs
    // ========================================

    #[test]
    fn test_well_typed_program() {
        let errors = check_source(
            "var g: int;
             func square(x: int): int { return x * x; }
             func main(): void {
                 let g = ::square(3);
                 if g > 4 { ::printInt(g); } else { ::println(); }
             }",
        );
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_every_node_typed() {
        let parsed = parse("func main(): void { var x: float; let x = 1.5 * 2.0; }");
        let result = TypeChecker::new(&parsed.symbols).check(&parsed.tree);
        assert!(!result.has_errors());
        assert_eq!(result.types.len(), parsed.tree.node_count());
    }

    #[test]
    fn test_program_without_main_is_accepted() {
        assert!(check_source("var x: int;").is_empty());
    }

    #[test]
    fn test_both_arms_return() {
        let errors = check_source(
            "func sign(x: int): int {
                 if x < 0 { return 0 - 1; } else { return 1; }
             }",
        );
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_recursion_is_typed() {
        let errors = check_source(
            "func fact(n: int): int {
                 if n <= 1 { return 1; }
                 return n * ::fact(n - 1);
             }",
        );
        assert!(errors.is_empty(), "{:?}", errors);
    }

    // ========================================
    // Expression Errors
    // ========================================

    #[test]
    fn test_mixed_addition() {
        let errors = check_source("func main(): void { ::printInt(1 + 2.0); }");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("TypeError(1,"));
        assert!(errors[0].ends_with("[Cannot add int with float.]"));
        assert!(errors[1].contains("Cannot call func(int):void using"));
    }

    #[test]
    fn test_assign_mismatch() {
        let errors = check_source("func main(): void { var b: bool; let b = 3; }");
        assert_eq!(
            errors,
            vec!["TypeError(1,34)[Cannot assign int to bool.]".to_string()]
        );
    }

    #[test]
    fn test_index_with_float() {
        let errors = check_source(
            "array a: int[4];
             func main(): void { let a[1.0] = 2; }",
        );
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Cannot index array[4,int] with float."));
    }

    // ========================================
    // Declaration Errors
    // ========================================

    #[test]
    fn test_void_variable() {
        let errors = check_source("var v: void;");
        assert_eq!(
            errors,
            vec!["TypeError(1,1)[Variable v has invalid type void.]".to_string()]
        );
    }

    #[test]
    fn test_unknown_type_variable() {
        let errors = check_source("var v: string;");
        assert_eq!(
            errors,
            vec![
                "TypeError(1,1)[Variable v has invalid type ErrorType(Unknown type: string.).]"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_array_void_base() {
        let errors = check_source("array a: void[3];");
        assert_eq!(
            errors,
            vec!["TypeError(1,1)[Array a has invalid base type void.]".to_string()]
        );
    }

    #[test]
    fn test_array_zero_extent() {
        let errors = check_source("array a: int[2][0];");
        assert_eq!(
            errors,
            vec!["TypeError(1,1)[Array a has invalid extent 0.]".to_string()]
        );
    }

    // ========================================
    // Function Errors
    // ========================================

    #[test]
    fn test_main_signature() {
        let errors = check_source("func main(): int { return 0; }");
        assert_eq!(errors[0], "TypeError(1,1)[Function main has invalid signature.]");

        let errors = check_source("func main(x: int): void { }");
        assert_eq!(errors, vec!["TypeError(1,1)[Function main has invalid signature.]"]);
    }

    #[test]
    fn test_void_argument() {
        let errors = check_source("func f(a: int, b: void): void { }");
        assert_eq!(
            errors,
            vec!["TypeError(1,1)[Function f has a void argument in position 1.]"]
        );
    }

    #[test]
    fn test_error_argument() {
        let errors = check_source("func f(a: text): void { }");
        assert_eq!(
            errors,
            vec![
                "TypeError(1,1)[Function f has an error in argument in position 0: Unknown type: text.]"
            ]
        );
    }

    #[test]
    fn test_return_in_one_arm_only() {
        let errors = check_source(
            "func f(x: int): int {
                 if x > 0 { return 1; }
             }",
        );
        assert_eq!(
            errors,
            vec!["TypeError(1,1)[Not all paths in function f have a return.]"]
        );
    }

    #[test]
    fn test_return_inside_while_is_not_enough() {
        let errors = check_source("func f(): bool { while true { return true; } }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Not all paths in function f have a return."));
    }

    #[test]
    fn test_wrong_return_type() {
        let errors = check_source("func f(): int { return true; }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("[Function f returns int not bool.]"));
    }

    // ========================================
    // Statement Errors
    // ========================================

    #[test]
    fn test_if_condition_and_body_both_checked() {
        let errors = check_source(
            "func main(): void {
                 if 1 { ::printInt(true); }
             }",
        );
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Cannot call func(int):void using TypeList(bool)."));
        assert!(errors[1].contains("IfElseBranch requires bool condition not int."));
    }

    #[test]
    fn test_while_condition() {
        let errors = check_source("func main(): void { while 2.5 { } }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("[WhileLoop requires bool condition not float.]"));
    }

    #[test]
    fn test_block_helpers() {
        let parsed = parse("func f(): int { if true { return 1; } else { return 2; } }");
        let CommandKind::DeclarationList(items) = &parsed.tree.kind else {
            panic!("expected declaration list");
        };
        let CommandKind::FunctionDefinition { body, .. } = &items[0].kind else {
            panic!("expected function");
        };
        assert!(block_returns(body));
    }
}
