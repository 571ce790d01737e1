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

//! Crux compiler library.
//!
//! The pipeline runs scanner, parser (with name resolution), type checker
//! and code generator. Each stage collects its diagnostics; a stage that
//! reports any diagnostic stops the pipeline.

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod runner;

pub use ast::{Command, CommandKind, Type};
pub use codegen::Program;
pub use error::{format_error, report, CodegenError, Diagnostic, DiagnosticKind, Position};
pub use lexer::{Token, TokenKind};

/// Version of the compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the language.
pub const NAME: &str = "Crux";

/// The outcome of compiling one source text.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Diagnostics of the first stage that reported any.
    pub diagnostics: Vec<Diagnostic>,
    /// The assembly program, present only without diagnostics.
    pub program: Option<Program>,
}

impl Compilation {
    /// Check if the compilation reported any diagnostic.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The diagnostics rendered one per line.
    pub fn report(&self) -> String {
        report(&self.diagnostics)
    }
}

/// Parse and type check a source text without generating code.
pub fn check(source: &str) -> Vec<Diagnostic> {
    let parsed = parser::parse(source);
    if parsed.has_errors() {
        return parsed.diagnostics;
    }
    analyzer::check(&parsed.tree, &parsed.symbols).diagnostics
}

/// Compile a source text to MIPS assembly.
///
/// Diagnostics are part of the [`Compilation`]. An `Err` means the code
/// generator met a tree it cannot lower, which a checked program never is.
pub fn compile(source: &str) -> Result<Compilation, CodegenError> {
    let parsed = parser::parse(source);
    if parsed.has_errors() {
        tracing::debug!(count = parsed.diagnostics.len(), "stopping after parse");
        return Ok(Compilation {
            diagnostics: parsed.diagnostics,
            program: None,
        });
    }

    let checked = analyzer::check(&parsed.tree, &parsed.symbols);
    if checked.has_errors() {
        tracing::debug!(count = checked.diagnostics.len(), "stopping after type check");
        return Ok(Compilation {
            diagnostics: checked.diagnostics,
            program: None,
        });
    }

    let program = codegen::generate(&parsed.tree, &checked.types, &parsed.symbols)?;
    Ok(Compilation {
        diagnostics: Vec::new(),
        program: Some(program),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "Crux");
    }

    #[test]
    fn test_compile_valid_program() {
        let compilation = compile("func main(): void { ::printInt(2 + 3); }").unwrap();
        assert!(!compilation.has_errors());
        let program = compilation.program.expect("program generated");
        assert!(program.to_string().contains("jal func.printInt"));
    }

    #[test]
    fn test_parse_errors_stop_before_checking() {
        let compilation = compile("func main(): void { let y = 1 + true; }").unwrap();
        assert!(compilation.program.is_none());
        assert_eq!(
            compilation.report(),
            "ResolveSymbolError(1,25)[Could not find y.]\n"
        );
    }

    #[test]
    fn test_type_errors_stop_before_codegen() {
        let compilation = compile("func main(): void { ::printInt(1 + 2.0); }").unwrap();
        assert!(compilation.program.is_none());
        assert_eq!(compilation.diagnostics.len(), 2);
        assert_eq!(compilation.diagnostics[0].kind, DiagnosticKind::TypeError);
        assert!(compilation.diagnostics[0].message.contains("int"));
        assert!(compilation.diagnostics[0].message.contains("float"));
    }

    #[test]
    fn test_check_only() {
        assert!(check("func main(): void { }").is_empty());
        assert_eq!(check("var x: int; var x: int;").len(), 1);
    }
}
