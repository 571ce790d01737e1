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

//! Error types for the Crux compiler.
//!
//! User-facing problems are [`Diagnostic`]s: they are collected per stage and
//! rendered in the stable `Kind(line,col)[message]` form. Broken internal
//! invariants during code generation are reported as [`CodegenError`].

use std::fmt;
use thiserror::Error;

/// A line/column position in the source code (both 1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Byte offset of this position inside `source`, clamped to its length.
    pub fn offset_in(&self, source: &str) -> usize {
        let mut offset = 0;
        for (index, line) in source.split_inclusive('\n').enumerate() {
            if index + 1 == self.line {
                let column_offset = line
                    .char_indices()
                    .nth(self.column.saturating_sub(1))
                    .map(|(i, _)| i)
                    .unwrap_or(line.len());
                return offset + column_offset;
            }
            offset += line.len();
        }
        source.len()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

/// The category of a user-facing diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The token stream does not match the grammar.
    SyntaxError,
    /// A name could not be found in any enclosing scope.
    ResolveSymbolError,
    /// A name was declared twice in the same scope.
    DeclareSymbolError,
    /// An operation is not defined for the types involved.
    TypeError,
}

impl DiagnosticKind {
    /// The name used in the rendered diagnostic.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::SyntaxError => "SyntaxError",
            DiagnosticKind::ResolveSymbolError => "ResolveSymbolError",
            DiagnosticKind::DeclareSymbolError => "DeclareSymbolError",
            DiagnosticKind::TypeError => "TypeError",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiler diagnostic with source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}({position})[{message}]")]
pub struct Diagnostic {
    /// The diagnostic category.
    pub kind: DiagnosticKind,
    /// The message, without the kind/position prefix.
    pub message: String,
    /// Where the problem was detected.
    pub position: Position,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::new(DiagnosticKind::SyntaxError, message, position)
    }

    pub fn resolve(message: impl Into<String>, position: Position) -> Self {
        Self::new(DiagnosticKind::ResolveSymbolError, message, position)
    }

    pub fn declare(message: impl Into<String>, position: Position) -> Self {
        Self::new(DiagnosticKind::DeclareSymbolError, message, position)
    }

    pub fn type_error(message: impl Into<String>, position: Position) -> Self {
        Self::new(DiagnosticKind::TypeError, message, position)
    }
}

/// Render a list of diagnostics one per line, in discovery order.
pub fn report(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diagnostic in diagnostics {
        output.push_str(&diagnostic.to_string());
        output.push('\n');
    }
    output
}

/// Fatal errors raised when code generation meets a tree it cannot lower.
///
/// These are never produced for programs that passed type checking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// An `Error` node reached the code generator.
    #[error("cannot generate code for an error node at {position}: {message}")]
    ErrorNode { position: Position, message: String },

    /// An operator has no lowering for the operand type.
    #[error("no lowering of {operation} for {ty} at {position}")]
    NoLowering {
        operation: &'static str,
        ty: String,
        position: Position,
    },

    /// A node has no entry in the type map.
    #[error("node at {position} was never type checked")]
    MissingType { position: Position },

    /// A symbol is used before its storage was allocated.
    #[error("no storage allocated for '{name}'")]
    UnknownStorage { name: String },
}

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Look up the line content for a position.
    pub fn from_position(source: &str, position: Position) -> Self {
        let line_content = source
            .lines()
            .nth(position.line.saturating_sub(1))
            .unwrap_or("")
            .to_string();

        Self {
            line: position.line,
            column: position.column,
            line_content,
        }
    }
}

/// Format a diagnostic with source context.
pub fn format_error(diagnostic: &Diagnostic, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_position(source, diagnostic.position);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", diagnostic.kind, diagnostic.message));
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));
    output.push_str(&format!(
        "{:>width$} | {:>start$}^\n",
        "",
        "",
        width = line_num_width,
        start = loc.column.saturating_sub(1)
    ));

    output
}
