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

//! Token definitions for the Crux language.

use std::fmt;

use crate::error::Position;

/// The kind of a token in the Crux language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Logical keywords
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,

    // Arithmetic operators
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,

    // Keywords
    /// `let` - assignment statement.
    Let,
    /// `var` - variable declaration.
    Var,
    /// `array` - array declaration.
    Array,
    /// `func` - function definition.
    Func,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `true`
    True,
    /// `false`
    False,
    /// `return`
    Return,

    // Variable lexemes
    /// Identifier (variable, array, function or type name).
    Identifier,
    /// Integer literal.
    Integer,
    /// Float literal.
    Float,
    /// Unrecognized character.
    Error,
    /// End of input.
    Eof,

    // Punctuation
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,

    // Comparison operators
    /// `>=`
    GreaterEqual,
    /// `<=`
    LesserEqual,
    /// `!=`
    NotEqual,
    /// `==`
    Equal,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,

    /// `=`
    Assign,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `::` - call prefix.
    Call,
}

/// Keywords, matched only on an exact identifier lexeme.
const KEYWORDS: &[TokenKind] = &[
    TokenKind::And,
    TokenKind::Or,
    TokenKind::Not,
    TokenKind::Let,
    TokenKind::Var,
    TokenKind::Array,
    TokenKind::Func,
    TokenKind::If,
    TokenKind::Else,
    TokenKind::While,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Return,
];

/// Operators and punctuation, matched by longest prefix.
const SPECIAL_CHARS: &[TokenKind] = &[
    TokenKind::OpenParen,
    TokenKind::CloseParen,
    TokenKind::OpenBrace,
    TokenKind::CloseBrace,
    TokenKind::OpenBracket,
    TokenKind::CloseBracket,
    TokenKind::Add,
    TokenKind::Sub,
    TokenKind::Mul,
    TokenKind::Div,
    TokenKind::GreaterEqual,
    TokenKind::LesserEqual,
    TokenKind::NotEqual,
    TokenKind::Equal,
    TokenKind::GreaterThan,
    TokenKind::LessThan,
    TokenKind::Assign,
    TokenKind::Comma,
    TokenKind::Semicolon,
    TokenKind::Colon,
    TokenKind::Call,
];

impl TokenKind {
    /// The fixed lexeme of this kind, or `None` for variable-lexeme kinds.
    pub fn lexeme(&self) -> Option<&'static str> {
        let lexeme = match self {
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Let => "let",
            TokenKind::Var => "var",
            TokenKind::Array => "array",
            TokenKind::Func => "func",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Return => "return",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LesserEqual => "<=",
            TokenKind::NotEqual => "!=",
            TokenKind::Equal => "==",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThan => "<",
            TokenKind::Assign => "=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Call => "::",
            TokenKind::Identifier
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::Error
            | TokenKind::Eof => return None,
        };
        Some(lexeme)
    }

    /// The upper-case name used in token dumps and syntax errors.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Add => "ADD",
            TokenKind::Sub => "SUB",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Let => "LET",
            TokenKind::Var => "VAR",
            TokenKind::Array => "ARRAY",
            TokenKind::Func => "FUNC",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Return => "RETURN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::OpenBrace => "OPEN_BRACE",
            TokenKind::CloseBrace => "CLOSE_BRACE",
            TokenKind::OpenBracket => "OPEN_BRACKET",
            TokenKind::CloseBracket => "CLOSE_BRACKET",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::LesserEqual => "LESSER_EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Call => "CALL",
        }
    }

    /// Whether the token carries its own lexeme in the textual form.
    pub fn has_variable_lexeme(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Integer | TokenKind::Float | TokenKind::Error
        )
    }

    /// Look up a keyword by its exact lexeme.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .copied()
            .find(|kind| kind.lexeme() == Some(word))
    }

    /// Look up an operator or punctuation by its exact lexeme.
    pub fn special(lexeme: &str) -> Option<TokenKind> {
        SPECIAL_CHARS
            .iter()
            .copied()
            .find(|kind| kind.lexeme() == Some(lexeme))
    }

    /// Whether some operator or punctuation lexeme starts with `prefix`.
    pub fn is_special_prefix(prefix: &str) -> bool {
        SPECIAL_CHARS
            .iter()
            .filter_map(TokenKind::lexeme)
            .any(|lexeme| lexeme.starts_with(prefix))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The lexeme for variable-lexeme kinds, empty otherwise.
    pub lexeme: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column of the first character (1-indexed).
    pub column: usize,
}

impl Token {
    /// Create a token of a fixed-lexeme kind.
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: String::new(),
            line,
            column,
        }
    }

    /// Create a token carrying its own lexeme.
    pub fn with_lexeme(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Check the kind of this token.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The position of the token's first character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The source text of this token.
    pub fn text(&self) -> &str {
        self.kind.lexeme().unwrap_or(&self.lexeme)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.kind.has_variable_lexeme() {
            write!(f, "({})", self.lexeme)?;
        }
        write!(f, "(lineNum:{}, charPos:{})", self.line, self.column)
    }
}
