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

//! Type definitions for the Crux compiler.
//!
//! The operations of the type algebra (add, compare, index, ...) live in
//! [`crate::analyzer`]; this module only describes the shapes.

use std::fmt;

/// A type in the Crux language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Boolean value.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// Single precision float.
    Float,
    /// No value (function results only).
    Void,
    /// Fixed-size array.
    Array { extent: u32, base: Box<Type> },
    /// Function signature.
    Func { args: Vec<Type>, ret: Box<Type> },
    /// The result of an ill-typed operation.
    Error { message: String },
}

impl Type {
    /// Create an error type with a message.
    pub fn error(message: impl Into<String>) -> Self {
        Type::Error {
            message: message.into(),
        }
    }

    /// Create an array type.
    pub fn array(extent: u32, base: Type) -> Self {
        Type::Array {
            extent,
            base: Box::new(base),
        }
    }

    /// Create a function type.
    pub fn func(args: Vec<Type>, ret: Type) -> Self {
        Type::Func {
            args,
            ret: Box::new(ret),
        }
    }

    /// Resolve a type name as written in source code.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bool" => Type::Bool,
            "int" => Type::Int,
            "float" => Type::Float,
            "void" => Type::Void,
            _ => Type::error(format!("Unknown type: {}.", name)),
        }
    }

    /// Check if this is the error type.
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error { .. })
    }

    /// Check if this is the void type.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Check if this is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Check if a value of this type fits in one operand stack slot.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Bool | Type::Int | Type::Float)
    }

    /// Structural equivalence. Error types are never equivalent to anything.
    pub fn equivalent(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Bool, Type::Bool)
            | (Type::Int, Type::Int)
            | (Type::Float, Type::Float)
            | (Type::Void, Type::Void) => true,
            (
                Type::Array { extent, base },
                Type::Array {
                    extent: other_extent,
                    base: other_base,
                },
            ) => extent == other_extent && base.equivalent(other_base),
            (
                Type::Func { args, ret },
                Type::Func {
                    args: other_args,
                    ret: other_ret,
                },
            ) => list_equivalent(args, other_args) && ret.equivalent(other_ret),
            _ => false,
        }
    }
}

/// Pairwise, order-sensitive equivalence of two type lists.
pub fn list_equivalent(left: &[Type], right: &[Type]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.equivalent(r))
}

/// Render a type list as `TypeList(a, b)`.
pub fn format_type_list(types: &[Type]) -> String {
    format!("TypeList({})", join_types(types))
}

fn join_types(types: &[Type]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Void => write!(f, "void"),
            Type::Array { extent, base } => write!(f, "array[{},{}]", extent, base),
            Type::Func { args, ret } => write!(f, "func({}):{}", join_types(args), ret),
            Type::Error { message } => write!(f, "ErrorType({})", message),
        }
    }
}
