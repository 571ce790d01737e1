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

//! The type algebra.
//!
//! Every operation takes the operand types and returns the result type, or
//! an error type whose message describes the mismatch. An operation that is
//! not defined for a type returns an error. Error operands are not special:
//! they fail like any other mismatch, so errors cascade.

use crate::ast::{format_type_list, list_equivalent, CompareOp, Type};

/// Extension trait with the operations of the type algebra.
pub trait TypeOperations {
    /// `self + that`
    fn add(&self, that: &Type) -> Type;

    /// `self - that`
    fn subtract(&self, that: &Type) -> Type;

    /// `self * that`
    fn multiply(&self, that: &Type) -> Type;

    /// `self / that`
    fn divide(&self, that: &Type) -> Type;

    /// `self op that`
    fn compare(&self, operation: CompareOp, that: &Type) -> Type;

    /// `self and that`
    fn and(&self, that: &Type) -> Type;

    /// `self or that`
    fn or(&self, that: &Type) -> Type;

    /// `not self`
    fn not(&self) -> Type;

    /// `self[that]`
    fn index(&self, that: &Type) -> Type;

    /// Call a function of type `self` with arguments of the given types.
    fn call(&self, args: &[Type]) -> Type;

    /// Store a value of type `source` into a location of type `self`.
    fn assign(&self, source: &Type) -> Type;

    /// Load the value of a location of type `self`.
    fn deref(&self) -> Type;
}

fn is_numeric(ty: &Type) -> bool {
    matches!(ty, Type::Int | Type::Float)
}

fn same_numeric(left: &Type, right: &Type) -> bool {
    is_numeric(left) && left.equivalent(right)
}

impl TypeOperations for Type {
    fn add(&self, that: &Type) -> Type {
        if same_numeric(self, that) {
            return self.clone();
        }
        Type::error(format!("Cannot add {} with {}.", self, that))
    }

    fn subtract(&self, that: &Type) -> Type {
        if same_numeric(self, that) {
            return self.clone();
        }
        Type::error(format!("Cannot subtract {} from {}.", that, self))
    }

    fn multiply(&self, that: &Type) -> Type {
        if same_numeric(self, that) {
            return self.clone();
        }
        Type::error(format!("Cannot multiply {} with {}.", self, that))
    }

    fn divide(&self, that: &Type) -> Type {
        if same_numeric(self, that) {
            return self.clone();
        }
        Type::error(format!("Cannot divide {} by {}.", self, that))
    }

    fn compare(&self, operation: CompareOp, that: &Type) -> Type {
        let comparable = match (self, that) {
            (Type::Int, Type::Int) | (Type::Float, Type::Float) => true,
            (Type::Bool, Type::Bool) => operation.is_equality(),
            _ => false,
        };
        if comparable {
            return Type::Bool;
        }
        Type::error(format!("Cannot compare {} with {}.", self, that))
    }

    fn and(&self, that: &Type) -> Type {
        if matches!((self, that), (Type::Bool, Type::Bool)) {
            return Type::Bool;
        }
        Type::error(format!("Cannot compute {} and {}.", self, that))
    }

    fn or(&self, that: &Type) -> Type {
        if matches!((self, that), (Type::Bool, Type::Bool)) {
            return Type::Bool;
        }
        Type::error(format!("Cannot compute {} or {}.", self, that))
    }

    fn not(&self) -> Type {
        if matches!(self, Type::Bool) {
            return Type::Bool;
        }
        Type::error(format!("Cannot negate {}.", self))
    }

    fn index(&self, that: &Type) -> Type {
        match (self, that) {
            (Type::Array { base, .. }, Type::Int) => base.as_ref().clone(),
            _ => Type::error(format!("Cannot index {} with {}.", self, that)),
        }
    }

    fn call(&self, args: &[Type]) -> Type {
        if let Type::Func { args: params, ret } = self {
            if !args.iter().any(Type::is_array) && list_equivalent(params, args) {
                return ret.as_ref().clone();
            }
        }
        Type::error(format!(
            "Cannot call {} using {}.",
            self,
            format_type_list(args)
        ))
    }

    fn assign(&self, source: &Type) -> Type {
        if self.is_scalar() && self.equivalent(source) {
            return self.clone();
        }
        Type::error(format!("Cannot assign {} to {}.", source, self))
    }

    fn deref(&self) -> Type {
        match self {
            Type::Bool | Type::Int | Type::Float | Type::Array { .. } => self.clone(),
            _ => Type::error(format!("Cannot dereference {}.", self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_arithmetic_same_types() {
        assert_eq!(Type::Int.add(&Type::Int), Type::Int);
        assert_eq!(Type::Float.subtract(&Type::Float), Type::Float);
        assert_eq!(Type::Int.multiply(&Type::Int), Type::Int);
        assert_eq!(Type::Float.divide(&Type::Float), Type::Float);
    }

    #[test]
    fn test_arithmetic_mismatch_messages() {
        assert_eq!(
            Type::Int.add(&Type::Float),
            Type::error("Cannot add int with float.")
        );
        assert_eq!(
            Type::Int.subtract(&Type::Bool),
            Type::error("Cannot subtract bool from int.")
        );
        assert_eq!(
            Type::Bool.multiply(&Type::Bool),
            Type::error("Cannot multiply bool with bool.")
        );
        assert_eq!(
            Type::Float.divide(&Type::Int),
            Type::error("Cannot divide float by int.")
        );
    }

    #[test_case(CompareOp::Eq, Type::Int, true; "int_eq")]
    #[test_case(CompareOp::Lt, Type::Int, true; "int_lt")]
    #[test_case(CompareOp::Ge, Type::Float, true; "float_ge")]
    #[test_case(CompareOp::Eq, Type::Bool, true; "bool_eq")]
    #[test_case(CompareOp::Ne, Type::Bool, true; "bool_ne")]
    #[test_case(CompareOp::Lt, Type::Bool, false; "bool_lt")]
    #[test_case(CompareOp::Eq, Type::Void, false; "void_eq")]
    fn test_compare(operation: CompareOp, operand: Type, ok: bool) {
        let result = operand.compare(operation, &operand);
        assert_eq!(result == Type::Bool, ok, "{} {} {}", operand, operation, operand);
    }

    #[test]
    fn test_compare_mixed() {
        assert_eq!(
            Type::Int.compare(CompareOp::Eq, &Type::Float),
            Type::error("Cannot compare int with float.")
        );
    }

    #[test]
    fn test_logical() {
        assert_eq!(Type::Bool.and(&Type::Bool), Type::Bool);
        assert_eq!(Type::Bool.or(&Type::Bool), Type::Bool);
        assert_eq!(Type::Bool.not(), Type::Bool);
        assert_eq!(
            Type::Int.and(&Type::Bool),
            Type::error("Cannot compute int and bool.")
        );
        assert_eq!(
            Type::Bool.or(&Type::Float),
            Type::error("Cannot compute bool or float.")
        );
        assert_eq!(Type::Int.not(), Type::error("Cannot negate int."));
    }

    #[test]
    fn test_index() {
        let grid = Type::array(3, Type::array(4, Type::Int));
        let row = grid.index(&Type::Int);
        assert_eq!(row, Type::array(4, Type::Int));
        assert_eq!(row.index(&Type::Int), Type::Int);
        assert_eq!(
            grid.index(&Type::Float),
            Type::error("Cannot index array[3,array[4,int]] with float.")
        );
        assert!(Type::Int.index(&Type::Int).is_error());
    }

    #[test]
    fn test_call() {
        let func = Type::func(vec![Type::Int, Type::Bool], Type::Float);
        assert_eq!(func.call(&[Type::Int, Type::Bool]), Type::Float);
        assert_eq!(
            func.call(&[Type::Bool, Type::Int]),
            Type::error("Cannot call func(int, bool):float using TypeList(bool, int).")
        );
        assert!(func.call(&[Type::Int]).is_error());
        assert!(Type::Int.call(&[]).is_error());
    }

    #[test]
    fn test_call_rejects_array_arguments() {
        let array = Type::array(2, Type::Int);
        let func = Type::func(vec![array.clone()], Type::Void);
        assert!(func.call(&[array]).is_error());
    }

    #[test]
    fn test_assign() {
        assert_eq!(Type::Int.assign(&Type::Int), Type::Int);
        assert_eq!(
            Type::Float.assign(&Type::Int),
            Type::error("Cannot assign int to float.")
        );
        let array = Type::array(2, Type::Int);
        assert!(array.assign(&array).is_error());
    }

    #[test]
    fn test_deref() {
        assert_eq!(Type::Float.deref(), Type::Float);
        let array = Type::array(2, Type::Int);
        assert_eq!(array.deref(), array);
        assert!(Type::Void.deref().is_error());
        assert!(Type::func(vec![], Type::Void).deref().is_error());
    }

    #[test]
    fn test_error_operands_cascade() {
        let error = Type::error("inner");
        assert_eq!(
            error.add(&Type::Int),
            Type::error("Cannot add ErrorType(inner) with int.")
        );
        assert!(Type::Int.assign(&error).is_error());
    }
}
