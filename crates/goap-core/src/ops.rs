//! Fixed registries of comparison and assignment operators.
//!
//! Dispatch is two-level: operator id first, operand type second. A pair
//! outside the table is `UnsupportedOperator`; both registries require the
//! two operands to carry the same tag before dispatching.

use core::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ArithmeticError, ModelError};
use crate::value::{Value, ValueType};

/// Comparison operators usable in conditions and goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl ComparisonOp {
    /// Look up an operator by its registry id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "EQ" => Some(Self::Eq),
            "NE" => Some(Self::Ne),
            "LT" => Some(Self::Lt),
            "LE" => Some(Self::Le),
            "GT" => Some(Self::Gt),
            "GE" => Some(Self::Ge),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Whether this operator is registered for operands of `ty`.
    pub fn supports(self, ty: ValueType) -> bool {
        match self {
            Self::Eq | Self::Ne => true,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => {
                matches!(ty, ValueType::Int | ValueType::Float | ValueType::Str)
            }
            Self::And | Self::Or => matches!(ty, ValueType::Bool),
        }
    }

    /// Evaluate against two operands of the same type.
    pub fn evaluate(self, lhs: &Value, rhs: &Value) -> Result<bool, ModelError> {
        let ty = lhs.value_type();
        if rhs.value_type() != ty {
            return Err(ModelError::TypeMismatch {
                expected: ty,
                found: rhs.value_type(),
            });
        }
        if !self.supports(ty) {
            return Err(ModelError::UnsupportedOperator {
                op: self.id().to_string(),
                ty,
            });
        }
        match (self, lhs, rhs) {
            (Self::Eq, a, b) => Ok(a == b),
            (Self::Ne, a, b) => Ok(a != b),
            (Self::And, Value::Bool(a), Value::Bool(b)) => Ok(*a && *b),
            (Self::Or, Value::Bool(a), Value::Bool(b)) => Ok(*a || *b),
            (Self::Lt, a, b) => Ok(a.compare(b)? == Ordering::Less),
            (Self::Le, a, b) => Ok(a.compare(b)? != Ordering::Greater),
            (Self::Gt, a, b) => Ok(a.compare(b)? == Ordering::Greater),
            (Self::Ge, a, b) => Ok(a.compare(b)? != Ordering::Less),
            _ => Err(ModelError::UnsupportedOperator {
                op: self.id().to_string(),
                ty,
            }),
        }
    }
}

/// Assignment operators usable in effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Concat,
}

impl AssignOp {
    /// Look up an operator by its registry id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "SET" => Some(Self::Set),
            "ADD" => Some(Self::Add),
            "SUB" => Some(Self::Sub),
            "MUL" => Some(Self::Mul),
            "DIV" => Some(Self::Div),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "XOR" => Some(Self::Xor),
            "CONCAT" => Some(Self::Concat),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Concat => "CONCAT",
        }
    }

    /// Whether this operator is registered for operands of `ty`.
    pub fn supports(self, ty: ValueType) -> bool {
        match self {
            Self::Set => true,
            Self::Add | Self::Sub | Self::Mul | Self::Div => {
                matches!(ty, ValueType::Int | ValueType::Float)
            }
            Self::And | Self::Or | Self::Xor => matches!(ty, ValueType::Bool),
            Self::Concat => matches!(ty, ValueType::Str),
        }
    }

    /// Compute the new value from the prior value and the argument.
    ///
    /// Division by zero, integer overflow, and non-finite float results all
    /// raise `Arithmetic`, which prunes the firing instead of failing the
    /// whole query.
    pub fn apply(self, prior: &Value, arg: &Value) -> Result<Value, ModelError> {
        let ty = prior.value_type();
        if arg.value_type() != ty {
            return Err(ModelError::TypeMismatch {
                expected: ty,
                found: arg.value_type(),
            });
        }
        match (self, prior, arg) {
            (Self::Set, _, v) => Ok(v.clone()),
            (Self::Add, Value::Int(a), Value::Int(b)) => checked(a.checked_add(*b)),
            (Self::Sub, Value::Int(a), Value::Int(b)) => checked(a.checked_sub(*b)),
            (Self::Mul, Value::Int(a), Value::Int(b)) => checked(a.checked_mul(*b)),
            (Self::Div, Value::Int(a), Value::Int(b)) => {
                if *b == 0 {
                    Err(ArithmeticError::DivisionByZero.into())
                } else {
                    checked(a.checked_div(*b))
                }
            }
            (Self::Add, Value::Float(a), Value::Float(b)) => finite(a + b),
            (Self::Sub, Value::Float(a), Value::Float(b)) => finite(a - b),
            (Self::Mul, Value::Float(a), Value::Float(b)) => finite(a * b),
            (Self::Div, Value::Float(a), Value::Float(b)) => {
                if *b == 0.0 {
                    Err(ArithmeticError::DivisionByZero.into())
                } else {
                    finite(a / b)
                }
            }
            (Self::And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a & b)),
            (Self::Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a | b)),
            (Self::Xor, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a ^ b)),
            (Self::Concat, Value::Str(a), Value::Str(b)) => {
                let mut out = String::with_capacity(a.len() + b.len());
                out.push_str(a);
                out.push_str(b);
                Ok(Value::Str(out))
            }
            _ => Err(ModelError::UnsupportedOperator {
                op: self.id().to_string(),
                ty,
            }),
        }
    }
}

fn checked(result: Option<i64>) -> Result<Value, ModelError> {
    result
        .map(Value::Int)
        .ok_or_else(|| ArithmeticError::Overflow.into())
}

fn finite(result: f64) -> Result<Value, ModelError> {
    if result.is_finite() {
        Ok(Value::Float(result))
    } else {
        Err(ArithmeticError::NonFinite.into())
    }
}
