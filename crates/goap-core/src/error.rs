use thiserror::Error;

use crate::value::ValueType;

/// Arithmetic failure while applying an effect.
///
/// Unlike the model-level errors, this does not fail the query: the planner
/// treats the firing as inapplicable and keeps searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("non-finite float result")]
    NonFinite,
}

/// Model-level validation and evaluation failures.
///
/// All of these are detected up front, before the first node expansion,
/// except `Arithmetic` which can only surface while firing an effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("unknown variable '{id}'")]
    UnknownVariable { id: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("operator {op} is not defined for {ty}")]
    UnsupportedOperator { op: String, ty: ValueType },

    #[error("duplicate assignment for variable '{id}'")]
    DuplicateAssignment { id: String },

    #[error("transition '{id}' has invalid cost {cost}")]
    InvalidCost { id: String, cost: f64 },

    #[error("variable '{id}' has invalid weight {weight}")]
    InvalidWeight { id: String, weight: f64 },

    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
