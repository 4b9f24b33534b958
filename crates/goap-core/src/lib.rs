//! Typed world-state, operator tables, and transition semantics for
//! goal-oriented action planning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod compile;
pub mod error;
pub mod model;
pub mod ops;
pub mod state;
pub mod transition;
pub mod value;

pub use compile::{
    CompiledCondition, CompiledEffect, CompiledModel, CompiledTransition, Operand,
};
pub use error::{ArithmeticError, ModelError, Result};
pub use model::{Argument, Condition, Effect, Transition, Variable, VariableValue};
pub use ops::{AssignOp, ComparisonOp};
pub use state::{StateLayout, WorldState};
pub use transition::{condition_holds, fire, goals_satisfied, is_enabled};
pub use value::{Value, ValueType};
