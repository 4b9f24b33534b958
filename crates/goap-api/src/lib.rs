//! Thin query surface over the planning engine: wire-shape records in, plain
//! results out.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod query;
pub mod wire;

pub use error::{ApiError, Result};
pub use query::{
    are_goals_satisfied, enabled_transitions, generate_action_plan, generate_action_plan_with,
    single_step,
};
pub use wire::{
    ActionPlanOut, ArgumentIn, ConditionIn, EffectIn, TransitionIn, TypeTag, ValueFields,
    VariableDef, VariableValueIn, VariableValueOut,
};
