#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goap_core::VariableValue;

/// Terminal status of a planning query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PlanStatus {
    Found,
    Unreachable,
    Aborted,
}

/// Ordered action labels plus the transitions that produced them.
///
/// `transitions` lists every fired transition; `actions` is the sub-list of
/// labels from transitions that carry one, in the same order. For
/// `Unreachable` and `Aborted` both lists are empty and the final state
/// echoes the initial state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionPlan {
    pub status: PlanStatus,
    pub actions: Vec<String>,
    pub transitions: Vec<String>,
    pub total_steps: usize,
    pub total_cost: f64,
    /// All variables in canonical (sorted-by-id) order.
    pub initial_state: Vec<VariableValue>,
    pub final_state: Vec<VariableValue>,
    /// Nodes expanded by the search.
    pub expansions: u64,
}
