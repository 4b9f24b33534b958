//! Deterministic A* planning over typed world-states.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod plan;
pub mod planner;

pub use plan::{ActionPlan, PlanStatus};
pub use planner::{CancelToken, Planner, PlannerConfig};
