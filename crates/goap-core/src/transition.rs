//! Transition enablement, firing, and the goal test.

use crate::compile::{CompiledCondition, CompiledTransition};
use crate::error::ModelError;
use crate::state::WorldState;

/// Whether a single compiled condition holds in `state`.
///
/// Compilation guarantees the operand types agree, so evaluation cannot fail
/// here; a condition only holds when it evaluates to true.
pub fn condition_holds(condition: &CompiledCondition, state: &WorldState) -> bool {
    let lhs = state.get(condition.slot);
    let rhs = condition.operand.resolve(state);
    matches!(condition.operator.evaluate(lhs, rhs), Ok(true))
}

/// Conjunction over the transition's conditions, short-circuiting on the
/// first failure. An empty condition list is trivially enabled.
pub fn is_enabled(transition: &CompiledTransition, state: &WorldState) -> bool {
    transition
        .conditions
        .iter()
        .all(|c| condition_holds(c, state))
}

/// Produce the successor state by applying the effects in list order.
///
/// Effects run against a working copy, so a later effect observes the
/// writes of earlier effects of the same transition. Callers must check
/// [`is_enabled`] first.
pub fn fire(transition: &CompiledTransition, state: &WorldState) -> Result<WorldState, ModelError> {
    debug_assert!(
        is_enabled(transition, state),
        "fired transition '{}' while not enabled",
        transition.id
    );
    let mut working = state.clone();
    for effect in &transition.effects {
        let rhs = effect.operand.resolve(&working).clone();
        let next = effect.operator.apply(working.get(effect.slot), &rhs)?;
        working.set(effect.slot, next);
    }
    Ok(working)
}

/// Conjunction over the goal conditions. An empty goal is trivially
/// satisfied.
pub fn goals_satisfied(goal: &[CompiledCondition], state: &WorldState) -> bool {
    goal.iter().all(|c| condition_holds(c, state))
}
