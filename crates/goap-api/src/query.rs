//! The four query-surface operations.
//!
//! Each query decodes its wire records, validates the whole model up front,
//! and only then touches the engine. Build-state defaults and canonical
//! output order come from the core layout, so every operation shares one
//! code path for them.

use tracing::debug;

use goap_core::{
    fire, goals_satisfied, is_enabled, CompiledModel, ModelError, Transition, Variable,
    VariableValue, WorldState,
};
use goap_planner::{CancelToken, Planner, PlannerConfig};

use crate::error::Result;
use crate::wire::{
    ActionPlanOut, ConditionIn, TransitionIn, VariableDef, VariableValueIn, VariableValueOut,
};

fn compile_model(
    variables: &[VariableDef],
    transitions: &[TransitionIn],
    goals: &[ConditionIn],
) -> Result<CompiledModel> {
    let variables = variables
        .iter()
        .map(VariableDef::to_variable)
        .collect::<Result<Vec<Variable>>>()?;
    let transitions = transitions
        .iter()
        .map(TransitionIn::to_transition)
        .collect::<Result<Vec<Transition>>>()?;
    let goal = goals
        .iter()
        .map(ConditionIn::to_condition)
        .collect::<Result<Vec<_>>>()?;
    Ok(CompiledModel::new(&variables, &transitions, &goal)?)
}

fn build_state(model: &CompiledModel, state: &[VariableValueIn]) -> Result<WorldState> {
    let values = state
        .iter()
        .map(VariableValueIn::to_variable_value)
        .collect::<Result<Vec<VariableValue>>>()?;
    Ok(model.layout.state_from_values(&values)?)
}

fn wire_state(model: &CompiledModel, state: &WorldState) -> Vec<VariableValueOut> {
    model
        .layout
        .values_of(state)
        .iter()
        .map(Into::into)
        .collect()
}

/// Whether `state` already satisfies every goal condition.
pub fn are_goals_satisfied(
    variables: &[VariableDef],
    state: &[VariableValueIn],
    goals: &[ConditionIn],
) -> Result<bool> {
    let model = compile_model(variables, &[], goals)?;
    let state = build_state(&model, state)?;
    Ok(goals_satisfied(&model.goal, &state))
}

/// Fire `transition` once against `state`.
///
/// Returns the full successor state in canonical order, or `None` when the
/// transition is not applicable: either its conditions fail or its effects
/// fail arithmetically.
pub fn single_step(
    variables: &[VariableDef],
    state: &[VariableValueIn],
    transition: &TransitionIn,
) -> Result<Option<Vec<VariableValueOut>>> {
    let model = compile_model(variables, std::slice::from_ref(transition), &[])?;
    let state = build_state(&model, state)?;
    let compiled = &model.transitions[0];
    if !is_enabled(compiled, &state) {
        return Ok(None);
    }
    match fire(compiled, &state) {
        Ok(next) => Ok(Some(wire_state(&model, &next))),
        Err(ModelError::Arithmetic(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Ids of the transitions enabled in `state`, preserving input order.
pub fn enabled_transitions(
    variables: &[VariableDef],
    state: &[VariableValueIn],
    transitions: &[TransitionIn],
) -> Result<Vec<String>> {
    let model = compile_model(variables, transitions, &[])?;
    let state = build_state(&model, state)?;
    Ok(model
        .transitions
        .iter()
        .filter(|t| is_enabled(t, &state))
        .map(|t| t.id.clone())
        .collect())
}

/// Run the planner with the default configuration and no cancellation.
pub fn generate_action_plan(
    variables: &[VariableDef],
    transitions: &[TransitionIn],
    initial_state: &[VariableValueIn],
    goal: &[ConditionIn],
) -> Result<ActionPlanOut> {
    generate_action_plan_with(
        variables,
        transitions,
        initial_state,
        goal,
        PlannerConfig::default(),
        &CancelToken::new(),
    )
}

/// Run the planner with an explicit configuration and cancellation signal.
///
/// Timeouts are the caller's concern: trip the token from a timer and the
/// search aborts at its next expansion.
pub fn generate_action_plan_with(
    variables: &[VariableDef],
    transitions: &[TransitionIn],
    initial_state: &[VariableValueIn],
    goal: &[ConditionIn],
    config: PlannerConfig,
    cancel: &CancelToken,
) -> Result<ActionPlanOut> {
    let model = compile_model(variables, transitions, goal)?;
    let initial = build_state(&model, initial_state)?;
    debug!(
        variables = model.layout.len(),
        transitions = model.transitions.len(),
        "generate_action_plan"
    );
    let planner = Planner::new(model).with_config(config);
    let plan = planner.plan_with_cancel(&initial, cancel);
    Ok(plan.into())
}
