//! Up-front model validation and operand normalization.
//!
//! Every variable reference, operator/type pair, argument type, cost, and
//! weight is checked here, before the first node expansion. After
//! compilation the only failure left at evaluation time is arithmetic.

use crate::error::ModelError;
use crate::model::{Argument, Condition, Effect, Transition, Variable};
use crate::ops::{AssignOp, ComparisonOp};
use crate::state::{StateLayout, WorldState};
use crate::value::{Value, ValueType};

/// A condition/effect argument resolved to slot-indexed form, so the inner
/// search loop never does string lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Slot(usize),
}

impl Operand {
    pub fn resolve<'a>(&'a self, state: &'a WorldState) -> &'a Value {
        match self {
            Operand::Literal(value) => value,
            Operand::Slot(slot) => state.get(*slot),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    pub slot: usize,
    pub operator: ComparisonOp,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledEffect {
    pub slot: usize,
    pub operator: AssignOp,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTransition {
    pub id: String,
    pub action: Option<String>,
    pub cost: f64,
    pub conditions: Vec<CompiledCondition>,
    pub effects: Vec<CompiledEffect>,
}

/// A fully validated model plus the goal of the current query.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    pub layout: StateLayout,
    pub transitions: Vec<CompiledTransition>,
    pub goal: Vec<CompiledCondition>,
}

impl CompiledModel {
    pub fn new(
        variables: &[Variable],
        transitions: &[Transition],
        goal: &[Condition],
    ) -> Result<Self, ModelError> {
        let layout = StateLayout::new(variables)?;
        let transitions = transitions
            .iter()
            .map(|t| compile_transition(&layout, t))
            .collect::<Result<Vec<_>, _>>()?;
        let goal = goal
            .iter()
            .map(|c| compile_condition(&layout, c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            layout,
            transitions,
            goal,
        })
    }
}

fn compile_argument(
    layout: &StateLayout,
    argument: &Argument,
    expected: ValueType,
) -> Result<Operand, ModelError> {
    match argument {
        Argument::Literal(value) => {
            if value.value_type() != expected {
                return Err(ModelError::TypeMismatch {
                    expected,
                    found: value.value_type(),
                });
            }
            Ok(Operand::Literal(value.clone()))
        }
        Argument::Variable(id) => {
            let slot = layout.slot(id)?;
            if layout.type_of(slot) != expected {
                return Err(ModelError::TypeMismatch {
                    expected,
                    found: layout.type_of(slot),
                });
            }
            Ok(Operand::Slot(slot))
        }
    }
}

fn compile_condition(
    layout: &StateLayout,
    condition: &Condition,
) -> Result<CompiledCondition, ModelError> {
    let slot = layout.slot(&condition.variable_id)?;
    let ty = layout.type_of(slot);
    if !condition.operator.supports(ty) {
        return Err(ModelError::UnsupportedOperator {
            op: condition.operator.id().to_string(),
            ty,
        });
    }
    let operand = compile_argument(layout, &condition.argument, ty)?;
    Ok(CompiledCondition {
        slot,
        operator: condition.operator,
        operand,
    })
}

fn compile_effect(layout: &StateLayout, effect: &Effect) -> Result<CompiledEffect, ModelError> {
    let slot = layout.slot(&effect.variable_id)?;
    let ty = layout.type_of(slot);
    if !effect.operator.supports(ty) {
        return Err(ModelError::UnsupportedOperator {
            op: effect.operator.id().to_string(),
            ty,
        });
    }
    let operand = compile_argument(layout, &effect.argument, ty)?;
    Ok(CompiledEffect {
        slot,
        operator: effect.operator,
        operand,
    })
}

fn compile_transition(
    layout: &StateLayout,
    transition: &Transition,
) -> Result<CompiledTransition, ModelError> {
    if !(transition.cost.is_finite() && transition.cost >= 0.0) {
        return Err(ModelError::InvalidCost {
            id: transition.id.clone(),
            cost: transition.cost,
        });
    }
    let conditions = transition
        .conditions
        .iter()
        .map(|c| compile_condition(layout, c))
        .collect::<Result<Vec<_>, _>>()?;
    let effects = transition
        .effects
        .iter()
        .map(|e| compile_effect(layout, e))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompiledTransition {
        id: transition.id.clone(),
        action: transition.action.clone(),
        cost: transition.cost,
        conditions,
        effects,
    })
}
