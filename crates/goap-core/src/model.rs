//! Declarative planning model: plain immutable records describing variables,
//! transitions, and goals. Validation happens in [`crate::compile`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ops::{AssignOp, ComparisonOp};
use crate::value::{Value, ValueType};

/// A typed world variable declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    pub id: String,
    pub type_of: ValueType,
    /// Heuristic distance weight, `>= 0`.
    pub weight: f64,
    pub description: Option<String>,
}

impl Variable {
    pub fn new(id: impl Into<String>, type_of: ValueType) -> Self {
        Self {
            id: id.into(),
            type_of,
            weight: 1.0,
            description: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A concrete value bound to a variable id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableValue {
    pub variable_id: String,
    pub value: Value,
}

impl VariableValue {
    pub fn new(variable_id: impl Into<String>, value: Value) -> Self {
        Self {
            variable_id: variable_id.into(),
            value,
        }
    }
}

/// Right-hand side of a condition or effect: a literal, or a reference to
/// another variable resolved against the current state at evaluation time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Argument {
    Literal(Value),
    Variable(String),
}

/// A guard over one variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Condition {
    pub variable_id: String,
    pub operator: ComparisonOp,
    pub argument: Argument,
}

impl Condition {
    pub fn new(variable_id: impl Into<String>, operator: ComparisonOp, argument: Argument) -> Self {
        Self {
            variable_id: variable_id.into(),
            operator,
            argument,
        }
    }
}

/// A functional update of one variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Effect {
    pub variable_id: String,
    pub operator: AssignOp,
    pub argument: Argument,
}

impl Effect {
    pub fn new(variable_id: impl Into<String>, operator: AssignOp, argument: Argument) -> Self {
        Self {
            variable_id: variable_id.into(),
            operator,
            argument,
        }
    }
}

/// A guarded operator: fires only when every condition holds, then applies
/// its effects in list order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transition {
    pub id: String,
    pub conditions: Vec<Condition>,
    pub effects: Vec<Effect>,
    /// Label emitted into the plan; transitions without one still fire but
    /// contribute no action.
    pub action: Option<String>,
    pub cost: f64,
    pub description: Option<String>,
}

impl Transition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            effects: Vec::new(),
            action: None,
            cost: 1.0,
            description: None,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
