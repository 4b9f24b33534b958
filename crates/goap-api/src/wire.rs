//! Wire-shape records for the query surface.
//!
//! Literal values travel as a record with exactly one of the four typed
//! fields set; the engine's tagged [`Value`] only exists on the inside of
//! this boundary. Conversion enforces the presence rules, so a decoded
//! record can still be rejected here with a schema or malformed-value
//! failure.

use serde::{Deserialize, Serialize};

use goap_core::{
    Argument, AssignOp, ComparisonOp, Condition, Effect, Transition, Value, ValueType, Variable,
    VariableValue,
};
use goap_planner::{ActionPlan, PlanStatus};

use crate::error::ApiError;

/// Type tag as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeTag {
    String,
    Int,
    Float,
    Boolean,
}

impl From<TypeTag> for ValueType {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::String => ValueType::Str,
            TypeTag::Int => ValueType::Int,
            TypeTag::Float => ValueType::Float,
            TypeTag::Boolean => ValueType::Bool,
        }
    }
}

/// The four-nullable-field literal record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueFields {
    #[serde(rename = "STRING", default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(rename = "INT", default, skip_serializing_if = "Option::is_none")]
    pub int: Option<i64>,
    #[serde(rename = "FLOAT", default, skip_serializing_if = "Option::is_none")]
    pub float: Option<f64>,
    #[serde(rename = "BOOLEAN", default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

impl ValueFields {
    pub fn from_value(value: &Value) -> Self {
        let mut fields = Self::default();
        match value {
            Value::Str(s) => fields.string = Some(s.clone()),
            Value::Int(i) => fields.int = Some(*i),
            Value::Float(f) => fields.float = Some(*f),
            Value::Bool(b) => fields.boolean = Some(*b),
        }
        fields
    }

    fn set_count(&self) -> usize {
        usize::from(self.string.is_some())
            + usize::from(self.int.is_some())
            + usize::from(self.float.is_some())
            + usize::from(self.boolean.is_some())
    }

    /// Exactly-one-field rule of the wire format.
    pub fn parse(&self, context: &str) -> Result<Value, ApiError> {
        if self.set_count() != 1 {
            return Err(ApiError::MalformedValue {
                context: context.to_string(),
            });
        }
        if let Some(s) = &self.string {
            Ok(Value::Str(s.clone()))
        } else if let Some(i) = self.int {
            Ok(Value::Int(i))
        } else if let Some(f) = self.float {
            Ok(Value::Float(f))
        } else {
            // set_count == 1, so boolean must be present.
            Ok(Value::Bool(self.boolean.unwrap_or_default()))
        }
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::Schema {
        field: field.to_string(),
    }
}

/// Variable declaration input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableDef {
    pub id: Option<String>,
    pub type_of: Option<TypeTag>,
    pub weight: Option<f64>,
    pub description: Option<String>,
}

impl VariableDef {
    pub fn to_variable(&self) -> Result<Variable, ApiError> {
        let id = self.id.clone().ok_or_else(|| missing("id"))?;
        let type_of = self.type_of.ok_or_else(|| missing("typeOf"))?;
        Ok(Variable {
            id,
            type_of: type_of.into(),
            weight: self.weight.unwrap_or(1.0),
            description: self.description.clone(),
        })
    }
}

/// State entry input: a variable id plus exactly one typed field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableValueIn {
    pub variable_id: Option<String>,
    #[serde(flatten)]
    pub value: ValueFields,
}

impl VariableValueIn {
    pub fn to_variable_value(&self) -> Result<VariableValue, ApiError> {
        let id = self.variable_id.clone().ok_or_else(|| missing("variableId"))?;
        let value = self.value.parse(&id)?;
        Ok(VariableValue::new(id, value))
    }
}

/// Literal-or-reference argument input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArgumentIn {
    pub variable_id: Option<String>,
    #[serde(flatten)]
    pub value: ValueFields,
}

impl ArgumentIn {
    pub fn to_argument(&self, context: &str) -> Result<Argument, ApiError> {
        match (&self.variable_id, self.value.set_count()) {
            (Some(id), 0) => Ok(Argument::Variable(id.clone())),
            // No reference: the literal-field-count rule applies on its own,
            // so several set fields surface as MalformedValue.
            (None, n) if n >= 1 => Ok(Argument::Literal(self.value.parse(context)?)),
            // Neither form, or both at once.
            _ => Err(ApiError::MalformedArgument {
                context: context.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionIn {
    pub variable_id: Option<String>,
    pub comparison_operator: Option<String>,
    pub argument: Option<ArgumentIn>,
}

impl ConditionIn {
    pub fn to_condition(&self) -> Result<Condition, ApiError> {
        let variable_id = self.variable_id.clone().ok_or_else(|| missing("variableId"))?;
        let op_id = self
            .comparison_operator
            .clone()
            .ok_or_else(|| missing("comparisonOperator"))?;
        let operator = ComparisonOp::from_id(&op_id)
            .ok_or_else(|| ApiError::UnsupportedOperator { op: op_id })?;
        let argument = self
            .argument
            .as_ref()
            .ok_or_else(|| missing("argument"))?
            .to_argument(&variable_id)?;
        Ok(Condition {
            variable_id,
            operator,
            argument,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectIn {
    pub variable_id: Option<String>,
    pub assignment_operator: Option<String>,
    pub argument: Option<ArgumentIn>,
}

impl EffectIn {
    pub fn to_effect(&self) -> Result<Effect, ApiError> {
        let variable_id = self.variable_id.clone().ok_or_else(|| missing("variableId"))?;
        let op_id = self
            .assignment_operator
            .clone()
            .ok_or_else(|| missing("assignmentOperator"))?;
        let operator = AssignOp::from_id(&op_id)
            .ok_or_else(|| ApiError::UnsupportedOperator { op: op_id })?;
        let argument = self
            .argument
            .as_ref()
            .ok_or_else(|| missing("argument"))?
            .to_argument(&variable_id)?;
        Ok(Effect {
            variable_id,
            operator,
            argument,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionIn {
    pub id: Option<String>,
    pub conditions: Vec<ConditionIn>,
    pub effects: Vec<EffectIn>,
    pub action: Option<String>,
    pub cost: Option<f64>,
    pub description: Option<String>,
}

impl TransitionIn {
    pub fn to_transition(&self) -> Result<Transition, ApiError> {
        let id = self.id.clone().ok_or_else(|| missing("id"))?;
        let cost = self.cost.ok_or_else(|| missing("cost"))?;
        let conditions = self
            .conditions
            .iter()
            .map(ConditionIn::to_condition)
            .collect::<Result<Vec<_>, _>>()?;
        let effects = self
            .effects
            .iter()
            .map(EffectIn::to_effect)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Transition {
            id,
            conditions,
            effects,
            action: self.action.clone(),
            cost,
            description: self.description.clone(),
        })
    }
}

/// State entry on the way out: variable id plus its single typed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableValueOut {
    pub variable_id: String,
    #[serde(flatten)]
    pub value: ValueFields,
}

impl From<&VariableValue> for VariableValueOut {
    fn from(entry: &VariableValue) -> Self {
        Self {
            variable_id: entry.variable_id.clone(),
            value: ValueFields::from_value(&entry.value),
        }
    }
}

/// Plan response in wire form. States list every variable in canonical
/// sorted-by-id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanOut {
    pub status: PlanStatus,
    pub actions: Vec<String>,
    pub transitions: Vec<String>,
    pub total_steps: usize,
    pub total_cost: f64,
    pub initial_state: Vec<VariableValueOut>,
    pub final_state: Vec<VariableValueOut>,
    pub expansions: u64,
}

impl From<ActionPlan> for ActionPlanOut {
    fn from(plan: ActionPlan) -> Self {
        Self {
            status: plan.status,
            actions: plan.actions,
            transitions: plan.transitions,
            total_steps: plan.total_steps,
            total_cost: plan.total_cost,
            initial_state: plan.initial_state.iter().map(Into::into).collect(),
            final_state: plan.final_state.iter().map(Into::into).collect(),
            expansions: plan.expansions,
        }
    }
}
