//! Dense world-state over a canonical slot layout.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::error::ModelError;
use crate::model::{Variable, VariableValue};
use crate::value::{Value, ValueType};

/// Precomputed variable-id to slot table.
///
/// Slots are assigned in sorted-id order, so slot order doubles as the
/// canonical order for hashing and output.
#[derive(Debug, Clone)]
pub struct StateLayout {
    ids: Vec<String>,
    types: Vec<ValueType>,
    weights: Vec<f64>,
    index: BTreeMap<String, usize>,
}

impl StateLayout {
    pub fn new(variables: &[Variable]) -> Result<Self, ModelError> {
        let mut sorted: Vec<&Variable> = variables.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        let mut ids = Vec::with_capacity(sorted.len());
        let mut types = Vec::with_capacity(sorted.len());
        let mut weights = Vec::with_capacity(sorted.len());
        let mut index = BTreeMap::new();

        for variable in sorted {
            if !(variable.weight.is_finite() && variable.weight >= 0.0) {
                return Err(ModelError::InvalidWeight {
                    id: variable.id.clone(),
                    weight: variable.weight,
                });
            }
            let slot = ids.len();
            if index.insert(variable.id.clone(), slot).is_some() {
                return Err(ModelError::DuplicateAssignment {
                    id: variable.id.clone(),
                });
            }
            ids.push(variable.id.clone());
            types.push(variable.type_of);
            weights.push(variable.weight);
        }

        Ok(Self {
            ids,
            types,
            weights,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn slot(&self, id: &str) -> Result<usize, ModelError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ModelError::UnknownVariable { id: id.to_string() })
    }

    pub fn id_of(&self, slot: usize) -> &str {
        &self.ids[slot]
    }

    pub fn type_of(&self, slot: usize) -> ValueType {
        self.types[slot]
    }

    pub fn weight_of(&self, slot: usize) -> f64 {
        self.weights[slot]
    }

    /// Build a total state from a partial assignment.
    ///
    /// Variables missing from `values` take their type's zero value; a
    /// variable assigned twice is `DuplicateAssignment`.
    pub fn state_from_values(&self, values: &[VariableValue]) -> Result<WorldState, ModelError> {
        let mut cells: Vec<Option<Value>> = vec![None; self.len()];
        for entry in values {
            let slot = self.slot(&entry.variable_id)?;
            if cells[slot].is_some() {
                return Err(ModelError::DuplicateAssignment {
                    id: entry.variable_id.clone(),
                });
            }
            let expected = self.types[slot];
            if entry.value.value_type() != expected {
                return Err(ModelError::TypeMismatch {
                    expected,
                    found: entry.value.value_type(),
                });
            }
            cells[slot] = Some(entry.value.clone());
        }

        let values = cells
            .into_iter()
            .enumerate()
            .map(|(slot, cell)| cell.unwrap_or_else(|| self.types[slot].zero()))
            .collect();
        Ok(WorldState { values })
    }

    /// Canonical (sorted-by-id) view of a state.
    pub fn values_of(&self, state: &WorldState) -> Vec<VariableValue> {
        state
            .values
            .iter()
            .enumerate()
            .map(|(slot, value)| VariableValue::new(self.ids[slot].clone(), value.clone()))
            .collect()
    }
}

/// A total assignment of values to every model variable.
///
/// Value semantics: [`WorldState::with`] returns a new state and leaves the
/// original untouched. Slot order is canonical, so `Hash`/`Eq` act directly
/// on the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldState {
    values: Box<[Value]>,
}

impl WorldState {
    /// Slot access. Out-of-range slots are a programmer error.
    pub fn get(&self, slot: usize) -> &Value {
        &self.values[slot]
    }

    /// Functional update of a single slot.
    pub fn with(&self, slot: usize, value: Value) -> WorldState {
        let mut values = self.values.to_vec();
        values[slot] = value;
        WorldState {
            values: values.into(),
        }
    }

    pub(crate) fn set(&mut self, slot: usize, value: Value) {
        self.values[slot] = value;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Content hash of the canonical form. Two states are behaviorally
    /// indistinguishable iff their canonical forms, and so their identities,
    /// agree.
    pub fn identity(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
