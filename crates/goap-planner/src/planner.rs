use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use tracing::debug;

use goap_core::{
    condition_holds, fire, goals_satisfied, is_enabled, CompiledModel, VariableValue, WorldState,
};

use crate::plan::{ActionPlan, PlanStatus};

/// Cooperative cancellation handle, checked once per node expansion.
///
/// Cloning shares the flag; callers implement timeouts by tripping it from
/// another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Hard bound on node expansions; hitting it aborts the query.
    pub max_expansions: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
        }
    }
}

#[derive(Debug)]
struct OpenNode {
    f: f64,
    g: f64,
    node: usize,
    tie: u64,
}

impl OpenNode {
    /// Min-order: lower f, then higher g (deeper states first), then
    /// insertion order.
    fn order(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| self.tie.cmp(&other.tie))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.order(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.order(self)
    }
}

/// A* planner over a validated model.
///
/// The search is single-threaded and owns all of its bookkeeping, so
/// independent queries can run on separate planners in parallel.
#[derive(Debug, Clone)]
pub struct Planner {
    model: CompiledModel,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(model: CompiledModel) -> Self {
        Self {
            model,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(&self) -> &CompiledModel {
        &self.model
    }

    pub fn plan(&self, initial: &WorldState) -> ActionPlan {
        self.plan_with_cancel(initial, &CancelToken::new())
    }

    pub fn plan_with_cancel(&self, initial: &WorldState, cancel: &CancelToken) -> ActionPlan {
        let start_values = self.model.layout.values_of(initial);

        debug!(
            transitions = self.model.transitions.len(),
            goal_conditions = self.model.goal.len(),
            "planning query"
        );

        // The indicator heuristic is only admissible when no transition can
        // close a goal condition for less than one cost unit.
        let use_indicator = self.model.transitions.iter().all(|t| t.cost >= 1.0);
        let h = |state: &WorldState| -> f64 {
            if !use_indicator {
                return 0.0;
            }
            self.model
                .goal
                .iter()
                .filter(|c| !condition_holds(c, state))
                .map(|c| self.model.layout.weight_of(c.slot).min(1.0))
                .sum()
        };

        // Interned states: node id -> canonical state, best known g, and the
        // edge that reached it.
        let mut states: Vec<WorldState> = vec![initial.clone()];
        let mut ids: HashMap<WorldState, usize> = HashMap::new();
        ids.insert(initial.clone(), 0);
        let mut best_g: Vec<f64> = vec![0.0];
        let mut came_from: Vec<Option<(usize, usize)>> = vec![None];

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;
        open.push(OpenNode {
            f: h(initial),
            g: 0.0,
            node: 0,
            tie,
        });
        tie += 1;

        let mut expansions: u64 = 0;

        while let Some(node) = open.pop() {
            if cancel.is_cancelled() {
                debug!(expansions, "planning cancelled");
                return self.terminal(PlanStatus::Aborted, start_values, expansions);
            }
            expansions += 1;
            if expansions > self.config.max_expansions {
                debug!(expansions, "expansion bound reached");
                return self.terminal(PlanStatus::Aborted, start_values, expansions);
            }

            let state = states[node.node].clone();

            if goals_satisfied(&self.model.goal, &state) {
                return self.reconstruct(
                    node.node,
                    node.g,
                    expansions,
                    &states,
                    &came_from,
                    start_values,
                );
            }

            if node.g != best_g[node.node] {
                continue; // stale heap entry
            }

            for (t_idx, transition) in self.model.transitions.iter().enumerate() {
                if !is_enabled(transition, &state) {
                    continue;
                }
                // After up-front validation only arithmetic can fail a
                // firing; the failure prunes this edge and the search goes
                // on.
                let Ok(next) = fire(transition, &state) else {
                    continue;
                };
                if next == state {
                    continue;
                }

                let next_g = node.g + transition.cost;
                let next_h = h(&next);
                let next_id = match ids.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = states.len();
                        states.push(next.clone());
                        ids.insert(next, id);
                        best_g.push(f64::INFINITY);
                        came_from.push(None);
                        id
                    }
                };

                // Strictly better g only; equal g never re-enqueues, which
                // is what keeps zero-cost cycles finite.
                if next_g >= best_g[next_id] {
                    continue;
                }
                best_g[next_id] = next_g;
                came_from[next_id] = Some((node.node, t_idx));
                open.push(OpenNode {
                    f: next_g + next_h,
                    g: next_g,
                    node: next_id,
                    tie,
                });
                tie += 1;
            }
        }

        debug!(expansions, "goal unreachable");
        self.terminal(PlanStatus::Unreachable, start_values, expansions)
    }

    fn terminal(
        &self,
        status: PlanStatus,
        start_values: Vec<VariableValue>,
        expansions: u64,
    ) -> ActionPlan {
        ActionPlan {
            status,
            actions: Vec::new(),
            transitions: Vec::new(),
            total_steps: 0,
            total_cost: 0.0,
            initial_state: start_values.clone(),
            final_state: start_values,
            expansions,
        }
    }

    fn reconstruct(
        &self,
        goal_node: usize,
        total_cost: f64,
        expansions: u64,
        states: &[WorldState],
        came_from: &[Option<(usize, usize)>],
        start_values: Vec<VariableValue>,
    ) -> ActionPlan {
        let mut edges: Vec<usize> = Vec::new();
        let mut current = goal_node;
        while let Some((prev, t_idx)) = came_from[current] {
            edges.push(t_idx);
            current = prev;
        }
        edges.reverse();

        let transitions: Vec<String> = edges
            .iter()
            .map(|&idx| self.model.transitions[idx].id.clone())
            .collect();
        let actions: Vec<String> = edges
            .iter()
            .filter_map(|&idx| self.model.transitions[idx].action.clone())
            .collect();

        debug!(
            steps = transitions.len(),
            total_cost, expansions, "plan found"
        );

        ActionPlan {
            status: PlanStatus::Found,
            total_steps: transitions.len(),
            total_cost,
            actions,
            transitions,
            initial_state: start_values,
            final_state: self.model.layout.values_of(&states[goal_node]),
            expansions,
        }
    }
}
