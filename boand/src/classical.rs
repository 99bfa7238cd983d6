//! # Classical planning heuristics
//!
//! A minimal grounded classical (STRIPS, delete-relaxed) task representation
//! and the two admissible heuristics the CLI can select between: `hmax` and
//! `lmcut`. These are external collaborators from the search engine's point
//! of view (see the `ClassicalHeuristic` trait in `heuristics.rs`), but a
//! reference implementation is shipped so the binary is runnable without
//! linking in a separate heuristics library.
//!
//! `hmax` follows the standard fixpoint-over-operators relaxation (the same
//! structure as h-add, with `max` substituted for `sum` over preconditions).
//! `lmcut` is the textbook LM-cut algorithm (Helmert & Domshlak, *Landmarks,
//! Critical Paths and Abstractions*), which reduces to repeatedly extracting
//! a minimum-cost disjunctive action landmark from the hmax-relaxed
//! justification graph.

use crate::cost::{Cost, COST_INFINITY};
use im::HashSet;
use std::collections::HashMap as StdHashMap;

/// A single ground propositional atom, identified by an interned index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

/// A grounded, delete-relaxed-friendly STRIPS operator: a precondition
/// conjunction, a set of atoms it adds, and a cost (unit cost unless the
/// task specifies otherwise).
#[derive(Debug, Clone)]
pub struct ClassicalOp {
    /// Name, kept for diagnostics only.
    pub name: String,
    /// Conjunctive precondition.
    pub pre: Vec<Atom>,
    /// Atoms added by applying this operator (delete effects are ignored,
    /// as is standard for delete-relaxation heuristics).
    pub add: Vec<Atom>,
    /// Operator cost (1 unless the grounded task specifies otherwise).
    pub cost: Cost,
}

/// The grounded classical task `hmax`/`lmcut` are computed over.
#[derive(Debug, Clone)]
pub struct ClassicalTask {
    /// Every grounded operator.
    pub ops: Vec<ClassicalOp>,
    /// The goal condition, as a conjunction of atoms.
    pub goal: Vec<Atom>,
}

/// A state that can be viewed as a set of ground atoms — the representation
/// a `Task::State` must support to be scored by a [`crate::heuristics::ClassicalHeuristic`].
pub trait GroundState {
    /// The atoms holding in this state.
    fn atoms(&self) -> HashSet<Atom>;
}

/// Per-atom hmax cost under delete relaxation, from `state`, by the
/// standard fixpoint: `cost(p) = 0` if `p` holds in `state`, else
/// `cost(p) = min over ops adding p of (max over pre(op) of cost + op.cost)`.
///
/// The h-add fixpoint loop with `max` substituted for `sum` over an
/// operator's preconditions.
pub fn hmax_fact_costs(task: &ClassicalTask, state: &HashSet<Atom>) -> StdHashMap<Atom, Cost> {
    let mut cost: StdHashMap<Atom, Cost> = StdHashMap::new();
    for atom in state.iter() {
        cost.insert(*atom, 0);
    }

    let mut changed = true;
    while changed {
        changed = false;
        for op in task.ops.iter() {
            let pre_cost = op
                .pre
                .iter()
                .map(|a| *cost.get(a).unwrap_or(&COST_INFINITY))
                .max()
                .unwrap_or(0);
            if pre_cost >= COST_INFINITY {
                continue;
            }
            let achieved = crate::cost::add(pre_cost, op.cost);
            for atom in op.add.iter() {
                let current = *cost.get(atom).unwrap_or(&COST_INFINITY);
                if achieved < current {
                    cost.insert(*atom, achieved);
                    changed = true;
                }
            }
        }
    }
    cost
}

/// hmax of the goal conjunction from `state`: the max over goal atoms of
/// their fact cost, or [`COST_INFINITY`] if any goal atom is unreachable.
pub fn hmax_cost(task: &ClassicalTask, state: &HashSet<Atom>) -> Cost {
    let facts = hmax_fact_costs(task, state);
    task.goal
        .iter()
        .map(|a| *facts.get(a).unwrap_or(&COST_INFINITY))
        .max()
        .unwrap_or(0)
}

/// Landmark-cut cost of the goal conjunction from `state`. Admissible and
/// generally at least as informative as [`hmax_cost`].
pub fn lmcut_cost(task: &ClassicalTask, state: &HashSet<Atom>) -> Cost {
    let mut op_costs: Vec<Cost> = task.ops.iter().map(|op| op.cost).collect();
    let mut total: Cost = 0;

    loop {
        let facts = hmax_fact_costs_with_costs(task, state, &op_costs);
        let goal_cost = task
            .goal
            .iter()
            .map(|a| *facts.get(a).unwrap_or(&COST_INFINITY))
            .max()
            .unwrap_or(0);
        if goal_cost >= COST_INFINITY {
            return COST_INFINITY;
        }
        if goal_cost == 0 {
            return total;
        }

        // Precondition choice function: for each operator, the single
        // precondition "responsible" for its hmax cost (the max-cost one).
        let pcf: Vec<Option<Atom>> = task
            .ops
            .iter()
            .map(|op| {
                op.pre
                    .iter()
                    .copied()
                    .max_by_key(|a| *facts.get(a).unwrap_or(&COST_INFINITY))
            })
            .collect();

        // N0: facts reachable with cost 0 through the zero-cost relaxed
        // graph rooted at the current state's own atoms (goal zone is
        // whatever hmax could not drive to zero).
        let mut n0: HashSet<Atom> = state.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for (i, op) in task.ops.iter().enumerate() {
                if op_costs[i] != 0 {
                    continue;
                }
                let supported = match pcf[i] {
                    Some(p) => n0.contains(&p),
                    None => true, // no preconditions: trivially supported
                };
                if supported {
                    for atom in op.add.iter() {
                        if !n0.contains(atom) {
                            n0.insert(*atom);
                            changed = true;
                        }
                    }
                }
            }
        }

        // Cut: zero-or-more operators crossing from N0 to outside N0 whose
        // precondition-choice atom lies in N0.
        let mut cut_costs: Vec<Cost> = Vec::new();
        let mut cut_idx: Vec<usize> = Vec::new();
        for (i, op) in task.ops.iter().enumerate() {
            let supported = match pcf[i] {
                Some(p) => n0.contains(&p),
                None => true,
            };
            if !supported {
                continue;
            }
            if op.add.iter().any(|a| !n0.contains(a)) {
                cut_costs.push(op_costs[i]);
                cut_idx.push(i);
            }
        }

        if cut_idx.is_empty() {
            // No crossing operator but the goal is still unreached: the
            // delete-relaxed problem is unsolvable from this state.
            return COST_INFINITY;
        }

        let landmark_cost = *cut_costs.iter().min().expect("cut is non-empty");
        total = crate::cost::add(total, landmark_cost);
        for i in cut_idx {
            op_costs[i] -= landmark_cost;
        }
    }
}

fn hmax_fact_costs_with_costs(
    task: &ClassicalTask,
    state: &HashSet<Atom>,
    op_costs: &[Cost],
) -> StdHashMap<Atom, Cost> {
    let mut cost: StdHashMap<Atom, Cost> = StdHashMap::new();
    for atom in state.iter() {
        cost.insert(*atom, 0);
    }
    let mut changed = true;
    while changed {
        changed = false;
        for (i, op) in task.ops.iter().enumerate() {
            let pre_cost = op
                .pre
                .iter()
                .map(|a| *cost.get(a).unwrap_or(&COST_INFINITY))
                .max()
                .unwrap_or(0);
            if pre_cost >= COST_INFINITY {
                continue;
            }
            let achieved = crate::cost::add(pre_cost, op_costs[i]);
            for atom in op.add.iter() {
                let current = *cost.get(atom).unwrap_or(&COST_INFINITY);
                if achieved < current {
                    cost.insert(*atom, achieved);
                    changed = true;
                }
            }
        }
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(i: u32) -> Atom {
        Atom(i)
    }

    /// a -> b -> goal, each op cost 1.
    fn chain_task() -> ClassicalTask {
        ClassicalTask {
            ops: vec![
                ClassicalOp { name: "a_to_b".into(), pre: vec![atom(0)], add: vec![atom(1)], cost: 1 },
                ClassicalOp { name: "b_to_goal".into(), pre: vec![atom(1)], add: vec![atom(2)], cost: 1 },
            ],
            goal: vec![atom(2)],
        }
    }

    #[test]
    fn hmax_counts_chain_length() {
        let task = chain_task();
        let mut state = HashSet::new();
        state.insert(atom(0));
        assert_eq!(hmax_cost(&task, &state), 2);
    }

    #[test]
    fn hmax_is_zero_at_goal() {
        let task = chain_task();
        let mut state = HashSet::new();
        state.insert(atom(2));
        assert_eq!(hmax_cost(&task, &state), 0);
    }

    #[test]
    fn hmax_is_infinite_when_unreachable() {
        let task = chain_task();
        let state: HashSet<Atom> = HashSet::new();
        assert_eq!(hmax_cost(&task, &state), COST_INFINITY);
    }

    #[test]
    fn lmcut_matches_hmax_on_a_simple_chain() {
        // On a task with no fork, lmcut and hmax agree (both equal the
        // optimal delete-relaxed plan length, which here is also the real
        // plan length).
        let task = chain_task();
        let mut state = HashSet::new();
        state.insert(atom(0));
        assert_eq!(lmcut_cost(&task, &state), 2);
    }

    #[test]
    fn lmcut_is_admissible_on_two_independent_subgoals() {
        // Two independent chains of length 2 each must both be achieved;
        // hmax (max-based) would under-count this as 2, lmcut should find
        // the true cost of 4 since both landmarks get cut out separately.
        let task = ClassicalTask {
            ops: vec![
                ClassicalOp { name: "a1".into(), pre: vec![atom(0)], add: vec![atom(1)], cost: 1 },
                ClassicalOp { name: "a2".into(), pre: vec![atom(1)], add: vec![atom(2)], cost: 1 },
                ClassicalOp { name: "b1".into(), pre: vec![atom(0)], add: vec![atom(3)], cost: 1 },
                ClassicalOp { name: "b2".into(), pre: vec![atom(3)], add: vec![atom(4)], cost: 1 },
            ],
            goal: vec![atom(2), atom(4)],
        };
        let mut state = HashSet::new();
        state.insert(atom(0));
        assert_eq!(hmax_cost(&task, &state), 2);
        assert_eq!(lmcut_cost(&task, &state), 4);
    }
}
