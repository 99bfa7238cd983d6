//! # Policy
//!
//! The partial-policy data model: the `strategy` mapping, the `pending` and
//! `goal_states` sets, the best/worst ancestor maps that let `best_g`/
//! `worst_g` be read off in O(depth), and the cycle-aware reconvergence pass
//! that restores them whenever a policy extension merges two paths.
//!
//! Extension never mutates a policy in place (§5): [`Policy::extend`]
//! returns a fresh value. `strategy`/`pending`/`goal_states`/the ancestor
//! maps are `im` persistent collections so siblings and parents share
//! structure instead of being deep-copied on every expansion, per the
//! design notes' recommendation.

use crate::cost::{Cost, CYCLE_COST};
use crate::task::{Operator, Task};
use im::{HashMap, HashSet, Vector};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// The non-deterministic action assigned to a state, together with the full
/// set of deterministic outcomes the determinizer grouped under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Name of the non-deterministic action (outcome suffix already stripped).
    pub action: String,
    /// Every deterministic operator that is an outcome of `action` at the
    /// state this assignment belongs to.
    pub operators: HashSet<Operator>,
}

/// A partial policy: a mapping from some reachable states to actions, plus
/// the bookkeeping needed to maintain best-case/worst-case g-values under
/// extension and to detect cycles.
#[derive(Debug, Clone)]
pub struct Policy<S: Clone + Eq + Hash + Debug> {
    initial: S,
    /// States with an action already assigned.
    pub strategy: HashMap<S, Assignment>,
    /// Reachable states with no action assigned yet, not goals.
    pub pending: HashSet<S>,
    /// Reachable goal states.
    pub goal_states: HashSet<S>,
    best_ancestors: HashMap<S, S>,
    worst_ancestors: HashMap<S, S>,
    /// True iff the policy graph contains a cycle.
    pub cyclic: bool,
    /// States that sit on some detected cycle. A state's dummy self-ancestor
    /// entry (every state starts pointing at itself before `reconverge` ever
    /// runs) is indistinguishable from a genuine self-loop by walking
    /// `worst_ancestors` alone, so this set is what `worst_g` actually
    /// consults to tell the two apart.
    loopy: HashSet<S>,
}

impl<S: Clone + Eq + Hash + Debug> Policy<S> {
    /// The empty policy: `pending = {initial_state}`, no action assigned
    /// anywhere, dummy ancestor entries for the initial state.
    pub fn empty(initial: S) -> Self {
        let mut pending = HashSet::new();
        pending.insert(initial.clone());
        let mut best_ancestors = HashMap::new();
        best_ancestors.insert(initial.clone(), initial.clone());
        let mut worst_ancestors = HashMap::new();
        worst_ancestors.insert(initial.clone(), initial.clone());
        Self {
            initial,
            strategy: HashMap::new(),
            pending,
            goal_states: HashSet::new(),
            best_ancestors,
            worst_ancestors,
            cyclic: false,
            loopy: HashSet::new(),
        }
    }

    /// The task's initial state.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// `pending = ∅`: no state remains to be assigned an action.
    pub fn is_closed(&self) -> bool {
        self.pending.is_empty()
    }

    /// Closed, and every reachable state under `strategy` can reach a goal:
    /// no leaf of the policy graph is a non-goal dead end, and no cycle is a
    /// permanent deadlock (a cycle is fine as long as it has an exit branch
    /// reaching a goal, which the caller establishes via the worst-case
    /// heuristic's deadlock rule before ever admitting a closed policy).
    pub fn is_proper(&self, task: &impl Task<State = S>) -> bool {
        if !self.is_closed() {
            return false;
        }
        // With pending empty, the only possible leaves of the policy graph
        // are goal states. Every assigned state's successors under its
        // chosen action must land on a goal or another assigned state.
        for (state, assignment) in self.strategy.iter() {
            for succ in reached_states(task, state, &assignment.action) {
                if !self.goal_states.contains(&succ) && !self.strategy.contains_key(&succ) {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the chain `s -> best_ancestors[s] -> ... -> initial`.
    /// Zero at the initial state.
    pub fn best_g(&self, s: &S) -> Cost {
        self.chain_length(s, &self.best_ancestors)
    }

    /// Length of the chain via `worst_ancestors`, or [`CYCLE_COST`] if `s` is
    /// on or downstream of a cycle. Membership in `loopy` is checked before
    /// the initial-state terminal check at every step, including the first:
    /// otherwise a state whose own self-ancestor entry is a genuine cycle
    /// (the initial state looping back to itself) would be indistinguishable
    /// from the ordinary, untouched dummy entry every fresh policy starts
    /// with, and would wrongly terminate at zero hops instead of reporting
    /// the cycle.
    pub fn worst_g(&self, s: &S) -> Cost {
        let mut cur = s.clone();
        let mut seen = Vector::new();
        loop {
            if self.loopy.contains(&cur) || seen.iter().any(|v: &S| v == &cur) {
                return CYCLE_COST;
            }
            if cur == self.initial {
                return seen.len() as Cost;
            }
            seen.push_back(cur.clone());
            cur = self
                .worst_ancestors
                .get(&cur)
                .cloned()
                .expect("missing worst-ancestor entry: invariant violation");
        }
    }

    fn chain_length(&self, s: &S, ancestors: &HashMap<S, S>) -> Cost {
        let mut cur = s.clone();
        let mut steps: Cost = 0;
        let bound = ancestors.len() as Cost + 1;
        loop {
            if cur == self.initial {
                return steps;
            }
            cur = ancestors
                .get(&cur)
                .cloned()
                .expect("missing ancestor entry: invariant violation");
            steps += 1;
            if steps > bound {
                // An acyclic tree of ancestors can never need more hops than
                // it has entries; this would mean the tree assumption (I3)
                // was violated without going through reconverge().
                panic!("best-ancestor chain did not terminate: invariant violation");
            }
        }
    }

    /// Extend this policy by assigning `action` (identified by its
    /// non-deterministic name, with its deterministic outcome set
    /// `operators`) to `state`, reaching the successor set `reached`.
    ///
    /// Returns a fresh policy satisfying the extension law of the data
    /// model: `strategy' = strategy ∪ {state ↦ action}`, `pending'` and
    /// `goal_states'` updated from `reached` via `task`, and the g-value
    /// engine incrementally (or, on a merge, fully) updated.
    pub fn extend(
        &self,
        task: &impl Task<State = S>,
        state: &S,
        action: String,
        operators: HashSet<Operator>,
        reached: &HashSet<S>,
    ) -> Policy<S> {
        let mut next = self.clone();
        next.pending.remove(state);
        next.strategy.insert(state.clone(), Assignment { action, operators });

        let mut all_new = true;
        for r in reached.iter() {
            if !next.best_ancestors.contains_key(r) {
                next.best_ancestors.insert(r.clone(), state.clone());
                next.worst_ancestors.insert(r.clone(), state.clone());
            } else {
                all_new = false;
            }
        }
        if !all_new {
            next.reconverge(task);
        }

        for r in reached.iter() {
            if task.goal_reached(r) {
                next.goal_states.insert(r.clone());
            } else if !next.strategy.contains_key(r) {
                next.pending.insert(r.clone());
            }
        }

        next
    }

    /// Brute-force enumeration of every trajectory from the initial state
    /// forward under `strategy`, relaxing best/worst ancestors and
    /// detecting cycles. This is the only sound way to restore I4/I5 once a
    /// policy extension has merged two previously distinct paths into the
    /// same state (the cheap all-new-successors path in [`Policy::extend`]
    /// preserves the tree assumption; this does not).
    fn reconverge(&mut self, task: &impl Task<State = S>) {
        let mut frontier: VecDeque<(S, Vector<S>)> = VecDeque::new();
        frontier.push_back((self.initial.clone(), Vector::new()));

        let mut cycles: Vec<Vector<S>> = Vec::new();

        while let Some((state, path)) = frontier.pop_front() {
            let assignment = match self.strategy.get(&state) {
                Some(a) => a.clone(),
                None => continue, // leaf: completed trajectory
            };
            let reached = reached_states(task, &state, &assignment.action);
            for r in reached {
                if let Some(idx) = path.iter().position(|v| v == &r) {
                    let mut cycle: Vector<S> = path.clone().slice(idx..);
                    cycle.push_back(state.clone());
                    cycles.push(cycle);
                    continue;
                }
                let cur_worst_anchor = self.worst_ancestors.get(&r).cloned();
                if let Some(anchor) = &cur_worst_anchor {
                    if self.worst_g(&state) > self.worst_g(anchor) {
                        self.worst_ancestors.insert(r.clone(), state.clone());
                    }
                }
                let cur_best_anchor = self.best_ancestors.get(&r).cloned();
                if let Some(anchor) = &cur_best_anchor {
                    if self.best_g(&state) < self.best_g(anchor) {
                        self.best_ancestors.insert(r.clone(), state.clone());
                    }
                }
                let mut extended = path.clone();
                extended.push_back(state.clone());
                frontier.push_back((r, extended));
            }
        }

        let mut loopy: HashSet<S> = HashSet::new();
        for cycle in cycles.iter() {
            for s in cycle.iter() {
                loopy.insert(s.clone());
            }
        }

        let mut extended_loopy: HashSet<S> = HashSet::new();
        for cycle in cycles.iter() {
            for state in cycle.iter() {
                let assignment = match self.strategy.get(state) {
                    Some(a) => a.clone(),
                    None => continue,
                };
                let reached = reached_states(task, state, &assignment.action);
                for r in reached {
                    if !loopy.contains(&r) {
                        extended_loopy.insert(r.clone());
                    }
                    self.worst_ancestors.insert(r, state.clone());
                }
            }
        }

        let mut already_seen: HashSet<S> = HashSet::new();
        let mut to_visit: Vec<S> = extended_loopy.into_iter().collect();
        while let Some(state) = to_visit.pop() {
            if already_seen.contains(&state) {
                continue;
            }
            if let Some(assignment) = self.strategy.get(&state).cloned() {
                let reached = reached_states(task, &state, &assignment.action);
                for r in reached {
                    self.worst_ancestors.insert(r.clone(), state.clone());
                    if !already_seen.contains(&r) {
                        to_visit.push(r);
                    }
                }
            }
            already_seen.insert(state);
        }

        // reconverge() walks the full graph reachable under the current
        // strategy, so this recomputes every cycle still standing, not just
        // ones newly introduced by this extension.
        self.loopy = loopy;
        if !self.loopy.is_empty() {
            self.cyclic = true;
        }
    }
}

/// All successor states reachable from `state` via an operator belonging to
/// `action`.
fn reached_states<S: Clone + Eq + Hash + Debug>(
    task: &impl Task<State = S>,
    state: &S,
    action: &str,
) -> HashSet<S> {
    let mut out = HashSet::new();
    for (op, succ) in task.successor_states(state) {
        if op.nondet_action_name() == action {
            out.insert(succ);
        }
    }
    out
}
