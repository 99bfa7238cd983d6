//! # Search engine
//!
//! Priority-queued best-first expansion of partial policies: push the empty
//! policy, repeatedly pop the minimum-key policy, Pareto-prune against the
//! incumbent bound, emit closed-and-proper policies to the frontier,
//! otherwise expand one pending state into one child policy per
//! non-deterministic action.
//!
//! No file I/O happens here (that is `boand_main`'s job, via [`ResultSink`]):
//! this runs a search to completion and hands results back to its caller
//! rather than writing files itself.

use crate::comparator::{Comparator, OpenList};
use crate::cost::{Cost, COST_INFINITY};
use crate::heuristics::{BestCaseHeuristic, ClassicalHeuristic, SizeHeuristic, WorstCaseHeuristic};
use crate::policy::Policy;
use crate::selector::Selector;
use crate::task::Task;
use im::HashMap as ImHashMap;
use im::HashSet as ImHashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Running counters for a search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub iterations: u64,
    pub expansions: u64,
    pub generations: u64,
    pub max_open: usize,
}

/// Receives every closed-and-proper policy the search admits to the Pareto
/// frontier, in the order the search discovers them (non-decreasing
/// `f_best`/`f_worst` under the comparator in use). Implemented by
/// `boand_main` to stream solutions to disk as they are found, so the
/// library crate itself performs no I/O.
pub trait ResultSink<S: Clone + Eq + Hash + Debug> {
    /// A policy was admitted to the frontier, with its `(f_best, f_worst,
    /// f_size)` scores — always in this canonical order, independent of
    /// whichever [`crate::comparator::Comparator`] the run used to order the
    /// open list — and the stats snapshot at the moment of admission.
    fn on_admitted(&mut self, policy: &Policy<S>, scores: (Cost, Cost, Cost), stats: &SearchStats);
}

/// A [`ResultSink`] that records every admitted policy and returns them at
/// the end, for callers (and tests) that just want the final frontier.
#[derive(Default)]
pub struct CollectingSink<S: Clone + Eq + Hash + Debug> {
    pub frontier: Vec<Policy<S>>,
}

impl<S: Clone + Eq + Hash + Debug> CollectingSink<S> {
    pub fn new() -> Self {
        Self { frontier: Vec::new() }
    }
}

impl<S: Clone + Eq + Hash + Debug> ResultSink<S> for CollectingSink<S> {
    fn on_admitted(&mut self, policy: &Policy<S>, _scores: (Cost, Cost, Cost), _stats: &SearchStats) {
        self.frontier.push(policy.clone());
    }
}

/// The fixed combination of heuristics, selector and comparator a search
/// run uses. One value is constructed per run from CLI options and held for
/// its lifetime, per the design notes' "dispatched once at construction".
pub struct SearchEngine<H> {
    pub comparator: Comparator,
    pub selector: Selector,
    pub best_case: BestCaseHeuristic,
    pub worst_case: WorstCaseHeuristic,
    pub size: SizeHeuristic,
    pub classical: H,
}

impl<H> SearchEngine<H> {
    pub fn new(
        comparator: Comparator,
        selector: Selector,
        best_case: BestCaseHeuristic,
        worst_case: WorstCaseHeuristic,
        size: SizeHeuristic,
        classical: H,
    ) -> Self {
        Self { comparator, selector, best_case, worst_case, size, classical }
    }

    /// Run the search to exhaustion against `task`, streaming admitted
    /// policies to `sink`. Returns the final stats snapshot.
    pub fn run<S, T, R>(&self, task: &T, sink: &mut R) -> SearchStats
    where
        S: Clone + Eq + Hash + Debug,
        T: Task<State = S>,
        H: ClassicalHeuristic<S>,
        R: ResultSink<S>,
    {
        let mut stats = SearchStats::default();
        let mut open: OpenList<S> = OpenList::new();
        let empty = Policy::empty(task.initial_state());
        open.push(self.comparator, 0, 0, 0, empty);

        let mut beta_best: Cost = COST_INFINITY;
        let mut beta_worst: Cost = COST_INFINITY;

        while let Some((key, policy)) = open.pop_min() {
            stats.iterations += 1;

            if key.0 >= beta_best && key.1 >= beta_worst {
                continue;
            }

            if policy.is_closed() {
                if policy.is_proper(task) {
                    beta_best = key.0;
                    beta_worst = key.1;
                    // Recomputed fresh, not read off `key`: `key` is
                    // comparator-permuted (and, under `Comparator::Best`/
                    // `Worst`, has its second component zeroed), so it is
                    // not safe to hand to a sink expecting (f_best, f_worst,
                    // f_size) in that canonical order.
                    let f_best = self.best_case.value(&policy, &self.classical);
                    let f_worst = self.worst_case.value(&policy, &self.classical);
                    let f_size = self.size.value(&policy, &self.classical);
                    sink.on_admitted(&policy, (f_best, f_worst, f_size), &stats);
                }
                continue;
            }

            stats.expansions += 1;
            let s = self.selector.select(&policy, &self.classical);
            for (action, operators, reached) in group_successors(task, &s) {
                let child = policy.extend(task, &s, action, operators, &reached);
                stats.generations += 1;

                let f_b = self.best_case.value(&child, &self.classical);
                let f_w = self.worst_case.value(&child, &self.classical);
                let f_s = self.size.value(&child, &self.classical);
                if f_w >= COST_INFINITY || f_s >= COST_INFINITY {
                    continue;
                }
                open.push(self.comparator, f_b, f_w, f_s, child);
            }
            stats.max_open = stats.max_open.max(open.len());
        }

        stats
    }
}

/// Group `task`'s successors of `state` by non-deterministic action name,
/// recovering each group's deterministic operator set and reached-state set.
fn group_successors<S, T>(task: &T, state: &S) -> Vec<(String, ImHashSet<crate::task::Operator>, ImHashSet<S>)>
where
    S: Clone + Eq + Hash + Debug,
    T: Task<State = S>,
{
    let mut operators: ImHashMap<String, ImHashSet<crate::task::Operator>> = ImHashMap::new();
    let mut reached: ImHashMap<String, ImHashSet<S>> = ImHashMap::new();
    // Preserve first-seen order of action names for deterministic iteration.
    let mut order: Vec<String> = Vec::new();

    for (op, succ) in task.successor_states(state) {
        let action = op.nondet_action_name().to_string();
        if !operators.contains_key(&action) {
            order.push(action.clone());
        }
        operators.entry(action.clone()).or_insert_with(ImHashSet::new).insert(op);
        reached.entry(action.clone()).or_insert_with(ImHashSet::new).insert(succ);
    }

    order
        .into_iter()
        .map(|action| {
            let ops = operators.remove(&action).unwrap_or_default();
            let r = reached.remove(&action).unwrap_or_default();
            (action, ops, r)
        })
        .collect()
}
