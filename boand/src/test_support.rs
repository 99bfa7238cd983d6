//! Tiny synthetic [`Task`](crate::task::Task) implementations used across the
//! unit test suites of this crate. No PDDL parser is linked in, so tests
//! exercise the engine against hand-rolled state machines covering its main
//! end-to-end behaviors — linear chains, forks around dead branches, cost
//! trade-offs, cycles that can and cannot close — instead of PDDL fixtures.

use crate::task::{Operator, Task};
use std::collections::HashMap;

/// A single deterministic chain `0 -> 1 -> ... -> len`, goal at `len`.
pub struct ChainTask {
    len: u32,
}

impl ChainTask {
    pub fn new(len: u32) -> Self {
        Self { len }
    }
}

impl Task for ChainTask {
    type State = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn goal_reached(&self, s: &u32) -> bool {
        *s == self.len
    }

    fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
        if *s >= self.len {
            Vec::new()
        } else {
            vec![(Operator::new("advance"), s + 1)]
        }
    }
}

/// Initial state `0` has one non-deterministic action with two outcomes: one
/// reaches the goal `1`, the other reaches a dead end `2` with no outgoing
/// operators and no goal.
pub struct ForkTask;

impl ForkTask {
    pub fn new() -> Self {
        Self
    }
}

impl Task for ForkTask {
    type State = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn goal_reached(&self, s: &u32) -> bool {
        *s == 1
    }

    fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
        match *s {
            0 => vec![
                (Operator::new("act_detdup_0"), 1),
                (Operator::new("act_detdup_1"), 2),
            ],
            _ => Vec::new(),
        }
    }
}

/// Initial state `0` has two non-deterministic actions: `short` reaches the
/// goal `1` deterministically in two steps, `risky` has two outcomes both
/// reaching the goal in three steps; `risky` is strictly worse on both
/// best-case and worst-case cost, so a Pareto-admissible search should never
/// prefer it.
pub struct TradeoffTask;

impl TradeoffTask {
    pub fn new() -> Self {
        Self
    }
}

impl Task for TradeoffTask {
    type State = u32;

    // States: 0 = initial, 10/11 = short path, 20/21/22 = risky path.
    fn initial_state(&self) -> u32 {
        0
    }

    fn goal_reached(&self, s: &u32) -> bool {
        *s == 1
    }

    fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
        match *s {
            0 => vec![(Operator::new("short"), 10), (Operator::new("risky"), 20)],
            10 => vec![(Operator::new("advance"), 1)],
            20 => vec![
                (Operator::new("risky_detdup_0"), 21),
                (Operator::new("risky_detdup_1"), 22),
            ],
            21 => vec![(Operator::new("advance"), 1)],
            22 => vec![(Operator::new("advance"), 1)],
            _ => Vec::new(),
        }
    }
}

/// Initial state `0` has a single non-deterministic action with outcomes
/// `{goal, self}`: cyclic, but still proper, since the self-loop outcome has
/// an exit branch that reaches the goal.
pub struct LoopTask;

impl LoopTask {
    pub fn new() -> Self {
        Self
    }
}

impl Task for LoopTask {
    type State = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn goal_reached(&self, s: &u32) -> bool {
        *s == 1
    }

    fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
        match *s {
            0 => vec![
                (Operator::new("act_detdup_0"), 1),
                (Operator::new("act_detdup_1"), 0),
            ],
            _ => Vec::new(),
        }
    }
}

/// Initial state `0` has a single non-deterministic action whose single
/// outcome is itself, with no exit: a permanent deadlock, cyclic and never
/// proper.
pub struct DeadLoopTask;

impl DeadLoopTask {
    pub fn new() -> Self {
        Self
    }
}

impl Task for DeadLoopTask {
    type State = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn goal_reached(&self, _s: &u32) -> bool {
        false
    }

    fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
        match *s {
            0 => vec![(Operator::new("spin"), 0)],
            _ => Vec::new(),
        }
    }
}

/// Initial state `0` has two non-deterministic actions whose branches are
/// genuinely non-dominated: `cheap` reaches the goal in 2 steps best-case but
/// 10 worst-case, `steady` reaches it in 4 steps best-case but only 6
/// worst-case. Neither branch's `(f_best, f_worst)` pair dominates the
/// other's, so a Pareto-admissible search admits both.
pub struct ParetoTask;

impl ParetoTask {
    pub fn new() -> Self {
        Self
    }

    /// The goal state both branches eventually reach.
    pub const GOAL: u32 = 999;
}

impl Task for ParetoTask {
    type State = u32;

    // 0 = initial.
    // `cheap` branch: 1 -> GOAL (best case, 2 steps total);
    //                 100 -> 101 -> ... -> 108 -> GOAL (worst case, 10 steps total).
    // `steady` branch: 200 -> 201 -> 202 -> GOAL (best case, 4 steps total);
    //                  210 -> 211 -> 212 -> 213 -> 214 -> GOAL (worst case, 6 steps total).
    fn initial_state(&self) -> u32 {
        0
    }

    fn goal_reached(&self, s: &u32) -> bool {
        *s == Self::GOAL
    }

    fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
        match *s {
            0 => vec![
                (Operator::new("cheap_detdup_0"), 1),
                (Operator::new("cheap_detdup_1"), 100),
                (Operator::new("steady_detdup_0"), 200),
                (Operator::new("steady_detdup_1"), 210),
            ],
            1 => vec![(Operator::new("advance"), Self::GOAL)],
            100..=107 => vec![(Operator::new("advance"), s + 1)],
            108 => vec![(Operator::new("advance"), Self::GOAL)],
            200 | 201 => vec![(Operator::new("advance"), s + 1)],
            202 => vec![(Operator::new("advance"), Self::GOAL)],
            210..=213 => vec![(Operator::new("advance"), s + 1)],
            214 => vec![(Operator::new("advance"), Self::GOAL)],
            _ => Vec::new(),
        }
    }
}

/// A classical heuristic that always returns a fixed per-state value,
/// looking states up by a table (defaulting to zero). Useful to test the
/// heuristic-family aggregators independently of `hmax`/`lmcut`.
pub struct TableHeuristic {
    values: HashMap<u32, crate::cost::Cost>,
}

impl TableHeuristic {
    pub fn new(values: HashMap<u32, crate::cost::Cost>) -> Self {
        Self { values }
    }

    pub fn zero() -> Self {
        Self { values: HashMap::new() }
    }
}

impl crate::heuristics::ClassicalHeuristic<u32> for TableHeuristic {
    fn evaluate(&self, state: &u32) -> crate::cost::Cost {
        *self.values.get(state).unwrap_or(&0)
    }
}
