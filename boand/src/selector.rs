//! # State selector
//!
//! Picks the single pending state a search-engine expansion step will act
//! on. A closed sum type, dispatched once per search run from the `-s` CLI
//! option, for the same reason the heuristic families are: one variant is
//! chosen at construction time and held for a run's lifetime, so a `match`
//! covers everything a type parameter would otherwise buy.

use crate::cost::Cost;
use crate::heuristics::ClassicalHeuristic;
use crate::policy::Policy;
use rand::seq::IteratorRandom;
use std::fmt::Debug;
use std::hash::Hash;

/// Ways to pick the next pending state to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Arbitrary element of `pending`.
    Random,
    /// Minimum `best_g(s) + h(s)`.
    Best,
    /// Maximum `worst_g(s)`.
    LargestG,
    /// Minimize `best_g + h` while no goal has been reached yet (drive
    /// toward a goal fast to establish an upper bound); once a goal has
    /// been reached, maximize `best_g + h` instead (attack the hardest
    /// exit to tighten the bound).
    BoundsFirst,
}

impl Selector {
    /// Pick one state out of `policy.pending`. Panics if `pending` is empty
    /// (the search engine never calls this on a closed policy).
    pub fn select<S, H>(&self, policy: &Policy<S>, h: &H) -> S
    where
        S: Clone + Eq + Hash + Debug,
        H: ClassicalHeuristic<S>,
    {
        assert!(!policy.pending.is_empty(), "select called on a closed policy");
        match self {
            Selector::Random => policy
                .pending
                .iter()
                .choose(&mut rand::thread_rng())
                .expect("pending is non-empty")
                .clone(),
            Selector::Best => Self::extreme_by(policy, h, false),
            Selector::LargestG => policy
                .pending
                .iter()
                .max_by_key(|s| policy.worst_g(s))
                .expect("pending is non-empty")
                .clone(),
            Selector::BoundsFirst => {
                let minimize = policy.goal_states.is_empty();
                Self::extreme_by(policy, h, !minimize)
            }
        }
    }

    /// `min`/`max` of `best_g(s) + h(s)` over `pending`, by `maximize`.
    fn extreme_by<S, H>(policy: &Policy<S>, h: &H, maximize: bool) -> S
    where
        S: Clone + Eq + Hash + Debug,
        H: ClassicalHeuristic<S>,
    {
        let key = |s: &S| -> Cost { crate::cost::add(policy.best_g(s), h.evaluate(s)) };
        let chosen = if maximize {
            policy.pending.iter().max_by_key(|s| key(s))
        } else {
            policy.pending.iter().min_by_key(|s| key(s))
        };
        chosen.expect("pending is non-empty").clone()
    }
}
