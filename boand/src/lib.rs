#![deny(missing_docs)]

//! # Boand: Pareto-optimal best-first search for FOND planning
//!
//! A library for building partial policies that solve Fully Observable
//! Non-Deterministic (FOND) planning problems, by best-first search over
//! partial policies ordered on a Pareto frontier of best-case and
//! worst-case cost bounds.
//!
//! ## Structure
//!
//! - **[`task`]**: The grounded [`Task`](task::Task) trait the search engine
//!   runs against, and the [`Determinize`](task::Determinize) collaborator
//!   interface a caller implements to turn a PDDL domain/problem pair into
//!   one (no implementation ships in this crate; see its module docs).
//! - **[`policy`]**: The partial-policy data model — [`Policy`](policy::Policy),
//!   its `strategy`/`pending`/`goal_states` bookkeeping, and the
//!   best-case/worst-case g-value engine with cycle-aware reconvergence.
//! - **[`cost`]**: The scalar [`Cost`](cost::Cost) type shared by g-values,
//!   heuristics and f-values, with its `+∞`/`CYCLE_COST` sentinels.
//! - **[`classical`]**: A minimal grounded classical-planning task
//!   representation and the `hmax`/`lmcut` delete-relaxation heuristics
//!   computed over it.
//! - **[`heuristics`]**: The best-case/worst-case/size heuristic families a
//!   policy's `Out` set is aggregated through, plus the
//!   [`ClassicalHeuristic`](heuristics::ClassicalHeuristic) collaborator
//!   interface and its `HMax`/`LmCut` adapters.
//! - **[`selector`]**: [`Selector`](selector::Selector), picking which
//!   pending state an expansion step acts on.
//! - **[`comparator`]**: [`Comparator`](comparator::Comparator) and the
//!   [`OpenList`](comparator::OpenList) priority queue it orders.
//! - **[`search`]**: [`SearchEngine`](search::SearchEngine), tying all of
//!   the above into the best-first loop, and the
//!   [`ResultSink`](search::ResultSink) callback a caller streams admitted
//!   policies through.
//!
//! ## Usage
//!
//! ```
//! use boand::comparator::Comparator;
//! use boand::heuristics::{BestCaseHeuristic, SizeHeuristic, WorstCaseHeuristic};
//! use boand::search::{CollectingSink, SearchEngine};
//! use boand::selector::Selector;
//! use boand::task::{Operator, Task};
//!
//! struct TwoStepTask;
//! impl Task for TwoStepTask {
//!     type State = u32;
//!     fn initial_state(&self) -> u32 { 0 }
//!     fn goal_reached(&self, s: &u32) -> bool { *s == 1 }
//!     fn successor_states(&self, s: &u32) -> Vec<(Operator, u32)> {
//!         if *s == 0 { vec![(Operator::new("advance"), 1)] } else { vec![] }
//!     }
//! }
//!
//! struct NoHeuristic;
//! impl boand::heuristics::ClassicalHeuristic<u32> for NoHeuristic {
//!     fn evaluate(&self, _s: &u32) -> boand::cost::Cost { 0 }
//! }
//!
//! let engine = SearchEngine::new(
//!     Comparator::BestWorst,
//!     Selector::BoundsFirst,
//!     BestCaseHeuristic::Blind,
//!     WorstCaseHeuristic::Blind,
//!     SizeHeuristic::Zero,
//!     NoHeuristic,
//! );
//! let mut sink = CollectingSink::new();
//! engine.run(&TwoStepTask, &mut sink);
//! assert_eq!(sink.frontier.len(), 1);
//! ```

pub mod classical;
pub mod comparator;
pub mod cost;
pub mod error;
pub mod heuristics;
pub mod policy;
pub mod search;
pub mod selector;
pub mod task;

#[cfg(test)]
pub mod test_support;

pub use error::Error;
