//! # Cost
//!
//! The scalar type shared by g-values, heuristic estimates and f-values.
//!
//! Two distinct sentinels stand in for non-finite quantities: [`CYCLE_COST`]
//! for "worst-case cost of a state on or downstream of a cycle", and
//! [`COST_INFINITY`] for "dead end" / "unbounded". Both need a total order so
//! they can sit as heap keys, so costs are represented as plain `u64` rather
//! than floating point, which keeps arithmetic cheap and sidesteps float
//! comparison pitfalls entirely.

/// Cost values used throughout the policy search engine.
pub type Cost = u64;

/// Large finite sentinel marking the worst-case cost of any state on or
/// downstream of a cycle. Distinct from (and strictly less than)
/// [`COST_INFINITY`].
pub const CYCLE_COST: Cost = 1_000_000;

/// Stand-in for `+∞`: a dead end, or an aggregate over an empty set of
/// states (see the Open Question in the heuristic family design notes).
pub const COST_INFINITY: Cost = Cost::MAX;

/// Saturating addition that never wraps past [`COST_INFINITY`].
pub fn add(a: Cost, b: Cost) -> Cost {
    a.saturating_add(b).min(COST_INFINITY)
}
