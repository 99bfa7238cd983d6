//! # Task
//!
//! The grounded FOND task and its deterministic operators, plus the
//! external collaborator interfaces (parser, determinizer) the core search
//! engine depends on but does not implement.

use regex::Regex;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::LazyLock;

/// A deterministic operator, one outcome of a non-deterministic action.
///
/// Its name follows the `<nondet_name>_detdup_<k>` convention for outcome
/// index `k` (or is simply `<nondet_name>` when the action has a single,
/// unique outcome). [`nondet_action_name`] recovers `<nondet_name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operator {
    /// The operator's fully qualified name, including any `_detdup_<k>` suffix.
    pub name: String,
}

impl Operator {
    /// Construct an operator from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The non-deterministic action name this operator is an outcome of.
    pub fn nondet_action_name(&self) -> &str {
        nondet_action_name(&self.name)
    }
}

static DETDUP_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_detdup_[0-9]*$").expect("static regex is valid"));

/// Strip the `_detdup_<digits>` suffix a determinizer appends to recover the
/// non-deterministic action name. Operators with no suffix are assumed to be
/// the single outcome of their non-deterministic action, and are returned
/// unchanged.
pub fn nondet_action_name(operator_name: &str) -> &str {
    match DETDUP_SUFFIX.find(operator_name) {
        Some(m) => &operator_name[..m.start()],
        None => operator_name,
    }
}

/// The grounded task: an initial state, a goal predicate, and the successor
/// relation induced by the (already all-outcomes-determinized) operators.
///
/// This is the boundary to the external determinizer: the core search
/// engine only ever calls these three methods.
pub trait Task {
    /// Opaque, hashable world-state representation.
    type State: Clone + Eq + Hash + Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the task's goal condition.
    fn goal_reached(&self, state: &Self::State) -> bool;

    /// Every applicable deterministic operator at `state`, paired with the
    /// state it leads to.
    fn successor_states(&self, state: &Self::State) -> Vec<(Operator, Self::State)>;
}

/// External collaborator that turns a PDDL domain/problem pair into a
/// grounded, all-outcomes-determinized [`Task`]. Parsing PDDL and
/// determinization are out of scope for this crate; no implementation is
/// shipped. A caller that needs one links it in and implements this trait.
pub trait Determinize {
    /// The task type this determinizer produces.
    type Task: Task;

    /// Parse and determinize the domain/problem pair at the given paths.
    fn determinize(
        &self,
        domain_file: &std::path::Path,
        problem_file: &std::path::Path,
    ) -> Result<Self::Task, crate::error::Error>;
}
