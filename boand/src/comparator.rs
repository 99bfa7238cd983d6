//! # Open-list comparator and the open list itself
//!
//! The triple key policies in the open list are ordered by, and the
//! binary-heap open list built on top of it. `std::collections::BinaryHeap`
//! is a max-heap, so [`OpenEntry`]'s `Ord` is inverted to make the heap
//! behave as the min-heap the search engine expects, with an insertion
//! counter as the final tie-break so FIFO order holds among equal keys
//! (ties are resolved arbitrarily; FIFO is simply a convenient, stable
//! choice).

use crate::cost::Cost;
use crate::policy::Policy;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

/// How the search engine orders its open list. Named after the CLI's `-m`
/// option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `(f_best, 0, f_size)`.
    Best,
    /// `(f_worst, 0, f_size)`.
    Worst,
    /// `(f_best, f_worst, f_size)`.
    BestWorst,
    /// `(f_worst, f_best, f_size)`.
    WorstBest,
}

impl Comparator {
    /// The lexicographic heap key for a policy with the given component
    /// scores.
    pub fn key(&self, f_best: Cost, f_worst: Cost, f_size: Cost) -> (Cost, Cost, Cost) {
        match self {
            Comparator::Best => (f_best, 0, f_size),
            Comparator::Worst => (f_worst, 0, f_size),
            Comparator::BestWorst => (f_best, f_worst, f_size),
            Comparator::WorstBest => (f_worst, f_best, f_size),
        }
    }
}

/// One queued policy, with its heap key and an insertion counter for
/// tie-breaking.
struct OpenEntry<S: Clone + Eq + Hash + Debug> {
    key: (Cost, Cost, Cost),
    counter: u64,
    policy: Policy<S>,
}

impl<S: Clone + Eq + Hash + Debug> PartialEq for OpenEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.counter == other.counter
    }
}
impl<S: Clone + Eq + Hash + Debug> Eq for OpenEntry<S> {}

impl<S: Clone + Eq + Hash + Debug> PartialOrd for OpenEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Clone + Eq + Hash + Debug> Ord for OpenEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, smallest key (then earliest
        // insertion) must sort greatest so pop() returns it first.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

/// Priority-queued open list of partial policies, keyed by [`Comparator`].
pub struct OpenList<S: Clone + Eq + Hash + Debug> {
    heap: BinaryHeap<OpenEntry<S>>,
    next_counter: u64,
}

impl<S: Clone + Eq + Hash + Debug> OpenList<S> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), next_counter: 0 }
    }

    /// Push `policy` with the given component scores under `comparator`.
    pub fn push(&mut self, comparator: Comparator, f_best: Cost, f_worst: Cost, f_size: Cost, policy: Policy<S>) {
        let key = comparator.key(f_best, f_worst, f_size);
        self.heap.push(OpenEntry { key, counter: self.next_counter, policy });
        self.next_counter += 1;
    }

    /// Remove and return the policy with the smallest key, and the key
    /// itself (so the caller can apply its Pareto-pruning test without
    /// recomputing it).
    pub fn pop_min(&mut self) -> Option<((Cost, Cost, Cost), Policy<S>)> {
        self.heap.pop().map(|entry| (entry.key, entry.policy))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<S: Clone + Eq + Hash + Debug> Default for OpenList<S> {
    fn default() -> Self {
        Self::new()
    }
}
