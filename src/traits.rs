//! Core domain traits for the toll matrix.
//!
//! Kept intentionally minimal. Callers pick their own identifier type for
//! locations; anything orderable and hashable works.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for a location (graph node).
///
/// Ascending `Ord` order is the resolution order used when completing a
/// distance matrix, so it must be a total order that is stable across runs.
pub trait Id: Clone + Ord + Hash + Debug {}

impl<T> Id for T where T: Clone + Ord + Hash + Debug {}
