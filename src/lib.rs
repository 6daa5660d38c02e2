//! toll-matrix core
//!
//! Completes route-distance matrices from sparse pairwise observations and
//! derives day- and time-conditioned toll tariffs from them.

pub mod calendar;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod pipeline;
pub mod tariff;
pub mod tolerance;
pub mod traits;
pub mod unroll;

pub use error::{Error, ErrorKind, Result};
