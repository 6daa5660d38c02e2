//! Error type shared by every stage of the toll matrix.

use std::fmt;

/// Coarse classification of an [`Error`].
///
/// Batch callers use it to decide whether to skip a single request or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input graph is malformed, disconnected, or contradictory.
    Data,
    /// A referenced identifier does not exist.
    NotFound,
    /// A time-of-day or parameter lies outside its valid grid or range.
    Range,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Distance is negative, NaN, or infinite.
    InvalidDistance {
        origin: String,
        destination: String,
        distance: f64,
    },
    /// Same unordered pair observed twice with different distances.
    ContradictoryObservation {
        origin: String,
        destination: String,
        existing: f64,
        observed: f64,
    },
    /// Self-observation carrying a non-zero distance.
    InvalidSelfObservation { id: String, distance: f64 },
    /// Cells left unresolved after the completion pass, in ascending order.
    Unresolved { pairs: Vec<(String, String)> },
    /// Edge list does not cover an off-diagonal cell.
    MissingEdge { origin: String, destination: String },
    /// Edge list disagrees with itself across a pair.
    Asymmetric {
        origin: String,
        destination: String,
        forward: f64,
        backward: f64,
    },
    NotFound { id: String },
    /// Time of day not aligned to the half-hour grid.
    InvalidTime { value: String },
    UnknownWeekday { value: String },
    /// Slot start has no following boundary on the grid.
    SlotOutOfGrid { start: String },
    InvalidTolerance { pct: f64 },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDistance { .. }
            | Error::ContradictoryObservation { .. }
            | Error::InvalidSelfObservation { .. }
            | Error::Unresolved { .. }
            | Error::MissingEdge { .. }
            | Error::Asymmetric { .. } => ErrorKind::Data,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InvalidTime { .. }
            | Error::UnknownWeekday { .. }
            | Error::SlotOutOfGrid { .. }
            | Error::InvalidTolerance { .. } => ErrorKind::Range,
        }
    }

    pub(crate) fn not_found<I: fmt::Debug>(id: &I) -> Self {
        Error::NotFound {
            id: format!("{:?}", id),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDistance {
                origin,
                destination,
                distance,
            } => write!(
                f,
                "invalid distance {} between {} and {}",
                distance, origin, destination
            ),
            Error::ContradictoryObservation {
                origin,
                destination,
                existing,
                observed,
            } => write!(
                f,
                "pair ({}, {}) observed as {} and {}",
                origin, destination, existing, observed
            ),
            Error::InvalidSelfObservation { id, distance } => {
                write!(f, "self-observation of {} has non-zero distance {}", id, distance)
            }
            Error::Unresolved { pairs } => {
                let listed = pairs
                    .iter()
                    .map(|(a, b)| format!("({}, {})", a, b))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{} unresolved pair(s): {}", pairs.len(), listed)
            }
            Error::MissingEdge {
                origin,
                destination,
            } => write!(f, "no edge from {} to {}", origin, destination),
            Error::Asymmetric {
                origin,
                destination,
                forward,
                backward,
            } => write!(
                f,
                "asymmetric edges between {} and {}: {} vs {}",
                origin, destination, forward, backward
            ),
            Error::NotFound { id } => write!(f, "identifier {} not found", id),
            Error::InvalidTime { value } => {
                write!(f, "time {:?} is not on the half-hour grid", value)
            }
            Error::UnknownWeekday { value } => write!(f, "unknown weekday {:?}", value),
            Error::SlotOutOfGrid { start } => {
                write!(f, "no half-hour slot starts at {}", start)
            }
            Error::InvalidTolerance { pct } => {
                write!(f, "tolerance {} must be finite and non-negative", pct)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
