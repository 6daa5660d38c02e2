//! Relational view of a distance matrix.
//!
//! [`unroll`] flattens a matrix into one record per ordered pair and
//! [`DistanceMatrix::from_edges`] pivots such records back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::traits::Id;

/// One directed `(origin, destination, distance)` relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<I> {
    pub origin: I,
    pub destination: I,
    pub distance: f64,
}

impl<I> EdgeRecord<I> {
    pub fn new(origin: I, destination: I, distance: f64) -> Self {
        Self {
            origin,
            destination,
            distance,
        }
    }
}

/// Emits every ordered pair with `origin != destination`.
///
/// Records come out origin-major, both keys ascending.
pub fn unroll<I: Id>(matrix: &DistanceMatrix<I>) -> Vec<EdgeRecord<I>> {
    let ids = matrix.ids();
    let n = ids.len();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1));
    for (i, origin) in ids.iter().enumerate() {
        for (j, destination) in ids.iter().enumerate() {
            if i == j {
                continue;
            }
            edges.push(EdgeRecord::new(
                origin.clone(),
                destination.clone(),
                matrix.at(i, j),
            ));
        }
    }
    tracing::debug!(ids = n, edges = edges.len(), "matrix unrolled");
    edges
}

impl<I: Id> DistanceMatrix<I> {
    /// Pivots edge records back into a matrix.
    ///
    /// The first record for an ordered pair wins and self-pairs are ignored.
    /// Every off-diagonal cell must be covered and both directions of a pair
    /// must agree.
    pub fn from_edges(edges: &[EdgeRecord<I>]) -> Result<Self> {
        let ids: Vec<I> = edges
            .iter()
            .flat_map(|edge| [edge.origin.clone(), edge.destination.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let n = ids.len();
        let mut cells: Vec<Option<f64>> = vec![None; n * n];
        for i in 0..n {
            cells[i * n + i] = Some(0.0);
        }

        for edge in edges {
            if edge.origin == edge.destination {
                continue;
            }
            let (Ok(i), Ok(j)) = (ids.binary_search(&edge.origin), ids.binary_search(&edge.destination))
            else {
                continue;
            };
            cells[i * n + j].get_or_insert(edge.distance);
        }

        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let Some(forward) = cells[i * n + j] else {
                    return Err(Error::MissingEdge {
                        origin: format!("{:?}", ids[i]),
                        destination: format!("{:?}", ids[j]),
                    });
                };
                if let Some(backward) = cells[j * n + i] {
                    if i < j && forward != backward {
                        return Err(Error::Asymmetric {
                            origin: format!("{:?}", ids[i]),
                            destination: format!("{:?}", ids[j]),
                            forward,
                            backward,
                        });
                    }
                }
                data.push(forward);
            }
        }

        Ok(Self::from_parts(ids, data))
    }
}
