//! Symmetric all-pairs distance matrix and its completion from sparse
//! observations.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{PairGraph, PairObservation};
use crate::traits::Id;

/// A dense, symmetric n×n distance matrix stored in row-major order.
///
/// Rows and columns follow the ascending order of the identifiers. The
/// diagonal is always zero. Built once and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use toll_matrix::graph::PairObservation;
/// use toll_matrix::matrix::complete;
///
/// let matrix = complete(vec![
///     PairObservation::new(1, 2, 4.0),
///     PairObservation::new(2, 3, 6.0),
///     PairObservation::new(1, 3, 10.0),
/// ])?;
/// assert_eq!(matrix.get(&3, &1), Some(10.0));
/// assert_eq!(matrix.size(), 3);
/// # Ok::<(), toll_matrix::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<I: Id> {
    ids: Vec<I>,
    data: Vec<f64>,
}

impl<I: Id> DistanceMatrix<I> {
    /// `ids` must be sorted and unique, `data` row-major of `ids.len()²`.
    pub(crate) fn from_parts(ids: Vec<I>, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), ids.len() * ids.len());
        Self { ids, data }
    }

    /// Identifiers in row/column order (ascending).
    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn index_of(&self, id: &I) -> Option<usize> {
        self.ids.binary_search(id).ok()
    }

    /// Distance by position.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn at(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size() + to]
    }

    /// Distance by identifier, `None` if either is unknown.
    pub fn get(&self, from: &I, to: &I) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Some(self.at(i, j))
    }

    /// Full row for `id`, ordered like [`DistanceMatrix::ids`].
    pub fn row(&self, id: &I) -> Option<&[f64]> {
        let i = self.index_of(id)?;
        let n = self.size();
        Some(&self.data[i * n..(i + 1) * n])
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size();
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.at(i, j) - self.at(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Applies a threshold-dependent multiplier to every cell.
    pub fn rescale(&self, rule: &ScaleRule) -> Self {
        let data = self.data.iter().map(|&value| rule.apply(value)).collect();
        Self {
            ids: self.ids.clone(),
            data,
        }
    }
}

/// Threshold rescaling applied cell by cell.
///
/// Values strictly above `threshold` get `above_factor`, everything else
/// `below_factor`; results are rounded to `decimals` places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleRule {
    pub threshold: f64,
    pub above_factor: f64,
    pub below_factor: f64,
    pub decimals: u32,
}

impl Default for ScaleRule {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            above_factor: 0.75,
            below_factor: 1.25,
            decimals: 1,
        }
    }
}

impl ScaleRule {
    pub fn apply(&self, value: f64) -> f64 {
        let factor = if value > self.threshold {
            self.above_factor
        } else {
            self.below_factor
        };
        let scale = 10f64.powi(self.decimals as i32);
        (value * factor * scale).round() / scale
    }
}

/// Resolution state of one cell during completion.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Resolved(f64),
    Unresolved,
}

/// Completes the matrix for a fully loaded set of observations.
pub fn complete<I, T>(observations: T) -> Result<DistanceMatrix<I>>
where
    I: Id,
    T: IntoIterator<Item = PairObservation<I>>,
{
    let graph = PairGraph::from_observations(observations)?;
    complete_graph(&graph)
}

/// Completes the matrix from a graph snapshot.
///
/// Observed pairs seed the matrix. Every other cell (i, j), i < j, is
/// visited once in ascending (i, j) order and set to the sum of the resolved
/// row values `m[i][k]` for `k < j` plus the resolved column values `m[k][j]`
/// for `k < i`, then mirrored. A cell with no resolved term besides the
/// diagonal stays unresolved, and any unresolved cell after the pass is an
/// error.
pub fn complete_graph<I: Id>(graph: &PairGraph<I>) -> Result<DistanceMatrix<I>> {
    let ids: Vec<I> = graph.ids().cloned().collect();
    let n = ids.len();
    let mut cells = vec![Cell::Unresolved; n * n];

    for i in 0..n {
        cells[i * n + i] = Cell::Resolved(0.0);
    }

    for (a, b, distance) in graph.edges() {
        // graph ids and matrix ids are the same sorted set
        let (Ok(i), Ok(j)) = (ids.binary_search(a), ids.binary_search(b)) else {
            continue;
        };
        cells[i * n + j] = Cell::Resolved(distance);
        cells[j * n + i] = Cell::Resolved(distance);
    }

    let mut filled = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if cells[i * n + j] != Cell::Unresolved {
                continue;
            }

            let mut sum = 0.0;
            let mut reachable = false;
            for k in (0..j).filter(|&k| k != i) {
                if let Cell::Resolved(value) = cells[i * n + k] {
                    sum += value;
                    reachable = true;
                }
            }
            for k in 0..i {
                if let Cell::Resolved(value) = cells[k * n + j] {
                    sum += value;
                    reachable = true;
                }
            }

            if reachable {
                cells[i * n + j] = Cell::Resolved(sum);
                cells[j * n + i] = Cell::Resolved(sum);
                filled += 1;
            }
        }
    }

    let mut unresolved = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if cells[i * n + j] == Cell::Unresolved {
                unresolved.push((format!("{:?}", ids[i]), format!("{:?}", ids[j])));
            }
        }
    }

    tracing::debug!(
        ids = n,
        seeded = graph.edge_count(),
        filled,
        unresolved = unresolved.len(),
        "matrix completion pass finished"
    );

    if !unresolved.is_empty() {
        return Err(Error::Unresolved { pairs: unresolved });
    }

    let data = cells
        .into_iter()
        .map(|cell| match cell {
            Cell::Resolved(value) => value,
            Cell::Unresolved => 0.0,
        })
        .collect();

    Ok(DistanceMatrix::from_parts(ids, data))
}
