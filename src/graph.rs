//! Undirected graph of directly observed pairwise distances.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::Id;

/// One directly measured distance between two locations.
///
/// Field names match the upstream tabular input so loaders can deserialize
/// rows straight into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairObservation<I> {
    pub id_start: I,
    pub id_end: I,
    pub distance: f64,
}

impl<I> PairObservation<I> {
    pub fn new(id_start: I, id_end: I, distance: f64) -> Self {
        Self {
            id_start,
            id_end,
            distance,
        }
    }
}

/// Direct observations keyed by unordered pair.
///
/// Direction is never stored: `(a, b)` and `(b, a)` share the key
/// `(min, max)`, so no direction owns a distance.
#[derive(Debug, Clone)]
pub struct PairGraph<I: Id> {
    ids: BTreeSet<I>,
    edges: BTreeMap<(I, I), f64>,
}

impl<I: Id> Default for PairGraph<I> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }
}

impl<I: Id> PairGraph<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a fully consumed sequence of observations.
    pub fn from_observations<T>(observations: T) -> Result<Self>
    where
        T: IntoIterator<Item = PairObservation<I>>,
    {
        let mut graph = Self::new();
        for observation in observations {
            graph.insert(observation)?;
        }
        tracing::debug!(
            ids = graph.len(),
            edges = graph.edge_count(),
            "pair graph loaded"
        );
        Ok(graph)
    }

    /// Adds one observation.
    ///
    /// Repeating a pair is accepted only with the same distance. A
    /// self-observation registers the identifier and must carry zero.
    pub fn insert(&mut self, observation: PairObservation<I>) -> Result<()> {
        let PairObservation {
            id_start,
            id_end,
            distance,
        } = observation;

        if !distance.is_finite() || distance < 0.0 {
            return Err(Error::InvalidDistance {
                origin: format!("{:?}", id_start),
                destination: format!("{:?}", id_end),
                distance,
            });
        }

        if id_start == id_end {
            if distance != 0.0 {
                return Err(Error::InvalidSelfObservation {
                    id: format!("{:?}", id_start),
                    distance,
                });
            }
            self.ids.insert(id_start);
            return Ok(());
        }

        let key = if id_start < id_end {
            (id_start, id_end)
        } else {
            (id_end, id_start)
        };

        if let Some(&existing) = self.edges.get(&key) {
            if existing != distance {
                return Err(Error::ContradictoryObservation {
                    origin: format!("{:?}", key.0),
                    destination: format!("{:?}", key.1),
                    existing,
                    observed: distance,
                });
            }
            return Ok(());
        }

        self.ids.insert(key.0.clone());
        self.ids.insert(key.1.clone());
        self.edges.insert(key, distance);
        Ok(())
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &I> {
        self.ids.iter()
    }

    pub fn contains(&self, id: &I) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct unordered pairs observed.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Directly observed distance, in either direction.
    pub fn distance(&self, a: &I, b: &I) -> Option<f64> {
        if a == b {
            return self.ids.contains(a).then_some(0.0);
        }
        let key = if a < b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        self.edges.get(&key).copied()
    }

    /// Observed pairs as `(low, high, distance)`, ascending.
    pub fn edges(&self) -> impl Iterator<Item = (&I, &I, f64)> {
        self.edges.iter().map(|((a, b), d)| (a, b, *d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_symmetric_lookup() {
        let graph = PairGraph::from_observations(vec![PairObservation::new(2, 1, 5.0)])
            .expect("valid graph");
        assert_eq!(graph.distance(&1, &2), Some(5.0));
        assert_eq!(graph.distance(&2, &1), Some(5.0));
        assert_eq!(graph.distance(&1, &1), Some(0.0));
        assert_eq!(graph.distance(&1, &3), None);
    }

    #[test]
    fn test_ids_are_ascending_union() {
        let graph = PairGraph::from_observations(vec![
            PairObservation::new("c", "a", 1.0),
            PairObservation::new("b", "d", 2.0),
        ])
        .expect("valid graph");
        let ids: Vec<_> = graph.ids().copied().collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_repeated_pair_same_distance_is_accepted() {
        let graph = PairGraph::from_observations(vec![
            PairObservation::new(1, 2, 3.5),
            PairObservation::new(2, 1, 3.5),
        ])
        .expect("symmetric duplicate");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_contradictory_pair_rejected() {
        let err = PairGraph::from_observations(vec![
            PairObservation::new(1, 2, 3.5),
            PairObservation::new(2, 1, 4.0),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(matches!(err, Error::ContradictoryObservation { .. }));
    }

    #[test]
    fn test_negative_and_nan_distances_rejected() {
        let mut graph = PairGraph::new();
        assert!(graph.insert(PairObservation::new(1, 2, -1.0)).is_err());
        assert!(graph.insert(PairObservation::new(1, 2, f64::NAN)).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_self_observation() {
        let mut graph = PairGraph::new();
        graph
            .insert(PairObservation::new(9, 9, 0.0))
            .expect("zero self-distance");
        assert!(graph.contains(&9));
        assert_eq!(graph.edge_count(), 0);

        let err = graph.insert(PairObservation::new(9, 9, 1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidSelfObservation { .. }));
    }
}
