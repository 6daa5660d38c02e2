//! Test fixtures for toll-matrix.
//!
//! A toll-road segment chain: consecutive plaza ids with the measured
//! distance between neighbours, as delivered by the upstream loader.

#![allow(dead_code)]

use toll_matrix::graph::PairObservation;

/// Plaza ids along the road, ascending.
pub const PLAZAS: &[u32] = &[
    1001400, 1001402, 1001404, 1001406, 1001408, 1001410, 1001412, 1001414,
];

/// Distances between neighbouring plazas.
pub const SEGMENTS: &[(u32, u32, f64)] = &[
    (1001400, 1001402, 9.7),
    (1001402, 1001404, 20.2),
    (1001404, 1001406, 16.0),
    (1001406, 1001408, 21.7),
    (1001408, 1001410, 11.1),
    (1001410, 1001412, 15.6),
    (1001412, 1001414, 18.2),
];

pub fn segment_observations() -> Vec<PairObservation<u32>> {
    SEGMENTS
        .iter()
        .map(|&(a, b, d)| PairObservation::new(a, b, d))
        .collect()
}

/// Same segments, half of them reported in the reverse direction.
pub fn mixed_direction_observations() -> Vec<PairObservation<u32>> {
    SEGMENTS
        .iter()
        .enumerate()
        .map(|(i, &(a, b, d))| {
            if i % 2 == 0 {
                PairObservation::new(a, b, d)
            } else {
                PairObservation::new(b, a, d)
            }
        })
        .collect()
}

/// The two lowest ids are never observed together and have no earlier
/// waypoint, so the pair (1, 2) cannot be filled.
pub fn unanchored_network() -> Vec<PairObservation<u32>> {
    vec![
        PairObservation::new(1, 3, 5.0),
        PairObservation::new(2, 3, 4.0),
        PairObservation::new(3, 4, 2.0),
    ]
}
