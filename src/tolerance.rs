//! Locations whose mean outbound distance is close to a reference location's.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::traits::Id;
use crate::unroll::EdgeRecord;

/// Default half-width of the tolerance band, as a fraction of the reference.
pub const DEFAULT_TOLERANCE_PCT: f64 = 0.10;

/// Mean outbound distance per origin, keyed ascending.
pub fn mean_outbound<I: Id>(edges: &[EdgeRecord<I>]) -> BTreeMap<I, f64> {
    let mut totals: BTreeMap<I, (f64, usize)> = BTreeMap::new();
    for edge in edges {
        let entry = totals.entry(edge.origin.clone()).or_insert((0.0, 0));
        entry.0 += edge.distance;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(id, (sum, count))| (id, sum / count as f64))
        .collect()
}

/// Returns every origin whose mean lies in
/// `[ref_mean * (1 - pct), ref_mean * (1 + pct)]`, ascending.
///
/// The reference itself is always part of the result. Locations with no
/// outbound edges never appear.
pub fn within_tolerance<I: Id>(edges: &[EdgeRecord<I>], reference: &I, pct: f64) -> Result<Vec<I>> {
    if !pct.is_finite() || pct < 0.0 {
        return Err(Error::InvalidTolerance { pct });
    }

    let means = mean_outbound(edges);
    let reference_mean = *means.get(reference).ok_or_else(|| Error::not_found(reference))?;

    let low = reference_mean * (1.0 - pct);
    let high = reference_mean * (1.0 + pct);

    let ids: Vec<I> = means
        .into_iter()
        .filter(|(_, mean)| *mean >= low && *mean <= high)
        .map(|(id, _)| id)
        .collect();

    tracing::debug!(
        reference = ?reference,
        reference_mean,
        low,
        high,
        matched = ids.len(),
        "tolerance band evaluated"
    );
    Ok(ids)
}
