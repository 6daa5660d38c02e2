//! End-to-end batch driver: observations in, distance matrix and timed
//! tariff table out.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{PairGraph, PairObservation};
use crate::matrix::{DistanceMatrix, complete_graph};
use crate::tariff::{DiscountSchedule, RateTable, TariffEngine, TariffRow, TimedTariffRow};
use crate::tolerance::{DEFAULT_TOLERANCE_PCT, within_tolerance};
use crate::traits::Id;
use crate::unroll::{EdgeRecord, unroll};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub rates: RateTable,
    pub discounts: DiscountSchedule,
    /// Half-width of the tolerance band used by [`Pipeline::tolerance_batch`].
    pub tolerance_pct: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            discounts: DiscountSchedule::default(),
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput<I: Id> {
    pub matrix: DistanceMatrix<I>,
    pub edges: Vec<EdgeRecord<I>>,
    pub tariffs: Vec<TariffRow<I>>,
    pub timed: Vec<TimedTariffRow<I>>,
}

/// Result of one reference in a tolerance batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceMatch<I> {
    pub reference: I,
    pub ids: Vec<I>,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    engine: TariffEngine,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let engine = TariffEngine::new(config.rates.clone(), config.discounts.clone());
        Self { config, engine }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn engine(&self) -> &TariffEngine {
        &self.engine
    }

    /// Runs graph loading, completion, unrolling and both tariff stages.
    pub fn run<I, T>(&self, observations: T) -> Result<PipelineOutput<I>>
    where
        I: Id + Send + Sync,
        T: IntoIterator<Item = PairObservation<I>>,
    {
        let graph = PairGraph::from_observations(observations)?;
        let matrix = complete_graph(&graph)?;
        tracing::info!(ids = matrix.size(), "distance matrix completed");

        let edges = unroll(&matrix);
        let tariffs = self.engine.base_tariff(&edges);
        let timed = self.engine.expand_timed(&tariffs);
        tracing::info!(
            edges = edges.len(),
            timed = timed.len(),
            "tariff table generated"
        );

        Ok(PipelineOutput {
            matrix,
            edges,
            tariffs,
            timed,
        })
    }

    /// Evaluates the tolerance band for each reference.
    ///
    /// A failing reference is logged and skipped so the rest of the batch
    /// still completes.
    pub fn tolerance_batch<I: Id>(
        &self,
        edges: &[EdgeRecord<I>],
        references: &[I],
    ) -> Vec<ToleranceMatch<I>> {
        let mut matches = Vec::with_capacity(references.len());
        for reference in references {
            match within_tolerance(edges, reference, self.config.tolerance_pct) {
                Ok(ids) => matches.push(ToleranceMatch {
                    reference: reference.clone(),
                    ids,
                }),
                Err(err) => {
                    tracing::warn!(reference = ?reference, error = %err, "skipping tolerance reference");
                }
            }
        }
        matches
    }
}
