//! Segmentation engine — converts a full customer population into quartile
//! scores, composite codes, and named segments.

use rfm_core::{
    CustomerMetrics, RfmCode, RfmError, RfmResult, ScoredCustomer, SegmentDistribution,
};
use tracing::info;

use crate::quartile::{self, LabelOrder};
use crate::rules::{self, SegmentRule};

/// Holds the immutable rule table. The whole population must be materialized
/// before scoring: bucket thresholds are defined relative to it, never per
/// record.
pub struct SegmentationEngine {
    rules: Vec<SegmentRule>,
}

impl SegmentationEngine {
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }

    /// Engine with a caller-supplied rule table. Intended for tests; the
    /// production table is fixed.
    pub fn with_rules(rules: Vec<SegmentRule>) -> Self {
        Self { rules }
    }

    /// Score every customer relative to the population and classify the
    /// resulting codes. Output preserves input order; the distribution
    /// carries all defined segments, including empty ones.
    pub fn score_population(
        &self,
        population: &[CustomerMetrics],
    ) -> RfmResult<(Vec<ScoredCustomer>, SegmentDistribution)> {
        if population.is_empty() {
            return Err(RfmError::EmptyPopulation);
        }

        let recency: Vec<f64> = population.iter().map(|m| m.recency_days as f64).collect();
        let frequency: Vec<f64> = population.iter().map(|m| m.frequency as f64).collect();
        let monetary: Vec<f64> = population.iter().map(|m| m.monetary_value).collect();

        let r_scores = quartile::score_quartiles(&recency, LabelOrder::Descending, "recency")?;
        // Frequency alone gets rank pre-processing: invoice counts cluster
        // heavily, and ranking keeps the cut points well defined.
        let f_ranks = quartile::first_seen_ranks(&frequency);
        let f_scores = quartile::score_quartiles(&f_ranks, LabelOrder::Ascending, "frequency")?;
        let m_scores = quartile::score_quartiles(&monetary, LabelOrder::Ascending, "monetary")?;

        let mut distribution = SegmentDistribution::new();
        let scored: Vec<ScoredCustomer> = population
            .iter()
            .enumerate()
            .map(|(i, metrics)| {
                let code = RfmCode::new(r_scores[i], f_scores[i], m_scores[i]);
                let segment = rules::classify(&self.rules, code);
                distribution.record(segment);
                ScoredCustomer {
                    metrics: metrics.clone(),
                    r_score: code.r,
                    f_score: code.f,
                    m_score: code.m,
                    rfm_code: code,
                    segment,
                }
            })
            .collect();

        info!(customers = scored.len(), "scored population");
        Ok((scored, distribution))
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self::new()
    }
}
