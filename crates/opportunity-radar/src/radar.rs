//! Opportunity Radar
//!
//! Pools every rule's candidates across all sectors, ranks them by confidence
//! and keeps the top of the list.

use sector_analytics::SectorAggregates;

use crate::models::{Signal, SignalMode};
use crate::rules::{
    ContrarianRule, HighImpactClusterRule, MlAlertRule, MomentumRule, SignalRule, SocialBuzzRule,
};

/// Evaluates the standard rule set over sector aggregates
pub struct OpportunityRadar {
    rules: Vec<Box<dyn SignalRule>>,
}

impl Default for OpportunityRadar {
    fn default() -> Self {
        Self::new()
    }
}

impl OpportunityRadar {
    /// Radar with the standard rules in evaluation order
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(MlAlertRule),
                Box::new(MomentumRule::bullish()),
                Box::new(MomentumRule::bearish()),
                Box::new(ContrarianRule),
                Box::new(HighImpactClusterRule),
                Box::new(SocialBuzzRule),
            ],
        }
    }

    /// ML-enriched when any sector carries at least one prediction
    pub fn mode(aggregates: &SectorAggregates) -> SignalMode {
        if aggregates.values().any(|agg| agg.has_ml_samples()) {
            SignalMode::MlEnriched
        } else {
            SignalMode::Nlp
        }
    }

    /// Ranked, truncated signals
    pub fn detect(&self, aggregates: &SectorAggregates) -> Vec<Signal> {
        let mode = Self::mode(aggregates);

        let mut candidates: Vec<Signal> = self
            .rules
            .iter()
            .flat_map(|rule| {
                aggregates
                    .iter()
                    .filter_map(move |(sector, agg)| rule.evaluate(*sector, agg))
            })
            .collect();

        let candidate_count = candidates.len();

        // Stable: equal confidences keep pooling order
        candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        candidates.truncate(mode.limit());

        tracing::debug!(
            ?mode,
            candidates = candidate_count,
            kept = candidates.len(),
            "detected opportunity signals"
        );

        candidates
    }
}

/// Detect signals with the standard radar
pub fn detect_signals(aggregates: &SectorAggregates) -> Vec<Signal> {
    OpportunityRadar::new().detect(aggregates)
}
