//! Sector Aggregator
//!
//! Reduces a flat event list into per-sector sentiment counts and ML statistics.

use event_core::math::ratio;
use event_core::{Event, Prediction, PredictionConfidence, Sector, SentimentLabel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

/// Aggregates keyed by sector, iterated in universe order
pub type SectorAggregates = BTreeMap<Sector, SectorAggregate>;

/// Statistics for one sector, recomputed from scratch on every input change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SectorAggregate {
    pub total: usize,
    pub bullish_count: usize,
    pub bearish_count: usize,
    pub neutral_count: usize,
    pub high_impact_count: usize,
    /// Events in this sector that have a prediction
    pub ml_sample_count: usize,
    /// Predictions flagged `high` by the producer
    pub ml_high_confidence_count: usize,
    pub ml_probability_sum: f64,
}

impl SectorAggregate {
    /// Fold one event (and its prediction, if any) into the aggregate
    pub fn record(&mut self, event: &Event, prediction: Option<&Prediction>) {
        self.total += 1;

        match event.sentiment_label() {
            SentimentLabel::Bullish => self.bullish_count += 1,
            SentimentLabel::Bearish => self.bearish_count += 1,
            SentimentLabel::Neutral => self.neutral_count += 1,
        }

        if event.is_high_impact() {
            self.high_impact_count += 1;
        }

        if let Some(pred) = prediction {
            self.ml_probability_sum += pred.probability;
            self.ml_sample_count += 1;
            if pred.confidence == PredictionConfidence::High {
                self.ml_high_confidence_count += 1;
            }
        }
    }

    /// Mean ML probability, 0 without samples
    pub fn avg_probability(&self) -> f64 {
        if self.ml_sample_count == 0 {
            0.0
        } else {
            self.ml_probability_sum / self.ml_sample_count as f64
        }
    }

    pub fn has_ml_samples(&self) -> bool {
        self.ml_sample_count > 0
    }

    pub fn bullish_ratio(&self) -> f64 {
        ratio(self.bullish_count, self.total)
    }

    pub fn bearish_ratio(&self) -> f64 {
        ratio(self.bearish_count, self.total)
    }

    pub fn neutral_ratio(&self) -> f64 {
        ratio(self.neutral_count, self.total)
    }

    /// Strictly larger side wins; a tie reads as neutral
    pub fn dominant_sentiment(&self) -> SentimentLabel {
        if self.bullish_count > self.bearish_count {
            SentimentLabel::Bullish
        } else if self.bearish_count > self.bullish_count {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Group events by sector in a single pass
///
/// Events without identity are skipped; events without a recognized sector are
/// grouped under `Global`. Predictions are looked up by the event's string-coerced id.
pub fn aggregate_by_sector(
    events: &[Event],
    predictions_by_event_id: &HashMap<String, Prediction>,
) -> SectorAggregates {
    let mut aggregates = SectorAggregates::new();
    let mut skipped = 0usize;

    for event in events {
        let Some(key) = event.identity_key() else {
            skipped += 1;
            continue;
        };

        aggregates
            .entry(event.sector_group())
            .or_default()
            .record(event, predictions_by_event_id.get(&key));
    }

    tracing::debug!(
        events = events.len(),
        skipped,
        sectors = aggregates.len(),
        predictions = predictions_by_event_id.len(),
        "aggregated events by sector"
    );

    aggregates
}
