//! Prediction radar statistics
//!
//! Summary counts, filtering and ordering over the ML prediction feed.

use event_core::{Prediction, PredictionConfidence};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Mean probability, 0 for an empty feed
    pub avg_probability: f64,
}

impl PredictionStats {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut stats = Self {
            total: predictions.len(),
            ..Default::default()
        };
        let mut sum = 0.0;

        for p in predictions {
            match p.confidence {
                PredictionConfidence::High => stats.high += 1,
                PredictionConfidence::Medium => stats.medium += 1,
                PredictionConfidence::Low => stats.low += 1,
            }
            sum += p.probability;
        }

        if stats.total > 0 {
            stats.avg_probability = sum / stats.total as f64;
        }
        stats
    }
}

/// Optional confidence and sector constraints; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct PredictionFilter {
    pub confidence: Option<PredictionConfidence>,
    pub sector: Option<String>,
}

impl PredictionFilter {
    pub fn matches(&self, prediction: &Prediction) -> bool {
        if let Some(confidence) = self.confidence {
            if prediction.confidence != confidence {
                return false;
            }
        }
        if let Some(sector) = &self.sector {
            if prediction.sector.as_deref() != Some(sector.as_str()) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictionOrder {
    #[default]
    Newest,
    Oldest,
}

pub fn filter_predictions(predictions: &[Prediction], filter: &PredictionFilter) -> Vec<Prediction> {
    predictions
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Order by `predicted_at` (undated sorts as oldest), then `event_id`
pub fn order_predictions(mut predictions: Vec<Prediction>, order: PredictionOrder) -> Vec<Prediction> {
    predictions.sort_by(|a, b| {
        let by_time = match order {
            PredictionOrder::Newest => b.predicted_at.cmp(&a.predicted_at),
            PredictionOrder::Oldest => a.predicted_at.cmp(&b.predicted_at),
        };
        match by_time {
            Ordering::Equal => a.event_id.key().cmp(&b.event_id.key()),
            other => other,
        }
    });
    predictions
}

/// Distinct prediction sectors, sorted
pub fn prediction_sectors(predictions: &[Prediction]) -> Vec<String> {
    predictions
        .iter()
        .filter_map(|p| p.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
