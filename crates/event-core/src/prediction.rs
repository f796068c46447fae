//! ML predictions and narrative clusters
//!
//! Both are produced upstream (inference service, narrative engine) and consumed
//! here read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::{Event, EventError, EventId, SentimentLabel};

/// Producer-assigned confidence bucket; never recomputed from probability
///
/// Unrecognized buckets deserialize as `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PredictionConfidence {
    High,
    Medium,
    #[serde(other)]
    Low,
}

impl PredictionConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionConfidence::High => "high",
            PredictionConfidence::Medium => "medium",
            PredictionConfidence::Low => "low",
        }
    }
}

impl fmt::Display for PredictionConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionConfidence {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(PredictionConfidence::High),
            "medium" => Ok(PredictionConfidence::Medium),
            "low" => Ok(PredictionConfidence::Low),
            _ => Err(EventError::UnknownConfidence(s.to_string())),
        }
    }
}

/// Impact probability for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    /// String or number, matched against events by its string key
    pub event_id: EventId,
    /// Probability of market impact (0-1)
    pub probability: f64,
    pub confidence: PredictionConfidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_at: Option<DateTime<Utc>>,
}

impl Prediction {
    pub fn new(event_id: impl Into<EventId>, probability: f64, confidence: PredictionConfidence) -> Self {
        Self {
            event_id: event_id.into(),
            probability,
            confidence,
            sector: None,
            event_title: None,
            impact_category: None,
            model_version: None,
            predicted_at: None,
        }
    }
}

/// Build the `event_id key -> prediction` lookup; the last duplicate wins
pub fn index_predictions(predictions: &[Prediction]) -> HashMap<String, Prediction> {
    predictions
        .iter()
        .map(|p| (p.event_id.key(), p.clone()))
        .collect()
}

/// A cluster of related events sharing a sector and a synthesized title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Narrative {
    pub id: EventId,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub event_count: u32,
    #[serde(default)]
    pub overall_sentiment: SentimentLabel,
    #[serde(default)]
    pub events: Vec<Event>,
}
