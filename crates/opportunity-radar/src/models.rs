//! Opportunity Radar Data Models

use event_core::{Sector, SentimentLabel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which rule produced a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    Momentum,
    Contrarian,
    HighImpactCluster,
    SocialBuzz,
    MlAlert,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Momentum => "momentum",
            SignalKind::Contrarian => "contrarian",
            SignalKind::HighImpactCluster => "highImpactCluster",
            SignalKind::SocialBuzz => "socialBuzz",
            SignalKind::MlAlert => "mlAlert",
        }
    }
}

/// Evidence behind a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SignalSource {
    #[serde(rename = "NLP")]
    Nlp,
    #[serde(rename = "ML")]
    Ml,
    #[serde(rename = "NLP+ML")]
    NlpMl,
}

impl SignalSource {
    /// `NLP+ML` when ML evidence adjusted an NLP rule, plain `NLP` otherwise
    pub fn nlp(ml_adjusted: bool) -> Self {
        if ml_adjusted {
            SignalSource::NlpMl
        } else {
            SignalSource::Nlp
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalSource::Nlp => "NLP",
            SignalSource::Ml => "ML",
            SignalSource::NlpMl => "NLP+ML",
        }
    }
}

/// Ranking mode; ML-enriched radars surface one extra signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignalMode {
    Nlp,
    MlEnriched,
}

impl SignalMode {
    pub fn limit(&self) -> usize {
        match self {
            SignalMode::Nlp => 4,
            SignalMode::MlEnriched => 5,
        }
    }
}

/// A ranked opportunity signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub kind: SignalKind,
    pub sector: Sector,
    /// Bias of the signal when it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SentimentLabel>,
    /// Heuristic score (0-99)
    pub confidence: u8,
    pub event_count: usize,
    pub source: SignalSource,
    pub title: String,
    pub description: String,
    /// Suggested action for the analyst
    pub action: String,
}

impl Signal {
    pub fn is_ml_backed(&self) -> bool {
        self.source != SignalSource::Nlp
    }
}
