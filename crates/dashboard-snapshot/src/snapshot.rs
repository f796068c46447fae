//! Snapshot derivation
//!
//! One pure pass from (events, predictions, narratives) to every dashboard
//! panel. Nothing is cached between runs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use event_core::{index_predictions, Event, Narrative, Prediction, Sector};
use event_feed::{group_by_sector, order_events, top_movers, SortMode, TopMovers};
use opportunity_radar::{OpportunityRadar, Signal, SignalMode};
use sector_analytics::{
    aggregate_by_sector, compute_indices_at, market_pulse, risk_matrix, MarketIndices, MarketPulse,
    PredictionStats, RiskPoint, SectorAggregates,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use smart_watchlist::adapt_narrative_at;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::SnapshotConfig;

/// Raw inputs as loaded from disk
#[derive(Debug, Clone, Default)]
pub struct SnapshotInputs {
    pub events: Vec<Event>,
    pub predictions: Vec<Prediction>,
    pub narratives: Vec<Narrative>,
}

impl SnapshotInputs {
    pub fn load(config: &SnapshotConfig) -> Result<Self> {
        let events: Vec<Event> = load_json_array(&config.events_path)?;

        let undated = events
            .iter()
            .filter(|e| e.timestamp.is_some() && e.timestamp_utc().is_none())
            .count();
        if undated > 0 {
            tracing::warn!(undated, "events with unparseable timestamps will sort last");
        }

        let predictions = match &config.predictions_path {
            Some(path) => load_json_array(path)?,
            None => Vec::new(),
        };
        let narratives = match &config.narratives_path {
            Some(path) => load_json_array(path)?,
            None => Vec::new(),
        };

        tracing::info!(
            events = events.len(),
            predictions = predictions.len(),
            narratives = narratives.len(),
            "inputs loaded"
        );

        Ok(Self {
            events,
            predictions,
            narratives,
        })
    }
}

pub fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub sort_mode: SortMode,
    pub signal_mode: SignalMode,
    pub aggregates: SectorAggregates,
    pub indices: MarketIndices,
    pub pulse: MarketPulse,
    pub risk_matrix: Vec<RiskPoint>,
    pub prediction_stats: PredictionStats,
    pub signals: Vec<Signal>,
    pub feed: Vec<Event>,
    pub top_movers: TopMovers,
    pub sector_board: BTreeMap<Sector, Vec<Event>>,
    /// Narratives in their watchlist-ready form
    pub narratives: Vec<Event>,
}

impl DashboardSnapshot {
    pub fn derive(inputs: &SnapshotInputs, config: &SnapshotConfig, now: DateTime<Utc>) -> Self {
        let predictions_by_id = index_predictions(&inputs.predictions);
        let aggregates = aggregate_by_sector(&inputs.events, &predictions_by_id);

        let radar = OpportunityRadar::new();
        let signals = radar.detect(&aggregates);

        let snapshot = Self {
            generated_at: now,
            sort_mode: config.sort_mode,
            signal_mode: OpportunityRadar::mode(&aggregates),
            indices: compute_indices_at(&inputs.events, now),
            pulse: market_pulse(&inputs.events),
            risk_matrix: risk_matrix(&inputs.events),
            prediction_stats: PredictionStats::from_predictions(&inputs.predictions),
            signals,
            feed: order_events(&inputs.events, config.sort_mode),
            top_movers: top_movers(&inputs.events, config.top_movers),
            sector_board: group_by_sector(&inputs.events),
            narratives: inputs
                .narratives
                .iter()
                .map(|n| adapt_narrative_at(n, now))
                .collect(),
            aggregates,
        };

        tracing::info!(
            sectors = snapshot.aggregates.len(),
            signals = snapshot.signals.len(),
            fear_greed = snapshot.indices.fear_greed,
            "snapshot derived"
        );

        snapshot
    }
}
