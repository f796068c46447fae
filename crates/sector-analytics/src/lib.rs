//! Sector Analytics Module
//!
//! One-pass reductions of enriched events (and optional ML predictions) into
//! per-sector aggregates, composite market indices, the market pulse and the
//! risk matrix.

pub mod aggregator;
pub mod indices;
pub mod predictions;
pub mod pulse;

pub use aggregator::{aggregate_by_sector, SectorAggregate, SectorAggregates};
pub use indices::{compute_indices, compute_indices_at, FearGreedBand, MarketIndices, SectorDiversity};
pub use predictions::{
    filter_predictions, order_predictions, prediction_sectors, PredictionFilter, PredictionOrder,
    PredictionStats,
};
pub use pulse::{market_pulse, risk_matrix, MarketPulse, RiskPoint, RiskQuadrant, SectorSentimentBar};
