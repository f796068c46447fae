//! OpenAPI components for every panel the snapshot emits

use event_core::{
    Event, EventAnalytics, EventId, EventLocation, EventSource, Impact, Narrative, Prediction,
    PredictionConfidence, Sector, Sentiment, SentimentLabel, Urgency,
};
use event_feed::{SortMode, TopMovers};
use opportunity_radar::{Signal, SignalKind, SignalMode, SignalSource};
use sector_analytics::{
    FearGreedBand, MarketIndices, MarketPulse, PredictionStats, RiskPoint, RiskQuadrant,
    SectorAggregate, SectorDiversity, SectorSentimentBar,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Sentinel dashboard snapshot"),
    components(schemas(
        Event,
        EventId,
        EventAnalytics,
        EventSource,
        EventLocation,
        Sentiment,
        SentimentLabel,
        Impact,
        Urgency,
        Sector,
        Prediction,
        PredictionConfidence,
        Narrative,
        SectorAggregate,
        MarketIndices,
        FearGreedBand,
        SectorDiversity,
        MarketPulse,
        SectorSentimentBar,
        RiskPoint,
        RiskQuadrant,
        PredictionStats,
        Signal,
        SignalKind,
        SignalSource,
        SignalMode,
        SortMode,
        TopMovers
    ))
)]
pub struct SnapshotApiDoc;
