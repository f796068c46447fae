//! Composite Index Calculator
//!
//! Fear & Greed, event velocity, sector diversity and alert rate over the whole
//! event set.

use chrono::{DateTime, Duration, Utc};
use event_core::math::{percent, round_to};
use event_core::{Event, Sector, SentimentLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Fear & Greed value reported for an empty event set
pub const NEUTRAL_FEAR_GREED: u32 = 50;

/// Trailing window for event velocity
pub const VELOCITY_WINDOW_HOURS: i64 = 6;

/// Fear & Greed banding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FearGreedBand {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl FearGreedBand {
    pub fn from_index(index: u32) -> Self {
        match index {
            i if i <= 20 => FearGreedBand::ExtremeFear,
            i if i <= 40 => FearGreedBand::Fear,
            i if i <= 60 => FearGreedBand::Neutral,
            i if i <= 80 => FearGreedBand::Greed,
            _ => FearGreedBand::ExtremeGreed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FearGreedBand::ExtremeFear => "Extreme Fear",
            FearGreedBand::Fear => "Fear",
            FearGreedBand::Neutral => "Neutral",
            FearGreedBand::Greed => "Greed",
            FearGreedBand::ExtremeGreed => "Extreme Greed",
        }
    }
}

/// Active sectors out of the fixed universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectorDiversity {
    pub active: usize,
    pub universe: usize,
}

/// Key indicators shown on the dashboard header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketIndices {
    /// Bullish share of all events (0-100)
    pub fear_greed: u32,
    pub fear_label: FearGreedBand,
    /// Events per hour over the trailing window, one decimal
    pub velocity: f64,
    pub diversity: SectorDiversity,
    /// High-impact share of all events (0-100)
    pub alert_rate: u32,
    pub high_impact_count: usize,
    pub total_events: usize,
}

impl MarketIndices {
    fn empty() -> Self {
        Self {
            fear_greed: NEUTRAL_FEAR_GREED,
            fear_label: FearGreedBand::from_index(NEUTRAL_FEAR_GREED),
            velocity: 0.0,
            diversity: SectorDiversity {
                active: 0,
                universe: Sector::UNIVERSE.len(),
            },
            alert_rate: 0,
            high_impact_count: 0,
            total_events: 0,
        }
    }
}

/// Compute indices against the current wall clock
pub fn compute_indices(events: &[Event]) -> MarketIndices {
    compute_indices_at(events, Utc::now())
}

/// Compute indices as of `now`
pub fn compute_indices_at(events: &[Event], now: DateTime<Utc>) -> MarketIndices {
    let identified: Vec<&Event> = events.iter().filter(|e| e.identity().is_some()).collect();
    if identified.is_empty() {
        return MarketIndices::empty();
    }

    let total = identified.len();
    let window_start = now - Duration::hours(VELOCITY_WINDOW_HOURS);

    let mut bullish = 0usize;
    let mut high_impact = 0usize;
    let mut recent = 0usize;
    let mut active_sectors = BTreeSet::new();

    for event in &identified {
        if event.sentiment_label() == SentimentLabel::Bullish {
            bullish += 1;
        }
        if event.is_high_impact() {
            high_impact += 1;
        }
        if event.timestamp_utc().is_some_and(|ts| ts > window_start) {
            recent += 1;
        }
        let sector = event.sector_group();
        if sector.in_universe() {
            active_sectors.insert(sector);
        }
    }

    let fear_greed = percent(bullish, total);
    let velocity = round_to(recent as f64 / VELOCITY_WINDOW_HOURS as f64, 1);

    tracing::debug!(total, bullish, high_impact, recent, fear_greed, "computed market indices");

    MarketIndices {
        fear_greed,
        fear_label: FearGreedBand::from_index(fear_greed),
        velocity,
        diversity: SectorDiversity {
            active: active_sectors.len(),
            universe: Sector::UNIVERSE.len(),
        },
        alert_rate: percent(high_impact, total),
        high_impact_count: high_impact,
        total_events: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use event_core::Impact;

    fn labeled(id: usize, label: SentimentLabel) -> Event {
        Event::new(id.to_string()).with_sentiment(label)
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let indices = compute_indices(&[]);
        assert_eq!(indices.fear_greed, 50);
        assert_eq!(indices.fear_label, FearGreedBand::Neutral);
        assert_eq!(indices.alert_rate, 0);
        assert_eq!(indices.velocity, 0.0);
        assert_eq!(indices.diversity.active, 0);
        assert_eq!(indices.diversity.universe, 6);
    }

    #[test]
    fn test_fear_greed_is_bullish_share() {
        let mut events: Vec<Event> = (0..3).map(|i| labeled(i, SentimentLabel::Bullish)).collect();
        events.extend((3..8).map(|i| labeled(i, SentimentLabel::Bearish)));
        let indices = compute_indices(&events);

        // 3 of 8 = 37.5% -> 38
        assert_eq!(indices.fear_greed, 38);
        assert_eq!(indices.fear_label, FearGreedBand::Fear);
    }

    #[test]
    fn test_fear_greed_banding_boundaries() {
        assert_eq!(FearGreedBand::from_index(0), FearGreedBand::ExtremeFear);
        assert_eq!(FearGreedBand::from_index(20), FearGreedBand::ExtremeFear);
        assert_eq!(FearGreedBand::from_index(21), FearGreedBand::Fear);
        assert_eq!(FearGreedBand::from_index(40), FearGreedBand::Fear);
        assert_eq!(FearGreedBand::from_index(41), FearGreedBand::Neutral);
        assert_eq!(FearGreedBand::from_index(60), FearGreedBand::Neutral);
        assert_eq!(FearGreedBand::from_index(61), FearGreedBand::Greed);
        assert_eq!(FearGreedBand::from_index(80), FearGreedBand::Greed);
        assert_eq!(FearGreedBand::from_index(81), FearGreedBand::ExtremeGreed);
        assert_eq!(FearGreedBand::from_index(100), FearGreedBand::ExtremeGreed);
        assert_eq!(FearGreedBand::ExtremeGreed.label(), "Extreme Greed");
    }

    #[test]
    fn test_fear_greed_within_bounds() {
        let all_bull: Vec<Event> = (0..4).map(|i| labeled(i, SentimentLabel::Bullish)).collect();
        assert_eq!(compute_indices(&all_bull).fear_greed, 100);

        let no_bull: Vec<Event> = (0..4).map(|i| labeled(i, SentimentLabel::Neutral)).collect();
        assert_eq!(compute_indices(&no_bull).fear_greed, 0);
    }

    #[test]
    fn test_velocity_uses_trailing_window() {
        let now = Utc::now();
        let mut events: Vec<Event> = (0..7)
            .map(|i| Event::new(i.to_string()).with_timestamp(now - Duration::minutes(30 + i as i64 * 20)))
            .collect();
        // Outside the window, ignored
        events.push(Event::new("old").with_timestamp(now - Duration::hours(7)));
        events.push(Event::new("undated"));

        let indices = compute_indices_at(&events, now);
        // 7 / 6 = 1.1666 -> 1.2
        assert_relative_eq!(indices.velocity, 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_diversity_counts_universe_only() {
        let events = vec![
            Event::new("1").with_sector("Crypto"),
            Event::new("2").with_sector("Crypto"),
            Event::new("3").with_sector("Social"),
            Event::new("4").with_sector("Energy"),
            Event::new("5"),
        ];
        let indices = compute_indices(&events);
        assert_eq!(indices.diversity, SectorDiversity { active: 2, universe: 6 });
    }

    #[test]
    fn test_alert_rate() {
        let events = vec![
            Event::new("1").with_impact(Impact::High),
            Event::new("2").with_impact(Impact::Medium),
            Event::new("3"),
        ];
        let indices = compute_indices(&events);
        assert_eq!(indices.alert_rate, 33);
        assert_eq!(indices.high_impact_count, 1);
    }
}
