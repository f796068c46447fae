//! Market pulse and risk matrix
//!
//! Display-level summaries: every event counts here, identified or not.

use event_core::math::percent;
use event_core::{Event, Sector, SentimentLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Minimum impact score for the upper half of the risk matrix
pub const RISK_SCORE_THRESHOLD: f64 = 5.0;
/// Polarity dead zone around zero
pub const RISK_POLARITY_THRESHOLD: f64 = 0.1;

/// Bull/bear split for one sector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectorSentimentBar {
    pub sector: Sector,
    pub total: usize,
    pub bullish_pct: u32,
    pub bearish_pct: u32,
    pub neutral_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MarketPulse {
    pub total_volume: usize,
    /// Events that are high impact or urgent
    pub max_alert_count: usize,
    pub sectors: Vec<SectorSentimentBar>,
}

#[derive(Default)]
struct SentimentTally {
    total: usize,
    bullish: usize,
    bearish: usize,
}

/// Volume, alert count and one sentiment bar per sector present in `events`
///
/// Bars come out in universe order, `Global` last.
pub fn market_pulse(events: &[Event]) -> MarketPulse {
    let mut max_alert_count = 0;
    let mut tallies: BTreeMap<Sector, SentimentTally> = BTreeMap::new();

    for event in events {
        if event.is_high_impact() || event.is_urgent() {
            max_alert_count += 1;
        }

        let tally = tallies.entry(event.sector_group()).or_default();
        tally.total += 1;
        match event.sentiment_label() {
            SentimentLabel::Bullish => tally.bullish += 1,
            SentimentLabel::Bearish => tally.bearish += 1,
            SentimentLabel::Neutral => {}
        }
    }

    let sectors = tallies
        .into_iter()
        .map(|(sector, tally)| {
            let bullish_pct = percent(tally.bullish, tally.total);
            let bearish_pct = percent(tally.bearish, tally.total);
            SectorSentimentBar {
                sector,
                total: tally.total,
                bullish_pct,
                bearish_pct,
                neutral_pct: 100u32.saturating_sub(bullish_pct + bearish_pct),
            }
        })
        .collect();

    MarketPulse {
        total_volume: events.len(),
        max_alert_count,
        sectors,
    }
}

/// Quadrant of the sentiment-vs-impact scatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskQuadrant {
    HighImpactBearish,
    HighImpactBullish,
    Background,
}

impl RiskQuadrant {
    pub fn classify(polarity: f64, score: f64) -> Self {
        if score < RISK_SCORE_THRESHOLD {
            RiskQuadrant::Background
        } else if polarity <= -RISK_POLARITY_THRESHOLD {
            RiskQuadrant::HighImpactBearish
        } else if polarity >= RISK_POLARITY_THRESHOLD {
            RiskQuadrant::HighImpactBullish
        } else {
            RiskQuadrant::Background
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskPoint {
    pub event_id: Option<String>,
    pub title: Option<String>,
    pub sector: Sector,
    pub sentiment: SentimentLabel,
    /// Sentiment polarity (-1 to 1)
    pub x: f64,
    /// Impact score (0 to 10)
    pub y: f64,
    pub quadrant: RiskQuadrant,
}

/// Plot events carrying both a sentiment and an impact score
pub fn risk_matrix(events: &[Event]) -> Vec<RiskPoint> {
    events
        .iter()
        .filter_map(|event| {
            let sentiment = event.sentiment()?;
            let y = event.score()?;
            let x = sentiment.polarity.unwrap_or(0.0);
            Some(RiskPoint {
                event_id: event.identity_key(),
                title: event.title.clone(),
                sector: event.sector_group(),
                sentiment: sentiment.label,
                x,
                y,
                quadrant: RiskQuadrant::classify(x, y),
            })
        })
        .collect()
}
