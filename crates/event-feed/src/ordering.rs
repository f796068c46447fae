//! Feed ordering policies
//!
//! Every mode sorts by a primary score, descending, then by timestamp, newest
//! first. Events without a usable timestamp sink below every dated event.

use chrono::{DateTime, Utc};
use event_core::{Event, EventError, Impact};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

const URGENT_WEIGHT: u32 = 1000;
const HIGH_IMPACT_WEIGHT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first
    #[default]
    Timestamp,
    /// Urgent before high impact before everything else
    Urgency,
    /// High, then medium, then the rest
    Impact,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Timestamp => "timestamp",
            SortMode::Urgency => "urgency",
            SortMode::Impact => "impact",
        }
    }

    /// Primary sort score; higher comes first
    pub fn score(&self, event: &Event) -> u32 {
        match self {
            SortMode::Timestamp => 0,
            SortMode::Urgency => {
                let urgent = if event.is_urgent() { URGENT_WEIGHT } else { 0 };
                let high = if event.is_high_impact() { HIGH_IMPACT_WEIGHT } else { 0 };
                urgent + high
            }
            SortMode::Impact => match event.impact {
                Some(Impact::High) => 3,
                Some(Impact::Medium) => 2,
                _ => 1,
            },
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(SortMode::Timestamp),
            "urgency" => Ok(SortMode::Urgency),
            "impact" => Ok(SortMode::Impact),
            _ => Err(EventError::UnknownSortMode(s.to_string())),
        }
    }
}

fn sort_key(mode: SortMode, event: &Event) -> (Reverse<u32>, Reverse<Option<DateTime<Utc>>>) {
    (Reverse(mode.score(event)), Reverse(event.timestamp_utc()))
}

/// Stable sort of the feed under `mode`; the input is left untouched
pub fn order_events(events: &[Event], mode: SortMode) -> Vec<Event> {
    let mut ordered = events.to_vec();
    sort_events(&mut ordered, mode);
    ordered
}

/// In-place variant of [`order_events`]
pub fn sort_events(events: &mut [Event], mode: SortMode) {
    events.sort_by_cached_key(|event| sort_key(mode, event));

    let undated = events.iter().filter(|e| e.timestamp_utc().is_none()).count();
    tracing::debug!(%mode, events = events.len(), undated, "event feed ordered");
}
