//! Market overview boards
//!
//! Display views: unidentified events are kept, only the ordering matters.

use event_core::{Event, Sector, SentimentLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::ordering::{order_events, SortMode};

pub const DEFAULT_TOP_MOVERS: usize = 5;

/// Most recent bullish and bearish headlines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopMovers {
    pub bullish: Vec<Event>,
    pub bearish: Vec<Event>,
}

fn newest_with(ordered: &[Event], label: SentimentLabel, n: usize) -> Vec<Event> {
    ordered
        .iter()
        .filter(|e| e.sentiment().map(|s| s.label) == Some(label))
        .take(n)
        .cloned()
        .collect()
}

/// The `n` newest bullish and `n` newest bearish events
pub fn top_movers(events: &[Event], n: usize) -> TopMovers {
    let ordered = order_events(events, SortMode::Timestamp);
    TopMovers {
        bullish: newest_with(&ordered, SentimentLabel::Bullish, n),
        bearish: newest_with(&ordered, SentimentLabel::Bearish, n),
    }
}

/// Bucket events by sector group, newest first within each bucket
pub fn group_by_sector(events: &[Event]) -> BTreeMap<Sector, Vec<Event>> {
    let mut board: BTreeMap<Sector, Vec<Event>> = BTreeMap::new();
    for event in order_events(events, SortMode::Timestamp) {
        board.entry(event.sector_group()).or_default().push(event);
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_top_movers_newest_per_side() {
        let now = Utc::now();
        let events: Vec<Event> = (0..8)
            .map(|i| {
                let label = if i % 2 == 0 { SentimentLabel::Bullish } else { SentimentLabel::Bearish };
                Event::new(format!("e{}", i))
                    .with_sentiment(label)
                    .with_timestamp(now - Duration::minutes(i))
            })
            .chain(std::iter::once(Event::new("flat").with_timestamp(now)))
            .collect();

        let movers = top_movers(&events, 3);
        let bullish: Vec<_> = movers.bullish.iter().filter_map(|e| e.identity_key()).collect();
        let bearish: Vec<_> = movers.bearish.iter().filter_map(|e| e.identity_key()).collect();

        assert_eq!(bullish, vec!["e0", "e2", "e4"]);
        assert_eq!(bearish, vec!["e1", "e3", "e5"]);
    }

    #[test]
    fn test_top_movers_ignores_missing_sentiment() {
        let movers = top_movers(&[Event::new("x")], DEFAULT_TOP_MOVERS);
        assert!(movers.bullish.is_empty());
        assert!(movers.bearish.is_empty());
    }

    #[test]
    fn test_group_by_sector_buckets_newest_first() {
        let now = Utc::now();
        let events = vec![
            Event::new("t-old").with_sector("Tech").with_timestamp(now - Duration::hours(2)),
            Event::new("energy").with_sector("Energy").with_timestamp(now),
            Event::new("t-new").with_sector("Tech").with_timestamp(now),
            Event::new("m").with_sector("Macro"),
        ];
        let board = group_by_sector(&events);

        let sectors: Vec<_> = board.keys().copied().collect();
        assert_eq!(sectors, vec![Sector::Macro, Sector::Tech, Sector::Global]);

        let tech: Vec<_> = board[&Sector::Tech].iter().filter_map(|e| e.identity_key()).collect();
        assert_eq!(tech, vec!["t-new", "t-old"]);
        assert_eq!(board[&Sector::Global].len(), 1);
    }
}
