//! Narrative adaptation
//!
//! Turns a narrative cluster into a synthetic event so it can be saved to the
//! watchlist next to ordinary events.

use chrono::{DateTime, SecondsFormat, Utc};
use event_core::{Event, EventAnalytics, EventLocation, EventSource, Narrative, Sentiment};

pub const NARRATIVE_SOURCE: &str = "Narrative Engine";
pub const NARRATIVE_COUNTRY: &str = "INTL";

/// Adapt a narrative, stamping it with the current time when it has no events
pub fn adapt_narrative(narrative: &Narrative) -> Event {
    adapt_narrative_at(narrative, Utc::now())
}

/// Adapt a narrative using `now` as the fallback timestamp
///
/// Link and timestamp come from the first (latest) clustered event.
pub fn adapt_narrative_at(narrative: &Narrative, now: DateTime<Utc>) -> Event {
    let lead = narrative.events.first();

    let link = lead.and_then(|e| e.link_or_source()).map(str::to_string);
    let timestamp = lead
        .and_then(|e| e.timestamp.clone())
        .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));

    Event {
        id: Some(narrative.id.clone()),
        title: Some(narrative.title.clone()),
        description: Some(format!("{} news — {}", narrative.event_count, narrative.sector)),
        link,
        timestamp: Some(timestamp),
        source: Some(EventSource {
            name: Some(NARRATIVE_SOURCE.to_string()),
            url: None,
        }),
        location: Some(EventLocation {
            country: Some(NARRATIVE_COUNTRY.to_string()),
            region: None,
        }),
        analytics: Some(EventAnalytics {
            sentiment: Some(Sentiment::labeled(narrative.overall_sentiment)),
            score: None,
        }),
        is_narrative: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{is_watchlisted, toggle_watchlist};
    use chrono::TimeZone;
    use event_core::{EventId, SentimentLabel};

    fn narrative(events: Vec<Event>) -> Narrative {
        Narrative {
            id: EventId::Int(17),
            sector: "Commodities".to_string(),
            title: "Oil supply shock".to_string(),
            event_count: 4,
            overall_sentiment: SentimentLabel::Bearish,
            events,
        }
    }

    #[test]
    fn test_adapt_uses_lead_event() {
        let mut lead = Event::new("e1");
        lead.timestamp = Some("2026-03-01T08:00:00Z".to_string());
        lead.source = Some(EventSource {
            name: Some("Reuters".to_string()),
            url: Some("https://example.com/oil".to_string()),
        });

        let adapted = adapt_narrative(&narrative(vec![lead, Event::new("e2")]));

        assert_eq!(adapted.identity_key().as_deref(), Some("17"));
        assert_eq!(adapted.title.as_deref(), Some("Oil supply shock"));
        assert_eq!(adapted.link.as_deref(), Some("https://example.com/oil"));
        assert_eq!(adapted.timestamp.as_deref(), Some("2026-03-01T08:00:00Z"));
        assert_eq!(adapted.description.as_deref(), Some("4 news — Commodities"));
        assert_eq!(adapted.sentiment_label(), SentimentLabel::Bearish);
        assert_eq!(adapted.source.and_then(|s| s.name).as_deref(), Some(NARRATIVE_SOURCE));
        assert_eq!(adapted.location.and_then(|l| l.country).as_deref(), Some(NARRATIVE_COUNTRY));
        assert!(adapted.is_narrative);
    }

    #[test]
    fn test_explicit_link_preferred_over_source_url() {
        let mut lead = Event::new("e1");
        lead.link = Some("https://example.com/direct".to_string());
        lead.source = Some(EventSource {
            name: None,
            url: Some("https://example.com/source".to_string()),
        });

        let adapted = adapt_narrative(&narrative(vec![lead]));
        assert_eq!(adapted.link.as_deref(), Some("https://example.com/direct"));
    }

    #[test]
    fn test_empty_narrative_falls_back_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 5, 4, 3, 2, 1).unwrap();
        let adapted = adapt_narrative_at(&narrative(Vec::new()), now);

        assert!(adapted.link.is_none());
        assert_eq!(adapted.timestamp.as_deref(), Some("2026-05-04T03:02:01.000Z"));
        assert_eq!(adapted.timestamp_utc(), Some(now));
    }

    #[test]
    fn test_adapted_narrative_toggles_like_an_event() {
        let adapted = adapt_narrative(&narrative(Vec::new()));
        let list = toggle_watchlist(&[], &adapted);

        assert!(is_watchlisted(&list, &Event::new("17")));
        assert!(toggle_watchlist(&list, &adapted).is_empty());
    }
}
