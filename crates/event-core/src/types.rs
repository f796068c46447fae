use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::{EventError, EventId};

/// Market sector an event is grouped under
///
/// Declaration order is the canonical universe order and drives every
/// sector-ordered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum Sector {
    Macro,
    Market,
    Crypto,
    Tech,
    Commodities,
    Social,
    /// Fallback bucket for missing or unrecognized sectors
    Global,
}

impl Sector {
    /// The fixed six-sector universe (excludes `Global`)
    pub const UNIVERSE: [Sector; 6] = [
        Sector::Macro,
        Sector::Market,
        Sector::Crypto,
        Sector::Tech,
        Sector::Commodities,
        Sector::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Macro => "Macro",
            Sector::Market => "Market",
            Sector::Crypto => "Crypto",
            Sector::Tech => "Tech",
            Sector::Commodities => "Commodities",
            Sector::Social => "Social",
            Sector::Global => "Global",
        }
    }

    /// Map a raw sector string by exact name, falling back to `Global`
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(Sector::Global)
    }

    pub fn in_universe(&self) -> bool {
        *self != Sector::Global
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Macro" => Ok(Sector::Macro),
            "Market" => Ok(Sector::Market),
            "Crypto" => Ok(Sector::Crypto),
            "Tech" => Ok(Sector::Tech),
            "Commodities" => Ok(Sector::Commodities),
            "Social" => Ok(Sector::Social),
            "Global" => Ok(Sector::Global),
            _ => Err(EventError::UnknownSector(s.to_string())),
        }
    }
}

/// Categorical impact of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    #[serde(other)]
    Low,
}

/// Urgency flag set by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    #[serde(other)]
    Normal,
}

/// Categorical sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    #[default]
    #[serde(other)]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NLP sentiment attached to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Bearish-to-bullish lean (-1 to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<f64>,
}

impl Sentiment {
    pub fn labeled(label: SentimentLabel) -> Self {
        Self { label, polarity: None }
    }
}

/// Enrichment block produced by the analysis service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventAnalytics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Impact magnitude (0 to 10), independent of the categorical impact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Enriched event as served by the events API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    /// Storage id, used as identity when `id` is absent
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// ISO-8601 timestamp, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<EventAnalytics>,
    #[serde(rename = "isNarrative", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_narrative: bool,
}

impl Event {
    pub fn new(id: impl Into<EventId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_sector(mut self, sector: &str) -> Self {
        self.sector = Some(sector.to_string());
        self
    }

    pub fn with_sentiment(mut self, label: SentimentLabel) -> Self {
        self.analytics.get_or_insert_with(EventAnalytics::default).sentiment =
            Some(Sentiment::labeled(label));
        self
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp.to_rfc3339());
        self
    }

    /// `id ?? _id`, ignoring ids that carry no identity
    pub fn identity(&self) -> Option<&EventId> {
        self.id
            .as_ref()
            .filter(|id| id.is_resolvable())
            .or_else(|| self.storage_id.as_ref().filter(|id| id.is_resolvable()))
    }

    /// String-coerced identity used for lookups and comparisons
    pub fn identity_key(&self) -> Option<String> {
        self.identity().map(EventId::key)
    }

    /// Parsed timestamp; zone-less values are read as UTC
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    /// Grouping sector (`Global` when missing or unrecognized)
    pub fn sector_group(&self) -> Sector {
        Sector::from_raw(self.sector.as_deref())
    }

    pub fn sentiment(&self) -> Option<&Sentiment> {
        self.analytics.as_ref().and_then(|a| a.sentiment.as_ref())
    }

    /// Sentiment label, missing sentiment counts as neutral
    pub fn sentiment_label(&self) -> SentimentLabel {
        self.sentiment().map(|s| s.label).unwrap_or_default()
    }

    pub fn polarity(&self) -> Option<f64> {
        self.sentiment().and_then(|s| s.polarity)
    }

    pub fn score(&self) -> Option<f64> {
        self.analytics.as_ref().and_then(|a| a.score)
    }

    pub fn is_high_impact(&self) -> bool {
        self.impact == Some(Impact::High)
    }

    pub fn is_urgent(&self) -> bool {
        self.urgency == Some(Urgency::Urgent)
    }

    /// Primary link: explicit link, else the source URL
    pub fn link_or_source(&self) -> Option<&str> {
        self.link
            .as_deref()
            .or_else(|| self.source.as_ref().and_then(|s| s.url.as_deref()))
    }
}

/// Parse an ISO-8601 timestamp as emitted by the collector services
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
