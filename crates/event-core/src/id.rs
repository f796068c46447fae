//! Event identity
//!
//! Upstream sources disagree on the JSON type of identifiers: the events API emits
//! strings, some narrative and watchlist producers emit numbers. Identity is therefore
//! compared on the string coercion of the raw value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use utoipa::ToSchema;

/// Largest float that still represents an integer exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Raw identifier as received (string or number)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl EventId {
    /// Canonical string key; `1`, `1.0` and `"1"` all map to `"1"`.
    pub fn key(&self) -> String {
        match self {
            EventId::Int(n) => n.to_string(),
            EventId::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            EventId::Text(s) => s.clone(),
        }
    }

    /// Empty strings carry no identity.
    pub fn is_resolvable(&self) -> bool {
        match self {
            EventId::Text(s) => !s.is_empty(),
            EventId::Float(f) => !f.is_nan(),
            EventId::Int(_) => true,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl PartialEq for EventId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for EventId {}

impl Hash for EventId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::Text(value.to_string())
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        EventId::Text(value)
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        EventId::Int(value)
    }
}
