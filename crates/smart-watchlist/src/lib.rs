//! Smart Watchlist Module
//!
//! Identity-based watchlist reconciliation. Items are plain events; narratives
//! are adapted into synthetic events before they are saved, so the reconciler
//! never needs to tell the two apart.

pub mod narrative;
pub mod reconciler;

pub use narrative::{adapt_narrative, adapt_narrative_at, NARRATIVE_COUNTRY, NARRATIVE_SOURCE};
pub use reconciler::{is_watchlisted, resolve_id, toggle_watchlist, Watchlist, WatchlistChange};
