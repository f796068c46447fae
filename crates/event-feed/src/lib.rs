//! Event Feed
//!
//! Ordering policies for the live intelligence feed, plus the sentiment
//! movers and per-sector board views built on the same newest-first order.

pub mod board;
pub mod ordering;

pub use board::{group_by_sector, top_movers, TopMovers, DEFAULT_TOP_MOVERS};
pub use ordering::{order_events, sort_events, SortMode};
