//! Opportunity Radar Module
//!
//! Rule-based detection of actionable sector signals from sentiment extremes,
//! high-impact clusters, social volume and ML impact probabilities.

pub mod models;
pub mod radar;
pub mod rules;

pub use models::{Signal, SignalKind, SignalMode, SignalSource};
pub use radar::{detect_signals, OpportunityRadar};
pub use rules::SignalRule;
