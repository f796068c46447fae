//! Event Core
//!
//! Shared data shapes for enriched market events, ML predictions and narratives,
//! plus the derived-field accessors every analytics crate relies on.

pub mod error;
pub mod id;
pub mod math;
pub mod prediction;
pub mod types;

pub use error::*;
pub use id::EventId;
pub use prediction::{index_predictions, Narrative, Prediction, PredictionConfidence};
pub use types::*;
