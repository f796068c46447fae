use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Unknown sector: {0}")]
    UnknownSector(String),

    #[error("Unknown sort mode: {0}")]
    UnknownSortMode(String),

    #[error("Unknown confidence level: {0}")]
    UnknownConfidence(String),
}
