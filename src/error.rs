//! Error types shared by the catalog and the session controller.

use thiserror::Error;

/// Failures while bringing the word catalog up. Both are fatal: the game
/// never reaches the start screen without a catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("word catalog unavailable: {0}")]
    DataUnavailable(String),
    #[error("word catalog malformed: {0}")]
    DataMalformed(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::DataMalformed(err.to_string())
    }
}

/// Errors emitted when a session cannot be started.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("unit {0} does not exist")]
    UnknownUnit(u32),
    #[error("no words available to quiz")]
    EmptyPool,
    #[error("no previous session to restart")]
    NothingToRestart,
}
