//! Persistence layer for timewarden
//!
//! Provides the logical key space the engine persists into:
//! - `blocked_items` - the configured blocklist (JSON array)
//! - `group_limit:<id>` - per-group daily allowance in minutes
//! - `group_usage:<id>` - per-group accumulated milliseconds for today
//! - `item_usage` - per-item accumulated milliseconds (JSON object)
//! - `last_reset_date` - ISO date of the last daily reset
//!
//! All reads tolerate absence and malformed content: they log the anomaly
//! and return a default, never an error. Writes report errors so the caller
//! can log and drop them (the ledger is best-effort, not durability-bound).

mod sqlite;
mod traits;

pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

/// Store errors (writes only; reads degrade to defaults)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
