//! Shared utilities for timewarden
//!
//! This crate provides:
//! - ID types (GroupId, SessionId)
//! - Time utilities (monotonic time, day keys, duration helpers)
//! - Default paths for config and data directories

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
