//! Shared domain types for timewarden
//!
//! These types cross crate boundaries: the store persists them, the core
//! engine enforces against them, and the UI reads them for display.

mod types;

pub use types::*;
