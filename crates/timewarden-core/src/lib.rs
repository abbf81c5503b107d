//! Usage-tracking and limit-enforcement engine for timewarden
//!
//! This crate is the heart of timewardend, containing:
//! - Blocklist registry (items and per-group allowances)
//! - Foreground matching (app-exact, then website-substring-in-browser)
//! - Session state machine (Idle <-> Tracking)
//! - Usage ledger (per-item and per-group daily counters, persisted)
//! - Limit enforcement (reactive on session close, periodic while open)
//!
//! The engine is synchronous and single-threaded: the caller serializes
//! foreground signals and the periodic timer onto one queue.

mod dispatch;
mod enforcer;
mod engine;
mod events;
mod ledger;
mod matcher;
mod registry;
mod session;

pub use dispatch::*;
pub use enforcer::*;
pub use engine::*;
pub use events::*;
pub use ledger::*;
pub use matcher::*;
pub use registry::*;
pub use session::*;
