//! Engine events
//!
//! Emitted by the engine for the service loop to log and for a UI to
//! observe. The engine has already acted on them; they carry no authority.

use chrono::NaiveDate;
use std::time::Duration;
use timewarden_api::BlockedItem;
use timewarden_util::SessionId;

#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A tracking session opened for a matched item
    SessionOpened {
        session_id: SessionId,
        item: BlockedItem,
    },

    /// A tracking session closed; its duration was offered to the ledger
    SessionClosed {
        session_id: SessionId,
        item: BlockedItem,
        duration: Duration,
    },

    /// The block dispatcher was invoked for an item
    BlockRequested {
        item: BlockedItem,
        group_usage_millis: u64,
    },

    /// Daily counters were reset for a new day
    DayRolledOver { day: NaiveDate },
}
