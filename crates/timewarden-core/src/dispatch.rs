//! Block dispatch
//!
//! The narrow action the enforcer invokes when an allowance is exhausted:
//! present a blocking screen for the item and attempt to move the
//! foreground away from it. Implementations must not fail the engine;
//! a redirect failure is logged and the block still counts as requested.

use std::sync::Mutex;
use timewarden_api::BlockedItem;
use tracing::warn;

pub trait BlockDispatcher: Send + Sync {
    fn request_block(&self, item: &BlockedItem);
}

/// Dispatcher that only logs. Useful when no block command is configured.
pub struct LogDispatcher;

impl BlockDispatcher for LogDispatcher {
    fn request_block(&self, item: &BlockedItem) {
        warn!(
            item = item.label(),
            identifier = %item.identifier,
            group = %item.group_id,
            "Block requested"
        );
    }
}

/// Dispatcher that records every request, for tests.
#[derive(Default)]
pub struct RecordingDispatcher {
    requests: Mutex<Vec<BlockedItem>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<BlockedItem> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl BlockDispatcher for RecordingDispatcher {
    fn request_block(&self, item: &BlockedItem) {
        self.requests.lock().unwrap().push(item.clone());
    }
}
