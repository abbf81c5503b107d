//! Block dispatcher for the service
//!
//! Presents the block by spawning the configured command (the host side
//! of the block screen) with the item's label and identifier appended.
//! The spawn is the "redirect the foreground away" attempt: if it fails,
//! the failure is logged and the block still counts as requested.

use std::process::Command;
use timewarden_api::BlockedItem;
use timewarden_core::BlockDispatcher;
use tracing::{info, warn};

pub struct CommandDispatcher {
    command: Vec<String>,
}

impl CommandDispatcher {
    /// `command` is validated non-empty at config load.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl BlockDispatcher for CommandDispatcher {
    fn request_block(&self, item: &BlockedItem) {
        warn!(
            item = item.label(),
            identifier = %item.identifier,
            group = %item.group_id,
            "Blocking"
        );

        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..])
            .arg(item.label())
            .arg(&item.identifier);

        match cmd.spawn() {
            Ok(child) => {
                info!(pid = child.id(), "Block command spawned");
            }
            Err(e) => {
                warn!(command = %self.command[0], error = %e, "Block command failed, block stands");
            }
        }
    }
}
