//! Domain types shared across the timewarden crates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use timewarden_util::GroupId;

/// What kind of thing a blocked item identifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Identifier is a package name, matched exactly
    App,
    /// Identifier is a hostname or substring, matched case-insensitively
    /// against the URL visible in a browser
    Website,
}

/// A configured application or website subject to a usage allowance.
///
/// Items persist as a JSON array under the `blocked_items` key. Uniqueness
/// of (identifier, kind) within a group is expected but not enforced;
/// duplicates are tolerated and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedItem {
    /// Package name (App) or hostname/substring (Website). Never empty.
    pub identifier: String,

    pub kind: ItemKind,

    /// User-friendly name when the identifier is opaque
    #[serde(default)]
    pub display_name: Option<String>,

    /// Group whose allowance this item draws from
    #[serde(default)]
    pub group_id: GroupId,
}

impl BlockedItem {
    pub fn app(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: ItemKind::App,
            display_name: Some(display_name.into()),
            group_id: GroupId::default_group(),
        }
    }

    pub fn website(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: ItemKind::Website,
            display_name: Some(display_name.into()),
            group_id: GroupId::default_group(),
        }
    }

    /// Name shown on the block screen and in logs
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

/// Snapshot of today's accumulated usage, for UI display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Per-item accumulated milliseconds (informational)
    pub item_usage_millis: HashMap<String, u64>,

    /// Per-group accumulated milliseconds (authoritative for enforcement)
    pub group_usage_millis: HashMap<GroupId, u64>,

    /// Day the counters were last reset for
    pub day: Option<NaiveDate>,
}
