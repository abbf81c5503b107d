//! Store trait definitions

use chrono::NaiveDate;
use std::collections::HashMap;
use timewarden_api::BlockedItem;
use timewarden_util::GroupId;

use crate::StoreResult;

/// The persistent configuration and usage store.
///
/// Reads return defaults on absence or malformed content and never fail;
/// writes return a result the caller is expected to log and drop.
pub trait ConfigStore: Send + Sync {
    // Blocklist

    /// Load the configured blocklist. None means nothing has been saved
    /// yet (or the saved value was unreadable) and the caller should fall
    /// back to built-in defaults.
    fn load_blocked_items(&self) -> Option<Vec<BlockedItem>>;

    /// Save the blocklist as a JSON array.
    fn save_blocked_items(&self, items: &[BlockedItem]) -> StoreResult<()>;

    // Group allowances

    /// Load a group's daily allowance in minutes. None when absent.
    fn load_group_limit_minutes(&self, group: &GroupId) -> Option<u64>;

    /// Save a group's daily allowance in minutes.
    fn save_group_limit_minutes(&self, group: &GroupId, minutes: u64) -> StoreResult<()>;

    // Usage counters

    /// Load a group's accumulated usage for today, in milliseconds.
    fn load_group_usage_millis(&self, group: &GroupId) -> u64;

    /// Save a group's accumulated usage for today, in milliseconds.
    fn save_group_usage_millis(&self, group: &GroupId, millis: u64) -> StoreResult<()>;

    /// Load the per-item usage map (identifier -> milliseconds).
    fn load_item_usage_millis(&self) -> HashMap<String, u64>;

    /// Save the per-item usage map as a JSON object.
    fn save_item_usage_millis(&self, usage: &HashMap<String, u64>) -> StoreResult<()>;

    // Daily reset

    /// Load the day the counters were last reset for. None when absent.
    fn load_last_reset_day(&self) -> Option<NaiveDate>;

    /// Save the day the counters were last reset for.
    fn save_last_reset_day(&self, day: NaiveDate) -> StoreResult<()>;

    /// Zero all per-item and per-group counters and record the new day in
    /// a single transaction, so an interruption cannot leave counters and
    /// date disagreeing.
    fn reset_daily_usage(&self, day: NaiveDate) -> StoreResult<()>;

    // Health

    /// Check if the store is usable.
    fn is_healthy(&self) -> bool;
}
