//! Usage ledger
//!
//! Per-item and per-group accumulated milliseconds for the current day.
//! The per-group counters are authoritative for enforcement; the per-item
//! counters are informational. Every mutation is persisted immediately;
//! persistence failures are logged and dropped (best-effort accounting,
//! a restart may under-count at most the last uncommitted session).

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use timewarden_api::{BlockedItem, UsageSnapshot};
use timewarden_store::ConfigStore;
use timewarden_util::GroupId;
use tracing::{debug, info, warn};

pub struct UsageLedger {
    store: Arc<dyn ConfigStore>,
    item_usage: HashMap<String, u64>,
    group_usage: HashMap<GroupId, u64>,
    last_reset: Option<NaiveDate>,
}

impl UsageLedger {
    /// Load today's counters from the store. Malformed persisted state has
    /// already been degraded to defaults by the store layer.
    pub fn load(store: Arc<dyn ConfigStore>, group_ids: &[GroupId]) -> Self {
        let item_usage = store.load_item_usage_millis();
        let group_usage = group_ids
            .iter()
            .map(|id| (id.clone(), store.load_group_usage_millis(id)))
            .collect();
        let last_reset = store.load_last_reset_day();

        Self {
            store,
            item_usage,
            group_usage,
            last_reset,
        }
    }

    /// Add a closed session's duration to the item's counter and its
    /// group's counter, then persist both. Zero or negative deltas are
    /// dropped, never subtracted, so clock anomalies cannot shrink totals.
    pub fn commit(&mut self, item: &BlockedItem, duration_millis: i64) {
        if duration_millis <= 0 {
            debug!(
                item = item.label(),
                duration_millis, "Dropping non-positive usage delta"
            );
            return;
        }
        let delta = duration_millis as u64;

        let item_total = self
            .item_usage
            .entry(item.identifier.clone())
            .or_insert(0);
        *item_total += delta;

        let group_total = self.group_usage.entry(item.group_id.clone()).or_insert(0);
        *group_total += delta;
        let group_total = *group_total;

        if let Err(e) = self.store.save_item_usage_millis(&self.item_usage) {
            warn!(error = %e, "Failed to persist item usage");
        }
        if let Err(e) = self
            .store
            .save_group_usage_millis(&item.group_id, group_total)
        {
            warn!(error = %e, "Failed to persist group usage");
        }

        debug!(
            item = item.label(),
            group = %item.group_id,
            added_ms = delta,
            group_total_ms = group_total,
            "Usage committed"
        );
    }

    /// Committed usage for a group, in milliseconds
    pub fn group_usage(&self, group: &GroupId) -> u64 {
        self.group_usage.get(group).copied().unwrap_or(0)
    }

    /// Committed usage for an item, in milliseconds
    pub fn item_usage(&self, identifier: &str) -> u64 {
        self.item_usage.get(identifier).copied().unwrap_or(0)
    }

    /// Zero all counters if the stored reset day differs from `today`.
    /// Idempotent: a second call on the same day changes nothing. Returns
    /// whether a reset occurred.
    pub fn rollover_if_new_day(&mut self, today: NaiveDate) -> bool {
        if self.last_reset == Some(today) {
            return false;
        }

        info!(
            previous = ?self.last_reset,
            day = %today,
            "New day, clearing daily usage"
        );

        self.item_usage.clear();
        self.group_usage.values_mut().for_each(|v| *v = 0);
        self.last_reset = Some(today);

        // Counters and date are written in one transaction so a crash
        // cannot leave them disagreeing.
        if let Err(e) = self.store.reset_daily_usage(today) {
            warn!(error = %e, "Failed to persist daily reset");
        }

        true
    }

    /// Write both usage maps out. Called on engine teardown so no
    /// committed usage is lost even if an individual commit's write failed.
    pub fn flush(&self) {
        if let Err(e) = self.store.save_item_usage_millis(&self.item_usage) {
            warn!(error = %e, "Failed to flush item usage");
        }
        for (group, millis) in &self.group_usage {
            if let Err(e) = self.store.save_group_usage_millis(group, *millis) {
                warn!(group = %group, error = %e, "Failed to flush group usage");
            }
        }
    }

    /// Snapshot for UI display
    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            item_usage_millis: self.item_usage.clone(),
            group_usage_millis: self.group_usage.clone(),
            day: self.last_reset,
        }
    }
}
