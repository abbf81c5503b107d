//! SQLite-based store implementation
//!
//! The key space is a single `prefs` table of string keys and string
//! values. Structured values (blocklist, item usage map) are JSON.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use timewarden_api::BlockedItem;
use timewarden_util::{format_day, parse_day, GroupId};
use tracing::{debug, warn};

use crate::{ConfigStore, StoreResult};

const KEY_BLOCKED_ITEMS: &str = "blocked_items";
const KEY_ITEM_USAGE: &str = "item_usage";
const KEY_LAST_RESET_DATE: &str = "last_reset_date";
const GROUP_LIMIT_PREFIX: &str = "group_limit:";
const GROUP_USAGE_PREFIX: &str = "group_usage:";

/// SQLite-backed key/value store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    fn get_string(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().unwrap();

        let result = conn
            .query_row("SELECT value FROM prefs WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional();

        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Store read failed, treating as absent");
                None
            }
        }
    }

    fn set_string(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            INSERT INTO prefs (key, value)
            VALUES (?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;

        Ok(())
    }

    fn group_limit_key(group: &GroupId) -> String {
        format!("{}{}", GROUP_LIMIT_PREFIX, group)
    }

    fn group_usage_key(group: &GroupId) -> String {
        format!("{}{}", GROUP_USAGE_PREFIX, group)
    }
}

impl ConfigStore for SqliteStore {
    fn load_blocked_items(&self) -> Option<Vec<BlockedItem>> {
        let json = self.get_string(KEY_BLOCKED_ITEMS)?;

        match serde_json::from_str(&json) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(error = %e, "Malformed blocked items JSON, falling back to defaults");
                None
            }
        }
    }

    fn save_blocked_items(&self, items: &[BlockedItem]) -> StoreResult<()> {
        let json = serde_json::to_string(items)?;
        self.set_string(KEY_BLOCKED_ITEMS, &json)?;
        debug!(item_count = items.len(), "Blocked items saved");
        Ok(())
    }

    fn load_group_limit_minutes(&self, group: &GroupId) -> Option<u64> {
        let value = self.get_string(&Self::group_limit_key(group))?;

        match value.parse() {
            Ok(minutes) => Some(minutes),
            Err(_) => {
                warn!(group = %group, value, "Malformed group limit, treating as absent");
                None
            }
        }
    }

    fn save_group_limit_minutes(&self, group: &GroupId, minutes: u64) -> StoreResult<()> {
        self.set_string(&Self::group_limit_key(group), &minutes.to_string())?;
        debug!(group = %group, minutes, "Group limit saved");
        Ok(())
    }

    fn load_group_usage_millis(&self, group: &GroupId) -> u64 {
        let Some(value) = self.get_string(&Self::group_usage_key(group)) else {
            return 0;
        };

        match value.parse() {
            Ok(millis) => millis,
            Err(_) => {
                warn!(group = %group, value, "Malformed group usage, treating as zero");
                0
            }
        }
    }

    fn save_group_usage_millis(&self, group: &GroupId, millis: u64) -> StoreResult<()> {
        self.set_string(&Self::group_usage_key(group), &millis.to_string())
    }

    fn load_item_usage_millis(&self) -> HashMap<String, u64> {
        let Some(json) = self.get_string(KEY_ITEM_USAGE) else {
            return HashMap::new();
        };

        match serde_json::from_str(&json) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "Malformed item usage JSON, treating as empty");
                HashMap::new()
            }
        }
    }

    fn save_item_usage_millis(&self, usage: &HashMap<String, u64>) -> StoreResult<()> {
        let json = serde_json::to_string(usage)?;
        self.set_string(KEY_ITEM_USAGE, &json)
    }

    fn load_last_reset_day(&self) -> Option<NaiveDate> {
        let value = self.get_string(KEY_LAST_RESET_DATE)?;

        let parsed = parse_day(&value);
        if parsed.is_none() {
            warn!(value, "Malformed last reset date, treating as absent");
        }
        parsed
    }

    fn save_last_reset_day(&self, day: NaiveDate) -> StoreResult<()> {
        self.set_string(KEY_LAST_RESET_DATE, &format_day(day))
    }

    fn reset_daily_usage(&self, day: NaiveDate) -> StoreResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM prefs WHERE key LIKE ? || '%'",
            [GROUP_USAGE_PREFIX],
        )?;
        tx.execute(
            r#"
            INSERT INTO prefs (key, value) VALUES (?, '{}')
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            [KEY_ITEM_USAGE],
        )?;
        tx.execute(
            r#"
            INSERT INTO prefs (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![KEY_LAST_RESET_DATE, format_day(day)],
        )?;

        tx.commit()?;
        debug!(day = %day, "Daily usage reset persisted");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}
