//! Blocklist registry
//!
//! The set of configured items-to-limit and the per-group daily allowance.
//! Loaded from the store at engine start; read-only afterwards except for
//! the first-run fallback to built-in defaults, which is written back so
//! the settings UI sees the same list.

use std::collections::HashMap;
use timewarden_api::BlockedItem;
use timewarden_config::default_blocked_items;
use timewarden_store::ConfigStore;
use timewarden_util::GroupId;
use tracing::{info, warn};

/// A named bucket of blocked items sharing one daily allowance
#[derive(Debug, Clone)]
pub struct Group {
    pub id: GroupId,

    /// Daily allowance in minutes. Zero means "always blocked once touched".
    pub limit_minutes: u64,
}

/// The configured blocklist and group allowances
#[derive(Debug)]
pub struct Registry {
    items: Vec<BlockedItem>,
    groups: HashMap<GroupId, Group>,
    default_limit_minutes: u64,
}

impl Registry {
    /// Load the registry from the store. Falls back to the built-in default
    /// blocklist (and saves it) when nothing usable is stored. Returns the
    /// registry and whether defaults were seeded.
    pub fn load(store: &dyn ConfigStore, default_limit_minutes: u64) -> (Self, bool) {
        let (items, seeded) = match store.load_blocked_items() {
            Some(items) => (items, false),
            None => {
                let items = default_blocked_items();
                if let Err(e) = store.save_blocked_items(&items) {
                    warn!(error = %e, "Failed to seed default blocked items");
                }
                info!(item_count = items.len(), "No saved blocklist, seeded defaults");
                (items, true)
            }
        };

        // Empty identifiers can never match anything; drop them here so the
        // matcher does not have to re-check the invariant on every signal.
        let items: Vec<BlockedItem> = items
            .into_iter()
            .filter(|item| {
                if item.identifier.is_empty() {
                    warn!("Dropping blocked item with empty identifier");
                    false
                } else {
                    true
                }
            })
            .collect();

        let mut groups = HashMap::new();
        let default_group = GroupId::default_group();
        for group_id in items
            .iter()
            .map(|i| &i.group_id)
            .chain(std::iter::once(&default_group))
        {
            if !groups.contains_key(group_id) {
                let limit_minutes = store
                    .load_group_limit_minutes(group_id)
                    .unwrap_or(default_limit_minutes);
                groups.insert(
                    group_id.clone(),
                    Group {
                        id: group_id.clone(),
                        limit_minutes,
                    },
                );
            }
        }

        (
            Self {
                items,
                groups,
                default_limit_minutes,
            },
            seeded,
        )
    }

    pub fn items(&self) -> &[BlockedItem] {
        &self.items
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.keys().cloned().collect()
    }

    /// A group's allowance in minutes, falling back to the default for a
    /// group the registry has never seen.
    pub fn limit_minutes(&self, id: &GroupId) -> u64 {
        self.groups
            .get(id)
            .map(|g| g.limit_minutes)
            .unwrap_or(self.default_limit_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timewarden_store::SqliteStore;

    #[test]
    fn seeds_defaults_when_store_empty() {
        let store = SqliteStore::in_memory().unwrap();

        let (registry, seeded) = Registry::load(&store, 60);

        assert!(seeded);
        assert!(!registry.items().is_empty());
        // The seeded list is persisted for the settings UI.
        assert_eq!(
            store.load_blocked_items().unwrap().len(),
            registry.items().len()
        );
    }

    #[test]
    fn loads_saved_items_without_seeding() {
        let store = SqliteStore::in_memory().unwrap();
        let items = vec![BlockedItem::app("com.example.game", "Game")];
        store.save_blocked_items(&items).unwrap();

        let (registry, seeded) = Registry::load(&store, 60);

        assert!(!seeded);
        assert_eq!(registry.items(), items.as_slice());
    }

    #[test]
    fn group_limit_from_store_overrides_default() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .save_group_limit_minutes(&GroupId::default_group(), 5)
            .unwrap();

        let (registry, _) = Registry::load(&store, 60);

        assert_eq!(registry.limit_minutes(&GroupId::default_group()), 5);
        // Unknown groups fall back to the default allowance.
        assert_eq!(registry.limit_minutes(&GroupId::new("other")), 60);
    }

    #[test]
    fn drops_empty_identifiers() {
        let store = SqliteStore::in_memory().unwrap();
        let items = vec![
            BlockedItem::app("", "Broken"),
            BlockedItem::website("youtube.com", "YouTube"),
        ];
        store.save_blocked_items(&items).unwrap();

        let (registry, _) = Registry::load(&store, 60);

        assert_eq!(registry.items().len(), 1);
        assert_eq!(registry.items()[0].identifier, "youtube.com");
    }
}
