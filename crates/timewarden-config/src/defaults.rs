//! Built-in default blocklist
//!
//! Seeded into the store on first run, when no blocklist has been saved.

use timewarden_api::BlockedItem;

/// The blocklist shipped out of the box.
pub fn default_blocked_items() -> Vec<BlockedItem> {
    vec![
        BlockedItem::website("youtube.com", "YouTube Website"),
        BlockedItem::app("com.google.android.youtube", "YouTube App"),
        BlockedItem::website("facebook.com", "Facebook Website"),
        BlockedItem::app("com.facebook.katana", "Facebook App"),
    ]
}
