//! Foreground matching
//!
//! Which configured item, if any, does the latest foreground signal refer
//! to? Strategies are evaluated in priority order and the first hit wins:
//!
//! 1. App match: the foreground package equals an App item's identifier.
//! 2. Website match: the foreground package is a browser-class application
//!    and a Website item's identifier is a case-insensitive substring of
//!    the candidate URL.
//!
//! Anything else is "neutral": no item is active.

use timewarden_api::{BlockedItem, ItemKind};

/// A single matching rule, testable in isolation
pub trait MatchStrategy: Send + Sync {
    fn find<'a>(
        &self,
        items: &'a [BlockedItem],
        package: Option<&str>,
        url: Option<&str>,
    ) -> Option<&'a BlockedItem>;
}

/// Exact package-name match against App items
pub struct AppExactMatch;

impl MatchStrategy for AppExactMatch {
    fn find<'a>(
        &self,
        items: &'a [BlockedItem],
        package: Option<&str>,
        _url: Option<&str>,
    ) -> Option<&'a BlockedItem> {
        let package = package?;
        items
            .iter()
            .find(|item| item.kind == ItemKind::App && item.identifier == package)
    }
}

/// Case-insensitive substring match against Website items, applied only
/// when the foreground package belongs to a browser-class application
pub struct WebsiteSubstringMatch {
    browsers: Vec<String>,
}

impl WebsiteSubstringMatch {
    pub fn new(browsers: Vec<String>) -> Self {
        Self {
            browsers: browsers.into_iter().map(|b| b.to_lowercase()).collect(),
        }
    }

    fn is_browser(&self, package: &str) -> bool {
        let package = package.to_lowercase();
        self.browsers.iter().any(|b| package.contains(b))
    }
}

impl MatchStrategy for WebsiteSubstringMatch {
    fn find<'a>(
        &self,
        items: &'a [BlockedItem],
        package: Option<&str>,
        url: Option<&str>,
    ) -> Option<&'a BlockedItem> {
        let package = package?;
        if !self.is_browser(package) {
            return None;
        }
        let url = url?.to_lowercase();
        items
            .iter()
            .find(|item| item.kind == ItemKind::Website && url.contains(&item.identifier.to_lowercase()))
    }
}

/// Ordered list of match strategies; first hit wins
pub struct Matcher {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl Matcher {
    pub fn new(browsers: Vec<String>) -> Self {
        Self {
            strategies: vec![
                Box::new(AppExactMatch),
                Box::new(WebsiteSubstringMatch::new(browsers)),
            ],
        }
    }

    /// Resolve the foreground signal against the configured items
    pub fn resolve<'a>(
        &self,
        items: &'a [BlockedItem],
        package: Option<&str>,
        url: Option<&str>,
    ) -> Option<&'a BlockedItem> {
        self.strategies
            .iter()
            .find_map(|s| s.find(items, package, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timewarden_config::default_browsers;

    fn test_items() -> Vec<BlockedItem> {
        vec![
            BlockedItem::app("com.google.android.youtube", "YouTube App"),
            BlockedItem::website("youtube.com", "YouTube Website"),
            BlockedItem::website("facebook.com", "Facebook Website"),
        ]
    }

    fn matcher() -> Matcher {
        Matcher::new(default_browsers())
    }

    #[test]
    fn app_exact_match_wins() {
        let items = test_items();
        let hit = matcher().resolve(&items, Some("com.google.android.youtube"), None);
        assert_eq!(hit.unwrap().identifier, "com.google.android.youtube");
    }

    #[test]
    fn app_match_is_exact_not_substring() {
        let items = test_items();
        let hit = matcher().resolve(&items, Some("com.google.android.youtube.music"), None);
        assert!(hit.is_none());
    }

    #[test]
    fn website_match_requires_browser_package() {
        let items = test_items();

        // A browser showing the URL matches.
        let hit = matcher().resolve(
            &items,
            Some("com.android.chrome"),
            Some("https://www.youtube.com/watch?v=abc"),
        );
        assert_eq!(hit.unwrap().identifier, "youtube.com");

        // The same URL reported from a non-browser package does not.
        let hit = matcher().resolve(
            &items,
            Some("com.example.mailclient"),
            Some("https://www.youtube.com/watch?v=abc"),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn website_match_is_case_insensitive() {
        let items = test_items();
        let hit = matcher().resolve(
            &items,
            Some("org.mozilla.firefox"),
            Some("https://WWW.FACEBOOK.COM/feed"),
        );
        assert_eq!(hit.unwrap().identifier, "facebook.com");
    }

    #[test]
    fn website_match_needs_url() {
        let items = test_items();
        let hit = matcher().resolve(&items, Some("com.android.chrome"), None);
        assert!(hit.is_none());
    }

    #[test]
    fn app_rule_takes_priority_over_website_rule() {
        // A "browser" that is itself blocked as an app: rule 1 wins.
        let items = vec![
            BlockedItem::app("com.android.chrome", "Chrome"),
            BlockedItem::website("youtube.com", "YouTube Website"),
        ];
        let hit = matcher().resolve(
            &items,
            Some("com.android.chrome"),
            Some("https://youtube.com"),
        );
        assert_eq!(hit.unwrap().identifier, "com.android.chrome");
    }

    #[test]
    fn first_item_wins_on_duplicates() {
        let mut items = test_items();
        items.push(BlockedItem::website("youtube.com", "Duplicate"));

        let hit = matcher()
            .resolve(&items, Some("com.android.chrome"), Some("youtube.com/home"))
            .unwrap();
        assert_eq!(hit.label(), "YouTube Website");
    }

    #[test]
    fn neutral_when_nothing_matches() {
        let items = test_items();
        assert!(matcher().resolve(&items, Some("com.example.calculator"), None).is_none());
        assert!(matcher().resolve(&items, None, None).is_none());
    }
}
