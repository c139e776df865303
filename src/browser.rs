//! Runtime catalog browsing state.
//!
//! The generated site is a single page over an immutable catalog, and its
//! entire runtime behavior is a small state machine: a category filter, a
//! free-text query, at most one selected entry synchronized with the page
//! fragment, and two persisted preferences (theme, scratchpad). This module
//! is that state machine, expressed over an injected read-only [`Catalog`].
//!
//! It runs in two places: natively, where the generate stage uses it for the
//! initial render and the `search` command runs its filter pass from the
//! command line; and in the generated page, where `static/app.js` replays
//! the same transitions over the pre-rendered DOM. The local-storage keys
//! and theme values are defined here and injected into the page so the two
//! sides cannot drift on the contract.
//!
//! Everything is synchronous; there is no I/O beyond the key/value store
//! handed to [`Prefs`].

use crate::catalog::{Catalog, Category, ContentEntry};
use std::collections::HashMap;

/// Local-storage key for the persisted theme (`"dark"` / `"light"`).
pub const THEME_KEY: &str = "simple-kb-theme";
/// Local-storage key for the scratchpad text.
pub const SCRATCHPAD_KEY: &str = "simple-kb-scratchpad";

/// Category constraint for the filtered view. `All` is the no-constraint
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
}

impl Filter {
    fn matches(self, category: Category) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => c == category,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = crate::catalog::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Filter::All)
        } else {
            s.parse::<Category>().map(Filter::Category)
        }
    }
}

/// Filter and selection state over a borrowed catalog.
///
/// Selection is either none or exactly one entry; every transition is one of
/// the methods below. The fragment value tracks the selection: selecting
/// sets it to the entry's slug, deselecting clears it.
pub struct Browser<'a> {
    catalog: &'a Catalog,
    filter: Filter,
    query: String,
    selected: Option<usize>,
}

impl<'a> Browser<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            filter: Filter::All,
            query: String::new(),
            selected: None,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Set the active category filter.
    pub fn set_category(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Set the free-text search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The visible subsequence of the catalog: category matches (or the
    /// filter is `All`) and the query is a case-insensitive substring of
    /// the name, description, content, or any tag. An empty query matches
    /// everything. Catalog order is preserved — there is no ranking.
    pub fn filtered(&self) -> Vec<&'a ContentEntry> {
        let needle = self.query.to_lowercase();
        self.catalog
            .entries
            .iter()
            .filter(|e| self.filter.matches(e.category) && entry_matches(e, &needle))
            .collect()
    }

    /// Mark an entry as the active selection and point the fragment at it.
    pub fn select(&mut self, entry: &ContentEntry) {
        self.selected = self.catalog.entries.iter().position(|e| e.id == entry.id);
    }

    /// Clear the selection and the fragment.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Apply an externally-changed fragment value (initial load, back or
    /// forward navigation). An empty or unknown value deselects; this is
    /// never an error.
    pub fn restore_from_fragment(&mut self, fragment: &str) {
        self.selected = if fragment.is_empty() {
            None
        } else {
            self.catalog.entries.iter().position(|e| e.slug == fragment)
        };
    }

    pub fn selected(&self) -> Option<&'a ContentEntry> {
        self.selected.map(|i| &self.catalog.entries[i])
    }

    /// Current addressable fragment value: the selected entry's slug, or
    /// `None` when nothing is selected.
    pub fn fragment(&self) -> Option<&'a str> {
        self.selected().map(|e| e.slug.as_str())
    }
}

fn entry_matches(entry: &ContentEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry.name.to_lowercase().contains(needle)
        || entry.description.to_lowercase().contains(needle)
        || entry.content.to_lowercase().contains(needle)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Two-valued theme preference. Defaults to light when nothing is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Minimal string key/value persistence, the shape of browser local
/// storage. The native implementation is [`MemoryStore`]; the generated
/// page uses `window.localStorage` with the same keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

/// The two persisted preferences: theme and scratchpad.
pub struct Prefs<S> {
    store: S,
}

impl<S: KeyValueStore> Prefs<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted theme; unset or unrecognized values mean light.
    pub fn theme(&self) -> Theme {
        Theme::from_stored(self.store.get(THEME_KEY).as_deref())
    }

    /// Flip the theme, persist it, and return the new value.
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme().toggled();
        self.store.set(THEME_KEY, next.as_str());
        next
    }

    pub fn scratchpad(&self) -> String {
        self.store.get(SCRATCHPAD_KEY).unwrap_or_default()
    }

    /// Persist the scratchpad text. Called on every edit; no debounce, no
    /// size limit.
    pub fn set_scratchpad(&mut self, text: &str) {
        self.store.set(SCRATCHPAD_KEY, text);
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, slug: &str, category: Category) -> ContentEntry {
        ContentEntry {
            id,
            slug: slug.into(),
            name: format!("Name {slug}"),
            description: String::new(),
            category,
            content: String::new(),
            raw_content: None,
            tags: vec![],
            url: None,
            color: category.accent().into(),
        }
    }

    fn fixture_catalog() -> Catalog {
        let mut oauth = entry(1, "oauth-setup", Category::Docs);
        oauth.name = "OAuth Setup".into();
        oauth.description = "Configuring auth providers".into();
        oauth.content = "Steps to configure OAuth.".into();
        oauth.tags = vec!["auth".into(), "security".into()];

        let mut email = entry(2, "cold-email", Category::Prompts);
        email.name = "Cold Email".into();
        email.content = "Write a cold email to ...".into();
        email.tags = vec!["sales".into(), "outreach".into()];

        let mut deploy = entry(3, "deploy-guide", Category::Docs);
        deploy.name = "Deploy Guide".into();
        deploy.content = "How we ship.".into();

        Catalog {
            entries: vec![oauth, email, deploy],
        }
    }

    #[test]
    fn all_and_empty_query_return_everything_in_order() {
        let catalog = fixture_catalog();
        let browser = Browser::new(&catalog);
        let ids: Vec<u32> = browser.filtered().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn category_and_query_compose() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);
        browser.set_category(Filter::Category(Category::Docs));
        browser.set_query("auth");

        let slugs: Vec<&str> = browser.filtered().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["oauth-setup"]);
    }

    #[test]
    fn query_is_case_insensitive() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);
        browser.set_query("COLD email");
        assert_eq!(browser.filtered().len(), 1);
    }

    #[test]
    fn query_matches_tags() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);
        browser.set_query("outreach");
        let slugs: Vec<&str> = browser.filtered().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cold-email"]);
    }

    #[test]
    fn unmatched_query_excludes_entry() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);
        browser.set_category(Filter::Category(Category::Prompts));
        browser.set_query("sales");
        assert_eq!(browser.filtered().len(), 1);

        browser.set_query("docs-only-term");
        assert!(browser.filtered().is_empty());
    }

    #[test]
    fn selection_round_trips_through_fragment() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);

        let target = catalog.find_by_slug("cold-email").unwrap();
        browser.select(target);
        assert_eq!(browser.fragment(), Some("cold-email"));

        let mut fresh = Browser::new(&catalog);
        fresh.restore_from_fragment("cold-email");
        assert_eq!(fresh.selected().unwrap().id, target.id);
    }

    #[test]
    fn deselect_clears_fragment() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);
        browser.restore_from_fragment("deploy-guide");
        assert!(browser.selected().is_some());

        browser.deselect();
        assert_eq!(browser.fragment(), None);
    }

    #[test]
    fn empty_or_unknown_fragment_deselects() {
        let catalog = fixture_catalog();
        let mut browser = Browser::new(&catalog);
        browser.restore_from_fragment("cold-email");

        browser.restore_from_fragment("");
        assert!(browser.selected().is_none());

        browser.restore_from_fragment("no-such-slug");
        assert!(browser.selected().is_none());
    }

    #[test]
    fn filter_parses_all_sentinel_and_categories() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!(
            "docs".parse::<Filter>().unwrap(),
            Filter::Category(Category::Docs)
        );
        assert!("everything".parse::<Filter>().is_err());
    }

    #[test]
    fn theme_defaults_to_light() {
        let prefs = Prefs::new(MemoryStore::default());
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn theme_toggle_is_idempotent_over_two_calls() {
        let mut prefs = Prefs::new(MemoryStore::default());
        let original = prefs.theme();

        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(prefs.store().get(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(prefs.toggle_theme(), original);
        assert_eq!(prefs.store().get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(prefs.theme(), original);
    }

    #[test]
    fn unrecognized_stored_theme_reads_as_light() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "solarized");
        let prefs = Prefs::new(store);
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn scratchpad_persists_every_write() {
        let mut prefs = Prefs::new(MemoryStore::default());
        assert_eq!(prefs.scratchpad(), "");

        prefs.set_scratchpad("draft one");
        prefs.set_scratchpad("draft two");
        assert_eq!(prefs.scratchpad(), "draft two");
        assert_eq!(
            prefs.store().get(SCRATCHPAD_KEY).as_deref(),
            Some("draft two")
        );
    }
}
