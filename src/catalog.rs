//! Shared catalog types serialized between pipeline stages.
//!
//! The compile stage produces a [`Catalog`] and writes it to `catalog.json`;
//! the generate stage and the `search` command load it back. These types must
//! stay identical across stages.
//!
//! The catalog is read-only after compile: downstream code borrows it,
//! filters it, and copies strings out of it, but never mutates an entry.

use serde::{Deserialize, Serialize};

/// The six content categories, one per top-level source directory.
///
/// The directory name *is* the category: a markdown file is included in the
/// catalog only when it lives under one of these six directories, so the
/// fencing rule is enforced by construction rather than by a name check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prompts,
    Skills,
    Tips,
    Docs,
    Links,
    Agents,
}

impl Category {
    /// All categories in catalog traversal order.
    pub const ALL: [Category; 6] = [
        Category::Prompts,
        Category::Skills,
        Category::Tips,
        Category::Docs,
        Category::Links,
        Category::Agents,
    ];

    /// Source directory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Prompts => "prompts",
            Category::Skills => "skills",
            Category::Tips => "tips",
            Category::Docs => "docs",
            Category::Links => "links",
            Category::Agents => "agents",
        }
    }

    /// Accent color token for this category.
    ///
    /// Presentation data, not business data: the token names a CSS accent
    /// class in the generated site.
    pub fn accent(self) -> &'static str {
        match self {
            Category::Prompts => "emerald",
            Category::Skills => "blue",
            Category::Tips => "amber",
            Category::Docs => "indigo",
            Category::Links => "purple",
            Category::Agents => "rose",
        }
    }

    /// Display label: directory name with the first letter capitalized.
    pub fn label(self) -> &'static str {
        match self {
            Category::Prompts => "Prompts",
            Category::Skills => "Skills",
            Category::Tips => "Tips",
            Category::Docs => "Docs",
            Category::Links => "Links",
            Category::Agents => "Agents",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.dir_name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Error for a string that names none of the six categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl std::fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected one of: prompts, skills, tips, docs, links, agents)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

/// One published knowledge item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    /// 1-based position in overall processing order. Stable within one
    /// build only.
    pub id: u32,
    /// URL-safe identifier derived from the filename; used as the page
    /// fragment for deep links.
    pub slug: String,
    /// Front-matter `name`, else the title-cased filename.
    pub name: String,
    /// Front-matter `description`, else empty.
    pub description: String,
    /// Category of the enclosing top-level source directory.
    pub category: Category,
    /// Markdown body with front-matter stripped, trimmed.
    pub content: String,
    /// Full original file text including front-matter, trimmed.
    /// Present if and only if `category` is `agents`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    /// Front-matter `tags`, else empty. Order preserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Front-matter `url`, when the entry points at an external resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Accent color token derived from the category.
    pub color: String,
}

/// The complete ordered collection of compiled entries.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<ContentEntry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by slug. First match wins when slugs collide.
    pub fn find_by_slug(&self, slug: &str) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Number of entries in a category.
    pub fn category_count(&self, category: Category) -> usize {
        self.entries.iter().filter(|e| e.category == category).count()
    }
}
