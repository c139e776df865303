//! Content compilation and catalog generation.
//!
//! Stage 1 of the build pipeline. Scans the content root for markdown files
//! and produces the ordered [`Catalog`] that the generate stage and the
//! `search` command consume.
//!
//! ## Directory Structure
//!
//! The content root holds one directory per category; markdown files may be
//! nested arbitrarily deep inside each:
//!
//! ```text
//! contents/
//! ├── config.toml                  # Site configuration (optional)
//! ├── prompts/
//! │   ├── cold-email.md
//! │   └── writing/
//! │       └── blog-outline.md      # Nesting is fine; category stays `prompts`
//! ├── skills/
//! ├── tips/
//! ├── docs/
//! ├── links/
//! ├── agents/
//! │   └── reviewer.agent.md        # Agents keep their raw text in the catalog
//! └── drafts/                      # Not a category — never scanned
//! ```
//!
//! ## Traversal
//!
//! Categories are visited in [`Category::ALL`] order and files within each
//! category in sorted path order, so two runs over the same tree produce
//! identical catalogs. A missing content root or category directory simply
//! contributes zero entries.
//!
//! ## Failure policy
//!
//! The compiler never aborts on a bad file. A file whose front-matter block
//! fails to parse is excluded and reported in [`Compilation::skipped`];
//! everything else still compiles. Slug collisions are reported in
//! [`Compilation::duplicate_slugs`] — the colliding entries all ship, but
//! only the first is reachable by fragment lookup.

use crate::catalog::{Catalog, Category, ContentEntry};
use crate::frontmatter;
use crate::naming;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A source file excluded from the catalog, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Path relative to the content root.
    pub source: String,
    pub reason: String,
}

/// Two source files whose filenames slugify to the same value.
#[derive(Debug, Clone)]
pub struct DuplicateSlug {
    pub slug: String,
    /// The file that owns the slug (first in processing order).
    pub first: String,
    /// The later file shadowed by it.
    pub second: String,
}

/// Output of the compile stage.
///
/// `sources[i]` is the root-relative source path of `catalog.entries[i]`;
/// it exists for build reporting and is not part of the serialized artifact.
#[derive(Debug)]
pub struct Compilation {
    pub catalog: Catalog,
    pub sources: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub duplicate_slugs: Vec<DuplicateSlug>,
}

/// Compile the content root into a catalog.
pub fn compile(root: &Path) -> Result<Compilation, CompileError> {
    let mut entries: Vec<ContentEntry> = Vec::new();
    let mut sources: Vec<String> = Vec::new();
    let mut skipped: Vec<SkippedFile> = Vec::new();

    for category in Category::ALL {
        let dir = root.join(category.dir_name());
        if !dir.is_dir() {
            continue;
        }

        for path in collect_markdown(&dir)? {
            let source = rel_display(root, &path);
            let raw = fs::read_to_string(&path)?;

            let (meta, body) = match frontmatter::split(&raw) {
                Ok(split) => split,
                Err(err) => {
                    skipped.push(SkippedFile {
                        source,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let filename = path.file_name().unwrap().to_string_lossy();
            let name = meta
                .name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .unwrap_or_else(|| naming::title_case(&filename));

            entries.push(ContentEntry {
                id: entries.len() as u32 + 1,
                slug: naming::slugify(&filename),
                name,
                description: meta.description.unwrap_or_default(),
                category,
                content: body.trim().to_string(),
                raw_content: (category == Category::Agents).then(|| raw.trim().to_string()),
                tags: meta.tags,
                url: meta.url,
                color: category.accent().to_string(),
            });
            sources.push(source);
        }
    }

    let duplicate_slugs = find_duplicate_slugs(&entries, &sources);

    Ok(Compilation {
        catalog: Catalog { entries },
        sources,
        skipped,
        duplicate_slugs,
    })
}

/// Collect every markdown file under `dir`, any depth, in sorted path order.
fn collect_markdown(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn rel_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn find_duplicate_slugs(entries: &[ContentEntry], sources: &[String]) -> Vec<DuplicateSlug> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        match first_seen.get(entry.slug.as_str()) {
            Some(&first_idx) => duplicates.push(DuplicateSlug {
                slug: entry.slug.clone(),
                first: sources[first_idx].clone(),
                second: sources[idx].clone(),
            }),
            None => {
                first_seen.insert(entry.slug.as_str(), idx);
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_root_yields_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let compilation = compile(&tmp.path().join("does-not-exist")).unwrap();
        assert!(compilation.catalog.is_empty());
        assert!(compilation.skipped.is_empty());
    }

    #[test]
    fn empty_root_yields_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let compilation = compile(tmp.path()).unwrap();
        assert!(compilation.catalog.is_empty());
    }

    #[test]
    fn files_outside_category_directories_are_excluded() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "README.md", "# Not content");
        write_file(tmp.path(), "drafts/idea.md", "# Not content either");
        write_file(tmp.path(), "tips/real.md", "A real tip");

        let compilation = compile(tmp.path()).unwrap();
        assert_eq!(compilation.catalog.len(), 1);
        assert_eq!(compilation.catalog.entries[0].slug, "real");
    }

    #[test]
    fn ids_are_sequential_across_categories() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "prompts/a.md", "a");
        write_file(tmp.path(), "skills/b.md", "b");
        write_file(tmp.path(), "agents/c.md", "c");

        let compilation = compile(tmp.path()).unwrap();
        let ids: Vec<u32> = compilation.catalog.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Categories visit in declaration order: prompts before skills
        // before agents
        assert_eq!(compilation.catalog.entries[0].category, Category::Prompts);
        assert_eq!(compilation.catalog.entries[2].category, Category::Agents);
    }

    #[test]
    fn nested_files_keep_the_top_level_category() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "prompts/writing/deep/blog-outline.md", "outline");

        let compilation = compile(tmp.path()).unwrap();
        let entry = &compilation.catalog.entries[0];
        assert_eq!(entry.category, Category::Prompts);
        assert_eq!(entry.slug, "blog-outline");
        assert_eq!(compilation.sources[0], "prompts/writing/deep/blog-outline.md");
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/diagram.png", "binaryish");
        write_file(tmp.path(), "docs/notes.txt", "text");
        write_file(tmp.path(), "docs/guide.md", "guide");

        let compilation = compile(tmp.path()).unwrap();
        assert_eq!(compilation.catalog.len(), 1);
        assert_eq!(compilation.catalog.entries[0].slug, "guide");
    }

    #[test]
    fn front_matter_name_overrides_filename() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "prompts/prompt-writer.md",
            "---\nname: Custom Title\n---\nbody",
        );
        write_file(tmp.path(), "prompts/second-prompt.md", "no front matter");

        let compilation = compile(tmp.path()).unwrap();
        assert_eq!(compilation.catalog.entries[0].name, "Custom Title");
        assert_eq!(compilation.catalog.entries[1].name, "Second Prompt");
    }

    #[test]
    fn blank_front_matter_name_falls_back_to_filename() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tips/keyboard-shortcuts.md", "---\nname: \"\"\n---\ntip");

        let compilation = compile(tmp.path()).unwrap();
        assert_eq!(compilation.catalog.entries[0].name, "Keyboard Shortcuts");
    }

    #[test]
    fn content_is_body_trimmed() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "docs/setup.md",
            "---\ndescription: How to set up\n---\n\n# Setup\n\nSteps.\n\n",
        );

        let compilation = compile(tmp.path()).unwrap();
        let entry = &compilation.catalog.entries[0];
        assert_eq!(entry.content, "# Setup\n\nSteps.");
        assert_eq!(entry.description, "How to set up");
        assert!(entry.raw_content.is_none());
    }

    #[test]
    fn agents_keep_raw_content_with_front_matter() {
        let tmp = TempDir::new().unwrap();
        let text = "---\nname: Reviewer\nmodel: big\n---\nYou are a code reviewer.\n";
        write_file(tmp.path(), "agents/reviewer.agent.md", text);

        let compilation = compile(tmp.path()).unwrap();
        let entry = &compilation.catalog.entries[0];
        assert_eq!(entry.slug, "reviewer");
        let raw = entry.raw_content.as_deref().unwrap();
        assert!(raw.starts_with("---\nname: Reviewer"));
        assert!(raw.contains("You are a code reviewer."));
        assert_eq!(entry.content, "You are a code reviewer.");
    }

    #[test]
    fn non_agent_entries_have_no_raw_content() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tips/example.md", "---\nname: Example\n---\ntip body");

        let compilation = compile(tmp.path()).unwrap();
        assert!(compilation.catalog.entries[0].raw_content.is_none());
    }

    #[test]
    fn malformed_front_matter_skips_only_that_file() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/bad.md", "---\nname: [unclosed\n---\nbody");
        write_file(tmp.path(), "docs/good.md", "fine");

        let compilation = compile(tmp.path()).unwrap();
        assert_eq!(compilation.catalog.len(), 1);
        assert_eq!(compilation.catalog.entries[0].slug, "good");
        assert_eq!(compilation.skipped.len(), 1);
        assert_eq!(compilation.skipped[0].source, "docs/bad.md");
        assert!(compilation.skipped[0].reason.contains("front matter"));
    }

    #[test]
    fn duplicate_slugs_are_reported() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "prompts/My Prompt.md", "one");
        write_file(tmp.path(), "prompts/my-prompt.md", "two");

        let compilation = compile(tmp.path()).unwrap();
        assert_eq!(compilation.catalog.len(), 2);
        assert_eq!(compilation.duplicate_slugs.len(), 1);
        let dup = &compilation.duplicate_slugs[0];
        assert_eq!(dup.slug, "my-prompt");
        assert_ne!(dup.first, dup.second);
    }

    #[test]
    fn two_runs_produce_identical_catalogs() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "prompts/b.md", "b");
        write_file(tmp.path(), "prompts/a.md", "a");
        write_file(tmp.path(), "links/site.md", "---\nurl: https://example.com\n---\n");

        let one = compile(tmp.path()).unwrap();
        let two = compile(tmp.path()).unwrap();
        let a = serde_json::to_string(&one.catalog).unwrap();
        let b = serde_json::to_string(&two.catalog).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn end_to_end_entry_shape() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "prompts/cold-email.md",
            "---\nname: Cold Email\ntags: [sales, outreach]\n---\nWrite a cold email to ...",
        );

        let compilation = compile(tmp.path()).unwrap();
        let entry = &compilation.catalog.entries[0];
        assert_eq!(entry.id, 1);
        assert_eq!(entry.slug, "cold-email");
        assert_eq!(entry.name, "Cold Email");
        assert_eq!(entry.category, Category::Prompts);
        assert_eq!(entry.tags, vec!["sales", "outreach"]);
        assert_eq!(entry.content, "Write a cold email to ...");
        assert_eq!(entry.color, Category::Prompts.accent());
    }
}
