//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entry is its semantic identity — catalog id and name — with
//! filesystem paths shown as secondary context via indented `Source:` lines.
//! This makes the output readable as a content inventory while still letting
//! users trace data back to specific files.
//!
//! # Output Format
//!
//! ## Compile
//!
//! ```text
//! Catalog
//! prompts (2 entries)
//!     001 Cold Email
//!         Source: prompts/cold-email.md
//!     002 Blog Outline
//!         Source: prompts/writing/blog-outline.md
//!
//! Skipped
//!     docs/bad.md
//!         invalid front matter: ...
//!
//! Warnings
//!     duplicate slug 'my-prompt': prompts/My Prompt.md also maps to it
//!     (owned by prompts/my-prompt.md)
//!
//! Compiled 3 entries across 2 categories (1 skipped)
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     001 Cold Email → #cold-email
//!     002 Blog Outline → #blog-outline
//! Generated index.html with 2 entry panels
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::browser::Filter;
use crate::catalog::{Catalog, Category, ContentEntry};
use crate::compile::Compilation;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based id as 3-digit zero-padded.
fn format_index(id: u32) -> String {
    format!("{:0>3}", id)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// Stage 1: Compile output
// ============================================================================

/// Format compile stage output showing the discovered catalog.
pub fn format_compile_output(compilation: &Compilation) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Catalog".to_string());

    let mut populated_categories = 0;
    for category in Category::ALL {
        let count = compilation.catalog.category_count(category);
        if count == 0 {
            continue;
        }
        populated_categories += 1;
        lines.push(format!("{} ({} entries)", category.dir_name(), count));

        for (entry, source) in compilation
            .catalog
            .entries
            .iter()
            .zip(&compilation.sources)
            .filter(|(e, _)| e.category == category)
        {
            lines.push(format!("    {} {}", format_index(entry.id), entry.name));
            lines.push(format!("        Source: {}", source));
            if !entry.description.is_empty() {
                lines.push(format!("        {}", truncate_desc(&entry.description, 60)));
            }
        }
    }

    if !compilation.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &compilation.skipped {
            lines.push(format!("    {}", skipped.source));
            lines.push(format!("        {}", skipped.reason));
        }
    }

    if !compilation.duplicate_slugs.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for dup in &compilation.duplicate_slugs {
            lines.push(format!(
                "    duplicate slug '{}': {} also maps to it (owned by {})",
                dup.slug, dup.second, dup.first
            ));
        }
    }

    lines.push(String::new());
    let skipped_note = if compilation.skipped.is_empty() {
        String::new()
    } else {
        format!(" ({} skipped)", compilation.skipped.len())
    };
    lines.push(format!(
        "Compiled {} entries across {} categories{}",
        compilation.catalog.len(),
        populated_categories,
        skipped_note
    ));

    lines
}

/// Print compile output to stdout.
pub fn print_compile_output(compilation: &Compilation) {
    for line in format_compile_output(compilation) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing the entries baked into the page.
pub fn format_generate_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Home \u{2192} index.html".to_string());
    for entry in &catalog.entries {
        lines.push(format!(
            "    {} {} \u{2192} #{}",
            format_index(entry.id),
            entry.name,
            entry.slug
        ));
    }
    lines.push(format!(
        "Generated index.html with {} entry panels",
        catalog.len()
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(catalog: &Catalog) {
    for line in format_generate_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Search output
// ============================================================================

/// Format search results: id, name, category, and a description preview.
pub fn format_search_output(results: &[&ContentEntry], filter: Filter, query: &str) -> Vec<String> {
    let mut lines = Vec::new();

    let scope = match filter {
        Filter::All => "all categories".to_string(),
        Filter::Category(c) => c.dir_name().to_string(),
    };
    let subject = if query.is_empty() {
        format!("everything in {}", scope)
    } else {
        format!("'{}' in {}", query, scope)
    };
    lines.push(format!("{} matches for {}", results.len(), subject));

    for entry in results {
        lines.push(format!(
            "    {} {} [{}]",
            format_index(entry.id),
            entry.name,
            entry.category
        ));
        if !entry.description.is_empty() {
            lines.push(format!("        {}", truncate_desc(&entry.description, 60)));
        }
        if !entry.tags.is_empty() {
            lines.push(format!("        Tags: {}", entry.tags.join(", ")));
        }
    }

    lines
}

/// Print search output to stdout.
pub fn print_search_output(results: &[&ContentEntry], filter: Filter, query: &str) {
    for line in format_search_output(results, filter, query) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
