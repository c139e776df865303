//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the compiled catalog and generates
//! the final static site: one `index.html` carrying the whole knowledge
//! base.
//!
//! ## Page Structure
//!
//! - **Sidebar**: category filters (All + the six categories, with counts)
//!   and the theme toggle
//! - **Header**: site title/tagline from config, search input
//! - **Stats strip**: item total and welcome blurb, shown only in the
//!   unfiltered view
//! - **Card grid**: one card per entry, in catalog order
//! - **Detail overlays**: one pre-rendered panel per entry, opened via the
//!   `#<slug>` fragment
//! - **Scratchpad**: floating notes panel persisted in local storage
//!
//! Every entry's markdown body is converted to HTML here, at build time;
//! the served page performs no parsing. Filtering and selection are done by
//! the embedded script over `data-*` attributes emitted alongside each card.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (color variables injected from config)
//! - `static/app.js`: filtering, fragment sync, theme, scratchpad, clipboard
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::browser::{Browser, SCRATCHPAD_KEY, THEME_KEY};
use crate::catalog::{Catalog, Category, ContentEntry};
use crate::config::{self, SiteConfig};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/app.js");

/// Generate the site from a compiled catalog.
///
/// Reads `catalog.json` from `catalog_path`, the site config from the
/// content root, and writes `index.html` into `output_dir`.
pub fn generate(
    catalog_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let catalog_content = fs::read_to_string(catalog_path)?;
    let catalog: Catalog = serde_json::from_str(&catalog_content)?;
    let site_config = config::load_config(source_root)?;

    let color_css = config::generate_color_css(&site_config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    let index_html = render_index(&catalog, &site_config, &css);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;

    Ok(())
}

/// Lowercased search haystack for a card: name, description, content, and
/// tags, newline-separated so the substring test cannot match across field
/// boundaries.
pub fn search_haystack(entry: &ContentEntry) -> String {
    let mut fields = vec![
        entry.name.as_str(),
        entry.description.as_str(),
        entry.content.as_str(),
    ];
    fields.extend(entry.tags.iter().map(String::as_str));
    fields.join("\n").to_lowercase()
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the base HTML document structure.
///
/// The local-storage keys ride along as body data attributes so the page
/// script shares them with [`crate::browser`].
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body data-theme-key=(THEME_KEY) data-scratchpad-key=(SCRATCHPAD_KEY) {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the full single-page site.
pub fn render_index(catalog: &Catalog, site_config: &SiteConfig, css: &str) -> Markup {
    // The initial render is the browser's unfiltered view: All + empty query.
    let browser = Browser::new(catalog);
    let visible = browser.filtered();

    let content = html! {
        div.layout {
            (render_sidebar(catalog, site_config))
            main {
                (render_header(site_config))
                (render_stats(catalog, site_config))
                div.grid-header {
                    h2 #grid-title { "All Content" }
                    span.result-count #result-count { (visible.len()) " results" }
                }
                div.grid #grid {
                    @for entry in &visible {
                        (render_card(entry))
                    }
                }
                div.empty #empty hidden[!visible.is_empty()] {
                    p { "No content found." }
                    button #clear-filters { "Clear filters" }
                }
            }
        }
        @for entry in &catalog.entries {
            (render_panel(entry))
        }
        (render_scratchpad())
    };

    base_document(&site_config.site.title, css, content)
}

fn render_sidebar(catalog: &Catalog, site_config: &SiteConfig) -> Markup {
    html! {
        aside.sidebar {
            div.brand { (site_config.site.title) }
            nav.categories {
                button.category-btn.active data-filter="all" {
                    "All"
                    span.count { (catalog.len()) }
                }
                @for category in Category::ALL {
                    button.category-btn data-filter=(category.dir_name()) {
                        span class={ "dot accent-" (category.accent()) } {}
                        (category.label())
                        span.count { (catalog.category_count(category)) }
                    }
                }
            }
            button.theme-toggle #theme-toggle { "Toggle theme" }
        }
    }
}

fn render_header(site_config: &SiteConfig) -> Markup {
    html! {
        header.page-header {
            div {
                h1 { (site_config.site.title) }
                p.tagline { (site_config.site.tagline) }
            }
            input.search #search type="search" placeholder="Search (press / to focus)";
        }
    }
}

fn render_stats(catalog: &Catalog, site_config: &SiteConfig) -> Markup {
    html! {
        section.stats #stats {
            div.stat-card {
                span.stat-number { (catalog.len()) }
                span.stat-label { "items in your catalog" }
            }
            div.stat-welcome {
                h3 { "Welcome to " (site_config.site.title) }
                p { (site_config.site.tagline) }
            }
        }
    }
}

/// Renders one grid card. The `data-*` attributes are the filter contract
/// with the page script.
fn render_card(entry: &ContentEntry) -> Markup {
    html! {
        article
            class={ "card accent-" (entry.color) }
            data-slug=(entry.slug)
            data-category=(entry.category)
            data-search=(search_haystack(entry))
        {
            div.card-top {
                span.badge { (entry.category.label()) }
                @if entry.url.is_some() {
                    span.ext-marker { "\u{2197}" }
                }
            }
            h3 { (entry.name) }
            @if !entry.description.is_empty() {
                p.card-desc { (entry.description) }
            }
            @if !entry.tags.is_empty() {
                div.tags {
                    @for tag in &entry.tags {
                        span.tag { (tag) }
                    }
                }
            }
        }
    }
}

/// Renders one entry's detail overlay, hidden until its slug is selected.
///
/// The copy sources ride along in inert `<template>` elements so the script
/// can put the exact original text on the clipboard — not the rendered HTML.
fn render_panel(entry: &ContentEntry) -> Markup {
    let body_html = markdown_to_html(&entry.content);

    html! {
        div class={ "overlay accent-" (entry.color) } data-slug=(entry.slug) hidden {
            div.panel {
                header.panel-header {
                    div {
                        h2 { (entry.name) }
                        @if !entry.description.is_empty() {
                            p.panel-desc { (entry.description) }
                        }
                        div.panel-meta {
                            span.badge { (entry.category.label()) }
                            @for tag in &entry.tags {
                                span.tag { (tag) }
                            }
                        }
                    }
                    button.panel-close aria-label="Close" { "\u{00d7}" }
                }
                div.panel-body {
                    article.markdown { (PreEscaped(body_html)) }
                }
                footer.panel-footer {
                    button.btn.btn-primary.copy-content { "Copy Content" }
                    button.btn.btn-secondary.copy-link { "Copy Link" }
                    @if entry.raw_content.is_some() {
                        button.btn.btn-secondary.copy-raw { "Copy Raw" }
                    }
                    @if let Some(url) = &entry.url {
                        a.btn.btn-secondary href=(url) target="_blank" rel="noopener noreferrer" {
                            "Open Link"
                        }
                    }
                    span.spacer {}
                    button.btn.btn-quiet.panel-dismiss { "Close" }
                }
                template.copy-source { (entry.content) }
                @if let Some(raw) = &entry.raw_content {
                    template.raw-source { (raw) }
                }
            }
        }
    }
}

fn render_scratchpad() -> Markup {
    html! {
        button.scratchpad-toggle #scratchpad-toggle aria-label="Open scratchpad" { "\u{270e}" }
        div.scratchpad-panel #scratchpad-panel hidden {
            div.scratchpad-header {
                span { "Scratchpad" }
                button.panel-close #scratchpad-close aria-label="Close scratchpad" { "\u{00d7}" }
            }
            textarea #scratchpad-text
                placeholder="Paste prompts or quick thoughts here..."
                spellcheck="false" {}
            div.scratchpad-footer { "Auto-saved" }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
