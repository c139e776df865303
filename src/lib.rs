//! # Simple KB
//!
//! A minimal static site generator for personal knowledge bases.
//! Your filesystem is the data source: six fixed category directories
//! (prompts, skills, tips, docs, links, agents) hold markdown files with
//! optional YAML front-matter, and each file becomes one entry in a
//! browsable, searchable single-page site.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content flows through two independent stages joined by a JSON artifact:
//!
//! ```text
//! 1. Compile   contents/  →  catalog.json   (markdown tree → typed catalog)
//! 2. Generate  catalog    →  dist/          (single-page HTML site)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the catalog is human-readable JSON you can inspect.
//! - **Reuse**: the same artifact feeds HTML generation and the `search`
//!   command.
//! - **Testability**: each stage is a pure function over the catalog, so
//!   unit tests can exercise pipeline logic without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compile`] | Stage 1 — walks the category directories, parses front-matter, produces the catalog |
//! | [`generate`] | Stage 2 — renders the single-page site from the catalog using Maud |
//! | [`catalog`] | Shared types serialized between stages (`ContentEntry`, `Category`, `Catalog`) |
//! | [`browser`] | Runtime state model: filtering, fragment-synced selection, theme, scratchpad |
//! | [`frontmatter`] | YAML front-matter splitting and the optional metadata schema |
//! | [`naming`] | Filename-derived slugs and fallback titles |
//! | [`config`] | `config.toml` loading, merging, validation, and CSS variable generation |
//! | [`output`] | CLI output formatting — information-first display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Everything Pre-Rendered
//!
//! The generated page contains every card and every detail panel up front,
//! with each entry's markdown already converted to HTML. The embedded script
//! only toggles visibility: filtering reads `data-*` attributes, selection
//! follows the `#slug` fragment in both directions, and copy buttons read
//! the original text from inert `<template>` elements. No runtime parsing,
//! no fetches, no framework.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## A Closed Category Enumeration
//!
//! The six categories are a Rust enum, not a set of strings. The compiler
//! walks `contents/<category>/` for each variant, so a file outside those
//! directories is unreachable rather than filtered out, and every
//! category-keyed mapping (accent colors, labels, directory names) is
//! exhaustively checked at compile time.
//!
//! ## Filesystem as the Source of Truth
//!
//! No database and no separate index: the category is the directory, the
//! slug and fallback title come from the filename, and front-matter carries
//! the rest. Catalog ids are assigned by traversal order and are stable only
//! within a single build — deep links use slugs, never ids.
//!
//! # The "Forever Stack"
//!
//! The output is plain HTML, established CSS, and a small vanilla-JavaScript
//! file inlined into the page. The binary has zero runtime dependencies. The
//! generated site can be dropped on any file server — no Node, no PHP, no
//! database. If a browser can render HTML, it can browse your knowledge base.

pub mod browser;
pub mod catalog;
pub mod compile;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod naming;
pub mod output;
