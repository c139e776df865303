//! Front-matter extraction for markdown source files.
//!
//! A file may open with a YAML metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! name: Cold Email
//! tags: [sales, outreach]
//! ---
//! Write a cold email to ...
//! ```
//!
//! [`split`] separates the block from the body. Files without a block (or
//! with an unterminated fence) are returned whole as body with empty
//! metadata. A block that is present but not valid YAML is an error — the
//! compiler reports it and skips the file rather than guessing.
//!
//! Unknown keys inside the block are accepted and ignored: agent definitions
//! routinely carry tool lists and model hints that are not catalog data.

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Recognized front-matter fields. All optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

/// Split a source file into its front-matter and body.
///
/// Returns `(metadata, body)`. When no fenced block exists the metadata is
/// `FrontMatter::default()` and the body is the whole input.
pub fn split(source: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let Some((yaml, body)) = extract_block(source) else {
        return Ok((FrontMatter::default(), source));
    };

    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    let meta: FrontMatter = serde_yaml::from_str(yaml)?;
    Ok((meta, body))
}

/// Locate a `---`-fenced block at the start of the input.
///
/// Returns `(yaml, body)` slices, or `None` when the input does not open
/// with a fence or the fence is never closed.
fn extract_block(source: &str) -> Option<(&str, &str)> {
    let after_open = source
        .strip_prefix("---\r\n")
        .or_else(|| source.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if matches!(line.trim_end_matches(['\r', '\n']), "---") {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}
