//! Centralized filename derivations.
//!
//! Every entry gets two values from its filename: a URL-safe slug used as
//! the page fragment, and a display title used when the front-matter carries
//! no `name`. Both live here so the two derivations stay consistent.
//!
//! ## Slugs
//!
//! A trailing `.agent` or `.prompt` marker before the extension is stripped
//! (agent definitions are conventionally named `reviewer.agent.md`), then the
//! stem is reduced to `[a-z0-9-]`:
//! - `Cold Email.md` → `cold-email`
//! - `reviewer.agent.md` → `reviewer`
//! - `api__notes.md` → `api-notes`
//!
//! Slugification is lossy: distinct filenames can collide (`My Prompt.md`
//! and `my-prompt.md` both become `my-prompt`). The compiler warns on
//! collisions; it does not reject them.
//!
//! ## Titles
//!
//! The fallback title only strips the extension, swaps `-`/`_` for spaces,
//! and capitalizes each word: `prompt-writer.md` → "Prompt Writer".

/// Derive the URL-safe slug for a markdown filename.
///
/// Strips a `.agent`/`.prompt` marker and the `.md` extension, replaces
/// every character outside `[A-Za-z0-9-]` with `-`, collapses runs of `-`,
/// trims leading/trailing `-`, and lowercases.
pub fn slugify(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let stem = stem
        .strip_suffix(".agent")
        .or_else(|| stem.strip_suffix(".prompt"))
        .unwrap_or(stem);

    let replaced: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();

    // Collapse consecutive dashes
    let mut collapsed = String::with_capacity(replaced.len());
    let mut prev_dash = false;
    for c in replaced.chars() {
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    collapsed.trim_matches('-').to_ascii_lowercase()
}

/// Derive the fallback display title for a markdown filename.
///
/// Removes the `.md` extension, replaces `-` and `_` with spaces, and
/// capitalizes the first letter of each word.
pub fn title_case(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let spaced = stem.replace(['-', '_'], " ");

    let mut result = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.push(c);
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}
