//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` from the content
//! root. Stock defaults are the base layer; a user config file overrides
//! just the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "contents"
//!
//! [site]
//! title = "Knowledge Base"
//! tagline = "Your prompts, skills, tips, docs, links, and agents."
//!
//! [colors.light]
//! background = "#f8fafc"
//! surface = "#ffffff"
//! text = "#0f172a"
//! text_muted = "#64748b"
//! border = "#e2e8f0"
//! accent = "#4f46e5"
//!
//! [colors.dark]
//! background = "#020617"
//! surface = "#0f172a"
//! text = "#e2e8f0"
//! text_muted = "#94a3b8"
//! border = "#1e293b"
//! accent = "#818cf8"
//! ```
//!
//! Unknown keys are rejected to catch typos early. The dark scheme is
//! applied through a `data-theme` attribute rather than the color-scheme
//! media query, because the theme is a persisted user toggle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root directory (only meaningful at root level).
    #[serde(default = "default_content_root")]
    pub content_root: String,
    /// Site identity shown in the page header.
    pub site: SiteIdentity,
    /// Color schemes for light and dark themes.
    pub colors: ColorConfig,
}

fn default_content_root() -> String {
    "contents".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            site: SiteIdentity::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        for (name, value) in [
            ("colors.light.background", &self.colors.light.background),
            ("colors.light.text", &self.colors.light.text),
            ("colors.dark.background", &self.colors.dark.background),
            ("colors.dark.text", &self.colors.dark.text),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Title and tagline for the page header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    pub title: String,
    pub tagline: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            title: "Knowledge Base".to_string(),
            tagline: "Your prompts, skills, tips, docs, links, and agents.".to_string(),
        }
    }
}

/// Color configuration for light and dark themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light theme color scheme.
    pub light: ColorScheme,
    /// Dark theme color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Card/panel surface color.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (descriptions, counts, tag chips).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Accent color (active filter, buttons, scratchpad toggle).
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            accent: "#4f46e5".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#020617".to_string(),
            surface: "#0f172a".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            accent: "#818cf8".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple KB Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in your content root:
#   contents/config.toml
#
# Unknown keys will cause an error.

# Path to content directory (only meaningful at root level)
content_root = "contents"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Page title, shown in the header and the browser tab.
title = "Knowledge Base"

# Short line under the title.
tagline = "Your prompts, skills, tips, docs, links, and agents."

# ---------------------------------------------------------------------------
# Colors - Light theme (the default)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"     # Cards, panels, sidebar
text = "#0f172a"
text_muted = "#64748b"  # Descriptions, counts, tag chips
border = "#e2e8f0"
accent = "#4f46e5"      # Active filter, buttons, scratchpad toggle

# ---------------------------------------------------------------------------
# Colors - Dark theme (applied when the visitor toggles it)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#020617"
surface = "#0f172a"
text = "#e2e8f0"
text_muted = "#94a3b8"
border = "#1e293b"
accent = "#818cf8"
"##
}

/// Generate CSS custom properties from color config.
///
/// The dark scheme is keyed off `data-theme="dark"` on the document root,
/// which the page script sets from the persisted preference.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

[data-theme="dark"] {{
    --color-bg: {dark_bg};
    --color-surface: {dark_surface};
    --color-text: {dark_text};
    --color-text-muted: {dark_text_muted};
    --color-border: {dark_border};
    --color-accent: {dark_accent};
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#f8fafc");
        assert_eq!(config.colors.dark.background, "#020617");
    }

    #[test]
    fn default_config_has_content_root() {
        let config = SiteConfig::default();
        assert_eq!(config.content_root, "contents");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[site]
title = "My Shelf"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.site.title, "My Shelf");
        // Default values preserved
        assert_eq!(config.site.tagline, SiteIdentity::default().tagline);
    }

    #[test]
    fn merge_preserves_unset_defaults() {
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.dark]
background = "#000000"
"##,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.colors.dark.background, "#000000");
        assert_eq!(config.colors.dark.text, "#e2e8f0");
        assert_eq!(config.colors.light.background, "#f8fafc");
    }

    #[test]
    fn unknown_keys_rejected() {
        let overlay: toml::Value = toml::from_str("colour_scheme = \"mauve\"").unwrap();
        assert!(resolve_config(stock_defaults_value(), Some(overlay)).is_err());
    }

    #[test]
    fn empty_title_rejected() {
        let overlay: toml::Value = toml::from_str(
            r##"
[site]
title = "  "
"##,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Knowledge Base");
    }

    #[test]
    fn load_config_reads_overrides() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[site]\ntitle = \"Lab Notes\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Lab Notes");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "not [valid").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.site.title, defaults.site.title);
        assert_eq!(parsed.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(parsed.colors.dark.surface, defaults.colors.dark.surface);
    }

    #[test]
    fn color_css_contains_both_schemes() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains(":root"));
        assert!(css.contains("[data-theme=\"dark\"]"));
        assert!(css.contains("--color-accent: #4f46e5"));
        assert!(css.contains("--color-bg: #020617"));
    }
}
