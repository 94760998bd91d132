//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `content/config.toml`, key by key, so a config file
//! only needs the values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! url = "https://example.com"     # Absolute base URL (trailing slash trimmed)
//! title = "My Portfolio"
//! description = "A personal portfolio"
//! language = "en"
//! # og_site_name = "..."         # OpenGraph siteName (defaults to title)
//!
//! [author]
//! name = "Anonymous"
//! # job_title = "Software Engineer"
//! # email = "me@example.com"
//! education = []
//!
//! [author.image]                  # Optional portrait
//! src = "/selfie.jpg"
//! alt = "Portrait"
//! width = 640
//! height = 800
//!
//! [author.social]                 # All optional
//! github = "https://github.com/me"
//!
//! [rss]
//! title = "Blog"
//! description = "Latest posts"
//! ttl = 60                        # Minutes
//! # copyright = "..."            # Defaults to "© <year> <author.name>"
//!
//! [colors.light]
//! background = "#ffffff"
//! ...
//!
//! [processing]
//! max_processes = 4               # Max parallel readers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity: base URL, title, language.
    pub site: SiteSection,
    /// The person the portfolio is about.
    pub author: AuthorConfig,
    /// RSS channel settings.
    pub rss: RssConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel read settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site.url.starts_with("http://") || self.site.url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.url must be an absolute http(s) URL, got '{}'",
                self.site.url
            )));
        }
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.rss.ttl == 0 {
            return Err(ConfigError::Validation("rss.ttl must be non-zero".into()));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }

    /// OpenGraph `siteName`: explicit override, else the site title.
    pub fn og_site_name(&self) -> &str {
        self.site
            .og_site_name
            .as_deref()
            .unwrap_or(&self.site.title)
    }

    /// Copyright line for the RSS channel and page footer.
    pub fn copyright(&self, year: i32) -> String {
        self.rss
            .copyright
            .clone()
            .unwrap_or_else(|| format!("© {} {}", year, self.author.name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub url: String,
    pub title: String,
    pub description: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_site_name: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            title: "My Portfolio".to_string(),
            description: "A personal portfolio".to_string(),
            language: "en".to_string(),
            og_site_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<AuthorImage>,
    /// Institutions, rendered as `alumniOf` in the Person JSON-LD.
    pub education: Vec<String>,
    pub social: SocialLinks,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            job_title: None,
            email: None,
            image: None,
            education: Vec::new(),
            social: SocialLinks::default(),
        }
    }
}

/// Author portrait. `src` is site-relative (`/selfie.jpg`) or absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl SocialLinks {
    /// Configured links as `(label, url)` pairs, in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", self.github.as_deref()),
            ("LinkedIn", self.linkedin.as_deref()),
            ("Twitter", self.twitter.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|u| (label, u)))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RssConfig {
    pub title: String,
    pub description: String,
    /// Channel time-to-live in minutes.
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: "Latest posts".to_string(),
            ttl: 60,
            copyright: None,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel readers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
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
    pub background: String,
    pub text: String,
    /// Dates, summaries, footer.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            link: "#111827".to_string(),
            link_hover: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0f17".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#1f2937".to_string(),
            link: "#f3f4f6".to_string(),
            link_hover: "#60a5fa".to_string(),
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
/// This is the base layer user overrides are merged on top of.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
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
    let mut config: SiteConfig = merged.try_into()?;
    config.site.url = config.base_url().to_string();
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Absolute base URL used for canonical links, the feed, and the sitemap.
url = "https://example.com"
title = "My Portfolio"
description = "A personal portfolio"
# Used for <html lang> and the RSS <language> element.
language = "en"
# OpenGraph siteName. Defaults to the title.
# og_site_name = "My Portfolio"

# ---------------------------------------------------------------------------
# Author (home page, JSON-LD Person, RSS copyright)
# ---------------------------------------------------------------------------
[author]
name = "Anonymous"
# job_title = "Software Engineer"
# email = "me@example.com"
# Institutions, rendered as alumniOf in structured data.
education = []

# Portrait shown on the home page; src is relative to content/public/.
# [author.image]
# src = "/selfie.jpg"
# alt = "Portrait"
# width = 640
# height = 800

[author.social]
# github = "https://github.com/me"
# linkedin = "https://linkedin.com/in/me"
# twitter = "https://x.com/me"

# ---------------------------------------------------------------------------
# RSS feed (/feed.xml)
# ---------------------------------------------------------------------------
[rss]
title = "Blog"
description = "Latest posts"
# Channel time-to-live, in minutes.
ttl = 60
# Defaults to "© <build year> <author.name>".
# copyright = "© 2026 Anonymous"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111827"
text_muted = "#6b7280"    # Dates, summaries, footer
border = "#e5e7eb"
link = "#111827"
link_hover = "#2563eb"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0f17"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#1f2937"
link = "#f3f4f6"
link_hover = "#60a5fa"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel file readers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn vars(scheme: &ColorScheme, pad: &str) -> String {
        [
            ("--color-bg", &scheme.background),
            ("--color-text", &scheme.text),
            ("--color-text-muted", &scheme.text_muted),
            ("--color-border", &scheme.border),
            ("--color-link", &scheme.link),
            ("--color-link-hover", &scheme.link_hover),
        ]
        .iter()
        .map(|(name, value)| format!("{pad}{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site.url, "https://example.com");
        assert_eq!(config.site.language, "en");
        assert_eq!(config.rss.ttl, 60);
        assert_eq!(config.author.name, "Anonymous");
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
url = "https://ada.example.org"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.url, "https://ada.example.org");
        // Defaults preserved
        assert_eq!(config.site.title, "My Portfolio");
        assert_eq!(config.rss.title, "Blog");
    }

    #[test]
    fn parse_author_section() {
        let toml = r#"
[author]
name = "Ada Example"
job_title = "Software Engineer"
education = ["Carnegie Mellon University", "Tianjin University"]

[author.image]
src = "/selfie.jpg"
alt = "Portrait"
width = 640
height = 800

[author.social]
github = "https://github.com/ada-example"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.author.name, "Ada Example");
        assert_eq!(config.author.education.len(), 2);
        let image = config.author.image.unwrap();
        assert_eq!(image.width, Some(640));
        assert_eq!(
            config.author.social.entries(),
            vec![("GitHub", "https://github.com/ada-example")]
        );
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "My Portfolio");
    }

    #[test]
    fn load_config_trims_trailing_slash() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\nurl = \"https://example.org/\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.url, "https://example.org");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[site]\ntitel = \"x\"\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[feed]\nttl = 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_relative_url() {
        let mut config = SiteConfig::default();
        config.site.url = "example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn validate_rejects_zero_ttl() {
        let mut config = SiteConfig::default();
        config.rss.ttl = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_title() {
        let mut config = SiteConfig::default();
        config.site.title = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[rss]\nttl = 0\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn og_site_name_falls_back_to_title() {
        let mut config = SiteConfig::default();
        assert_eq!(config.og_site_name(), "My Portfolio");
        config.site.og_site_name = Some("Ada".to_string());
        assert_eq!(config.og_site_name(), "Ada");
    }

    #[test]
    fn copyright_defaults_to_year_and_author() {
        let mut config = SiteConfig::default();
        config.author.name = "Ada Example".to_string();
        assert_eq!(config.copyright(2026), "© 2026 Ada Example");
        config.rss.copyright = Some("CC BY 4.0".to_string());
        assert_eq!(config.copyright(2026), "CC BY 4.0");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0;"));
        assert!(css.contains("--color-bg: #1a1a1a;"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains("--color-link-hover:"));
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str("[rss]\nttl = 30\n").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.rss.ttl, 30);
        assert_eq!(config.rss.title, "Blog");
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["site", "author", "rss", "colors", "processing"] {
            assert!(val.get(section).is_some(), "missing section {section}");
        }
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.url, defaults.site.url);
        assert_eq!(config.rss.ttl, defaults.rss.ttl);
        assert_eq!(config.colors.dark.background, defaults.colors.dark.background);
        assert_eq!(config.processing.max_processes, None);
    }
}
