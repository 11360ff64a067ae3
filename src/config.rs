//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. The stock defaults
//! describe the Buddies of Budgie site as published; a user file only needs
//! the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml        # Optional, overrides stock defaults
//! ├── content/blog/
//! ├── messages/
//! └── public/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "Buddies of Budgie"
//! default_icon = "/images/logo.svg"
//! social_profile = "https://floss.social/@BuddiesOfBudgie"
//! blog_dir = "content/blog"
//! messages_dir = "messages"
//! public_dir = "public"
//! page_extensions = ["ts", "tsx", "js", "jsx", "md", "mdx"]
//! large_page_data_bytes = 512000
//!
//! [i18n]
//! locales = ["en"]
//! default_locale = "en"
//!
//! [images]
//! domains = ["avatars.githubusercontent.com", "blog.buddiesofbudgie.org"]
//! formats = ["image/avif", "image/webp"]
//! content_disposition_type = "attachment"
//! content_security_policy = "default-src 'self'; script-src 'none'; sandbox;"
//! dangerously_allow_svg = true
//!
//! [links]
//! about = "/about"
//! get_budgie = "/download"
//!
//! [theme]
//! accent = "#4caf50"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILE: &str = "site.toml";

/// Image formats the image pipeline can negotiate.
pub const SUPPORTED_IMAGE_FORMATS: &[&str] = &["image/avif", "image/webp"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Suffix appended to every document title.
    pub site_name: String,
    /// Favicon used when a page does not supply its own icon.
    pub default_icon: String,
    /// Profile linked with `rel="me"` from every page head.
    pub social_profile: String,
    /// Blog content directory, relative to the site root.
    pub blog_dir: String,
    /// Directory holding `{locale}.json` message bundles.
    pub messages_dir: String,
    /// Static assets copied verbatim to the output root.
    pub public_dir: String,
    /// File extensions treated as pages.
    pub page_extensions: Vec<String>,
    /// Soft limit for the serialized page data of a single page.
    pub large_page_data_bytes: u64,
    pub i18n: I18nConfig,
    pub images: ImagesConfig,
    pub links: LinksConfig,
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Buddies of Budgie".to_string(),
            default_icon: "/images/logo.svg".to_string(),
            social_profile: "https://floss.social/@BuddiesOfBudgie".to_string(),
            blog_dir: "content/blog".to_string(),
            messages_dir: "messages".to_string(),
            public_dir: "public".to_string(),
            page_extensions: ["ts", "tsx", "js", "jsx", "md", "mdx"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            large_page_data_bytes: 512 * 1000,
            i18n: I18nConfig::default(),
            images: ImagesConfig::default(),
            links: LinksConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        if self.page_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "page_extensions must not be empty".into(),
            ));
        }
        self.i18n.validate()?;
        self.images.validate()?;
        Ok(())
    }

    /// Whether files with this extension are pages.
    pub fn is_page_extension(&self, ext: &str) -> bool {
        self.page_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Locale settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Every locale the site is built for, in output order.
    pub locales: Vec<String>,
    /// Locale served from the site root; all others live under `/{locale}/`.
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
        }
    }
}

impl I18nConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must not be empty".into(),
            ));
        }
        for (i, locale) in self.locales.iter().enumerate() {
            if locale.is_empty() || locale.contains(['/', '\\', '.']) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales contains an invalid locale: {locale:?}"
                )));
            }
            if self.locales[..i].contains(locale) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales lists {locale} more than once"
                )));
            }
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale {} is not in i18n.locales",
                self.default_locale
            )));
        }
        Ok(())
    }

    /// URL prefix for a locale: empty for the default locale.
    pub fn path_prefix(&self, locale: &str) -> String {
        if locale == self.default_locale {
            String::new()
        } else {
            format!("/{locale}")
        }
    }
}

/// Image optimization settings handed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Remote hosts images may be loaded from.
    pub domains: Vec<String>,
    /// Output formats, in order of preference.
    pub formats: Vec<String>,
    pub content_disposition_type: String,
    pub content_security_policy: String,
    pub dangerously_allow_svg: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            domains: vec![
                "avatars.githubusercontent.com".to_string(),
                "blog.buddiesofbudgie.org".to_string(),
            ],
            formats: SUPPORTED_IMAGE_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            content_disposition_type: "attachment".to_string(),
            content_security_policy: "default-src 'self'; script-src 'none'; sandbox;"
                .to_string(),
            dangerously_allow_svg: true,
        }
    }
}

impl ImagesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for format in &self.formats {
            if !SUPPORTED_IMAGE_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "images.formats: unsupported format {format} (expected one of {})",
                    SUPPORTED_IMAGE_FORMATS.join(", ")
                )));
            }
        }
        for domain in &self.domains {
            if domain.is_empty() || domain.contains(['/', ':', ' ']) {
                return Err(ConfigError::Validation(format!(
                    "images.domains: {domain:?} must be a bare host name"
                )));
            }
        }
        if !matches!(
            self.content_disposition_type.as_str(),
            "attachment" | "inline"
        ) {
            return Err(ConfigError::Validation(
                "images.content_disposition_type must be \"attachment\" or \"inline\"".into(),
            ));
        }
        Ok(())
    }

    /// Whether a remote image URL points at an allowed domain.
    ///
    /// Relative URLs are local assets and always allowed.
    pub fn allows_remote(&self, url: &str) -> bool {
        let Some(rest) = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
        else {
            return !url.contains("://");
        };
        let host = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .rsplit('@')
            .next()
            .unwrap_or_default();
        let host = host.split(':').next().unwrap_or_default();
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(host))
    }
}

/// Targets of the call-to-action buttons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    pub about: String,
    pub get_budgie: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            about: "/about".to_string(),
            get_budgie: "/download".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Tab indicator and headline colour.
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#4caf50".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
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

/// Load `site.toml` from the site root over the stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// CSS custom properties derived from the theme.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(":root {{\n    --accent: {};\n}}", theme.accent)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Budgie Site Configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Appended to every page title: "Home | Buddies of Budgie"
site_name = "Buddies of Budgie"

# Favicon for pages that do not set their own icon
default_icon = "/images/logo.svg"

# Linked from every page with rel="me"
social_profile = "https://floss.social/@BuddiesOfBudgie"

# Every entry here gets a permanent redirect /{slug} -> /blog/{slug}
blog_dir = "content/blog"

# Locale message bundles, one {locale}.json per locale
messages_dir = "messages"

# Copied verbatim to the output root
public_dir = "public"

# File extensions treated as pages
page_extensions = ["ts", "tsx", "js", "jsx", "md", "mdx"]

# Soft limit for the data embedded in a single page, in bytes
large_page_data_bytes = 512000

# ---------------------------------------------------------------------------
# Localization
# ---------------------------------------------------------------------------
[i18n]
locales = ["en"]
# Served from the site root; other locales live under /{locale}/
default_locale = "en"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Remote hosts images may be loaded from
domains = ["avatars.githubusercontent.com", "blog.buddiesofbudgie.org"]
# Supported: image/avif, image/webp
formats = ["image/avif", "image/webp"]
content_disposition_type = "attachment"
content_security_policy = "default-src 'self'; script-src 'none'; sandbox;"
dangerously_allow_svg = true

# ---------------------------------------------------------------------------
# Call-to-action targets
# ---------------------------------------------------------------------------
[links]
about = "/about"
get_budgie = "/download"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
accent = "#4caf50"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_published_site() {
        let config = SiteConfig::default();
        assert_eq!(config.site_name, "Buddies of Budgie");
        assert_eq!(config.default_icon, "/images/logo.svg");
        assert_eq!(config.i18n.locales, vec!["en"]);
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.large_page_data_bytes, 512_000);
        assert_eq!(config.images.formats, vec!["image/avif", "image/webp"]);
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.site_name, defaults.site_name);
        assert_eq!(parsed.page_extensions, defaults.page_extensions);
        assert_eq!(parsed.images.domains, defaults.images.domains);
        assert_eq!(parsed.links.get_budgie, defaults.links.get_budgie);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[i18n]
locales = ["en", "de"]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.i18n.locales, vec!["en", "de"]);
        // untouched sections keep defaults
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.site_name, "Buddies of Budgie");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.blog_dir, "content/blog");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
site_name = "Budgie Test"

[links]
get_budgie = "https://example.org/get"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_name, "Budgie Test");
        assert_eq!(config.links.get_budgie, "https://example.org/get");
        assert_eq!(config.links.about, "/about");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "site_name = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "site_nmae = \"typo\"").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r#"
[images]
format = ["image/avif"]
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"site_name = "a""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"site_name = "b""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("site_name").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[images]
domains = ["a.org"]
dangerously_allow_svg = true
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[images]
dangerously_allow_svg = false
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let images = merged.get("images").unwrap();
        assert_eq!(
            images.get("dangerously_allow_svg").unwrap().as_bool(),
            Some(false)
        );
        assert_eq!(images.get("domains").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"locales = ["en", "de"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"locales = ["fr"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("locales").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_locale_must_be_listed() {
        let mut config = SiteConfig::default();
        config.i18n.default_locale = "de".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_locales_not_empty() {
        let mut config = SiteConfig::default();
        config.i18n.locales.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_duplicate_locale() {
        let mut config = SiteConfig::default();
        config.i18n.locales = vec!["en".into(), "en".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_locale_cannot_escape_messages_dir() {
        let mut config = SiteConfig::default();
        config.i18n.locales = vec!["en".into(), "../secret".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_unsupported_image_format() {
        let mut config = SiteConfig::default();
        config.images.formats.push("image/gif".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("image/gif"));
    }

    #[test]
    fn validate_domain_with_scheme_rejected() {
        let mut config = SiteConfig::default();
        config.images.domains = vec!["https://example.org".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_page_extensions() {
        let mut config = SiteConfig::default();
        config.page_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn page_extension_lookup_is_case_insensitive() {
        let config = SiteConfig::default();
        assert!(config.is_page_extension("mdx"));
        assert!(config.is_page_extension("MD"));
        assert!(!config.is_page_extension("txt"));
    }

    #[test]
    fn locale_path_prefix() {
        let i18n = I18nConfig {
            locales: vec!["en".into(), "de".into()],
            default_locale: "en".into(),
        };
        assert_eq!(i18n.path_prefix("en"), "");
        assert_eq!(i18n.path_prefix("de"), "/de");
    }

    #[test]
    fn allows_remote_checks_host() {
        let images = ImagesConfig::default();
        assert!(images.allows_remote("https://avatars.githubusercontent.com/u/1?v=4"));
        assert!(images.allows_remote("https://blog.buddiesofbudgie.org:443/a.png"));
        assert!(!images.allows_remote("https://evil.example/a.png"));
        assert!(!images.allows_remote(
            "https://blog.buddiesofbudgie.org@evil.example/a.png"
        ));
        assert!(images.allows_remote("/images/BudgieMenu.png"));
    }

    #[test]
    fn theme_css_has_accent_variable() {
        let css = generate_theme_css(&ThemeConfig::default());
        assert!(css.contains("--accent: #4caf50;"));
    }
}
