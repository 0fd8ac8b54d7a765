//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered over stock defaults: user files only
//! need the keys they want to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Louise Decor & Design"
//! base_url = "https://example.com"
//! default_title = "Decor and Design Services | Interior Design in Cape Town"
//! default_description = "Discover expert decor and design services in Cape Town. ..."
//! og_image = "/images/og.jpg"
//! logo = "/images/logo.webp"
//! telephone = "+27 72 390 9235"
//! address = ["62 Lower Main Rd", "Observatory, Cape Town, 7925"]
//! hours = "Mon–Fri, 10:30–5:30 p.m."
//! locality = "Cape Town"
//! region = "Western Cape"
//!
//! [colors]
//! brand = "#000000"         # Buttons, active nav, focus rings
//! brand_dark = "#2d2a2a"
//! brand_light = "#faf7f7"   # Hero, footer and process backgrounds
//! background = "#ffffff"
//! text = "#171717"
//! text_muted = "#525252"
//! border = "#e5e5e5"
//!
//! [parallax]
//! speed = 0.3               # Fraction of scroll speed (0.1–0.6 looks natural)
//! min_viewport_width = 640  # Narrower viewports get a static background
//!
//! [contact]
//! # form_action = "https://formspree.io/f/your-form-id"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::parallax::{self, ParallaxSettings};

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
    /// Studio identity, SEO defaults and contact details.
    pub site: SiteInfo,
    /// Brand palette.
    pub colors: ColorConfig,
    /// Parallax band behavior.
    pub parallax: ParallaxConfig,
    /// Contact form settings.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if !self.site.base_url.starts_with("http://") && !self.site.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if !(self.parallax.speed.is_finite() && self.parallax.speed > 0.0) {
            return Err(ConfigError::Validation(
                "parallax.speed must be a positive number".into(),
            ));
        }
        if self.parallax.min_viewport_width < 0.0 {
            return Err(ConfigError::Validation(
                "parallax.min_viewport_width must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Absolute URL of a site path, e.g. `/portfolio`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.site.base_url.trim_end_matches('/'), path)
    }
}

/// Studio identity and SEO defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    /// Origin used for canonical and Open Graph URLs.
    pub base_url: String,
    /// `<title>` of pages without their own SEO title.
    pub default_title: String,
    pub default_description: String,
    pub og_image: String,
    pub logo: String,
    pub telephone: String,
    /// Street address lines shown in the footer.
    pub address: Vec<String>,
    pub hours: String,
    pub locality: String,
    pub region: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Louise Decor & Design".to_string(),
            base_url: "https://example.com".to_string(),
            default_title: "Decor and Design Services | Interior Design in Cape Town".to_string(),
            default_description: "Discover expert decor and design services in Cape Town. We offer personalized interior design solutions to transform your space beautifully.".to_string(),
            og_image: "/images/og.jpg".to_string(),
            logo: "/images/logo.webp".to_string(),
            telephone: "+27 72 390 9235".to_string(),
            address: vec![
                "62 Lower Main Rd".to_string(),
                "Observatory, Cape Town, 7925".to_string(),
            ],
            hours: "Mon–Fri, 10:30–5:30 p.m.".to_string(),
            locality: "Cape Town".to_string(),
            region: "Western Cape".to_string(),
        }
    }
}

/// Brand palette, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Buttons, active navigation, focus rings.
    pub brand: String,
    pub brand_dark: String,
    /// Soft background for hero, footer and process sections.
    pub brand_light: String,
    pub background: String,
    pub text: String,
    /// Secondary copy, captions, fact labels.
    pub text_muted: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            brand: "#000000".to_string(),
            brand_dark: "#2d2a2a".to_string(),
            brand_light: "#faf7f7".to_string(),
            background: "#ffffff".to_string(),
            text: "#171717".to_string(),
            text_muted: "#525252".to_string(),
            border: "#e5e5e5".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    /// Fraction of the scroll speed the background moves at.
    pub speed: f64,
    /// Viewports narrower than this (CSS px) get a static background.
    pub min_viewport_width: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speed: parallax::DEFAULT_SPEED,
            min_viewport_width: parallax::DEFAULT_MIN_VIEWPORT_WIDTH,
        }
    }
}

impl ParallaxConfig {
    /// Settings for one band, honoring a per-page speed override.
    pub fn settings(&self, page_speed: Option<f64>) -> ParallaxSettings {
        ParallaxSettings {
            speed: parallax::effective_speed(page_speed, self.speed),
            min_viewport_width: self.min_viewport_width,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Where the contact form posts. Without it the form has no action.
    pub form_action: Option<String>,
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
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Studio Site Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the content root.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Studio identity and SEO defaults
# ---------------------------------------------------------------------------
[site]
name = "Louise Decor & Design"

# Origin for canonical and Open Graph URLs (no trailing slash needed).
base_url = "https://example.com"

# Used by pages whose content has no seo.title / seo.description.
default_title = "Decor and Design Services | Interior Design in Cape Town"
default_description = "Discover expert decor and design services in Cape Town. We offer personalized interior design solutions to transform your space beautifully."

# Social preview image and header/footer logo (paths under assets/).
og_image = "/images/og.jpg"
logo = "/images/logo.webp"

# Footer and structured data.
telephone = "+27 72 390 9235"
address = ["62 Lower Main Rd", "Observatory, Cape Town, 7925"]
hours = "Mon–Fri, 10:30–5:30 p.m."
locality = "Cape Town"
region = "Western Cape"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
brand = "#000000"         # Buttons, active nav, focus rings
brand_dark = "#2d2a2a"
brand_light = "#faf7f7"   # Hero, footer and process backgrounds
background = "#ffffff"
text = "#171717"
text_muted = "#525252"    # Captions, fact labels, intros
border = "#e5e5e5"

# ---------------------------------------------------------------------------
# Parallax band
# ---------------------------------------------------------------------------
[parallax]
# Fraction of the scroll speed the background moves at. 0.1-0.6 looks
# natural; larger values exaggerate the effect. home.json can override it
# with parallax.speed.
speed = 0.3

# Viewports narrower than this (CSS pixels) get a static background.
min_viewport_width = 640.0

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Endpoint the contact form posts to (e.g. a Formspree form URL).
# form_action = "https://formspree.io/f/your-form-id"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-brand: {brand};
    --color-brand-dark: {brand_dark};
    --color-brand-light: {brand_light};
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
}}"#,
        brand = colors.brand,
        brand_dark = colors.brand_dark,
        brand_light = colors.brand_light,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Louise Decor & Design");
        assert_eq!(config.site.address.len(), 2);
        assert!(config.contact.form_action.is_none());
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn default_parallax_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.parallax.speed, 0.3);
        assert_eq!(config.parallax.min_viewport_width, 640.0);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
brand = "#c0392b"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.brand, "#c0392b");
        assert_eq!(config.colors.brand_light, "#faf7f7");
        assert_eq!(config.site.name, "Louise Decor & Design");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[parallax]
sped = 0.4
"#;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn page_speed_overrides_config_speed() {
        let parallax = ParallaxConfig {
            speed: 0.2,
            min_viewport_width: 500.0,
        };
        assert_eq!(parallax.settings(Some(0.5)).speed, 0.5);
        assert_eq!(parallax.settings(None).speed, 0.2);
        assert_eq!(parallax.settings(Some(-1.0)).speed, 0.2);
        assert_eq!(parallax.settings(None).min_viewport_width, 500.0);
    }

    #[test]
    fn absolute_url_joins_without_double_slash() {
        let mut config = SiteConfig::default();
        config.site.base_url = "https://studio.example/".to_string();
        assert_eq!(
            config.absolute_url("/portfolio"),
            "https://studio.example/portfolio"
        );
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.brand = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-brand: #123456"));
        assert!(css.contains("--color-brand-light: #faf7f7"));
        assert!(css.contains("--color-text-muted:"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.base_url, "https://example.com");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
name = "Hayes Valley Interiors"
base_url = "https://hayes.example"

[contact]
form_action = "https://forms.example/abc"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "Hayes Valley Interiors");
        assert_eq!(
            config.contact.form_action.as_deref(),
            Some("https://forms.example/abc")
        );
        // Unspecified values keep their defaults.
        assert_eq!(config.site.telephone, "+27 72 390 9235");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_non_positive_speed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[parallax]\nspeed = 0.0\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_rejects_relative_base_url() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\nbase_url = \"example.com\"\n")
            .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.name, defaults.site.name);
        assert_eq!(config.parallax.speed, defaults.parallax.speed);
        assert_eq!(config.colors.brand_light, defaults.colors.brand_light);
        assert_eq!(config.site.address, defaults.site.address);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"speed = 0.3"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"speed = 0.5"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("speed").unwrap().as_float(), Some(0.5));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors]
brand = "#000"
text = "#111"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors]
brand = "#f00"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let colors = merged.get("colors").unwrap();
        assert_eq!(colors.get("brand").unwrap().as_str(), Some("#f00"));
        assert_eq!(colors.get("text").unwrap().as_str(), Some("#111"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"address = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"address = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("address").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn resolve_config_stock_defaults_round_trip() {
        let config = resolve_config(stock_defaults_value(), None).unwrap();
        assert_eq!(config.site.name, "Louise Decor & Design");
    }
}
