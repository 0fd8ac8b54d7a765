//! Typed page content.
//!
//! Content records are loosely-typed JSON edited by hand or by a CMS. Each
//! page gets an explicit schema here where every field is optional and every
//! field is deserialized leniently: a value of the wrong shape becomes the
//! field's default instead of failing the whole document. Fallback copy
//! lives in accessor methods so render sites never repeat it.
//!
//! Field names are camelCase on disk (`ctaLabel`, `keyMoves`) and
//! snake_case in Rust.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, substituting `T::default()` when the value has the
/// wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`] for optional strings, also treating `""` as absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Per-page SEO overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

/// Title + short text, used for hero highlights, about-me highlights and
/// process overview cards.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Highlight {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

impl Highlight {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            text: Some(text.to_string()),
        }
    }
}

/// An image reference with alt text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    #[serde(deserialize_with = "lenient_text")]
    pub src: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    #[default]
    Ghost,
}

/// A call-to-action link.
#[derive(Debug, Clone, PartialEq)]
pub struct Cta<'a> {
    pub label: &'a str,
    pub href: &'a str,
    pub variant: ButtonVariant,
}

// ============================================================================
// Home
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomePage {
    #[serde(deserialize_with = "lenient")]
    pub seo: Seo,
    #[serde(deserialize_with = "lenient")]
    pub hero: HeroContent,
    #[serde(deserialize_with = "lenient")]
    pub parallax: ParallaxContent,
    #[serde(deserialize_with = "lenient")]
    pub about: AboutContent,
    #[serde(deserialize_with = "lenient")]
    pub featured: FeaturedContent,
    #[serde(deserialize_with = "lenient")]
    pub services: Vec<Service>,
    #[serde(deserialize_with = "lenient")]
    pub services_meta: ServicesMeta,
    #[serde(deserialize_with = "lenient")]
    pub services_image: ImageRef,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub kicker: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub blurb: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image_alt: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub primary_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub primary_href: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_href: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub highlights: Vec<Highlight>,
}

impl HeroContent {
    pub fn title(&self) -> &str {
        or(&self.title, "Timeless spaces, lived-in warmth")
    }

    pub fn kicker(&self) -> &str {
        or(&self.kicker, "Louise Decor & Design")
    }

    pub fn blurb(&self) -> &str {
        or(
            &self.blurb,
            "Quiet, grounded interiors made for everyday life, balancing circulation, light, and tactile materials.",
        )
    }

    pub fn image(&self) -> &str {
        or(&self.image, "/images/hero/hero-wide.jpg")
    }

    pub fn image_alt(&self) -> &str {
        or(&self.image_alt, "Project atmosphere")
    }

    pub fn primary(&self) -> Cta<'_> {
        Cta {
            label: or(&self.primary_label, "See our work"),
            href: or(&self.primary_href, "/portfolio"),
            variant: ButtonVariant::Primary,
        }
    }

    pub fn secondary(&self) -> Cta<'_> {
        Cta {
            label: or(&self.secondary_label, "How we work"),
            href: or(&self.secondary_href, "/process"),
            variant: ButtonVariant::Ghost,
        }
    }

    /// Content highlights, or two house defaults when none are given.
    pub fn highlights(&self) -> Vec<Highlight> {
        if self.highlights.is_empty() {
            vec![
                Highlight::new("Materials that age well", "Texture & tone over trends."),
                Highlight::new(
                    "Clarity from day one",
                    "Scope, timeline, and budget mapped clearly.",
                ),
            ]
        } else {
            self.highlights.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxContent {
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    /// Per-page override of the configured parallax speed.
    #[serde(deserialize_with = "lenient")]
    pub speed: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cta_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub href: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub variant: ButtonVariant,
}

impl Card {
    /// The card's button, present only when it has a label.
    pub fn cta(&self) -> Option<Cta<'_>> {
        self.cta_label.as_deref().map(|label| Cta {
            label,
            href: or(&self.href, "/contact"),
            variant: self.variant,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(deserialize_with = "lenient_text")]
    pub hero: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub hero_alt: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub detail1: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub detail1_alt: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub detail2: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub detail2_alt: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub headshot: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub headshot_alt: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub intro: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub highlights: Vec<Highlight>,
    #[serde(deserialize_with = "lenient_text")]
    pub quote: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub primary_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub primary_href: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_href: Option<String>,
}

const ABOUT_IMAGE: &str = "/images/about-me.jpg";

impl AboutContent {
    pub fn hero(&self) -> (&str, &str) {
        (
            or(&self.hero, ABOUT_IMAGE),
            or(&self.hero_alt, "Studio atmosphere"),
        )
    }

    pub fn details(&self) -> [(&str, &str); 2] {
        [
            (
                or(&self.detail1, ABOUT_IMAGE),
                or(&self.detail1_alt, "Material palette"),
            ),
            (
                or(&self.detail2, ABOUT_IMAGE),
                or(&self.detail2_alt, "Light and texture study"),
            ),
        ]
    }

    pub fn headshot(&self) -> Option<(&str, &str)> {
        self.headshot
            .as_deref()
            .map(|src| (src, or(&self.headshot_alt, "Designer")))
    }

    pub fn heading(&self) -> &str {
        or(&self.heading, "About me")
    }

    pub fn primary(&self) -> Cta<'_> {
        Cta {
            label: or(&self.primary_label, "See my work"),
            href: or(&self.primary_href, "/portfolio"),
            variant: ButtonVariant::Ghost,
        }
    }

    pub fn secondary(&self) -> Cta<'_> {
        Cta {
            label: or(&self.secondary_label, "How I work"),
            href: or(&self.secondary_href, "/process"),
            variant: ButtonVariant::Primary,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedContent {
    #[serde(deserialize_with = "lenient_text")]
    pub main_image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub key_moves: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cta_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cta_href: Option<String>,
}

impl FeaturedContent {
    pub fn cta(&self) -> Cta<'_> {
        Cta {
            label: or(&self.cta_label, "View project"),
            href: or(&self.cta_href, "/portfolio"),
            variant: ButtonVariant::Ghost,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub emphasis: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicesMeta {
    #[serde(deserialize_with = "lenient_text")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cta_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cta_href: Option<String>,
}

impl ServicesMeta {
    pub fn heading(&self) -> &str {
        or(&self.heading, "Services at a glance")
    }

    pub fn cta(&self) -> Cta<'_> {
        Cta {
            label: or(&self.cta_label, "Start a project"),
            href: or(&self.cta_href, "/contact"),
            variant: ButtonVariant::Primary,
        }
    }
}

// ============================================================================
// Portfolio
// ============================================================================

/// The portfolio page shell (`portfolio.json`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioPage {
    #[serde(deserialize_with = "lenient")]
    pub seo: Seo,
    #[serde(deserialize_with = "lenient_text")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub intro: Option<String>,
}

impl PortfolioPage {
    pub fn heading(&self) -> &str {
        or(&self.heading, "Portfolio")
    }
}

// ============================================================================
// Process
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProcessPage {
    #[serde(deserialize_with = "lenient")]
    pub seo: Seo,
    #[serde(deserialize_with = "lenient_text")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub intro: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub steps: Vec<Step>,
    #[serde(deserialize_with = "lenient")]
    pub sections: Vec<ProcessSection>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Step {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub body: Option<String>,
}

impl ProcessPage {
    pub fn heading(&self) -> &str {
        or(&self.heading, "Our process")
    }

    pub fn steps(&self) -> Vec<Step> {
        if !self.steps.is_empty() {
            return self.steps.clone();
        }
        [
            ("Discovery", "We learn your taste, lifestyle, and goals."),
            ("Design", "We present mood boards, layouts, and finishes."),
            ("Procurement", "We order, track, and manage logistics."),
            ("Installation", "White-glove install and final styling."),
        ]
        .into_iter()
        .map(|(title, body)| Step {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
        })
        .collect()
    }
}

/// A free-form image + copy block on the process page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessSection {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: ImageRef,
    #[serde(deserialize_with = "lenient")]
    pub highlights: Vec<Highlight>,
    #[serde(deserialize_with = "lenient")]
    pub key_moves: Vec<String>,
}

// ============================================================================
// Art
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtPage {
    #[serde(deserialize_with = "lenient")]
    pub seo: Seo,
    #[serde(deserialize_with = "lenient_text")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub intro: Option<String>,
    /// Entries that fail to parse (no `src` or `title`) are dropped.
    #[serde(deserialize_with = "lenient_pieces")]
    pub pieces: Vec<Piece>,
    #[serde(deserialize_with = "lenient")]
    pub gallery: Vec<ImageRef>,
}

impl ArtPage {
    pub fn heading(&self) -> &str {
        or(&self.heading, "Art")
    }

    /// Gallery images that actually have a source.
    pub fn gallery_images(&self) -> impl Iterator<Item = (&str, &str)> {
        self.gallery
            .iter()
            .filter_map(|g| g.src.as_deref().map(|src| (src, g.alt.as_deref().unwrap_or(""))))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Piece {
    #[serde(default, deserialize_with = "crate::project::string_or_number")]
    pub id: String,
    pub src: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

impl Piece {
    /// `medium · size · year`, skipping whatever is missing.
    pub fn details(&self) -> String {
        [&self.medium, &self.size, &self.year]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

fn lenient_pieces<'de, D>(deserializer: D) -> Result<Vec<Piece>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPage {
    #[serde(deserialize_with = "lenient")]
    pub seo: Seo,
    #[serde(deserialize_with = "lenient_text")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub intro: Option<String>,
}

impl ContactPage {
    pub fn heading(&self) -> &str {
        or(&self.heading, "Contact our team")
    }
}
