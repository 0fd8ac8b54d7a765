//! Presentational components.
//!
//! Stateless maud renderers shared by the page compositions. Each takes
//! already-resolved content (fallback copy is applied by the schema
//! accessors) and returns markup; none of them read files or config.

use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};

use crate::gallery::{LEAD_IMAGE_SIZES, ProjectDetail};
use crate::parallax::ParallaxSettings;
use crate::project::{Project, id_slug};
use crate::schema::{AboutContent, ButtonVariant, Card, Cta, HeroContent, Highlight};

/// `sizes` hint for project cover images in the portfolio grid.
pub const COVER_SIZES: &str = "(min-width: 1024px) 33vw, (min-width: 640px) 50vw, 100vw";

/// Converts authored markdown to HTML.
///
/// Descriptions come from the CMS, so raw HTML in them is shown as text
/// rather than passed through.
pub fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

/// A DOM id derived from a content id, see [`id_slug`].
pub fn dom_id(prefix: &str, id: &str) -> String {
    format!("{prefix}-{}", id_slug(id))
}

pub fn button(cta: &Cta) -> Markup {
    let class = match cta.variant {
        ButtonVariant::Primary => "button button-primary",
        ButtonVariant::Ghost => "button button-ghost",
    };
    html! {
        a class=(class) href=(cta.href) { (cta.label) }
    }
}

pub fn highlight_list(items: &[Highlight]) -> Markup {
    html! {
        ul.highlights {
            @for item in items {
                li.highlight {
                    @if let Some(title) = &item.title {
                        strong { (title) }
                    }
                    @if let Some(text) = &item.text {
                        span { (text) }
                    }
                }
            }
        }
    }
}

/// Lazy-loaded image in a rounded frame.
pub fn image_tile(src: &str, alt: &str, sizes: &str) -> Markup {
    html! {
        figure.image-tile {
            img src=(src) alt=(alt) sizes=(sizes) loading="lazy" decoding="async";
        }
    }
}

/// Label/value cards in a two-column grid, in the given order.
pub fn fact_cards(facts: &[(String, String)]) -> Markup {
    html! {
        dl.fact-grid {
            @for (label, value) in facts {
                div.fact-card {
                    dt { (label) }
                    dd { (value) }
                }
            }
        }
    }
}

/// Page heading with an optional intro line.
pub fn cms_header(heading: &str, intro: Option<&str>) -> Markup {
    html! {
        header.cms-header {
            h1 { (heading) }
            @if let Some(intro) = intro {
                p.intro { (intro) }
            }
        }
    }
}

pub fn hero(hero: &HeroContent) -> Markup {
    html! {
        section.hero {
            div.hero-copy {
                p.kicker { (hero.kicker()) }
                h1 { (hero.title()) }
                p.hero-blurb { (hero.blurb()) }
                div.button-row {
                    (button(&hero.primary()))
                    (button(&hero.secondary()))
                }
                (highlight_list(&hero.highlights()))
            }
            div.hero-media {
                img src=(hero.image()) alt=(hero.image_alt()) fetchpriority="high";
            }
        }
    }
}

pub fn about_me(about: &AboutContent) -> Markup {
    let (hero_src, hero_alt) = about.hero();
    html! {
        section.about-me {
            div.about-media {
                (image_tile(hero_src, hero_alt, "(min-width: 1024px) 40vw, 100vw"))
                div.about-details {
                    @for (src, alt) in about.details() {
                        (image_tile(src, alt, "(min-width: 1024px) 20vw, 50vw"))
                    }
                }
            }
            div.about-copy {
                @if let Some((src, alt)) = about.headshot() {
                    img.headshot src=(src) alt=(alt) loading="lazy";
                }
                h2 { (about.heading()) }
                @if let Some(intro) = &about.intro {
                    p { (intro) }
                }
                @if !about.highlights.is_empty() {
                    (highlight_list(&about.highlights))
                }
                @if let Some(quote) = &about.quote {
                    blockquote { (quote) }
                }
                div.button-row {
                    (button(&about.primary()))
                    (button(&about.secondary()))
                }
            }
        }
    }
}

/// A fixed-height band whose background layer is moved by the parallax
/// script.
///
/// The layer overhangs the band by `speed × 100vh` on both edges, which is
/// the largest offset the script will ever apply.
pub fn parallax_band(image: &str, settings: &ParallaxSettings, cards: &[Card]) -> Markup {
    let speed = settings.speed;
    html! {
        section.parallax-band
            data-parallax-speed=(speed)
            data-parallax-min-width=(settings.min_viewport_width)
            style={ "--parallax-speed: " (speed) } {
            img.parallax-layer src=(image) alt="" aria-hidden="true" data-parallax-layer;
            @if !cards.is_empty() {
                div.parallax-cards {
                    @for card in cards {
                        div.parallax-card {
                            @if let Some(title) = &card.title {
                                h3 { (title) }
                            }
                            @if let Some(text) = &card.text {
                                p { (text) }
                            }
                            @if let Some(cta) = card.cta() {
                                (button(&cta))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A portfolio grid card that opens the project's dialog.
pub fn project_card(project: &Project) -> Markup {
    html! {
        li.project-card {
            button.project-open type="button"
                aria-label={ "Open " (project.title) }
                aria-haspopup="dialog"
                aria-controls=(dom_id("project", &project.id))
                data-project-id=(project.id) {
                img src=(project.cover) alt=(project.title) sizes=(COVER_SIZES) loading="lazy";
                span.project-card-text {
                    span.project-card-title { (project.title) }
                    @if let Some(subtext) = &project.subtext {
                        span.project-card-subtext { (subtext) }
                    }
                }
            }
        }
    }
}

/// The project detail dialog, rendered hidden.
///
/// Clicking the backdrop or the close button (both `data-modal-close`)
/// closes it; the gallery script handles Escape and the scroll lock.
pub fn project_dialog(detail: &ProjectDetail) -> Markup {
    html! {
        div.modal id=(dom_id("project", &detail.id)) data-project-id=(detail.id) hidden {
            div.modal-backdrop data-modal-close {}
            div.modal-surface role="dialog" aria-modal="true" aria-label=(detail.label) tabindex="-1" {
                header.modal-header {
                    span.modal-heading { (detail.label) }
                    button.modal-close type="button" aria-label="Close" data-modal-close { "×" }
                }
                div.modal-body {
                    div.modal-media {
                        img.modal-lead src=(detail.lead_image) alt=(detail.title) sizes=(LEAD_IMAGE_SIZES);
                        @if !detail.thumbnails.is_empty() {
                            ul.modal-thumbs {
                                @for (src, alt) in &detail.thumbnails {
                                    li { img src=(src) alt=(alt) loading="lazy"; }
                                }
                            }
                        }
                    }
                    div.modal-copy {
                        @if let Some(subtext) = &detail.subtext {
                            p.modal-subtext { (subtext) }
                        }
                        h3 { (detail.title) }
                        @if let Some(description) = &detail.description {
                            div.modal-description { (markdown(description)) }
                        }
                        @if !detail.facts.is_empty() {
                            (fact_cards(&detail.facts))
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Meta;

    fn project() -> Project {
        let mut meta = Meta::new();
        meta.insert("Location", "Observatory");
        meta.insert("Scope", "Full renovation");
        Project {
            id: "obs-cottage".to_string(),
            title: "Observatory Cottage".to_string(),
            subtext: Some("Residential".to_string()),
            cover: "/images/p/cover.jpg".to_string(),
            images: (1..=9).map(|i| format!("/images/p/{i}.jpg")).collect(),
            description: Some("A **calm** retreat.".to_string()),
            meta,
        }
    }

    #[test]
    fn markdown_escapes_raw_html() {
        let html = markdown("Nice <script>alert(1)</script> room\n\n<div onclick=\"x()\">hi</div>")
            .into_string();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn markdown_renders_inline_formatting() {
        let html = markdown("This is **bold** and *italic*.").into_string();
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn dom_id_replaces_unsafe_characters() {
        assert_eq!(dom_id("project", "a b/c"), "project-a-b-c");
        assert_eq!(dom_id("project", "12"), "project-12");
    }

    #[test]
    fn button_variants_map_to_classes() {
        let html = button(&Cta {
            label: "Go",
            href: "/x",
            variant: ButtonVariant::Primary,
        })
        .into_string();
        assert_eq!(html, r#"<a class="button button-primary" href="/x">Go</a>"#);
    }

    #[test]
    fn hero_uses_fallback_copy() {
        let html = hero(&HeroContent::default()).into_string();
        assert!(html.contains("Timeless spaces, lived-in warmth"));
        assert!(html.contains(r#"href="/portfolio""#));
        assert!(html.contains("Materials that age well"));
    }

    #[test]
    fn cms_header_omits_missing_intro() {
        let html = cms_header("Art", None).into_string();
        assert!(html.contains("<h1>Art</h1>"));
        assert!(!html.contains("intro"));
    }

    #[test]
    fn parallax_band_carries_speed() {
        let settings = ParallaxSettings {
            speed: 0.25,
            min_viewport_width: 720.0,
        };
        let html = parallax_band("/images/band.jpg", &settings, &[]).into_string();
        assert!(html.contains(r#"data-parallax-speed="0.25""#));
        assert!(html.contains(r#"data-parallax-min-width="720""#));
        assert!(html.contains("--parallax-speed: 0.25"));
        assert!(html.contains("data-parallax-layer"));
        assert!(!html.contains("parallax-cards"));
    }

    #[test]
    fn project_card_is_labelled_button() {
        let html = project_card(&project()).into_string();
        assert!(html.contains(r#"aria-label="Open Observatory Cottage""#));
        assert!(html.contains(r#"aria-controls="project-obs-cottage""#));
        assert!(html.contains(COVER_SIZES));
    }

    #[test]
    fn dialog_has_accessible_surface() {
        let html = project_dialog(&ProjectDetail::new(&project())).into_string();
        assert!(html.contains(r#"role="dialog" aria-modal="true" aria-label="Observatory Cottage""#));
        assert!(html.contains(r#"aria-label="Close""#));
        assert!(html.contains("hidden"));
        assert!(html.contains(LEAD_IMAGE_SIZES));
    }

    #[test]
    fn dialog_shows_at_most_six_thumbnails() {
        let html = project_dialog(&ProjectDetail::new(&project())).into_string();
        let thumbs = html.split("modal-thumbs").nth(1).unwrap();
        assert_eq!(thumbs.matches("<img").count(), 6);
        assert!(html.contains(r#"alt="Observatory Cottage 2""#));
        assert!(html.contains(r#"alt="Observatory Cottage 7""#));
        assert!(!html.contains("/images/p/8.jpg"));
    }

    #[test]
    fn dialog_without_extra_images_has_no_thumbnails() {
        let mut single = project();
        single.images.clear();
        let html = project_dialog(&ProjectDetail::new(&single)).into_string();
        assert!(!html.contains("modal-thumbs"));
        assert!(html.contains(r#"src="/images/p/cover.jpg""#));
    }

    #[test]
    fn dialog_copy_is_in_order() {
        let html = project_dialog(&ProjectDetail::new(&project())).into_string();
        let subtext = html.find("Residential").unwrap();
        let title = html.find("<h3>").unwrap();
        let description = html.find("<strong>calm</strong>").unwrap();
        let location = html.find("Location").unwrap();
        let scope = html.find("Scope").unwrap();
        assert!(subtext < title && title < description);
        assert!(description < location && location < scope);
    }

    #[test]
    fn untitled_dialog_uses_fallback_label() {
        let mut untitled = project();
        untitled.title = String::new();
        let html = project_dialog(&ProjectDetail::new(&untitled)).into_string();
        assert!(html.contains(r#"aria-label="Project details""#));
    }
}
