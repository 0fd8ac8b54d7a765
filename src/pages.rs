//! Page compositions.
//!
//! One renderer per [`Route`]. Each takes its typed page content (already
//! defaulted by the loader) plus the site config and returns the finished
//! document.

use maud::{Markup, html};

use crate::components::{
    about_me, button, cms_header, dom_id, fact_cards, hero, highlight_list, image_tile, markdown,
    parallax_band, project_card, project_dialog,
};
use crate::config::SiteConfig;
use crate::gallery::ProjectDetail;
use crate::layout::{PageMeta, base_document};
use crate::project::Project;
use crate::schema::{
    ArtPage, ContactPage, FeaturedContent, HomePage, ImageRef, PortfolioPage, ProcessPage,
    ProcessSection, Service, ServicesMeta,
};
use crate::types::Route;

const GALLERY_JS: &str = include_str!("../static/gallery.js");
const PARALLAX_JS: &str = include_str!("../static/parallax.js");

// ============================================================================
// Home
// ============================================================================

pub fn render_home(page: &HomePage, config: &SiteConfig, css: &str) -> Markup {
    let meta = PageMeta::resolve(Route::Home, &page.seo, config);
    let band = page.parallax.image.as_deref().map(|image| {
        let settings = config.parallax.settings(page.parallax.speed);
        parallax_band(image, &settings, &page.parallax.cards)
    });

    let content = html! {
        (hero(&page.hero))
        @if let Some(band) = &band {
            (band)
        }
        (about_me(&page.about))
        (featured(&page.featured))
        (services(&page.services, &page.services_meta, &page.services_image))
    };

    let scripts: &[&str] = if band.is_some() { &[PARALLAX_JS] } else { &[] };
    base_document(&meta, config, css, scripts, content)
}

fn featured(featured: &FeaturedContent) -> Markup {
    html! {
        section.featured {
            div.featured-media {
                @if let Some(src) = &featured.main_image {
                    (image_tile(src, featured.title.as_deref().unwrap_or(""), "(min-width: 1024px) 50vw, 100vw"))
                }
                @if let Some(src) = &featured.secondary_image {
                    (image_tile(src, "", "(min-width: 1024px) 25vw, 50vw"))
                }
            }
            div.featured-copy {
                p.kicker { "Featured project" }
                @if let Some(title) = &featured.title {
                    h2 { (title) }
                }
                @if let Some(body) = &featured.body {
                    p { (body) }
                }
                @if !featured.key_moves.is_empty() {
                    ul.key-moves {
                        @for step in &featured.key_moves {
                            li { (step) }
                        }
                    }
                }
                (button(&featured.cta()))
            }
        }
    }
}

fn services(services: &[Service], meta: &ServicesMeta, image: &ImageRef) -> Markup {
    html! {
        section.services {
            div.services-copy {
                h2 { (meta.heading()) }
                @if !services.is_empty() {
                    ul.service-list {
                        @for service in services {
                            @let class = if service.emphasis { "service service-emphasis" } else { "service" };
                            li class=(class) {
                                @if let Some(title) = &service.title {
                                    h3 { (title) }
                                }
                                @if let Some(body) = &service.body {
                                    p { (body) }
                                }
                            }
                        }
                    }
                }
                (button(&meta.cta()))
            }
            @if let Some(src) = &image.src {
                (image_tile(src, image.alt.as_deref().unwrap_or(""), "(min-width: 1024px) 40vw, 100vw"))
            }
        }
    }
}

// ============================================================================
// Portfolio
// ============================================================================

/// The project grid plus one hidden dialog per project.
pub fn render_portfolio(
    page: &PortfolioPage,
    projects: &[Project],
    config: &SiteConfig,
    css: &str,
) -> Markup {
    let meta = PageMeta::resolve(Route::Portfolio, &page.seo, config);
    let content = html! {
        (cms_header(page.heading(), page.intro.as_deref()))
        @if projects.is_empty() {
            p.empty-state { "Projects are coming soon." }
        } @else {
            ul.project-grid {
                @for project in projects {
                    (project_card(project))
                }
            }
            @for project in projects {
                (project_dialog(&ProjectDetail::new(project)))
            }
        }
    };
    base_document(&meta, config, css, &[GALLERY_JS], content)
}

// ============================================================================
// Process
// ============================================================================

pub fn render_process(page: &ProcessPage, config: &SiteConfig, css: &str) -> Markup {
    let meta = PageMeta::resolve(Route::Process, &page.seo, config);
    let content = html! {
        (cms_header(page.heading(), page.intro.as_deref()))
        ol.process-steps {
            @for (i, step) in page.steps().iter().enumerate() {
                li.process-step {
                    span.step-number { (format!("{:02}", i + 1)) }
                    @if let Some(title) = &step.title {
                        h2 { (title) }
                    }
                    @if let Some(body) = &step.body {
                        p { (body) }
                    }
                }
            }
        }
        @for (i, section) in page.sections.iter().enumerate() {
            (process_section(section, i))
        }
    };
    base_document(&meta, config, css, &[], content)
}

fn process_section(section: &ProcessSection, index: usize) -> Markup {
    let id = match &section.id {
        Some(id) => dom_id("section", id),
        None => format!("section-{}", index + 1),
    };
    html! {
        section.process-section id=(id) {
            @if let Some(src) = &section.image.src {
                (image_tile(src, section.image.alt.as_deref().unwrap_or(""), "(min-width: 1024px) 50vw, 100vw"))
            }
            div.process-copy {
                @if let Some(title) = &section.title {
                    h2 { (title) }
                }
                @if let Some(body) = &section.body {
                    (markdown(body))
                }
                @if !section.highlights.is_empty() {
                    (highlight_list(&section.highlights))
                }
                @if !section.key_moves.is_empty() {
                    ul.key-moves {
                        @for step in &section.key_moves {
                            li { (step) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Art
// ============================================================================

pub fn render_art(page: &ArtPage, config: &SiteConfig, css: &str) -> Markup {
    let meta = PageMeta::resolve(Route::Art, &page.seo, config);
    let content = html! {
        (cms_header(page.heading(), page.intro.as_deref()))
        @if !page.pieces.is_empty() {
            ul.art-grid {
                @for piece in &page.pieces {
                    li.art-piece id=(dom_id("piece", &piece.id)) {
                        figure {
                            img src=(piece.src) alt=(piece.title) loading="lazy";
                            figcaption {
                                strong { (piece.title) }
                                @let details = piece.details();
                                @if !details.is_empty() {
                                    span.piece-details { (details) }
                                }
                                @if let Some(description) = &piece.description {
                                    span.piece-description { (description) }
                                }
                            }
                        }
                    }
                }
            }
        }
        @let gallery: Vec<_> = page.gallery_images().collect();
        @if !gallery.is_empty() {
            section.art-gallery {
                @for (src, alt) in gallery {
                    (image_tile(src, alt, "(min-width: 1024px) 33vw, 50vw"))
                }
            }
        }
    };
    base_document(&meta, config, css, &[], content)
}

// ============================================================================
// Contact
// ============================================================================

pub fn render_contact(page: &ContactPage, config: &SiteConfig, css: &str) -> Markup {
    let meta = PageMeta::resolve(Route::Contact, &page.seo, config);
    let site = &config.site;
    let details = vec![
        ("Phone".to_string(), site.telephone.clone()),
        ("Studio".to_string(), site.address.join(", ")),
        ("Hours".to_string(), site.hours.clone()),
    ];

    let content = html! {
        (cms_header(page.heading(), page.intro.as_deref()))
        div.contact-layout {
            form.contact-form method="post" action=[config.contact.form_action.as_deref()] {
                label for="contact-name" { "Name" }
                input id="contact-name" name="name" type="text" autocomplete="name" required;
                label for="contact-email" { "Email address" }
                input id="contact-email" name="email" type="email" autocomplete="email" required;
                label for="contact-message" { "Message " span.optional { "(optional)" } }
                textarea id="contact-message" name="message" rows="5" {}
                button.button.button-primary type="submit" { "Submit" }
            }
            aside.contact-details {
                (fact_cards(&details))
            }
        }
    };
    base_document(&meta, config, css, &[], content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Meta;
    use serde_json::json;

    fn project(id: &str, title: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            subtext: None,
            cover: format!("/images/{id}.jpg"),
            images: vec![],
            description: None,
            meta: Meta::new(),
        }
    }

    #[test]
    fn home_defaults_render_without_band() {
        let html = render_home(&HomePage::default(), &SiteConfig::default(), "").into_string();
        assert!(html.contains("Timeless spaces, lived-in warmth"));
        assert!(html.contains("Services at a glance"));
        assert!(!html.contains("parallax-band"));
        assert!(!html.contains("data-parallax-layer"));
    }

    #[test]
    fn home_band_uses_page_speed_override() {
        let page: HomePage = serde_json::from_value(json!({
            "parallax": {"image": "/images/band.jpg", "speed": 0.45}
        }))
        .unwrap();
        let html = render_home(&page, &SiteConfig::default(), "").into_string();
        assert!(html.contains(r#"data-parallax-speed="0.45""#));
        assert!(html.contains(r#"data-parallax-min-width="640""#));
    }

    #[test]
    fn home_band_falls_back_to_config_speed() {
        let page: HomePage = serde_json::from_value(json!({
            "parallax": {"image": "/images/band.jpg", "speed": -2}
        }))
        .unwrap();
        let html = render_home(&page, &SiteConfig::default(), "").into_string();
        assert!(html.contains(r#"data-parallax-speed="0.3""#));
    }

    #[test]
    fn portfolio_renders_one_dialog_per_project() {
        let projects = vec![project("a", "Alpha"), project("b", "Beta")];
        let html = render_portfolio(
            &PortfolioPage::default(),
            &projects,
            &SiteConfig::default(),
            "",
        )
        .into_string();
        assert_eq!(html.matches(r#"aria-modal="true""#).count(), 2);
        assert_eq!(html.matches(r#"class="project-card""#).count(), 2);
        assert!(html.contains(r#"id="project-a""#));
        assert!(html.contains(r#"aria-current="page""#));
    }

    #[test]
    fn empty_portfolio_shows_empty_state() {
        let html = render_portfolio(&PortfolioPage::default(), &[], &SiteConfig::default(), "")
            .into_string();
        assert!(html.contains("Projects are coming soon."));
        assert!(!html.contains(r#"aria-modal="true""#));
    }

    #[test]
    fn process_numbers_default_steps() {
        let html = render_process(&ProcessPage::default(), &SiteConfig::default(), "")
            .into_string();
        assert!(html.contains("01"));
        assert!(html.contains("Installation"));
        assert!(html.contains("04"));
    }

    #[test]
    fn process_sections_get_stable_ids() {
        let page: ProcessPage = serde_json::from_value(json!({
            "sections": [
                {"id": "site visit", "title": "Site visit", "body": "We *measure* everything."},
                {"title": "Handover"}
            ]
        }))
        .unwrap();
        let html = render_process(&page, &SiteConfig::default(), "").into_string();
        assert!(html.contains(r#"id="section-site-visit""#));
        assert!(html.contains(r#"id="section-2""#));
        assert!(html.contains("<em>measure</em>"));
    }

    #[test]
    fn art_renders_pieces_and_gallery() {
        let page: ArtPage = serde_json::from_value(json!({
            "pieces": [{"id": 1, "src": "/art/1.jpg", "title": "Tidal", "medium": "Oil", "year": "2023"}],
            "gallery": [{"src": "/art/g1.jpg", "alt": "Studio wall"}]
        }))
        .unwrap();
        let html = render_art(&page, &SiteConfig::default(), "").into_string();
        assert!(html.contains("Tidal"));
        assert!(html.contains("Oil · 2023"));
        assert!(html.contains(r#"alt="Studio wall""#));
    }

    #[test]
    fn contact_form_posts_to_configured_action() {
        let mut config = SiteConfig::default();
        config.contact.form_action = Some("https://forms.example/abc".to_string());
        let html = render_contact(&ContactPage::default(), &config, "").into_string();
        assert!(html.contains(r#"action="https://forms.example/abc""#));
        assert!(html.contains("Email address"));
        assert!(html.contains("Contact our team"));
    }

    #[test]
    fn contact_form_without_action_omits_attribute() {
        let html = render_contact(&ContactPage::default(), &SiteConfig::default(), "")
            .into_string();
        assert!(!html.contains("action="));
    }
}
