//! Page chrome: the HTML document, SEO metadata, header and footer.
//!
//! Every route renders through [`base_document`], so the `<head>` (title,
//! description, canonical link, Open Graph and Twitter cards, JSON-LD) is
//! resolved in one place from the page's `seo` block and the site config.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::json;

use crate::config::SiteConfig;
use crate::schema::Seo;
use crate::types::Route;

/// Resolved `<head>` metadata of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub route: Route,
    pub title: String,
    pub description: String,
    /// Absolute URL of the social preview image.
    pub image: String,
    /// Absolute canonical URL.
    pub canonical: String,
}

impl PageMeta {
    /// Page SEO overrides layered over the site defaults.
    ///
    /// Without an explicit title the home page uses the site's default
    /// title and other pages use `"{label} | {site name}"`.
    pub fn resolve(route: Route, seo: &Seo, config: &SiteConfig) -> Self {
        let title = match (&seo.title, route) {
            (Some(title), _) => title.clone(),
            (None, Route::Home) => config.site.default_title.clone(),
            (None, _) => format!("{} | {}", route.label(), config.site.name),
        };
        let description = seo
            .description
            .clone()
            .unwrap_or_else(|| config.site.default_description.clone());
        let image = seo.image.as_deref().unwrap_or(&config.site.og_image);

        Self {
            route,
            title,
            description,
            image: absolute(config, image),
            canonical: config.absolute_url(route.path()),
        }
    }
}

fn absolute(config: &SiteConfig, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        config.absolute_url(url)
    }
}

/// Schema.org `LocalBusiness` description of the studio.
pub fn structured_data(config: &SiteConfig) -> serde_json::Value {
    let site = &config.site;
    json!({
        "@context": "https://schema.org",
        "@type": "LocalBusiness",
        "name": site.name,
        "url": config.absolute_url("/"),
        "image": absolute(config, &site.og_image),
        "logo": absolute(config, &site.logo),
        "telephone": site.telephone,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": site.address.first().cloned().unwrap_or_default(),
            "addressLocality": site.locality,
            "addressRegion": site.region,
            "addressCountry": "ZA",
        },
        "openingHours": site.hours,
    })
}

/// JSON for a `<script>` body: `</` cannot close the element early.
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Renders the full HTML document around `content`.
///
/// `scripts` are inlined at the end of `<body>` in order.
pub fn base_document(
    meta: &PageMeta,
    config: &SiteConfig,
    css: &str,
    scripts: &[&str],
    content: Markup,
) -> Markup {
    let site = &config.site;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(meta.canonical);
                link rel="icon" href="/favicon.ico";
                meta property="og:type" content="website";
                meta property="og:site_name" content=(site.name);
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(meta.canonical);
                meta property="og:image" content=(meta.image);
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(meta.title);
                meta name="twitter:description" content=(meta.description);
                meta name="twitter:image" content=(meta.image);
                script type="application/ld+json" {
                    (PreEscaped(script_json(&structured_data(config))))
                }
                style { (PreEscaped(css)) }
            }
            body {
                (site_header(meta.route, config))
                main id="main" { (content) }
                (site_footer(config))
                @for script in scripts {
                    script { (PreEscaped(*script)) }
                }
            }
        }
    }
}

/// Logo, studio name and the primary navigation.
pub fn site_header(current: Route, config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" {
                img.brand-logo src=(config.site.logo) alt="" width="40" height="40";
                span.brand-name { (config.site.name) }
            }
            nav.site-nav aria-label="Primary" {
                (render_nav(current))
            }
        }
    }
}

/// Renders the navigation menu (inline on desktop, a checkbox-driven panel
/// on small screens).
pub fn render_nav(current: Route) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label="Menu" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-panel {
            label.nav-close for="nav-toggle" { "×" }
            ul {
                @for route in Route::ALL {
                    @let is_current = route == current;
                    li class=[is_current.then_some("current")] {
                        a href=(route.path()) aria-current=[is_current.then_some("page")] {
                            (route.label())
                        }
                    }
                }
            }
        }
    }
}

pub fn site_footer(config: &SiteConfig) -> Markup {
    let site = &config.site;
    html! {
        footer.site-footer {
            div.footer-grid {
                div.footer-brand {
                    img.brand-logo src=(site.logo) alt="" width="48" height="48";
                    p.brand-name { (site.name) }
                }
                nav.footer-nav aria-label="Footer" {
                    h2 { "Navigate" }
                    ul {
                        @for route in Route::ALL {
                            li { a href=(route.path()) { (route.label()) } }
                        }
                    }
                }
                div.footer-location {
                    h2 { "Location" }
                    address {
                        @for line in &site.address {
                            (line) br;
                        }
                        (site.hours) br;
                        a href={ "tel:" (tel_href(&site.telephone)) } { (site.telephone) }
                    }
                }
                div.footer-cta {
                    h2 { "Let’s chat" }
                    a.button.button-primary href=(Route::Contact.path()) { "Get in touch" }
                }
            }
            p.footer-copyright { "© " (site.name) }
        }
    }
}

/// `+27 72 390 9235` → `+27723909235`.
fn tel_href(telephone: &str) -> String {
    telephone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seo(title: Option<&str>, description: Option<&str>) -> Seo {
        Seo {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            image: None,
        }
    }

    #[test]
    fn home_without_seo_uses_site_defaults() {
        let config = SiteConfig::default();
        let meta = PageMeta::resolve(Route::Home, &Seo::default(), &config);
        assert_eq!(meta.title, config.site.default_title);
        assert_eq!(meta.description, config.site.default_description);
        assert_eq!(meta.canonical, "https://example.com/");
        assert_eq!(meta.image, "https://example.com/images/og.jpg");
    }

    #[test]
    fn other_pages_suffix_site_name() {
        let config = SiteConfig::default();
        let meta = PageMeta::resolve(Route::Process, &Seo::default(), &config);
        assert_eq!(meta.title, "Our process | Louise Decor & Design");
        assert_eq!(meta.canonical, "https://example.com/process");
    }

    #[test]
    fn page_seo_overrides_defaults() {
        let config = SiteConfig::default();
        let meta = PageMeta::resolve(
            Route::Art,
            &seo(Some("Paintings"), Some("Original works.")),
            &config,
        );
        assert_eq!(meta.title, "Paintings");
        assert_eq!(meta.description, "Original works.");
    }

    #[test]
    fn absolute_og_image_is_kept() {
        let config = SiteConfig::default();
        let page_seo = Seo {
            image: Some("https://cdn.example/og.png".to_string()),
            ..Seo::default()
        };
        let meta = PageMeta::resolve(Route::Home, &page_seo, &config);
        assert_eq!(meta.image, "https://cdn.example/og.png");
    }

    #[test]
    fn base_document_includes_doctype_and_head() {
        let config = SiteConfig::default();
        let meta = PageMeta::resolve(Route::Home, &Seo::default(), &config);
        let doc = base_document(&meta, &config, "body {}", &[], html! { p { "test" } })
            .into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<link rel="canonical" href="https://example.com/">"#));
        assert!(doc.contains(r#"property="og:title""#));
        assert!(doc.contains(r#"name="twitter:card" content="summary_large_image""#));
        assert!(doc.contains("application/ld+json"));
    }

    #[test]
    fn structured_data_describes_business() {
        let data = structured_data(&SiteConfig::default());
        assert_eq!(data["@type"], "LocalBusiness");
        assert_eq!(data["telephone"], "+27 72 390 9235");
        assert_eq!(data["address"]["streetAddress"], "62 Lower Main Rd");
    }

    #[test]
    fn structured_data_cannot_close_script() {
        let mut config = SiteConfig::default();
        config.site.name = "</script><b>".to_string();
        let meta = PageMeta::resolve(Route::Home, &Seo::default(), &config);
        let doc = base_document(&meta, &config, "", &[], html! {}).into_string();
        assert!(!doc.contains("</script><b>"));
    }

    #[test]
    fn nav_marks_current_route() {
        let html = render_nav(Route::Portfolio).into_string();
        assert!(html.contains(r#"<li class="current"><a href="/portfolio" aria-current="page">"#));
        assert_eq!(html.matches("aria-current").count(), 1);
    }

    #[test]
    fn nav_lists_every_route() {
        let html = render_nav(Route::Home).into_string();
        for route in Route::ALL {
            assert!(html.contains(route.label()));
        }
    }

    #[test]
    fn footer_has_location_and_phone_link() {
        let html = site_footer(&SiteConfig::default()).into_string();
        assert!(html.contains("Navigate"));
        assert!(html.contains("62 Lower Main Rd"));
        assert!(html.contains(r#"href="tel:+27723909235""#));
        assert!(html.contains("Let’s chat"));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut config = SiteConfig::default();
        config.site.name = "<script>alert('xss')</script>".to_string();
        let html = site_header(Route::Home, &config).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
