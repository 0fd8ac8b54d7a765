//! HTML site generation.
//!
//! Loads the config and every content document, renders one HTML file per
//! [`Route`] and copies `assets/` verbatim to the output root.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home
//! ├── portfolio/index.html       # Project grid + one dialog per project
//! ├── process/index.html
//! ├── art/index.html
//! ├── contact/index.html
//! └── images/...                 # Everything under content/assets/
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/gallery.js`: Project dialog (portfolio only)
//! - `static/parallax.js`: Parallax band (home only, when it has a band)
//!
//! Missing page documents and unusable project records never fail the
//! build. They are rendered with default copy (or left out) and listed as
//! warnings in the [`BuildReport`].

use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{ContentError, ContentStore, ContentWarning, PageLoad};
use crate::pages;
use crate::project::{self, Project};
use crate::schema::{ArtPage, ContactPage, HomePage, PortfolioPage, ProcessPage};
use crate::types::Route;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Name of the project collection under the content root.
pub const PORTFOLIO_COLLECTION: &str = "portfolio";

/// Directory under the content root copied verbatim to the output root.
pub const ASSETS_DIR: &str = "assets";

/// Everything a build renders, fully defaulted.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub home: HomePage,
    pub portfolio: PortfolioPage,
    pub process: ProcessPage,
    pub art: ArtPage,
    pub contact: ContactPage,
    pub projects: Vec<Project>,
    pub warnings: Vec<ContentWarning>,
}

/// Load config and content from `source`.
pub fn load_site(source: &Path) -> Result<Site, GenerateError> {
    let config = config::load_config(source)?;
    let store = ContentStore::new(source);
    let mut warnings = Vec::new();

    let home = page(&store, Route::Home, &mut warnings)?;
    let portfolio = page(&store, Route::Portfolio, &mut warnings)?;
    let process = page(&store, Route::Process, &mut warnings)?;
    let art = page(&store, Route::Art, &mut warnings)?;
    let contact = page(&store, Route::Contact, &mut warnings)?;

    let collection = store.load_collection(PORTFOLIO_COLLECTION)?;
    warnings.extend(collection.warnings);
    let (projects, skipped) = project::projects_from_records(collection.records);
    warnings.extend(
        skipped
            .into_iter()
            .map(|s| ContentWarning::Skipped {
                path: s.path,
                reason: s.reason,
            }),
    );

    Ok(Site {
        config,
        home,
        portfolio,
        process,
        art,
        contact,
        projects,
        warnings,
    })
}

fn page<T>(
    store: &ContentStore,
    route: Route,
    warnings: &mut Vec<ContentWarning>,
) -> Result<T, ContentError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let PageLoad { page, warning } = store.load_page(route.document())?;
    warnings.extend(warning);
    Ok(page)
}

/// The full stylesheet: config colors followed by the base styles.
pub fn stylesheet(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    format!("{}\n\n{}", color_css, CSS_STATIC)
}

/// Render one route of the site.
pub fn render_route(site: &Site, route: Route, css: &str) -> Markup {
    let config = &site.config;
    match route {
        Route::Home => pages::render_home(&site.home, config, css),
        Route::Portfolio => {
            pages::render_portfolio(&site.portfolio, &site.projects, config, css)
        }
        Route::Process => pages::render_process(&site.process, config, css),
        Route::Art => pages::render_art(&site.art, config, css),
        Route::Contact => pages::render_contact(&site.contact, config, css),
    }
}

/// One written HTML file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub route: Route,
    /// Path relative to the output root.
    pub file: String,
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: Vec<GeneratedPage>,
    /// `(id, title)` of every project with a dialog, in grid order.
    pub projects: Vec<(String, String)>,
    /// Files copied from `assets/`.
    pub assets: usize,
    pub warnings: Vec<ContentWarning>,
}

/// Build the site from `source` into `output_dir`.
pub fn generate(source: &Path, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    let site = load_site(source)?;
    write_site(&site, source, output_dir)
}

/// Write an already loaded site.
pub fn write_site(
    site: &Site,
    source: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let css = stylesheet(&site.config);
    fs::create_dir_all(output_dir)?;

    let assets = copy_assets(&source.join(ASSETS_DIR), output_dir)?;

    let mut pages = Vec::with_capacity(Route::ALL.len());
    for route in Route::ALL {
        let path = output_dir.join(route.output_file());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, render_route(site, route, &css).into_string())?;
        pages.push(GeneratedPage {
            route,
            file: route.output_file().to_string(),
        });
    }

    Ok(BuildReport {
        pages,
        projects: site
            .projects
            .iter()
            .map(|p| (p.id.clone(), p.title.clone()))
            .collect(),
        assets,
        warnings: site.warnings.clone(),
    })
}

/// Copy every file under `src` to the same relative path under `dst`.
///
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel: PathBuf = match entry.path().strip_prefix(src) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_fixtures;
    use tempfile::TempDir;

    #[test]
    fn generate_writes_every_route() {
        let fixtures = setup_fixtures();
        let out = TempDir::new().unwrap();
        let report = generate(fixtures.path(), out.path()).unwrap();

        assert_eq!(report.pages.len(), 5);
        for route in Route::ALL {
            let html = fs::read_to_string(out.path().join(route.output_file())).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{}", route.output_file());
        }
    }

    #[test]
    fn portfolio_has_one_dialog_per_project() {
        let fixtures = setup_fixtures();
        let out = TempDir::new().unwrap();
        let report = generate(fixtures.path(), out.path()).unwrap();

        let html = fs::read_to_string(out.path().join("portfolio/index.html")).unwrap();
        assert_eq!(
            html.matches(r#"aria-modal="true""#).count(),
            report.projects.len()
        );
        assert!(html.contains("data-modal-close"));
        assert!(html.contains("pagehide"));
    }

    #[test]
    fn fixture_warnings_are_reported() {
        let fixtures = setup_fixtures();
        let site = load_site(fixtures.path()).unwrap();

        // art.json is absent and one portfolio record has no cover.
        assert!(site.warnings.contains(&ContentWarning::Missing {
            name: "art.json".to_string()
        }));
        assert!(
            site.warnings
                .iter()
                .any(|w| matches!(w, ContentWarning::Skipped { path, .. } if path.ends_with("090-draft.json")))
        );
    }

    #[test]
    fn page_shell_is_not_a_project() {
        let fixtures = setup_fixtures();
        let site = load_site(fixtures.path()).unwrap();
        assert!(site.projects.iter().all(|p| p.id != "portfolio-page"));
        assert!(!site.warnings.iter().any(|w| w.to_string().contains("index.json")));
    }

    #[test]
    fn assets_are_copied_to_output_root() {
        let fixtures = setup_fixtures();
        let out = TempDir::new().unwrap();
        let report = generate(fixtures.path(), out.path()).unwrap();

        assert!(report.assets > 0);
        assert!(out.path().join("favicon.ico").exists());
        assert!(out.path().join("images/og.jpg").exists());
    }

    #[test]
    fn empty_source_builds_default_site() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let report = generate(source.path(), out.path()).unwrap();

        assert!(report.projects.is_empty());
        assert_eq!(report.assets, 0);
        // Five page documents plus the portfolio collection.
        assert_eq!(report.warnings.len(), 6);
        let home = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(home.contains("Timeless spaces, lived-in warmth"));
    }

    #[test]
    fn invalid_config_fails_the_build() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("config.toml"), "[parallax]\nspeed = -1.0\n").unwrap();
        let out = TempDir::new().unwrap();
        let result = generate(source.path(), out.path());
        assert!(matches!(result, Err(GenerateError::Config(_))));
    }

    #[test]
    fn stylesheet_starts_with_config_colors() {
        let css = stylesheet(&SiteConfig::default());
        assert!(css.starts_with(":root {"));
        assert!(css.contains(".parallax-layer"));
    }
}
