//! Content validation without writing a site.
//!
//! Loads everything a build would, then drives the interactive layer
//! against a [`HeadlessDocument`]: every project is opened in a
//! [`GalleryModal`], switched to from its neighbour and closed with Escape,
//! and the home page parallax band (if any) is scrolled through and
//! stopped. Any resource left behind (a scroll lock, a listener, a pending
//! frame) is reported as a problem.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use crate::content::ContentWarning;
use crate::gallery::{CloseTrigger, GalleryModal, ProjectDetail, Transition};
use crate::generate::{self, GenerateError, Site};
use crate::host::{DocumentHost, HeadlessDocument, ScrollPolicy, Viewport};
use crate::parallax::{self, ParallaxEffect, ParallaxMode, ParallaxSettings};

/// Summary of one project as the detail dialog shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCheck {
    pub id: String,
    pub title: String,
    pub images: usize,
    pub thumbnails: usize,
    pub facts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxCheck {
    pub speed: f64,
    /// Height of the reference desktop viewport.
    pub viewport_height: f64,
    /// Largest offset seen while scrolling past the band, in pixels.
    pub max_offset: f64,
    /// Whether a phone-sized viewport degrades to a static background.
    pub static_on_narrow: bool,
}

#[derive(Debug)]
pub struct CheckReport {
    pub projects: Vec<ProjectCheck>,
    pub parallax: Option<ParallaxCheck>,
    pub warnings: Vec<ContentWarning>,
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate the content directory at `source`.
pub fn check(source: &Path) -> Result<CheckReport, GenerateError> {
    let site = generate::load_site(source)?;
    Ok(check_site(&site))
}

pub fn check_site(site: &Site) -> CheckReport {
    let mut problems = Vec::new();
    let projects = site
        .projects
        .iter()
        .map(|project| {
            let detail = ProjectDetail::new(project);
            ProjectCheck {
                id: project.id.clone(),
                title: project.title.clone(),
                images: project.gallery().len(),
                thumbnails: detail.thumbnails.len(),
                facts: detail.facts.len(),
            }
        })
        .collect();

    exercise_gallery(site, &mut problems);
    let parallax = site.home.parallax.image.as_ref().map(|_| {
        let settings = site.config.parallax.settings(site.home.parallax.speed);
        exercise_parallax(settings, &mut problems)
    });

    CheckReport {
        projects,
        parallax,
        warnings: site.warnings.clone(),
        problems,
    }
}

fn exercise_gallery(site: &Site, problems: &mut Vec<String>) {
    let doc = Rc::new(HeadlessDocument::desktop());
    let modal = GalleryModal::new(Rc::clone(&doc));
    let closed_early = Rc::new(Cell::new(false));
    {
        let closed_early = Rc::clone(&closed_early);
        modal.observe(move |t| {
            if matches!(t, Transition::Closed { .. }) {
                closed_early.set(true);
            }
        });
    }

    // Walk every project in one open session, as a visitor switching
    // between dialogs would.
    for project in &site.projects {
        if !modal.select_by_id(&site.projects, &project.id) {
            problems.push(format!("project '{}': cannot be opened by id", project.id));
            continue;
        }
        if doc.scroll_policy() != ScrollPolicy::Locked {
            problems.push(format!("project '{}': scroll not locked", project.id));
        }
        if doc.total_listeners() != 1 {
            problems.push(format!(
                "project '{}': expected one key listener, found {}",
                project.id,
                doc.total_listeners()
            ));
        }
    }
    if closed_early.get() {
        problems.push("gallery: switching projects closed the dialog".to_string());
    }

    if modal.is_open() {
        doc.press_key("Escape");
        if modal.is_open() {
            problems.push("gallery: Escape did not close the dialog".to_string());
        }
    }
    modal.close(CloseTrigger::CloseButton);
    drop(modal);

    if doc.scroll_policy() != ScrollPolicy::Auto || doc.total_listeners() != 0 {
        problems.push("gallery: resources held after close".to_string());
    }
}

fn exercise_parallax(settings: ParallaxSettings, problems: &mut Vec<String>) -> ParallaxCheck {
    let doc = Rc::new(HeadlessDocument::desktop());
    let viewport = doc.viewport();
    let band = doc.add_element(viewport.height * 1.5);
    let effect = ParallaxEffect::start(Rc::clone(&doc), band, settings);

    let bound = parallax::overhang(viewport.height, settings.speed);
    let mut max_offset: f64 = 0.0;
    let mut y = 0.0;
    while y <= viewport.height * 4.0 {
        doc.scroll_to(y);
        doc.run_frames();
        max_offset = max_offset.max(effect.offset().abs());
        y += viewport.height / 4.0;
    }
    if max_offset > bound {
        problems.push(format!(
            "parallax: offset {max_offset:.1}px exceeds the {bound}px overhang"
        ));
    }

    effect.stop();
    if doc.total_listeners() != 0 || doc.pending_frames() != 0 {
        problems.push("parallax: listeners or frames left after stop".to_string());
    }

    let phone = Rc::new(HeadlessDocument::new(Viewport {
        width: 375.0,
        height: 812.0,
    }));
    let node = phone.add_element(900.0);
    let narrow = ParallaxEffect::start(Rc::clone(&phone), node, settings);
    let static_on_narrow = narrow.mode() == ParallaxMode::Static && phone.total_listeners() == 0;

    ParallaxCheck {
        speed: settings.speed,
        viewport_height: viewport.height,
        max_offset,
        static_on_narrow,
    }
}
