//! CLI output formatting for `build` and `check`.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each page is shown
//! by its navigation label with the written file as secondary context, and
//! each project by its title with its id and gallery size on an indented
//! line. Warnings are collected during loading and printed together at the
//! end rather than interleaved with progress.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Homepage → index.html
//! 002 Portfolio → portfolio/index.html
//! 003 Our process → process/index.html
//!
//! Projects
//! 001 Observatory Cottage
//!     Id: obs-cottage
//!
//! Assets
//!     12 files copied
//!
//! Warnings
//!     art.json: not found, using default copy
//!
//! Generated 5 pages, 1 project
//! ```
//!
//! ## Check
//!
//! ```text
//! Projects
//! 001 Observatory Cottage (9 images)
//!     Id: obs-cottage
//!     Dialog: lead image, 6 thumbnails, 4 facts
//!
//! Parallax
//!     Speed: 0.3
//!     Max offset: 240px at 800px viewport height
//!     Narrow viewports: static
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::check::CheckReport;
use crate::content::ContentWarning;
use crate::generate::BuildReport;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 project`, `2 projects`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn warning_lines(warnings: &[ContentWarning], lines: &mut Vec<String>) {
    if warnings.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Warnings".to_string());
    for warning in warnings {
        lines.push(format!("{}{}", indent(1), warning));
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.route.label(),
            page.file
        ));
    }

    if !report.projects.is_empty() {
        lines.push(String::new());
        lines.push("Projects".to_string());
        for (i, (id, title)) in report.projects.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), title));
            lines.push(format!("{}Id: {}", indent(1), id));
        }
    }

    if report.assets > 0 {
        lines.push(String::new());
        lines.push("Assets".to_string());
        lines.push(format!("{}{} copied", indent(1), plural(report.assets, "file")));
    }

    warning_lines(&report.warnings, &mut lines);

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.projects.len(), "project")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Projects".to_string());
    if report.projects.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, project) in report.projects.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            project.title,
            plural(project.images, "image")
        ));
        lines.push(format!("{}Id: {}", indent(1), project.id));
        lines.push(format!(
            "{}Dialog: lead image, {}, {}",
            indent(1),
            plural(project.thumbnails, "thumbnail"),
            plural(project.facts, "fact")
        ));
    }

    if let Some(parallax) = &report.parallax {
        lines.push(String::new());
        lines.push("Parallax".to_string());
        lines.push(format!("{}Speed: {}", indent(1), parallax.speed));
        lines.push(format!(
            "{}Max offset: {:.0}px at {}px viewport height",
            indent(1),
            parallax.max_offset,
            parallax.viewport_height
        ));
        let narrow = if parallax.static_on_narrow {
            "static"
        } else {
            "animated"
        };
        lines.push(format!("{}Narrow viewports: {}", indent(1), narrow));
    }

    warning_lines(&report.warnings, &mut lines);

    if !report.problems.is_empty() {
        lines.push(String::new());
        lines.push("Problems".to_string());
        for problem in &report.problems {
            lines.push(format!("{}{}", indent(1), problem));
        }
    }
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
