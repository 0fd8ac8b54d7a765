//! # Studio Site
//!
//! A static site generator for the marketing site of an interior design
//! studio. Page copy and projects are JSON documents edited by hand or by a
//! CMS; the generator turns them into five plain HTML pages (home,
//! portfolio, process, art, contact) with inlined CSS and a few lines of
//! vanilla JavaScript.
//!
//! # Architecture
//!
//! ```text
//! content/ ──▶ content + schema + project ──▶ pages (components, layout) ──▶ dist/
//!   config.toml ──▶ config ──────────────────────────┘
//! ```
//!
//! The two interactive behaviors of the site, the portfolio gallery dialog
//! and the parallax band, are specified in Rust as state machines over a
//! [`host::DocumentHost`]. The embedded scripts implement the same
//! contracts in the browser; [`host::HeadlessDocument`] runs the Rust models
//! deterministically in tests and in `studio-site check`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Reads page documents and collections from the content root |
//! | [`schema`] | Typed, default-valued page content with lenient field parsing |
//! | [`project`] | Projects, ordered `meta` facts, gallery derivation |
//! | [`host`] | The document abstraction and its headless implementation |
//! | [`gallery`] | Project dialog state machine, scroll lock, detail view model |
//! | [`parallax`] | Parallax offset and the scroll-driven effect lifecycle |
//! | [`components`] | Stateless maud renderers (hero, cards, dialog, band) |
//! | [`layout`] | Document head (SEO, JSON-LD), header and footer |
//! | [`pages`] | One composition per route |
//! | [`generate`] | Loads the site, writes every route, copies assets |
//! | [`check`] | Validates content and exercises the interactive models |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | The fixed [`types::Route`] list |
//! | [`output`] | CLI output formatting for build and check reports |
//!
//! # Design Decisions
//!
//! ## Content Never Breaks the Build
//!
//! A missing document renders house copy, a field of the wrong shape reads
//! as absent, and a project record without a title or cover is left out of
//! the grid. Each of these is reported as a warning. Only an invalid
//! `config.toml` or an unreadable file fails a build.
//!
//! ## Resources Are Owned, Not Reset
//!
//! The scroll lock and the Escape listener of an open dialog, and the
//! scroll/resize listeners and pending frame of a parallax band, are values
//! owned by the component that acquired them. Dropping the owner releases
//! them, so every exit path (close button, backdrop, Escape, unmount)
//! releases exactly once.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, interpolation is escaped by default, and there is no
//! template directory to ship.

pub mod check;
pub mod components;
pub mod config;
pub mod content;
pub mod gallery;
pub mod generate;
pub mod host;
pub mod layout;
pub mod output;
pub mod pages;
pub mod parallax;
pub mod project;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
