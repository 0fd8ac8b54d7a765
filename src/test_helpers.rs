//! Shared test utilities.
//!
//! `fixtures/content/` is a small but complete content root: every page
//! document except `art.json`, a portfolio collection with a page shell, a
//! project with more than seven images, a project with `meta` as a
//! `{key, value}` list, and one record that is missing its cover.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = load_site(tmp.path()).unwrap();
//! let project = find_project(&site.projects, "obs-cottage");
//! assert_eq!(project.meta.get("Location"), Some("Observatory"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::project::Project;

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Find a project by id, panicking with the available ids if absent.
pub fn find_project<'a>(projects: &'a [Project], id: &str) -> &'a Project {
    projects.iter().find(|p| p.id == id).unwrap_or_else(|| {
        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        panic!("project '{id}' not found; have {ids:?}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::load_site;

    #[test]
    fn fixtures_load_expected_projects() {
        let tmp = setup_fixtures();
        let site = load_site(tmp.path()).unwrap();
        let ids: Vec<_> = site.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["obs-cottage", "harbour-loft", "12"]);
    }

    #[test]
    fn fixture_meta_list_is_normalized() {
        let tmp = setup_fixtures();
        let site = load_site(tmp.path()).unwrap();
        let loft = find_project(&site.projects, "harbour-loft");
        let keys: Vec<_> = loft.meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Location", "Scope", "Year"]);
        assert_eq!(loft.meta.get("Scope"), Some("Kitchen and living"));
    }

    #[test]
    fn fixture_numeric_id_is_stringified() {
        let tmp = setup_fixtures();
        let site = load_site(tmp.path()).unwrap();
        let project = find_project(&site.projects, "12");
        assert_eq!(project.gallery(), vec![project.cover.as_str()]);
        assert!(project.meta.is_empty());
    }
}
