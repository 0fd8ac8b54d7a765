//! Content loading.
//!
//! All page copy and project data lives as JSON under the content root:
//!
//! ```text
//! content/
//! ├── home.json                # one document per page
//! ├── portfolio.json
//! ├── portfolio/               # a collection: one record per file
//! │   ├── 010-cottage.json
//! │   └── 020-loft.json
//! └── assets/                  # copied verbatim to the output root
//! ```
//!
//! Reads are strict at this level: a missing file is [`ContentError::NotFound`]
//! and invalid JSON is [`ContentError::Parse`]. Callers that render pages use
//! [`ContentStore::load_page`] and [`ContentStore::load_collection`], which
//! absorb both into default content and report a [`ContentWarning`] instead.
//!
//! A collection directory may also contain the page shell of its page (a
//! record with `"__is_page_shell": true`, written there by some CMS setups).
//! Shells are not members of the collection and are skipped.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker field of a page shell record.
pub const PAGE_SHELL_FLAG: &str = "__is_page_shell";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something about the content that was absorbed rather than failing the
/// build.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentWarning {
    /// A page document is absent; default copy was used.
    Missing { name: String },
    /// A page document is not valid JSON or not an object; default copy was
    /// used.
    Malformed { name: String, reason: String },
    /// A collection record could not be used.
    Skipped { path: PathBuf, reason: String },
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentWarning::Missing { name } => {
                write!(f, "{name}: not found, using default copy")
            }
            ContentWarning::Malformed { name, reason } => {
                write!(f, "{name}: {reason}, using default copy")
            }
            ContentWarning::Skipped { path, reason } => {
                write!(f, "{}: skipped ({reason})", path.display())
            }
        }
    }
}

/// A page document after defaults have been applied.
#[derive(Debug)]
pub struct PageLoad<T> {
    pub page: T,
    pub warning: Option<ContentWarning>,
}

/// Collection records usable for a build, plus what was left out.
#[derive(Debug, Default)]
pub struct CollectionLoad {
    pub records: Vec<(PathBuf, Value)>,
    pub warnings: Vec<ContentWarning>,
}

/// Read-only access to a content directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the document `name` (e.g. `"portfolio.json"`).
    pub fn read_document(&self, name: &str) -> Result<Value, ContentError> {
        read_json(&self.root.join(name))
    }

    /// Every record of the collection `name`, page shells excluded.
    ///
    /// Records come back in file name order. The order carries no meaning
    /// beyond making builds reproducible.
    pub fn read_collection(&self, name: &str) -> Result<Vec<Value>, ContentError> {
        Ok(self
            .read_collection_entries(name)?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    /// Like [`read_collection`](Self::read_collection), keeping each
    /// record's path.
    pub fn read_collection_entries(
        &self,
        name: &str,
    ) -> Result<Vec<(PathBuf, Value)>, ContentError> {
        let paths = self.collection_paths(name)?;
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let record = read_json(&path)?;
            if !is_page_shell(&record) {
                records.push((path, record));
            }
        }
        Ok(records)
    }

    /// Read the collection `name` for a build.
    ///
    /// Unlike [`read_collection_entries`](Self::read_collection_entries),
    /// a missing directory yields an empty collection and a file that is
    /// not valid JSON is skipped; both are reported as warnings.
    pub fn load_collection(&self, name: &str) -> Result<CollectionLoad, ContentError> {
        let mut load = CollectionLoad::default();
        let paths = match self.collection_paths(name) {
            Ok(paths) => paths,
            Err(ContentError::NotFound(_)) => {
                load.warnings.push(ContentWarning::Missing {
                    name: format!("{name}/"),
                });
                return Ok(load);
            }
            Err(e) => return Err(e),
        };

        for path in paths {
            match read_json(&path) {
                Ok(record) if is_page_shell(&record) => {}
                Ok(record) => load.records.push((path, record)),
                Err(ContentError::Parse { path, source }) => {
                    load.warnings.push(ContentWarning::Skipped {
                        path,
                        reason: source.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(load)
    }

    /// `*.json` files directly inside the collection directory, sorted.
    fn collection_paths(&self, name: &str) -> Result<Vec<PathBuf>, ContentError> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(ContentError::NotFound(dir));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Load and type the page document `name`, falling back to
    /// `T::default()` when it is missing or malformed.
    ///
    /// Only real IO failures (permissions, unreadable files) are errors.
    pub fn load_page<T>(&self, name: &str) -> Result<PageLoad<T>, ContentError>
    where
        T: DeserializeOwned + Default,
    {
        let fallback = |warning| PageLoad {
            page: T::default(),
            warning: Some(warning),
        };

        let value = match self.read_document(name) {
            Ok(value) => value,
            Err(ContentError::NotFound(_)) => {
                return Ok(fallback(ContentWarning::Missing {
                    name: name.to_string(),
                }));
            }
            Err(ContentError::Parse { source, .. }) => {
                return Ok(fallback(ContentWarning::Malformed {
                    name: name.to_string(),
                    reason: source.to_string(),
                }));
            }
            Err(e) => return Err(e),
        };

        if !value.is_object() {
            return Ok(fallback(ContentWarning::Malformed {
                name: name.to_string(),
                reason: "expected a JSON object".to_string(),
            }));
        }

        match serde_json::from_value(value) {
            Ok(page) => Ok(PageLoad {
                page,
                warning: None,
            }),
            Err(e) => Ok(fallback(ContentWarning::Malformed {
                name: name.to_string(),
                reason: e.to_string(),
            })),
        }
    }
}

fn read_json(path: &Path) -> Result<Value, ContentError> {
    // Bytes, not a String: invalid UTF-8 is malformed JSON, not an IO failure.
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ContentError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&bytes).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn is_page_shell(record: &Value) -> bool {
    record.get(PAGE_SHELL_FLAG).and_then(Value::as_bool) == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PortfolioPage;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        for (name, body) in files {
            let path = tmp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let store = ContentStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn read_document_parses_json() {
        let (_tmp, store) = store_with(&[("home.json", r#"{"hero": {"title": "Hi"}}"#)]);
        let doc = store.read_document("home.json").unwrap();
        assert_eq!(doc["hero"]["title"], "Hi");
    }

    #[test]
    fn read_document_missing_is_not_found() {
        let (_tmp, store) = store_with(&[]);
        let result = store.read_document("home.json");
        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[test]
    fn read_document_invalid_json_is_parse_error() {
        let (_tmp, store) = store_with(&[("home.json", "{ not json")]);
        let result = store.read_document("home.json");
        assert!(matches!(result, Err(ContentError::Parse { .. })));
    }

    #[test]
    fn collection_excludes_page_shell() {
        let (_tmp, store) = store_with(&[
            ("portfolio/010-a.json", r#"{"id": "a"}"#),
            ("portfolio/index.json", r#"{"__is_page_shell": true, "heading": "Work"}"#),
            ("portfolio/020-b.json", r#"{"id": "b", "__is_page_shell": false}"#),
        ]);
        let records = store.read_collection("portfolio").unwrap();
        let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn collection_ignores_non_json_files() {
        let (_tmp, store) = store_with(&[
            ("portfolio/a.json", r#"{"id": "a"}"#),
            ("portfolio/notes.txt", "draft"),
        ]);
        assert_eq!(store.read_collection("portfolio").unwrap().len(), 1);
    }

    #[test]
    fn collection_is_in_file_name_order() {
        let (_tmp, store) = store_with(&[
            ("portfolio/030-c.json", r#"{"id": "c"}"#),
            ("portfolio/010-a.json", r#"{"id": "a"}"#),
            ("portfolio/020-b.json", r#"{"id": "b"}"#),
        ]);
        let entries = store.read_collection_entries("portfolio").unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["010-a.json", "020-b.json", "030-c.json"]);
    }

    #[test]
    fn missing_collection_is_not_found() {
        let (_tmp, store) = store_with(&[]);
        assert!(matches!(
            store.read_collection("portfolio"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn load_collection_skips_invalid_files() {
        let (_tmp, store) = store_with(&[
            ("portfolio/010-a.json", r#"{"id": "a"}"#),
            ("portfolio/020-broken.json", "{ oops"),
            ("portfolio/030-c.json", r#"{"id": "c"}"#),
            ("portfolio/index.json", r#"{"__is_page_shell": true}"#),
        ]);
        let load = store.load_collection("portfolio").unwrap();
        assert_eq!(load.records.len(), 2);
        assert_eq!(load.warnings.len(), 1);
        assert!(matches!(
            &load.warnings[0],
            ContentWarning::Skipped { path, .. } if path.ends_with("020-broken.json")
        ));
    }

    #[test]
    fn load_collection_skips_non_utf8_records() {
        let (tmp, store) = store_with(&[("portfolio/010-a.json", r#"{"id": "a"}"#)]);
        fs::write(tmp.path().join("portfolio/020-b.json"), [0xff, 0xfe]).unwrap();

        let load = store.load_collection("portfolio").unwrap();
        assert_eq!(load.records.len(), 1);
        assert!(matches!(
            &load.warnings[..],
            [ContentWarning::Skipped { path, .. }] if path.ends_with("020-b.json")
        ));
    }

    #[test]
    fn load_collection_missing_dir_is_a_warning() {
        let (_tmp, store) = store_with(&[]);
        let load = store.load_collection("portfolio").unwrap();
        assert!(load.records.is_empty());
        assert_eq!(
            load.warnings,
            vec![ContentWarning::Missing {
                name: "portfolio/".to_string()
            }]
        );
    }

    #[test]
    fn load_page_missing_uses_defaults() {
        let (_tmp, store) = store_with(&[]);
        let load: PageLoad<PortfolioPage> = store.load_page("portfolio.json").unwrap();
        assert_eq!(load.page.heading(), "Portfolio");
        assert_eq!(
            load.warning,
            Some(ContentWarning::Missing {
                name: "portfolio.json".to_string()
            })
        );
    }

    #[test]
    fn load_page_non_object_is_malformed() {
        let (_tmp, store) = store_with(&[("portfolio.json", "[1, 2, 3]")]);
        let load: PageLoad<PortfolioPage> = store.load_page("portfolio.json").unwrap();
        assert_eq!(load.page.heading(), "Portfolio");
        assert!(matches!(load.warning, Some(ContentWarning::Malformed { .. })));
    }

    #[test]
    fn load_page_non_utf8_is_malformed() {
        let (tmp, store) = store_with(&[]);
        fs::write(tmp.path().join("portfolio.json"), [0xff, 0xfe, b'{', b'}']).unwrap();

        assert!(matches!(
            store.read_document("portfolio.json"),
            Err(ContentError::Parse { .. })
        ));
        let load: PageLoad<PortfolioPage> = store.load_page("portfolio.json").unwrap();
        assert_eq!(load.page.heading(), "Portfolio");
        assert!(matches!(load.warning, Some(ContentWarning::Malformed { .. })));
    }

    #[test]
    fn load_page_reads_fields() {
        let (_tmp, store) = store_with(&[(
            "portfolio.json",
            r#"{"heading": "Selected work", "intro": "Homes we love."}"#,
        )]);
        let load: PageLoad<PortfolioPage> = store.load_page("portfolio.json").unwrap();
        assert!(load.warning.is_none());
        assert_eq!(load.page.heading(), "Selected work");
        assert_eq!(load.page.intro.as_deref(), Some("Homes we love."));
    }

    #[test]
    fn warning_messages_name_the_document() {
        let warning = ContentWarning::Missing {
            name: "art.json".to_string(),
        };
        assert_eq!(warning.to_string(), "art.json: not found, using default copy");
    }
}
