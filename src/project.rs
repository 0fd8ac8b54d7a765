//! Portfolio projects.
//!
//! One JSON file per project lives in `content/portfolio/`. A project has a
//! cover image for its card and an optional gallery for the detail dialog.
//!
//! ## Gallery
//!
//! The gallery is `images` when non-empty, otherwise just `cover`. The
//! detail view leads with `gallery[0]` and shows up to [`MAX_THUMBNAILS`]
//! thumbnails from positions 1 through 6. Anything past position 6 is not
//! rendered. The first image is *not* required to equal `cover`.
//!
//! ## Meta
//!
//! `meta` is a label → value mapping rendered as fact cards. CMS exports
//! store it as a list of `{key, value}` pairs instead of an object; both are
//! accepted and normalized into [`Meta`]. Anything else becomes an empty
//! mapping.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::path::PathBuf;

use crate::schema::{lenient, lenient_text};

/// Thumbnails shown under the lead image in the detail view.
pub const MAX_THUMBNAILS: usize = 6;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subtext: Option<String>,
    pub cover: String,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub meta: Meta,
}

impl Project {
    /// The ordered images of the detail view: `images`, or `[cover]`.
    pub fn gallery(&self) -> Vec<&str> {
        if self.images.is_empty() {
            vec![self.cover.as_str()]
        } else {
            self.images.iter().map(String::as_str).collect()
        }
    }

    /// `images[0]`, or `cover` when there are no images.
    pub fn lead_image(&self) -> &str {
        self.images.first().unwrap_or(&self.cover)
    }

    /// Gallery positions 1..=6.
    pub fn thumbnails(&self) -> Vec<&str> {
        self.gallery()
            .into_iter()
            .skip(1)
            .take(MAX_THUMBNAILS)
            .collect()
    }
}

/// Accept `"slug"` or `12` for identifiers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}

// ============================================================================
// Meta
// ============================================================================

/// Ordered label → value mapping with unique labels.
///
/// Inserting an existing label replaces its value but keeps its original
/// position, so a pair list folds the same way an object literal would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    entries: Vec<(String, String)>,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Normalize any JSON shape into a mapping.
    ///
    /// - object: entries in document order
    /// - array of `{key, value}`: last value wins per key
    /// - anything else: empty
    pub fn from_value(value: &Value) -> Self {
        let mut meta = Meta::new();
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    if let Some(v) = scalar_text(v) {
                        meta.insert(k.as_str(), v);
                    }
                }
            }
            Value::Array(pairs) => {
                for pair in pairs {
                    let Some(key) = pair.get("key").and_then(Value::as_str) else {
                        continue;
                    };
                    let value = pair.get("value").and_then(scalar_text).unwrap_or_default();
                    meta.insert(key, value);
                }
            }
            _ => {}
        }
        meta
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Meta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Meta::from_value(&value))
    }
}

impl Serialize for Meta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

// ============================================================================
// Collection loading
// ============================================================================

/// A collection record that could not become a [`Project`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub path: PathBuf,
    pub reason: String,
}

/// The id in the form used for DOM ids: ASCII alphanumerics are kept,
/// everything else becomes `-`.
pub fn id_slug(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Convert collection records into projects, skipping invalid ones.
///
/// Duplicate ids keep the first record; later ones are skipped so the id
/// stays a usable lookup key. Ids that differ but share an [`id_slug`]
/// (`"a b"` and `"a-b"`) count as duplicates, since each dialog needs a
/// unique element id.
pub fn projects_from_records(
    records: Vec<(PathBuf, Value)>,
) -> (Vec<Project>, Vec<SkippedRecord>) {
    let mut projects: Vec<Project> = Vec::new();
    let mut skipped = Vec::new();

    for (path, record) in records {
        match serde_json::from_value::<Project>(record) {
            Ok(project) if projects.iter().any(|p| p.id == project.id) => {
                skipped.push(SkippedRecord {
                    path,
                    reason: format!("duplicate id '{}'", project.id),
                });
            }
            Ok(project) => {
                let slug = id_slug(&project.id);
                let clash = projects
                    .iter()
                    .find(|p| id_slug(&p.id) == slug)
                    .map(|p| p.id.clone());
                match clash {
                    Some(first) => skipped.push(SkippedRecord {
                        path,
                        reason: format!(
                            "duplicate id '{}' (same element id as '{first}')",
                            project.id
                        ),
                    }),
                    None => projects.push(project),
                }
            }
            Err(e) => skipped.push(SkippedRecord {
                path,
                reason: e.to_string(),
            }),
        }
    }

    (projects, skipped)
}

/// Find a project by id.
pub fn find<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}
