//! Sidecar metadata files
//!
//! Audiobookshelf-style `metadata.json` next to the audio file. Every key is
//! optional and every value shape is tolerated: a string where a list was
//! expected, a number for the year, `null`, even nested objects. Shapes are
//! normalised to text when read so a hand-edited file never breaks a scan.

use crate::error::{MetadataError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Any JSON value, interpreted leniently as text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SidecarValue {
    /// String
    Text(String),
    /// Number, kept in its JSON spelling
    Number(serde_json::Number),
    /// Boolean
    Flag(bool),
    /// Array of values
    List(Vec<SidecarValue>),
    /// Anything else (`null`, objects)
    Other(serde_json::Value),
}

impl SidecarValue {
    /// Every non-empty scalar, flattening nested lists
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        let scalar = match self {
            SidecarValue::Text(text) => text.trim().to_string(),
            SidecarValue::Number(number) => number.to_string(),
            SidecarValue::Flag(flag) => flag.to_string(),
            SidecarValue::List(items) => {
                for item in items {
                    item.collect_texts(out);
                }
                return;
            }
            SidecarValue::Other(_) => return,
        };
        if !scalar.is_empty() {
            out.push(scalar);
        }
    }

    /// Plain text: lists joined with `", "`, unusable shapes empty
    pub fn to_text(&self) -> String {
        self.texts().join(", ")
    }

    /// First non-empty scalar
    pub fn first_text(&self) -> Option<String> {
        self.texts().into_iter().next()
    }
}

/// Normalise an optional value to text; absent values become `""`
pub fn normalize(value: Option<&SidecarValue>) -> String {
    value.map(SidecarValue::to_text).unwrap_or_default()
}

/// Parsed sidecar file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sidecar {
    /// Book title
    #[serde(default)]
    pub title: Option<SidecarValue>,

    /// Author list
    #[serde(default)]
    pub authors: Option<SidecarValue>,

    /// Series list; the first entry is the raw series string
    #[serde(default)]
    pub series: Option<SidecarValue>,

    /// Narrator list
    #[serde(default)]
    pub narrators: Option<SidecarValue>,

    /// Publication year
    #[serde(default)]
    pub published_year: Option<SidecarValue>,

    /// Publication year as Audiobookshelf spells it
    #[serde(default, rename = "publishedYear")]
    pub published_year_camel: Option<SidecarValue>,

    /// Publication year as metadata editors write it
    #[serde(default)]
    pub year: Option<SidecarValue>,

    /// ISBN
    #[serde(default)]
    pub isbn: Option<SidecarValue>,

    /// Audible ASIN
    #[serde(default)]
    pub asin: Option<SidecarValue>,

    /// Description
    #[serde(default)]
    pub description: Option<SidecarValue>,
}

impl Sidecar {
    /// Parse sidecar JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MetadataError::SidecarParse(e.to_string()))
    }

    /// Read and parse a sidecar file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Title text, if non-empty
    pub fn title(&self) -> Option<String> {
        non_empty(normalize(self.title.as_ref()))
    }

    /// Author names in file order
    pub fn authors(&self) -> Vec<String> {
        self.authors.as_ref().map(SidecarValue::texts).unwrap_or_default()
    }

    /// Raw series string (first entry)
    pub fn series(&self) -> Option<String> {
        self.series.as_ref().and_then(SidecarValue::first_text)
    }

    /// Narrators joined with `", "`
    pub fn narrators(&self) -> Option<String> {
        non_empty(normalize(self.narrators.as_ref()))
    }

    /// Year from whichever year key is filled first
    pub fn year(&self) -> Option<String> {
        [&self.published_year, &self.published_year_camel, &self.year]
            .into_iter()
            .find_map(|value| non_empty(normalize(value.as_ref())))
    }

    /// ISBN text
    pub fn isbn(&self) -> Option<String> {
        non_empty(normalize(self.isbn.as_ref()))
    }

    /// ASIN text
    pub fn asin(&self) -> Option<String> {
        non_empty(normalize(self.asin.as_ref()))
    }

    /// Description text
    pub fn description(&self) -> Option<String> {
        non_empty(normalize(self.description.as_ref()))
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Find the sidecar for files in `dir`
///
/// `names` are tried in order; the first file that exists and parses wins.
/// Unreadable or malformed files are skipped, never fatal.
pub fn load_sidecar(dir: &Path, names: &[String]) -> Option<Sidecar> {
    for name in names {
        let candidate = dir.join(name);
        if !candidate.is_file() {
            continue;
        }

        match Sidecar::from_path(&candidate) {
            Ok(sidecar) => {
                debug!("Loaded sidecar {:?}", candidate);
                return Some(sidecar);
            }
            Err(e) => {
                warn!("Ignoring unreadable sidecar {:?}: {}", candidate, e);
            }
        }
    }

    None
}
