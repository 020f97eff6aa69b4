//! Series string parsing
//!
//! Grouping tags and sidecar series entries arrive as one loose string such
//! as `"The Expanse #4.5"`. The trailing `#<number>` is split off when present;
//! otherwise the whole string is the series name and the first digit run of
//! the filename stands in for the index.

use regex::Regex;
use shelf_core::SeriesIndex;
use std::sync::LazyLock;

// Non-greedy name so "Vol #1 #2" keeps "Vol #1" as the name
static SERIES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s*#(?P<index>[0-9]+(?:\.[0-9]+)?)$")
        .expect("series pattern is valid")
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// Result of parsing one series string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesParse {
    /// Series name
    pub name: String,

    /// Position inside the series, if any source supplied one
    pub index: Option<SeriesIndex>,

    /// The index came from the filename hint
    pub used_fallback: bool,
}

impl SeriesParse {
    /// Check if the index came from the `#<number>` suffix
    pub fn has_explicit_index(&self) -> bool {
        self.index.is_some() && !self.used_fallback
    }
}

/// Split a raw series string into name and index
///
/// Callers skip this for empty strings; an empty series means "no series".
/// The fallback index drops leading zeros so `"Saga - 03"` yields `"3"`.
/// `filename_hint` is the file stem without its extension; a full name like
/// `"Saga.m4b"` would let the `4` of the extension pass for an index.
pub fn parse_series(raw: &str, filename_hint: &str) -> SeriesParse {
    if let Some(parsed) = parse_suffix(raw) {
        return parsed;
    }

    let index = DIGIT_RUN
        .find(filename_hint)
        .map(|run| strip_leading_zeros(run.as_str()))
        .and_then(|digits| SeriesIndex::parse(digits).ok());

    SeriesParse {
        name: raw.to_string(),
        used_fallback: index.is_some(),
        index,
    }
}

fn parse_suffix(raw: &str) -> Option<SeriesParse> {
    let captures = SERIES_PATTERN.captures(raw.trim_end())?;
    let name = captures.name("name")?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    let index = SeriesIndex::parse(captures.name("index")?.as_str()).ok()?;

    Some(SeriesParse {
        name: name.to_string(),
        index: Some(index),
        used_fallback: false,
    })
}

fn strip_leading_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}
