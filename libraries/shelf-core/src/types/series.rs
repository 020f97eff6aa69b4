/// Series index domain type
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sentinel series key collecting books without a resolvable series
pub const STANDALONE_SERIES: &str = "Standalone Books";

/// Position of a book inside its series
///
/// Kept as the original text so fractional volumes ("2.5" for a novella
/// between books two and three) survive display and sorting unchanged.
/// Construction guarantees the text is a non-negative decimal: one or more
/// ASCII digits, optionally followed by `.` and one or more digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesIndex(String);

impl SeriesIndex {
    /// Validate and wrap index text
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if is_decimal(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(ShelfError::InvalidSeriesIndex(text.to_string()))
        }
    }

    /// Build an index from a disk-number atom value
    pub fn from_disk_number(disk: u32) -> Self {
        Self(disk.to_string())
    }

    /// Get the index text exactly as resolved
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value used for ordering
    pub fn value(&self) -> f64 {
        // Validated on construction; the fallback is unreachable in practice
        self.0.parse().unwrap_or(f64::INFINITY)
    }

    /// Integer disk number for the container, truncating any fraction
    ///
    /// The MP4 `disk` atom stores 16 bits, so values above `u16::MAX` return
    /// `None` rather than wrapping.
    pub fn disk_number(&self) -> Option<u16> {
        let value = self.value().trunc();
        if value.is_finite() && value >= 0.0 && value <= f64::from(u16::MAX) {
            Some(value as u16)
        } else {
            None
        }
    }

    /// Compare two optional indices: present values ascend, absent values sort last
    pub fn cmp_optional(a: Option<&Self>, b: Option<&Self>) -> Ordering {
        let a = a.map_or(f64::INFINITY, Self::value);
        let b = b.map_or(f64::INFINITY, Self::value);
        a.total_cmp(&b)
    }
}

fn is_decimal(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match fraction {
        Some(fraction) => digits(whole) && digits(fraction),
        None => digits(whole),
    }
}

impl fmt::Display for SeriesIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SeriesIndex {
    type Error = ShelfError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SeriesIndex> for String {
    fn from(index: SeriesIndex) -> Self {
        index.0
    }
}
