//! Item-count detection from a listing title.
//!
//! Patterns are tried in a fixed order: "set of N" first, then "N-pack" /
//! "N pack". Only the first match of the first matching pattern counts. A
//! title matching neither describes a single item.

use crate::error::{PersonalizeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static SET_OF_RE: OnceLock<Regex> = OnceLock::new();
static PACK_RE: OnceLock<Regex> = OnceLock::new();

fn set_of_re() -> &'static Regex {
    SET_OF_RE.get_or_init(|| Regex::new(r"(?i)\bset\s+of\s+([0-9]+)\b").unwrap())
}

fn pack_re() -> &'static Regex {
    PACK_RE.get_or_init(|| Regex::new(r"(?i)\b([0-9]+)(?:\s*-\s*|\s+)pack\b").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    SetOf,
    Pack,
    Default,
    Override,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetectionSource::SetOf => "set_of",
            DetectionSource::Pack => "pack",
            DetectionSource::Default => "default",
            DetectionSource::Override => "override",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub count: usize,
    pub source: DetectionSource,
}

/// Detect how many items a listing title describes. Always `>= 1`.
pub fn detect(title: &str) -> Detection {
    if let Some(count) = first_count(set_of_re(), title) {
        return Detection {
            count,
            source: DetectionSource::SetOf,
        };
    }
    if let Some(count) = first_count(pack_re(), title) {
        return Detection {
            count,
            source: DetectionSource::Pack,
        };
    }
    Detection {
        count: 1,
        source: DetectionSource::Default,
    }
}

pub fn detect_item_count(title: &str) -> usize {
    detect(title).count
}

/// Like [`detect`], but an explicit count (e.g. from structured listing data)
/// takes precedence over the title.
pub fn resolve(title: &str, explicit: Option<usize>) -> Result<Detection> {
    match explicit {
        Some(0) => Err(PersonalizeError::InvalidItemCount(0)),
        Some(count) => Ok(Detection {
            count,
            source: DetectionSource::Override,
        }),
        None => Ok(detect(title)),
    }
}

// A zero or overflowing number is not a usable count; the pattern is treated
// as unmatched so detection falls through to the next rule.
fn first_count(re: &Regex, title: &str) -> Option<usize> {
    let caps = re.captures(title)?;
    let n: usize = caps.get(1)?.as_str().parse().ok()?;
    (n >= 1).then_some(n)
}
