//! Folder name parser.
//!
//! Derives a best-effort title, year and resolution from a folder name such
//! as `Ringu (1998) [720p]`. Missing parts come back as sentinels; parsing
//! never fails and never touches the disk.

use crate::models::record::{MovieRecord, Year, SENTINEL};
use std::path::PathBuf;

/// Year token bounded by non-digits.
const YEAR_PATTERN: &str = r"(?:^|\D)(19\d{2}|20\d{2})(?:\D|$)";

/// Title terminators for the first heuristic: ` (`, `.` or `[`.
const TITLE_SPLIT_PATTERN: &str = r" \(|\.|\[";

/// Bracketed resolution tag.
const RESOLUTION_PATTERN: &str = r"\[(.*?)\]";

/// Information derived from a folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub title: String,
    pub year: Year,
    pub resolution: String,
}

impl ParsedName {
    /// Build a fresh record for the folder at `path`.
    pub fn into_record(self, path: PathBuf) -> MovieRecord {
        MovieRecord::new(self.title, self.year, self.resolution, path)
    }

    /// Canonical `"{title} ({year})"` folder name, if the year is known.
    pub fn canonical_folder_name(&self) -> Option<String> {
        self.year
            .value()
            .map(|year| format!("{} ({})", self.title, year))
    }
}

/// Parse a folder name.
pub fn parse(folder_name: &str) -> ParsedName {
    let year_match = find_year(folder_name);

    let year = year_match
        .and_then(|(_, y)| y.parse::<u16>().ok())
        .map(Year::Known)
        .unwrap_or(Year::Unknown);

    let title = derive_title(folder_name, year_match.map(|(start, _)| start));
    let resolution = extract_resolution(folder_name).unwrap_or_else(|| SENTINEL.to_string());

    tracing::debug!(
        "Parsed '{}' -> title='{}', year={}, resolution={}",
        folder_name,
        title,
        year,
        resolution
    );

    ParsedName {
        title,
        year,
        resolution,
    }
}

/// Locate the first year token: byte offset of the digits and the digits.
fn find_year(name: &str) -> Option<(usize, &str)> {
    let re = regex::Regex::new(YEAR_PATTERN).ok()?;
    let digits = re.captures(name)?.get(1)?;
    Some((digits.start(), digits.as_str()))
}

fn extract_resolution(name: &str) -> Option<String> {
    let re = regex::Regex::new(RESOLUTION_PATTERN).ok()?;
    let tag = re.captures(name)?.get(1)?.as_str().trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

/// Pick the shorter of the two title candidates.
///
/// Candidate one stops at the first ` (`, `.` or `[`; candidate two stops at
/// the year. Empty candidates are ignored; if both are empty the trimmed
/// name is the title, or the raw name when trimming leaves nothing.
fn derive_title(name: &str, year_start: Option<usize>) -> String {
    let before_separator = match regex::Regex::new(TITLE_SPLIT_PATTERN) {
        Ok(re) => re.split(name).next().unwrap_or(name),
        Err(_) => name,
    }
    .trim();

    let before_year = year_start.map(|start| name[..start].trim());

    let mut candidates: Vec<&str> = std::iter::once(before_separator)
        .chain(before_year)
        .filter(|c| !c.is_empty())
        .collect();
    // Stable sort keeps the separator candidate first on ties.
    candidates.sort_by_key(|c| c.chars().count());

    let title = candidates.first().copied().unwrap_or_else(|| name.trim());
    if title.is_empty() {
        name.to_string()
    } else {
        title.to_string()
    }
}
