use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Inclusive year interval for the temporal filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    #[must_use]
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Standard interval-overlap test against a record's year span, inclusive
    /// at both ends. A single shared year counts as overlap.
    #[must_use]
    pub fn overlaps(&self, firstyear: i32, lastyear: i32) -> bool {
        firstyear <= self.end && lastyear >= self.start
    }
}

/// Collection dimension of the query: everything, or one tag exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionFilter {
    #[default]
    All,
    Only(String),
}

impl CollectionFilter {
    /// Interpret a wire/CLI tag, where `"all"` selects every collection.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == "all" {
            Self::All
        } else {
            Self::Only(tag.to_string())
        }
    }

    /// Return `true` when a record with `collection` passes this filter.
    #[must_use]
    pub fn admits(&self, collection: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(tag) => tag == collection,
        }
    }
}

/// Field the active subset can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Creator,
    Date,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "creator" => Ok(Self::Creator),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Creator => "creator",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Result layout requested by the presentation layer.
///
/// Carried through the store untouched; no filtering logic consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewDensity {
    #[default]
    Full,
    Compact,
    Grid,
}

impl FromStr for ViewDensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "grid" => Ok(Self::Grid),
            other => Err(format!("unknown view density '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_inclusive_at_both_ends() {
        let range = YearRange::new(1850, 1900);
        assert!(range.overlaps(1900, 1910), "shared start year overlaps");
        assert!(range.overlaps(1800, 1850), "shared end year overlaps");
        assert!(!range.overlaps(1901, 1910));
        assert!(!range.overlaps(1800, 1849));
    }

    #[test]
    fn all_tag_admits_everything() {
        assert_eq!(CollectionFilter::from_tag("all"), CollectionFilter::All);
        assert!(CollectionFilter::All.admits("maps"));

        let only_views = CollectionFilter::from_tag("views");
        assert!(only_views.admits("views"));
        assert!(!only_views.admits("maps"));
    }

    #[test]
    fn sort_field_round_trips_through_str() {
        for field in [SortField::Title, SortField::Creator, SortField::Date] {
            let parsed: SortField = field.to_string().parse().expect("parse");
            assert_eq!(parsed, field);
        }
        assert!("year".parse::<SortField>().is_err());
    }
}
