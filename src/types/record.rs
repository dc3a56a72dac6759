use serde::Serialize;

/// Collection tag assigned at ingestion to records the index left untagged.
///
/// Giving every record exactly one tag keeps the facet counts exhaustive: the
/// per-collection counts always sum to the "all" entry.
pub const UNCLASSIFIED: &str = "unclassified";

/// Collection whose records carry a camera position the map can render.
pub const VIEWPOINT_COLLECTION: &str = "views";

/// A single item in the image corpus, canonical after ingestion.
///
/// The remote index serves loosely-shaped documents (fields that may be a bare
/// string, a sequence, or a `{value: …}` wrapper; years as numbers or strings).
/// Ingestion in [`crate::corpus`] flattens all of that exactly once, so the
/// search pipeline only ever sees this one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    /// Stable identifier, unique within the corpus.
    pub ssid: String,
    pub title: Option<String>,
    pub creator: Option<String>,
    /// Display date as served by the index; searchable as raw text.
    pub date: Option<String>,
    /// First year the record is considered active. `None` means the record is
    /// never temporally matched; there is no `0` fallback.
    pub firstyear: Option<i32>,
    /// Last year the record is considered active; may equal `firstyear`.
    pub lastyear: Option<i32>,
    /// Collection tag; [`UNCLASSIFIED`] when the index supplied none.
    pub collection: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Attribution lines, flattened to an ordered sequence; empty means absent.
    pub source: Vec<String>,
    /// Depicted subjects, flattened to an ordered sequence; empty means absent.
    pub depicts: Vec<String>,
}

impl ImageRecord {
    /// Build a record with the given identifier and no other metadata.
    #[must_use]
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            title: None,
            creator: None,
            date: None,
            firstyear: None,
            lastyear: None,
            collection: UNCLASSIFIED.to_string(),
            longitude: None,
            latitude: None,
            source: Vec::new(),
            depicts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set both year bounds at once; use [`with_years`](Self::with_years) with
    /// equal values for a single-year record.
    #[must_use]
    pub fn with_years(mut self, firstyear: i32, lastyear: i32) -> Self {
        self.firstyear = Some(firstyear);
        self.lastyear = Some(lastyear);
        self
    }

    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = Some(longitude);
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn with_source<I, S>(mut self, source: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = source.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_depicts<I, S>(mut self, depicts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depicts = depicts.into_iter().map(Into::into).collect();
        self
    }

    /// Return `true` when both coordinates are present.
    #[must_use]
    pub fn has_location(&self) -> bool {
        self.longitude.is_some() && self.latitude.is_some()
    }
}
