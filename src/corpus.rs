//! Ingestion of remote index documents into canonical [`ImageRecord`]s.
//!
//! The document index serves loosely-shaped JSON: attribution fields arrive as
//! a bare string, a sequence of strings, or a `{value: …}` wrapper around
//! either; years arrive as numbers or strings. Everything is normalized here,
//! exactly once, so the rest of the crate never branches on shape again.
//!
//! Malformed records follow the same policy as the predicates: a record that
//! cannot be identified is skipped with a warning, never a hard failure. Only
//! an unreadable file or undecodable payload is reported as an error.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{ImageRecord, UNCLASSIFIED};

/// Errors surfaced while loading a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The payload was not valid JSON, or not a recognized document shape.
    #[error("failed to parse corpus documents: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scalar that the index serves either as a number or as free-form text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn to_text(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }

    /// Explicit optional year parsing. Non-numeric text is absent, not `0`.
    fn as_year(&self) -> Option<i32> {
        match self {
            Self::Int(value) => i32::try_from(*value).ok(),
            Self::Float(value) => {
                (value.fract() == 0.0).then_some(*value as i64).and_then(|v| i32::try_from(v).ok())
            }
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

/// Multi-shape text field: `"x"`, `["x", "y"]`, or `{"value": <either>}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TextValue {
    One(String),
    Many(Vec<String>),
    Wrapped { value: Option<Box<TextValue>> },
}

impl TextValue {
    /// Flatten into the canonical ordered sequence, dropping empty entries.
    fn into_values(self) -> Vec<String> {
        match self {
            Self::One(value) => {
                if value.is_empty() {
                    Vec::new()
                } else {
                    vec![value]
                }
            }
            Self::Many(values) => values.into_iter().filter(|v| !v.is_empty()).collect(),
            Self::Wrapped { value } => value.map(|inner| inner.into_values()).unwrap_or_default(),
        }
    }
}

/// One document as served by the index, before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    ssid: Option<Scalar>,
    title: Option<String>,
    creator: Option<String>,
    date: Option<Scalar>,
    firstyear: Option<Scalar>,
    lastyear: Option<Scalar>,
    collection: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    source: Option<TextValue>,
    depicts: Option<TextValue>,
}

/// The index exposes either a bare document array or a collection wrapper
/// (`[{"Documents": […]}]`). `Indexed` must be tried first: a wrapper entry
/// would otherwise decode as an all-absent document and be skipped silently.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorpusShape {
    Indexed(Vec<IndexEntry>),
    Documents(Vec<RawDocument>),
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    #[serde(rename = "Documents")]
    documents: Vec<RawDocument>,
}

/// Parse corpus documents from a JSON string.
///
/// # Errors
///
/// Returns [`CorpusError::Parse`] when the payload is not valid JSON or not a
/// recognized document shape.
pub fn from_json_str(json: &str) -> Result<Vec<ImageRecord>, CorpusError> {
    let shape: CorpusShape = serde_json::from_str(json)?;
    Ok(normalize_shape(shape))
}

/// Parse corpus documents from an already-decoded JSON value.
///
/// This is the entry point used by the `SET_CORPUS` wire action.
///
/// # Errors
///
/// Returns [`CorpusError::Parse`] when the value is not a recognized document
/// shape.
pub fn from_json_value(value: serde_json::Value) -> Result<Vec<ImageRecord>, CorpusError> {
    let shape: CorpusShape = serde_json::from_value(value)?;
    Ok(normalize_shape(shape))
}

/// Read and parse a corpus file.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] when the file cannot be read and
/// [`CorpusError::Parse`] when its contents cannot be decoded.
pub fn from_json_file(path: &Path) -> Result<Vec<ImageRecord>, CorpusError> {
    let json = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = from_json_str(&json)?;
    debug!(count = records.len(), path = %path.display(), "loaded corpus");
    Ok(records)
}

fn normalize_shape(shape: CorpusShape) -> Vec<ImageRecord> {
    let documents = match shape {
        CorpusShape::Indexed(entries) => entries.into_iter().flat_map(|e| e.documents).collect(),
        CorpusShape::Documents(documents) => documents,
    };
    documents
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| normalize_document(index, raw))
        .collect()
}

fn normalize_document(index: usize, raw: RawDocument) -> Option<ImageRecord> {
    let Some(ssid) = raw.ssid.map(|ssid| ssid.to_text()) else {
        warn!(index, "skipping document without an ssid");
        return None;
    };

    Some(ImageRecord {
        ssid,
        title: raw.title.filter(|t| !t.is_empty()),
        creator: raw.creator.filter(|c| !c.is_empty()),
        date: raw.date.map(|d| d.to_text()),
        firstyear: raw.firstyear.as_ref().and_then(Scalar::as_year),
        lastyear: raw.lastyear.as_ref().and_then(Scalar::as_year),
        collection: raw
            .collection
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNCLASSIFIED.to_string()),
        longitude: raw.longitude,
        latitude: raw.latitude,
        source: raw.source.map(TextValue::into_values).unwrap_or_default(),
        depicts: raw.depicts.map(TextValue::into_values).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_every_text_shape_to_one_sequence() {
        let records = from_json_value(json!([
            {"ssid": "1", "source": "Biblioteca Nacional"},
            {"ssid": "2", "source": ["Arquivo Geral", "Museu Histórico"]},
            {"ssid": "3", "depicts": {"value": "Morro do Castelo"}},
            {"ssid": "4", "depicts": {"value": ["Paço Imperial", "Largo do Carmo"]}},
        ]))
        .expect("parse");

        assert_eq!(records[0].source, vec!["Biblioteca Nacional"]);
        assert_eq!(records[1].source, vec!["Arquivo Geral", "Museu Histórico"]);
        assert_eq!(records[2].depicts, vec!["Morro do Castelo"]);
        assert_eq!(records[3].depicts, vec!["Paço Imperial", "Largo do Carmo"]);
    }

    #[test]
    fn years_parse_from_numbers_and_strings_only() {
        let records = from_json_value(json!([
            {"ssid": "1", "firstyear": 1860, "lastyear": "1870"},
            {"ssid": "2", "firstyear": "circa 1860"},
        ]))
        .expect("parse");

        assert_eq!(records[0].firstyear, Some(1860));
        assert_eq!(records[0].lastyear, Some(1870));
        assert_eq!(records[1].firstyear, None, "non-numeric year is absent, not zero");
    }

    #[test]
    fn numeric_dates_become_searchable_text() {
        let records = from_json_value(json!([
            {"ssid": "1", "date": 1910},
            {"ssid": "2", "date": "c. 1910"},
        ]))
        .expect("parse");

        assert_eq!(records[0].date.as_deref(), Some("1910"));
        assert_eq!(records[1].date.as_deref(), Some("c. 1910"));
    }

    #[test]
    fn documents_without_ssid_are_skipped() {
        let records = from_json_value(json!([
            {"title": "orphan"},
            {"ssid": 12345, "title": "kept"},
        ]))
        .expect("parse");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ssid, "12345", "numeric ssids are stringified");
    }

    #[test]
    fn missing_collection_defaults_to_unclassified() {
        let records = from_json_value(json!([
            {"ssid": "1"},
            {"ssid": "2", "collection": ""},
            {"ssid": "3", "collection": "maps"},
        ]))
        .expect("parse");

        assert_eq!(records[0].collection, UNCLASSIFIED);
        assert_eq!(records[1].collection, UNCLASSIFIED);
        assert_eq!(records[2].collection, "maps");
    }

    #[test]
    fn accepts_the_index_wrapper_shape() {
        let records = from_json_value(json!([
            {"Documents": [{"ssid": "1"}, {"ssid": "2"}]},
            {"Documents": [{"ssid": "3"}]},
        ]))
        .expect("parse");

        let ssids: Vec<&str> = records.iter().map(|r| r.ssid.as_str()).collect();
        assert_eq!(ssids, vec!["1", "2", "3"]);
    }

    #[test]
    fn reading_a_corpus_file_round_trips() {
        use std::io::Write as _;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"ssid": "1", "title": "Entrada da Barra", "collection": "views"}}]"#
        )
        .expect("write");

        let records = from_json_file(file.path()).expect("load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Entrada da Barra"));
    }

    #[test]
    fn unreadable_files_report_their_path() {
        let error = from_json_file(Path::new("/nonexistent/corpus.json")).unwrap_err();
        assert!(matches!(error, CorpusError::Io { .. }));
        assert!(error.to_string().contains("/nonexistent/corpus.json"));
    }
}
