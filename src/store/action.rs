//! The closed action vocabulary and its wire-message decoder.

use serde_json::Value;

use crate::corpus;
use crate::types::{
    CollectionFilter, ImageRecord, MapBounds, SortField, ViewDensity, YearRange,
};

/// A single state transition of the store.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the full corpus; clears the selection.
    SetCorpus(Vec<ImageRecord>),
    /// Replace the free-text query.
    SetQuery(String),
    /// Replace the temporal range.
    SetDates(YearRange),
    /// Move the year display cursor without touching the range.
    SetYear(i32),
    /// Replace the sort field.
    SetSort(Option<SortField>),
    /// Flip between ascending and descending.
    ToggleDirection,
    /// Replace the collection filter.
    SetCollection(CollectionFilter),
    /// Replace or clear the spatial filter.
    SetBounds(Option<MapBounds>),
    /// Replace or clear the selection, by corpus index.
    SetSelected(Option<usize>),
    /// Replace the requested result layout.
    SetDensity(ViewDensity),
}

impl Action {
    /// Rule A dependency set: does this action invalidate the active subset
    /// (and with it the facet counts)?
    #[must_use]
    pub fn recomputes_active(&self) -> bool {
        matches!(
            self,
            Self::SetCorpus(_)
                | Self::SetQuery(_)
                | Self::SetDates(_)
                | Self::SetSort(_)
                | Self::ToggleDirection
                | Self::SetCollection(_)
                | Self::SetBounds(_)
        )
    }

    /// Rule B dependency set: does this action change the selection?
    #[must_use]
    pub fn syncs_selection(&self) -> bool {
        matches!(self, Self::SetSelected(_))
    }

    /// Decode a collaborator `(kind, payload)` message.
    ///
    /// Unknown kinds and payloads that do not fit the kind's shape yield
    /// `None`; the caller treats both as a no-op, so the vocabulary can grow
    /// without breaking older peers.
    #[must_use]
    pub fn parse(kind: &str, payload: &Value) -> Option<Self> {
        match kind {
            "SET_CORPUS" => {
                let records = corpus::from_json_value(payload.clone()).ok()?;
                Some(Self::SetCorpus(records))
            }
            "SET_QUERY" => Some(Self::SetQuery(payload.as_str()?.to_string())),
            "SET_TEMPORAL_RANGE" => {
                let [start, end]: [i32; 2] = serde_json::from_value(payload.clone()).ok()?;
                Some(Self::SetDates(YearRange::new(start, end)))
            }
            "SET_YEAR_CURSOR" => {
                let year = i32::try_from(payload.as_i64()?).ok()?;
                Some(Self::SetYear(year))
            }
            "SET_SORT_FIELD" => {
                if payload.is_null() {
                    return Some(Self::SetSort(None));
                }
                let field: SortField = payload.as_str()?.parse().ok()?;
                Some(Self::SetSort(Some(field)))
            }
            "TOGGLE_SORT_DIRECTION" => Some(Self::ToggleDirection),
            "SET_COLLECTION_FILTER" => {
                Some(Self::SetCollection(CollectionFilter::from_tag(
                    payload.as_str()?,
                )))
            }
            "SET_BOUNDING_BOX" => {
                if payload.is_null() {
                    return Some(Self::SetBounds(None));
                }
                let corners: [[f64; 2]; 2] = serde_json::from_value(payload.clone()).ok()?;
                Some(Self::SetBounds(Some(MapBounds::from_corners(corners))))
            }
            "SET_SELECTED_RECORD" => {
                if payload.is_null() {
                    return Some(Self::SetSelected(None));
                }
                let index = usize::try_from(payload.as_u64()?).ok()?;
                Some(Self::SetSelected(Some(index)))
            }
            "SET_VIEW_DENSITY" => {
                let density: ViewDensity = payload.as_str()?.parse().ok()?;
                Some(Self::SetDensity(density))
            }
            _ => None,
        }
    }
}
