//! In-memory search, filter and sort engine for a historical image atlas.
//!
//! The crate holds a corpus of image records and derives a
//! filtered-and-ordered active subset from independently adjustable query
//! dimensions: free text, temporal range, spatial bounding box and collection
//! membership. A reactive [`Store`] owns the state, re-deriving the active
//! subset and per-collection facet counts after every action, and keeping the
//! selected record synchronized with the view.
//!
//! The root module re-exports the types an embedder needs so that collaborators
//! can drive the store without digging through the module hierarchy.

pub mod app_dirs;
pub mod corpus;
pub mod logging;
pub mod normalize;
pub mod search;
pub mod store;
pub mod types;

pub use corpus::CorpusError;
pub use search::{ALL_FACET, SearchParams, TextQuery, facet_counts, search};
pub use store::{Action, QueryState, Store, StoreConfig};
pub use types::{
    CollectionFilter, ImageRecord, MapBounds, SortField, ViewDensity, YearRange,
};
