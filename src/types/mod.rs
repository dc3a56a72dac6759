//! Types shared across the corpus, the search pipeline and the store.

mod bounds;
mod query;
mod record;

pub use bounds::MapBounds;
pub use query::{CollectionFilter, SortField, ViewDensity, YearRange};
pub use record::{ImageRecord, UNCLASSIFIED, VIEWPOINT_COLLECTION};
