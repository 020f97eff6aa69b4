//! Domain types for resolved audiobook metadata

mod policy;
mod provenance;
mod record;
mod series;
mod sync;

pub use policy::{AuthorPolicy, GroupingStyle};
pub use provenance::{MetadataOrigin, Provenance};
pub use record::{CanonicalRecord, ExtendedFields, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use series::{SeriesIndex, STANDALONE_SERIES};
pub use sync::{SyncOutcome, SyncRequest, SyncStatus};
