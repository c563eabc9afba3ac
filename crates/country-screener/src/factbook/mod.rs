//! Raw country records and the extraction layer that turns them into typed
//! indicators.

pub mod extract;
pub(crate) mod lookup;
pub mod record;
pub mod source;

pub use extract::{ExtractedIndicators, GdpYears, IndicatorExtractor, IndicatorSnapshot};
pub use record::CountryRecord;
pub use source::{DirectorySource, InMemorySource, RecordSource, SourceError};
