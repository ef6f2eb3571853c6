pub mod dataset;
pub mod error;
pub mod merge;
pub mod paths;
pub mod record;

pub use dataset::Dataset;
pub use error::MergeError;
pub use merge::{merge, merge_into_file, MergeOutcome, MergeReport};
pub use paths::{canonical_path, canonical_path_for};
pub use record::{Record, RecordError};
