use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::error::MergeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub existing_count: usize,
    pub backup_count: usize,
    pub added_count: usize,
    pub total_count: usize,
    pub followed_count: usize,
}

/// Result of merging a backup file into the canonical dataset on disk.
#[derive(Debug, Clone, Serialize)]
pub struct MergeOutcome {
    pub data_file: PathBuf,
    /// False when the canonical file did not exist before this run.
    pub existing_found: bool,
    #[serde(flatten)]
    pub report: MergeReport,
}

/// Appends every backup record whose handle is not already present.
/// Existing records are never replaced; the first record seen for a handle
/// wins, and new records keep their backup order.
pub fn merge(existing: Dataset, backup: Dataset) -> (Dataset, MergeReport) {
    let existing_count = existing.len();
    let backup_count = backup.len();

    let mut seen = existing.handles();
    let mut merged = existing;
    let mut added_count = 0;

    for record in backup.into_records() {
        if seen.contains(record.author_handle()) {
            continue;
        }
        seen.insert(record.author_handle().to_string());
        merged.push(record);
        added_count += 1;
    }

    let report = MergeReport {
        existing_count,
        backup_count,
        added_count,
        total_count: merged.len(),
        followed_count: merged.followed_count(),
    };
    (merged, report)
}

/// Loads both files, merges, and rewrites `data_file`. Nothing is written
/// unless both loads succeed.
pub fn merge_into_file(backup_file: &Path, data_file: &Path) -> Result<MergeOutcome, MergeError> {
    let existing = Dataset::load_optional(data_file)?;
    let existing_found = existing.is_some();
    let backup = Dataset::load(backup_file)?;

    let (merged, report) = merge(existing.unwrap_or_default(), backup);
    tracing::info!(
        added = report.added_count,
        total = report.total_count,
        "merge computed"
    );

    merged.save(data_file)?;

    Ok(MergeOutcome {
        data_file: data_file.to_path_buf(),
        existing_found,
        report,
    })
}
