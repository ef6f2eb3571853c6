use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::MergeError;
use crate::record::Record;

const INDENT: &[u8] = b"    ";

/// Ordered collection of follow records as stored in `posts.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn handles(&self) -> HashSet<String> {
        self.records
            .iter()
            .map(|r| r.author_handle().to_string())
            .collect()
    }

    pub fn followed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_followed()).count()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Parses a JSON array of records. `path` only labels errors.
    pub fn parse(path: &Path, text: &str) -> Result<Self, MergeError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let value: Value =
            serde_json::from_str(text).map_err(|e| MergeError::malformed(path, e.to_string()))?;
        let Value::Array(items) = value else {
            return Err(MergeError::malformed(path, "top-level value is not an array"));
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            let record = Record::try_from(item)
                .map_err(|e| MergeError::malformed(path, format!("record {idx}: {e}")))?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Loads a dataset that must exist.
    pub fn load(path: &Path) -> Result<Self, MergeError> {
        let text = fs::read_to_string(path).map_err(|e| MergeError::from_read(path, e))?;
        let dataset = Self::parse(path, &text)?;
        tracing::debug!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Loads a dataset that may not exist yet; `Ok(None)` when absent.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, MergeError> {
        match Self::load(path) {
            Ok(dataset) => Ok(Some(dataset)),
            Err(MergeError::FileNotFound(_)) => {
                tracing::debug!(path = %path.display(), "no dataset on disk, starting empty");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Four-space indented JSON with non-ASCII characters written literally.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.records.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Writes the dataset through a sibling temp file and renames it into
    /// place, creating the parent directory when needed.
    pub fn save(&self, path: &Path) -> Result<(), MergeError> {
        let bytes = self
            .to_pretty_json()
            .map_err(|e| MergeError::encode(path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MergeError::io(parent, e))?;
        }

        write_atomic(path, &bytes).map_err(|e| MergeError::io(path, e))?;
        tracing::info!(path = %path.display(), records = self.len(), "dataset written");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = tmp_path(path);
    let result = write_synced(&tmp, bytes)
        .and_then(|()| keep_permissions(path, &tmp))
        .and_then(|()| fs::rename(&tmp, path))
        .and_then(|()| sync_parent_dir(path));
    if result.is_err() && tmp.exists() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// Carries the mode of the file being replaced over to its replacement.
fn keep_permissions(path: &Path, tmp: &Path) -> io::Result<()> {
    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(tmp, meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn sync_parent_dir(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::File::open(parent)?.sync_all()?;
        }
    }
    Ok(())
}
