use super::record::CountryRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supplies the raw country records for a run.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<CountryRecord>, SourceError>;
}

/// Error enumeration for record source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("record directory {} could not be read: {source}", path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("record file {} could not be read: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("record file {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads one `<country>.json` fact sheet per file from a directory.
///
/// Records come back sorted by identifier so repeated runs see the same order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub const EXTENSION: &'static str = "json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_paths(&self) -> Result<Vec<PathBuf>, SourceError> {
        let directory_error = |source| SourceError::Directory {
            path: self.root.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(directory_error)? {
            let path = entry.map_err(directory_error)?.path();
            let is_record = path.is_file()
                && path
                    .extension()
                    .is_some_and(|extension| extension == Self::EXTENSION);
            if is_record {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "skipping non-record entry");
            }
        }
        Ok(paths)
    }

    fn load_file(path: &Path) -> Result<Option<CountryRecord>, SourceError> {
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            debug!(path = %path.display(), "skipping file without a UTF-8 name");
            return Ok(None);
        };

        let contents = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Value = serde_json::from_str(&contents).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(CountryRecord::new(id, data)))
    }
}

impl RecordSource for DirectorySource {
    fn load(&self) -> Result<Vec<CountryRecord>, SourceError> {
        let mut records = Vec::new();
        for path in self.record_paths()? {
            if let Some(record) = Self::load_file(&path)? {
                records.push(record);
            }
        }
        records.sort_by(|left, right| left.id().cmp(right.id()));

        info!(
            directory = %self.root.display(),
            count = records.len(),
            "loaded country records"
        );
        Ok(records)
    }
}

/// Records held in memory, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<CountryRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: CountryRecord) {
        self.records.push(record);
    }
}

impl RecordSource for InMemorySource {
    fn load(&self) -> Result<Vec<CountryRecord>, SourceError> {
        Ok(self.records.clone())
    }
}
