//! Append-and-edit CSV store for session records.
//!
//! The log is the sole source of truth for aggregation. Rows are appended as
//! sessions finish; the bulk-edit path rewrites the whole file. Column names
//! are stable; older files missing the `Category`/`Notes`/`Summary`/`Action`
//! columns load with those fields empty. Rows are append-ordered, which is
//! not necessarily time-ordered after an edit.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::record::SessionRecord;

/// Snapshot returned by [`SessionLog::load_all`].
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub records: Vec<SessionRecord>,
    /// Rows that could not be parsed and were left out of `records`.
    pub skipped: usize,
}

/// CSV-backed session log.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    /// Point the log at a file. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header iff the file is new.
    ///
    /// The row is flushed before this returns, so a crash after a
    /// successful append never loses a historical record.
    pub fn append(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source: source.into(),
            })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(record)
            .and_then(|()| writer.flush().map_err(csv::Error::from))
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), subject = %record.subject, "session appended");
        Ok(())
    }

    /// Load every parsable row. A missing file is an empty log, not an
    /// error.
    ///
    /// Unparsable rows are skipped and counted rather than failing the
    /// whole log; a file that cannot be read at all still fails.
    pub fn load_all(&self) -> Result<LoadOutcome, StorageError> {
        if !self.path.exists() {
            return Ok(LoadOutcome::default());
        }
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;

        let mut outcome = LoadOutcome::default();
        for row in reader.deserialize::<SessionRecord>() {
            match row {
                Ok(record) => outcome.records.push(record),
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(StorageError::Read {
                        path: self.path.clone(),
                        source: err,
                    });
                }
                Err(err) => {
                    outcome.skipped += 1;
                    warn!(path = %self.path.display(), %err, "skipping unparsable log row");
                }
            }
        }
        Ok(outcome)
    }

    /// Replace the whole log in one atomic step.
    ///
    /// Writes a sibling temp file and renames it over the log, so a
    /// concurrent `load_all` sees either the old or the new contents, never
    /// a half-written file. No field validation is applied: the bulk-edit
    /// path may store rows the creation paths would reject.
    pub fn replace_all(&self, records: &[SessionRecord]) -> Result<(), StorageError> {
        let tmp = self.path.with_extension("csv.tmp");
        let write = |tmp: &Path| -> Result<(), csv::Error> {
            let mut writer = csv::Writer::from_path(tmp)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
            Ok(())
        };
        write(&tmp).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source: source.into(),
        })?;
        debug!(path = %self.path.display(), rows = records.len(), "log rewritten");
        Ok(())
    }
}
