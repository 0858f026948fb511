use crate::consts;
use crate::difficulty::Difficulty;
use crate::util::{report, write_atomic};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The result of one finished session.  Serialized as
/// `{"score": 12, "mode": "Hard", "date": "2024-06-01"}`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct HistoryRecord {
    pub(crate) score: u32,
    /// Label of the difficulty the session was played on
    pub(crate) mode: String,
    pub(crate) date: NaiveDate,
}

impl HistoryRecord {
    pub(crate) fn new(score: u32, difficulty: Difficulty, date: NaiveDate) -> HistoryRecord {
        HistoryRecord {
            score,
            mode: difficulty.as_str().to_owned(),
            date,
        }
    }

    /// Create a record dated with the current local date
    pub(crate) fn today(score: u32, difficulty: Difficulty) -> HistoryRecord {
        HistoryRecord::new(score, difficulty, Local::now().date_naive())
    }
}

/// Every session played so far, in the order they finished.
///
/// The whole log is rewritten to `path` after each append.  Without a path,
/// records are only kept in memory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct History {
    path: Option<PathBuf>,
    records: Vec<HistoryRecord>,
}

impl History {
    /// Load the history stored at `path`.  A missing file is an empty history.
    /// Any other failure is logged and also yields an empty history; the next
    /// append then replaces the unreadable file.
    pub(crate) fn load(path: Option<PathBuf>) -> History {
        let Some(path) = path else {
            debug!("history persistence disabled");
            return History::default();
        };
        let records = match History::read(&path) {
            Ok(records) => {
                info!(
                    path = %path.display(),
                    records = records.len(),
                    "loaded session history"
                );
                records
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %report(e),
                    "ignoring unreadable session history"
                );
                Vec::new()
            }
        };
        History {
            path: Some(path),
            records,
        }
    }

    fn read(path: &Path) -> Result<Vec<HistoryRecord>, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    /// Add `record` and write the complete history to disk before returning.
    /// The record is kept in memory even if writing fails.
    pub(crate) fn append(&mut self, record: HistoryRecord) -> Result<(), SaveError> {
        self.records.push(record);
        self.save()
    }

    fn save(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.records).map_err(SaveError::serialize)?;
        src.push('\n');
        write_atomic(path, src.as_bytes()).map_err(SaveError::write)?;
        debug!(
            path = %path.display(),
            records = self.records.len(),
            "saved session history"
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// The best sessions by descending score, at most
    /// [`HISTORY_DISPLAY_LIMIT`][consts::HISTORY_DISPLAY_LIMIT] of them.  The
    /// relative order of equal scores is not meaningful.
    pub(crate) fn ranked(&self) -> Vec<&HistoryRecord> {
        let mut ranked = self.records.iter().collect::<Vec<_>>();
        ranked.sort_by_key(|r| Reverse(r.score));
        ranked.truncate(consts::HISTORY_DISPLAY_LIMIT);
        ranked
    }
}

#[derive(Debug, Error)]
#[error("Failed to save session history to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize session history")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write session history to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read session history from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read session history file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize session history")]
    Deserialize(#[source] serde_json::Error),
}
