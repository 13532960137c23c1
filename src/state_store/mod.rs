// Read-only store of per-machine daily state files:
// <root>/<entity_id>/csv/state_<YYMMDD>.txt

pub mod daily_file;
mod error;
pub mod resample;

pub use error::StoreError;

use chrono::{Days, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::models::{EntityHistory, EntityLatestState};

const CSV_DIR: &str = "csv";

/// Entity ids are single directory names.
pub fn is_valid_entity_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn csv_dir(&self, entity_id: &str) -> Option<PathBuf> {
        if !is_valid_entity_id(entity_id) {
            return None;
        }
        Some(self.root.join(entity_id).join(CSV_DIR))
    }

    /// Directory names directly under the root, sorted. An unreachable root
    /// is logged and reported as no entities.
    #[instrument(skip(self), fields(repo = "state_store", operation = "list_entities"))]
    pub fn list_entities(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "cannot scan data root");
                return Vec::new();
            }
        };
        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        ids.sort();
        ids
    }

    /// Whether `entity_id` is a directory under the root.
    pub fn contains(&self, entity_id: &str) -> bool {
        is_valid_entity_id(entity_id) && self.root.join(entity_id).is_dir()
    }

    /// Last sample of the daily file with the newest change time, plus the
    /// in/out totals over that file. Writing to an older file makes it the
    /// newest.
    #[instrument(skip(self), fields(repo = "state_store", operation = "latest_state"))]
    pub fn latest_state(&self, entity_id: &str) -> Result<EntityLatestState, StoreError> {
        let pattern = self
            .root
            .join(entity_id)
            .join(CSV_DIR)
            .join(format!(
                "{}*{}",
                daily_file::FILE_PREFIX,
                daily_file::FILE_SUFFIX
            ));
        let not_found = || StoreError::NotFound(format!("no data files in {}", pattern.display()));

        let dir = self.csv_dir(entity_id).ok_or_else(not_found)?;
        let latest = newest_state_file(&dir).ok_or_else(not_found)?;
        debug!(file = %latest.display(), "latest state file");

        let samples = daily_file::load(&latest)?;
        let (hourly_in, hourly_out) = resample::sum_counts(&samples);
        let sample = samples
            .into_iter()
            .last()
            .ok_or_else(|| StoreError::Read(format!("{} contains no samples", latest.display())))?;

        Ok(EntityLatestState {
            sample,
            hourly_in,
            hourly_out,
        })
    }

    /// Hourly in/out sums over the `window_days` days ending today.
    pub fn history(&self, entity_id: &str, window_days: u32) -> EntityHistory {
        self.history_on(entity_id, window_days, Local::now().date_naive())
    }

    /// Same as [`history`](Self::history) with an explicit "today".
    /// Days without a file are skipped. A window with no files, or with any
    /// file that fails to load, is `Empty`.
    #[instrument(skip(self), fields(repo = "state_store", operation = "history"))]
    pub fn history_on(&self, entity_id: &str, window_days: u32, today: NaiveDate) -> EntityHistory {
        let Some(dir) = self.csv_dir(entity_id) else {
            return EntityHistory::Empty;
        };

        let mut rows = Vec::new();
        let mut files_found = 0usize;
        for offset in 0..u64::from(window_days) {
            let Some(date) = today.checked_sub_days(Days::new(offset)) else {
                break;
            };
            let path = dir.join(daily_file::file_name_for(date));
            if !path.is_file() {
                continue;
            }
            match daily_file::load(&path) {
                Ok(samples) => rows.extend(samples),
                Err(e) => {
                    warn!(error = %e, "history window unreadable");
                    return EntityHistory::Empty;
                }
            }
            files_found += 1;
        }

        debug!(files_found, rows = rows.len(), "history window loaded");
        if files_found == 0 {
            return EntityHistory::Empty;
        }
        EntityHistory::Hourly {
            buckets: resample::resample_hourly(&rows),
        }
    }
}

/// `state_*.txt` in `dir` with the greatest change time; ties go to the
/// greatest file name.
fn newest_state_file(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !daily_file::is_state_file_name(&name) {
                return None;
            }
            let meta = entry.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            Some((change_time(&meta), name, entry.path()))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, _, path)| path)
}

/// Inode change time (seconds, nanoseconds). Any write or metadata update
/// moves it forward.
#[cfg(unix)]
fn change_time(meta: &std::fs::Metadata) -> Option<(i64, i64)> {
    use std::os::unix::fs::MetadataExt;
    Some((meta.ctime(), meta.ctime_nsec()))
}

/// Creation time where there is no inode change time.
#[cfg(not(unix))]
fn change_time(meta: &std::fs::Metadata) -> Option<(i64, i64)> {
    let created = meta.created().or_else(|_| meta.modified()).ok()?;
    let since_epoch = created.duration_since(std::time::UNIX_EPOCH).ok()?;
    Some((since_epoch.as_secs() as i64, i64::from(since_epoch.subsec_nanos())))
}
