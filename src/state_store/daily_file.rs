// Daily state files: naming and CSV loading.

use chrono::NaiveDate;
use std::path::Path;

use super::StoreError;
use crate::models::Sample;

pub(crate) const FILE_PREFIX: &str = "state_";
pub(crate) const FILE_SUFFIX: &str = ".txt";

/// `state_<YYMMDD>.txt` for the given day.
pub fn file_name_for(date: NaiveDate) -> String {
    format!("{}{}{}", FILE_PREFIX, date.format("%y%m%d"), FILE_SUFFIX)
}

/// Whether `name` matches `state_*.txt`.
pub fn is_state_file_name(name: &str) -> bool {
    name.len() >= FILE_PREFIX.len() + FILE_SUFFIX.len()
        && name.starts_with(FILE_PREFIX)
        && name.ends_with(FILE_SUFFIX)
}

/// Reads every row of a daily file in file order.
pub fn load(path: &Path) -> Result<Vec<Sample>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| StoreError::Read(format!("cannot open {}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<Sample>().enumerate() {
        let sample = record.map_err(|e| {
            // header is line 1, first data row is line 2
            StoreError::Read(format!("{} line {}: {}", path.display(), i + 2, e))
        })?;
        rows.push(sample);
    }
    Ok(rows)
}
