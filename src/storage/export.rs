//! Read-only JSON export of the full collection.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    core::utils::replace_file,
    domain::{ExpenseRecord, DATE_FORMAT},
};

use super::Result;

/// File name prefix used when none is configured.
pub const DEFAULT_EXPORT_PREFIX: &str = "harcamalar";

/// `<prefix>_<YYYY-MM-DD>.json`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    let prefix = prefix.trim();
    let prefix = if prefix.is_empty() {
        DEFAULT_EXPORT_PREFIX
    } else {
        prefix
    };
    format!("{}_{}.json", prefix, date.format(DATE_FORMAT))
}

/// Writes `records` as indented JSON into `dir` and returns the created file.
pub fn write_export(
    records: &[ExpenseRecord],
    dir: &Path,
    prefix: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(prefix, date));
    let json = serde_json::to_string_pretty(records)?;
    replace_file(&path, &json)?;
    Ok(path)
}
