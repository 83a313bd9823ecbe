use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{core::utils::replace_file, domain::ExpenseRecord, errors::StorageError};

use super::{ExpenseStore, Result, DEFAULT_SLOT};

const SLOT_EXTENSION: &str = "json";

/// Filesystem-backed JSON slot: one file holding the full record array.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Storage for slot `name` inside `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>, name: &str) -> Self {
        let dir = dir.into();
        let path = dir.join(format!("{}.{}", canonical_name(name), SLOT_EXTENSION));
        Self { path }
    }

    pub fn with_default_slot(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DEFAULT_SLOT)
    }

    /// Storage bound to an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExpenseStore for JsonStorage {
    fn read(&self) -> Result<Vec<ExpenseRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(Vec::new()),
            Ok(data) => serde_json::from_str(&data).map_err(|err| StorageError::Read {
                slot: self.describe(),
                reason: err.to_string(),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(StorageError::Read {
                slot: self.describe(),
                reason: err.to_string(),
            }),
        }
    }

    fn write(&self, records: &[ExpenseRecord]) -> Result<()> {
        save_records_to_path(records, &self.path).map_err(|err| StorageError::Write {
            slot: self.describe(),
            reason: err.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes `records` to `path` atomically by staging to a temporary file.
pub fn save_records_to_path(records: &[ExpenseRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string(records)?;
    replace_file(path, &json)?;
    Ok(())
}

/// Loads a record array from `path`, returning structured errors on failure.
pub fn load_records_from_path(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_SLOT.into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ExpenseId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord {
                id: ExpenseId::new(2),
                description: "Fatura ödemesi".into(),
                amount: 310.4,
                category: Category::Bills,
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            },
            ExpenseRecord {
                id: ExpenseId::new(1),
                description: "Sinema".into(),
                amount: 120.0,
                category: Category::Entertainment,
                date: NaiveDate::from_ymd_opt(2023, 12, 30).unwrap(),
            },
        ]
    }

    #[test]
    fn missing_slot_reads_as_empty() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::with_default_slot(temp.path());
        assert!(storage.read().expect("read").is_empty());
    }

    #[test]
    fn write_then_read_roundtrip_keeps_order() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("nested"), "expenseTrackerData");
        let records = sample_records();
        storage.write(&records).expect("write");
        assert!(storage.path().ends_with("nested/expenseTrackerData.json"));
        assert_eq!(storage.read().expect("read"), records);
        assert!(!crate::core::utils::staging_path(storage.path()).exists());
    }

    #[test]
    fn corrupt_slot_is_a_read_error() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::with_default_slot(temp.path());
        fs::write(storage.path(), "{not json").expect("seed");
        let err = storage.read().expect_err("corrupt data");
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[test]
    fn slot_names_are_sanitized() {
        let storage = JsonStorage::new("/tmp", "../../etc/passwd");
        let name = storage.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "______etc_passwd.json");
        let fallback = JsonStorage::new("/tmp", "  ");
        assert!(fallback.path().ends_with("expenseTrackerData.json"));
    }
}
