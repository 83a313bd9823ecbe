use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".expense_ledger";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const STAGING_EXTENSION: &str = "tmp";

/// Environment variable overriding the application home directory.
pub const HOME_ENV: &str = "EXPENSE_LEDGER_HOME";

/// Returns the application-specific data directory, defaulting to `~/.expense_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the durable expense slot.
pub fn data_dir_in(base: &Path) -> PathBuf {
    base.join(DATA_DIR)
}

/// Location of the persisted configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Default directory for exported files: downloads, then home, then the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Sibling of `path` that a write is staged in before being renamed into place.
pub fn staging_path(path: &Path) -> PathBuf {
    let extension = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{STAGING_EXTENSION}"),
        None => STAGING_EXTENSION.to_string(),
    };
    path.with_extension(extension)
}

/// Replaces the contents of `path` with `data` in one rename.
///
/// A failed write leaves the previous file untouched and removes the staged copy.
pub fn replace_file(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let staging = staging_path(path);
    let staged = File::create(&staging).and_then(|mut file| {
        file.write_all(data.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = staged.and_then(|()| fs::rename(&staging, path)) {
        if staging.is_file() {
            fs::remove_file(&staging).ok();
        }
        return Err(err);
    }
    Ok(())
}
