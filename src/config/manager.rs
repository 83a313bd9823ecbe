use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::core::utils::{app_data_dir, config_file_in, replace_file};

use super::{Config, ConfigError};

/// Reads and writes the preferences file under the application home.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at the application home (`$EXPENSE_LEDGER_HOME` or `~/.expense_ledger`).
    pub fn from_env() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(config_file_in(&base))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saved preferences, or the defaults when nothing was saved yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.config_path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.config_path.display(), "no saved configuration");
                return Ok(Config::default());
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    /// Replaces the preferences file with `config`, creating its directory when needed.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        replace_file(&self.config_path, &json)?;
        tracing::debug!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }
}
