use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{
    core::utils::default_export_dir,
    ledger::{SortKey, ValidationRules, DEFAULT_DESCRIPTION_LIMIT},
    storage::{DEFAULT_EXPORT_PREFIX, DEFAULT_SLOT},
};

use super::ConfigError;

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "currency",
    "currency_precision",
    "default_sort",
    "storage_slot",
    "description_limit",
    "export_prefix",
    "export_dir",
    "ui_color_enabled",
    "plain_output",
];

/// Stores user-configurable preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    pub currency_precision: Option<u8>,
    pub default_sort: SortKey,
    pub storage_slot: String,
    pub description_limit: usize,
    pub export_prefix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Directory for exports. Defaults to the downloads folder.
    pub export_dir: Option<PathBuf>,

    pub ui_color_enabled: bool,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "TRY".into(),
            currency_precision: None,
            default_sort: SortKey::default(),
            storage_slot: DEFAULT_SLOT.into(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            export_prefix: DEFAULT_EXPORT_PREFIX.into(),
            export_dir: None,
            ui_color_enabled: true,
            plain_output: false,
        }
    }
}

impl Config {
    pub fn precision(&self) -> usize {
        self.currency_precision.map(usize::from).unwrap_or(2)
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            description_limit: self.description_limit,
            ..ValidationRules::default()
        }
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(default_export_dir)
    }

    /// Current value of `key` rendered for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "currency" => self.currency.clone(),
            "currency_precision" => self
                .currency_precision
                .map(|value| value.to_string())
                .unwrap_or_else(|| "default".into()),
            "default_sort" => self.default_sort.to_string(),
            "storage_slot" => self.storage_slot.clone(),
            "description_limit" => self.description_limit.to_string(),
            "export_prefix" => self.export_prefix.clone(),
            "export_dir" => self.resolve_export_dir().display().to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "plain_output" => self.plain_output.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` and stores it under `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = value.trim();
        match key {
            "currency" => {
                if trimmed.is_empty() {
                    return Err(invalid("currency code cannot be empty"));
                }
                self.currency = trimmed.to_uppercase();
            }
            "currency_precision" => {
                self.currency_precision = if trimmed.eq_ignore_ascii_case("default") {
                    None
                } else {
                    let precision: u8 = trimmed
                        .parse()
                        .map_err(|_| invalid("expected a number between 0 and 6"))?;
                    if precision > 6 {
                        return Err(invalid("expected a number between 0 and 6"));
                    }
                    Some(precision)
                };
            }
            "default_sort" => {
                self.default_sort = trimmed.parse().map_err(|err: String| invalid(&err))?;
            }
            "storage_slot" => {
                if trimmed.is_empty() {
                    return Err(invalid("slot name cannot be empty"));
                }
                self.storage_slot = trimmed.to_string();
            }
            "description_limit" => {
                let limit: usize = trimmed
                    .parse()
                    .map_err(|_| invalid("expected a positive number"))?;
                if limit == 0 {
                    return Err(invalid("expected a positive number"));
                }
                self.description_limit = limit;
            }
            "export_prefix" => {
                if trimmed.is_empty() {
                    return Err(invalid("prefix cannot be empty"));
                }
                self.export_prefix = trimmed.to_string();
            }
            "export_dir" => {
                self.export_dir = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("default")
                {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = parse_bool(trimmed).ok_or_else(|| invalid("expected on/off"))?;
            }
            "plain_output" => {
                self.plain_output = parse_bool(trimmed).ok_or_else(|| invalid("expected on/off"))?;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
