use chrono::NaiveDate;

use crate::{config::Config, domain::DATE_FORMAT};

/// Renders amounts, shares and dates the way the current configuration asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFormatters {
    currency: String,
    precision: usize,
}

impl CliFormatters {
    pub fn new(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            precision: config.precision(),
        }
    }

    pub fn amount(&self, value: f64) -> String {
        format!("{} {}", self.number(value), self.currency)
    }

    pub fn number(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    pub fn percentage(&self, value: f64) -> String {
        format!("{:.1}%", value)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }
}

impl Default for CliFormatters {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
