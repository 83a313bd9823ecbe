use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The fixed set of spending categories. Stored with their Turkish labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "Gıda")]
    Food,
    #[serde(rename = "Ulaşım")]
    Transport,
    #[serde(rename = "Eğlence")]
    Entertainment,
    #[serde(rename = "Fatura")]
    Bills,
    #[serde(rename = "Diğer")]
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Other,
    ];

    /// Label used in storage and exports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Gıda",
            Category::Transport => "Ulaşım",
            Category::Entertainment => "Eğlence",
            Category::Bills => "Fatura",
            Category::Other => "Diğer",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::Food => &["gida", "food"],
            Category::Transport => &["ulasim", "transport"],
            Category::Entertainment => &["eglence", "entertainment"],
            Category::Bills => &["bills", "bill"],
            Category::Other => &["diger", "other"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let lowered = trimmed.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.label().to_lowercase() == lowered
                    || category.aliases().contains(&lowered.as_str())
            })
            .ok_or_else(|| ValidationError::UnknownCategory(trimmed.to_string()))
    }
}
