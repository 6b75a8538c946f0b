//! Startup configuration for the trade book.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::SOURCE_DATE_FORMAT;
use crate::errors::{Error, Result};
use crate::summary::SummaryOrder;
use crate::trades::{HeaderLabels, TradeField, DEFAULT_HEADER_LABELS};

/// Configuration read once at startup.
///
/// Every field has a default, so `{}` is a valid configuration for the
/// exchange bulk-deal export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeBookConfig {
    /// Canonical field → column label
    #[serde(default = "default_header_labels")]
    pub header_labels: BTreeMap<TradeField, String>,
    /// chrono format of the date column
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_summary_order")]
    pub summary_order: SummaryOrder,
}

fn default_header_labels() -> BTreeMap<TradeField, String> {
    DEFAULT_HEADER_LABELS
        .iter()
        .map(|(field, label)| (*field, label.to_string()))
        .collect()
}

fn default_date_format() -> String {
    SOURCE_DATE_FORMAT.to_string()
}

fn default_summary_order() -> SummaryOrder {
    SummaryOrder::NetQuantityDesc
}

impl Default for TradeBookConfig {
    fn default() -> Self {
        Self {
            header_labels: default_header_labels(),
            date_format: default_date_format(),
            summary_order: default_summary_order(),
        }
    }
}

impl TradeBookConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TradeBookConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::ConfigIO(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Builds the label dictionary for the trade schema.
    pub fn header_labels(&self) -> Result<HeaderLabels> {
        HeaderLabels::new(
            self.header_labels
                .iter()
                .map(|(field, label)| (*field, label.as_str())),
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.header_labels()?;

        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::InvalidConfigValue(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }

        Ok(())
    }
}
