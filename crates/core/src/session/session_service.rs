use log::{debug, error};
use std::path::Path;

use crate::constants::CSV_FILE_EXTENSION;
use crate::errors::{CsvError, Error};
use crate::parser::decode_content;
use crate::session::session_model::Notification;
use crate::settings::TradeBookConfig;
use crate::summary::{aggregate_trades, SymbolSummary};
use crate::trades::{parse_trades, HeaderLabels, TradeSchema};
use crate::Result;

/// Reads an uploaded file into text.
///
/// This is the only suspension point of an upload; parsing and aggregation
/// run synchronously on the returned text.
pub async fn read_csv_content(path: impl AsRef<Path>) -> Result<String> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(decode_content(&bytes))
}

/// View-state of the trade summary page.
///
/// Holds at most one upload's result; every upload replaces it. Methods take
/// `&mut self`, so two uploads can never interleave on one session.
#[derive(Debug)]
pub struct TradeBookSession {
    config: TradeBookConfig,
    labels: HeaderLabels,
    summaries: Option<Vec<SymbolSummary>>,
    search: String,
    is_loading: bool,
}

impl TradeBookSession {
    /// Creates an empty session, validating the label dictionary once.
    pub fn new(config: TradeBookConfig) -> Result<Self> {
        config.validate()?;
        let labels = config.header_labels()?;
        Ok(Self {
            config,
            labels,
            summaries: None,
            search: String::new(),
            is_loading: false,
        })
    }

    pub fn config(&self) -> &TradeBookConfig {
        &self.config
    }

    /// True while an upload is being read and parsed.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_data(&self) -> bool {
        self.summaries.is_some()
    }

    /// All summaries of the current upload, unfiltered.
    pub fn summaries(&self) -> Option<&[SymbolSummary]> {
        self.summaries.as_deref()
    }

    /// Reads, parses and summarises one CSV file.
    ///
    /// On failure the previous result is discarded and the returned
    /// notification carries the error text.
    pub async fn upload(&mut self, path: impl AsRef<Path>) -> Notification {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.is_loading = true;
        let outcome = match check_extension(path, &file_name) {
            Ok(()) => read_csv_content(path)
                .await
                .and_then(|content| self.summarize(&content)),
            Err(e) => Err(e),
        };
        self.is_loading = false;

        self.apply(&file_name, outcome)
    }

    /// Same as `upload` for text that has already been read.
    pub fn load_str(&mut self, file_name: &str, content: &str) -> Notification {
        self.is_loading = true;
        let outcome = self.summarize(content);
        self.is_loading = false;

        self.apply(file_name, outcome)
    }

    fn summarize(&self, content: &str) -> Result<Vec<SymbolSummary>> {
        let schema = TradeSchema::new(&self.labels).with_date_format(&self.config.date_format);
        let trades = parse_trades(content, &schema)?;
        Ok(aggregate_trades(&trades, self.config.summary_order))
    }

    fn apply(&mut self, file_name: &str, outcome: Result<Vec<SymbolSummary>>) -> Notification {
        match outcome {
            Ok(summaries) => {
                debug!("Loaded {} symbols from {}", summaries.len(), file_name);
                self.summaries = Some(summaries);
                Notification::success(format!("Successfully parsed - {}", file_name))
            }
            Err(e) => {
                error!("Failed to parse {}: {}", file_name, e);
                self.summaries = None;
                Notification::error(e.to_string())
            }
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Summaries whose symbol or name contains the search text, ignoring case.
    ///
    /// Empty when nothing has been uploaded.
    pub fn visible_rows(&self) -> Vec<&SymbolSummary> {
        let Some(summaries) = &self.summaries else {
            return Vec::new();
        };

        let term = self.search.trim().to_lowercase();
        summaries
            .iter()
            .filter(|summary| {
                term.is_empty()
                    || summary.symbol.to_lowercase().contains(&term)
                    || summary.name.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Summary of one symbol with its constituent trades, for the detail view.
    pub fn summary(&self, symbol: &str) -> Option<&SymbolSummary> {
        self.summaries
            .as_ref()?
            .iter()
            .find(|summary| summary.symbol == symbol)
    }

    /// Clears the current upload and the search text.
    pub fn reset(&mut self) {
        self.summaries = None;
        self.search.clear();
    }
}

fn check_extension(path: &Path, file_name: &str) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_FILE_EXTENSION));

    if is_csv {
        Ok(())
    } else {
        Err(Error::Csv(CsvError::UnsupportedFile(file_name.to_string())))
    }
}
