//! Trade domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::errors::{CsvError, Error};
use crate::parser::ParsedRow;
use crate::trades::trades_constants::{ACTION_BUY, ACTION_SELL, DEFAULT_HEADER_LABELS};
use crate::Result;

/// Canonical field a CSV column label maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeField {
    Date,
    Symbol,
    Name,
    Client,
    Action,
    Quantity,
    Price,
    Remarks,
}

impl TradeField {
    pub const ALL: [TradeField; 8] = [
        TradeField::Date,
        TradeField::Symbol,
        TradeField::Name,
        TradeField::Client,
        TradeField::Action,
        TradeField::Quantity,
        TradeField::Price,
        TradeField::Remarks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeField::Date => "date",
            TradeField::Symbol => "symbol",
            TradeField::Name => "name",
            TradeField::Client => "client",
            TradeField::Action => "action",
            TradeField::Quantity => "quantity",
            TradeField::Price => "price",
            TradeField::Remarks => "remarks",
        }
    }

    /// Whether cells of this field are coerced to numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TradeField::Quantity | TradeField::Price)
    }
}

impl fmt::Display for TradeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TradeField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown trade field: {}", s))
    }
}

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => ACTION_BUY,
            TradeAction::Sell => ACTION_SELL,
        }
    }

    /// Quantity with the sign this action contributes to a net position.
    pub fn signed(&self, quantity: Decimal) -> Decimal {
        match self {
            TradeAction::Buy => quantity,
            TradeAction::Sell => -quantity,
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let action = s.trim();
        if action.eq_ignore_ascii_case(ACTION_BUY) {
            Ok(TradeAction::Buy)
        } else if action.eq_ignore_ascii_case(ACTION_SELL) {
            Ok(TradeAction::Sell)
        } else {
            Err(format!("Unknown trade action: {}", action))
        }
    }
}

/// A coerced CSV cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Number(Decimal),
    Date(NaiveDate),
    Text(String),
    /// Blank numeric or date cell
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Date(date) => write!(f, "{}", date.format(DISPLAY_DATE_FORMAT)),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Empty => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Number(value) => Serialize::serialize(value, serializer),
            CellValue::Date(_) => serializer.collect_str(self),
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

/// One parsed trade line keyed by canonical field.
pub type TradeRow = ParsedRow<TradeField, CellValue>;

/// One trade from the uploaded statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    #[serde(default)]
    #[serde(with = "trade_date_format")]
    pub date: Option<NaiveDate>,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: String,
    pub action: TradeAction,
    pub quantity: Decimal,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub remarks: String,
}

impl TradeRecord {
    /// Widens a parsed row into a trade.
    ///
    /// `symbol`, `action` and `quantity` are required. A missing or blank
    /// name, client or remarks becomes an empty string, a missing price zero
    /// and a missing date `None`.
    pub fn try_from_row(row: &TradeRow, row_number: usize) -> Result<Self> {
        let missing = |field: TradeField| -> Error {
            CsvError::MissingField {
                row: row_number,
                field: field.to_string(),
            }
            .into()
        };

        let symbol = text_cell(row, TradeField::Symbol);
        if symbol.is_empty() {
            return Err(missing(TradeField::Symbol));
        }

        let action_text = text_cell(row, TradeField::Action);
        if action_text.is_empty() {
            return Err(missing(TradeField::Action));
        }
        let action = TradeAction::from_str(&action_text).map_err(|_| CsvError::InvalidAction {
            row: row_number,
            action: action_text.clone(),
        })?;

        let quantity = match row.get(&TradeField::Quantity) {
            Some(CellValue::Number(value)) => *value,
            _ => return Err(missing(TradeField::Quantity)),
        };

        let price = match row.get(&TradeField::Price) {
            Some(CellValue::Number(value)) => *value,
            _ => Decimal::ZERO,
        };

        let date = match row.get(&TradeField::Date) {
            Some(CellValue::Date(date)) => Some(*date),
            _ => None,
        };

        Ok(Self {
            date,
            symbol,
            name: text_cell(row, TradeField::Name),
            client: text_cell(row, TradeField::Client),
            action,
            quantity,
            price,
            remarks: text_cell(row, TradeField::Remarks),
        })
    }

    /// Trade date as shown to users, `YYYY/MM/DD`, or empty when unknown.
    pub fn date_label(&self) -> String {
        self.date
            .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Quantity with the sign of the trade's action.
    pub fn signed_quantity(&self) -> Decimal {
        self.action.signed(self.quantity)
    }
}

fn text_cell(row: &TradeRow, field: TradeField) -> String {
    row.get(&field)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

/// Column label dictionary.
///
/// Built once from a canonical field → label map; lookups go through the
/// inverted label → field view. Labels are matched exactly after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels {
    labels: BTreeMap<TradeField, String>,
    fields_by_label: HashMap<String, TradeField>,
}

impl HeaderLabels {
    /// Builds the dictionary, rejecting one label shared by two fields.
    pub fn new<I, L>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (TradeField, L)>,
        L: Into<String>,
    {
        let mut labels = BTreeMap::new();
        let mut fields_by_label = HashMap::new();

        for (field, label) in entries {
            let label: String = label.into();
            let label = label.trim().to_string();
            if label.is_empty() {
                return Err(Error::InvalidConfigValue(format!(
                    "Empty header label for field '{}'",
                    field
                )));
            }
            if let Some(previous) = labels.insert(field, label.clone()) {
                fields_by_label.remove(&previous);
            }
            if let Some(existing) = fields_by_label.insert(label.clone(), field) {
                if existing != field {
                    return Err(Error::InvalidConfigValue(format!(
                        "Header label '{}' is used by both '{}' and '{}'",
                        label, existing, field
                    )));
                }
            }
        }

        Ok(Self {
            labels,
            fields_by_label,
        })
    }

    /// Canonical field for a column label.
    pub fn field_for(&self, label: &str) -> Option<TradeField> {
        self.fields_by_label.get(label.trim()).copied()
    }

    pub fn label_for(&self, field: TradeField) -> Option<&str> {
        self.labels.get(&field).map(String::as_str)
    }

    /// Field → label entries in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (TradeField, &str)> {
        self.labels
            .iter()
            .map(|(field, label)| (*field, label.as_str()))
    }
}

impl Default for HeaderLabels {
    fn default() -> Self {
        let labels: BTreeMap<TradeField, String> = DEFAULT_HEADER_LABELS
            .iter()
            .map(|(field, label)| (*field, label.to_string()))
            .collect();
        let fields_by_label = labels
            .iter()
            .map(|(field, label)| (label.clone(), *field))
            .collect();
        Self {
            labels,
            fields_by_label,
        }
    }
}

// Trade dates travel as "YYYY/MM/DD" strings; blank or null means unknown.
mod trade_date_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::constants::DISPLAY_DATE_FORMAT;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DISPLAY_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), DISPLAY_DATE_FORMAT)
                .map(Some)
                .map_err(|e| {
                    serde::de::Error::custom(format!(
                        "Invalid trade date '{}': {}. Expected YYYY/MM/DD",
                        s, e
                    ))
                }),
            _ => Ok(None),
        }
    }
}
