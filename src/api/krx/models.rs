use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::models::PriceBar;

/// Date format used by the stock price service for `basDt` and range parameters
pub const BASIS_DATE_FORMAT: &str = "%Y%m%d";

/// Top-level envelope returned by `getStockPriceInfo`
#[derive(Debug, Clone, Deserialize)]
pub struct StockPriceEnvelope {
    pub response: StockPriceResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockPriceResponse {
    pub header: ResponseHeader,
    #[serde(default)]
    pub body: Option<ResponseBody>,
}

/// Result code block; `"00"` means success
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    pub result_code: String,
    pub result_msg: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default)]
    pub items: Items,
}

/// The service encodes "no rows" as `"items": ""` instead of an empty object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Populated {
        #[serde(default)]
        item: Option<OneOrMany<StockPriceItem>>,
    },
    Empty(String),
}

impl Default for Items {
    fn default() -> Self {
        Items::Empty(String::new())
    }
}

impl Items {
    pub fn into_vec(self) -> Vec<StockPriceItem> {
        match self {
            Items::Populated { item } => item.map(OneOrMany::into_vec).unwrap_or_default(),
            Items::Empty(_) => Vec::new(),
        }
    }
}

/// A single-row result may come back as a bare object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// One trading day for one listing. Numeric fields arrive as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPriceItem {
    /// Basis date, `YYYYMMDD`
    pub bas_dt: String,
    #[serde(default)]
    pub srtn_cd: String,
    #[serde(default)]
    pub isin_cd: String,
    /// Listing name
    #[serde(default)]
    pub itms_nm: String,
    /// Closing price
    pub clpr: String,
    /// Opening price
    pub mkp: String,
    /// High
    pub hipr: String,
    /// Low
    pub lopr: String,
    /// Traded quantity
    #[serde(default)]
    pub trqu: String,
}

impl StockPriceItem {
    /// Convert the raw row into a typed daily bar
    pub fn to_bar(&self) -> Result<PriceBar, ApiError> {
        let date = NaiveDate::parse_from_str(self.bas_dt.trim(), BASIS_DATE_FORMAT).map_err(|e| {
            ApiError::DeserializationError(format!("Invalid basDt '{}': {}", self.bas_dt, e))
        })?;

        Ok(PriceBar {
            date,
            open: parse_amount("mkp", &self.mkp)?,
            high: parse_amount("hipr", &self.hipr)?,
            low: parse_amount("lopr", &self.lopr)?,
            close: parse_amount("clpr", &self.clpr)?,
            volume: if self.trqu.trim().is_empty() {
                0
            } else {
                parse_amount("trqu", &self.trqu)?.max(0) as u64
            },
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .replace(',', "")
        .parse::<i64>()
        .map_err(|e| ApiError::DeserializationError(format!("Invalid {} '{}': {}", field, raw, e)))
}

/// Error type for stock price service calls
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// The service answered but reported a failure in its header
    #[error("Provider Error ({code}): {message}")]
    ProviderError { code: String, message: String },
    /// Body or field could not be decoded
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
