use serde::{Deserialize, Serialize};

pub const INDEX_COLUMNS: [&str; 6] = [
    "Country",
    "Index",
    "Ticker",
    "Price on 2025-04-01",
    "Price on 2025-04-08",
    "Percent Change (%)",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Index")]
    pub index: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Price on 2025-04-01")]
    pub start_price: f64,
    #[serde(rename = "Price on 2025-04-08")]
    pub end_price: f64,
    #[serde(rename = "Percent Change (%)")]
    pub percent_change: f64,
}

impl IndexRecord {
    pub fn new(
        country: impl Into<String>,
        index: impl Into<String>,
        ticker: impl Into<String>,
        start_price: f64,
        end_price: f64,
        percent_change: f64,
    ) -> Self {
        Self {
            country: country.into(),
            index: index.into(),
            ticker: ticker.into(),
            start_price,
            end_price,
            percent_change,
        }
    }
}
