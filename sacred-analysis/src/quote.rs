//! Upstream quote contract.
//!
//! The engine never fetches data itself; callers supply prices and candles.
//! [`QuoteSource`] is the seam a live integration plugs into, and
//! [`MockQuotes`] is the fixed table the dashboard runs on until one lands.

use crate::error::QuoteError;
use async_trait::async_trait;
use fnv::FnvHashMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Snapshot quote for one listed symbol.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StockQuote {
    /// Ticker symbol, upper-case.
    pub symbol: SmolStr,
    /// Last traded price.
    pub price: Decimal,
    /// Absolute change on the day.
    pub change: Decimal,
    /// Percentage change on the day.
    pub change_percent: f64,
    /// Session high.
    pub high: Decimal,
    /// Session low.
    pub low: Decimal,
    /// Session open.
    pub open: Decimal,
    /// Session volume in shares.
    pub volume: f64,
    /// Market capitalisation.
    pub market_cap: Decimal,
}

impl StockQuote {
    /// Convert price to f64 for calculations.
    pub fn price_f64(&self) -> f64 {
        self.price.to_f64().unwrap_or(0.0)
    }

    /// Convert session high to f64 for calculations.
    pub fn high_f64(&self) -> f64 {
        self.high.to_f64().unwrap_or(0.0)
    }

    /// Convert session low to f64 for calculations.
    pub fn low_f64(&self) -> f64 {
        self.low.to_f64().unwrap_or(0.0)
    }

    /// Convert session open to f64 for calculations.
    pub fn open_f64(&self) -> f64 {
        self.open.to_f64().unwrap_or(0.0)
    }
}

/// Upstream source of point-in-time quotes.
#[async_trait]
pub trait QuoteSource {
    /// Fetch the latest quote for `symbol`.
    ///
    /// Symbol lookup is case-insensitive; unknown symbols yield
    /// [`QuoteError::UnknownSymbol`].
    async fn fetch(&self, symbol: &str) -> Result<StockQuote, QuoteError>;
}

/// Fixed in-memory quote table.
#[derive(Clone, Debug)]
pub struct MockQuotes {
    quotes: FnvHashMap<SmolStr, StockQuote>,
}

/// Build a table entry from cent-denominated money fields.
fn quote(
    symbol: &str,
    price_cents: i64,
    change_cents: i64,
    change_percent: f64,
    high_cents: i64,
    low_cents: i64,
    open_cents: i64,
    volume: f64,
    market_cap: i64,
) -> StockQuote {
    StockQuote {
        symbol: SmolStr::new(symbol),
        price: Decimal::new(price_cents, 2),
        change: Decimal::new(change_cents, 2),
        change_percent,
        high: Decimal::new(high_cents, 2),
        low: Decimal::new(low_cents, 2),
        open: Decimal::new(open_cents, 2),
        volume,
        market_cap: Decimal::from(market_cap),
    }
}

impl MockQuotes {
    /// Construct the table with its standard entries.
    pub fn new() -> Self {
        let quotes = [
            quote(
                "AAPL",
                17550,
                235,
                1.36,
                17720,
                17380,
                17410,
                52_340_000.0,
                2_750_000_000_000,
            ),
            quote(
                "TSLA",
                24280,
                -345,
                -1.40,
                24850,
                24120,
                24630,
                98_750_000.0,
                770_000_000_000,
            ),
            quote(
                "NVDA",
                49520,
                1280,
                2.65,
                49890,
                48850,
                49030,
                45_230_000.0,
                1_220_000_000_000,
            ),
        ]
        .into_iter()
        .map(|quote| (quote.symbol.clone(), quote))
        .collect();

        Self { quotes }
    }

    /// Symbols the table covers.
    pub fn symbols(&self) -> impl Iterator<Item = &SmolStr> {
        self.quotes.keys()
    }
}

impl Default for MockQuotes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for MockQuotes {
    async fn fetch(&self, symbol: &str) -> Result<StockQuote, QuoteError> {
        let key = SmolStr::new(symbol.to_uppercase());
        self.quotes
            .get(&key)
            .cloned()
            .ok_or(QuoteError::UnknownSymbol(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_quotes_fetch() {
        let quotes = MockQuotes::new();

        let aapl = quotes.fetch("AAPL").await.unwrap();
        assert_eq!(aapl.price, dec!(175.50));
        assert_eq!(aapl.change, dec!(2.35));
        assert_eq!(aapl.price_f64(), 175.50);

        let tsla = quotes.fetch("TSLA").await.unwrap();
        assert_eq!(tsla.change, dec!(-3.45));
        assert_eq!(tsla.change_percent, -1.40);
    }

    #[tokio::test]
    async fn test_mock_quotes_fetch_is_case_insensitive() {
        let quotes = MockQuotes::new();
        let nvda = quotes.fetch("nvda").await.unwrap();
        assert_eq!(nvda.symbol, "NVDA");
        assert_eq!(nvda.price, dec!(495.20));
    }

    #[tokio::test]
    async fn test_mock_quotes_unknown_symbol() {
        let quotes = MockQuotes::new();
        let actual = quotes.fetch("ZZZZ").await;
        assert_eq!(actual, Err(QuoteError::UnknownSymbol(SmolStr::new("ZZZZ"))));
    }
}
