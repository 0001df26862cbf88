//! Sacred27 market-structure analytics.
//!
//! The numeric core behind the Sacred27 dashboard:
//! - Base-unit price-level ladders with strength classification
//! - 0-360 degree market-cycle phase tracking across four named zones
//! - Composite explosion/confidence scoring (banded and ladder strategies)
//! - Volume-profile decomposition (point of control, value area, buy/sell
//!   delta) combined into a trading signal
//!
//! All analysis entry points are synchronous, side-effect-free pure
//! functions over their inputs; [`Analyzer`] bundles them behind a single
//! configured facade. The only async surface is the [`QuoteSource`] seam
//! upstream integrations plug into.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod explosion;
pub mod level;
pub mod phase;
pub mod profile;
pub mod quote;

// Re-export commonly used types for convenience
pub use analyzer::Analyzer;
pub use config::AnalysisConfig;
pub use error::QuoteError;
pub use explosion::PriceBands;
pub use level::{LevelStrength, NearestLevels, PriceLevel};
pub use phase::{PhaseInfo, Signal, Zone};
pub use profile::{Candle, VolumeLevel, VolumeProfile};
pub use quote::{MockQuotes, QuoteSource, StockQuote};
