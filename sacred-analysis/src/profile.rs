//! Volume-profile decomposition of an OHLCV candle series.
//!
//! The traded price range bins into a fixed number of equal-width buckets;
//! each candle's volume is apportioned pro-rata across the buckets its range
//! spans, split into buy/sell volume by candle direction. From the filled
//! buckets fall out the point of control (highest-volume bucket), the value
//! area (minimal high-volume set covering the configured fraction of total
//! volume), and a combined trading signal folding in the base-unit ladder
//! and phase of the latest close.

use crate::config::AnalysisConfig;
use crate::level::{PriceLevel, ladder};
use crate::phase::{Signal, phase_between};
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

/// One OHLCV bar supplied by the upstream candle source.
///
/// The engine only reads candles; it assumes `high >= low` and a
/// non-negative volume.
#[derive(Clone, Copy, PartialEq, Debug, Constructor, Deserialize, Serialize)]
pub struct Candle {
    /// Bar timestamp.
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Whether the bar closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// One equal-width price bucket of the volume profile.
#[derive(Clone, Copy, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct VolumeLevel {
    /// Bucket midpoint price.
    pub price: f64,
    /// Total volume apportioned to the bucket.
    pub volume: f64,
    /// Volume from bullish candles.
    pub buy_volume: f64,
    /// Volume from bearish (and unchanged) candles.
    pub sell_volume: f64,
    /// `buy_volume - sell_volume`.
    pub delta: f64,
}

/// Aggregate volume-profile decomposition and combined signal.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VolumeProfile {
    /// Buckets in ascending price order.
    pub levels: Vec<VolumeLevel>,
    /// Price of the highest-volume bucket (point of control); ties go to
    /// the lowest price.
    pub poc: f64,
    /// Upper bound of the value area.
    pub value_area_high: f64,
    /// Lower bound of the value area. `f64::INFINITY` when no volume
    /// accumulated (no meaningful value area).
    pub value_area_low: f64,
    /// Total apportioned volume. Can fall short of the raw candle sum when
    /// zero-range bars were skipped.
    pub total_volume: f64,
    /// Base-unit ladder spanning the candle range.
    pub price_levels: Vec<PriceLevel>,
    /// Phase of the latest close within the ladder.
    pub phase: u16,
    /// Categorical decision from the strict value-area/phase rule.
    pub signal: Signal,
    /// Explanatory clauses accompanying the confidence reading.
    pub clauses: Vec<String>,
    /// Additive confidence score, capped at 100. Advisory only: it never
    /// feeds back into `signal`.
    pub confidence: u8,
}

impl VolumeProfile {
    /// Degenerate all-zero result for an empty candle series.
    fn empty() -> Self {
        Self {
            levels: Vec::new(),
            poc: 0.0,
            value_area_high: 0.0,
            value_area_low: 0.0,
            total_volume: 0.0,
            price_levels: Vec::new(),
            phase: 0,
            signal: Signal::Hold,
            clauses: Vec::new(),
            confidence: 0,
        }
    }
}

/// Bin the traded range of `candles` into equal-width buckets and derive the
/// point of control, value area, and combined trading signal.
///
/// An empty series yields the defined all-zero [`VolumeProfile`]. Candles
/// with `high == low` carry no price extent to apportion over and are
/// skipped entirely.
pub fn volume_profile(candles: &[Candle], config: &AnalysisConfig) -> VolumeProfile {
    let (min_price, max_price) = match candles
        .iter()
        .flat_map(|candle| [candle.low, candle.high])
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::MinMax(min, max) => (min, max),
        MinMaxResult::OneElement(only) => (only, only),
        MinMaxResult::NoElements => return VolumeProfile::empty(),
    };

    let level_size = (max_price - min_price) / config.num_levels as f64;

    let mut levels: Vec<VolumeLevel> = (0..config.num_levels)
        .map(|i| VolumeLevel {
            price: min_price + i as f64 * level_size + level_size / 2.0,
            ..Default::default()
        })
        .collect();

    // Apportion each candle's volume pro-rata across the buckets it spans
    let mut total_volume = 0.0;
    for candle in candles {
        let candle_range = candle.high - candle.low;
        if candle_range <= 0.0 {
            continue;
        }

        let volume_at_level = candle.volume / candle_range * level_size;
        let is_bullish = candle.is_bullish();

        for level in levels
            .iter_mut()
            .filter(|level| level.price >= candle.low && level.price <= candle.high)
        {
            level.volume += volume_at_level;
            if is_bullish {
                level.buy_volume += volume_at_level;
            } else {
                level.sell_volume += volume_at_level;
            }
            level.delta = level.buy_volume - level.sell_volume;
            total_volume += volume_at_level;
        }
    }

    // Point of control: strict comparison keeps the first (lowest-price)
    // bucket on ties
    let poc = levels
        .iter()
        .fold(None::<&VolumeLevel>, |max, level| match max {
            Some(current) if level.volume > current.volume => Some(level),
            None => Some(level),
            _ => max,
        })
        .map_or(0.0, |level| level.price);

    // Value area: greedily take the highest-volume buckets until the target
    // fraction of total volume is covered
    let target_volume = total_volume * config.value_area_fraction;
    let mut by_volume: Vec<&VolumeLevel> = levels.iter().collect();
    by_volume.sort_by(|a, b| b.volume.total_cmp(&a.volume));

    let mut accumulated = 0.0;
    let mut value_area_high = 0.0_f64;
    let mut value_area_low = f64::INFINITY;
    for level in by_volume {
        if accumulated >= target_volume {
            break;
        }
        accumulated += level.volume;
        value_area_high = value_area_high.max(level.price);
        value_area_low = value_area_low.min(level.price);
    }

    let price_levels = ladder(min_price, max_price, config.base_unit);
    let current_price = candles.last().map_or(0.0, |candle| candle.close);
    let info = phase_between(current_price, &price_levels);

    let (signal, clauses, confidence) = synthesize_signal(
        current_price,
        poc,
        value_area_high,
        value_area_low,
        info.phase,
        &levels,
    );

    VolumeProfile {
        levels,
        poc,
        value_area_high,
        value_area_low,
        total_volume,
        price_levels,
        phase: info.phase,
        signal,
        clauses,
        confidence,
    }
}

/// Build the explanatory clause list, additive confidence, and categorical
/// decision for a computed profile.
///
/// Each check contributes a fixed point value to the confidence when it
/// triggers. The categorical signal ignores the confidence entirely: BUY
/// requires the price strictly below the value area with phase under 180,
/// SELL the mirror image, anything else holds.
fn synthesize_signal(
    current_price: f64,
    poc: f64,
    value_area_high: f64,
    value_area_low: f64,
    phase: u16,
    levels: &[VolumeLevel],
) -> (Signal, Vec<String>, u8) {
    let mut clauses = Vec::new();
    let mut confidence = 0u32;

    // Price position relative to POC
    if current_price < poc {
        clauses.push("Price below Point of Control (POC)".to_string());
        confidence += 20;
    } else if current_price > poc {
        clauses.push("Price above Point of Control (POC)".to_string());
        confidence += 20;
    } else {
        clauses.push("Price at Point of Control (POC)".to_string());
    }

    // Price position relative to the value area
    if current_price < value_area_low {
        clauses.push("Price below Value Area - potential BUY zone".to_string());
        confidence += 30;
    } else if current_price > value_area_high {
        clauses.push("Price above Value Area - potential SELL zone".to_string());
        confidence += 30;
    } else {
        clauses.push("Price within Value Area - HOLD".to_string());
    }

    // Phase bucket
    if phase < 90 {
        clauses.push("Accumulation phase (0°-90°) - BUY signal".to_string());
        confidence += 25;
    } else if phase < 180 {
        clauses.push("Markup phase (90°-180°) - HOLD/BUY signal".to_string());
        confidence += 15;
    } else if phase < 270 {
        clauses.push("Distribution phase (180°-270°) - SELL signal".to_string());
        confidence += 25;
    } else {
        clauses.push("Markdown phase (270°-360°) - SELL signal".to_string());
        confidence += 25;
    }

    // Aggregate volume delta: sign alone decides the clause
    let total_delta: f64 = levels.iter().map(|level| level.delta).sum();
    if total_delta > 0.0 {
        clauses.push("Positive volume delta - buying pressure".to_string());
        confidence += 25;
    } else {
        clauses.push("Negative volume delta - selling pressure".to_string());
        confidence += 25;
    }

    let signal = if current_price < value_area_low && phase < 180 {
        Signal::Buy
    } else if current_price > value_area_high && phase >= 180 {
        Signal::Sell
    } else {
        Signal::Hold
    };

    (signal, clauses, confidence.min(100) as u8)
}
