//! Base-unit price-level ladders.
//!
//! Significant levels are the integer multiples of the configured base unit.
//! Two forms are provided: a range form enumerating every level inside a
//! price interval, and a single-price form returning the nearest static
//! ladder levels bracketing a quote.

use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// Strength classification of a price level, derived from its multiple.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStrength {
    Strong,
    Medium,
    Weak,
}

impl LevelStrength {
    /// Classify a ladder multiple: every 10th multiple is strong, every 5th
    /// is medium, the rest are weak.
    pub fn from_multiple(multiple: i64) -> Self {
        if multiple % 10 == 0 {
            Self::Strong
        } else if multiple % 5 == 0 {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    /// Convert to display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
        }
    }
}

impl std::fmt::Display for LevelStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A price sitting exactly on a multiple of the base unit.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct PriceLevel {
    /// Level price (`multiple * base_unit`).
    pub price: f64,
    /// Integer index of the level on the ladder.
    pub multiple: i64,
    /// Strength classification.
    pub strength: LevelStrength,
}

impl PriceLevel {
    fn at_multiple(multiple: i64, base_unit: f64) -> Self {
        Self {
            price: multiple as f64 * base_unit,
            multiple,
            strength: LevelStrength::from_multiple(multiple),
        }
    }
}

/// Nearest static-ladder levels bracketing a price.
///
/// Each side holds up to three levels in ascending price order; fewer are
/// returned when the price sits near either end of the static ladder.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NearestLevels {
    /// Levels strictly below the price.
    pub below: Vec<PriceLevel>,
    /// Levels strictly above the price.
    pub above: Vec<PriceLevel>,
}

impl NearestLevels {
    /// Closest level under the price, if any.
    pub fn nearest_support(&self) -> Option<&PriceLevel> {
        self.below.last()
    }

    /// Closest level over the price, if any.
    pub fn nearest_resistance(&self) -> Option<&PriceLevel> {
        self.above.first()
    }
}

/// Enumerate every base-unit multiple falling within `[min_price, max_price]`
/// (inclusive), in ascending order.
///
/// An inverted or non-finite range yields an empty ladder rather than an
/// error. Multiple 0 appears only when the range reaches down to zero or
/// below, and classifies as strong.
pub fn ladder(min_price: f64, max_price: f64, base_unit: f64) -> Vec<PriceLevel> {
    if !min_price.is_finite() || !max_price.is_finite() || base_unit <= 0.0 {
        return Vec::new();
    }

    let start = (min_price / base_unit).floor() as i64;
    let end = (max_price / base_unit).ceil() as i64;

    let mut levels = Vec::new();
    for multiple in start..=end {
        let level = PriceLevel::at_multiple(multiple, base_unit);
        if level.price >= min_price && level.price <= max_price {
            levels.push(level);
        }
    }

    levels
}

/// Up to three static-ladder levels either side of `price`.
pub fn nearest_levels(price: f64, config: &AnalysisConfig) -> NearestLevels {
    let mut below = Vec::new();
    let mut above = Vec::new();

    for multiple in 1..=i64::from(config.static_ladder_len) {
        let level = PriceLevel::at_multiple(multiple, config.base_unit);
        if level.price < price {
            below.push(level);
        } else if level.price > price {
            above.push(level);
        }
    }

    // Keep the three nearest on each side
    let excess = below.len().saturating_sub(3);
    below.drain(..excess);
    above.truncate(3);

    NearestLevels { below, above }
}

/// Snap a price to the closest base-unit multiple.
pub fn nearest_level(price: f64, base_unit: f64) -> f64 {
    if base_unit <= 0.0 || !price.is_finite() {
        return 0.0;
    }
    (price / base_unit).round() * base_unit
}

/// Whether `price` sits within the configured threshold of a level.
pub fn is_near_level(price: f64, config: &AnalysisConfig) -> bool {
    (price - nearest_level(price, config.base_unit)).abs() <= config.near_level_threshold
}
