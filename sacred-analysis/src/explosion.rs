//! Explosion / confidence scoring.
//!
//! Two scorer strategies coexist, inherited from different surfaces of the
//! product and deliberately kept apart:
//!
//! - the *banded* strategy derives percentage-offset support/resistance
//!   bands around the quoted price and combines support proximity, phase
//!   bias, and a band-distance confidence into a clamped 0-100 score;
//! - the *ladder* strategy works directly on the static base-unit ladder,
//!   mixing position between the nearest levels with a momentum term and a
//!   fixed volume term. Its sum is returned unclamped (see DESIGN.md).

use crate::config::AnalysisConfig;
use crate::level::NearestLevels;
use crate::phase::{Zone, phase_modulo};
use serde::{Deserialize, Serialize};

/// Percentage-offset support/resistance bands around a quoted price.
///
/// Distinct from the base-unit ladder: band prices are fixed fractions of
/// the price itself, rounded to cents, and are consumed only by the banded
/// explosion scorer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PriceBands {
    /// Resistance band prices, nearest first.
    pub resistance: [f64; 3],
    /// Support band prices, nearest first.
    pub support: [f64; 3],
    /// Price the bands were derived from.
    pub current: f64,
    /// Modulo-form phase at the current price.
    pub phase: u16,
    /// Zone the phase falls in.
    pub zone: Zone,
    /// Support/resistance distance balance, 0-100 (higher when price sits
    /// closer to support).
    pub confidence: u8,
}

/// Round a price to cents.
fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Distance from `price` to the nearest band in `bands`.
fn nearest_distance(price: f64, bands: &[f64; 3]) -> f64 {
    bands
        .iter()
        .map(|band| (price - band).abs())
        .fold(f64::INFINITY, f64::min)
}

/// Derive the percentage bands and their confidence reading for a price.
pub fn price_bands(price: f64, config: &AnalysisConfig) -> PriceBands {
    let resistance = config
        .band_offsets
        .map(|offset| round_cents(price + price * offset));
    let support = config
        .band_offsets
        .map(|offset| round_cents(price - price * offset));

    let info = phase_modulo(price, config.base_unit);

    let distance_to_support = nearest_distance(price, &support);
    let distance_to_resistance = nearest_distance(price, &resistance);
    let spread = distance_to_support + distance_to_resistance;
    let confidence = if spread > 0.0 {
        (distance_to_support / spread * 100.0).round() as u8
    } else {
        0
    };

    PriceBands {
        resistance,
        support,
        current: price,
        phase: info.phase,
        zone: info.zone,
        confidence,
    }
}

/// Banded-strategy explosion score: composite 0-100 likelihood of an
/// imminent outsized move.
///
/// Combines proximity to the nearest support band (bounce potential), the
/// phase bias (full weight below 180 degrees), and the band confidence.
pub fn banded_explosion_score(price: f64, bands: &PriceBands) -> u8 {
    let nearest_support = nearest_distance(price, &bands.support);
    let band_width = bands.resistance[0] - bands.support[0];
    let support_proximity = if band_width > 0.0 {
        1.0 - nearest_support / band_width
    } else {
        0.0
    };

    let phase_score = if bands.phase < 180 { 1.0 } else { 0.5 };

    let score =
        (support_proximity * 40.0 + phase_score * 30.0 + f64::from(bands.confidence) * 0.3).round();

    score.clamp(0.0, 100.0) as u8
}

/// Ladder-strategy explosion score over the static base-unit ladder.
///
/// Position between the nearest levels rewards proximity to support (the
/// resistance distance sits in the numerator), momentum adds up to 30 from
/// the absolute percent change, and a fixed 20 stands in for volume. The
/// sum is returned without an upper clamp.
///
/// With no level below, support falls back to 0; with no level above,
/// resistance falls back to `price * 1.5`.
pub fn ladder_explosion_score(price: f64, percent_change: f64, levels: &NearestLevels) -> i32 {
    let nearest_support = levels.nearest_support().map_or(0.0, |level| level.price);
    let nearest_resistance = levels
        .nearest_resistance()
        .map_or(price * 1.5, |level| level.price);

    let distance_to_support = price - nearest_support;
    let distance_to_resistance = nearest_resistance - price;
    let total_distance = distance_to_support + distance_to_resistance;

    let position_score = if total_distance > 0.0 {
        distance_to_resistance / total_distance * 50.0
    } else {
        0.0
    };

    let momentum_score = (percent_change.abs() * 5.0).min(30.0);
    let volume_score = 20.0;

    (position_score + momentum_score + volume_score).round() as i32
}
