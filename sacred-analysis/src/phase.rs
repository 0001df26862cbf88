//! Market-cycle phase classification.
//!
//! A price's position within the base-unit cycle maps onto a 0-360 degree
//! coordinate, which partitions into four named market zones. Two
//! derivations exist: a modulo form used when no ladder context is
//! available, and an interpolation form locating the price between its two
//! bracketing ladder levels. Both agree on boundary semantics: a price
//! sitting exactly on a level is phase 0.

use crate::level::PriceLevel;
use serde::{Deserialize, Serialize};

/// Directional trading bias.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    /// Convert to display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Market-cycle stage derived from the phase angle.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
pub enum Zone {
    /// `[0, 90)` degrees.
    Accumulation,
    /// `[90, 180)` degrees.
    Markup,
    /// `[180, 270)` degrees.
    Distribution,
    /// `[270, 360)` degrees.
    Markdown,
    /// Degenerate ladder context (fewer than two levels).
    Unknown,
}

impl Zone {
    /// Classify a phase angle in `[0, 360)`.
    pub fn from_phase(phase: u16) -> Self {
        if phase < 90 {
            Self::Accumulation
        } else if phase < 180 {
            Self::Markup
        } else if phase < 270 {
            Self::Distribution
        } else {
            Self::Markdown
        }
    }

    /// Convert to display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accumulation => "Accumulation",
            Self::Markup => "Markup",
            Self::Distribution => "Distribution",
            Self::Markdown => "Markdown",
            Self::Unknown => "Unknown",
        }
    }

    /// Human description of what the zone represents.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Accumulation => "Smart money accumulating positions",
            Self::Markup => "Price rising, momentum building",
            Self::Distribution => "Smart money distributing positions",
            Self::Markdown => "Price declining, momentum fading",
            Self::Unknown => "Insufficient data",
        }
    }

    /// Directional bias the zone carries.
    pub fn bias(&self) -> Signal {
        match self {
            Self::Accumulation | Self::Markup => Signal::Buy,
            Self::Distribution | Self::Markdown => Signal::Sell,
            Self::Unknown => Signal::Hold,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase position and zone classification for a single price query.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PhaseInfo {
    /// Cyclic coordinate in degrees, `0 <= phase < 360`.
    pub phase: u16,
    /// Market-cycle stage at this phase.
    pub zone: Zone,
    /// Human description of the zone.
    pub description: String,
    /// Directional bias.
    pub signal: Signal,
}

impl PhaseInfo {
    fn from_phase(phase: u16) -> Self {
        let zone = Zone::from_phase(phase);
        Self {
            phase,
            zone,
            description: zone.description().to_string(),
            signal: zone.bias(),
        }
    }

    fn unknown() -> Self {
        Self {
            phase: 0,
            zone: Zone::Unknown,
            description: Zone::Unknown.description().to_string(),
            signal: Signal::Hold,
        }
    }
}

/// Reduce a rounded degree value into `[0, 360)`.
fn wrap_degrees(rounded: f64) -> u16 {
    (rounded as i64).rem_euclid(360) as u16
}

/// Phase of `price` within its base-unit cycle (no ladder context).
///
/// `round((price mod base) / base * 360)`, reduced into `[0, 360)` so that a
/// price exactly on a level is phase 0. Negative prices wrap via euclidean
/// remainder rather than producing a negative angle.
pub fn phase_modulo(price: f64, base_unit: f64) -> PhaseInfo {
    if base_unit <= 0.0 || !price.is_finite() {
        return PhaseInfo::unknown();
    }

    let cycle = price.rem_euclid(base_unit);
    PhaseInfo::from_phase(wrap_degrees((cycle / base_unit * 360.0).round()))
}

/// Phase of `price` interpolated between the two `levels` bracketing it.
///
/// The bracket is the last level not exceeding the price and the first level
/// exceeding it; prices outside the ladder range clamp to the first or last
/// adjacent pair, with the resulting angle wrapped into `[0, 360)`. A ladder
/// with fewer than two levels is a defined degenerate case yielding phase 0,
/// zone [`Zone::Unknown`], signal [`Signal::Hold`].
pub fn phase_between(price: f64, levels: &[PriceLevel]) -> PhaseInfo {
    if levels.len() < 2 || !price.is_finite() {
        return PhaseInfo::unknown();
    }

    let idx = levels.partition_point(|level| level.price <= price);
    let (lower, upper) = if idx == 0 {
        (&levels[0], &levels[1])
    } else if idx == levels.len() {
        (&levels[levels.len() - 2], &levels[levels.len() - 1])
    } else {
        (&levels[idx - 1], &levels[idx])
    };

    let range = upper.price - lower.price;
    if range <= 0.0 {
        return PhaseInfo::unknown();
    }

    let ratio = (price - lower.price) / range;
    PhaseInfo::from_phase(wrap_degrees((ratio * 360.0).round()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ladder;

    #[test]
    fn test_zone_partition_of_degrees() {
        struct TestCase {
            input: u16,
            expected: Zone,
        }

        let tests = vec![
            // TC0: lower bound of Accumulation
            TestCase {
                input: 0,
                expected: Zone::Accumulation,
            },
            // TC1: upper edge of Accumulation
            TestCase {
                input: 89,
                expected: Zone::Accumulation,
            },
            // TC2: lower bound of Markup
            TestCase {
                input: 90,
                expected: Zone::Markup,
            },
            // TC3: upper edge of Markup
            TestCase {
                input: 179,
                expected: Zone::Markup,
            },
            // TC4: lower bound of Distribution
            TestCase {
                input: 180,
                expected: Zone::Distribution,
            },
            // TC5: upper edge of Distribution
            TestCase {
                input: 269,
                expected: Zone::Distribution,
            },
            // TC6: lower bound of Markdown
            TestCase {
                input: 270,
                expected: Zone::Markdown,
            },
            // TC7: upper edge of Markdown
            TestCase {
                input: 359,
                expected: Zone::Markdown,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = Zone::from_phase(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_zone_bias() {
        assert_eq!(Zone::Accumulation.bias(), Signal::Buy);
        assert_eq!(Zone::Markup.bias(), Signal::Buy);
        assert_eq!(Zone::Distribution.bias(), Signal::Sell);
        assert_eq!(Zone::Markdown.bias(), Signal::Sell);
        assert_eq!(Zone::Unknown.bias(), Signal::Hold);
    }

    #[test]
    fn test_phase_modulo_on_level_is_zero() {
        let info = phase_modulo(27.0, 27.0);
        assert_eq!(info.phase, 0);
        assert_eq!(info.zone, Zone::Accumulation);
        assert_eq!(info.signal, Signal::Buy);
    }

    #[test]
    fn test_phase_modulo_quarter_points() {
        struct TestCase {
            input: f64,
            expected_phase: u16,
            expected_zone: Zone,
        }

        let tests = vec![
            // TC0: quarter of the way through the cycle
            TestCase {
                input: 33.75,
                expected_phase: 90,
                expected_zone: Zone::Markup,
            },
            // TC1: half way
            TestCase {
                input: 40.5,
                expected_phase: 180,
                expected_zone: Zone::Distribution,
            },
            // TC2: three quarters
            TestCase {
                input: 47.25,
                expected_phase: 270,
                expected_zone: Zone::Markdown,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = phase_modulo(test.input, 27.0);
            assert_eq!(actual.phase, test.expected_phase, "TC{} failed", index);
            assert_eq!(actual.zone, test.expected_zone, "TC{} failed", index);
        }
    }

    #[test]
    fn test_phase_modulo_negative_price_wraps() {
        // -6.75 is 20.25 above the -27 level: three quarters of the cycle
        let info = phase_modulo(-6.75, 27.0);
        assert_eq!(info.phase, 270);
        assert_eq!(info.zone, Zone::Markdown);
    }

    #[test]
    fn test_phase_between_midpoint() {
        let levels = ladder(100.0, 200.0, 27.0);
        let info = phase_between(121.5, &levels);
        assert_eq!(info.phase, 180);
        assert_eq!(info.zone, Zone::Distribution);
        assert_eq!(info.signal, Signal::Sell);
    }

    #[test]
    fn test_phase_between_agrees_with_modulo_at_levels() {
        let levels = ladder(100.0, 200.0, 27.0);

        for price in [108.0, 135.0, 162.0, 189.0] {
            let interpolated = phase_between(price, &levels);
            let modulo = phase_modulo(price, 27.0);
            assert_eq!(interpolated.phase, 0, "price {price}");
            assert_eq!(interpolated.phase, modulo.phase, "price {price}");
            assert_eq!(interpolated.zone, Zone::Accumulation, "price {price}");
        }
    }

    #[test]
    fn test_phase_between_degenerate_ladder() {
        let info = phase_between(100.0, &ladder(100.0, 120.0, 27.0));
        assert_eq!(info.phase, 0);
        assert_eq!(info.zone, Zone::Unknown);
        assert_eq!(info.signal, Signal::Hold);
        assert_eq!(info.description, "Insufficient data");
    }

    #[test]
    fn test_phase_between_clamps_outside_ladder() {
        let levels = ladder(100.0, 200.0, 27.0);

        // Below the ladder: interpolates against the first pair, then wraps
        let below = phase_between(50.0, &levels);
        assert!(below.phase < 360);

        // Above the ladder: interpolates against the last pair, then wraps
        let above = phase_between(250.0, &levels);
        assert!(above.phase < 360);
    }

    #[test]
    fn test_phase_always_within_circle() {
        let levels = ladder(0.0, 600.0, 27.0);
        let mut price = -50.0;
        while price < 700.0 {
            assert!(phase_between(price, &levels).phase < 360, "price {price}");
            assert!(phase_modulo(price, 27.0).phase < 360, "price {price}");
            price += 3.7;
        }
    }
}
