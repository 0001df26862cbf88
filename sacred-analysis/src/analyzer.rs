//! Configured facade over every analysis component.

use crate::{
    config::AnalysisConfig,
    explosion::{PriceBands, banded_explosion_score, ladder_explosion_score, price_bands},
    level::{NearestLevels, PriceLevel, is_near_level, ladder, nearest_level, nearest_levels},
    phase::{PhaseInfo, phase_between, phase_modulo},
    profile::{Candle, VolumeProfile, volume_profile},
};
use tracing::debug;

/// Stateless facade bundling the level ladder, phase classifier, explosion
/// scorers, and volume-profile aggregator behind one [`AnalysisConfig`].
///
/// Every method is a pure function of its inputs; the analyzer holds nothing
/// but its configuration, so a single instance serves any number of
/// concurrent queries.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Construct with explicit configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Every base-unit level within `[min_price, max_price]`, ascending.
    pub fn ladder(&self, min_price: f64, max_price: f64) -> Vec<PriceLevel> {
        ladder(min_price, max_price, self.config.base_unit)
    }

    /// Up to three static-ladder levels either side of `price`.
    pub fn nearest_levels(&self, price: f64) -> NearestLevels {
        nearest_levels(price, &self.config)
    }

    /// Closest base-unit multiple to `price`.
    pub fn nearest_level(&self, price: f64) -> f64 {
        nearest_level(price, self.config.base_unit)
    }

    /// Whether `price` sits within the configured threshold of a level.
    pub fn is_near_level(&self, price: f64) -> bool {
        is_near_level(price, &self.config)
    }

    /// Phase of `price` within its base-unit cycle.
    pub fn phase(&self, price: f64) -> PhaseInfo {
        phase_modulo(price, self.config.base_unit)
    }

    /// Phase of `price` interpolated between the bracketing `levels`.
    pub fn phase_between(&self, price: f64, levels: &[PriceLevel]) -> PhaseInfo {
        phase_between(price, levels)
    }

    /// Percentage support/resistance bands around `price`.
    pub fn price_bands(&self, price: f64) -> PriceBands {
        price_bands(price, &self.config)
    }

    /// Banded-strategy explosion score (clamped 0-100).
    pub fn banded_explosion_score(&self, price: f64) -> u8 {
        let bands = price_bands(price, &self.config);
        banded_explosion_score(price, &bands)
    }

    /// Ladder-strategy explosion score (unclamped, see [`crate::explosion`]).
    pub fn ladder_explosion_score(&self, price: f64, percent_change: f64) -> i32 {
        let levels = nearest_levels(price, &self.config);
        ladder_explosion_score(price, percent_change, &levels)
    }

    /// Full volume-profile decomposition and combined signal for `candles`.
    pub fn volume_profile(&self, candles: &[Candle]) -> VolumeProfile {
        debug!(candles = candles.len(), "computing volume profile");
        volume_profile(candles, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{Signal, Zone};

    #[test]
    fn test_analyzer_end_to_end_quote_walkthrough() {
        let analyzer = Analyzer::default();
        let price = 175.50;

        let levels = analyzer.nearest_levels(price);
        assert_eq!(
            levels.below.iter().map(|level| level.price).collect::<Vec<_>>(),
            vec![108.0, 135.0, 162.0]
        );
        assert_eq!(
            levels.above.iter().map(|level| level.price).collect::<Vec<_>>(),
            vec![189.0, 216.0, 243.0]
        );

        let phase = analyzer.phase(27.0);
        assert_eq!(phase.phase, 0);
        assert_eq!(phase.zone, Zone::Accumulation);
        assert_eq!(phase.signal, Signal::Buy);

        assert_eq!(analyzer.ladder_explosion_score(price, 1.36), 52);
        assert!(analyzer.banded_explosion_score(price) <= 100);
    }

    #[test]
    fn test_analyzer_custom_base_unit() {
        let analyzer = Analyzer::new(AnalysisConfig {
            base_unit: 10.0,
            ..AnalysisConfig::default()
        });

        assert_eq!(analyzer.nearest_level(27.0), 30.0);
        assert_eq!(analyzer.phase(25.0).phase, 180);
    }
}
