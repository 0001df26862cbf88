use serde::{Deserialize, Serialize};

/// Tunable parameters shared by every analysis component.
///
/// The defaults reproduce the production constants; tests and callers that
/// want different sensitivity construct their own instance and pass it to
/// [`Analyzer::new`](crate::Analyzer::new).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Base price unit whose integer multiples form the significant levels.
    pub base_unit: f64,
    /// Number of base-unit multiples in the static ladder used by the
    /// single-price level lookup (27, 54, .., 540 with the defaults).
    pub static_ladder_len: u32,
    /// Number of equal-width buckets the volume profile bins the traded
    /// range into.
    pub num_levels: usize,
    /// Fraction of total volume the value area must cover.
    pub value_area_fraction: f64,
    /// Fractional offsets of the resistance/support bands from the quoted
    /// price, nearest band first.
    pub band_offsets: [f64; 3],
    /// Absolute price distance within which a price counts as sitting "at"
    /// a level.
    pub near_level_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_unit: 27.0,
            static_ladder_len: 20,
            num_levels: 50,
            value_area_fraction: 0.7,
            band_offsets: [0.077, 0.231, 0.385],
            near_level_threshold: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.base_unit, 27.0);
        assert_eq!(config.static_ladder_len, 20);
        assert_eq!(config.num_levels, 50);
        assert_eq!(config.value_area_fraction, 0.7);
        assert_eq!(config.band_offsets, [0.077, 0.231, 0.385]);
        assert_eq!(config.near_level_threshold, 2.0);
    }

    #[test]
    fn test_config_from_json() {
        let input = r#"
            {
                "base_unit": 27.0,
                "static_ladder_len": 10,
                "num_levels": 25,
                "value_area_fraction": 0.68,
                "band_offsets": [0.05, 0.1, 0.2],
                "near_level_threshold": 1.0
            }
        "#;

        let actual = serde_json::from_str::<AnalysisConfig>(input).unwrap();
        assert_eq!(actual.static_ladder_len, 10);
        assert_eq!(actual.num_levels, 25);
        assert_eq!(actual.band_offsets, [0.05, 0.1, 0.2]);
    }
}
