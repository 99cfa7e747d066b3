use corelib::Confidence;

use crate::error::ConfigError;

/// Tuning for the pump detector.
///
/// Every threshold the detector compares against lives here so the
/// detector itself stays free of magic numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Notional capital used to size `potential_profit`.
    pub capital: f64,

    /// Base threshold `T` in percent. A window is anomalous when
    /// change-from-min >= T, change-from-avg >= T/2 or volatility >= 2T.
    pub min_profit_margin_pct: f64,

    /// Cooldown per symbol after an emitted pump.
    pub debounce_ms: u64,

    /// Margins strictly above this are HIGH confidence.
    pub high_confidence_pct: f64,

    /// Margins strictly above this (and not HIGH) are MEDIUM confidence.
    pub medium_confidence_pct: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            capital: 50_000.0,
            min_profit_margin_pct: 1.5,
            debounce_ms: 30_000,
            high_confidence_pct: 5.0,
            medium_confidence_pct: 2.0,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.capital.is_finite() && self.capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital(self.capital));
        }

        let t = self.min_profit_margin_pct;
        if !(t.is_finite() && t > 0.0 && t < 100.0) {
            return Err(ConfigError::MarginOutOfRange(t));
        }

        if self.debounce_ms == 0 {
            return Err(ConfigError::Zero("debounce window"));
        }

        let (medium, high) = (self.medium_confidence_pct, self.high_confidence_pct);
        if !(medium.is_finite() && high.is_finite() && medium >= 0.0 && medium <= high) {
            return Err(ConfigError::ConfidenceThresholds { medium, high });
        }

        Ok(())
    }

    /// Maps a profit margin onto a confidence tier. Boundaries are exclusive:
    /// a margin equal to `high_confidence_pct` is MEDIUM.
    pub fn confidence_for(&self, profit_margin_pct: f64) -> Confidence {
        if profit_margin_pct > self.high_confidence_pct {
            Confidence::High
        } else if profit_margin_pct > self.medium_confidence_pct {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(DetectorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let base = DetectorConfig::default();

        let cfg = DetectorConfig { capital: 0.0, ..base.clone() };
        assert_eq!(cfg.validate(), Err(ConfigError::NonPositiveCapital(0.0)));

        let cfg = DetectorConfig { min_profit_margin_pct: 100.0, ..base.clone() };
        assert_eq!(cfg.validate(), Err(ConfigError::MarginOutOfRange(100.0)));

        let cfg = DetectorConfig { min_profit_margin_pct: 0.0, ..base.clone() };
        assert!(cfg.validate().is_err());

        let cfg = DetectorConfig { debounce_ms: 0, ..base.clone() };
        assert_eq!(cfg.validate(), Err(ConfigError::Zero("debounce window")));

        let cfg = DetectorConfig {
            medium_confidence_pct: 6.0,
            high_confidence_pct: 5.0,
            ..base
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ConfidenceThresholds { .. })
        ));
    }

    #[test]
    fn confidence_boundaries_are_exclusive() {
        let cfg = DetectorConfig::default();

        assert_eq!(cfg.confidence_for(5.0), Confidence::Medium);
        assert_eq!(cfg.confidence_for(5.01), Confidence::High);
        assert_eq!(cfg.confidence_for(2.0), Confidence::Low);
        assert_eq!(cfg.confidence_for(2.01), Confidence::Medium);
        assert_eq!(cfg.confidence_for(0.0), Confidence::Low);
    }
}
