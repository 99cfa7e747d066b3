use thiserror::Error;

/// Rejected configuration. Raised once at construction; nothing in the
/// detection path returns an error after that.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    #[error("min profit margin must be within (0, 100) percent, got {0}")]
    MarginOutOfRange(f64),

    #[error("confidence thresholds must satisfy 0 <= medium <= high, got medium={medium} high={high}")]
    ConfidenceThresholds { medium: f64, high: f64 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("max points per window must be at least 2, got {0}")]
    MaxPointsTooSmall(usize),
}
