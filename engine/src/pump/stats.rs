use market::SymbolWindow;

/// Summary of one symbol's window, in the shape the pump predicate needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,

    pub change_from_min_pct: f64,
    pub change_from_avg_pct: f64,
    pub volatility_pct: f64,

    pub count: usize,
}

/// Minimum window length for any verdict.
pub const MIN_SAMPLES: usize = 2;

impl WindowStats {
    /// Computes the window summary.
    ///
    /// Returns `None` for fewer than `MIN_SAMPLES` samples, a non-positive
    /// minimum or mean, or any derived value that is not finite.
    pub fn compute(window: &SymbolWindow) -> Option<Self> {
        if window.len() < MIN_SAMPLES {
            return None;
        }

        let current = window.latest()?.price;
        let min = window.min()?;
        let max = window.max()?;
        let avg = window.mean()?;

        if min <= 0.0 || avg <= 0.0 {
            return None;
        }

        let stats = Self {
            current,
            min,
            max,
            avg,
            change_from_min_pct: (current - min) / min * 100.0,
            change_from_avg_pct: (current - avg) / avg * 100.0,
            volatility_pct: (max - min) / min * 100.0,
            count: window.len(),
        };

        stats.is_finite().then_some(stats)
    }

    fn is_finite(&self) -> bool {
        [
            self.current,
            self.min,
            self.max,
            self.avg,
            self.change_from_min_pct,
            self.change_from_avg_pct,
            self.volatility_pct,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
