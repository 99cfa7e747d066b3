use clap::Parser;
use std::time::Duration;

use adapters::binance::DEFAULT_API_URL;
use engine::DetectorConfig;
use market::HistoryConfig;
use scheduler::ScannerConfig;

const DEFAULT_SYMBOLS: [&str; 12] = [
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "XRPUSDT", "ADAUSDT", "DOGEUSDT", "AVAXUSDT",
    "DOTUSDT", "LINKUSDT", "LTCUSDT", "TRXUSDT",
];

#[derive(Debug, Parser)]
#[clap(name = "pump-scanner", version, about = "Rolling-window price pump scanner")]
pub struct Cli {
    /// Capital base used to size potential profit
    #[clap(long, env = "PUMP_CAPITAL", default_value_t = 50_000.0)]
    pub capital: f64,

    /// Minimum profit margin (%) that makes a move a pump
    #[clap(long, env = "PUMP_MIN_MARGIN_PCT", default_value_t = 1.5)]
    pub min_margin_pct: f64,

    /// Margin (%) above which a pump is HIGH confidence
    #[clap(long, env = "PUMP_HIGH_CONFIDENCE_PCT", default_value_t = 5.0)]
    pub high_confidence_pct: f64,

    /// Margin (%) above which a pump is MEDIUM confidence
    #[clap(long, env = "PUMP_MEDIUM_CONFIDENCE_PCT", default_value_t = 2.0)]
    pub medium_confidence_pct: f64,

    /// Rolling window length per symbol
    #[clap(long, env = "PUMP_WINDOW_SECS", default_value_t = 300)]
    pub window_secs: u64,

    /// Samples kept per symbol
    #[clap(long, env = "PUMP_MAX_POINTS", default_value_t = 300)]
    pub max_points: usize,

    /// Minimum gap between two pumps for the same symbol
    #[clap(long, env = "PUMP_DEBOUNCE_SECS", default_value_t = 30)]
    pub debounce_secs: u64,

    /// Alerts retained in history
    #[clap(long, env = "PUMP_MAX_ALERTS", default_value_t = 100)]
    pub max_alerts: usize,

    #[clap(long, env = "PUMP_SCAN_INTERVAL_SECS", default_value_t = 5)]
    pub scan_interval_secs: u64,

    #[clap(long, env = "PUMP_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Symbols to monitor (comma-separated)
    #[clap(
        long,
        env = "PUMP_SYMBOLS",
        value_delimiter = ',',
        default_values_t = DEFAULT_SYMBOLS.map(String::from)
    )]
    pub symbols: Vec<String>,

    #[clap(long, env = "BINANCE_API_URL", default_value = DEFAULT_API_URL)]
    pub binance_api_url: String,

    /// How often live pumps and status are logged
    #[clap(long, env = "PUMP_REPORT_SECS", default_value_t = 30)]
    pub report_secs: u64,

    /// Run this many cycles, print the alert history as JSON and exit
    #[clap(long)]
    pub cycles: Option<u32>,

    /// Emit logs as JSON (also enabled by APP_ENV=production)
    #[clap(long)]
    pub json_logs: bool,
}

impl Cli {
    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig {
            detector: DetectorConfig {
                capital: self.capital,
                min_profit_margin_pct: self.min_margin_pct,
                debounce_ms: self.debounce_secs.saturating_mul(1_000),
                high_confidence_pct: self.high_confidence_pct,
                medium_confidence_pct: self.medium_confidence_pct,
            },
            history: HistoryConfig {
                window_ms: self.window_secs.saturating_mul(1_000),
                max_points: self.max_points,
            },
            max_alerts: self.max_alerts,
            universe: self
                .symbols
                .iter()
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            scan_interval: Duration::from_secs(self.scan_interval_secs),
        }
    }

    pub fn report_every(&self) -> Duration {
        Duration::from_secs(self.report_secs.max(1))
    }
}
