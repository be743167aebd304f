//! Command-line arguments for the stock monitor.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::num::NonZeroUsize;

use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Instrument to poll, in the provider's notation.
    #[clap(long, default_value = ".DJI:INDEXDJX")]
    pub symbol: String,

    /// Seconds between two fetches.
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// RapidAPI key for the real-time-finance-data API.
    #[clap(long, env = "RAPIDAPI_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Keep at most this many quotes in memory (unbounded when omitted).
    #[clap(long)]
    pub history_limit: Option<NonZeroUsize>,

    /// Name printed next to every point of the series.
    #[clap(long, default_value = "Dow Jones Industrial")]
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dow_jones_setup() {
        let args = Args::try_parse_from(["stock_monitor", "--api-key", "k"]).unwrap();
        assert_eq!(args.symbol, ".DJI:INDEXDJX");
        assert_eq!(args.interval, 5);
        assert_eq!(args.api_key, "k");
        assert!(args.history_limit.is_none());
        assert_eq!(args.label, "Dow Jones Industrial");
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Args::try_parse_from(["stock_monitor", "--interval", "0"]).is_err());
    }

    #[test]
    fn parses_history_limit() {
        let args = Args::try_parse_from(["stock_monitor", "--history-limit", "100"]).unwrap();
        assert_eq!(args.history_limit.map(NonZeroUsize::get), Some(100));
        assert!(Args::try_parse_from(["stock_monitor", "--history-limit", "0"]).is_err());
    }
}
