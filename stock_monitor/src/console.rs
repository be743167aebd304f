//! Console presentation of the quote series.
//!
//! Stands in for a chart window: every quote becomes one `(seconds, price)`
//! point, where the x value is the seconds field of the provider timestamp,
//! and the title line shows the quote's date and `HHMM` time.
use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use stock_common::Quote;

/// Layout of the provider's `last_update_utc` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One plotted observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    /// Seconds component of the quote timestamp.
    pub seconds: u32,
    /// Quote price.
    pub price: Decimal,
}

/// Parse a provider timestamp. Returns `None` for layouts we do not recognise.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT).ok()
}

/// Window title for a quote, e.g. `RealTime Stock Data Updates, Date: 2024-05-17 Time: 2059`.
pub fn window_title(quote: &Quote) -> String {
    match parse_timestamp(quote.timestamp()) {
        Some(at) => format!(
            "RealTime Stock Data Updates, Date: {} Time: {}",
            at.format("%Y-%m-%d"),
            at.format("%H%M")
        ),
        None => format!("RealTime Stock Data Updates, {}", quote.timestamp()),
    }
}

/// Accumulates the series for one symbol and formats it for the terminal.
#[derive(Debug, Clone)]
pub struct ConsoleChart {
    label: String,
    points: Vec<SeriesPoint>,
}

impl ConsoleChart {
    /// Create an empty chart for a series called `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// Series label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Points recorded so far.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Add a quote to the series and return the lines to print for it.
    ///
    /// Quotes whose timestamp cannot be parsed are still printed but do not
    /// produce a point.
    pub fn record(&mut self, quote: &Quote) -> Vec<String> {
        let mut lines = vec![window_title(quote)];
        lines.extend(quote.to_string().lines().map(str::to_string));

        if let Some(at) = parse_timestamp(quote.timestamp()) {
            let point = SeriesPoint {
                seconds: at.second(),
                price: quote.price(),
            };
            self.points.push(point);
            lines.push(format!(
                "{} [{}] x={}s y=${}",
                self.label,
                self.points.len(),
                point.seconds,
                point.price
            ));
        }
        lines
    }
}
