//! Stock Monitor — polls one quote from the real-time-finance-data API on a
//! fixed interval and prints the growing series to the terminal.
//!
//! Usage example (CLI):
//! ```bash
//! RAPIDAPI_KEY=... stock_monitor --symbol .DJI:INDEXDJX --interval 5
//! ```
//!
//! The polling thread fetches and records quotes; printing happens on the main
//! thread, which drains the presentation loop until polling ends. Polling ends
//! on the first failed fetch or on Ctrl+C.
#![warn(missing_docs)]
mod args;

use std::sync::{Arc, Mutex, PoisonError};

use clap::Parser;
use log::{error, info, warn};
use stock_client::{Credentials, QuoteClient};
use stock_monitor::console::ConsoleChart;
use stock_monitor::{MonitorError, PollingScheduler, presentation_channel};

use crate::args::Args;

fn main() -> Result<(), MonitorError> {
    init_logger();
    let args = Args::parse();

    let credentials = Credentials::new(args.api_key.clone());
    if credentials.is_empty() {
        warn!("No API key supplied (--api-key or RAPIDAPI_KEY); the first fetch will fail");
    }
    let source = QuoteClient::new()?.authorize(credentials);

    let (dispatcher, presentation) = presentation_channel();
    let mut scheduler = PollingScheduler::new(Arc::new(source)).with_dispatcher(dispatcher);
    if let Some(limit) = args.history_limit {
        scheduler = scheduler.with_history_limit(limit);
    }

    let stop = scheduler.stop_handle();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping quote polling...");
        stop.stop();
    })?;

    let chart = Mutex::new(ConsoleChart::new(args.label.clone()));
    scheduler.start(
        args.interval,
        args.symbol.clone(),
        move |quote| {
            let mut chart = chart.lock().unwrap_or_else(PoisonError::into_inner);
            for line in chart.record(&quote) {
                println!("{}", line);
            }
            println!();
        },
        |err| {
            error!("Polling stopped ({}): {}", err.class(), err);
        },
    )?;

    let handled = presentation.run();
    info!(
        "Quote polling finished: {} notification(s) handled, {} quote(s) in history",
        handled,
        scheduler.history_len()
    );
    scheduler.join()?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
