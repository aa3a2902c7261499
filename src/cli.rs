use crate::config::AppConfig;
use crate::data::Interval;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Candlestick chart with higher-high / lower-low swing markers", long_about = None)]
pub struct Args {
    /// Config file (defaults to ./.swingchart.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Kline interval, e.g. 15m, 1h, 1d
    #[arg(short, long)]
    pub interval: Option<Interval>,

    /// Start date, YYYY.MM.DD or YYYY-MM-DD with optional HH:MM
    #[arg(long)]
    pub start: Option<String>,

    /// End date (exclusive), same format as --start
    #[arg(long)]
    pub end: Option<String>,

    /// IANA timezone the dates are given in
    #[arg(long)]
    pub timezone: Option<String>,

    /// Print the swing points instead of opening the chart
    #[arg(long)]
    pub print: bool,
}

impl Args {
    /// Layers the command-line flags over `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(symbol) = &self.symbol {
            config.symbol = symbol.clone();
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if let Some(start) = &self.start {
            config.start_date = start.clone();
        }
        if let Some(end) = &self.end {
            config.end_date = end.clone();
        }
        if let Some(timezone) = &self.timezone {
            config.timezone = timezone.clone();
        }
        config.sanitized()
    }
}
