use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("candle {index} opens at {current}, before the previous candle at {previous}")]
    InvalidSequenceOrder {
        index: usize,
        previous: i64,
        current: i64,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("exchange returned {status} (code {code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API key and secret key must be set (BINANCE_API_KEY / BINANCE_SECRET_KEY)")]
    MissingCredentials,
    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),
    #[error("invalid date `{0}`, expected YYYY.MM.DD or YYYY-MM-DD with optional HH:MM")]
    InvalidDate(String),
    #[error("start {start} must be before end {end}")]
    InvalidRange { start: i64, end: i64 },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
