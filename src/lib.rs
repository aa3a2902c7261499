pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod ui;

pub use analysis::{annotate, classify, CandleColor, SwingKind, SwingPoint, SwingTags};
pub use config::AppConfig;
pub use data::{Candle, Interval, KlineClient};
pub use error::{AnalysisError, AppError, ConfigError, FetchError};
pub use pipeline::{load_series, AnnotatedSeries};
