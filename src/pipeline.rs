use crate::analysis::{annotate, swing_points, SwingPoint, SwingTags};
use crate::config::AppConfig;
use crate::data::{Candle, KlineClient};
use crate::error::AppError;

/// Candles of one query together with their swing tags, index for index.
#[derive(Debug, Clone)]
pub struct AnnotatedSeries {
    pub candles: Vec<Candle>,
    pub tags: Vec<SwingTags>,
}

impl AnnotatedSeries {
    pub fn from_candles(candles: Vec<Candle>) -> Result<Self, AppError> {
        let tags = annotate(&candles)?;
        Ok(Self { candles, tags })
    }

    pub fn swing_points(&self) -> Vec<SwingPoint> {
        swing_points(&self.candles, &self.tags)
    }
}

/// Validates `config`, fetches its candle window and annotates it.
pub async fn load_series(config: &AppConfig) -> Result<AnnotatedSeries, AppError> {
    let (start, end) = config.validate()?;

    let client = KlineClient::from_config(config)?;
    let candles = client
        .fetch_klines(&config.symbol, config.interval, start, end)
        .await?;

    let series = AnnotatedSeries::from_candles(candles)?;
    log::info!(
        "{} candles annotated, {} swing points",
        series.candles.len(),
        series.swing_points().len()
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisError, ConfigError};

    #[test]
    fn out_of_order_candles_surface_as_analysis_error() {
        let candles = vec![
            Candle::new(2, 1.0, 1.0, 1.0, 1.0, 1.0),
            Candle::new(1, 1.0, 1.0, 1.0, 1.0, 1.0),
        ];
        assert!(matches!(
            AnnotatedSeries::from_candles(candles),
            Err(AppError::Analysis(AnalysisError::InvalidSequenceOrder { index: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let config = AppConfig::default();
        assert!(matches!(
            load_series(&config).await,
            Err(AppError::Config(ConfigError::MissingCredentials))
        ));
    }
}
