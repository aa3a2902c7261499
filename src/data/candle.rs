use crate::analysis::{classify, CandleColor};
use crate::error::FetchError;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One OHLCV bucket. `open_time` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(open_time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Builds a candle from one raw kline row:
    /// `[open_time, "open", "high", "low", "close", "volume", close_time, ...]`.
    pub fn from_kline(row: &[Value]) -> Result<Self, FetchError> {
        if row.len() < 6 {
            return Err(FetchError::Parse(format!(
                "kline row has {} fields, expected at least 6",
                row.len()
            )));
        }

        let open_time = row[0]
            .as_i64()
            .ok_or_else(|| FetchError::Parse(format!("invalid open time {}", row[0])))?;

        Ok(Self {
            open_time,
            open: parse_price(&row[1], "open")?,
            high: parse_price(&row[2], "high")?,
            low: parse_price(&row[3], "low")?,
            close: parse_price(&row[4], "close")?,
            volume: parse_price(&row[5], "volume")?,
        })
    }

    pub fn open_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }

    pub fn color(&self) -> CandleColor {
        classify(self)
    }
}

fn parse_price(value: &Value, field: &str) -> Result<f64, FetchError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(FetchError::Parse(format!("invalid {} value {}", field, value))),
    }
}
