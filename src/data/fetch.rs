use crate::config::AppConfig;
use crate::data::{Candle, Interval};
use crate::error::FetchError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

pub const MAX_KLINES_PER_REQUEST: usize = 1000;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

#[derive(Debug, Clone)]
pub struct KlineClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl KlineClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(&config.base_url, &config.api_key)
    }

    /// Fetches every candle opening in `[start_ms, end_ms)`, one page at a time.
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        interval: Interval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>, FetchError> {
        log::info!(
            "Fetching {} {} candles from {} to {}",
            symbol,
            interval,
            start_ms,
            end_ms
        );

        let candles = collect_pages(start_ms, end_ms, move |cursor| {
            self.fetch_page(symbol, interval, cursor, end_ms)
        })
        .await?;

        log::info!("{} candles fetched", candles.len());
        Ok(candles)
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        interval: Interval,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>, FetchError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let start = start_ms.to_string();
        let end = (end_ms - 1).to_string();
        let limit = MAX_KLINES_PER_REQUEST.to_string();

        let res = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .query(&[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("startTime", start.as_str()),
                ("endTime", end.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let err = parse_api_error(status.as_u16(), &body);
            log::warn!("Kline request failed: {}", err);
            return Err(err);
        }

        parse_klines(&body)
    }
}

/// Drives `fetch_page` from `start_ms` until a page says the range is exhausted.
pub async fn collect_pages<F, Fut>(
    start_ms: i64,
    end_ms: i64,
    mut fetch_page: F,
) -> Result<Vec<Candle>, FetchError>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<Vec<Candle>, FetchError>>,
{
    let mut candles = Vec::new();
    let mut cursor = (start_ms < end_ms).then_some(start_ms);

    while let Some(start) = cursor {
        let page = fetch_page(start).await?;
        log::debug!("Fetched page of {} candles starting at {}", page.len(), start);

        cursor = next_cursor(&page, MAX_KLINES_PER_REQUEST, end_ms);
        candles.extend(page);
    }

    Ok(candles)
}

/// Start time of the next page, or `None` once a page comes back short or
/// the next candle would open at or after `end_ms`.
pub fn next_cursor(page: &[Candle], limit: usize, end_ms: i64) -> Option<i64> {
    if page.len() < limit {
        return None;
    }
    let next = page.last()?.open_time + 1;
    (next < end_ms).then_some(next)
}

/// Decodes a klines response body (a JSON array of kline rows).
pub fn parse_klines(body: &str) -> Result<Vec<Candle>, FetchError> {
    let rows: Vec<Vec<Value>> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    rows.iter().map(|row| Candle::from_kline(row)).collect()
}

pub fn parse_api_error(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => FetchError::Api {
            status,
            code: err.code,
            message: err.msg,
        },
        Err(_) => FetchError::Api {
            status,
            code: 0,
            message: body.trim().to_string(),
        },
    }
}
