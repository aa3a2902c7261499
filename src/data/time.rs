use crate::error::ConfigError;
use chrono::{LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

const DATE_FORMATS: [&str; 2] = ["%Y.%m.%d", "%Y-%m-%d"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y.%m.%d %H:%M", "%Y-%m-%d %H:%M"];

pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

/// Converts a local date (midnight) or date-time in `timezone` to epoch milliseconds.
pub fn parse_date_millis(date: &str, timezone: &str) -> Result<i64, ConfigError> {
    let tz = parse_timezone(timezone)?;
    let naive = parse_naive(date.trim()).ok_or_else(|| ConfigError::InvalidDate(date.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.timestamp_millis()),
        LocalResult::None => Err(ConfigError::InvalidDate(date.to_string())),
    }
}

fn parse_naive(date: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
