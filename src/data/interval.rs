use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kline bucket sizes accepted by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[default]
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Interval {
    pub fn all() -> Vec<Interval> {
        vec![
            Interval::OneMinute,
            Interval::ThreeMinutes,
            Interval::FiveMinutes,
            Interval::FifteenMinutes,
            Interval::ThirtyMinutes,
            Interval::OneHour,
            Interval::TwoHours,
            Interval::FourHours,
            Interval::SixHours,
            Interval::EightHours,
            Interval::TwelveHours,
            Interval::OneDay,
            Interval::ThreeDays,
            Interval::OneWeek,
            Interval::OneMonth,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHours => "2h",
            Interval::FourHours => "4h",
            Interval::SixHours => "6h",
            Interval::EightHours => "8h",
            Interval::TwelveHours => "12h",
            Interval::OneDay => "1d",
            Interval::ThreeDays => "3d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1M",
        }
    }

    /// Axis label format; intraday buckets show the clock, longer ones the date.
    pub fn time_format(&self) -> &'static str {
        match self {
            Interval::OneDay | Interval::ThreeDays | Interval::OneWeek | Interval::OneMonth => {
                "%m-%d"
            }
            _ => "%H:%M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::all()
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Interval::all().iter().map(|i| i.as_str()).collect();
                format!("unknown interval `{}`, expected one of {}", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exchange_codes() {
        assert_eq!("15m".parse::<Interval>(), Ok(Interval::FifteenMinutes));
        assert_eq!("1M".parse::<Interval>(), Ok(Interval::OneMonth));
        assert_eq!("1m".parse::<Interval>(), Ok(Interval::OneMinute));
        assert!("15min".parse::<Interval>().is_err());
    }

    #[test]
    fn every_code_round_trips_through_display() {
        for interval in Interval::all() {
            assert_eq!(interval.to_string().parse::<Interval>(), Ok(interval));
        }
    }

    #[test]
    fn serializes_as_exchange_code() {
        let json = serde_json::to_string(&Interval::FourHours).unwrap();
        assert_eq!(json, "\"4h\"");
        let back: Interval = serde_json::from_str("\"1w\"").unwrap();
        assert_eq!(back, Interval::OneWeek);
    }
}
