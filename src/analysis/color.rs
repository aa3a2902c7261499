use crate::data::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleColor {
    Green,
    Red,
}

/// Green only when the candle closed strictly above its open; a flat candle is red.
pub fn classify(candle: &Candle) -> CandleColor {
    if candle.close > candle.open {
        CandleColor::Green
    } else {
        CandleColor::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, close: f64) -> Candle {
        Candle::new(0, open, open.max(close), open.min(close), close, 1.0)
    }

    #[test]
    fn close_above_open_is_green() {
        assert_eq!(classify(&candle(10.0, 10.5)), CandleColor::Green);
    }

    #[test]
    fn close_below_open_is_red() {
        assert_eq!(classify(&candle(10.0, 9.5)), CandleColor::Red);
    }

    #[test]
    fn flat_candle_is_red() {
        assert_eq!(classify(&candle(10.0, 10.0)), CandleColor::Red);
    }
}
