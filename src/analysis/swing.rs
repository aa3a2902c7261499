use crate::analysis::color::{classify, CandleColor};
use crate::data::Candle;
use crate::error::AnalysisError;

/// Number of candles before the candidate that are inspected.
pub const LOOKBACK: usize = 10;
/// Minimum count of opposite-colored candles in the lookback window.
pub const CONFIRMATION: usize = 2;

/// Swing annotation for one candle. Both flags are evaluated independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwingTags {
    pub higher_high: bool,
    pub lower_low: bool,
}

impl SwingTags {
    pub const NONE: SwingTags = SwingTags {
        higher_high: false,
        lower_low: false,
    };

    pub fn is_none(&self) -> bool {
        !self.higher_high && !self.lower_low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingKind {
    HigherHigh,
    LowerLow,
}

impl SwingKind {
    pub fn label(&self) -> &'static str {
        match self {
            SwingKind::HigherHigh => "HH",
            SwingKind::LowerLow => "LL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPoint {
    pub index: usize,
    pub open_time: i64,
    pub kind: SwingKind,
    pub price: f64,
}

/// Tags every candle with its swing flags, one entry per candle in input order.
///
/// Candle `i` (for `i >= LOOKBACK`) is a higher high when at least
/// `CONFIRMATION` of the `LOOKBACK` preceding candles are red and its high is
/// the first maximum of `candles[i - LOOKBACK..=i]`. Lower lows mirror this
/// with green candles and the first minimum of the lows.
pub fn annotate(candles: &[Candle]) -> Result<Vec<SwingTags>, AnalysisError> {
    ensure_chronological(candles)?;

    let mut tags = vec![SwingTags::NONE; candles.len()];
    for i in LOOKBACK..candles.len() {
        let window = &candles[i - LOOKBACK..i];
        let red = window
            .iter()
            .filter(|c| classify(c) == CandleColor::Red)
            .count();
        let green = window.len() - red;

        // the candidate sits at position LOOKBACK of its inclusive span
        let span = &candles[i - LOOKBACK..=i];
        let highest = first_extreme(span, |c| c.high, |a, b| a > b);
        let lowest = first_extreme(span, |c| c.low, |a, b| a < b);

        tags[i] = SwingTags {
            higher_high: red >= CONFIRMATION && highest == LOOKBACK,
            lower_low: green >= CONFIRMATION && lowest == LOOKBACK,
        };
    }

    Ok(tags)
}

/// Flattens tags into chart markers; a candle carrying both flags yields HH then LL.
pub fn swing_points(candles: &[Candle], tags: &[SwingTags]) -> Vec<SwingPoint> {
    candles
        .iter()
        .zip(tags)
        .enumerate()
        .flat_map(|(index, (candle, tag))| {
            let hh = tag.higher_high.then_some(SwingPoint {
                index,
                open_time: candle.open_time,
                kind: SwingKind::HigherHigh,
                price: candle.high,
            });
            let ll = tag.lower_low.then_some(SwingPoint {
                index,
                open_time: candle.open_time,
                kind: SwingKind::LowerLow,
                price: candle.low,
            });
            hh.into_iter().chain(ll)
        })
        .collect()
}

/// Highest higher high and lowest lower low; the earliest point wins a tie.
pub fn extremes(points: &[SwingPoint]) -> (Option<SwingPoint>, Option<SwingPoint>) {
    let mut highest: Option<SwingPoint> = None;
    let mut lowest: Option<SwingPoint> = None;

    for point in points {
        match point.kind {
            SwingKind::HigherHigh => {
                if highest.map_or(true, |h| point.price > h.price) {
                    highest = Some(*point);
                }
            }
            SwingKind::LowerLow => {
                if lowest.map_or(true, |l| point.price < l.price) {
                    lowest = Some(*point);
                }
            }
        }
    }

    (highest, lowest)
}

fn ensure_chronological(candles: &[Candle]) -> Result<(), AnalysisError> {
    for (index, pair) in candles.windows(2).enumerate() {
        if pair[1].open_time < pair[0].open_time {
            return Err(AnalysisError::InvalidSequenceOrder {
                index: index + 1,
                previous: pair[0].open_time,
                current: pair[1].open_time,
            });
        }
    }
    Ok(())
}

// Position of the first element whose value beats every earlier one.
fn first_extreme<F, C>(span: &[Candle], value: F, beats: C) -> usize
where
    F: Fn(&Candle) -> f64,
    C: Fn(f64, f64) -> bool,
{
    let mut best = 0;
    for (idx, candle) in span.iter().enumerate().skip(1) {
        if beats(value(candle), value(&span[best])) {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green(t: i64, high: f64, low: f64) -> Candle {
        Candle::new(t, low + 0.1, high, low, high - 0.1, 1.0)
    }

    fn red(t: i64, high: f64, low: f64) -> Candle {
        Candle::new(t, high - 0.1, high, low, low + 0.1, 1.0)
    }

    // Ten quiet candles with `reds` red ones at the front, then a candidate.
    fn window_with_reds(reds: usize, candidate: Candle) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..10)
            .map(|i| {
                if i < reds {
                    red(i as i64, 11.0, 9.0)
                } else {
                    green(i as i64, 11.0, 9.0)
                }
            })
            .collect();
        candles.push(candidate);
        candles
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(annotate(&[]).unwrap(), Vec::<SwingTags>::new());
    }

    #[test]
    fn short_sequences_are_never_tagged() {
        let candles: Vec<Candle> = (0..9).map(|i| green(i, 10.0 + i as f64, 5.0)).collect();
        let tags = annotate(&candles).unwrap();
        assert_eq!(tags.len(), 9);
        assert!(tags.iter().all(SwingTags::is_none));
    }

    #[test]
    fn first_lookback_candles_are_never_tagged() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| {
                let high = 10.0 + i as f64;
                if i % 2 == 0 {
                    red(i, high, 5.0)
                } else {
                    green(i, high, 5.0)
                }
            })
            .collect();
        let tags = annotate(&candles).unwrap();
        assert!(tags[..LOOKBACK].iter().all(SwingTags::is_none));
        assert!(tags[LOOKBACK].higher_high);
    }

    #[test]
    fn new_high_after_two_reds_is_higher_high() {
        let candles = window_with_reds(2, green(10, 12.0, 10.0));
        let tags = annotate(&candles).unwrap();
        assert!(tags[10].higher_high);
        assert!(!tags[10].lower_low);
    }

    #[test]
    fn single_red_does_not_confirm() {
        let candles = window_with_reds(1, green(10, 12.0, 10.0));
        let tags = annotate(&candles).unwrap();
        assert_eq!(tags[10], SwingTags::NONE);
    }

    #[test]
    fn tied_high_with_earlier_candle_is_not_tagged() {
        let mut candles = window_with_reds(4, green(10, 12.0, 10.0));
        candles[3] = red(3, 12.0, 9.0);
        let tags = annotate(&candles).unwrap();
        assert!(!tags[10].higher_high);
    }

    #[test]
    fn new_low_after_two_greens_is_lower_low() {
        let candles = window_with_reds(8, red(10, 10.5, 8.0));
        let tags = annotate(&candles).unwrap();
        assert!(tags[10].lower_low);
        assert!(!tags[10].higher_high);
    }

    #[test]
    fn new_low_with_one_green_is_not_tagged() {
        let candles = window_with_reds(9, red(10, 10.5, 8.0));
        let tags = annotate(&candles).unwrap();
        assert!(!tags[10].lower_low);
    }

    #[test]
    fn outside_bar_carries_both_flags() {
        let candles = window_with_reds(5, red(10, 12.0, 8.0));
        let tags = annotate(&candles).unwrap();
        assert!(tags[10].higher_high);
        assert!(tags[10].lower_low);

        let points = swing_points(&candles, &tags);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].kind, SwingKind::HigherHigh);
        assert_eq!(points[0].price, 12.0);
        assert_eq!(points[1].kind, SwingKind::LowerLow);
        assert_eq!(points[1].price, 8.0);
    }

    #[test]
    fn window_is_exactly_lookback_candles() {
        // the big high at index 0 drops out of the window for candle 11
        let mut candles = window_with_reds(3, green(10, 11.5, 10.0));
        candles[0] = red(0, 20.0, 9.0);
        candles.push(green(11, 11.8, 10.0));
        let tags = annotate(&candles).unwrap();
        assert!(!tags[10].higher_high);
        assert!(tags[11].higher_high);
    }

    #[test]
    fn decreasing_open_time_is_rejected() {
        let candles = vec![
            green(0, 11.0, 9.0),
            green(2, 11.0, 9.0),
            green(1, 11.0, 9.0),
        ];
        assert_eq!(
            annotate(&candles),
            Err(AnalysisError::InvalidSequenceOrder {
                index: 2,
                previous: 2,
                current: 1,
            })
        );
    }

    #[test]
    fn extremes_pick_highest_and_lowest_earliest_first() {
        let points = vec![
            SwingPoint { index: 10, open_time: 10, kind: SwingKind::HigherHigh, price: 5.0 },
            SwingPoint { index: 12, open_time: 12, kind: SwingKind::LowerLow, price: 1.0 },
            SwingPoint { index: 14, open_time: 14, kind: SwingKind::HigherHigh, price: 7.0 },
            SwingPoint { index: 16, open_time: 16, kind: SwingKind::HigherHigh, price: 7.0 },
            SwingPoint { index: 18, open_time: 18, kind: SwingKind::LowerLow, price: 0.5 },
        ];
        let (highest, lowest) = extremes(&points);
        assert_eq!(highest.map(|p| p.index), Some(14));
        assert_eq!(lowest.map(|p| p.index), Some(18));
        assert_eq!(extremes(&[]), (None, None));
    }
}
