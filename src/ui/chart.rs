use crate::analysis::{classify, CandleColor, SwingTags};
use crate::data::{Candle, Interval};
use chrono_tz::Tz;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const LABEL_WIDTH: u16 = 13;
const MAX_ZOOM: usize = 8;
pub const HIGHER_HIGH_MARKER: char = '▲';
pub const LOWER_LOW_MARKER: char = '▼';
const HIGHER_HIGH_COLOR: Color = Color::Blue;
const LOWER_LOW_COLOR: Color = Color::Rgb(255, 165, 0);

#[derive(Debug, Clone)]
pub struct Chart {
    pub candles: Vec<Candle>,
    pub tags: Vec<SwingTags>,
    pub symbol: String,
    pub interval: Interval,
    pub timezone: Tz,
    /// Terminal columns per candle.
    pub zoom: usize,
    /// Candles hidden to the right of the view.
    pub offset: usize,
    capacity: usize,
}

impl Chart {
    pub fn new(
        symbol: String,
        interval: Interval,
        timezone: Tz,
        candles: Vec<Candle>,
        tags: Vec<SwingTags>,
    ) -> Self {
        Self {
            candles,
            tags,
            symbol,
            interval,
            timezone,
            zoom: 1,
            offset: 0,
            capacity: 100,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 2).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 2).max(1);
    }

    pub fn pan_left(&mut self) {
        let visible = self.capacity;
        if self.offset + visible < self.candles.len() {
            let step = (visible / 4).max(1);
            self.offset = (self.offset + step).min(self.candles.len() - visible);
        }
    }

    pub fn pan_right(&mut self) {
        self.offset = self.offset.saturating_sub((self.capacity / 4).max(1));
    }

    pub fn reset_view(&mut self) {
        self.zoom = 1;
        self.offset = 0;
    }

    pub fn higher_high_count(&self) -> usize {
        self.tags.iter().filter(|t| t.higher_high).count()
    }

    pub fn lower_low_count(&self) -> usize {
        self.tags.iter().filter(|t| t.lower_low).count()
    }

    /// Index range of the candles that fit into `plot_width` columns.
    pub fn visible_range(&self, plot_width: u16) -> (usize, usize) {
        let capacity = (plot_width as usize / self.zoom).max(1);
        let end = self.candles.len().saturating_sub(self.offset);
        let start = end.saturating_sub(capacity);
        (start, end)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(area);

        let plot_width = area.width.saturating_sub(LABEL_WIDTH);
        self.capacity = (plot_width as usize / self.zoom).max(1);
        if self.offset + self.capacity > self.candles.len() {
            self.offset = self.candles.len().saturating_sub(self.capacity);
        }

        let title = format!("{} / {}", self.symbol, self.interval);
        let title_block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(title_block, vertical[0]);

        self.render_candlesticks(frame, vertical[1]);
        self.render_time_axis(frame, vertical[2]);
        self.render_volume(frame, vertical[3]);
        self.render_stats(frame, vertical[4]);
    }

    fn render_candlesticks(&self, frame: &mut Frame, area: Rect) {
        if self.candles.is_empty() {
            let empty = Paragraph::new("No candles in the requested range")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(empty, area);
            return;
        }
        if area.width < LABEL_WIDTH + 2 || area.height < 5 {
            return;
        }

        let inner = Rect {
            x: area.x + LABEL_WIDTH,
            y: area.y,
            width: area.width - LABEL_WIDTH,
            height: area.height,
        };
        let (start, end) = self.visible_range(inner.width);
        let visible = &self.candles[start..end];

        let (min_price, max_price) = visible
            .iter()
            .fold((f64::MAX, f64::MIN), |(min, max), c| {
                (min.min(c.low), max.max(c.high))
            });
        let price_range = (max_price - min_price).max(f64::MIN_POSITIVE);

        // top and bottom rows are kept free for the swing markers
        let top = inner.y + 1;
        let rows = inner.height - 2;
        let row = |price: f64| price_row(price, max_price, price_range, top, rows);

        for (idx, candle) in visible.iter().enumerate() {
            let x = inner.x + (idx * self.zoom) as u16 + (self.zoom / 2) as u16;
            let color = match classify(candle) {
                CandleColor::Green => Color::Green,
                CandleColor::Red => Color::Red,
            };
            let style = Style::default().fg(color);

            let high_y = row(candle.high);
            let low_y = row(candle.low);
            for y in high_y..=low_y {
                put(frame, inner, x, y, '│', style);
            }

            let open_y = row(candle.open);
            let close_y = row(candle.close);
            for y in open_y.min(close_y)..=open_y.max(close_y) {
                put(frame, inner, x, y, '█', style);
            }

            let tag = self.tags.get(start + idx).copied().unwrap_or_default();
            if tag.higher_high {
                let marker = Style::default()
                    .fg(HIGHER_HIGH_COLOR)
                    .add_modifier(Modifier::BOLD);
                put(frame, inner, x, high_y - 1, HIGHER_HIGH_MARKER, marker);
            }
            if tag.lower_low {
                let marker = Style::default()
                    .fg(LOWER_LOW_COLOR)
                    .add_modifier(Modifier::BOLD);
                put(frame, inner, x, low_y + 1, LOWER_LOW_MARKER, marker);
            }
        }

        let label_count = 5.min(rows as usize / 2).max(1);
        for i in 0..=label_count {
            let y = top + (i as u16) * rows.saturating_sub(1) / label_count as u16;
            let price = max_price - (i as f64 / label_count as f64) * price_range;
            let label = format!("{:>11}", format_price(price));
            frame
                .buffer_mut()
                .set_string(area.x, y, label, Style::default().fg(Color::Gray));
        }
    }

    fn render_time_axis(&self, frame: &mut Frame, area: Rect) {
        if self.candles.is_empty() || area.width <= LABEL_WIDTH || area.height == 0 {
            return;
        }

        let inner_x = area.x + LABEL_WIDTH;
        let right = area.x + area.width;
        let (start, end) = self.visible_range(area.width - LABEL_WIDTH);
        let fmt = self.interval.time_format();
        let mut next_free = inner_x;

        for (idx, candle) in self.candles[start..end].iter().enumerate() {
            let x = inner_x + (idx * self.zoom) as u16 + (self.zoom / 2) as u16;
            if x < next_free {
                continue;
            }
            let Some(dt) = candle.open_datetime() else {
                continue;
            };
            let label = dt.with_timezone(&self.timezone).format(fmt).to_string();
            let width = label.chars().count() as u16;
            if x + width > right {
                break;
            }
            frame
                .buffer_mut()
                .set_string(x, area.y, &label, Style::default().fg(Color::Gray));
            next_free = x + width + 2;
        }
    }

    fn render_volume(&self, frame: &mut Frame, area: Rect) {
        if self.candles.is_empty() || area.width <= LABEL_WIDTH || area.height < 2 {
            return;
        }

        let inner = Rect {
            x: area.x + LABEL_WIDTH,
            y: area.y,
            width: area.width - LABEL_WIDTH,
            height: area.height - 1,
        };
        let (start, end) = self.visible_range(inner.width);
        let visible = &self.candles[start..end];

        let max_volume = visible.iter().fold(0.0f64, |a, c| a.max(c.volume));
        if max_volume == 0.0 {
            return;
        }

        for (idx, candle) in visible.iter().enumerate() {
            let x = inner.x + (idx * self.zoom) as u16 + (self.zoom / 2) as u16;
            let height = ((candle.volume / max_volume) * inner.height as f64) as u16;
            for y in (inner.y + inner.height - height)..(inner.y + inner.height) {
                put(frame, inner, x, y, '▊', Style::default().fg(Color::Yellow));
            }
        }

        let label = Line::from(Span::styled(
            format!("Vol: {:.0}", max_volume),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(
            Paragraph::new(label),
            Rect {
                x: area.x,
                y: area.y,
                width: LABEL_WIDTH - 1,
                height: 1,
            },
        );
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let Some(latest) = self.candles.last() else {
            return;
        };

        let change = latest.close - latest.open;
        let change_pct = if latest.open > 0.0 {
            (change / latest.open) * 100.0
        } else {
            0.0
        };
        let change_color = match classify(latest) {
            CandleColor::Green => Color::Green,
            CandleColor::Red => Color::Red,
        };

        let stats_text = Line::from(vec![
            Span::styled("O: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}  ", format_price(latest.open)),
                Style::default().fg(Color::White),
            ),
            Span::styled("H: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}  ", format_price(latest.high)),
                Style::default().fg(Color::Green),
            ),
            Span::styled("L: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}  ", format_price(latest.low)),
                Style::default().fg(Color::Red),
            ),
            Span::styled("C: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}  ", format_price(latest.close)),
                Style::default().fg(Color::White),
            ),
            Span::styled("Chg: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:+.2}%  ", change_pct),
                Style::default().fg(change_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} HH: {}  ", HIGHER_HIGH_MARKER, self.higher_high_count()),
                Style::default().fg(HIGHER_HIGH_COLOR),
            ),
            Span::styled(
                format!("{} LL: {}", LOWER_LOW_MARKER, self.lower_low_count()),
                Style::default().fg(LOWER_LOW_COLOR),
            ),
        ]);

        let stats_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        frame.render_widget(Paragraph::new(stats_text).block(stats_block), area);
    }
}

fn put(frame: &mut Frame, area: Rect, x: u16, y: u16, ch: char, style: Style) {
    if x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height {
        frame.buffer_mut()[(x, y)].set_char(ch).set_style(style);
    }
}

/// Maps a price onto one of `rows` terminal rows starting at `top`; `max_price` is the top row.
pub fn price_row(price: f64, max_price: f64, price_range: f64, top: u16, rows: u16) -> u16 {
    let frac = ((max_price - price) / price_range).clamp(0.0, 1.0);
    top + (frac * rows.saturating_sub(1) as f64).round() as u16
}

/// Price with enough decimals to stay readable for low-priced assets.
pub fn format_price(price: f64) -> String {
    if price >= 100.0 {
        format!("{:.2}", price)
    } else if price >= 1.0 {
        format!("{:.4}", price)
    } else {
        format!("{:.6}", price)
    }
}
