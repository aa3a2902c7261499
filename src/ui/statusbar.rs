use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub struct StatusBar {
    pub candle_count: usize,
    pub range: String,
    pub timezone: String,
}

impl StatusBar {
    pub fn new(candle_count: usize, range: String, timezone: String) -> Self {
        Self {
            candle_count,
            range,
            timezone,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let loaded = self.candle_count > 0;
        let status_color = if loaded { Color::Green } else { Color::Red };
        let status_text = if loaded { "●" } else { "○" };

        let text = Line::from(vec![
            Span::styled(format!("{} ", status_text), Style::default().fg(status_color)),
            Span::styled(
                format!("{} candles", self.candle_count),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("{} ({})", self.range, self.timezone),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(" | "),
            Span::styled("Q", Style::default().fg(Color::Yellow)),
            Span::raw(":Quit "),
            Span::styled("+/-", Style::default().fg(Color::Yellow)),
            Span::raw(":Zoom "),
            Span::styled("←→", Style::default().fg(Color::Yellow)),
            Span::raw(":Pan "),
            Span::styled("0", Style::default().fg(Color::Yellow)),
            Span::raw(":Reset"),
        ]);

        let para = Paragraph::new(text).block(Block::default());
        frame.render_widget(para, area);
    }
}
