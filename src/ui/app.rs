use crate::ui::{Chart, StatusBar};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::io;
use std::time::Duration;

/// Takes over the terminal and shows the chart until the user quits.
pub fn run(mut chart: Chart, statusbar: StatusBar) -> io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, &mut chart, &statusbar);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    chart: &mut Chart,
    statusbar: &StatusBar,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, chart, statusbar))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(chart, key.code) {
                    return Ok(());
                }
            }
        }
    }
}

pub fn draw(frame: &mut Frame, chart: &mut Chart, statusbar: &StatusBar) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(frame.area());

    chart.render(frame, chunks[0]);
    statusbar.render(frame, chunks[1]);
}

/// Applies one key press; returns `false` when the user asked to quit.
pub fn handle_key(chart: &mut Chart, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
        KeyCode::Char('+') | KeyCode::Char('=') => chart.zoom_in(),
        KeyCode::Char('-') => chart.zoom_out(),
        KeyCode::Left | KeyCode::Char('h') => chart.pan_left(),
        KeyCode::Right | KeyCode::Char('l') => chart.pan_right(),
        KeyCode::Char('0') | KeyCode::Home => chart.reset_view(),
        _ => {}
    }
    true
}
