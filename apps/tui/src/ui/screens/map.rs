use crate::app::App;
use crate::ui::widgets::{map_canvas, results, status};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

const SIDE_PANEL_WIDTH: u16 = 40;

pub fn render_map(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[1]);

    map_canvas::render_map_canvas(app, f, body[0]);
    results::render_results(app, f, side[0]);
    results::render_details(app, f, side[1]);
    status::render_status(app, f, chunks[1]);
}
