use crate::app::draw::DrawState;
use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

fn key_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.draw.state() {
        DrawState::Drawing { .. } => vec![
            ("Space", "vertex"),
            ("Bksp", "undo"),
            ("Arrows", "pan"),
            ("Enter", "finish"),
            ("Esc", "cancel"),
        ],
        DrawState::Editing { .. } => vec![
            ("Arrows", "move"),
            ("Enter", "keep"),
            ("Esc", "cancel"),
        ],
        DrawState::Idle => vec![
            ("s", "search"),
            ("i", "id"),
            ("n/p", "next/prev"),
            ("Tab", "focus"),
            ("Enter", "select"),
            ("d", "draw"),
            ("e", "edit"),
            ("x", "delete"),
            ("g", "fly to"),
            ("F1", "help"),
            ("q", "quit"),
        ],
    }
}

/// Spinner, last notification and key hints.
pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(0)])
        .split(rows[0]);

    if app.in_flight() > 0 {
        let throbber = Throbber::default()
            .label(format!("{} pending", app.in_flight()))
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        let mut state = app.throbber_state.clone();
        f.render_stateful_widget(throbber, top[0], &mut state);
    } else {
        f.render_widget(
            Paragraph::new("idle").style(Style::default().fg(Color::DarkGray)),
            top[0],
        );
    }

    let message_style = if app.status_is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    f.render_widget(
        Paragraph::new(Span::styled(app.status_message.as_str(), message_style)),
        top[1],
    );

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hints: Vec<Span<'_>> = key_hints(app)
        .into_iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(key, key_style),
                Span::raw(format!(": {action}  ")),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(hints)), rows[1]);
}
