use crate::ui::widgets::popup::{centered_rect, render_popup};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

const KEYS: &[(&str, &str)] = &[
    ("Arrows", "Pan the map (move the shape while editing)"),
    ("+ / -", "Zoom in / out"),
    ("s", "Search by store, metro, zone, city or state"),
    ("i", "Find a record by id"),
    ("n / p", "Next / previous record"),
    ("Tab / Shift+Tab", "Focus the next / previous result"),
    ("Enter", "Select the focused result"),
    ("g", "Fly to lat,lng and drop a marker"),
    ("d", "Draw a polygon at the crosshair"),
    ("e", "Edit (move) the focused drawn shape"),
    ("o / f", "Cycle drawn shapes / reopen the save form"),
    ("x", "Delete the focused drawn shape"),
    ("v", "Show or hide drawn shapes"),
    ("b", "Switch basemap detail"),
    ("F1 / ?", "Toggle this help"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 70, f.area());
    let inner = render_popup(f, area, "Help");

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line<'_>> = KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<16}"), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
