use crate::app::{App, SearchField};
use crate::ui::widgets::popup::{fixed_rect, render_popup};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_search(app: &App, f: &mut Frame<'_>) {
    let area = fixed_rect(50, 11, f.area());
    let inner = render_popup(f, area, "Search records");

    let focused = app.search.field();
    let mut lines: Vec<Line<'_>> = SearchField::ALL
        .iter()
        .map(|field| {
            let is_focused = *field == focused;
            let style = if is_focused {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if is_focused { ">" } else { " " };
            let value = app.search.value(*field);
            let shown = if value.is_empty() && field.numeric() {
                "any"
            } else {
                value
            };
            Line::from(vec![
                Span::styled(format!("{prefix} {:<9}", field.label()), style),
                Span::raw(" "),
                Span::styled(shown.to_string(), style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab/↑↓: field   Enter: search   Esc: back",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}
