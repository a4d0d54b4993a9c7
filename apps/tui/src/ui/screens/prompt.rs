use crate::app::App;
use crate::ui::widgets::popup::{fixed_rect, render_popup};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// One-line input popup shared by the id lookup and fly-to prompts.
pub fn render_prompt(app: &App, f: &mut Frame<'_>, title: &str, label: &str) {
    let area = fixed_rect(44, 6, f.area());
    let inner = render_popup(f, area, title);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(app.prompt_input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: go   Esc: back",
            Style::default().fg(Color::Gray),
        )),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
