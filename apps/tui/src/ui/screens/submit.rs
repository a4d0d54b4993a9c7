use crate::app::App;
use crate::ui::widgets::popup::{fixed_rect, render_popup};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_submit(app: &App, f: &mut Frame<'_>) {
    let Some(form) = app.session.form() else {
        return;
    };

    let area = fixed_rect(50, 10, f.area());
    let inner = render_popup(f, area, "Save polygon");
    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Record id: ", label),
            Span::styled(
                form.id_input.as_str(),
                Style::default().fg(Color::White).bg(Color::Blue),
            ),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(vec![
            Span::styled("Name:      ", label),
            Span::raw(if form.name.is_empty() { "-" } else { form.name.as_str() }),
        ]),
    ];

    if let Some(geometry) = app.session.selection().selected_geometry() {
        lines.push(Line::from(vec![
            Span::styled("Shape:     ", label),
            Span::raw(format!(
                "{}, {} vertices",
                geometry.type_name(),
                geometry.positions().len()
            )),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Area:      ", label),
            Span::raw(format!("{:.3} km²", geometry.area_km2())),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: save   Esc: close",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}
