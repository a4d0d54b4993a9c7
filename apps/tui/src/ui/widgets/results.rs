use crate::app::App;
use geofence_editor::domain::Geometry;
use geofence_editor::session::layers::NO_PROPERTIES;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

/// First row to show so the selected row stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

pub fn render_results(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layers = app.session.store().layers();
    let block = Block::default()
        .title(format!(" Results ({}) ", layers.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if layers.is_empty() {
        let paragraph = Paragraph::new("No results\n\ns  search\ni  find by id")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    // Borders and header take three rows
    let max_visible = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(layers.len(), max_visible, app.focused_result);

    let rows = layers
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible)
        .map(|(index, layer)| {
            let (id, name) = layer.feature.properties.as_ref().map_or_else(
                || ("-".to_string(), NO_PROPERTIES.to_string()),
                |record| (record.id.to_string(), record.name.clone().unwrap_or_default()),
            );
            let kind = layer
                .feature
                .geometry
                .as_ref()
                .map_or("-", Geometry::type_name);
            let style = if index == app.focused_result {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![Cell::from(id), Cell::from(name), Cell::from(kind)]).style(style)
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["ID", "Name", "Type"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(block);

    f.render_widget(table, area);
}

/// Tooltip of the focused result, the current record and the pending shape.
pub fn render_details(app: &App, f: &mut Frame<'_>, area: Rect) {
    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(layer) = app.focused_layer() {
        lines.extend(layer.tooltip.lines().map(|line| Line::from(line.to_string())));
        lines.push(Line::from(""));
    }

    let current = app.session.selection().current().map_or_else(
        || "none".to_string(),
        |current| format!("{} {}", current.id, current.name),
    );
    lines.push(Line::from(vec![Span::styled("Current: ", label), Span::raw(current)]));

    let drawn = app.session.drawn();
    lines.push(Line::from(vec![
        Span::styled("Drawn: ", label),
        Span::raw(format!(
            "{} shape(s){}",
            drawn.shapes().len(),
            if drawn.visible() { "" } else { ", hidden" }
        )),
    ]));

    if let Some(geometry) = app.session.selection().selected_geometry() {
        lines.push(Line::from(vec![
            Span::styled("Pending: ", label),
            Span::raw(format!(
                "{} {:.3} km²",
                geometry.type_name(),
                geometry.area_km2()
            )),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
