use crate::app::{App, Basemap};
use geofence_editor::domain::Geometry;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Half-length of the crosshair arms as a fraction of the visible span.
const CROSSHAIR: f64 = 0.02;

const fn resolution(basemap: Basemap) -> MapResolution {
    match basemap {
        Basemap::Low => MapResolution::Low,
        Basemap::High => MapResolution::High,
    }
}

fn draw_geometry(ctx: &mut Context<'_>, geometry: &Geometry, color: Color) {
    for path in geometry.paths() {
        for segment in path.windows(2) {
            ctx.draw(&CanvasLine {
                x1: segment[0][0],
                y1: segment[0][1],
                x2: segment[1][0],
                y2: segment[1][1],
                color,
            });
        }
    }

    if matches!(
        geometry,
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::LineString(_)
    ) {
        let coords: Vec<(f64, f64)> = geometry
            .positions()
            .iter()
            .map(|position| (position[0], position[1]))
            .collect();
        ctx.draw(&Points {
            coords: &coords,
            color,
        });
    }
}

/// World outline, results, drawn shapes, the fly-to marker and the crosshair.
pub fn render_map_canvas(app: &App, f: &mut Frame<'_>, area: Rect) {
    let viewport = app.session.viewport();
    let center = viewport.center();
    let (lat_span, lng_span) = viewport.span();
    let ([west, east], [south, north]) = viewport.bounds();

    let title = format!(
        " Map  {:.4}, {:.4}  zoom {}  [{}] ",
        center.lat,
        center.lng,
        viewport.zoom(),
        app.basemap.label()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([west, east])
        .y_bounds([south, north])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: resolution(app.basemap),
            });
            ctx.layer();

            for (index, layer) in app.session.store().layers().iter().enumerate() {
                let color = if index == app.focused_result {
                    Color::Yellow
                } else if layer.clickable {
                    Color::Cyan
                } else {
                    Color::Gray
                };
                if let Some(geometry) = &layer.feature.geometry {
                    draw_geometry(ctx, geometry, color);
                }
            }

            if app.session.drawn().visible() {
                let editing = app.draw.editing();
                for (index, shape) in app.session.drawn().shapes().iter().enumerate() {
                    if Some(shape.id) == editing {
                        continue;
                    }
                    let color = if index == app.focused_shape {
                        Color::LightGreen
                    } else {
                        Color::Green
                    };
                    draw_geometry(ctx, &shape.geometry, color);
                    // numbered like the o/e/x keys count them
                    if let Some(label) = shape.geometry.centroid() {
                        ctx.print(
                            label.lng,
                            label.lat,
                            Span::styled(format!("#{}", index + 1), Style::default().fg(color)),
                        );
                    }
                }
            }

            if let Some(preview) = app.draw.preview() {
                draw_geometry(ctx, &preview, Color::Magenta);
            }

            if let Some(marker) = app.session.selection().marker() {
                ctx.print(
                    marker.lng,
                    marker.lat,
                    Span::styled("✕", Style::default().fg(Color::Red)),
                );
            }

            ctx.draw(&CanvasLine {
                x1: center.lng - lng_span * CROSSHAIR,
                y1: center.lat,
                x2: center.lng + lng_span * CROSSHAIR,
                y2: center.lat,
                color: Color::White,
            });
            ctx.draw(&CanvasLine {
                x1: center.lng,
                y1: center.lat - lat_span * CROSSHAIR * 2.0,
                x2: center.lng,
                y2: center.lat + lat_span * CROSSHAIR * 2.0,
                color: Color::White,
            });
        });

    f.render_widget(canvas, area);
}
