use crate::app::draw::{DrawInput, DrawState};
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use geofence_editor::session::layers::NO_PROPERTIES;
use geofence_editor::session::ShapeId;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    if !app.draw.is_idle() {
        handle_draw_input(app, key);
        return;
    }

    if handle_viewport_keys(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('s') => {
            app.screen = AppScreen::Search;
        }
        KeyCode::Char('i') => {
            app.prompt_input.clear();
            app.screen = AppScreen::IdPrompt;
        }
        KeyCode::Char('g') => {
            app.prompt_input.clear();
            app.screen = AppScreen::FlyTo;
        }
        KeyCode::Char('n') => {
            let ticket = app.session.next();
            app.queue(ticket, "Loading next record...");
        }
        KeyCode::Char('p') => {
            let ticket = app.session.prev();
            app.queue(ticket, "Loading previous record...");
        }
        KeyCode::Tab => {
            app.focused_result = wrap_increment(app.focused_result, app.session.store().len());
        }
        KeyCode::BackTab => {
            app.focused_result = wrap_decrement(app.focused_result, app.session.store().len());
        }
        KeyCode::Enter => click_focused_result(app),
        KeyCode::Char('d') => match app.draw.process(DrawInput::Start) {
            Ok(_) => app.set_status(
                "Drawing: Space adds a vertex at the crosshair, Enter finishes, Esc cancels",
            ),
            Err(e) => app.set_error(e),
        },
        KeyCode::Char('e') => start_editing(app),
        KeyCode::Char('o') => {
            app.focused_shape = wrap_increment(app.focused_shape, app.session.drawn().shapes().len());
            open_focused_shape(app);
        }
        KeyCode::Char('f') => open_focused_shape(app),
        KeyCode::Char('x') => remove_focused_shape(app),
        KeyCode::Char('b') => {
            app.basemap = app.basemap.toggle();
            app.set_status(format!("Basemap: {}", app.basemap.label()));
        }
        KeyCode::Char('v') => {
            let visible = app.session.drawn_mut().toggle_visible();
            app.set_status(if visible {
                "Drawn shapes shown"
            } else {
                "Drawn shapes hidden"
            });
        }
        _ => {}
    }
}

/// Pan and zoom keys shared by browsing and drawing.
fn handle_viewport_keys(app: &mut App, key: KeyCode) -> bool {
    let viewport = app.session.viewport_mut();
    match key {
        KeyCode::Up => viewport.pan(1, 0),
        KeyCode::Down => viewport.pan(-1, 0),
        KeyCode::Left => viewport.pan(0, -1),
        KeyCode::Right => viewport.pan(0, 1),
        KeyCode::Char('+' | '=') => viewport.zoom_in(),
        KeyCode::Char('-') => viewport.zoom_out(),
        _ => return false,
    }
    true
}

fn click_focused_result(app: &mut App) {
    let Some(layer) = app.focused_layer().map(|layer| layer.id) else {
        app.set_status("No results to select");
        return;
    };
    match app.session.click(layer) {
        Some(id) => app.set_status(format!("Selected record {id}")),
        None => app.set_status(NO_PROPERTIES),
    }
}

fn focused_shape(app: &App) -> Option<ShapeId> {
    app.session
        .drawn()
        .shapes()
        .get(app.focused_shape)
        .map(|shape| shape.id)
}

fn open_focused_shape(app: &mut App) {
    match focused_shape(app) {
        Some(shape) if app.session.click_drawn(shape) => app.screen = AppScreen::Submit,
        _ => app.set_status("Nothing drawn yet, press d to draw"),
    }
}

fn remove_focused_shape(app: &mut App) {
    let Some(shape) = focused_shape(app) else {
        app.set_status("Nothing drawn yet, press d to draw");
        return;
    };
    if app.session.remove_drawn(shape) {
        let remaining = app.session.drawn().shapes().len();
        app.focused_shape = app.focused_shape.min(remaining.saturating_sub(1));
        app.set_status(format!("Shape removed, {remaining} left"));
    }
}

fn start_editing(app: &mut App) {
    let Some(shape) = app.session.drawn().shapes().get(app.focused_shape).cloned() else {
        app.set_status("Nothing drawn yet, press d to draw");
        return;
    };
    match app.draw.process(DrawInput::Edit {
        shape: shape.id,
        geometry: shape.geometry,
    }) {
        Ok(_) => app.set_status("Editing: arrows move the shape, Enter keeps it, Esc cancels"),
        Err(e) => app.set_error(e),
    }
}

fn handle_draw_input(app: &mut App, key: KeyCode) {
    let editing = matches!(app.draw.state(), DrawState::Editing { .. });
    let (step_lat, step_lng) = app.move_step();

    let input = match key {
        KeyCode::Esc => DrawInput::Cancel,
        KeyCode::Enter => DrawInput::Finish,
        KeyCode::Char(' ') if !editing => DrawInput::Vertex(app.cursor()),
        KeyCode::Backspace if !editing => DrawInput::Undo,
        KeyCode::Up if editing => DrawInput::Move {
            d_lat: step_lat,
            d_lng: 0.0,
        },
        KeyCode::Down if editing => DrawInput::Move {
            d_lat: -step_lat,
            d_lng: 0.0,
        },
        KeyCode::Left if editing => DrawInput::Move {
            d_lat: 0.0,
            d_lng: -step_lng,
        },
        KeyCode::Right if editing => DrawInput::Move {
            d_lat: 0.0,
            d_lng: step_lng,
        },
        other => {
            handle_viewport_keys(app, other);
            return;
        }
    };

    let cancelled = input == DrawInput::Cancel;
    match app.draw.process(input) {
        Ok(Some(event)) => {
            let shape = app.session.on_draw(event);
            if let Some(index) = app
                .session
                .drawn()
                .shapes()
                .iter()
                .position(|drawn| drawn.id == shape)
            {
                app.focused_shape = index;
            }
            app.screen = AppScreen::Submit;
            app.set_status("Shape ready, enter the record id to save it");
        }
        Ok(None) if cancelled => app.set_status("Drawing cancelled"),
        Ok(None) => {}
        Err(e) => app.set_error(e),
    }
}
