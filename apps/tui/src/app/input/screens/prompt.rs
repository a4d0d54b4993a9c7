use crate::app::input::helpers::edit_text;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use geofence_editor::domain::parse_form_int;

pub fn handle_id_prompt_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.screen = AppScreen::Map;
        }
        KeyCode::Enter => {
            if app.prompt_input.trim().is_empty() {
                app.set_status("Enter a record id");
                return;
            }
            match parse_form_int("id", &app.prompt_input) {
                Ok(id) => {
                    let ticket = app.session.find_by_id(id);
                    app.queue(ticket, format!("Loading record {id}..."));
                    app.screen = AppScreen::Map;
                }
                Err(e) => app.set_error(e),
            }
        }
        other => {
            edit_text(&mut app.prompt_input, other, |c| !c.is_control());
        }
    }
}

pub fn handle_fly_to_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.screen = AppScreen::Map;
        }
        KeyCode::Enter => match app.session.fly_to(&app.prompt_input) {
            Ok(target) => {
                app.screen = AppScreen::Map;
                app.set_status(format!("Marker at {:.5}, {:.5}", target.lat, target.lng));
            }
            Err(e) => app.set_error(e),
        },
        other => {
            edit_text(&mut app.prompt_input, other, |c| !c.is_control());
        }
    }
}
