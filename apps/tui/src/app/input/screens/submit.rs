use crate::app::input::helpers::edit_text;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_submit_input(app: &mut App, key: KeyCode) {
    let Some(form) = app.session.form_mut() else {
        app.screen = AppScreen::Map;
        return;
    };

    match key {
        KeyCode::Esc => {
            app.session.close_form();
            app.screen = AppScreen::Map;
        }
        KeyCode::Enter => {
            let id_input = form.id_input.clone();
            match app.session.submit_polygon(&id_input) {
                Ok(ticket) => {
                    let message = format!("Saving polygon for record {}...", id_input.trim());
                    app.queue(ticket, message);
                }
                Err(e) => app.set_error(e),
            }
        }
        other => {
            edit_text(&mut form.id_input, other, |c| !c.is_control());
        }
    }
}
