use crate::app::input::helpers::{edit_text, wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, SearchField};
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    let fields = SearchField::ALL.len();
    match key {
        KeyCode::Esc => {
            app.screen = AppScreen::Map;
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.search.field_index = wrap_decrement(app.search.field_index, fields);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.search.field_index = wrap_increment(app.search.field_index, fields);
        }
        KeyCode::Enter => match app.search.to_filters() {
            Ok(filters) => {
                let ticket = app.session.find(filters);
                app.queue(ticket, "Searching...");
                app.screen = AppScreen::Map;
            }
            Err(e) => app.set_error(e),
        },
        other => {
            edit_text(app.search.focused_value_mut(), other, |c| !c.is_control());
        }
    }
}
