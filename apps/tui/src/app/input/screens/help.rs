use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

/// F1 toggles the help overlay anywhere; `?` only on the map, where it is not typed text.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) || (key == KeyCode::Char('?') && app.screen == AppScreen::Map) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return true;
    }

    false
}
