// UI module for geofence-editor
// The map is always drawn; forms and help are overlays on top of it

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::map::render_map(app, f);

    match app.screen {
        AppScreen::Map => {}
        AppScreen::Search => screens::search::render_search(app, f),
        AppScreen::IdPrompt => {
            screens::prompt::render_prompt(app, f, "Find record", "Record id");
        }
        AppScreen::FlyTo => {
            screens::prompt::render_prompt(app, f, "Fly to coordinates", "lat,lng");
        }
        AppScreen::Submit => screens::submit::render_submit(app, f),
    }

    if app.show_help {
        screens::help::render_help(f);
    }
}
