// App module for geofence-editor
// Handles editor state, the drawing tool and key handling

pub mod draw;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, Basemap, SearchField};
