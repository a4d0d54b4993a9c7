// Configuration for geofence-editor
// Read from the environment (and .env); CLI flags are applied as env overrides first

pub mod settings;

pub use settings::{init_app_config, EditorConfig};
