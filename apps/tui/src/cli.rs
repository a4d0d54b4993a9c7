use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "geofence-editor",
    version,
    about = "Draw geofence polygons for store records"
)]
pub struct CliArgs {
    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// How late responses are treated: latest or arrival
    #[arg(long, value_name = "MODE")]
    pub ordering: Option<String>,

    /// Log file used while the terminal UI is running
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Run one request and print the result instead of opening the editor
    #[arg(long)]
    pub headless: bool,

    /// Print headless results as JSON
    #[arg(long)]
    pub json: bool,

    /// Look up a single record by id
    #[arg(long, value_name = "ID")]
    pub id: Option<i64>,

    #[arg(long = "store-id", value_name = "ID")]
    pub store_id: Option<i64>,

    #[arg(long = "metro-id", value_name = "ID")]
    pub metro_id: Option<i64>,

    #[arg(long = "zone-id", value_name = "ID")]
    pub zone_id: Option<i64>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    /// Submit a polygon for this record id (needs --geometry)
    #[arg(long, value_name = "ID", requires = "geometry")]
    pub submit: Option<i64>,

    /// GeoJSON geometry file to submit
    #[arg(long, value_name = "FILE")]
    pub geometry: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(server) = &self.server {
            std::env::set_var("GEOFENCE_SERVER_URL", server);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("GEOFENCE_REQUEST_TIMEOUT_SECS", timeout.to_string());
        }
        if let Some(ordering) = &self.ordering {
            std::env::set_var("GEOFENCE_RESPONSE_ORDERING", ordering);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("GEOFENCE_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// True when any search filter flag was given.
    pub const fn has_filters(&self) -> bool {
        self.store_id.is_some()
            || self.metro_id.is_some()
            || self.zone_id.is_some()
            || self.city.is_some()
            || self.state.is_some()
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
