mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use geofence_editor::api::HttpTransport;
use geofence_editor::config::init_app_config;
use geofence_editor::session::{Dispatcher, Session};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let cli = CliArgs::parse();
    cli.apply_env_overrides();
    let config = init_app_config()?;

    // Without a terminal there is nothing to draw on
    if cli.headless || !is_terminal() {
        logging::init_stderr_logging(config.debug)?;
        return event::run_headless(&cli, &config).await;
    }

    let _log_guard = logging::init_file_logging(&config.log_file, config.debug)?;
    info!(
        server = %config.server_url,
        ordering = config.ordering.as_str(),
        "starting editor"
    );

    let transport = HttpTransport::new(&config.server_url, config.request_timeout)?;
    let (dispatcher, completions) = Dispatcher::new(transport);
    let mut app = App::new(Session::new(config.ordering), config.server_url.clone());

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &dispatcher, completions).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
