use color_eyre::eyre::{eyre, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "info,geofence_editor=debug"
        } else {
            "info"
        })
    })
}

/// Logs to a file while the terminal UI owns stdout. Keep the guard alive
/// until exit or buffered lines are lost.
pub fn init_file_logging(path: &Path, debug: bool) -> Result<WorkerGuard> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("log file path {} has no file name", path.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))?;

    Ok(guard)
}

pub fn init_stderr_logging(debug: bool) -> Result<()> {
    fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))
}
