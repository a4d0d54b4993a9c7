use crate::session::ResponseOrdering;
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const SERVER_URL_VAR: &str = "GEOFENCE_SERVER_URL";
pub const TIMEOUT_VAR: &str = "GEOFENCE_REQUEST_TIMEOUT_SECS";
pub const ORDERING_VAR: &str = "GEOFENCE_RESPONSE_ORDERING";
pub const LOG_FILE_VAR: &str = "GEOFENCE_LOG_FILE";
pub const DEBUG_VAR: &str = "DEBUG";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "geofence-editor.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub server_url: String,
    /// `None` disables the per-request timeout.
    pub request_timeout: Option<Duration>,
    pub ordering: ResponseOrdering,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            ordering: ResponseOrdering::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl EditorConfig {
    /// Builds the configuration from any variable lookup. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let request_timeout = match var(TIMEOUT_VAR) {
            None => defaults.request_timeout,
            Some(value) => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| eyre!("{TIMEOUT_VAR} must be a whole number of seconds, got {value:?}"))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let ordering = match var(ORDERING_VAR) {
            None => defaults.ordering,
            Some(value) => ResponseOrdering::parse(&value)
                .ok_or_else(|| eyre!("{ORDERING_VAR} must be \"latest\" or \"arrival\", got {value:?}"))?,
        };

        Ok(Self {
            server_url: var(SERVER_URL_VAR).unwrap_or(defaults.server_url),
            request_timeout,
            ordering,
            log_file: var(LOG_FILE_VAR).map_or(defaults.log_file, PathBuf::from),
            debug: var(DEBUG_VAR).is_some_and(|value| value != "0" && value != "false"),
        })
    }
}

/// Loads `.env` and reads the configuration from the process environment.
pub fn init_app_config() -> Result<EditorConfig> {
    dotenv().ok();
    EditorConfig::from_lookup(|key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() -> Result<()> {
        assert_eq!(EditorConfig::from_lookup(lookup(&[]))?, EditorConfig::default());
        Ok(())
    }

    #[test]
    fn reads_every_variable() -> Result<()> {
        let config = EditorConfig::from_lookup(lookup(&[
            (SERVER_URL_VAR, "https://fences.example.com/api"),
            (TIMEOUT_VAR, "5"),
            (ORDERING_VAR, "arrival"),
            (LOG_FILE_VAR, "/tmp/editor.log"),
            (DEBUG_VAR, "1"),
        ]))?;

        assert_eq!(
            config,
            EditorConfig {
                server_url: "https://fences.example.com/api".to_string(),
                request_timeout: Some(Duration::from_secs(5)),
                ordering: ResponseOrdering::Arrival,
                log_file: PathBuf::from("/tmp/editor.log"),
                debug: true,
            }
        );
        Ok(())
    }

    #[test]
    fn zero_timeout_disables_it() -> Result<()> {
        let config = EditorConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")]))?;
        assert_eq!(config.request_timeout, None);
        Ok(())
    }

    #[test]
    fn blank_values_fall_back() -> Result<()> {
        let config = EditorConfig::from_lookup(lookup(&[(SERVER_URL_VAR, "  "), (DEBUG_VAR, "0")]))?;
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        assert!(EditorConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
        assert!(EditorConfig::from_lookup(lookup(&[(ORDERING_VAR, "random")])).is_err());
    }
}
