//! Credential loading and runtime settings

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding the Groq API key
pub const CREDENTIAL_ENV: &str = "GROQ_API_KEY";

/// An API key. Read once at startup and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Load a credential from the environment, reading `.env` first if present.
pub fn load_credential(name: &str) -> Result<Credential> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env"),
    }
    load_credential_with(name, |key| std::env::var(key).ok())
}

/// Same as [`load_credential`] against an arbitrary lookup.
pub fn load_credential_with<F>(name: &str, lookup: F) -> Result<Credential>
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(Credential(value)),
        _ => Err(Error::Configuration(format!(
            "API key no encontrada en el archivo .env. ({} not set)",
            name
        ))),
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Directory for JSON log files; no file logging when unset
    pub log_dir: Option<PathBuf>,

    /// Debug-level console logging
    pub verbose: bool,
}

impl TelemetryConfig {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }
}
