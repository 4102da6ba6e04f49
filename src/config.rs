//! Configuration for the service.
//!
//! Values come from an optional TOML file overlaid by environment variables;
//! the environment always wins. A missing file yields `Config::default()`.
//! Absent datastore values do not stop the service from starting: the update
//! endpoint reports missing configuration per-request instead.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Default port the HTTP surface listens on.
const DEFAULT_PORT: u16 = 3000;

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
///
/// Custom `Debug` impl masks both datastore keys to prevent secret leakage in
/// logs, error messages, and debug output.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosted datastore (e.g. `https://xyz.supabase.co`).
    pub supabase_url: Option<String>,

    /// Privileged service-role key. Grants write access; server-side only.
    pub service_role_key: Option<String>,

    /// Public anonymous key used for read-only listing queries.
    pub anon_key: Option<String>,

    /// Port the HTTP surface listens on.
    pub listen_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: None,
            service_role_key: None,
            anon_key: None,
            listen_port: DEFAULT_PORT,
        }
    }
}

/// Mask credentials in Debug output to prevent secret leakage.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("anon_key", &self.anon_key.as_ref().map(|_| "[REDACTED]"))
            .field("listen_port", &self.listen_port)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "supabase_url",
                "service_role_key",
                "anon_key",
                "listen_port",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), port = config.listen_port, "Loaded configuration");
        Ok(config)
    }

    /// Overlay environment variables on top of the file-derived values.
    ///
    /// `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY` and `SUPABASE_ANON_KEY`
    /// keep the names the hosted backend documents; `POLICYHUB_PORT` controls
    /// the listen port. A set variable always wins over the config file.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var("SUPABASE_URL") {
            self.supabase_url = Some(url);
        }
        if let Ok(key) = std::env::var("SUPABASE_SERVICE_ROLE_KEY") {
            self.service_role_key = Some(key);
        }
        if let Ok(key) = std::env::var("SUPABASE_ANON_KEY") {
            self.anon_key = Some(key);
        }
        if let Ok(port) = std::env::var("POLICYHUB_PORT") {
            match port.parse() {
                Ok(p) => self.listen_port = p,
                Err(_) => {
                    tracing::warn!(value = %port, "Invalid POLICYHUB_PORT, keeping configured port")
                }
            }
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
