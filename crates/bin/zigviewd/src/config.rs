//! Configuration loading — environment variables with validated defaults.
//!
//! Every setting has a usable default so a bare `zigviewd` points at the
//! standard deCONZ database location. There is no config file; the viewer is
//! configured the way the database owner (deCONZ itself) is: environment
//! only. Values are resolved once at startup and never mutated afterwards.

use std::path::PathBuf;

/// Process-wide settings, immutable after load.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the deCONZ `SQLite` database.
    pub db_path: PathBuf,
    /// Extra startup diagnostics when set.
    pub debug: bool,
    /// Address the HTTP listener binds to.
    pub host: String,
    /// First port probed at startup (inclusive).
    pub port_start: u16,
    /// Last port probed at startup (inclusive).
    pub port_end: u16,
    /// Row limit handed to the store queries.
    pub max_devices: u32,
    /// Device cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Tracing filter directive (`RUST_LOG` syntax).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        let db_path = std::env::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local/share/deCONZ/zll.db");
        Self {
            db_path,
            debug: false,
            host: "0.0.0.0".to_string(),
            port_start: 8500,
            port_end: 8600,
            max_devices: 50,
            cache_ttl_secs: 300,
            log_filter: "zigviewd=info,zigview=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Apply overrides from a variable lookup. Unparseable numeric values
    /// keep the default and log a warning rather than aborting startup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ZIGVIEW_DB_PATH") {
            self.db_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("ZIGVIEW_DEBUG") {
            self.debug = matches!(val.to_lowercase().as_str(), "1" | "true");
        }
        if let Some(val) = lookup("ZIGVIEW_HOST") {
            self.host = val;
        }
        Self::parse_into(&mut self.port_start, "ZIGVIEW_PORT_START", &lookup);
        Self::parse_into(&mut self.port_end, "ZIGVIEW_PORT_END", &lookup);
        Self::parse_into(&mut self.max_devices, "ZIGVIEW_MAX_DEVICES", &lookup);
        Self::parse_into(&mut self.cache_ttl_secs, "ZIGVIEW_CACHE_TTL", &lookup);
        if let Some(val) = lookup("ZIGVIEW_LOG") {
            self.log_filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.log_filter = val;
        }
    }

    fn parse_into<T: std::str::FromStr>(
        slot: &mut T,
        name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(val) = lookup(name) {
            match val.parse() {
                Ok(parsed) => *slot = parsed,
                Err(_) => tracing::warn!(name, value = %val, "ignoring unparseable setting"),
            }
        }
    }

    /// Check the settings that make startup impossible.
    ///
    /// A missing database file is deliberately *not* an error here — the
    /// viewer starts in degraded mode and every read reports the failure.
    /// Use [`Config::database_warning`] for that case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] with one human-readable message
    /// per violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.db_path.exists() && !self.db_path.is_file() {
            errors.push(format!(
                "Database path is not a file: {}",
                self.db_path.display()
            ));
        }
        if self.port_start >= self.port_end {
            errors.push("ZIGVIEW_PORT_START must be less than ZIGVIEW_PORT_END".to_string());
        }
        if self.max_devices == 0 {
            errors.push("ZIGVIEW_MAX_DEVICES must be a positive integer".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Non-fatal degraded-mode warning for a missing database file.
    #[must_use]
    pub fn database_warning(&self) -> Option<String> {
        if self.db_path.exists() {
            None
        } else {
            Some(format!(
                "Database file not found: {} — starting with limited functionality",
                self.db_path.display()
            ))
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One message per violated setting.
    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}
