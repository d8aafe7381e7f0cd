//! Application configuration
//!
//! Loaded from a TOML file at `$FLEET_CONFIG` or
//! `~/.config/pedalpoint-fleet/config.toml`; a default file is written on
//! first run so operators have something to edit.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location for the config file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pedalpoint-fleet")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rental: RentalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// REST API bind host
    pub api_host: String,
    /// REST API bind port
    pub api_port: u16,
    /// Seconds to wait for in-flight work at shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// SQLite database file path
    pub path: String,
    /// Seed the demo fleet when the store is empty
    pub seed_demo: bool,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./fleet.db".to_string(),
            seed_demo: true,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret shared with the identity provider for token verification
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalConfig {
    /// How often the accrual monitor refreshes its snapshots (seconds)
    pub accrual_refresh_secs: u64,
    /// How often the overdue watch scans active rentals (seconds)
    pub overdue_check_secs: u64,
    /// Rentals running longer than this are flagged overdue.
    /// Unset disables the overdue watch entirely.
    pub max_rental_minutes: Option<i64>,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            accrual_refresh_secs: 60,
            overdue_check_secs: 300,
            max_rental_minutes: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Write this configuration out as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(parent.display().to_string(), e))?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Ok(())
    }

    /// Load from `path`, or write the defaults there when the file is
    /// missing so the first run leaves an editable config behind.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error at {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_address(), "0.0.0.0:8080");
        assert!(cfg.database.seed_demo);
        assert_eq!(cfg.rental.accrual_refresh_secs, 60);
        assert!(cfg.rental.max_rental_minutes.is_none());
        assert!(cfg.database.connection_url().starts_with("sqlite://"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_host = "127.0.0.1"
            api_port = 9090
            shutdown_timeout = 10

            [rental]
            accrual_refresh_secs = 5
            overdue_check_secs = 30
            max_rental_minutes = 480
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_address(), "127.0.0.1:9090");
        assert_eq!(cfg.rental.max_rental_minutes, Some(480));
        // Untouched sections come from Default
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("pedalpoint-config-test");
        let path = dir.join("config.toml");
        let _ = std::fs::remove_file(&path);

        let mut cfg = AppConfig::default();
        cfg.server.api_port = 9999;
        cfg.rental.max_rental_minutes = Some(600);
        cfg.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server.api_port, 9999);
        assert_eq!(loaded.rental.max_rental_minutes, Some(600));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_errors() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_, _)));
    }
}
