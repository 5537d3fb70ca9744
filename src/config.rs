use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Clinic";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_DATABASE_PATH: &str = "data/medical.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,clinic_lib=debug"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Startup configuration, resolved once in `main` and handed to the
/// application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Insert the demo dataset when the store is empty.
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Read `CLINIC_DATABASE`, `CLINIC_BIND` and `CLINIC_SEED_DEMO`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = lookup("CLINIC_DATABASE").filter(|p| !p.is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(addr) = lookup("CLINIC_BIND") {
            config.bind_addr = addr.parse().map_err(|_| ConfigError::InvalidValue {
                var: "CLINIC_BIND",
                value: addr.clone(),
            })?;
        }

        if let Some(flag) = lookup("CLINIC_SEED_DEMO") {
            config.seed_demo_data = parse_flag(&flag).ok_or(ConfigError::InvalidValue {
                var: "CLINIC_SEED_DEMO",
                value: flag.clone(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database_path, PathBuf::from("data/medical.db"));
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CLINIC_DATABASE", "/tmp/clinic.db"),
            ("CLINIC_BIND", "0.0.0.0:8080"),
            ("CLINIC_SEED_DEMO", "false"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/clinic.db"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn invalid_bind_address_rejected() {
        let err = Config::from_lookup(lookup_from(&[("CLINIC_BIND", "localhost")])).unwrap_err();
        assert!(err.to_string().contains("CLINIC_BIND"));
    }

    #[test]
    fn invalid_seed_flag_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("CLINIC_SEED_DEMO", "maybe")])).is_err());
    }

    #[test]
    fn app_name_is_clinic() {
        assert_eq!(APP_NAME, "Clinic");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
