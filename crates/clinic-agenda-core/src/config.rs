//! Dashboard configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alerts::AlertPolicy;
use crate::db::{Database, DbError};
use crate::store::{RecordStore, UnconfiguredStore};

/// Application-level constants
pub const APP_NAME: &str = "Clinic Agenda";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the SQLite database file.
pub const ENV_DATABASE_PATH: &str = "CLINIC_AGENDA_DB";
/// Environment variable overriding the log filter.
pub const ENV_LOG_FILTER: &str = "CLINIC_AGENDA_LOG";
/// Environment variable overriding the high-utilization alert threshold (0–1).
pub const ENV_ALERT_THRESHOLD: &str = "CLINIC_AGENDA_ALERT_THRESHOLD";

/// Default `tracing` filter when neither `RUST_LOG` nor the config sets one.
pub fn default_log_filter() -> String {
    "clinic_agenda_core=info".to_string()
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Clinic name shown in headers
    pub clinic_name: String,
    /// SQLite file backing the record store; `None` leaves the store unconfigured
    pub database_path: Option<PathBuf>,
    /// Capacity alert tunables
    pub alert_policy: AlertPolicy,
    /// `tracing` env-filter directive
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            clinic_name: APP_NAME.to_string(),
            database_path: None,
            alert_policy: AlertPolicy::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(raw) = lookup(ENV_ALERT_THRESHOLD) {
            let threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| (0.0..=1.0).contains(t))
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_ALERT_THRESHOLD,
                    value: raw.clone(),
                })?;
            config.alert_policy.utilization_threshold = threshold;
        }

        Ok(config)
    }

    /// Open the configured record store.
    ///
    /// Without a database path this returns an [`UnconfiguredStore`], whose
    /// every call fails with `NotConfigured`.
    pub fn open_store(&self) -> Result<Box<dyn RecordStore + Send>, DbError> {
        match &self.database_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Opening clinic record store");
                Ok(Box::new(Database::open(path)?))
            }
            None => {
                tracing::warn!(
                    "{} not set; record store is unconfigured and will return no data",
                    ENV_DATABASE_PATH
                );
                Ok(Box::new(UnconfiguredStore))
            }
        }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(config.database_path.is_none());
        assert_eq!(config.alert_policy.utilization_threshold, 0.8);
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_PATH, "/tmp/agenda.db"),
            (ENV_LOG_FILTER, "debug"),
            (ENV_ALERT_THRESHOLD, "0.9"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/agenda.db")));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.alert_policy.utilization_threshold, 0.9);
    }

    #[test]
    fn test_blank_path_stays_unconfigured() {
        let config = DashboardConfig::from_lookup(lookup_from(&[(ENV_DATABASE_PATH, "  ")])).unwrap();
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_invalid_threshold() {
        for raw in ["abc", "1.5", "-0.1"] {
            let result = DashboardConfig::from_lookup(lookup_from(&[(ENV_ALERT_THRESHOLD, raw)]));
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })), "{}", raw);
        }
    }

    #[test]
    fn test_open_store_without_path_is_unconfigured() {
        let store = DashboardConfig::default().open_store().unwrap();
        assert!(store.fetch_tasks().is_err());
    }

    #[test]
    fn test_open_store_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            database_path: Some(dir.path().join("agenda.db")),
            ..Default::default()
        };

        let store = config.open_store().unwrap();
        assert!(store.fetch_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
