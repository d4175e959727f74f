//! Configuration loading and validation
//!
//! Settings come from the environment. A defective catalog or threshold is a
//! configuration error and is reported at startup rather than at selection
//! time.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::alerts::DEFAULT_RISK_THRESHOLD;
use crate::catalog::RecommendationCatalog;
use crate::error::{AppError, AppResult};

pub const DATABASE_URL_VAR: &str = "AGENDA_DATABASE_URL";
pub const RISK_THRESHOLD_VAR: &str = "AGENDA_RISK_THRESHOLD";
pub const CATALOG_VAR: &str = "AGENDA_CATALOG";

/// Cluster ids the prediction service can assign.
pub const KNOWN_CLUSTERS: std::ops::RangeInclusive<i64> = 0..=3;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    /// Risk scores strictly above this raise an alert.
    pub risk_threshold: f64,
    /// JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var(DATABASE_URL_VAR) {
            if !url.trim().is_empty() {
                config.database_url = url;
            }
        }

        if let Ok(raw) = env::var(RISK_THRESHOLD_VAR) {
            config.risk_threshold = raw.trim().parse().map_err(|_| {
                AppError::config(format!("{} must be a number, got '{}'", RISK_THRESHOLD_VAR, raw))
            })?;
        }

        if let Ok(path) = env::var(CATALOG_VAR) {
            if !path.trim().is_empty() {
                config.catalog_path = Some(PathBuf::from(path));
            }
        }

        Ok(config)
    }

    pub fn load_catalog(&self) -> AppResult<Arc<RecommendationCatalog>> {
        match &self.catalog_path {
            Some(path) => {
                info!("Loading recommendation catalog from {}", path.display());
                Ok(Arc::new(RecommendationCatalog::from_json_file(path)?))
            }
            None => Ok(RecommendationCatalog::builtin()),
        }
    }
}

fn default_database_url() -> String {
    let path = match dirs::data_dir() {
        Some(dir) => {
            let dir = dir.join("agenda");
            if std::fs::create_dir_all(&dir).is_ok() {
                dir.join("agenda.db")
            } else {
                PathBuf::from("agenda.db")
            }
        }
        None => PathBuf::from("agenda.db"),
    };
    format!("sqlite:{}", path.display())
}

/// Validates the configuration together with the catalog it selects.
pub fn validate_config(config: &AppConfig, catalog: &RecommendationCatalog) -> AppResult<()> {
    if !(0.0..=1.0).contains(&config.risk_threshold) {
        return Err(AppError::config(format!(
            "Risk threshold {} is outside [0, 1]",
            config.risk_threshold
        )));
    }

    catalog.validate()?;
    catalog.require_clusters(KNOWN_CLUSTERS)?;

    info!(
        "Configuration valid (threshold {}, {} catalog clusters)",
        config.risk_threshold,
        catalog.cluster_ids().count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        env::remove_var(DATABASE_URL_VAR);
        env::remove_var(RISK_THRESHOLD_VAR);
        env::remove_var(CATALOG_VAR);
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.risk_threshold, DEFAULT_RISK_THRESHOLD);
        assert!(config.database_url.starts_with("sqlite:"));
        assert!(config.database_url.ends_with("agenda.db"));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var(DATABASE_URL_VAR, "sqlite::memory:");
        env::set_var(RISK_THRESHOLD_VAR, " 0.75 ");
        env::set_var(CATALOG_VAR, "/tmp/catalog.json");

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.risk_threshold, 0.75);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
    }

    #[test]
    #[serial]
    fn test_bad_threshold_is_config_error() {
        clear_env();
        env::set_var(RISK_THRESHOLD_VAR, "high");
        let result = AppConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_builtin() {
        let config = AppConfig::default();
        assert!(validate_config(&config, &RecommendationCatalog::builtin()).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let config = AppConfig {
            risk_threshold: 1.5,
            ..AppConfig::default()
        };
        let result = validate_config(&config, &RecommendationCatalog::builtin());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_catalog_missing_clusters() {
        let catalog = RecommendationCatalog::from_json(
            r#"{"0": [{"text": "x", "action": null}], "default": [{"text": "y", "action": null}]}"#,
        )
        .unwrap();
        let result = validate_config(&AppConfig::default(), &catalog);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"0": [{{"text": "a", "action": null}}], "1": [{{"text": "b", "action": null}}],
                "2": [{{"text": "c", "action": null}}], "3": [{{"text": "d", "action": {{"title": "D", "duration": 1}}}}],
                "default": [{{"text": "e", "action": null}}]}}"#
        )
        .unwrap();

        let config = AppConfig {
            catalog_path: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert!(validate_config(&config, &catalog).is_ok());
        assert_eq!(catalog.cluster_ids().count(), 4);
    }

    #[test]
    fn test_load_missing_catalog_file_fails() {
        let config = AppConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/agenda/catalog.json")),
            ..AppConfig::default()
        };
        assert!(matches!(config.load_catalog(), Err(AppError::Io(_))));
    }
}
