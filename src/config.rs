//! Dashboard configuration.
//!
//! Settings come from a TOML file found through a small discovery
//! hierarchy; every field has a default so a missing file is not an error.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::classify::{CORE_PREFIXES, FOUNDATION_PREFIXES};
use crate::analysis::window::EXCLUDED_DEVELOPERS;
use crate::analysis::{Aggregator, DenyList, RepoClassifier};
use crate::types::{RepoCategory, TimeWindow};

pub const CONFIG_ENV: &str = "DEVBOARD_CONFIG";
pub const LEDGER_URL_ENV: &str = "DEVBOARD_LEDGER_URL";
pub const ACTIVE_DEVS_URL_ENV: &str = "DEVBOARD_ACTIVE_DEVS_URL";
const LOCAL_CONFIG_FILE: &str = "devboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourceConfig,
    pub filters: FilterConfig,
    pub chart: ChartConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV commit ledger
    pub ledger_url: Option<String>,
    /// JSON `{ date: count }` active developer series
    pub active_devs_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            ledger_url: None,
            active_devs_url: None,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub default_window: TimeWindow,
    pub default_category: RepoCategory,
    pub excluded_developers: Vec<String>,
    pub foundation_prefixes: Vec<String>,
    pub core_prefixes: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_window: TimeWindow::Last30Days,
            default_category: RepoCategory::All,
            excluded_developers: to_strings(EXCLUDED_DEVELOPERS),
            foundation_prefixes: to_strings(FOUNDATION_PREFIXES),
            core_prefixes: to_strings(CORE_PREFIXES),
        }
    }
}

impl FilterConfig {
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(
            DenyList::new(self.excluded_developers.iter().cloned()),
            RepoClassifier::new(self.foundation_prefixes.clone(), self.core_prefixes.clone()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Initial slider position; 80 shows the most recent fifth of the series
    pub default_position: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_position: 80.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub dark_mode: bool,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Config {
    /// Load configuration using the discovery hierarchy, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        let mut config = match discover_config_files().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(LEDGER_URL_ENV) {
            debug!("Ledger URL overridden from {}", LEDGER_URL_ENV);
            self.sources.ledger_url = Some(url);
        }
        if let Ok(url) = env::var(ACTIVE_DEVS_URL_ENV) {
            debug!("Active developer URL overridden from {}", ACTIVE_DEVS_URL_ENV);
            self.sources.active_devs_url = Some(url);
        }
    }
}

/// Candidate config files, highest priority first.
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("devboard").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sources.timeout_secs, 15);
        assert_eq!(config.filters.default_window, TimeWindow::Last30Days);
        assert_eq!(config.filters.excluded_developers, vec!["forosuru".to_string()]);
        assert_eq!(config.chart.default_position, 80.0);
        assert!(!config.ui.dark_mode);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [sources]
            ledger_url = "https://example.com/commits.csv"

            [filters]
            default_window = "allTime"
            default_category = "core"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.sources.ledger_url.as_deref(),
            Some("https://example.com/commits.csv")
        );
        assert_eq!(config.sources.active_devs_url, None);
        assert_eq!(config.filters.default_window, TimeWindow::AllTime);
        assert_eq!(config.filters.default_category, RepoCategory::Core);
        assert_eq!(config.filters.core_prefixes, vec!["algorand/".to_string()]);
    }

    #[test]
    fn test_unknown_window_is_rejected() {
        assert!(Config::from_toml("[filters]\ndefault_window = \"last7d\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\ndark_mode = true\n[chart]\ndefault_position = 0.0").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert!(config.ui.dark_mode);
        assert_eq!(config.chart.default_position, 0.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load_from_file(Path::new("/nonexistent/devboard.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_filter_config_builds_aggregator() {
        let filters = FilterConfig {
            core_prefixes: vec!["acme/".to_string()],
            ..FilterConfig::default()
        };
        let aggregator = filters.aggregator();
        assert_eq!(aggregator.classifier().classify("acme/node"), RepoCategory::Core);
        assert!(aggregator.deny_list().contains("forosuru"));
    }
}
