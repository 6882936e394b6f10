use crate::domain::error::DashboardError;
use crate::domain::labels::LabelSet;
use crate::infrastructure::catalog::ExperimentTable;
use serde::Deserialize;
use std::net::SocketAddr;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
const ENV_PREFIX: &str = "DASHBOARD";
/// `log_level` value that resolves to the active tracing level
const AUTO_LOG_LEVEL: &str = "auto";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub library: Option<String>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_datasource")]
    pub datasource: String,
    #[serde(default)]
    pub catalog: CatalogSource,
    pub experiments: Option<ExperimentTable>,
    pub grafana: Option<GrafanaSettings>,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Presets,
    #[default]
    Config,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrafanaSettings {
    pub host: String,
    pub token: String,
    pub folder_uid: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Settings shared by every dashboard build
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// Fixed labels merged into every query after the library label
    pub labels: LabelSet,
    pub tags: Vec<String>,
    pub timezone: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            labels: LabelSet::new(),
            tags: default_tags(),
            timezone: default_timezone(),
        }
    }
}

fn default_tags() -> Vec<String> {
    vec!["nesquic".to_string()]
}

fn default_timezone() -> String {
    "browser".to_string()
}

fn default_datasource() -> String {
    "prometheus".to_string()
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl AppConfig {
    pub fn library(&self) -> Result<&str, DashboardError> {
        self.library
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .ok_or(DashboardError::MissingParameter("library"))
    }

    pub fn dashboard_settings(&self) -> Result<DashboardSettings, DashboardError> {
        self.labels.reject_reserved()?;

        let mut labels = LabelSet::new();
        if let Some(level) = &self.log_level {
            let level = if level == AUTO_LOG_LEVEL {
                tracing::level_filters::LevelFilter::current().to_string()
            } else {
                level.clone()
            };
            labels.insert("log_level", level)?;
        }
        labels.merge(&self.labels);

        Ok(DashboardSettings {
            labels,
            tags: self.tags.clone(),
            timezone: self.timezone.clone(),
        })
    }
}

/// Layered load: optional config file, then `DASHBOARD_*` environment
/// variables, then the command-line library override.
pub fn load_app_config(path: &str, library: Option<String>) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(false),
        )
        .set_override_option("library", library)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
