// Experiment catalogs loaded from configuration or a standalone document
use crate::application::experiment_catalog::{ExperimentCatalog, FixedPresetCatalog};
use crate::domain::error::DashboardError;
use crate::domain::experiment::Experiment;
use crate::domain::labels::LabelSet;
use crate::infrastructure::config::{AppConfig, CatalogSource};
use anyhow::Context;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// One catalog entry as written in a document; validated on conversion
#[derive(Debug, Deserialize, Clone)]
pub struct ExperimentEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub labels: LabelSet,
}

/// Ordered job-key → entry table
#[derive(Debug, Clone, Default)]
pub struct ExperimentTable {
    entries: Vec<(String, ExperimentEntry)>,
}

impl<'de> Deserialize<'de> for ExperimentTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ExperimentTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of experiments keyed by job name")
            }

            fn visit_map<A>(self, mut map: A) -> Result<ExperimentTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, ExperimentEntry>()? {
                    entries.push(entry);
                }
                Ok(ExperimentTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    experiments: ExperimentTable,
}

/// Catalog supplied from outside the binary, in document order
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    experiments: Vec<Experiment>,
}

impl LoadedCatalog {
    /// Malformed entries fail the whole catalog rather than being skipped
    pub fn from_table(table: &ExperimentTable) -> Result<Self, DashboardError> {
        let experiments = table
            .entries
            .iter()
            .map(|(job_key, entry)| {
                Experiment::new(
                    job_key.as_str(),
                    entry.title.clone().unwrap_or_default(),
                    entry.description.clone(),
                    entry.labels.clone(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { experiments })
    }

    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let document: CatalogDocument =
            toml::from_str(source).context("Failed to parse catalog document")?;
        Ok(Self::from_table(&document.experiments)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::from_toml_str(&source)
    }
}

impl ExperimentCatalog for LoadedCatalog {
    fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }
}

/// Pick the catalog for this run. Presets win when requested; otherwise a
/// catalog file takes precedence over the table embedded in the config.
pub fn select_catalog(
    config: &AppConfig,
    catalog_file: Option<&Path>,
    presets: bool,
) -> anyhow::Result<Arc<dyn ExperimentCatalog>> {
    if presets || config.catalog == CatalogSource::Presets {
        tracing::debug!("Using fixed delay presets");
        return Ok(Arc::new(FixedPresetCatalog::delay_presets()));
    }

    let catalog = match (catalog_file, &config.experiments) {
        (Some(path), _) => LoadedCatalog::from_file(path)?,
        (None, Some(table)) => LoadedCatalog::from_table(table)?,
        (None, None) => return Err(DashboardError::MissingParameter("experiments").into()),
    };

    tracing::info!("Loaded catalog with {} experiments", catalog.experiments().len());
    Ok(Arc::new(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[experiments.unbounded]
title = "Unbounded"

[experiments."5ms delay"]
title = "5ms Delay"
description = "Netem adds 5ms on both links"

[experiments."20ms delay"]
title = "20ms Delay"

[experiments."20ms delay".labels]
delay = "20ms"
"#;

    fn app_config(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_from_toml_keeps_document_order() {
        let catalog = LoadedCatalog::from_toml_str(CATALOG).unwrap();
        let experiments = catalog.experiments();

        let keys: Vec<&str> = experiments.iter().map(|e| e.job_key.as_str()).collect();
        assert_eq!(keys, vec!["unbounded", "5ms delay", "20ms delay"]);
        assert_eq!(
            experiments[1].description.as_deref(),
            Some("Netem adds 5ms on both links")
        );
        assert_eq!(experiments[2].labels.format(), "delay='20ms'");
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let err = LoadedCatalog::from_toml_str(
            "[experiments.unbounded]\ndescription = \"no title\"\n",
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::MalformedExperiment {
                job_key: "unbounded".to_string(),
                reason: "title is missing".to_string(),
            })
        );
    }

    #[test]
    fn test_select_presets() {
        let config = app_config("library = \"quinn\"\ncatalog = \"presets\"");
        let catalog = select_catalog(&config, None, false).unwrap();
        assert_eq!(catalog.experiments().len(), 3);
    }

    #[test]
    fn test_select_embedded_table() {
        let source = format!("library = \"quinn\"\n{}", CATALOG);
        let config = app_config(&source);
        let catalog = select_catalog(&config, None, false).unwrap();

        assert_eq!(catalog.experiments()[0].title, "Unbounded");
        assert_eq!(catalog.experiments()[2].job_key, "20ms delay");
    }

    #[test]
    fn test_reserved_extra_label_fails_catalog() {
        let source = "[experiments.unbounded]\ntitle = \"Unbounded\"\n\n[experiments.unbounded.labels]\nmode = \"client\"\n";
        let err = LoadedCatalog::from_toml_str(source).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::InvalidLabel { key, .. }) if key == "mode"
        ));
    }

    #[test]
    fn test_empty_table_is_overview_only_catalog() {
        let catalog = LoadedCatalog::from_toml_str("[experiments]\n").unwrap();
        assert!(catalog.experiments().is_empty());
    }

    #[test]
    fn test_absent_catalog_is_fatal() {
        let config = app_config("library = \"quinn\"");
        let err = match select_catalog(&config, None, false) {
            Ok(_) => panic!("absent catalog must fail"),
            Err(e) => e,
        };
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::MissingParameter("experiments"))
        );
    }
}
