// Dashboard service - Use case for building dashboards
use crate::application::experiment_catalog::ExperimentCatalog;
use crate::application::experiment_expander;
use crate::domain::dashboard::{display_name, Dashboard, PlacedPanel, FIRST_PANEL_ID};
use crate::domain::error::DashboardError;
use crate::domain::labels::LabelSet;
use crate::domain::panel::Panel;
use crate::infrastructure::config::DashboardSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    catalog: Arc<dyn ExperimentCatalog>,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(catalog: Arc<dyn ExperimentCatalog>, settings: DashboardSettings) -> Self {
        Self { catalog, settings }
    }

    /// Build the full dashboard for one library. Every call lays out with its
    /// own cursor, so concurrent builds never interfere.
    pub fn build_dashboard(&self, library: &str) -> Result<Dashboard, DashboardError> {
        if library.trim().is_empty() {
            return Err(DashboardError::MissingParameter("library"));
        }

        let mut global = LabelSet::new().with("library", library)?;
        global.merge(&self.settings.labels);

        let panels = experiment_expander::expand(&global, self.catalog.as_ref())?;
        let dashboard = assemble(
            &display_name(library),
            self.settings.tags.clone(),
            &self.settings.timezone,
            panels,
        )?;

        tracing::info!(
            "Assembled dashboard {:?}: {} experiments, {} panels",
            dashboard.title,
            self.catalog.experiments().len(),
            dashboard.panels.len()
        );

        Ok(dashboard)
    }
}

/// Wrap panels into a dashboard, assigning sequential ids in list order
pub fn assemble(
    title: &str,
    tags: Vec<String>,
    timezone: &str,
    panels: Vec<Panel>,
) -> Result<Dashboard, DashboardError> {
    if title.trim().is_empty() {
        return Err(DashboardError::EmptyTitle);
    }

    let panels = panels
        .into_iter()
        .zip(FIRST_PANEL_ID..)
        .map(|(panel, id)| {
            panel.grid_pos().validate()?;
            Ok(PlacedPanel { id, panel })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    Ok(Dashboard::new(
        title.to_string(),
        tags,
        timezone.to_string(),
        panels,
    ))
}
