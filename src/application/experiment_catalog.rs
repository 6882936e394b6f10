// Catalog trait for experiment sources
use crate::domain::experiment::Experiment;

/// Ordered source of experiments. Implemented by the fixed delay presets and
/// by catalogs loaded from configuration.
pub trait ExperimentCatalog: Send + Sync {
    /// Experiments in catalog order
    fn experiments(&self) -> &[Experiment];
}

/// The network-delay presets used when no catalog document is supplied
#[derive(Debug, Clone)]
pub struct FixedPresetCatalog {
    experiments: Vec<Experiment>,
}

impl FixedPresetCatalog {
    pub fn delay_presets() -> Self {
        Self {
            experiments: vec![
                Experiment::preset("unbounded", "Unbounded"),
                Experiment::preset("5ms delay", "5ms Delay"),
                Experiment::preset("20ms delay", "20ms Delay"),
            ],
        }
    }
}

impl ExperimentCatalog for FixedPresetCatalog {
    fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_presets_order() {
        let catalog = FixedPresetCatalog::delay_presets();
        let keys: Vec<&str> = catalog
            .experiments()
            .iter()
            .map(|e| e.job_key.as_str())
            .collect();
        assert_eq!(keys, vec!["unbounded", "5ms delay", "20ms delay"]);
        assert!(catalog.experiments().iter().all(|e| e.description.is_none()));
    }
}
