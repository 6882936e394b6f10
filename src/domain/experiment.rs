// Experiment domain model
use super::error::DashboardError;
use super::labels::LabelSet;

/// A named scenario that produces one cluster of panels
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub job_key: String,
    pub title: String,
    pub description: Option<String>,
    pub labels: LabelSet,
}

impl Experiment {
    pub fn new(
        job_key: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
        labels: LabelSet,
    ) -> Result<Self, DashboardError> {
        let job_key = job_key.into();
        let title = title.into();

        if job_key.trim().is_empty() {
            return Err(DashboardError::MalformedExperiment {
                job_key,
                reason: "job key is empty".to_string(),
            });
        }
        if title.trim().is_empty() {
            return Err(DashboardError::MalformedExperiment {
                job_key,
                reason: "title is missing".to_string(),
            });
        }

        labels.reject_reserved()?;

        // Blank descriptions produce no text block
        let description = description.filter(|d| !d.trim().is_empty());

        Ok(Self {
            job_key,
            title,
            description,
            labels,
        })
    }

    /// Preset without description or extra labels
    pub fn preset(job_key: &str, title: &str) -> Self {
        Self {
            job_key: job_key.to_string(),
            title: title.to_string(),
            description: None,
            labels: LabelSet::new(),
        }
    }
}
