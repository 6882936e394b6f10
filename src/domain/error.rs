// Domain errors for dashboard generation
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    /// A required global input was not supplied
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("malformed experiment `{job_key}`: {reason}")]
    MalformedExperiment { job_key: String, reason: String },

    #[error("invalid label {key}='{value}': {reason}")]
    InvalidLabel {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("dashboard title must not be empty")]
    EmptyTitle,

    #[error("grid position (h={h}, w={w}, x={x}, y={y}) does not fit the canvas")]
    InvalidGridPosition { h: f32, w: u32, x: u32, y: u32 },
}
