// Domain layer - Pure layout, templating and dashboard models
pub mod dashboard;
pub mod error;
pub mod experiment;
pub mod labels;
pub mod layout;
pub mod panel;
pub mod query;
