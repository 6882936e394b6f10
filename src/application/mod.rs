// Application layer - Use cases and capability traits
pub mod dashboard_publisher;
pub mod dashboard_renderer;
pub mod dashboard_service;
pub mod experiment_catalog;
pub mod experiment_expander;
pub mod panel_factory;
