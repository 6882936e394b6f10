// Infrastructure layer - External dependencies and adapters
pub mod catalog;
pub mod config;
pub mod grafana_client;
pub mod grafana_mapper;
pub mod http_response;
