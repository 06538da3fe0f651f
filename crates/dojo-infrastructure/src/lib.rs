//! Infrastructure layer for the Sales Dojo client.
//!
//! Provides the HTTP transport adapter, wire DTOs and the on-disk client
//! configuration.

pub mod client_config;
pub mod config_service;
pub mod dto;
pub mod http_service;
pub mod paths;

pub use crate::client_config::{ClientConfig, ProfileConfig};
pub use crate::config_service::ConfigService;
pub use crate::http_service::HttpTrainingService;
pub use crate::paths::DojoPaths;
