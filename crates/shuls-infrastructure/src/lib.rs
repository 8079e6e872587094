//! Infrastructure layer for the shul directory client.
//!
//! Adapters for the collaborators declared in `shuls-core`: the HTTP address
//! search gateway and TOML configuration loading.

pub mod config_service;
pub mod dto;
pub mod http_gateway;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_gateway::HttpAddressSearchGateway;
pub use crate::paths::ShulsPaths;
