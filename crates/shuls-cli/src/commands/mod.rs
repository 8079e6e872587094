pub mod config;
pub mod details;
pub mod pick;
pub mod search;

use anyhow::Result;
use shuls_core::{Candidate, ClientConfig};
use shuls_core::text::TextDirection;
use shuls_infrastructure::config_service::apply_base_url_override;
use shuls_infrastructure::{ConfigService, HttpAddressSearchGateway};

/// Resolved configuration shared by every subcommand.
pub struct AppContext {
    pub config_service: ConfigService,
    pub config: ClientConfig,
    pub json: bool,
}

impl AppContext {
    pub fn load(base_url: Option<String>, json: bool) -> Result<Self> {
        let config_service = ConfigService::new();
        let mut config = config_service.get_config()?;
        apply_base_url_override(&mut config, base_url);
        tracing::debug!("Using server {}", config.base_url);

        Ok(Self {
            config_service,
            config,
            json,
        })
    }

    pub fn gateway(&self) -> HttpAddressSearchGateway {
        HttpAddressSearchGateway::from_config(&self.config)
    }
}

/// One line per candidate: position, source, name and coordinates.
pub fn describe_candidate(index: usize, candidate: &Candidate) -> String {
    let location = match candidate.coordinates {
        Some(c) => format!("({}, {})", c.latitude, c.longitude),
        None => "(needs details)".to_string(),
    };
    let direction = match candidate.text_direction() {
        TextDirection::Rtl => " [rtl]",
        TextDirection::Ltr => "",
    };
    let source: String = candidate.source.clone().into();
    format!(
        "{:>2}. [{}] {}{} {}",
        index, source, candidate.display_name, direction, location
    )
}
