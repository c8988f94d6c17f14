//! Build-time configuration.
//!
//! `config.toml` at the workspace root is embedded into the binary and
//! parsed once on first access. A broken file falls back to defaults
//! instead of failing the page load.

use shared_types::ClientConfig;
use std::sync::OnceLock;

const EMBEDDED_CONFIG: &str = include_str!("../../../config.toml");

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

pub fn client_config() -> &'static ClientConfig {
    CONFIG.get_or_init(|| parse_config(EMBEDDED_CONFIG))
}

fn parse_config(text: &str) -> ClientConfig {
    match toml::from_str::<ClientConfig>(text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid config.toml, using defaults");
            ClientConfig::default()
        }
    }
}
