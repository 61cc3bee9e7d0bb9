//! Courtroom configuration: TOML file + `COURTROOM_*` environment, with the legacy
//! variable names (`ALCHEMY_API_URL`, `PINATA_API_KEY`, ...) honored as fallbacks.
//!
//! The loaded [`CourtroomConfig`] is handed to each component at construction;
//! components never read the environment themselves.

use crate::error::{CourtError, CourtResult};
use serde::{Deserialize, Serialize};

/// Block the courtroom contract was deployed at; event scans start here.
pub const DEFAULT_DISCOVERY_START_BLOCK: u64 = 21_660_147;

/// Courtroom configuration.
///
/// | Key / Env | Default | Description |
/// |-----------|---------|-------------|
/// | bind_addr / COURTROOM_BIND_ADDR | 127.0.0.1:8000 | Gateway listen address. |
/// | backend_base / MY_API_BASE | http://127.0.0.1:8000 | Gateway base URL the agent tools post to. |
/// | pinata_api_key / PINATA_API_KEY | (unset) | Pinning service key. |
/// | pinata_secret_key / PINATA_SECRET_KEY | (unset) | Pinning service secret. |
/// | rpc_url / ALCHEMY_API_URL | (unset) | JSON-RPC endpoint for contract reads and writes. |
/// | wallet_private_key / COURTROOM_WALLET_PRIVATE_KEY | (unset) | Signer for registration transactions. |
/// | huggingface_api_key / HUGGINGFACE_API_KEY | (unset) | Hosted model key. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtroomConfig {
    pub bind_addr: String,
    pub backend_base: String,
    pub pinata_api_base: String,
    pub gateway_base: String,
    #[serde(default)]
    pub pinata_api_key: Option<String>,
    #[serde(default)]
    pub pinata_secret_key: Option<String>,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub wallet_private_key: Option<String>,
    pub discovery_start_block: u64,
    pub chat_api_base: String,
    pub image_api_base: String,
    pub persona_model: String,
    pub image_model: String,
    #[serde(default)]
    pub huggingface_api_key: Option<String>,
    pub http_timeout_secs: u64,
}

impl Default for CourtroomConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            backend_base: "http://127.0.0.1:8000".to_string(),
            pinata_api_base: "https://api.pinata.cloud".to_string(),
            gateway_base: "https://gateway.pinata.cloud".to_string(),
            pinata_api_key: None,
            pinata_secret_key: None,
            rpc_url: None,
            wallet_private_key: None,
            discovery_start_block: DEFAULT_DISCOVERY_START_BLOCK,
            chat_api_base: "https://router.huggingface.co/v1".to_string(),
            image_api_base: "https://router.huggingface.co/hf-inference".to_string(),
            persona_model: "google/gemma-2-2b-it".to_string(),
            image_model: "black-forest-labs/FLUX.1-dev".to_string(),
            huggingface_api_key: None,
            http_timeout_secs: 60,
        }
    }
}

impl CourtroomConfig {
    /// Load config from file and environment. Precedence: `COURTROOM_*` env > file at
    /// `COURTROOM_CONFIG` (default `config/courtroom`, any supported extension) > defaults.
    /// Legacy variable names fill whatever is still unset afterwards.
    pub fn load() -> CourtResult<Self> {
        let config_path =
            std::env::var("COURTROOM_CONFIG").unwrap_or_else(|_| "config/courtroom".to_string());
        let defaults = Self::default();
        let built = config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("backend_base", defaults.backend_base)?
            .set_default("pinata_api_base", defaults.pinata_api_base)?
            .set_default("gateway_base", defaults.gateway_base)?
            .set_default("discovery_start_block", defaults.discovery_start_block)?
            .set_default("chat_api_base", defaults.chat_api_base)?
            .set_default("image_api_base", defaults.image_api_base)?
            .set_default("persona_model", defaults.persona_model)?
            .set_default("image_model", defaults.image_model)?
            .set_default("http_timeout_secs", defaults.http_timeout_secs)?
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix("COURTROOM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Self = built.try_deserialize()?;
        cfg.apply_legacy_env();
        Ok(cfg)
    }

    /// Fills unset secrets/endpoints from the variable names the agent deployment already uses.
    fn apply_legacy_env(&mut self) {
        fill_from_env(&mut self.rpc_url, "ALCHEMY_API_URL");
        fill_from_env(&mut self.pinata_api_key, "PINATA_API_KEY");
        fill_from_env(&mut self.pinata_secret_key, "PINATA_SECRET_KEY");
        fill_from_env(&mut self.huggingface_api_key, "HUGGINGFACE_API_KEY");
        if std::env::var("COURTROOM_BACKEND_BASE").is_err() {
            if let Some(base) = env_opt_string("MY_API_BASE") {
                self.backend_base = base;
            }
        }
    }

    pub fn rpc_url(&self) -> CourtResult<&str> {
        required(&self.rpc_url, "rpc_url (ALCHEMY_API_URL)")
    }

    pub fn wallet_private_key(&self) -> CourtResult<&str> {
        required(&self.wallet_private_key, "wallet_private_key (COURTROOM_WALLET_PRIVATE_KEY)")
    }

    pub fn pinata_credentials(&self) -> CourtResult<(&str, &str)> {
        Ok((
            required(&self.pinata_api_key, "pinata_api_key (PINATA_API_KEY)")?,
            required(&self.pinata_secret_key, "pinata_secret_key (PINATA_SECRET_KEY)")?,
        ))
    }

    pub fn huggingface_api_key(&self) -> CourtResult<&str> {
        required(&self.huggingface_api_key, "huggingface_api_key (HUGGINGFACE_API_KEY)")
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs.max(1))
    }
}

fn required<'a>(value: &'a Option<String>, what: &str) -> CourtResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CourtError::Config(format!("{} is not set", what)))
}

fn fill_from_env(slot: &mut Option<String>, name: &str) {
    let unset = slot.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true);
    if unset {
        if let Some(v) = env_opt_string(name) {
            *slot = Some(v);
        }
    }
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
