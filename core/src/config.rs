//! Dashboard configuration: provider endpoint, contract, token, and polling.

use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::contract::DEFAULT_CONTRACT_ADDRESS;
use crate::display::{DEFAULT_DECIMALS, MAX_DECIMALS};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// JSON-RPC endpoint of the wallet provider. `None` means no provider.
    pub provider_url: Option<String>,
    pub contract_address: Address,
    pub token_symbol: String,
    pub decimals: u8,
    /// When set, `connect` refuses a provider on another chain.
    pub expected_chain_id: Option<u64>,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_secs: u64,
    pub explorer_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            provider_url: None,
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            token_symbol: "BNB".to_string(),
            decimals: DEFAULT_DECIMALS,
            expected_chain_id: None,
            receipt_poll_interval_ms: 1000,
            receipt_timeout_secs: 300,
            explorer_url: "https://bscscan.com".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load a config file, or the defaults when it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.decimals > MAX_DECIMALS {
            bail!(
                "decimals must be at most {MAX_DECIMALS}, got {}",
                self.decimals
            );
        }
        if self.receipt_poll_interval_ms == 0 {
            bail!("receipt_poll_interval_ms must be greater than 0");
        }
        Ok(())
    }

    /// Apply command-line / environment overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        provider_url: Option<&str>,
        contract: Option<&str>,
    ) -> anyhow::Result<Self> {
        if let Some(url) = provider_url {
            self.provider_url = Some(url.to_string());
        }
        if let Some(contract) = contract {
            self.contract_address = contract
                .parse::<Address>()
                .with_context(|| format!("Invalid contract address '{contract}'"))?;
        }
        Ok(self)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    /// Explorer link for a transaction hash.
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{hash}", self.explorer_url.trim_end_matches('/'))
    }
}

/// XDG-compliant data directory for the config file.
/// Linux: `~/.local/share/qari/`, macOS: `~/Library/Application Support/qari/`
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("Cannot determine data directory")?
        .join("qari");
    Ok(dir)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}
