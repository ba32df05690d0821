use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use qari_staking_core::config::{default_config_path, DashboardConfig};
use qari_staking_core::ReferralTag;

#[derive(Parser, Debug)]
#[command(name = "qari-staking-gui", about = "QARI staking dashboard", version)]
pub(crate) struct GuiArgs {
    /// Wallet provider JSON-RPC endpoint
    #[arg(long, env = "QARI_PROVIDER_URL")]
    pub provider: Option<String>,

    /// Staking contract address
    #[arg(long, env = "QARI_CONTRACT")]
    pub contract: Option<String>,

    /// Config file (default: <data dir>/qari/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page URL the dashboard was opened from; its `ref` parameter is recorded
    #[arg(long)]
    pub url: Option<String>,

    /// Use a simulated in-memory chain instead of a real provider
    #[arg(long)]
    pub simulate: bool,

    /// Allow non-HTTPS provider URLs on non-loopback hosts
    #[arg(long)]
    pub insecure: bool,
}

impl GuiArgs {
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        DashboardConfig::load(&path)?
            .with_overrides(self.provider.as_deref(), self.contract.as_deref())
    }

    pub fn referral(&self) -> Option<ReferralTag> {
        self.url.as_deref().and_then(ReferralTag::from_url)
    }
}
