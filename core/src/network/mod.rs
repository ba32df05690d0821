/// Wallet provider abstraction: the one capability the dashboard needs from
/// the outside world, injected rather than read from ambient state.
mod memory;
mod rpc;
mod types;

pub use memory::{InMemoryProvider, SIMULATED_ACCOUNT, SIMULATED_CHAIN_ID, SIMULATED_OWNER};
pub use rpc::JsonRpcProvider;
pub use types::*;

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::error::{Result, StakingError};

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for account access. The first address is the active one.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Read-only contract call at the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Sign, submit, and wait for the transaction to be mined.
    /// A mined-but-reverted transaction is reported as `StakingError::Transaction`.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TransactionReceipt>;

    async fn chain_id(&self) -> Result<u64>;

    /// Human-readable endpoint description for status output.
    fn describe(&self) -> String;
}

fn is_loopback_host(rest: &str) -> bool {
    let host = rest.split(['/', '?']).next().unwrap_or("");
    let host = match host.rsplit_once(':') {
        Some((h, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    };
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}

/// Reject non-HTTPS provider URLs unless the host is loopback or `allow_insecure` is set.
pub fn validate_provider_url(url: &str, allow_insecure: bool) -> Result<()> {
    if url.starts_with("https://") {
        return Ok(());
    }
    if let Some(rest) = url.strip_prefix("http://") {
        if allow_insecure || is_loopback_host(rest) {
            return Ok(());
        }
        return Err(StakingError::InvalidConfig(format!(
            "Refusing to connect over plain HTTP: {url}\nUse --insecure to allow unencrypted connections."
        )));
    }
    Err(StakingError::InvalidConfig(format!(
        "Invalid provider URL scheme: {url}\nExpected an https:// URL."
    )))
}
