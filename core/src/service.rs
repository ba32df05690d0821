use std::sync::Arc;

use alloy_primitives::{Address, U256};

use crate::config::DashboardConfig;
use crate::contract::StakingContract;
use crate::error::{Result, StakingError};
use crate::network::{
    InMemoryProvider, JsonRpcProvider, MutationKind, NetworkStatus, StakeRecord,
    TransactionReceipt, TransactionRequest, WalletProvider,
};

/// Contract-level operations over an optional wallet provider.
///
/// Every method needing the provider fails fast with `NoProvider` when none
/// was injected, before any I/O.
pub struct StakingService {
    provider: Option<Arc<dyn WalletProvider>>,
    contract: StakingContract,
    expected_chain_id: Option<u64>,
}

impl StakingService {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, contract: StakingContract) -> Self {
        Self {
            provider,
            contract,
            expected_chain_id: None,
        }
    }

    pub fn with_expected_chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.expected_chain_id = chain_id;
        self
    }

    /// Build a service from config: a JSON-RPC provider when a URL is set,
    /// the in-memory simulation when `simulate` is set, otherwise none.
    pub fn from_config(config: &DashboardConfig, simulate: bool, allow_insecure: bool) -> Result<Self> {
        let provider: Option<Arc<dyn WalletProvider>> = if simulate {
            Some(Arc::new(InMemoryProvider::new(config.contract_address)))
        } else if let Some(url) = &config.provider_url {
            let rpc = JsonRpcProvider::new(url, allow_insecure)?
                .with_receipt_polling(config.receipt_poll_interval(), config.receipt_timeout());
            Some(Arc::new(rpc))
        } else {
            None
        };
        Ok(Self::new(provider, StakingContract::new(config.contract_address))
            .with_expected_chain_id(config.expected_chain_id))
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn contract(&self) -> &StakingContract {
        &self.contract
    }

    fn provider(&self) -> Result<&Arc<dyn WalletProvider>> {
        self.provider.as_ref().ok_or(StakingError::NoProvider)
    }

    /// Request account access and return the active account.
    pub async fn request_account(&self) -> Result<Address> {
        let provider = self.provider()?;
        if let Some(expected) = self.expected_chain_id {
            let actual = provider.chain_id().await?;
            if actual != expected {
                return Err(StakingError::InvalidConfig(format!(
                    "Wallet is on chain {actual}, expected chain {expected}"
                )));
            }
        }
        let accounts = provider.request_accounts().await?;
        accounts
            .first()
            .copied()
            .ok_or_else(|| StakingError::Transaction("Wallet authorised no accounts".into()))
    }

    pub async fn fetch_stake(&self, account: Address) -> Result<StakeRecord> {
        let provider = self.provider()?;
        let data = provider
            .call(self.contract.address(), self.contract.stakes_calldata(account))
            .await?;
        self.contract.decode_stakes(&data)
    }

    pub async fn owner(&self) -> Result<Address> {
        let provider = self.provider()?;
        let data = provider
            .call(self.contract.address(), self.contract.owner_calldata())
            .await?;
        self.contract.decode_owner(&data)
    }

    /// Submit a value-bearing `stake()` from `from`.
    pub async fn stake(&self, from: Address, value: U256) -> Result<TransactionReceipt> {
        self.submit(MutationKind::Stake, from, value).await
    }

    /// Submit a zero-value `withdraw()` from `from`.
    pub async fn withdraw(&self, from: Address) -> Result<TransactionReceipt> {
        self.submit(MutationKind::Withdraw, from, U256::ZERO).await
    }

    pub async fn submit(
        &self,
        kind: MutationKind,
        from: Address,
        value: U256,
    ) -> Result<TransactionReceipt> {
        let provider = self.provider()?;
        let data = match kind {
            MutationKind::Stake => self.contract.stake_calldata(),
            MutationKind::Withdraw => self.contract.withdraw_calldata(),
        };
        let tx = TransactionRequest {
            from,
            to: self.contract.address(),
            value,
            data,
        };
        tracing::info!(%kind, %from, %value, "submitting transaction");
        provider.send_transaction(tx).await
    }

    pub async fn status(&self) -> Result<NetworkStatus> {
        let provider = self.provider()?;
        let chain_id = provider.chain_id().await?;
        // Owner is informational; a failing view call must not hide the status
        let owner = self.owner().await.ok();
        Ok(NetworkStatus {
            chain_id,
            provider: provider.describe(),
            contract: self.contract.address(),
            owner,
        })
    }
}
