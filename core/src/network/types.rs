use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Cached copy of the contract's `stakes(address)` entry.
/// Timestamp `0` means the account has never staked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StakeRecord {
    /// Staked quantity in the smallest unit (wei).
    pub amount: U256,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl StakeRecord {
    pub fn is_empty(&self) -> bool {
        self.amount.is_zero() && self.timestamp == 0
    }
}

/// A transaction as handed to the wallet provider for signing and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub hash: B256,
    pub block_number: Option<u64>,
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct NetworkStatus {
    pub chain_id: u64,
    pub provider: String,
    pub contract: Address,
    pub owner: Option<Address>,
}

/// Which contract entry point a mutation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Stake,
    Withdraw,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stake => write!(f, "stake"),
            Self::Withdraw => write!(f, "withdraw"),
        }
    }
}
