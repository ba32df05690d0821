use qari_staking_core::network::TransactionReceipt;
use qari_staking_core::{Address, MutationTicket, QueryTicket, StakeRecord, StakingError};

/// Background task failure, carried through `Message` (which must be `Clone`)
/// and turned back into a `StakingError` before it reaches the dashboard.
#[derive(Debug, Clone)]
pub(crate) enum TaskError {
    NoProvider,
    Transaction(String),
    Network(String),
    InvalidConfig(String),
}

impl From<StakingError> for TaskError {
    fn from(e: StakingError) -> Self {
        match e {
            StakingError::NoProvider => TaskError::NoProvider,
            StakingError::Transaction(m) => TaskError::Transaction(m),
            StakingError::InvalidConfig(m) => TaskError::InvalidConfig(m),
            other => TaskError::Network(other.to_string()),
        }
    }
}

impl From<TaskError> for StakingError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::NoProvider => StakingError::NoProvider,
            TaskError::Transaction(m) => StakingError::Transaction(m),
            TaskError::Network(m) => StakingError::Network(m),
            TaskError::InvalidConfig(m) => StakingError::InvalidConfig(m),
        }
    }
}

// -- Messages --

#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Form inputs
    AmountChanged(String),

    // Wallet session
    Connect,
    Connected(Result<Address, TaskError>),

    // Stake query
    Refresh,
    StakeLoaded(QueryTicket, Result<StakeRecord, TaskError>),

    // Mutations
    Stake,
    Withdraw,
    MutationDone(MutationTicket, Result<TransactionReceipt, TaskError>),

    // Misc
    CopyAddress,
    OpenExplorer,
    DismissToast(usize),
}
