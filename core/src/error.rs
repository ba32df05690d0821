//! Domain error types for dashboard operations.

use thiserror::Error;

/// Reasons a user-entered amount cannot be converted into the token's
/// smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount cannot be empty")]
    Empty,

    #[error("Amount must be positive")]
    Negative,

    #[error("Amount must be greater than 0")]
    Zero,

    #[error("Invalid amount '{0}'. Use decimal units like '0.01' or '1.5'.")]
    Malformed(String),

    #[error("Too many decimal places. The token supports up to {0}.")]
    TooPrecise(u8),

    #[error("Amount too large")]
    Overflow,
}

/// Typed error enum for staking operations, allowing callers to match on
/// specific failure modes instead of inspecting opaque `anyhow::Error` messages.
#[derive(Debug, Error)]
pub enum StakingError {
    /// No wallet provider is configured or reachable.
    #[error("Wallet provider not detected")]
    NoProvider,

    /// A mutation was attempted before a wallet was connected.
    #[error("Connect your wallet first")]
    NotConnected,

    /// A stake or withdraw is still waiting for its receipt.
    #[error("Another transaction is still pending")]
    MutationInFlight,

    /// The entered amount did not parse to a positive quantity.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// The provider rejected the request or the contract call reverted.
    #[error("{0}")]
    Transaction(String),

    /// Transport, RPC, decoding, or timeout failure.
    #[error("{0}")]
    Network(String),

    /// Invalid provider URL, contract address, or chain mismatch.
    #[error("{0}")]
    InvalidConfig(String),

    /// Unexpected error from internal subsystems.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StakingError {
    /// Whether this error was raised before any provider call was made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StakingError::NoProvider
                | StakingError::NotConnected
                | StakingError::MutationInFlight
                | StakingError::InvalidAmount(_)
        )
    }
}

/// Alias for `std::result::Result<T, StakingError>`.
pub type Result<T> = std::result::Result<T, StakingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_classified() {
        assert!(StakingError::NoProvider.is_precondition());
        assert!(StakingError::NotConnected.is_precondition());
        assert!(StakingError::InvalidAmount(AmountError::Zero).is_precondition());
        assert!(!StakingError::Network("timeout".into()).is_precondition());
        assert!(!StakingError::Transaction("reverted".into()).is_precondition());
    }

    #[test]
    fn amount_error_converts_transparently() {
        let err: StakingError = AmountError::TooPrecise(18).into();
        assert_eq!(err.to_string(), "Too many decimal places. The token supports up to 18.");
    }
}
