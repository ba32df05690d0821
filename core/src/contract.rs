//! Fixed ABI of the staking contract and calldata helpers.

use alloy_primitives::{address, Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface};

use crate::error::{Result, StakingError};
use crate::network::StakeRecord;

/// Deployed staking contract on BNB Smart Chain.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("e0711cc6FbF29F01581EB00149532E767EcAd741");

alloy_sol_types::sol! {
    interface IStaking {
        function stake() external payable;
        function withdraw() external;
        function owner() external view returns (address);
        function stakes(address) external view returns (uint256 amount, uint256 timestamp);
    }
}

pub use IStaking::IStakingCalls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakingContract {
    address: Address,
}

impl Default for StakingContract {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRACT_ADDRESS)
    }
}

impl StakingContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn stake_calldata(&self) -> Bytes {
        IStaking::stakeCall {}.abi_encode().into()
    }

    pub fn withdraw_calldata(&self) -> Bytes {
        IStaking::withdrawCall {}.abi_encode().into()
    }

    pub fn owner_calldata(&self) -> Bytes {
        IStaking::ownerCall {}.abi_encode().into()
    }

    pub fn stakes_calldata(&self, account: Address) -> Bytes {
        IStaking::stakesCall(account).abi_encode().into()
    }

    /// Decode the `(amount, timestamp)` tuple returned by `stakes(address)`.
    pub fn decode_stakes(&self, data: &[u8]) -> Result<StakeRecord> {
        let ret = IStaking::stakesCall::abi_decode_returns(data)
            .map_err(|e| StakingError::Network(format!("Failed to decode stakes() result: {e}")))?;
        let timestamp = u64::try_from(ret.timestamp).map_err(|_| {
            StakingError::Network(format!("Stake timestamp out of range: {}", ret.timestamp))
        })?;
        Ok(StakeRecord {
            amount: ret.amount,
            timestamp,
        })
    }

    /// Decode the address returned by `owner()`.
    pub fn decode_owner(&self, data: &[u8]) -> Result<Address> {
        IStaking::ownerCall::abi_decode_returns(data)
            .map_err(|e| StakingError::Network(format!("Failed to decode owner() result: {e}")))
    }
}

/// ABI-encode a `stakes(address)` return value.
pub fn encode_stake_record(record: &StakeRecord) -> Bytes {
    IStaking::stakesCall::abi_encode_returns(&IStaking::stakesReturn {
        amount: record.amount,
        timestamp: U256::from(record.timestamp),
    })
    .into()
}

/// ABI-encode an `owner()` return value.
pub fn encode_owner(owner: Address) -> Bytes {
    IStaking::ownerCall::abi_encode_returns(&owner).into()
}

/// Decode calldata addressed to the staking contract.
pub fn decode_call(data: &[u8]) -> Result<IStakingCalls> {
    IStakingCalls::abi_decode(data)
        .map_err(|e| StakingError::Transaction(format!("Unknown contract call: {e}")))
}
