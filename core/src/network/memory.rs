use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use alloy_primitives::{address, keccak256, Address, Bytes, U256};
use async_trait::async_trait;

use super::types::{StakeRecord, TransactionReceipt, TransactionRequest};
use super::WalletProvider;
use crate::contract::{decode_call, encode_owner, encode_stake_record, IStakingCalls};
use crate::error::{Result, StakingError};

/// First simulated account, funded with 10 BNB.
pub const SIMULATED_ACCOUNT: Address = address!("00000000000000000000000000000000000a11ce");
pub const SIMULATED_OWNER: Address = address!("000000000000000000000000000000000000b0b0");
pub const SIMULATED_CHAIN_ID: u64 = 1337;

struct ChainState {
    accounts: Vec<Address>,
    balances: HashMap<Address, U256>,
    stakes: HashMap<Address, StakeRecord>,
    block_number: u64,
    fixed_time: Option<u64>,
    sent: Vec<TransactionRequest>,
    reject_next_send: Option<String>,
    fail_calls: bool,
}

/// Simulated chain holding a single staking contract. Stake adds the sent
/// value and stamps the block time; withdraw refunds and clears the record.
pub struct InMemoryProvider {
    contract: Address,
    state: Mutex<ChainState>,
}

impl InMemoryProvider {
    pub fn new(contract: Address) -> Self {
        let mut balances = HashMap::new();
        balances.insert(SIMULATED_ACCOUNT, U256::from(10u64) * U256::from(10u64).pow(U256::from(18u64)));
        Self {
            contract,
            state: Mutex::new(ChainState {
                accounts: vec![SIMULATED_ACCOUNT],
                balances,
                stakes: HashMap::new(),
                block_number: 0,
                fixed_time: None,
                sent: Vec::new(),
                reject_next_send: None,
                fail_calls: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ChainState> {
        // State stays consistent even if a test thread panicked mid-update
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the authorised accounts. An empty list simulates a wallet
    /// that grants access to nothing.
    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state().accounts = accounts;
        self
    }

    pub fn fund(&self, account: Address, amount: U256) {
        let mut state = self.state();
        let balance = state.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn balance(&self, account: &Address) -> U256 {
        self.state().balances.get(account).copied().unwrap_or_default()
    }

    /// Pin block time to a fixed value instead of the wall clock.
    pub fn set_time(&self, timestamp: u64) {
        self.state().fixed_time = Some(timestamp);
    }

    /// Make the next `send_transaction` fail as if the user rejected it.
    pub fn reject_next_send(&self, reason: &str) {
        self.state().reject_next_send = Some(reason.to_string());
    }

    /// Make every read-only call fail with a network error.
    pub fn set_fail_calls(&self, fail: bool) {
        self.state().fail_calls = fail;
    }

    /// Every transaction handed to the provider, including rejected ones.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state().sent.clone()
    }

    pub fn stake_of(&self, account: &Address) -> StakeRecord {
        self.state().stakes.get(account).copied().unwrap_or_default()
    }
}

impl ChainState {
    fn now(&self) -> u64 {
        self.fixed_time
            .unwrap_or_else(|| u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0))
    }

    fn execute(&mut self, contract: Address, tx: &TransactionRequest) -> Result<()> {
        if tx.to != contract {
            return Err(StakingError::Transaction(format!("No contract at {}", tx.to)));
        }
        let balance = self.balances.get(&tx.from).copied().unwrap_or_default();
        if balance < tx.value {
            return Err(StakingError::Transaction(
                "Insufficient funds for transfer".to_string(),
            ));
        }

        match decode_call(&tx.data)? {
            IStakingCalls::stake(_) => {
                if tx.value.is_zero() {
                    return Err(StakingError::Transaction(
                        "execution reverted: Stake amount must be > 0".to_string(),
                    ));
                }
                let now = self.now();
                self.balances.insert(tx.from, balance - tx.value);
                let record = self.stakes.entry(tx.from).or_default();
                record.amount = record.amount.saturating_add(tx.value);
                record.timestamp = now;
            }
            IStakingCalls::withdraw(_) => {
                if !tx.value.is_zero() {
                    return Err(StakingError::Transaction(
                        "execution reverted: withdraw is not payable".to_string(),
                    ));
                }
                let record = self.stakes.remove(&tx.from).unwrap_or_default();
                if record.amount.is_zero() {
                    return Err(StakingError::Transaction(
                        "execution reverted: No stake to withdraw".to_string(),
                    ));
                }
                self.balances.insert(tx.from, balance.saturating_add(record.amount));
            }
            IStakingCalls::owner(_) | IStakingCalls::stakes(_) => {}
        }
        Ok(())
    }
}

#[async_trait]
impl WalletProvider for InMemoryProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(self.state().accounts.clone())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let state = self.state();
        if state.fail_calls {
            return Err(StakingError::Network("eth_call failed: connection refused".to_string()));
        }
        if to != self.contract {
            return Ok(Bytes::new());
        }
        match decode_call(&data).map_err(|e| StakingError::Network(e.to_string()))? {
            IStakingCalls::stakes(call) => Ok(encode_stake_record(
                &state.stakes.get(&call.0).copied().unwrap_or_default(),
            )),
            IStakingCalls::owner(_) => Ok(encode_owner(SIMULATED_OWNER)),
            _ => Ok(Bytes::new()),
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
        let mut state = self.state();
        state.sent.push(tx.clone());
        if let Some(reason) = state.reject_next_send.take() {
            return Err(StakingError::Transaction(reason));
        }
        if !state.accounts.contains(&tx.from) {
            return Err(StakingError::Transaction(format!(
                "Account {} is not authorised",
                tx.from
            )));
        }
        state.execute(self.contract, &tx)?;
        state.block_number += 1;
        let nonce = state.sent.len() as u64;
        Ok(TransactionReceipt {
            hash: keccak256(nonce.to_be_bytes()),
            block_number: Some(state.block_number),
            success: true,
        })
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(SIMULATED_CHAIN_ID)
    }

    fn describe(&self) -> String {
        "in-memory simulation".to_string()
    }
}
