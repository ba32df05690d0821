//! Page-level state machine: wallet session, cached stake record, mutation
//! slot, and the notifications produced along the way.
//!
//! Every operation is split into a synchronous `begin_*` transition, the
//! async provider call, and an `apply_*` transition with its result. The GUI
//! runs the middle step as a background task; the `connect`/`stake`/...
//! helpers at the bottom run all three in sequence for the REPL.

use alloy_primitives::{Address, B256, U256};

use crate::display::parse_token_amount;
use crate::error::{Result, StakingError};
use crate::network::{MutationKind, StakeRecord, TransactionReceipt};
use crate::notify::Notification;
use crate::referral::ReferralTag;
use crate::service::StakingService;
use crate::session::WalletSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Loading,
    Ready,
    Submitting,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Submitting => write!(f, "submitting"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Submitting(MutationKind),
}

/// Issued by `begin_query`; only the most recently issued ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    pub account: Address,
}

/// Issued by `begin_stake` / `begin_withdraw` once all preconditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationTicket {
    pub kind: MutationKind,
    pub from: Address,
    pub value: U256,
}

pub struct Dashboard {
    session: WalletSession,
    stake: StakeRecord,
    stake_stale: bool,
    amount_input: String,
    decimals: u8,
    referral: Option<ReferralTag>,
    query_generation: u64,
    pending_query: Option<u64>,
    mutation: MutationState,
    last_transaction: Option<B256>,
    notifications: Vec<Notification>,
}

impl Dashboard {
    pub fn new(decimals: u8) -> Self {
        Self {
            session: WalletSession::default(),
            stake: StakeRecord::default(),
            stake_stale: false,
            amount_input: String::new(),
            decimals,
            referral: None,
            query_generation: 0,
            pending_query: None,
            mutation: MutationState::Idle,
            last_transaction: None,
            notifications: Vec::new(),
        }
    }

    pub fn with_referral(mut self, referral: Option<ReferralTag>) -> Self {
        if let Some(tag) = &referral {
            tracing::debug!(referral = %tag, "referral tag present (unused)");
        }
        self.referral = referral;
        self
    }

    // -- Accessors --

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn stake(&self) -> &StakeRecord {
        &self.stake
    }

    /// True when the last stake query failed and the record may be outdated.
    pub fn stake_is_stale(&self) -> bool {
        self.stake_stale
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn referral(&self) -> Option<&ReferralTag> {
        self.referral.as_ref()
    }

    pub fn mutation(&self) -> MutationState {
        self.mutation
    }

    pub fn last_transaction(&self) -> Option<B256> {
        self.last_transaction
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn set_amount_input(&mut self, input: impl Into<String>) {
        self.amount_input = input.into();
    }

    pub fn phase(&self) -> Phase {
        if !self.session.is_connected() {
            Phase::Disconnected
        } else if matches!(self.mutation, MutationState::Submitting(_)) {
            Phase::Submitting
        } else if self.pending_query.is_some() {
            Phase::Loading
        } else {
            Phase::Ready
        }
    }

    /// Whether stake/withdraw actions should be offered.
    pub fn can_submit(&self) -> bool {
        self.session.is_connected() && self.mutation == MutationState::Idle
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn reject(&mut self, err: StakingError) -> StakingError {
        self.notify(Notification::error(err.to_string()));
        err
    }

    // -- Wallet session --

    /// Fail fast when no provider is present.
    pub fn begin_connect(&mut self, has_provider: bool) -> Result<()> {
        if !has_provider {
            return Err(self.reject(StakingError::NoProvider));
        }
        Ok(())
    }

    /// Store the connected account and start the stake query it triggers.
    pub fn apply_connect(&mut self, result: Result<Address>) -> Result<QueryTicket> {
        match result {
            Ok(address) => {
                if self.session.set_address(address) {
                    self.stake = StakeRecord::default();
                    self.stake_stale = false;
                }
                self.notify(Notification::success("Wallet connected"));
                self.begin_query().ok_or(StakingError::NotConnected)
            }
            Err(StakingError::NoProvider) => Err(self.reject(StakingError::NoProvider)),
            Err(e) => {
                tracing::error!(error = %e, "wallet connection failed");
                self.notify(Notification::error(format!("Failed to connect wallet: {e}")));
                Err(e)
            }
        }
    }

    // -- Stake query --

    /// Start a stake query for the connected account. Any query issued
    /// earlier becomes stale.
    pub fn begin_query(&mut self) -> Option<QueryTicket> {
        let account = self.session.address()?;
        self.query_generation += 1;
        self.pending_query = Some(self.query_generation);
        tracing::debug!(generation = self.query_generation, %account, "stake query issued");
        Some(QueryTicket {
            generation: self.query_generation,
            account,
        })
    }

    /// Apply a query result. Returns `Ok(false)` when a newer query has been
    /// issued since this ticket, in which case the result is discarded.
    pub fn apply_stake(&mut self, ticket: QueryTicket, result: Result<StakeRecord>) -> Result<bool> {
        if ticket.generation != self.query_generation
            || self.session.address() != Some(ticket.account)
        {
            tracing::debug!(generation = ticket.generation, "discarding stale stake query result");
            return Ok(false);
        }
        self.pending_query = None;
        match result {
            Ok(record) => {
                self.stake = record;
                self.stake_stale = false;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, account = %ticket.account, "stake query failed");
                self.stake_stale = true;
                self.notify(Notification::error(format!("Failed to load stake: {e}")));
                Err(e)
            }
        }
    }

    // -- Mutations --

    fn begin_mutation(&mut self, kind: MutationKind, value: Option<U256>) -> Result<MutationTicket> {
        let from = self.session.address().ok_or(StakingError::NotConnected);
        let from = from.map_err(|e| self.reject(e))?;
        if self.mutation != MutationState::Idle {
            return Err(self.reject(StakingError::MutationInFlight));
        }
        let value = match value {
            Some(v) => v,
            None => parse_token_amount(&self.amount_input, self.decimals)
                .map_err(|e| self.reject(e.into()))?,
        };
        self.mutation = MutationState::Submitting(kind);
        Ok(MutationTicket { kind, from, value })
    }

    /// Check preconditions and parse the amount input. Nothing has been sent
    /// when this returns an error.
    pub fn begin_stake(&mut self) -> Result<MutationTicket> {
        self.begin_mutation(MutationKind::Stake, None)
    }

    pub fn begin_withdraw(&mut self) -> Result<MutationTicket> {
        self.begin_mutation(MutationKind::Withdraw, Some(U256::ZERO))
    }

    /// Settle a mutation. On success the stake record is refetched.
    pub fn apply_mutation(
        &mut self,
        ticket: MutationTicket,
        result: Result<TransactionReceipt>,
    ) -> Result<QueryTicket> {
        self.mutation = MutationState::Idle;
        match result {
            Ok(receipt) => {
                self.last_transaction = Some(receipt.hash);
                let message = match ticket.kind {
                    MutationKind::Stake => {
                        self.amount_input.clear();
                        "Staked successfully"
                    }
                    MutationKind::Withdraw => "Withdraw successful",
                };
                self.notify(Notification::success(message));
                self.begin_query().ok_or(StakingError::NotConnected)
            }
            Err(e) => {
                tracing::error!(error = %e, kind = %ticket.kind, from = %ticket.from, "transaction failed");
                let message = match ticket.kind {
                    MutationKind::Stake => "Staking failed",
                    MutationKind::Withdraw => "Withdraw failed",
                };
                self.notify(Notification::error(message));
                Err(e)
            }
        }
    }

    // -- Sequential drivers --

    pub async fn connect(&mut self, service: &StakingService) -> Result<()> {
        self.begin_connect(service.has_provider())?;
        let ticket = self.apply_connect(service.request_account().await)?;
        self.run_query(service, ticket).await
    }

    pub async fn refresh(&mut self, service: &StakingService) -> Result<()> {
        let ticket = self.begin_query().ok_or(StakingError::NotConnected)?;
        self.run_query(service, ticket).await
    }

    pub async fn stake(&mut self, service: &StakingService) -> Result<()> {
        let ticket = self.begin_stake()?;
        let result = service.stake(ticket.from, ticket.value).await;
        let query = self.apply_mutation(ticket, result)?;
        self.run_query(service, query).await
    }

    pub async fn withdraw(&mut self, service: &StakingService) -> Result<()> {
        let ticket = self.begin_withdraw()?;
        let result = service.withdraw(ticket.from).await;
        let query = self.apply_mutation(ticket, result)?;
        self.run_query(service, query).await
    }

    async fn run_query(&mut self, service: &StakingService, ticket: QueryTicket) -> Result<()> {
        let result = service.fetch_stake(ticket.account).await;
        self.apply_stake(ticket, result).map(|_| ())
    }
}
