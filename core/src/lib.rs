pub mod commands;
pub mod config;
pub mod contract;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod network;
pub mod notify;
pub mod referral;
pub mod service;
pub mod session;
pub mod view;

pub use commands::Command;
pub use config::DashboardConfig;
pub use contract::StakingContract;
pub use dashboard::{Dashboard, MutationState, MutationTicket, Phase, QueryTicket};
pub use error::{AmountError, StakingError};
pub use network::{InMemoryProvider, JsonRpcProvider, StakeRecord, WalletProvider};
pub use notify::{Notification, NotificationLevel};
pub use referral::ReferralTag;
pub use service::StakingService;
pub use session::WalletSession;
pub use view::ViewState;

pub use alloy_primitives::{Address, B256, U256};
