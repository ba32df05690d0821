//! Pure projection of the dashboard into display strings and flags.

use chrono::TimeZone;

use crate::dashboard::{Dashboard, MutationState, Phase};
use crate::display::{format_balance, format_staked_since};
use crate::network::MutationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    /// "Connect Wallet" or the truncated address.
    pub connect_label: String,
    pub amount_input: String,
    pub stake_enabled: bool,
    pub withdraw_enabled: bool,
    pub stake_label: &'static str,
    pub withdraw_label: &'static str,
    /// e.g. "0.01 BNB"
    pub your_stake: String,
    /// Local date-time, or "-" when never staked.
    pub staked_since: String,
    pub stale: bool,
}

impl ViewState {
    pub fn project<Tz: TimeZone>(dashboard: &Dashboard, symbol: &str, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let record = dashboard.stake();
        let can_submit = dashboard.can_submit();
        let (stake_label, withdraw_label) = match dashboard.mutation() {
            MutationState::Submitting(MutationKind::Stake) => ("Staking...", "Withdraw"),
            MutationState::Submitting(MutationKind::Withdraw) => ("Stake Now", "Withdrawing..."),
            MutationState::Idle => ("Stake Now", "Withdraw"),
        };

        Self {
            phase: dashboard.phase(),
            connect_label: dashboard
                .session()
                .short_address()
                .unwrap_or_else(|| "Connect Wallet".to_string()),
            amount_input: dashboard.amount_input().to_string(),
            stake_enabled: can_submit,
            withdraw_enabled: can_submit,
            stake_label,
            withdraw_label,
            your_stake: format_balance(record.amount, dashboard.decimals(), symbol),
            staked_since: format_staked_since(record.timestamp, tz),
            stale: dashboard.stake_is_stale(),
        }
    }

    /// Plain-text rendering used by the REPL.
    pub fn summary(&self) -> String {
        let stale = if self.stale { "  (may be outdated)" } else { "" };
        format!(
            "  Wallet:       {}\n  Your Stake:   {}{stale}\n  Staked Since: {}",
            self.connect_label, self.your_stake, self.staked_since,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{StakeRecord, TransactionReceipt};
    use alloy_primitives::{B256, U256};
    use chrono::Utc;

    fn connected(record: StakeRecord) -> Dashboard {
        let mut d = Dashboard::new(18);
        let ticket = d
            .apply_connect(Ok("0xe0711cc6FbF29F01581EB00149532E767EcAd741".parse().unwrap()))
            .unwrap();
        d.apply_stake(ticket, Ok(record)).unwrap();
        d
    }

    #[test]
    fn disconnected_view() {
        let view = ViewState::project(&Dashboard::new(18), "BNB", &Utc);
        assert_eq!(view.phase, Phase::Disconnected);
        assert_eq!(view.connect_label, "Connect Wallet");
        assert_eq!(view.your_stake, "0 BNB");
        assert_eq!(view.staked_since, "-");
        assert!(!view.stake_enabled);
        assert!(!view.withdraw_enabled);
    }

    #[test]
    fn never_staked_shows_placeholder() {
        let view = ViewState::project(&connected(StakeRecord::default()), "BNB", &Utc);
        assert_eq!(view.connect_label, "0xe071...d741");
        assert_eq!(view.staked_since, "-");
        assert!(view.summary().contains("Staked Since: -"));
    }

    #[test]
    fn staked_view_shows_amount_and_date() {
        let record = StakeRecord {
            amount: U256::from(10_000_000_000_000_000u64),
            timestamp: 1_700_000_000,
        };
        let view = ViewState::project(&connected(record), "BNB", &Utc);
        assert_eq!(view.your_stake, "0.01 BNB");
        assert_eq!(view.staked_since, "2023-11-14 22:13:20");
        assert_eq!(view.phase, Phase::Ready);
        assert!(view.stake_enabled);
    }

    #[test]
    fn submitting_disables_actions() {
        let mut d = connected(StakeRecord::default());
        d.set_amount_input("1");
        let ticket = d.begin_stake().unwrap();
        let view = ViewState::project(&d, "BNB", &Utc);
        assert_eq!(view.phase, Phase::Submitting);
        assert_eq!(view.stake_label, "Staking...");
        assert!(!view.stake_enabled && !view.withdraw_enabled);

        d.apply_mutation(
            ticket,
            Ok(TransactionReceipt {
                hash: B256::ZERO,
                block_number: None,
                success: true,
            }),
        )
        .unwrap();
        let view = ViewState::project(&d, "BNB", &Utc);
        assert_eq!(view.stake_label, "Stake Now");
        assert!(view.stake_enabled);
    }

    #[test]
    fn address_is_never_shown_untruncated() {
        let d = connected(StakeRecord::default());
        let view = ViewState::project(&d, "BNB", &Utc);
        let full = d.session().address().unwrap().to_checksum(None);
        assert!(!view.summary().contains(&full));
    }
}
