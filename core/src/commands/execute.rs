use alloy_primitives::B256;
use anyhow::Result;
use chrono::Local;

use super::help::help_text;
use super::Command;
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::display;
use crate::error::StakingError;
use crate::service::StakingService;
use crate::view::ViewState;

/// Precondition failures are already reported as notifications by the
/// dashboard; anything else carries detail worth printing.
fn settle(result: crate::error::Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_precondition() => Ok(()),
        other => Ok(other?),
    }
}

/// Once a transaction is mined, a failed refetch only leaves the record
/// stale (and notified); the command itself still succeeded.
fn landed(
    dashboard: &Dashboard,
    before: Option<B256>,
    result: crate::error::Result<()>,
) -> Result<()> {
    if dashboard.last_transaction() != before {
        if let Err(e) = result {
            tracing::warn!(error = %e, "stake refresh after transaction failed");
        }
        return Ok(());
    }
    settle(result)
}

impl Command {
    /// Execute a command against the dashboard and return the output string.
    /// Notifications raised along the way stay queued on the dashboard for
    /// the caller to display.
    pub async fn execute(
        &self,
        dashboard: &mut Dashboard,
        service: &StakingService,
        config: &DashboardConfig,
        json_output: bool,
    ) -> Result<String> {
        let summary = |dashboard: &Dashboard| {
            if json_output {
                display::format_stake_json(dashboard.stake(), config.decimals)
            } else {
                ViewState::project(dashboard, &config.token_symbol, &Local).summary()
            }
        };

        match self {
            Command::Connect => {
                settle(dashboard.connect(service).await)?;
                if !dashboard.session().is_connected() {
                    return Ok(String::new());
                }
                Ok(summary(dashboard))
            }

            Command::Stake { amount } => {
                dashboard.set_amount_input(amount.clone());
                let before = dashboard.last_transaction();
                let result = dashboard.stake(service).await;
                landed(dashboard, before, result)?;
                if dashboard.last_transaction() == before {
                    return Ok(String::new());
                }
                Ok(transaction_output(dashboard, config, json_output, summary(dashboard)))
            }

            Command::Withdraw => {
                let before = dashboard.last_transaction();
                let result = dashboard.withdraw(service).await;
                landed(dashboard, before, result)?;
                if dashboard.last_transaction() == before {
                    return Ok(String::new());
                }
                Ok(transaction_output(dashboard, config, json_output, summary(dashboard)))
            }

            Command::StakeInfo => {
                if !dashboard.session().is_connected() {
                    return Err(StakingError::NotConnected.into());
                }
                dashboard.refresh(service).await?;
                Ok(summary(dashboard))
            }

            Command::Address => {
                let address = dashboard
                    .session()
                    .address()
                    .ok_or(StakingError::NotConnected)?;
                if json_output {
                    Ok(display::format_address_json(&address))
                } else {
                    Ok(address.to_checksum(None))
                }
            }

            Command::Owner => {
                let owner = service.owner().await?;
                if json_output {
                    Ok(serde_json::json!({ "owner": owner.to_checksum(None) }).to_string())
                } else {
                    Ok(owner.to_checksum(None))
                }
            }

            Command::Status => {
                let status = service.status().await?;
                let owner = status
                    .owner
                    .map(|o| o.to_checksum(None))
                    .unwrap_or_else(|| "-".to_string());
                if json_output {
                    Ok(serde_json::json!({
                        "provider": status.provider,
                        "chain_id": status.chain_id,
                        "contract": status.contract.to_checksum(None),
                        "owner": owner,
                        "phase": dashboard.phase().to_string(),
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "  Provider: {}\n  Chain ID: {}\n  Contract: {}\n  Owner:    {}\n  State:    {}",
                        status.provider,
                        status.chain_id,
                        status.contract.to_checksum(None),
                        owner,
                        dashboard.phase(),
                    ))
                }
            }

            Command::Help { command } => Ok(help_text(command.as_deref())),

            Command::Exit => Ok(String::new()),
        }
    }
}

fn transaction_output(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    json_output: bool,
    summary: String,
) -> String {
    let hash = dashboard
        .last_transaction()
        .map(|h| h.to_string())
        .unwrap_or_default();
    if json_output {
        serde_json::json!({
            "transaction": hash,
            "explorer": config.explorer_tx_url(&hash),
            "stake": serde_json::from_str::<serde_json::Value>(&summary).unwrap_or_default(),
        })
        .to_string()
    } else {
        format!(
            "  Transaction:  {hash}\n  Explorer:     {}\n{summary}",
            config.explorer_tx_url(&hash)
        )
    }
}
