mod repl;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use qari_staking_core::commands::Command;
use qari_staking_core::config::{default_config_path, DashboardConfig};
use qari_staking_core::{Dashboard, Notification, ReferralTag, StakingService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qari-staking", about = "QARI staking dashboard", version)]
pub(crate) struct Cli {
    /// Wallet provider JSON-RPC endpoint (e.g. http://127.0.0.1:1248)
    #[arg(long, env = "QARI_PROVIDER_URL")]
    provider: Option<String>,

    /// Staking contract address
    #[arg(long, env = "QARI_CONTRACT")]
    contract: Option<String>,

    /// Config file (default: <data dir>/qari/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use a simulated in-memory chain instead of a real provider
    #[arg(long)]
    simulate: bool,

    /// Page URL the dashboard was opened from; its `ref` parameter is recorded
    #[arg(long)]
    url: Option<String>,

    /// Referral tag (overrides --url)
    #[arg(long = "ref")]
    referral: Option<String>,

    /// Run a single command and exit
    #[arg(long)]
    cmd: Option<String>,

    /// Output in JSON format (useful with --cmd)
    #[arg(long)]
    json: bool,

    /// Allow non-HTTPS provider URLs on non-loopback hosts
    #[arg(long)]
    insecure: bool,

    /// Skip confirmation prompts for stake and withdraw
    #[arg(long)]
    yes: bool,
}

impl Cli {
    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => default_config_path(),
        }
    }

    /// Load the config file and apply flag / env overrides on top.
    fn resolve_config(&self) -> Result<DashboardConfig> {
        let path = self.config_path()?;
        DashboardConfig::load(&path)?
            .with_overrides(self.provider.as_deref(), self.contract.as_deref())
    }

    fn referral(&self) -> Option<ReferralTag> {
        match &self.referral {
            Some(tag) => ReferralTag::new(tag),
            None => self.url.as_deref().and_then(ReferralTag::from_url),
        }
    }

    /// Everything a session needs: effective config, service, and a fresh dashboard.
    fn session(&self) -> Result<(DashboardConfig, StakingService, Dashboard)> {
        let config = self.resolve_config()?;
        if !self.simulate && config.provider_url.is_none() {
            tracing::warn!("no provider configured; use --provider or --simulate");
        }
        let service = StakingService::from_config(&config, self.simulate, self.insecure)?;
        let dashboard = Dashboard::new(config.decimals).with_referral(self.referral());
        Ok((config, service, dashboard))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn print_notifications(notifications: &[Notification]) {
    for n in notifications {
        if n.is_error() {
            eprintln!("{n}");
        } else {
            println!("{n}");
        }
    }
}

pub(crate) fn prompt_confirm(prompt: &str) -> bool {
    use std::io::Write;
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush().ok();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).is_ok() && input.trim().eq_ignore_ascii_case("y")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(cmd_str) = &cli.cmd {
        // One-shot mode
        run_oneshot(&cli, cmd_str).await
    } else {
        // REPL mode
        repl::run_repl(&cli).await
    }
}

/// Whether a one-shot command needs a connected wallet first.
fn needs_session(command: &Command) -> bool {
    matches!(
        command,
        Command::Stake { .. } | Command::Withdraw | Command::StakeInfo | Command::Address
    )
}

async fn run_oneshot(cli: &Cli, cmd_str: &str) -> Result<()> {
    let command = Command::parse(cmd_str)?;
    if command == Command::Exit {
        return Ok(());
    }

    let (config, service, mut dashboard) = cli.session()?;

    if needs_session(&command) {
        // Errors are reported through the notification queue below
        let _ = dashboard.connect(&service).await;
        if !dashboard.session().is_connected() {
            print_notifications(&dashboard.take_notifications());
            bail!("Wallet connection failed");
        }
        // Only the command's own notifications are interesting here
        dashboard.take_notifications();
    }

    if let Some(prompt) = command.confirmation_prompt(&config.token_symbol) {
        if !cli.yes && !prompt_confirm(&prompt) {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = command
        .execute(&mut dashboard, &service, &config, cli.json)
        .await;
    // Shown even when the command failed, so a mined transaction is never hidden
    let notifications = dashboard.take_notifications();
    if !cli.json {
        print_notifications(&notifications);
    }
    let output = oneshot_result(outcome, &notifications)?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Exit status of a one-shot command. Output from a command that did its job
/// (e.g. a mined stake whose refresh failed) is a success; an error
/// notification with nothing to show is a failure.
fn oneshot_result(outcome: Result<String>, notifications: &[Notification]) -> Result<String> {
    let output = outcome?;
    if output.is_empty() {
        if let Some(failure) = notifications.iter().find(|n| n.is_error()) {
            bail!("{}", failure.message);
        }
    }
    Ok(output)
}
