/// REPL shell, Reedline-based interactive dashboard session.
use anyhow::Result;
use qari_staking_core::commands::Command;
use qari_staking_core::Dashboard;
use reedline::{DefaultCompleter, DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use crate::{print_notifications, prompt_confirm, Cli};

const COMMANDS: &[&str] = &[
    "connect", "conn", "stake", "withdraw", "unstake", "stake_info", "info", "refresh",
    "address", "addr", "owner", "status", "help", "exit", "quit", "q",
];

fn build_prompt(dashboard: &Dashboard) -> DefaultPrompt {
    let label = dashboard
        .session()
        .short_address()
        .unwrap_or_else(|| "not connected".to_string());
    DefaultPrompt::new(
        DefaultPromptSegment::Basic(format!("[qari {label}]")),
        DefaultPromptSegment::Empty,
    )
}

pub async fn run_repl(cli: &Cli) -> Result<()> {
    let (config, service, mut dashboard) = cli.session()?;

    println!("QARI Staking v{}", env!("CARGO_PKG_VERSION"));
    println!("Contract: {}", service.contract().address());
    if let Some(tag) = dashboard.referral() {
        println!("Referral: {tag}");
    }
    println!("Type 'connect' to connect your wallet, 'help' for a list of commands.");
    println!();

    let completer = Box::new(DefaultCompleter::new(
        COMMANDS.iter().map(|c| c.to_string()).collect(),
    ));
    let mut line_editor = Reedline::create().with_completer(completer);
    let mut prompt = build_prompt(&dashboard);

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let cmd = match Command::parse(line) {
                    Ok(Command::Exit) => {
                        println!("Goodbye.");
                        break;
                    }
                    Ok(cmd) => cmd,
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                };

                // Confirmation only makes sense once a transaction could actually go out
                if cmd.is_mutation() && dashboard.can_submit() && !cli.yes {
                    if let Some(msg) = cmd.confirmation_prompt(&config.token_symbol) {
                        if !prompt_confirm(&msg) {
                            println!("Cancelled.");
                            continue;
                        }
                    }
                }

                let result = cmd.execute(&mut dashboard, &service, &config, cli.json).await;
                let notifications = dashboard.take_notifications();
                print_notifications(&notifications);
                match result {
                    Ok(output) if !output.is_empty() => println!("{output}"),
                    Ok(_) => {}
                    // Failed actions already raised an error notification
                    Err(_) if notifications.iter().any(|n| n.is_error()) => {}
                    Err(e) => eprintln!("Error: {e}"),
                }

                if matches!(cmd, Command::Connect) {
                    prompt = build_prompt(&dashboard);
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("Goodbye.");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        }
    }

    Ok(())
}
