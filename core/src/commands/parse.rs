use anyhow::{bail, Result};

use super::Command;

impl Command {
    /// Parse a command from a raw input string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("No command entered. Type 'help' for a list of commands.");
        }

        let mut parts = input.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

        match cmd.as_str() {
            "connect" | "conn" => Ok(Command::Connect),

            "stake" => {
                let amount = arg.ok_or_else(|| {
                    anyhow::anyhow!("Missing amount. Usage: stake <amount>")
                })?;
                if amount.split_whitespace().count() > 1 {
                    bail!("Too many arguments. Usage: stake <amount>");
                }
                // Full validation happens at submission time, against the
                // configured decimals.
                Ok(Command::Stake {
                    amount: amount.to_string(),
                })
            }

            "withdraw" | "unstake" => Ok(Command::Withdraw),

            "stake_info" | "info" | "refresh" => Ok(Command::StakeInfo),

            "address" | "addr" => Ok(Command::Address),

            "owner" => Ok(Command::Owner),

            "status" => Ok(Command::Status),

            "help" | "?" => Ok(Command::Help {
                command: arg.map(|s| s.to_lowercase()),
            }),

            "exit" | "quit" | "q" => Ok(Command::Exit),

            other => bail!("Unknown command '{other}'. Type 'help' for a list of commands."),
        }
    }
}
