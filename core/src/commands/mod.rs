/// Command definitions and parsing for the dashboard REPL and one-shot mode.
mod execute;
mod help;
mod parse;

pub use help::help_text;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Request account access from the wallet provider
    Connect,
    /// Stake native tokens: stake <amount>
    Stake { amount: String },
    /// Withdraw the whole stake
    Withdraw,
    /// Show the current stake (refetched)
    StakeInfo,
    /// Show the connected address
    Address,
    /// Show the contract owner
    Owner,
    /// Show provider, chain, and contract
    Status,
    /// Print help
    Help { command: Option<String> },
    /// Exit the dashboard
    Exit,
}

impl Command {
    /// Returns a confirmation prompt if this command should ask before executing.
    pub fn confirmation_prompt(&self, symbol: &str) -> Option<String> {
        match self {
            Command::Stake { amount } => Some(format!("Stake {} {symbol}?", amount.trim())),
            Command::Withdraw => Some("Withdraw your entire stake?".to_string()),
            _ => None,
        }
    }

    /// Whether the command sends a transaction.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Command::Stake { .. } | Command::Withdraw)
    }
}
