#[must_use]
pub fn help_text(command: Option<&str>) -> String {
    match command {
        Some("connect") | Some("conn") => {
            "connect\n  Request account access from the wallet provider and load your stake.\n  Alias: conn".to_string()
        }
        Some("stake") => {
            "stake <amount>\n  Stake native tokens in the staking contract.\n  Amount is in whole-token units (e.g. '0.01' for 0.01 BNB).\n  Requires a connected wallet.".to_string()
        }
        Some("withdraw") | Some("unstake") => {
            "withdraw\n  Withdraw your entire stake from the contract.\n  Alias: unstake".to_string()
        }
        Some("stake_info") | Some("info") | Some("refresh") => {
            "stake_info\n  Reload and show your current stake and since when it is staked.\n  Aliases: info, refresh".to_string()
        }
        Some("address") | Some("addr") => {
            "address\n  Show the connected wallet address.\n  Alias: addr".to_string()
        }
        Some("owner") => "owner\n  Show the staking contract's owner address.".to_string(),
        Some("status") => {
            "status\n  Show the wallet provider, chain ID, contract address, and owner.".to_string()
        }
        Some("help") => "help [command]\n  Show help for all commands or a specific one.".to_string(),
        Some("exit") | Some("quit") | Some("q") => {
            "exit\n  Leave the dashboard.\n  Aliases: quit, q".to_string()
        }
        Some(other) => format!("Unknown command '{other}'. Type 'help' for a list of commands."),
        None => {
            "Available commands:\n\
             \x20 connect          Connect your wallet\n\
             \x20 stake <amount>   Stake native tokens\n\
             \x20 withdraw         Withdraw your stake\n\
             \x20 stake_info       Show your current stake\n\
             \x20 address          Show the connected address\n\
             \x20 owner            Show the contract owner\n\
             \x20 status           Show provider and contract status\n\
             \x20 help [cmd]       Show help for a command\n\
             \x20 exit             Exit the dashboard\n\
             \n\
             Type 'help <command>' for detailed help on a specific command."
                .to_string()
        }
    }
}
