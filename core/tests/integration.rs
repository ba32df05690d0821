/// End-to-end dashboard flows against the in-memory chain, plus live tests
/// against a real wallet provider.
/// Run the live ones with: QARI_TEST_PROVIDER_URL=http://127.0.0.1:8545 cargo test -- --ignored
use std::sync::Arc;

use qari_staking_core::commands::Command;
use qari_staking_core::config::DashboardConfig;
use qari_staking_core::contract::{StakingContract, DEFAULT_CONTRACT_ADDRESS};
use qari_staking_core::network::{InMemoryProvider, WalletProvider, SIMULATED_ACCOUNT};
use qari_staking_core::{
    Dashboard, NotificationLevel, Phase, StakingError, StakingService, ViewState, U256,
};

fn simulated() -> (Arc<InMemoryProvider>, StakingService) {
    let provider = Arc::new(InMemoryProvider::new(DEFAULT_CONTRACT_ADDRESS));
    let service = StakingService::new(
        Some(provider.clone() as Arc<dyn WalletProvider>),
        StakingContract::default(),
    );
    (provider, service)
}

fn wei(bnb_hundredths: u64) -> U256 {
    U256::from(bnb_hundredths) * U256::from(10_000_000_000_000_000u64)
}

#[tokio::test]
async fn connect_without_provider_leaves_session_empty() {
    let service = StakingService::new(None, StakingContract::default());
    let mut dashboard = Dashboard::new(18);

    let err = dashboard.connect(&service).await.unwrap_err();
    assert!(matches!(err, StakingError::NoProvider));
    assert!(!dashboard.session().is_connected());
    assert_eq!(dashboard.phase(), Phase::Disconnected);

    let notes = dashboard.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Wallet provider not detected");
}

#[tokio::test]
async fn connect_loads_empty_stake() {
    let (_provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);

    dashboard.connect(&service).await.unwrap();
    assert_eq!(dashboard.session().address(), Some(SIMULATED_ACCOUNT));
    assert_eq!(dashboard.phase(), Phase::Ready);
    assert!(dashboard.stake().is_empty());

    let view = ViewState::project(&dashboard, "BNB", &chrono::Utc);
    assert_eq!(view.your_stake, "0 BNB");
    assert_eq!(view.staked_since, "-");
}

#[tokio::test]
async fn connect_with_no_authorised_accounts_fails() {
    let provider = Arc::new(InMemoryProvider::new(DEFAULT_CONTRACT_ADDRESS).with_accounts(vec![]));
    let service = StakingService::new(Some(provider as Arc<dyn WalletProvider>), StakingContract::default());
    let mut dashboard = Dashboard::new(18);

    let err = dashboard.connect(&service).await.unwrap_err();
    assert!(matches!(err, StakingError::Transaction(_)));
    assert!(!dashboard.session().is_connected());
}

#[tokio::test]
async fn stake_one_hundredth_records_amount_and_time() {
    let (_provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();

    dashboard.set_amount_input("0.01");
    let before = chrono::Utc::now().timestamp() as u64;
    dashboard.stake(&service).await.unwrap();
    let after = chrono::Utc::now().timestamp() as u64;

    let record = *dashboard.stake();
    assert_eq!(record.amount, wei(1));
    assert!(
        record.timestamp >= before && record.timestamp <= after + 1,
        "timestamp {} should be within [{before}, {after}]",
        record.timestamp
    );

    let view = ViewState::project(&dashboard, "BNB", &chrono::Utc);
    assert_eq!(view.your_stake, "0.01 BNB");
    assert_ne!(view.staked_since, "-");
    assert_eq!(dashboard.amount_input(), "");
    assert!(dashboard.last_transaction().is_some());
}

#[tokio::test]
async fn repeated_stakes_never_decrease() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();

    let mut previous = U256::ZERO;
    for (i, amount) in ["0.01", "0.5", "1", "0.000000000000000001"].iter().enumerate() {
        provider.set_time(1_700_000_000 + i as u64);
        dashboard.set_amount_input(*amount);
        dashboard.stake(&service).await.unwrap();
        let current = dashboard.stake().amount;
        assert!(current >= previous, "stake decreased after staking {amount}");
        previous = current;
    }
    assert_eq!(dashboard.stake().timestamp, 1_700_000_003);
}

#[tokio::test]
async fn withdraw_clears_stake() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();
    let start_balance = provider.balance(&SIMULATED_ACCOUNT);

    dashboard.set_amount_input("1.5");
    dashboard.stake(&service).await.unwrap();
    dashboard.withdraw(&service).await.unwrap();

    assert!(dashboard.stake().amount.is_zero());
    assert_eq!(provider.balance(&SIMULATED_ACCOUNT), start_balance);
    let messages: Vec<_> = dashboard
        .take_notifications()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(
        messages,
        ["Wallet connected", "Staked successfully", "Withdraw successful"]
    );
}

#[tokio::test]
async fn invalid_amounts_submit_nothing() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();

    for bad in ["", "   ", "abc", "0", "0.0", "-0.5", "1e3", "1.2.3", "NaN", "0.0000000000000000001"] {
        dashboard.set_amount_input(bad);
        let err = dashboard.stake(&service).await.unwrap_err();
        assert!(matches!(err, StakingError::InvalidAmount(_)), "'{bad}' gave {err:?}");
    }
    assert!(provider.sent_transactions().is_empty());
    assert_eq!(dashboard.phase(), Phase::Ready);
}

#[tokio::test]
async fn stake_before_connect_submits_nothing() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.set_amount_input("1");

    assert!(matches!(
        dashboard.stake(&service).await,
        Err(StakingError::NotConnected)
    ));
    assert!(matches!(
        dashboard.withdraw(&service).await,
        Err(StakingError::NotConnected)
    ));
    assert!(provider.sent_transactions().is_empty());
}

#[tokio::test]
async fn rejected_stake_keeps_state_and_notifies() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();
    dashboard.take_notifications();

    provider.reject_next_send("User denied transaction signature");
    dashboard.set_amount_input("0.01");
    let err = dashboard.stake(&service).await.unwrap_err();
    assert!(err.to_string().contains("User denied"));

    assert!(dashboard.stake().is_empty());
    assert_eq!(dashboard.phase(), Phase::Ready);
    assert_eq!(dashboard.amount_input(), "0.01");
    let notes = dashboard.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Staking failed");
}

#[tokio::test]
async fn withdraw_without_stake_reports_failure() {
    let (_provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();

    let err = dashboard.withdraw(&service).await.unwrap_err();
    assert!(matches!(err, StakingError::Transaction(_)));
    assert_eq!(
        dashboard.notifications().last().map(|n| n.message.as_str()),
        Some("Withdraw failed")
    );
}

#[tokio::test]
async fn duplicate_submission_reaches_provider_once() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();

    dashboard.set_amount_input("0.01");
    let first = dashboard.begin_stake().unwrap();
    // A second click while the first is pending
    assert!(matches!(dashboard.begin_stake(), Err(StakingError::MutationInFlight)));

    let receipt = service.stake(first.from, first.value).await;
    let query = dashboard.apply_mutation(first, receipt).unwrap();
    let record = service.fetch_stake(query.account).await;
    dashboard.apply_stake(query, record).unwrap();

    assert_eq!(provider.sent_transactions().len(), 1);
    assert_eq!(dashboard.stake().amount, wei(1));
}

#[tokio::test]
async fn overlapping_queries_keep_latest_issued() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();

    let old_ticket = dashboard.begin_query().unwrap();
    let old_result = service.fetch_stake(old_ticket.account).await;

    service.stake(SIMULATED_ACCOUNT, wei(3)).await.unwrap();
    let new_ticket = dashboard.begin_query().unwrap();
    let new_result = service.fetch_stake(new_ticket.account).await;

    // The newer query resolves first, the older one arrives late
    assert!(dashboard.apply_stake(new_ticket, new_result).unwrap());
    assert!(!dashboard.apply_stake(old_ticket, old_result).unwrap());
    assert_eq!(dashboard.stake().amount, wei(3));
    assert_eq!(provider.stake_of(&SIMULATED_ACCOUNT).amount, wei(3));
}

#[tokio::test]
async fn failed_query_surfaces_notification() {
    let (provider, service) = simulated();
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.unwrap();
    dashboard.take_notifications();

    provider.set_fail_calls(true);
    assert!(dashboard.refresh(&service).await.is_err());
    assert!(dashboard.stake_is_stale());
    let notes = dashboard.take_notifications();
    assert!(notes[0].is_error());
    assert!(notes[0].message.starts_with("Failed to load stake"));

    provider.set_fail_calls(false);
    dashboard.refresh(&service).await.unwrap();
    assert!(!dashboard.stake_is_stale());
}

#[tokio::test]
async fn stake_command_succeeds_when_only_the_refresh_fails() {
    let (provider, service) = simulated();
    let config = DashboardConfig::default();
    let mut dashboard = Dashboard::new(config.decimals);
    dashboard.connect(&service).await.unwrap();
    dashboard.take_notifications();

    // Sends still go through; only the follow-up stakes() read fails
    provider.set_fail_calls(true);
    let out = Command::parse("stake 0.5")
        .unwrap()
        .execute(&mut dashboard, &service, &config, false)
        .await
        .unwrap();
    assert!(out.contains("Transaction:"), "got {out}");
    assert!(out.contains("(may be outdated)"), "got {out}");

    let notes = dashboard.take_notifications();
    assert_eq!(notes[0].message, "Staked successfully");
    assert!(notes[1].is_error());
    assert!(notes[1].message.starts_with("Failed to load stake"));
    assert_eq!(provider.stake_of(&SIMULATED_ACCOUNT).amount, wei(50));

    // A rejected send is still an error, even with reads failing
    provider.reject_next_send("User rejected the request");
    assert!(Command::parse("withdraw")
        .unwrap()
        .execute(&mut dashboard, &service, &config, false)
        .await
        .is_err());
    assert_eq!(provider.stake_of(&SIMULATED_ACCOUNT).amount, wei(50));
}

#[tokio::test]
async fn command_session_round_trip() {
    let (_provider, service) = simulated();
    let config = DashboardConfig::default();
    let mut dashboard = Dashboard::new(config.decimals);

    let out = Command::parse("stake 1")
        .unwrap()
        .execute(&mut dashboard, &service, &config, false)
        .await
        .unwrap();
    assert!(out.is_empty(), "stake before connect prints nothing, got {out}");
    assert_eq!(
        dashboard.take_notifications()[0].message,
        "Connect your wallet first"
    );

    let out = Command::parse("connect")
        .unwrap()
        .execute(&mut dashboard, &service, &config, false)
        .await
        .unwrap();
    assert!(out.contains("Staked Since: -"));

    let out = Command::parse("stake 0.25")
        .unwrap()
        .execute(&mut dashboard, &service, &config, true)
        .await
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["stake"]["amount"], "0.25");
    assert!(v["explorer"].as_str().unwrap().starts_with("https://bscscan.com/tx/0x"));

    let out = Command::parse("address")
        .unwrap()
        .execute(&mut dashboard, &service, &config, false)
        .await
        .unwrap();
    assert_eq!(out, SIMULATED_ACCOUNT.to_checksum(None));

    let out = Command::parse("withdraw")
        .unwrap()
        .execute(&mut dashboard, &service, &config, false)
        .await
        .unwrap();
    assert!(out.contains("Your Stake:   0 BNB"));
}

// -- Live provider tests --

fn live_service() -> Option<StakingService> {
    let url = std::env::var("QARI_TEST_PROVIDER_URL").ok()?;
    let config = DashboardConfig {
        provider_url: Some(url),
        contract_address: std::env::var("QARI_TEST_CONTRACT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CONTRACT_ADDRESS),
        ..Default::default()
    };
    Some(StakingService::from_config(&config, false, true).expect("invalid provider url"))
}

#[tokio::test]
#[ignore]
async fn live_connect_and_query() {
    let Some(service) = live_service() else {
        eprintln!("QARI_TEST_PROVIDER_URL not set, skipping");
        return;
    };
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.expect("connect failed");
    assert_eq!(dashboard.phase(), Phase::Ready);
    eprintln!("stake: {:?}", dashboard.stake());
}

#[tokio::test]
#[ignore]
async fn live_stake_then_withdraw() {
    let Some(service) = live_service() else {
        eprintln!("QARI_TEST_PROVIDER_URL not set, skipping");
        return;
    };
    let mut dashboard = Dashboard::new(18);
    dashboard.connect(&service).await.expect("connect failed");
    let before = dashboard.stake().amount;

    dashboard.set_amount_input("0.001");
    dashboard.stake(&service).await.expect("stake failed");
    assert!(dashboard.stake().amount >= before);

    dashboard.withdraw(&service).await.expect("withdraw failed");
    assert!(dashboard.stake().amount.is_zero());
}
