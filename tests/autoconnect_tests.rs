//! Auto-Connect Tests: silent reconnect, retries with backoff, one-shot guard

mod common;

use common::{eth_account, harness, sui_account, Harness, MockWallet, RecordingEnvironment};
use dappkit::{
    AutoConnect, AutoConnectConfig, AutoConnectStatus, ConnectArgs, DAppKitError, ErrorSeverity, MemoryRegistry,
    WalletHandle, WalletListOptions,
};
use std::rc::Rc;
use std::time::Duration;

fn listed(h: &Harness, wallet: &Rc<MockWallet>) {
    let handle: WalletHandle = wallet.clone();
    h.session.set_wallets(vec![handle]);
}

fn controller(h: &Harness, env: &Rc<RecordingEnvironment>) -> AutoConnect {
    AutoConnect::new(h.connection.clone(), env.clone(), AutoConnectConfig::enabled())
}

#[tokio::test]
async fn reconnects_persisted_account() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa"), sui_account("0xb")]));
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xb");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert_eq!(auto.status(), AutoConnectStatus::Success);
    assert!(auto.has_succeeded());
    assert_eq!(auto.attempts(), 1);
    assert_eq!(w.silent_connects.get(), 1);
    assert_eq!(h.session.current_account().map(|a| a.address).as_deref(), Some("0xb"));
    assert!(env.sleeps.borrow().is_empty());
}

#[tokio::test]
async fn missing_persisted_account_selects_first() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xb"), sui_account("0xc")]));
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xa");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert!(auto.has_succeeded());
    assert!(auto.error().is_none());
    assert_eq!(h.session.current_account().map(|a| a.address).as_deref(), Some("0xb"));
}

#[tokio::test]
async fn no_record_fails_after_one_attempt() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert_eq!(auto.status(), AutoConnectStatus::Failed);
    assert_eq!(auto.attempts(), 1);
    assert_eq!(w.connect_calls.get(), 0);
    assert!(env.sleeps.borrow().is_empty());
    assert_eq!(auto.error(), Some(DAppKitError::NoSavedSession));
    assert_eq!(auto.error().map(|e| e.severity()), Some(ErrorSeverity::Info));
}

#[tokio::test]
async fn rejected_connects_retry_with_increasing_backoff() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    w.reject_connects.set(3);
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xa");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = AutoConnect::new(
        h.connection.clone(),
        env.clone(),
        AutoConnectConfig::enabled().with_max_retries(3).with_retry_delay(Duration::from_millis(1000)),
    );
    auto.initialize().await;

    assert!(auto.has_failed());
    assert_eq!(auto.attempts(), 3);
    assert_eq!(w.connect_calls.get(), 3);
    let sleeps = env.sleeps.borrow().clone();
    assert_eq!(sleeps, vec![Duration::from_millis(1000), Duration::from_millis(2000)]);
    assert!(sleeps.windows(2).all(|w| w[0] < w[1]));
    assert!(matches!(auto.error(), Some(DAppKitError::Wallet(_))));
    assert!(h.session.persistence().load().is_some(), "record kept after rejection");
    assert!(h.session.is_disconnected());
    assert!(h.connection.error().is_none(), "background failures stay out of the connect error slot");
    assert!(!h.connection.is_connecting());
}

#[tokio::test]
async fn rejection_then_success() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    w.reject_connects.set(1);
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xa");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert!(auto.has_succeeded());
    assert_eq!(auto.attempts(), 2);
    assert_eq!(env.sleeps.borrow().len(), 1);
}

#[tokio::test]
async fn unknown_wallet_clears_record_without_retry() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    h.session.persistence().save("Gone", "0xa");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert!(auto.has_failed());
    assert_eq!(auto.attempts(), 1);
    assert!(h.session.persistence().load().is_none());
}

#[tokio::test]
async fn wallet_without_family_accounts_clears_record() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![eth_account("0xeth")]));
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xeth");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert!(auto.has_failed());
    assert_eq!(auto.error(), Some(DAppKitError::NoAccountsConnected));
    assert_eq!(auto.attempts(), 1);
    assert!(h.session.is_disconnected());
    assert!(h.session.persistence().load().is_none());
}

#[tokio::test]
async fn initialize_runs_once() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xa");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;
    h.connection.disconnect().await.unwrap();
    h.session.persistence().save("Slush", "0xa");
    auto.initialize().await;

    assert_eq!(w.connect_calls.get(), 1);
}

#[tokio::test]
async fn disabled_config_never_connects() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xa");
    let env = Rc::new(RecordingEnvironment::default());

    let auto = AutoConnect::new(h.connection.clone(), env.clone(), AutoConnectConfig::default());
    assert_eq!(auto.status(), AutoConnectStatus::Disabled);
    auto.initialize().await;

    assert_eq!(auto.status(), AutoConnectStatus::Disabled);
    assert_eq!(w.connect_calls.get(), 0);
    assert!(!h.session.auto_connect_enabled());
}

#[tokio::test]
async fn configure_toggles_status_and_session_flag() {
    let h = harness();
    let env = Rc::new(RecordingEnvironment::default());
    let auto = AutoConnect::new(h.connection.clone(), env, AutoConnectConfig::default());

    auto.configure(AutoConnectConfig::enabled());
    assert_eq!(auto.status(), AutoConnectStatus::Idle);
    assert!(h.session.auto_connect_enabled());

    auto.configure(AutoConnectConfig::default());
    assert_eq!(auto.status(), AutoConnectStatus::Disabled);
    assert!(!h.session.auto_connect_enabled());
}

#[tokio::test]
async fn configure_with_preferences_reorders_listed_wallets() {
    let h = harness();
    let registry = MemoryRegistry::new();
    registry.register(Rc::new(MockWallet::new("Slush")));
    registry.register(Rc::new(MockWallet::new("Suiet")));
    h.session.attach_registry(Rc::new(registry), WalletListOptions::default());
    assert_eq!(h.session.snapshot().wallets, ["Slush", "Suiet"]);

    let env = Rc::new(RecordingEnvironment::default());
    let auto = AutoConnect::new(h.connection.clone(), env, AutoConnectConfig::default());
    auto.configure(AutoConnectConfig::enabled().with_preferred_wallets(vec!["Suiet".into()]));

    assert_eq!(h.session.snapshot().wallets, ["Suiet", "Slush"]);
}

#[tokio::test]
async fn already_connected_succeeds_without_io() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    h.connection.connect(ConnectArgs::new(w.clone())).await.unwrap();
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;

    assert!(auto.has_succeeded());
    assert_eq!(auto.attempts(), 0);
    assert_eq!(w.connect_calls.get(), 1);
}

#[tokio::test]
async fn attempted_flag_blocks_second_controller_until_reset() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    let env = Rc::new(RecordingEnvironment::default());

    let first = controller(&h, &env);
    first.initialize().await;
    assert!(first.has_failed());
    assert!(h.session.auto_connect_attempted());

    h.session.persistence().save("Slush", "0xa");
    let second = controller(&h, &env);
    second.initialize().await;
    assert!(second.has_failed());
    assert_eq!(w.connect_calls.get(), 0);

    second.reset();
    assert_eq!(second.status(), AutoConnectStatus::Idle);
    assert!(second.error().is_none());
    assert!(!h.session.auto_connect_attempted());
    second.initialize().await;
    assert!(second.has_succeeded());
}

#[tokio::test]
async fn retry_ignores_one_shot_flag() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    let env = Rc::new(RecordingEnvironment::default());

    let auto = controller(&h, &env);
    auto.initialize().await;
    assert!(auto.has_failed());

    h.session.persistence().save("Slush", "0xa");
    auto.retry().await;
    assert!(auto.has_succeeded());
    assert_eq!(auto.attempts(), 1);
}

#[tokio::test]
async fn interactive_environment_waits_for_load_and_settles() {
    let h = harness();
    let w = Rc::new(MockWallet::new("Slush").with_accounts(vec![sui_account("0xa")]));
    listed(&h, &w);
    h.session.persistence().save("Slush", "0xa");
    let env = Rc::new(RecordingEnvironment::interactive());

    let auto = AutoConnect::new(
        h.connection.clone(),
        env.clone(),
        AutoConnectConfig::enabled().with_settle_delay(Duration::from_millis(250)),
    );
    auto.initialize().await;

    assert_eq!(env.loads.get(), 1);
    assert_eq!(env.sleeps.borrow().as_slice(), &[Duration::from_millis(250)]);
    assert!(auto.has_succeeded());
}
