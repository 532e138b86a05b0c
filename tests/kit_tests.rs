//! Integration Tests: DAppKit wiring, registry events, restart reconnect
//!
//! These tests verify:
//! 1. Configuration errors surface at construction
//! 2. Registry register/unregister flows into the session
//! 3. A persisted session reconnects silently after a restart
//! 4. File persistence under $DAPPKIT_ROOT

mod common;

use common::{sui_account, MockExecutor, MockWallet, RecordingEnvironment};
use dappkit::{
    AutoConnectConfig, ConnectArgs, DAppKit, DAppKitConfig, DAppKitError, KeyValueStore, MemoryRegistry, MemoryStore,
    WalletCapability,
};
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

fn config(storage: &MemoryStore) -> DAppKitConfig {
    DAppKitConfig::new("testnet")
        .with_network("testnet", Rc::new(MockExecutor::default()))
        .with_network("mainnet", Rc::new(MockExecutor::default()))
        .with_storage(Rc::new(storage.clone()))
        .with_environment(Rc::new(RecordingEnvironment::default()))
}

fn slush() -> Rc<MockWallet> {
    Rc::new(MockWallet::new("Slush").with_id("com.slush").with_accounts(vec![sui_account("0xa"), sui_account("0xb")]))
}

#[test]
fn unknown_default_network_is_rejected() {
    let result = DAppKit::from_config(
        DAppKitConfig::new("devnet").with_network("testnet", Rc::new(MockExecutor::default())),
        Rc::new(MemoryRegistry::new()),
    );
    assert!(matches!(result, Err(DAppKitError::ChainNotSupported(chain)) if chain == "sui:devnet"));
}

#[test]
fn registry_wallets_are_listed_with_preferences() {
    let registry = MemoryRegistry::new();
    registry.register(Rc::new(MockWallet::new("Suiet")));
    registry.register(slush());

    let kit = DAppKit::from_config(
        config(&MemoryStore::new()).with_preferred_wallets(vec!["Slush".into()]),
        Rc::new(registry.clone()),
    )
    .expect("kit");
    assert_eq!(kit.session().snapshot().wallets, ["com.slush", "Suiet"]);

    registry.register(Rc::new(MockWallet::new("Nightly")));
    assert_eq!(kit.session().wallets().len(), 3);

    kit.close();
    registry.register(Rc::new(MockWallet::new("Late")));
    assert_eq!(kit.session().wallets().len(), 3);
}

#[test]
fn wallet_filter_hides_wallets() {
    let registry = MemoryRegistry::new();
    registry.register(slush());
    registry.register(Rc::new(MockWallet::new("Suiet")));

    let kit = DAppKit::from_config(
        config(&MemoryStore::new()).with_wallet_filter(Rc::new(|w: &dyn WalletCapability| w.name() != "Suiet")),
        Rc::new(registry),
    )
    .expect("kit");
    assert_eq!(kit.session().snapshot().wallets, ["com.slush"]);
}

#[tokio::test]
async fn unregistering_connected_wallet_disconnects() {
    let registry = MemoryRegistry::new();
    let wallet = slush();
    registry.register(wallet.clone());
    let kit = DAppKit::from_config(config(&MemoryStore::new()), Rc::new(registry.clone())).expect("kit");

    kit.connection().connect(ConnectArgs::new(wallet)).await.expect("connect");
    assert!(kit.session().is_connected());

    assert!(registry.unregister("com.slush"));
    assert!(kit.session().is_disconnected());
    assert!(kit.session().wallets().is_empty());
    assert!(kit.session().persistence().load().is_none());
}

#[tokio::test]
async fn restart_reconnects_silently() {
    dappkit::logging::init_logging();
    let storage = MemoryStore::new();
    let registry = MemoryRegistry::new();
    let wallet = slush();
    registry.register(wallet.clone());

    {
        let kit = DAppKit::from_config(config(&storage), Rc::new(registry.clone())).expect("kit");
        kit.connection().connect(ConnectArgs::new(wallet.clone())).await.unwrap();
        kit.connection().switch_account("0xb").unwrap();
        kit.close();
    }

    let kit = DAppKit::from_config(
        config(&storage).with_auto_connect(AutoConnectConfig::enabled()),
        Rc::new(registry),
    )
    .expect("kit");
    kit.initialize().await;

    assert!(kit.auto_connect().has_succeeded());
    assert_eq!(wallet.silent_connects.get(), 1);
    assert_eq!(kit.session().current_account().map(|a| a.address).as_deref(), Some("0xb"));
}

#[tokio::test]
async fn network_selection_changes_signing_chain() {
    let registry = MemoryRegistry::new();
    let wallet = slush();
    registry.register(wallet.clone());
    let kit = DAppKit::from_config(config(&MemoryStore::new()), Rc::new(registry)).expect("kit");
    kit.connection().connect(ConnectArgs::new(wallet)).await.unwrap();

    kit.client().select_network("mainnet").unwrap();
    let signed = kit.transactions().sign_transaction(dappkit::SignTransactionArgs::new("{}")).await.unwrap();
    assert_eq!(signed.chain(), "sui:mainnet");

    assert!(kit.client().select_network("localnet").is_err());
    assert_eq!(kit.client().network(), "mainnet");
}

#[tokio::test]
async fn file_store_persists_under_dappkit_root() {
    let _guard = lock_env();
    let dir = TempDir::new().expect("tempdir");
    std::env::set_var("DAPPKIT_ROOT", dir.path());

    let registry = MemoryRegistry::new();
    let wallet = slush();
    registry.register(wallet.clone());
    let kit = DAppKit::from_config(
        DAppKitConfig::new("testnet")
            .with_app("kit-test")
            .with_network("testnet", Rc::new(MockExecutor::default()))
            .with_environment(Rc::new(RecordingEnvironment::default())),
        Rc::new(registry),
    )
    .expect("kit");
    kit.connection().connect(ConnectArgs::new(wallet)).await.unwrap();

    let path = dir.path().join("kit-test").join("data").join("dappkit_wallet-connection.json");
    let json = std::fs::read_to_string(&path).expect("record file");
    assert!(json.contains("\"walletIdentifier\":\"com.slush\""));
    assert!(json.contains("\"accountAddress\":\"0xa\""));

    kit.connection().disconnect().await.unwrap();
    assert!(!path.exists());

    std::env::remove_var("DAPPKIT_ROOT");
}

#[test]
fn custom_storage_key_is_used() {
    let storage = MemoryStore::new();
    let kit = DAppKit::from_config(config(&storage).with_storage_key("myapp:session"), Rc::new(MemoryRegistry::new()))
        .expect("kit");
    kit.session().persistence().save("com.slush", "0xa");
    assert!(storage.get_item("myapp:session").unwrap().is_some());
}
