//! Keychain lifecycle tests against a real store.

use super::TestEnv;

use stacks_wallet::domain::wallet::{DEFAULT_PASSWORD, Wallet};
use stacks_wallet::infra::keychain::LockState;

#[tokio::test]
async fn test_generate_creates_single_identity() {
    let mut env = TestEnv::empty();
    assert_eq!(env.keychain.state(), LockState::Uninitialized);
    assert!(env.keychain.identities().is_empty());

    env.keychain.generate(DEFAULT_PASSWORD).await.unwrap();

    assert_eq!(env.keychain.state(), LockState::Unlocked);
    assert_eq!(env.keychain.identities().len(), 1);
    let current = env.keychain.current_identity().unwrap();
    assert!(current.address.starts_with("ID-"));
    assert!(!current.has_username());
}

#[tokio::test]
async fn test_generate_twice_fails() {
    let mut env = TestEnv::with_wallet().await;
    assert!(env.keychain.generate(DEFAULT_PASSWORD).await.is_err());
    assert_eq!(env.keychain.identities().len(), 1);
}

#[tokio::test]
async fn test_create_identity_checks_password() {
    let mut env = TestEnv::with_wallet().await;

    assert!(env.keychain.create_new_identity("wrong").await.is_err());
    assert_eq!(env.keychain.identities().len(), 1);

    let identity = env
        .keychain
        .create_new_identity(DEFAULT_PASSWORD)
        .await
        .unwrap();
    assert_eq!(env.keychain.identities().len(), 2);
    assert_eq!(env.keychain.identities()[1], identity);
    assert_ne!(env.keychain.identities()[0].address, identity.address);
}

#[tokio::test]
async fn test_lock_blocks_provisioning_until_unlock() {
    let mut env = TestEnv::with_wallet().await;

    env.keychain.lock_wallet().unwrap();
    assert!(env.keychain.is_locked());
    assert!(
        env.keychain
            .create_new_identity(DEFAULT_PASSWORD)
            .await
            .is_err()
    );

    assert!(env.keychain.unlock("wrong").is_err());
    assert!(env.keychain.is_locked());

    env.keychain.unlock(DEFAULT_PASSWORD).unwrap();
    env.keychain
        .create_new_identity(DEFAULT_PASSWORD)
        .await
        .unwrap();
    assert_eq!(env.keychain.identities().len(), 2);
}

#[tokio::test]
async fn test_reopen_restores_identities_locked() {
    let mut env = TestEnv::with_wallet().await;
    env.keychain
        .create_new_identity(DEFAULT_PASSWORD)
        .await
        .unwrap();
    env.keychain.set_current_identity(1).unwrap();
    let expected = env.keychain.identities().to_vec();

    let reopened = env.reopen();

    assert!(reopened.is_locked());
    assert_eq!(reopened.identities(), expected.as_slice());
    assert_eq!(reopened.current_identity_index(), 1);
}

#[tokio::test]
async fn test_set_current_identity_out_of_bounds() {
    let mut env = TestEnv::with_wallet().await;
    assert!(env.keychain.set_current_identity(3).is_err());
    assert_eq!(env.keychain.current_identity_index(), 0);
}

#[tokio::test]
async fn test_set_username() {
    let mut env = TestEnv::with_wallet().await;

    let identity = env.keychain.set_username(0, "alice").unwrap();

    assert_eq!(
        identity.default_username.as_deref(),
        Some("alice.id.blockstack")
    );
    assert_eq!(identity.display_label(), "alice");
    // A second username is refused
    assert!(env.keychain.set_username(0, "bob").is_err());
    // Invalid names are refused
    env.keychain
        .create_new_identity(DEFAULT_PASSWORD)
        .await
        .unwrap();
    assert!(env.keychain.set_username(1, "Not Valid").is_err());

    let reopened = env.reopen();
    assert_eq!(reopened.identities()[0], identity);
}

#[tokio::test]
async fn test_sign_out_wipes_wallet() {
    let mut env = TestEnv::with_wallet().await;
    env.keychain.set_network("testnet").unwrap();

    env.keychain.sign_out().unwrap();

    assert_eq!(env.keychain.state(), LockState::Uninitialized);
    assert!(env.keychain.identities().is_empty());
    assert!(env.keychain.current_identity().is_none());

    let reopened = env.reopen();
    assert!(!reopened.is_initialized());
    assert!(reopened.identities().is_empty());
    assert_eq!(reopened.network().unwrap(), None);

    // A fresh wallet can be generated afterwards
    env.keychain.generate(DEFAULT_PASSWORD).await.unwrap();
    assert_eq!(env.keychain.identities().len(), 1);
}

#[test]
fn test_network_persisted() {
    let env = TestEnv::empty();
    assert_eq!(env.keychain.network().unwrap(), None);

    env.keychain.set_network("localhost").unwrap();

    assert_eq!(
        env.reopen().network().unwrap().as_deref(),
        Some("localhost")
    );
}
