//! Integration test module for stacks-wallet.
//!
//! Provides a test environment that manages:
//! - A throwaway LMDB store in a temp dir
//! - A keychain opened on that store, optionally with a generated wallet

pub mod e2e_account_flow;
pub mod e2e_keychain;

use stacks_wallet::domain::wallet::DEFAULT_PASSWORD;
use stacks_wallet::infra::keychain::Keychain;
use stacks_wallet::infra::store::Store;
use tempfile::TempDir;

/// Test environment for integration tests.
pub struct TestEnv {
    /// Store shared with the keychain; clone it to reopen.
    pub store: Store,
    pub keychain: Keychain,
    /// Keeps the store directory alive for the test's duration.
    _temp_dir: TempDir,
}

impl TestEnv {
    /// A keychain with no wallet.
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store =
            Store::with_path(temp_dir.path().to_path_buf()).expect("Failed to create store");
        let keychain = Keychain::open(store.clone()).expect("Failed to open keychain");
        Self {
            store,
            keychain,
            _temp_dir: temp_dir,
        }
    }

    /// A keychain with a generated, unlocked wallet holding one identity.
    pub async fn with_wallet() -> Self {
        let mut env = Self::empty();
        env.keychain
            .generate(DEFAULT_PASSWORD)
            .await
            .expect("Failed to generate wallet");
        env
    }

    /// Open a second keychain on the same store, as a restart would.
    pub fn reopen(&self) -> Keychain {
        Keychain::open(self.store.clone()).expect("Failed to reopen keychain")
    }
}
