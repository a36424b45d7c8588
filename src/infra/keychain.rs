//! Local keychain backing the wallet screens.
//!
//! Identities are secp256k1 keys persisted in the LMDB store. Secret keys are stored
//! unencrypted alongside each identity; locking drops the in-memory copies and gates
//! key use behind the wallet password, it does not protect the store on disk.

use color_eyre::eyre::{Result, eyre};
use rand::{RngCore, rngs::OsRng};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{
    domain::{
        identity::{Identity, USERNAME_SUFFIX},
        wallet::Wallet,
    },
    infra::store::Store,
};

const PASSWORD_KEY: &str = "password";
const CURRENT_IDENTITY_KEY: &str = "current_identity";
const NETWORK_KEY: &str = "network";

pub const MAX_USERNAME_LEN: usize = 30;

/// An identity as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredIdentity {
    pub index: u64,
    pub address: String,
    pub default_username: Option<String>,
    pub secret_key: [u8; 32],
}

impl StoredIdentity {
    /// Create an identity with a fresh random key.
    pub fn generate(index: u64) -> Self {
        let secret = SecretKey::new(&mut OsRng);
        Self {
            index,
            address: derive_address(&secret),
            default_username: None,
            secret_key: secret.secret_bytes(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            address: self.address.clone(),
            default_username: self.default_username.clone(),
        }
    }
}

/// `ID-` followed by the first 20 bytes of SHA-256 over the compressed public key.
pub fn derive_address(secret: &SecretKey) -> String {
    let secp = Secp256k1::new();
    let public = PublicKey::from_secret_key(&secp, secret);
    let hash = Sha256::digest(public.serialize());
    format!("ID-{}", hex::encode(&hash[..20]))
}

/// Check a bare username (without suffix).
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(eyre!("Username cannot be empty"));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(eyre!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(eyre!(
            "Username may only contain lowercase letters, digits and underscores"
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PasswordDigest {
    salt: [u8; 16],
    digest: [u8; 32],
}

impl PasswordDigest {
    fn new(password: &str) -> Self {
        let mut salt = [0u8; 16];
        OsRng.fill_bytes(&mut salt);
        Self {
            salt,
            digest: Self::hash(&salt, password),
        }
    }

    fn hash(salt: &[u8; 16], password: &str) -> [u8; 32] {
        Sha256::new()
            .chain_update(salt)
            .chain_update(password.as_bytes())
            .finalize()
            .into()
    }

    fn matches(&self, password: &str) -> bool {
        Self::hash(&self.salt, password) == self.digest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// No wallet has been generated yet.
    Uninitialized,
    Locked,
    Unlocked,
}

pub struct Keychain {
    store: Store,
    identities: Vec<Identity>,
    secret_keys: Vec<[u8; 32]>,
    state: LockState,
    current_index: usize,
}

impl Keychain {
    pub fn open(store: Store) -> Result<Self> {
        let identities: Vec<Identity> = store
            .list_identities()?
            .iter()
            .map(StoredIdentity::identity)
            .collect();
        let state = if store.load_metadata::<PasswordDigest>(PASSWORD_KEY)?.is_some() {
            LockState::Locked
        } else {
            LockState::Uninitialized
        };
        let current_index = store
            .load_metadata::<u64>(CURRENT_IDENTITY_KEY)?
            .map(|i| i as usize)
            .filter(|i| *i < identities.len())
            .unwrap_or(0);

        debug!(
            "Opened keychain: {} identities, state {:?}",
            identities.len(),
            state
        );

        Ok(Self {
            store,
            identities,
            secret_keys: Vec::new(),
            state,
            current_index,
        })
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state != LockState::Uninitialized
    }

    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// Create a fresh wallet holding a single identity.
    pub async fn generate(&mut self, password: &str) -> Result<()> {
        if self.is_initialized() {
            return Err(eyre!("A wallet already exists"));
        }
        if password.is_empty() {
            return Err(eyre!("Password cannot be empty"));
        }

        if let Err(e) = self.initialize(password).await {
            warn!("Failed to generate wallet, rolling back: {}", e);
            self.rollback();
            return Err(e);
        }
        info!("Generated new wallet");
        Ok(())
    }

    async fn initialize(&mut self, password: &str) -> Result<()> {
        self.store.clear()?;
        self.store
            .save_metadata(PASSWORD_KEY, &PasswordDigest::new(password))?;
        self.identities.clear();
        self.secret_keys.clear();
        self.current_index = 0;
        self.state = LockState::Unlocked;

        self.create_new_identity(password).await?;
        Ok(())
    }

    /// Undo a partial `generate`, leaving no wallet behind.
    fn rollback(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear store during rollback: {}", e);
        }
        self.identities.clear();
        self.secret_keys.iter_mut().for_each(|key| key.fill(0));
        self.secret_keys.clear();
        self.current_index = 0;
        self.state = LockState::Uninitialized;
    }

    pub fn unlock(&mut self, password: &str) -> Result<()> {
        match self.state {
            LockState::Uninitialized => return Err(eyre!("No wallet to unlock")),
            LockState::Unlocked => return Ok(()),
            LockState::Locked => {}
        }
        self.verify_password(password)?;

        let records = self.store.list_identities()?;
        self.secret_keys = records.iter().map(|r| r.secret_key).collect();
        self.identities = records.iter().map(StoredIdentity::identity).collect();
        self.state = LockState::Unlocked;
        info!("Wallet unlocked");
        Ok(())
    }

    fn verify_password(&self, password: &str) -> Result<()> {
        let digest = self
            .store
            .load_metadata::<PasswordDigest>(PASSWORD_KEY)?
            .ok_or_else(|| eyre!("No wallet password set"))?;
        if !digest.matches(password) {
            return Err(eyre!("Incorrect password"));
        }
        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<()> {
        match self.state {
            LockState::Unlocked => Ok(()),
            LockState::Locked => Err(eyre!("Wallet is locked")),
            LockState::Uninitialized => Err(eyre!("No wallet has been created")),
        }
    }

    pub fn current_identity_index(&self) -> usize {
        self.current_index
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.identities.get(self.current_index)
    }

    pub fn set_current_identity(&mut self, index: usize) -> Result<()> {
        if index >= self.identities.len() {
            return Err(eyre!("Identity index out of bounds"));
        }
        self.store
            .save_metadata(CURRENT_IDENTITY_KEY, &(index as u64))?;
        self.current_index = index;
        debug!("Current identity set to {}", index);
        Ok(())
    }

    /// Attach a username to an identity that has none.
    pub fn set_username(&mut self, index: usize, username: &str) -> Result<Identity> {
        self.ensure_unlocked()?;
        validate_username(username)?;

        let identity = self
            .identities
            .get(index)
            .ok_or_else(|| eyre!("Identity index out of bounds"))?;
        if identity.has_username() {
            return Err(eyre!("Identity already has a username"));
        }
        let secret_key = *self
            .secret_keys
            .get(index)
            .ok_or_else(|| eyre!("Missing key for identity {}", index))?;

        let full_name = format!("{}{}", username, USERNAME_SUFFIX);
        let record = StoredIdentity {
            index: index as u64,
            address: identity.address.clone(),
            default_username: Some(full_name.clone()),
            secret_key,
        };
        self.store.save_identity(&record)?;
        self.identities[index].default_username = Some(full_name);
        info!("Registered username {} for identity {}", username, index);
        Ok(record.identity())
    }

    /// Last selected network, if any.
    pub fn network(&self) -> Result<Option<String>> {
        self.store.load_metadata(NETWORK_KEY)
    }

    pub fn set_network(&self, network: &str) -> Result<()> {
        self.store.save_metadata(NETWORK_KEY, &network.to_string())
    }
}

impl Wallet for Keychain {
    fn identities(&self) -> &[Identity] {
        &self.identities
    }

    async fn create_new_identity(&mut self, password: &str) -> Result<Identity> {
        self.ensure_unlocked()?;
        self.verify_password(password)?;

        let index = self.identities.len() as u64;
        let record = tokio::task::spawn_blocking(move || StoredIdentity::generate(index)).await?;
        self.store.save_identity(&record)?;

        let identity = record.identity();
        self.secret_keys.push(record.secret_key);
        self.identities.push(identity.clone());
        info!("Created identity {} ({})", index, identity.address);
        Ok(identity)
    }

    fn sign_out(&mut self) -> Result<()> {
        self.store.clear()?;
        self.identities.clear();
        self.secret_keys.clear();
        self.current_index = 0;
        self.state = LockState::Uninitialized;
        info!("Signed out, wallet data removed");
        Ok(())
    }

    fn lock_wallet(&mut self) -> Result<()> {
        if self.state == LockState::Unlocked {
            self.secret_keys.iter_mut().for_each(|key| key.fill(0));
            self.secret_keys.clear();
            self.state = LockState::Locked;
            info!("Wallet locked");
        }
        Ok(())
    }
}
