//! Account selection flow.
//!
//! The selector tracks which identity, if any, is mid-flow. Once an entry has been
//! picked every other entry stays inert until the navigation layer calls [`AccountSelector::reset`].

use color_eyre::eyre::{Result, eyre};
use tracing::{debug, info, warn};

use super::{identity::Identity, screen::Screen, wallet::Wallet};

/// Local selection state of the account list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selecting(String),
    ProvisioningNew,
}

/// What "Add a new account" does. Fixed when the selector is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddAccountStrategy {
    /// Hand off to the add-username screen.
    AddUsername,
    /// Create a new identity in the wallet.
    Provision { password: String },
}

impl AddAccountStrategy {
    pub fn from_usernames_enabled(usernames_enabled: bool, password: &str) -> Self {
        if usernames_enabled {
            AddAccountStrategy::AddUsername
        } else {
            AddAccountStrategy::Provision {
                password: password.to_string(),
            }
        }
    }
}

/// Outcome the caller must carry out after a selector transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEffect {
    /// Continue with the identity at this index.
    Next(usize),
    ChangeScreen(Screen),
}

#[derive(Debug, Clone)]
pub struct AccountSelector {
    state: Selection,
    strategy: AddAccountStrategy,
    show_add_account: bool,
}

impl AccountSelector {
    pub fn new(strategy: AddAccountStrategy, show_add_account: bool) -> Self {
        Self {
            state: Selection::Unselected,
            strategy,
            show_add_account,
        }
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    pub fn strategy(&self) -> &AddAccountStrategy {
        &self.strategy
    }

    pub fn show_add_account(&self) -> bool {
        self.show_add_account
    }

    pub fn set_show_add_account(&mut self, show: bool) {
        self.show_add_account = show;
    }

    /// Entries accept clicks only while nothing is in flight.
    pub fn is_interactive(&self) -> bool {
        self.state == Selection::Unselected
    }

    /// Whether the entry for `address` should show a spinner.
    pub fn is_loading(&self, address: &str) -> bool {
        matches!(&self.state, Selection::Selecting(selected) if selected == address)
    }

    pub fn can_add_account(&self) -> bool {
        self.show_add_account && self.is_interactive()
    }

    /// Pick an existing identity. Ignored while another selection is in flight.
    pub fn select_existing(
        &mut self,
        identities: &[Identity],
        index: usize,
    ) -> Option<SelectorEffect> {
        if !self.is_interactive() {
            debug!("Ignoring selection of {}: selection in progress", index);
            return None;
        }
        let identity = identities.get(index)?;
        self.state = Selection::Selecting(identity.address.clone());
        debug!("Selecting identity {} ({})", index, identity.address);
        Some(SelectorEffect::Next(index))
    }

    /// Run the add-account flow.
    ///
    /// A failed provisioning call puts the selector back to [`Selection::Unselected`]
    /// and returns the wallet's error.
    pub async fn add_account<W: Wallet>(
        &mut self,
        wallet: &mut W,
    ) -> Result<Option<SelectorEffect>> {
        if !self.can_add_account() {
            return Ok(None);
        }

        let password = match &self.strategy {
            AddAccountStrategy::AddUsername => {
                return Ok(Some(SelectorEffect::ChangeScreen(Screen::AddUsername)));
            }
            AddAccountStrategy::Provision { password } => password.clone(),
        };

        self.state = Selection::ProvisioningNew;
        if let Err(e) = wallet.create_new_identity(&password).await {
            warn!("Identity provisioning failed: {}", e);
            self.state = Selection::Unselected;
            return Err(e);
        }

        match wallet.identities().len().checked_sub(1) {
            Some(index) => {
                info!("Provisioned identity at index {}", index);
                Ok(Some(SelectorEffect::Next(index)))
            }
            None => {
                self.state = Selection::Unselected;
                Err(eyre!("Wallet has no identities after provisioning"))
            }
        }
    }

    /// Return to the idle state. Called by the navigation layer.
    pub fn reset(&mut self) {
        if self.state != Selection::Unselected {
            debug!("Resetting selection from {:?}", self.state);
            self.state = Selection::Unselected;
        }
    }
}
