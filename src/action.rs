use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::{screen::Screen, selection::SelectorEffect, settings_menu::MenuEffect};

/// Actions that can be triggered by user input or internal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Resize(u16, u16),
    Suspend,
    Quit,
    Error(String),

    // Navigation
    ChangeScreen(Screen),
    ToggleSettings,

    // Wallet lifecycle
    CreateWallet,
    UnlockWallet,
    LockWallet,
    SignOut,

    // Identity actions
    IdentitySelected(usize),
    AddAccount,
    SetUsername(String),

    SwitchNetwork(String),
}

impl From<SelectorEffect> for Action {
    fn from(effect: SelectorEffect) -> Self {
        match effect {
            SelectorEffect::Next(index) => Action::IdentitySelected(index),
            SelectorEffect::ChangeScreen(screen) => Action::ChangeScreen(screen),
        }
    }
}

impl From<MenuEffect> for Action {
    fn from(effect: MenuEffect) -> Self {
        match effect {
            MenuEffect::ChangeScreen(screen) => Action::ChangeScreen(screen),
            MenuEffect::SignOut => Action::SignOut,
            MenuEffect::LockWallet => Action::LockWallet,
        }
    }
}
