use serde::{Deserialize, Serialize};
use strum::Display;

/// Screens the wallet can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Screen {
    /// Shown after sign out or before any wallet exists.
    Installed,
    PopupHome,
    SwitchAccount,
    CreateAccount,
    AddUsername,
    ChangeNetwork,
}

impl Screen {
    /// Route path of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Installed => "/installed",
            Screen::PopupHome => "/",
            Screen::SwitchAccount => "/switch-account",
            Screen::CreateAccount => "/create-account",
            Screen::AddUsername => "/add-account",
            Screen::ChangeNetwork => "/networks",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Installed => "Welcome",
            Screen::PopupHome => "Home",
            Screen::SwitchAccount => "Switch account",
            Screen::CreateAccount => "Create an Account",
            Screen::AddUsername => "Add username",
            Screen::ChangeNetwork => "Change Network",
        }
    }

    /// Whether the screen hosts the account selector.
    pub fn shows_accounts(&self) -> bool {
        matches!(self, Screen::SwitchAccount | Screen::CreateAccount)
    }
}
