use super::{identity::Identity, screen::Screen};

/// An entry of the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SwitchAccount,
    CreateAccount,
    AddUsername,
    ChangeNetwork,
    SignOut,
    Lock,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::SwitchAccount => "Switch account",
            MenuAction::CreateAccount => "Create an Account",
            MenuAction::AddUsername => "Add username",
            MenuAction::ChangeNetwork => "Change Network",
            MenuAction::SignOut => "Sign Out",
            MenuAction::Lock => "Lock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MenuAction,
    /// Draw a separator line above the item.
    pub divider_before: bool,
}

impl MenuItem {
    fn new(action: MenuAction) -> Self {
        Self {
            action,
            divider_before: false,
        }
    }

    fn after_divider(action: MenuAction) -> Self {
        Self {
            action,
            divider_before: true,
        }
    }
}

/// External call produced by a menu item, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    ChangeScreen(Screen),
    SignOut,
    LockWallet,
}

/// Settings overlay. Visibility is toggled by the host.
#[derive(Debug, Clone, Default)]
pub struct SettingsMenu {
    showing: bool,
}

impl SettingsMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn open(&mut self) {
        self.showing = true;
    }

    pub fn close(&mut self) {
        self.showing = false;
    }

    pub fn toggle(&mut self) {
        self.showing = !self.showing;
    }

    /// A click landed outside the menu bounds.
    pub fn click_outside(&mut self) {
        if self.showing {
            self.close();
        }
    }

    /// Items offered for the given wallet state.
    pub fn items(identities: &[Identity], current_identity: Option<&Identity>) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::new(MenuAction::SwitchAccount)];
        if identities.len() > 1 {
            items.push(MenuItem::new(MenuAction::CreateAccount));
        }
        if current_identity.is_some_and(|identity| !identity.has_username()) {
            items.push(MenuItem::after_divider(MenuAction::AddUsername));
        }
        items.push(MenuItem::after_divider(MenuAction::ChangeNetwork));
        items.push(MenuItem::after_divider(MenuAction::SignOut));
        items.push(MenuItem::new(MenuAction::Lock));
        items
    }

    /// Close the menu and return the calls the item performs.
    ///
    /// Sign out tears the session down before leaving for the install screen. Lock
    /// navigates home first, then locks.
    pub fn invoke(&mut self, action: MenuAction) -> Vec<MenuEffect> {
        self.close();
        match action {
            MenuAction::SwitchAccount => vec![MenuEffect::ChangeScreen(Screen::SwitchAccount)],
            MenuAction::CreateAccount => vec![MenuEffect::ChangeScreen(Screen::CreateAccount)],
            MenuAction::AddUsername => vec![MenuEffect::ChangeScreen(Screen::AddUsername)],
            MenuAction::ChangeNetwork => vec![MenuEffect::ChangeScreen(Screen::ChangeNetwork)],
            MenuAction::SignOut => vec![
                MenuEffect::SignOut,
                MenuEffect::ChangeScreen(Screen::Installed),
            ],
            MenuAction::Lock => vec![
                MenuEffect::ChangeScreen(Screen::PopupHome),
                MenuEffect::LockWallet,
            ],
        }
    }
}
