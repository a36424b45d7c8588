//! Account switching and settings flows driven against a real keychain.

use super::TestEnv;

use stacks_wallet::config::Config;
use stacks_wallet::domain::screen::Screen;
use stacks_wallet::domain::selection::{
    AccountSelector, AddAccountStrategy, Selection, SelectorEffect,
};
use stacks_wallet::domain::settings_menu::{MenuAction, MenuEffect, SettingsMenu};
use stacks_wallet::domain::wallet::{DEFAULT_PASSWORD, Wallet};
use stacks_wallet::infra::keychain::Keychain;

fn menu_actions(keychain: &Keychain) -> Vec<MenuAction> {
    SettingsMenu::items(keychain.identities(), keychain.current_identity())
        .into_iter()
        .map(|item| item.action)
        .collect()
}

/// Run menu effects against the keychain, returning the screen navigated to last.
fn perform(keychain: &mut Keychain, effects: Vec<MenuEffect>) -> Option<Screen> {
    let mut screen = None;
    for effect in effects {
        match effect {
            MenuEffect::ChangeScreen(next) => screen = Some(next),
            MenuEffect::SignOut => keychain.sign_out().unwrap(),
            MenuEffect::LockWallet => keychain.lock_wallet().unwrap(),
        }
    }
    screen
}

#[tokio::test]
async fn test_provision_then_switch() {
    let mut env = TestEnv::with_wallet().await;
    let strategy = Config::default().add_account_strategy();
    assert_eq!(
        strategy,
        AddAccountStrategy::Provision {
            password: DEFAULT_PASSWORD.to_string()
        }
    );
    let mut selector = AccountSelector::new(strategy, true);

    let effect = selector.add_account(&mut env.keychain).await.unwrap();

    assert_eq!(effect, Some(SelectorEffect::Next(1)));
    assert_eq!(selector.state(), &Selection::ProvisioningNew);
    assert_eq!(env.keychain.identities().len(), 2);

    // Continuation: the host makes the new identity current and navigates away
    env.keychain.set_current_identity(1).unwrap();
    selector.reset();
    assert!(selector.is_interactive());

    // Switch back to the first identity
    let identities = env.keychain.identities().to_vec();
    let effect = selector.select_existing(&identities, 0);
    assert_eq!(effect, Some(SelectorEffect::Next(0)));
    assert!(selector.is_loading(&identities[0].address));
    assert_eq!(selector.select_existing(&identities, 1), None);
}

#[tokio::test]
async fn test_usernames_enabled_never_creates_identity() {
    let mut env = TestEnv::with_wallet().await;
    let config = Config::new("mainnet", None, true);
    let mut selector = AccountSelector::new(config.add_account_strategy(), true);

    let effect = selector.add_account(&mut env.keychain).await.unwrap();

    assert_eq!(
        effect,
        Some(SelectorEffect::ChangeScreen(Screen::AddUsername))
    );
    assert_eq!(env.keychain.identities().len(), 1);
}

#[tokio::test]
async fn test_failed_provisioning_recovers() {
    let mut env = TestEnv::with_wallet().await;
    env.keychain.lock_wallet().unwrap();
    let mut selector = AccountSelector::new(
        AddAccountStrategy::from_usernames_enabled(false, DEFAULT_PASSWORD),
        true,
    );

    assert!(selector.add_account(&mut env.keychain).await.is_err());
    assert_eq!(selector.state(), &Selection::Unselected);

    env.keychain.unlock(DEFAULT_PASSWORD).unwrap();
    assert_eq!(
        selector.add_account(&mut env.keychain).await.unwrap(),
        Some(SelectorEffect::Next(1))
    );
}

#[tokio::test]
async fn test_menu_items_follow_wallet_state() {
    let mut env = TestEnv::with_wallet().await;
    let actions = menu_actions(&env.keychain);
    assert!(!actions.contains(&MenuAction::CreateAccount));
    assert!(actions.contains(&MenuAction::AddUsername));

    env.keychain
        .create_new_identity(DEFAULT_PASSWORD)
        .await
        .unwrap();
    env.keychain.set_username(0, "alice").unwrap();

    let actions = menu_actions(&env.keychain);
    assert!(actions.contains(&MenuAction::CreateAccount));
    assert!(!actions.contains(&MenuAction::AddUsername));

    // The second identity has no username yet
    env.keychain.set_current_identity(1).unwrap();
    assert!(menu_actions(&env.keychain).contains(&MenuAction::AddUsername));
}

#[tokio::test]
async fn test_lock_and_sign_out_from_menu() {
    let mut env = TestEnv::with_wallet().await;
    let mut menu = SettingsMenu::new();

    menu.open();
    let screen = perform(&mut env.keychain, menu.invoke(MenuAction::Lock));
    assert!(!menu.is_showing());
    assert_eq!(screen, Some(Screen::PopupHome));
    assert!(env.keychain.is_locked());

    env.keychain.unlock(DEFAULT_PASSWORD).unwrap();
    menu.open();
    let screen = perform(&mut env.keychain, menu.invoke(MenuAction::SignOut));
    assert_eq!(screen, Some(Screen::Installed));
    assert!(!env.keychain.is_initialized());
    assert!(env.keychain.identities().is_empty());
}
