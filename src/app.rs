use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    cli::Args,
    components::{
        Component, accounts::AccountsComponent, home::HomeComponent,
        networks::NetworksComponent, settings::SettingsComponent, username::UsernameComponent,
        welcome::WelcomeComponent,
    },
    config::{Config, DEFAULT_NETWORK},
    domain::{
        screen::Screen,
        wallet::{DEFAULT_PASSWORD, Wallet},
    },
    infra::{keychain::Keychain, store::Store},
    tui::{Event, Frame, Tui},
};

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub action_rx: UnboundedReceiver<Action>,
    pub tui: Tui,
    pub session: Session,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let keychain = Keychain::open(Store::new()?)?;

        let network = match args.network.clone() {
            Some(network) => network,
            None => keychain
                .network()?
                .unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
        };
        let config = Config::new(&network, args.rpc_url.as_deref(), args.usernames);
        info!(
            "Starting on {} ({}), usernames enabled: {}",
            config.network.name, config.network.url, config.usernames_enabled
        );

        let tui = Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .mouse(true);

        Ok(Self {
            should_quit: false,
            should_suspend: false,
            action_rx,
            tui,
            session: Session::new(config, keychain, action_tx),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        self.session.refresh_components();

        loop {
            if let Some(event) = self.tui.next().await {
                self.handle_event(event)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action).await?;
            }

            if self.should_suspend {
                self.tui.suspend()?;
                self.should_suspend = false;
                self.tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => self.session.accounts_component.tick(),
            Event::Render => self.draw_ui()?,
            Event::Key(key) => self.session.handle_key_event(key)?,
            Event::Mouse(mouse) => self.session.handle_mouse_event(mouse)?,
            Event::Resize(w, h) => self.session.action_tx.send(Action::Resize(w, h))?,
            Event::Init => info!("Application initialized"),
            Event::Error => {}
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resize(w, h) => {
                self.tui.resize(Rect::new(0, 0, w, h))?;
                self.draw_ui()?;
            }
            action => self.session.handle_action(action).await?,
        }
        Ok(())
    }

    fn draw_ui(&mut self) -> Result<()> {
        let session = &mut self.session;
        self.tui.draw(|f| session.draw(f))?;
        Ok(())
    }
}

/// Wallet state, screen routing and components, independent of the terminal.
pub struct Session {
    pub config: Config,
    pub screen: Screen,
    pub action_tx: UnboundedSender<Action>,
    pub keychain: Keychain,
    pub welcome_component: WelcomeComponent,
    pub home_component: HomeComponent,
    pub accounts_component: AccountsComponent,
    pub settings_component: SettingsComponent,
    pub networks_component: NetworksComponent,
    pub username_component: UsernameComponent,
    pub status_message: String,
}

impl Session {
    pub fn new(config: Config, keychain: Keychain, action_tx: UnboundedSender<Action>) -> Self {
        let screen = if keychain.is_initialized() {
            Screen::PopupHome
        } else {
            Screen::Installed
        };

        Self {
            screen,
            keychain,
            welcome_component: WelcomeComponent::new(action_tx.clone()),
            home_component: HomeComponent::new(action_tx.clone()),
            accounts_component: AccountsComponent::new(
                action_tx.clone(),
                config.add_account_strategy(),
            ),
            settings_component: SettingsComponent::new(action_tx.clone()),
            networks_component: NetworksComponent::new(action_tx.clone(), &config.network.name),
            username_component: UsernameComponent::new(action_tx.clone()),
            action_tx,
            config,
            status_message: "Ready".to_string(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        if self.settings_component.is_showing() {
            return self.settings_component.handle_key_event(key);
        }

        // The username screen takes every printable key
        if self.screen == Screen::AddUsername {
            if key.code == KeyCode::Esc {
                self.action_tx
                    .send(Action::ChangeScreen(Screen::PopupHome))?;
            } else {
                self.username_component.handle_key_event(key)?;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.action_tx.send(Action::Suspend)?;
            }
            KeyCode::Esc if !matches!(self.screen, Screen::Installed | Screen::PopupHome) => {
                self.action_tx
                    .send(Action::ChangeScreen(Screen::PopupHome))?;
            }
            _ => match self.screen {
                Screen::Installed => self.welcome_component.handle_key_event(key)?,
                Screen::PopupHome => self.home_component.handle_key_event(key)?,
                Screen::SwitchAccount | Screen::CreateAccount => {
                    self.accounts_component.handle_key_event(key)?
                }
                Screen::ChangeNetwork => self.networks_component.handle_key_event(key)?,
                Screen::AddUsername => {}
            },
        }
        Ok(())
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.settings_component.is_showing() {
            self.settings_component.handle_mouse_event(mouse)?;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Action) -> Result<()> {
        debug!("Action: {}", action);
        match action {
            // Terminal control is handled by the App
            Action::Quit | Action::Suspend | Action::Resize(..) => {}
            Action::Error(message) => {
                warn!("{}", message);
                self.status_message = message;
            }
            Action::ChangeScreen(screen) => self.change_screen(screen),
            Action::ToggleSettings => {
                if self.screen == Screen::PopupHome && !self.keychain.is_locked() {
                    self.refresh_components();
                    self.settings_component.toggle();
                }
            }
            Action::CreateWallet => match self.keychain.generate(DEFAULT_PASSWORD).await {
                Ok(()) => {
                    self.status_message = "Wallet created".to_string();
                    self.change_screen(Screen::PopupHome);
                }
                Err(e) => self.status_message = format!("Failed to create wallet: {}", e),
            },
            Action::UnlockWallet => match self.keychain.unlock(DEFAULT_PASSWORD) {
                Ok(()) => {
                    self.status_message = "Wallet unlocked".to_string();
                    self.refresh_components();
                }
                Err(e) => self.status_message = format!("Failed to unlock: {}", e),
            },
            Action::LockWallet => match self.keychain.lock_wallet() {
                Ok(()) => {
                    self.status_message = "Wallet locked".to_string();
                    self.refresh_components();
                }
                Err(e) => self.status_message = format!("Failed to lock: {}", e),
            },
            Action::SignOut => match self.keychain.sign_out() {
                Ok(()) => {
                    self.status_message = "Signed out".to_string();
                    self.refresh_components();
                }
                Err(e) => self.status_message = format!("Failed to sign out: {}", e),
            },
            Action::IdentitySelected(index) => self.select_identity(index),
            Action::AddAccount => self.add_account().await?,
            Action::SetUsername(username) => {
                let index = self.keychain.current_identity_index();
                match self.keychain.set_username(index, &username) {
                    Ok(identity) => {
                        self.status_message =
                            format!("Username {} added", identity.display_label());
                        self.change_screen(Screen::PopupHome);
                    }
                    Err(e) => self.username_component.set_error(e.to_string()),
                }
            }
            Action::SwitchNetwork(network) => {
                self.config = self.config.with_network(&network);
                if let Err(e) = self.keychain.set_network(&network) {
                    warn!("Failed to persist network: {}", e);
                }
                self.status_message = format!("Switched to {}", self.config.network.name);
                self.change_screen(Screen::PopupHome);
            }
        }
        Ok(())
    }

    fn select_identity(&mut self, index: usize) {
        match self.keychain.set_current_identity(index) {
            Ok(()) => {
                if let Some(identity) = self.keychain.current_identity() {
                    self.status_message = format!("Switched to {}", identity.display_label());
                }
                self.change_screen(Screen::PopupHome);
            }
            Err(e) => {
                self.status_message = format!("Failed to switch account: {}", e);
                self.accounts_component.reset();
            }
        }
    }

    async fn add_account(&mut self) -> Result<()> {
        let result = self
            .accounts_component
            .selector
            .add_account(&mut self.keychain)
            .await;
        match result {
            Ok(Some(effect)) => {
                self.refresh_components();
                self.action_tx.send(effect.into())?;
            }
            Ok(None) => {}
            Err(e) => self.status_message = format!("Failed to create account: {}", e),
        }
        Ok(())
    }

    /// Navigate to a screen. Any in-flight account selection is dropped.
    fn change_screen(&mut self, screen: Screen) {
        debug!("Screen {} -> {} ({})", self.screen, screen, screen.path());
        self.accounts_component.reset();
        self.settings_component.close();
        if screen.shows_accounts() {
            self.accounts_component
                .set_show_add_account(screen == Screen::CreateAccount);
            self.accounts_component
                .focus(self.keychain.current_identity_index());
        }
        if screen == Screen::AddUsername {
            self.username_component.clear();
        }
        self.screen = screen;
        self.refresh_components();
    }

    /// Push wallet state into the components.
    fn refresh_components(&mut self) {
        let identities = self.keychain.identities().to_vec();
        let current = self.keychain.current_identity().cloned();
        let network = self.config.network.name.clone();

        self.settings_component
            .set_context(&identities, current.as_ref(), &network);
        self.home_component
            .set_state(current, &network, self.keychain.is_locked());
        self.networks_component.set_network(&network);
        self.accounts_component.set_identities(identities);
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status
        ])
        .split(f.area());

        let identity = self
            .keychain
            .current_identity()
            .map(|identity| identity.display_label().to_string());
        draw_header(
            f,
            chunks[0],
            self.screen,
            &self.config.network.name,
            identity.as_deref(),
        );

        match self.screen {
            Screen::Installed => self.welcome_component.draw(f, chunks[1]),
            Screen::PopupHome => self.home_component.draw(f, chunks[1]),
            Screen::SwitchAccount | Screen::CreateAccount => {
                self.accounts_component.draw(f, chunks[1])
            }
            Screen::AddUsername => self.username_component.draw(f, chunks[1]),
            Screen::ChangeNetwork => self.networks_component.draw(f, chunks[1]),
        }

        // Drawn last so it overlays the content
        self.settings_component.draw(f, chunks[1]);

        draw_status(f, chunks[2], &self.status_message);
    }
}

fn draw_header(f: &mut Frame, area: Rect, screen: Screen, network: &str, identity: Option<&str>) {
    let mut spans = vec![
        Span::styled(
            " Stacks Wallet ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(screen.title(), Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled(network.to_string(), Style::default().fg(Color::Green)),
    ];
    if let Some(identity) = identity {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            identity.to_string(),
            Style::default().fg(Color::Magenta),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn draw_status(f: &mut Frame, area: Rect, status: &str) {
    let widget = Paragraph::new(Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(status.to_string(), Style::default().fg(Color::White)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}
