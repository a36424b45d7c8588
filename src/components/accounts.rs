use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    domain::{
        identity::Identity,
        selection::{AccountSelector, AddAccountStrategy, Selection},
    },
    tui::Frame,
};

use super::Component;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Identity list with click-to-select and "Add a new account".
pub struct AccountsComponent {
    action_tx: UnboundedSender<Action>,
    pub identities: Vec<Identity>,
    pub selector: AccountSelector,
    pub cursor: usize,
    list_state: ListState,
    spinner_frame: usize,
}

impl AccountsComponent {
    pub fn new(action_tx: UnboundedSender<Action>, strategy: AddAccountStrategy) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            action_tx,
            identities: Vec::new(),
            selector: AccountSelector::new(strategy, false),
            cursor: 0,
            list_state,
            spinner_frame: 0,
        }
    }

    pub fn set_identities(&mut self, identities: Vec<Identity>) {
        self.identities = identities;
        self.clamp_cursor();
    }

    pub fn set_show_add_account(&mut self, show: bool) {
        self.selector.set_show_add_account(show);
        self.clamp_cursor();
    }

    /// Put the cursor on an entry, e.g. the current identity.
    pub fn focus(&mut self, index: usize) {
        self.cursor = index;
        self.clamp_cursor();
    }

    pub fn reset(&mut self) {
        self.selector.reset();
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    fn entry_count(&self) -> usize {
        self.identities.len() + usize::from(self.selector.show_add_account())
    }

    fn clamp_cursor(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
        self.list_state.select(Some(self.cursor));
    }

    fn next(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % count;
        self.list_state.select(Some(self.cursor));
    }

    fn previous(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
        self.list_state.select(Some(self.cursor));
    }

    /// Click on the entry under the cursor.
    fn activate(&mut self) -> Result<()> {
        if self.cursor < self.identities.len() {
            if let Some(effect) = self.selector.select_existing(&self.identities, self.cursor) {
                self.action_tx.send(effect.into())?;
            }
        } else if self.selector.can_add_account() {
            self.action_tx.send(Action::AddAccount)?;
        }
        Ok(())
    }

    fn spinner(&self) -> char {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }
}

impl Component for AccountsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Enter => self.activate()?,
            KeyCode::Char('n') if self.selector.can_add_account() => {
                self.action_tx.send(Action::AddAccount)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(area);

        let interactive = self.selector.is_interactive();
        // Everything greys out while a flow is in progress
        let label_style = if interactive {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let spinner = self.spinner();

        let mut items: Vec<ListItem> = self
            .identities
            .iter()
            .map(|identity| {
                let mut spans = vec![
                    Span::styled(
                        format!("[{}] ", identity.avatar_initial()),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(identity.display_label().to_string(), label_style),
                ];
                if self.selector.is_loading(&identity.address) {
                    spans.push(Span::styled(
                        format!("  {}", spinner),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        if self.selector.show_add_account() {
            let mut spans = vec![
                Span::styled("[+] ", Style::default().fg(Color::Gray)),
                Span::styled("Add a new account", label_style),
            ];
            if self.selector.state() == &Selection::ProvisioningNew {
                spans.push(Span::styled(
                    format!("  {}", spinner),
                    Style::default().fg(Color::Yellow),
                ));
            }
            items.push(ListItem::new(Line::from(spans)));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Accounts")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = if !interactive {
            "Please wait..."
        } else if self.selector.show_add_account() {
            "Up/Down: Navigate | Enter: Select | n: Add account | Esc: Back"
        } else {
            "Up/Down: Navigate | Enter: Select | Esc: Back"
        };
        let help_widget = Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        f.render_widget(help_widget, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn component(show_add: bool) -> (AccountsComponent, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut accounts = AccountsComponent::new(tx, AddAccountStrategy::AddUsername);
        accounts.set_identities(vec![
            Identity::new("A1").with_username("alice"),
            Identity::new("A2"),
        ]);
        accounts.set_show_add_account(show_add);
        (accounts, rx)
    }

    #[test]
    fn test_enter_selects_once() {
        let (mut accounts, mut rx) = component(false);

        accounts.handle_key_event(key(KeyCode::Down)).unwrap();
        accounts.handle_key_event(key(KeyCode::Enter)).unwrap();
        accounts.handle_key_event(key(KeyCode::Up)).unwrap();
        accounts.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(rx.try_recv().unwrap(), Action::IdentitySelected(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_add_entry_requests_add_account() {
        let (mut accounts, mut rx) = component(true);

        // Wraps from the last identity onto the add entry
        accounts.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(accounts.cursor, 2);
        accounts.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(rx.try_recv().unwrap(), Action::AddAccount);
    }

    #[test]
    fn test_add_shortcut_hidden_without_add_entry() {
        let (mut accounts, mut rx) = component(false);
        accounts.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_cursor_clamped_when_add_entry_removed() {
        let (mut accounts, _rx) = component(true);
        accounts.focus(2);
        accounts.set_show_add_account(false);
        assert_eq!(accounts.cursor, 1);
    }
}
