use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, domain::identity::Identity, tui::Frame};

use super::Component;

/// Popup home: the current identity, or an unlock prompt.
pub struct HomeComponent {
    action_tx: UnboundedSender<Action>,
    pub identity: Option<Identity>,
    pub network: String,
    pub locked: bool,
}

impl HomeComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            identity: None,
            network: String::new(),
            locked: false,
        }
    }

    pub fn set_state(&mut self, identity: Option<Identity>, network: &str, locked: bool) {
        self.identity = identity;
        self.network = network.to_string();
        self.locked = locked;
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter if self.locked => self.action_tx.send(Action::UnlockWallet)?,
            KeyCode::Char('s') if !self.locked => self.action_tx.send(Action::ToggleSettings)?,
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(area);

        let (lines, help) = if self.locked {
            (
                vec![
                    Line::from(Span::styled(
                        "Wallet locked",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Your identities are safe. Unlock to continue.",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                "Enter: Unlock | q: Quit",
            )
        } else if let Some(ref identity) = self.identity {
            (
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", identity.avatar_initial()),
                            Style::default()
                                .fg(Color::Magenta)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            identity.display_label(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Address: ", Style::default().fg(Color::DarkGray)),
                        Span::styled(&identity.address, Style::default().fg(Color::Yellow)),
                    ]),
                    Line::from(vec![
                        Span::styled("Network: ", Style::default().fg(Color::DarkGray)),
                        Span::styled(&self.network, Style::default().fg(Color::Green)),
                    ]),
                ],
                "s: Settings | q: Quit",
            )
        } else {
            (
                vec![Line::from(Span::styled(
                    "No account selected",
                    Style::default().fg(Color::Yellow),
                ))],
                "s: Settings | q: Quit",
            )
        };

        let body = Paragraph::new(lines).block(
            Block::default()
                .title("Account")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(body, chunks[0]);

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
