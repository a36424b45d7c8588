//! First-run screen, also shown after signing out.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, tui::Frame};

use super::Component;

pub struct WelcomeComponent {
    action_tx: UnboundedSender<Action>,
}

impl WelcomeComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl Component for WelcomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Enter {
            self.action_tx.send(Action::CreateWallet)?;
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Welcome to Stacks Wallet",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("No wallet on this device."),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
                Span::raw("Create a new wallet"),
            ]),
            Line::from(vec![
                Span::styled("[q] ", Style::default().fg(Color::Yellow)),
                Span::raw("Quit"),
            ]),
        ];

        let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title("Get started")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(widget, area);
    }
}
