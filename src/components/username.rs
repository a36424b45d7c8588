//! Username input for an identity without one.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    domain::identity::USERNAME_SUFFIX,
    infra::keychain::{MAX_USERNAME_LEN, validate_username},
    tui::Frame,
};

use super::Component;

pub struct UsernameComponent {
    action_tx: UnboundedSender<Action>,
    pub input: String,
    pub error_message: Option<String>,
}

impl UsernameComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            input: String::new(),
            error_message: None,
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    fn submit(&mut self) -> Result<()> {
        match validate_username(&self.input) {
            Ok(()) => {
                self.error_message = None;
                self.action_tx.send(Action::SetUsername(self.input.clone()))?;
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        Ok(())
    }
}

impl Component for UsernameComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.submit()?,
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if self.input.len() < MAX_USERNAME_LEN => {
                self.input.push(c.to_ascii_lowercase());
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

        let input = Paragraph::new(Line::from(vec![
            Span::styled(&self.input, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]))
        .block(
            Block::default()
                .title("Username")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(input, chunks[0]);

        let mut lines = vec![Line::from(vec![
            Span::styled("Full name: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}{}", self.input, USERNAME_SUFFIX),
                Style::default().fg(Color::Cyan),
            ),
        ])];
        if let Some(ref error) = self.error_message {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        f.render_widget(Paragraph::new(lines), chunks[1]);

        let help = Paragraph::new(Line::from(Span::styled(
            "Type a-z, 0-9 or _ | Enter: Register | Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(help, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn type_str(component: &mut UsernameComponent, s: &str) {
        for c in s.chars() {
            component
                .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .unwrap();
        }
    }

    #[test]
    fn test_submit_valid_username() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut username = UsernameComponent::new(tx);

        type_str(&mut username, "Alice");
        username
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::SetUsername("alice".to_string())
        );
    }

    #[test]
    fn test_invalid_username_shows_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut username = UsernameComponent::new(tx);

        type_str(&mut username, "a.b");
        username
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();

        assert!(username.error_message.is_some());
        assert!(rx.try_recv().is_err());
    }
}
