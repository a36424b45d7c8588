use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, config::NETWORKS, domain::screen::Screen, tui::Frame};

use super::Component;

/// Network picker reached from "Change Network".
pub struct NetworksComponent {
    action_tx: UnboundedSender<Action>,
    pub current_network: String,
    pub selected_index: usize,
    list_state: ListState,
}

impl NetworksComponent {
    pub fn new(action_tx: UnboundedSender<Action>, current_network: &str) -> Self {
        let mut component = Self {
            action_tx,
            current_network: String::new(),
            selected_index: 0,
            list_state: ListState::default(),
        };
        component.set_network(current_network);
        component
    }

    pub fn set_network(&mut self, network: &str) {
        self.current_network = network.to_string();
        self.selected_index = NETWORKS
            .iter()
            .position(|(name, _, _)| *name == network)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    fn next(&mut self) {
        self.selected_index = (self.selected_index + 1) % NETWORKS.len();
        self.list_state.select(Some(self.selected_index));
    }

    fn previous(&mut self) {
        self.selected_index = if self.selected_index == 0 {
            NETWORKS.len() - 1
        } else {
            self.selected_index - 1
        };
        self.list_state.select(Some(self.selected_index));
    }

    fn select_network(&self) -> Result<()> {
        let (name, _, _) = NETWORKS[self.selected_index];
        let action = if name == self.current_network {
            Action::ChangeScreen(Screen::PopupHome)
        } else {
            Action::SwitchNetwork(name.to_string())
        };
        self.action_tx.send(action)?;
        Ok(())
    }
}

impl Component for NetworksComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Enter => self.select_network()?,
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let items: Vec<ListItem> = NETWORKS
            .iter()
            .enumerate()
            .map(|(i, (name, display_name, _))| {
                let is_current = *name == self.current_network;
                let style = if i == self.selected_index {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else if is_current {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                let marker = if is_current { " (current)" } else { "" };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", display_name, marker),
                    style,
                )))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Change Network")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let (name, display_name, url) = NETWORKS[self.selected_index];
        let mut details = vec![
            Line::from(vec![
                Span::styled("Network: ", Style::default().fg(Color::DarkGray)),
                Span::styled(display_name, Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("API URL: ", Style::default().fg(Color::DarkGray)),
                Span::styled(url, Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
        ];

        if name == "mainnet" {
            details.push(Line::from(Span::styled(
                "Real STX. Transactions cannot be reversed.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        } else {
            details.push(Line::from(Span::styled(
                "Test network, tokens have no real value",
                Style::default().fg(Color::Gray),
            )));
        }

        details.push(Line::from(""));
        let hint = if name == self.current_network {
            "[Currently active] Enter: Back"
        } else {
            "[Enter] Switch to this network"
        };
        details.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));

        let details_widget = Paragraph::new(details).block(
            Block::default()
                .title("Network Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        f.render_widget(details_widget, chunks[1]);
    }
}
