use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::{
    action::Action,
    domain::{
        identity::Identity,
        settings_menu::{MenuAction, MenuItem, SettingsMenu},
    },
    tui::Frame,
};

use super::Component;

const POPOVER_WIDTH: u16 = 34;

/// The settings popover shown over the home screen.
pub struct SettingsComponent {
    action_tx: UnboundedSender<Action>,
    menu: SettingsMenu,
    pub items: Vec<MenuItem>,
    pub cursor: usize,
    network: String,
    /// Where the popover was last drawn, for hit testing.
    area: Option<Rect>,
}

impl SettingsComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            menu: SettingsMenu::new(),
            items: SettingsMenu::items(&[], None),
            cursor: 0,
            network: String::new(),
            area: None,
        }
    }

    pub fn set_context(
        &mut self,
        identities: &[Identity],
        current_identity: Option<&Identity>,
        network: &str,
    ) {
        self.items = SettingsMenu::items(identities, current_identity);
        self.network = network.to_string();
        if self.cursor >= self.items.len() {
            self.cursor = self.items.len().saturating_sub(1);
        }
    }

    pub fn is_showing(&self) -> bool {
        self.menu.is_showing()
    }

    pub fn toggle(&mut self) {
        self.menu.toggle();
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.menu.close();
    }

    fn invoke(&mut self, index: usize) -> Result<()> {
        let Some(item) = self.items.get(index) else {
            return Ok(());
        };
        debug!("Settings item: {}", item.action.label());
        for effect in self.menu.invoke(item.action) {
            self.action_tx.send(effect.into())?;
        }
        Ok(())
    }

    /// Item index for each drawn row; `None` marks a divider.
    fn rows(&self) -> Vec<Option<usize>> {
        let mut rows = Vec::with_capacity(self.items.len() * 2);
        for (i, item) in self.items.iter().enumerate() {
            if item.divider_before {
                rows.push(None);
            }
            rows.push(Some(i));
        }
        rows
    }

    /// Top-right corner of `outer`, sized to the item list.
    fn popover_area(&self, outer: Rect) -> Rect {
        let height = (self.rows().len() as u16 + 2).min(outer.height);
        let width = POPOVER_WIDTH.min(outer.width);
        Rect::new(outer.right().saturating_sub(width), outer.y, width, height)
    }

    fn item_label(&self, action: MenuAction, width: usize) -> String {
        match action {
            MenuAction::ChangeNetwork => {
                let label = action.label();
                let pad = width.saturating_sub(label.len() + self.network.len());
                format!("{}{}{}", label, " ".repeat(pad), self.network)
            }
            _ => action.label().to_string(),
        }
    }
}

impl Component for SettingsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => self.menu.close(),
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.items.is_empty() {
                    self.cursor = (self.cursor + 1) % self.items.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.items.is_empty() {
                    self.cursor = if self.cursor == 0 {
                        self.items.len() - 1
                    } else {
                        self.cursor - 1
                    };
                }
            }
            KeyCode::Enter => self.invoke(self.cursor)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !self.menu.is_showing() {
            return Ok(());
        }
        let position = Position::new(mouse.column, mouse.row);
        let Some(area) = self.area else {
            self.menu.click_outside();
            return Ok(());
        };
        let inner = area.inner(Margin::new(1, 1));
        if inner.contains(position) {
            let row = (mouse.row - inner.y) as usize;
            if let Some(Some(index)) = self.rows().get(row).copied() {
                self.cursor = index;
                self.invoke(index)?;
            }
        } else if !area.contains(position) {
            self.menu.click_outside();
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        if !self.menu.is_showing() {
            self.area = None;
            return;
        }

        let popover = self.popover_area(area);
        let inner_width = popover.width.saturating_sub(2) as usize;

        let lines: Vec<Line> = self
            .rows()
            .into_iter()
            .map(|row| match row {
                None => Line::from(Span::styled(
                    "─".repeat(inner_width),
                    Style::default().fg(Color::DarkGray),
                )),
                Some(i) => {
                    let style = if i == self.cursor {
                        Style::default()
                            .bg(Color::DarkGray)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Line::from(Span::styled(
                        self.item_label(self.items[i].action, inner_width),
                        style,
                    ))
                }
            })
            .collect();

        let widget = Paragraph::new(lines).block(
            Block::default()
                .title("Settings")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(Clear, popover);
        f.render_widget(widget, popover);
        self.area = Some(popover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    use crate::domain::screen::Screen;

    fn component() -> (SettingsComponent, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut settings = SettingsComponent::new(tx);
        let identities = vec![Identity::new("A1")];
        settings.set_context(&identities, identities.first(), "mainnet");
        settings.toggle();
        (settings, rx)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_sign_out_sends_actions_in_order() {
        let (mut settings, mut rx) = component();
        let sign_out = settings
            .items
            .iter()
            .position(|item| item.action == MenuAction::SignOut)
            .unwrap();

        settings.invoke(sign_out).unwrap();

        assert!(!settings.is_showing());
        assert_eq!(rx.try_recv().unwrap(), Action::SignOut);
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::ChangeScreen(Screen::Installed)
        );
    }

    #[test]
    fn test_click_outside_closes() {
        let (mut settings, mut rx) = component();
        settings.area = Some(Rect::new(40, 0, POPOVER_WIDTH, 10));

        settings.handle_mouse_event(click(2, 2)).unwrap();

        assert!(!settings.is_showing());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_click_on_item_invokes_it() {
        let (mut settings, mut rx) = component();
        settings.area = Some(Rect::new(40, 0, POPOVER_WIDTH, 10));

        // First row inside the border is "Switch account"
        settings.handle_mouse_event(click(45, 1)).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::ChangeScreen(Screen::SwitchAccount)
        );
    }

    #[test]
    fn test_click_on_border_row_is_ignored() {
        let (mut settings, mut rx) = component();
        settings.area = Some(Rect::new(40, 0, POPOVER_WIDTH, 10));

        // Top border carrying the title
        settings.handle_mouse_event(click(45, 0)).unwrap();

        assert!(settings.is_showing());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_click_on_border_column_is_ignored() {
        let (mut settings, mut rx) = component();
        settings.area = Some(Rect::new(40, 0, POPOVER_WIDTH, 10));

        settings.handle_mouse_event(click(40, 1)).unwrap();
        settings
            .handle_mouse_event(click(40 + POPOVER_WIDTH - 1, 1))
            .unwrap();

        assert!(settings.is_showing());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_click_on_divider_is_ignored() {
        let (mut settings, mut rx) = component();
        settings.area = Some(Rect::new(40, 0, POPOVER_WIDTH, 10));

        // Row 2 is the divider above "Add username"
        settings.handle_mouse_event(click(45, 2)).unwrap();

        assert!(settings.is_showing());
        assert!(rx.try_recv().is_err());
    }
}
