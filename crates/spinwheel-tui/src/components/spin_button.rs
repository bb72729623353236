use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;

/// The SPIN button. Greyed out and unclickable while the wheel turns.
pub struct SpinButton {
    pub enabled: bool,
    theme: Theme,
}

impl SpinButton {
    pub fn new(theme: Theme) -> Self {
        Self {
            enabled: true,
            theme,
        }
    }
}

impl Component for SpinButton {
    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) -> Action {
        let clicked = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            && area.contains(Position::new(mouse.column, mouse.row));
        if clicked && self.enabled {
            Action::Spin
        } else {
            Action::None
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let style = if self.enabled {
            self.theme.button
        } else {
            self.theme.button_disabled
        };
        let button = Paragraph::new("SPIN")
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(button, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_click_inside_spins() {
        let mut button = SpinButton::new(Theme::dark());
        let area = Rect::new(10, 5, 12, 1);
        assert!(matches!(
            button.handle_mouse_event(click(15, 5), area),
            Action::Spin
        ));
        assert!(matches!(
            button.handle_mouse_event(click(2, 5), area),
            Action::None
        ));
    }

    #[test]
    fn test_disabled_button_ignores_clicks() {
        let mut button = SpinButton::new(Theme::dark());
        button.enabled = false;
        let area = Rect::new(0, 0, 10, 1);
        assert!(matches!(
            button.handle_mouse_event(click(3, 0), area),
            Action::None
        ));
    }
}
