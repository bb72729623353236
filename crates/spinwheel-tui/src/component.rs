use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::action::Action;

/// Shared shape of the on-screen pieces (wheel, button, banner, status bar).
pub trait Component {
    fn handle_key_event(&mut self, _key: KeyEvent) -> Action {
        Action::None
    }

    /// Mouse events arrive with the area the component last rendered into.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent, _area: Rect) -> Action {
        Action::None
    }

    /// Advance time-based state such as animations.
    fn tick(&mut self) {}

    fn render(&self, frame: &mut Frame, area: Rect);
}
