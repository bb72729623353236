use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use spinwheel_core::resolver::{SpinPhase, SpinState};

use crate::component::Component;
use crate::keymap::Keymap;
use crate::theme::Theme;
use crate::widgets::spinner::Spinner;

/// Bottom line: wheel phase, spin count, accumulated rotation and key hints.
pub struct StatusBar {
    theme: Theme,
    hints: String,
    spinner: Spinner,
    phase: SpinPhase,
    spins_completed: u64,
    rotation: f64,
    message: Option<String>,
}

impl StatusBar {
    pub fn new(theme: Theme, keymap: &Keymap) -> Self {
        let hints = format!(
            " | {}:spin {}:logs {}:help {}:quit ",
            keymap.hint("spin"),
            keymap.hint("toggle_log_panel"),
            keymap.hint("show_help"),
            keymap.hint("quit"),
        );
        Self {
            spinner: Spinner::new(theme.status_bar),
            theme,
            hints,
            phase: SpinPhase::Idle,
            spins_completed: 0,
            rotation: 0.0,
            message: None,
        }
    }

    pub fn observe(&mut self, state: &SpinState) {
        if state.phase() != self.phase {
            self.spinner.reset();
            self.message = None;
        }
        self.phase = state.phase();
        self.spins_completed = state.spins_completed;
        self.rotation = state.cumulative_rotation_degrees;
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }
}

impl Component for StatusBar {
    fn tick(&mut self) {
        if self.phase == SpinPhase::Spinning {
            self.spinner.tick();
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let style = self.theme.status_bar;
        let mut spans = vec![Span::styled(" ", style)];
        if self.phase == SpinPhase::Spinning {
            spans.push(self.spinner.span());
            spans.push(Span::styled(" ", style));
        }
        spans.push(Span::styled(
            format!(
                "{} | spins: {} | rotation: {:.0}°",
                self.phase, self.spins_completed, self.rotation
            ),
            style,
        ));
        if let Some(ref message) = self.message {
            spans.push(Span::styled(" | ", style));
            spans.push(Span::styled(message.as_str(), style.patch(self.theme.error)));
        }
        spans.push(Span::styled(self.hints.as_str(), style));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingConfig;

    fn spinning(is_spinning: bool) -> SpinState {
        SpinState {
            cumulative_rotation_degrees: 800.0,
            is_spinning,
            winner: None,
            winning_index: None,
            spins_completed: 0,
        }
    }

    #[test]
    fn test_message_cleared_on_phase_change() {
        let keymap = Keymap::from_config(&KeybindingConfig::default());
        let mut bar = StatusBar::new(Theme::dark(), &keymap);
        bar.observe(&spinning(true));
        bar.set_message("Wheel is already spinning".to_string());

        // same phase keeps it
        bar.observe(&spinning(true));
        assert!(bar.message.is_some());

        bar.observe(&spinning(false));
        assert!(bar.message.is_none());
        assert_eq!(bar.rotation, 800.0);
    }

    #[test]
    fn test_hints_follow_keymap() {
        let keymap = Keymap::from_config(&KeybindingConfig::default());
        let bar = StatusBar::new(Theme::dark(), &keymap);
        assert!(bar.hints.contains("Space:spin"));
        assert!(bar.hints.contains("?:help"));
    }
}
