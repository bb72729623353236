use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::popup::Popup;
use crate::keymap::Keymap;
use crate::theme::Theme;

/// Key bindings overview. Any key closes it.
pub struct HelpPopup {
    pub visible: bool,
    popup: Popup,
    theme: Theme,
    entries: Vec<(String, &'static str)>,
}

impl HelpPopup {
    pub fn new(theme: Theme, keymap: &Keymap) -> Self {
        let entries = vec![
            (keymap.hint("spin").to_string(), "Spin the wheel"),
            ("Click SPIN".to_string(), "Spin the wheel"),
            (keymap.hint("toggle_log_panel").to_string(), "Show spin history"),
            (keymap.hint("show_help").to_string(), "Show this help"),
            (keymap.hint("quit").to_string(), "Quit"),
            (keymap.hint("force_quit").to_string(), "Quit"),
        ];
        Self {
            visible: false,
            popup: Popup::new("Help", theme.clone()).with_size(50, 50),
            theme,
            entries,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn handle_key_event(&mut self, _key: KeyEvent) -> Action {
        self.hide();
        Action::ClosePopup
    }

    pub fn render(&self, frame: &mut Frame, full: Rect) {
        if !self.visible {
            return;
        }

        let inner = self.popup.render_frame(frame, full, "");
        let key_width = self
            .entries
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = vec![Line::from("")];
        lines.extend(self.entries.iter().map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("  {:<width$}  ", key, width = key_width), self.theme.title),
                Span::styled(*description, self.theme.normal),
            ])
        }));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  spinwheel v{}", env!("CARGO_PKG_VERSION")),
            self.theme.dimmed,
        )));
        lines.push(Line::from(Span::styled(
            "  Press any key to close",
            self.theme.dimmed,
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
