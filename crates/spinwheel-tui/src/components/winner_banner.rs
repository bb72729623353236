use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use spinwheel_core::resolve::Winner;

use crate::component::Component;
use crate::theme::Theme;

/// "You won: ..." once a spin resolves.
pub struct WinnerBanner {
    theme: Theme,
    winner: Option<Winner>,
    spinning: bool,
    spin_hint: String,
}

impl WinnerBanner {
    pub fn new(theme: Theme, spin_key: &str) -> Self {
        Self {
            theme,
            winner: None,
            spinning: false,
            spin_hint: format!("Press {} to spin", spin_key),
        }
    }

    pub fn set(&mut self, winner: Option<Winner>, spinning: bool) {
        self.winner = winner;
        self.spinning = spinning;
    }

    pub fn text(&self) -> String {
        match (&self.winner, self.spinning) {
            (Some(winner), _) => format!("You won: {}", winner),
            (None, true) => "Spinning...".to_string(),
            (None, false) => self.spin_hint.clone(),
        }
    }
}

impl Component for WinnerBanner {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let style = if self.winner.is_some() {
            self.theme.winner
        } else {
            self.theme.dimmed
        };
        let line = Line::from(Span::styled(self.text(), style));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
