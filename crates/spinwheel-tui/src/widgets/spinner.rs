use ratatui::style::Style;
use ratatui::text::Span;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille busy indicator shown in the status bar while the wheel turns.
pub struct Spinner {
    tick: usize,
    style: Style,
}

impl Spinner {
    pub fn new(style: Style) -> Self {
        Self { tick: 0, style }
    }

    pub fn tick(&mut self) {
        self.tick = (self.tick + 1) % SPINNER_FRAMES.len();
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }

    pub fn span(&self) -> Span<'static> {
        Span::styled(SPINNER_FRAMES[self.tick], self.style)
    }
}
