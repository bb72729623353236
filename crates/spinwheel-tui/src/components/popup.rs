use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear};
use ratatui::Frame;

use crate::theme::Theme;

/// A centered overlay frame. Owners render their content into the returned
/// inner area.
pub struct Popup {
    pub title: String,
    theme: Theme,
    width_percent: u16,
    height_percent: u16,
}

impl Popup {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self {
            title: title.into(),
            theme,
            width_percent: 50,
            height_percent: 40,
        }
    }

    pub fn with_size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.width_percent = width_percent;
        self.height_percent = height_percent;
        self
    }

    /// The popup rectangle centered within `full`.
    pub fn centered_area(&self, full: Rect) -> Rect {
        let width = (full.width as u32 * self.width_percent as u32 / 100) as u16;
        let height = (full.height as u32 * self.height_percent as u32 / 100) as u16;

        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(full);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);
        area
    }

    /// Clear the background, draw the border with `title_suffix` appended to
    /// the title, and return the inner area.
    pub fn render_frame(&self, frame: &mut Frame, full: Rect, title_suffix: &str) -> Rect {
        let area = self.centered_area(full);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {}{} ", self.title, title_suffix))
            .borders(Borders::ALL)
            .border_style(self.theme.popup_border)
            .title_style(self.theme.popup_title);

        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}
