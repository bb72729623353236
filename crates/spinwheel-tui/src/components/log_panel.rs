use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::popup::Popup;
use crate::theme::Theme;

const MAX_ENTRIES: usize = 500;

/// In-app history of spins and results, shown as a scrollable popup.
pub struct LogPanel {
    pub visible: bool,
    popup: Popup,
    theme: Theme,
    messages: Vec<LogEntry>,
    scroll_offset: usize,
    started: Instant,
}

struct LogEntry {
    elapsed: Duration,
    message: String,
}

impl LogPanel {
    pub fn new(theme: Theme) -> Self {
        Self {
            visible: false,
            popup: Popup::new("Logs", theme.clone()).with_size(70, 60),
            theme,
            messages: Vec::new(),
            scroll_offset: 0,
            started: Instant::now(),
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll_offset = self.messages.len().saturating_sub(1);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: String) {
        self.messages.push(LogEntry {
            elapsed: self.started.elapsed(),
            message,
        });
        if self.messages.len() > MAX_ENTRIES {
            self.messages.drain(..self.messages.len() - MAX_ENTRIES);
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('l') => {
                self.hide();
                Action::ClosePopup
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll_offset + 1 < self.messages.len() {
                    self.scroll_offset += 1;
                }
                Action::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll_offset = 0;
                Action::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_offset = self.messages.len().saturating_sub(1);
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, full: Rect) {
        if !self.visible {
            return;
        }

        let inner = self
            .popup
            .render_frame(frame, full, &format!(" ({})", self.messages.len()));
        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let visible_height = body.height as usize;
        let start = self
            .scroll_offset
            .saturating_sub(visible_height.saturating_sub(1));
        let end = (start + visible_height).min(self.messages.len());

        let lines: Vec<Line> = self.messages[start..end]
            .iter()
            .map(|entry| {
                let secs = entry.elapsed.as_secs();
                Line::from(vec![
                    Span::styled(
                        format!("[{:02}:{:02}] ", secs / 60, secs % 60),
                        self.theme.dimmed,
                    ),
                    Span::styled(entry.message.as_str(), self.theme.normal),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), body);

        let hints = Line::from(Span::styled(
            "j/k:scroll  g/G:top/bottom  q:close",
            self.theme.dimmed,
        ));
        frame.render_widget(Paragraph::new(hints), footer);
    }
}
