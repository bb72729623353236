use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use spinwheel_core::resolve::FULL_TURN;
use spinwheel_core::resolver::SpinState;
use spinwheel_core::wheel::Segment;

use crate::component::Component;
use crate::theme::Theme;
use crate::widgets::wheel::{canvas_angle, segment_start, SpinAnimation, WheelShape};

const GIFT_GLYPH: &str = "🎁";
const LABEL_RADIUS: f64 = 0.62;

/// The wheel itself, with the pointer fixed at 12 o'clock.
pub struct WheelPanel {
    theme: Theme,
    segments: Vec<Segment>,
    animation_duration: Duration,
    displayed: f64,
    animation: Option<SpinAnimation>,
    highlight: Option<usize>,
}

impl WheelPanel {
    pub fn new(theme: Theme, segments: Vec<Segment>, animation_duration: Duration) -> Self {
        Self {
            theme,
            segments,
            animation_duration,
            displayed: 0.0,
            animation: None,
            highlight: None,
        }
    }

    /// Follow a new resolver snapshot: animate towards its rotation and
    /// highlight the winning segment once there is one.
    pub fn observe(&mut self, state: &SpinState) {
        let target = state.cumulative_rotation_degrees;
        let current_target = self
            .animation
            .as_ref()
            .map_or(self.displayed, SpinAnimation::target);
        if target != current_target {
            self.animation = Some(SpinAnimation::new(
                self.displayed,
                target,
                self.animation_duration,
                Instant::now(),
            ));
        }
        self.highlight = state.winning_index;
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn displayed_rotation(&self) -> f64 {
        self.displayed
    }

    fn label_for(&self, segment: &Segment) -> String {
        if segment.special_prize {
            GIFT_GLYPH.to_string()
        } else {
            segment.label.clone()
        }
    }
}

impl Component for WheelPanel {
    fn tick(&mut self) {
        let now = Instant::now();
        let Some((angle, finished)) = self
            .animation
            .as_ref()
            .map(|a| (a.angle_at(now), a.is_finished(now)))
        else {
            return;
        };
        self.displayed = angle;
        if finished {
            self.animation = None;
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 4 || inner.height < 4 {
            return;
        }

        // Terminal cells are roughly twice as tall as they are wide
        let aspect = inner.width as f64 / (inner.height as f64 * 2.0);
        let (x_span, y_span) = if aspect >= 1.0 {
            (1.25 * aspect, 1.25)
        } else {
            (1.25, 1.25 / aspect)
        };
        let cell_width = 2.0 * x_span / inner.width as f64;

        let n = self.segments.len().max(1);
        let width = FULL_TURN / n as f64;
        let rotation = self.displayed;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-x_span, x_span])
            .y_bounds([-y_span, y_span])
            .paint(|ctx| {
                ctx.draw(&WheelShape {
                    segments: &self.segments,
                    rotation,
                    radius: 1.0,
                    rim: self.theme.wheel_rim,
                    alternate: self.theme.wheel_alternate,
                });
                ctx.layer();

                for (index, segment) in self.segments.iter().enumerate() {
                    let mid = segment_start(index, width, rotation) + width / 2.0;
                    let phi = canvas_angle(mid).to_radians();
                    let text = self.label_for(segment);
                    let style = if self.highlight == Some(index) {
                        self.theme.winner.add_modifier(Modifier::REVERSED)
                    } else if segment.special_prize {
                        self.theme.special_prize
                    } else if segment.alternate_color {
                        self.theme.segment_label_alternate
                    } else {
                        self.theme.segment_label
                    };
                    let half = text.chars().count() as f64 * cell_width / 2.0;
                    ctx.print(
                        LABEL_RADIUS * phi.cos() - half,
                        LABEL_RADIUS * phi.sin(),
                        Line::from(Span::styled(text, style)),
                    );
                }

                ctx.print(
                    -cell_width / 2.0,
                    1.1,
                    Line::from(Span::styled("▼", self.theme.pointer)),
                );
                ctx.print(
                    -cell_width / 2.0,
                    0.0,
                    Line::from(Span::styled("●", self.theme.pointer)),
                );
            });

        frame.render_widget(canvas, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinwheel_core::wheel::default_segments;

    fn state(rotation: f64, winner: Option<usize>) -> SpinState {
        SpinState {
            cumulative_rotation_degrees: rotation,
            is_spinning: winner.is_none(),
            winner: None,
            winning_index: winner,
            spins_completed: 0,
        }
    }

    #[test]
    fn test_observe_starts_animation_once() {
        let mut panel = WheelPanel::new(Theme::dark(), default_segments(), Duration::from_secs(2));
        assert!(!panel.is_animating());

        panel.observe(&state(900.0, None));
        assert!(panel.is_animating());
        let first = panel.animation.clone().unwrap();

        // the same target does not restart the animation
        panel.observe(&state(900.0, Some(3)));
        assert_eq!(panel.animation.as_ref().unwrap().target(), first.target());
        assert_eq!(panel.highlight, Some(3));
    }

    #[test]
    fn test_zero_duration_settles_on_tick() {
        let mut panel = WheelPanel::new(Theme::dark(), default_segments(), Duration::ZERO);
        panel.observe(&state(765.0, None));
        panel.tick();
        assert!(!panel.is_animating());
        assert_eq!(panel.displayed_rotation(), 765.0);
    }

    #[test]
    fn test_special_segment_uses_glyph() {
        let panel = WheelPanel::new(Theme::dark(), default_segments(), Duration::ZERO);
        assert_eq!(panel.label_for(&panel.segments[7]), GIFT_GLYPH);
        assert_eq!(panel.label_for(&panel.segments[0]), "20%");
    }
}
