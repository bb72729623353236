use std::time::{Duration, Instant};

use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};

use spinwheel_core::resolve::FULL_TURN;
use spinwheel_core::wheel::Segment;

/// Inner radius (as a fraction of the wheel radius) left empty for the hub.
pub const HUB_RATIO: f64 = 0.2;

/// Convert a clockwise offset from 12 o'clock, where the pointer sits, into
/// a canvas angle (counter-clockwise from +x), both in degrees.
pub fn canvas_angle(clockwise_from_pointer: f64) -> f64 {
    90.0 - clockwise_from_pointer
}

/// Clockwise offset from the pointer of the leading edge of segment `index`
/// when the wheel has turned `rotation` degrees clockwise.
pub fn segment_start(index: usize, segment_width: f64, rotation: f64) -> f64 {
    index as f64 * segment_width + rotation
}

/// The segment drawn under the pointer for a given rotation.
pub fn segment_under_pointer(rotation: f64, segment_count: usize) -> usize {
    let width = FULL_TURN / segment_count as f64;
    let offset = (-rotation).rem_euclid(FULL_TURN);
    ((offset / width).floor() as usize).min(segment_count - 1)
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Eases the displayed rotation from one resting angle to the next.
#[derive(Debug, Clone)]
pub struct SpinAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl SpinAnimation {
    pub fn new(from: f64, to: f64, duration: Duration, started: Instant) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn angle_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Rim, dividers and alternate-segment fill, drawn on a canvas centred at
/// the origin.
pub struct WheelShape<'a> {
    pub segments: &'a [Segment],
    pub rotation: f64,
    pub radius: f64,
    pub rim: Color,
    pub alternate: Color,
}

impl WheelShape<'_> {
    fn paint_polar(&self, painter: &mut Painter<'_, '_>, angle: f64, r: f64, color: Color) {
        let phi = canvas_angle(angle).to_radians();
        if let Some((x, y)) = painter.get_point(r * phi.cos(), r * phi.sin()) {
            painter.paint(x, y, color);
        }
    }
}

impl Shape for WheelShape<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let n = self.segments.len();
        if n == 0 {
            return;
        }
        let width = FULL_TURN / n as f64;
        let hub = self.radius * HUB_RATIO;
        let radial_step = self.radius / 48.0;

        for (index, segment) in self.segments.iter().enumerate() {
            if !segment.alternate_color {
                continue;
            }
            let start = segment_start(index, width, self.rotation);
            let mut a = 0.0;
            while a < width {
                let mut r = hub;
                while r < self.radius {
                    self.paint_polar(painter, start + a, r, self.alternate);
                    r += radial_step;
                }
                a += 0.75;
            }
        }

        for index in 0..n {
            let edge = segment_start(index, width, self.rotation);
            let mut r = hub;
            while r <= self.radius {
                self.paint_polar(painter, edge, r, self.rim);
                r += radial_step;
            }
        }

        let mut a = 0.0;
        while a < FULL_TURN {
            self.paint_polar(painter, a, self.radius, self.rim);
            self.paint_polar(painter, a, hub, self.rim);
            a += 0.5;
        }
    }
}
