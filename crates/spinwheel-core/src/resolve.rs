use std::fmt;
use std::num::NonZeroUsize;

use crate::wheel::WheelConfig;

pub const FULL_TURN: f64 = 360.0;

/// What the pointer landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Label(String),
    SpecialPrize(String),
}

impl Winner {
    pub fn text(&self) -> &str {
        match self {
            Winner::Label(text) | Winner::SpecialPrize(text) => text,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Winner::SpecialPrize(_))
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Outcome of one completed spin.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub index: usize,
    pub winner: Winner,
    pub rotation_degrees: f64,
}

/// Map a cumulative clockwise rotation to the index of the segment under the
/// pointer.
///
/// Segments are laid out counter-clockwise from the zero reference while the
/// wheel turns clockwise, so the raw slot counted from zero has to be read
/// backwards: slot `k` is segment `n - 1 - k`. Only `rotation mod 360` matters.
pub fn winning_index(cumulative_degrees: f64, segment_count: NonZeroUsize) -> usize {
    let n = segment_count.get();
    let normalized = cumulative_degrees.rem_euclid(FULL_TURN);
    let width = FULL_TURN / n as f64;
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let raw = ((normalized / width).floor() as usize).min(n - 1);
    (n - 1 - raw) % n
}

/// Resolve the winner for `cumulative_degrees` against `config`.
pub fn resolve_winner(config: &WheelConfig, cumulative_degrees: f64) -> Resolution {
    let index = winning_index(cumulative_degrees, config.segment_count());
    let winner = match config.segments.get(index) {
        Some(segment) if segment.special_prize => {
            Winner::SpecialPrize(config.special_prize_marker.clone())
        }
        Some(segment) => Winner::Label(segment.label.clone()),
        None => Winner::Label(String::new()),
    };
    Resolution {
        index,
        winner,
        rotation_degrees: cumulative_degrees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn test_zero_rotation_lands_on_last_segment() {
        assert_eq!(winning_index(0.0, n(8)), 7);
    }

    #[test]
    fn test_one_segment_width_steps_back_one() {
        assert_eq!(winning_index(45.0, n(8)), 6);
        assert_eq!(winning_index(90.0, n(8)), 5);
        assert_eq!(winning_index(315.0, n(8)), 0);
    }

    #[test]
    fn test_inside_segment() {
        assert_eq!(winning_index(44.999, n(8)), 7);
        assert_eq!(winning_index(46.0, n(8)), 6);
        assert_eq!(winning_index(359.999, n(8)), 0);
    }

    #[test]
    fn test_full_turns_are_ignored() {
        for turns in 0..6 {
            let base = turns as f64 * FULL_TURN;
            assert_eq!(winning_index(base + 100.0, n(8)), winning_index(100.0, n(8)));
        }
        assert_eq!(winning_index(720.0, n(8)), 7);
        assert_eq!(winning_index(1080.0 + 45.0, n(8)), 6);
    }

    #[test]
    fn test_single_segment_always_wins() {
        for angle in [0.0, 1.0, 179.5, 359.9, 1000.0] {
            assert_eq!(winning_index(angle, n(1)), 0);
        }
    }

    #[test]
    fn test_index_in_range_for_many_sizes() {
        for count in 1..=24 {
            let mut angle = 0.0;
            while angle < 2000.0 {
                let index = winning_index(angle, n(count));
                assert!(index < count, "index {} out of range for n={}", index, count);
                angle += 7.3;
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let first = winning_index(987.654, n(8));
        for _ in 0..10 {
            assert_eq!(winning_index(987.654, n(8)), first);
        }
    }

    #[test]
    fn test_tiny_negative_rotation_stays_in_range() {
        assert!(winning_index(-1e-18, n(8)) < 8);
    }

    #[test]
    fn test_resolve_special_prize_uses_marker() {
        let config = WheelConfig::default();
        let resolution = resolve_winner(&config, 0.0);
        assert_eq!(resolution.index, 7);
        assert_eq!(resolution.winner, Winner::SpecialPrize("Gift".to_string()));
        assert_eq!(resolution.winner.to_string(), "Gift");
        assert!(resolution.winner.is_special());
    }

    #[test]
    fn test_resolve_label() {
        let config = WheelConfig::default();
        let resolution = resolve_winner(&config, 45.0);
        assert_eq!(resolution.index, 6);
        assert_eq!(resolution.winner, Winner::Label("80%".to_string()));
        assert!(!resolution.winner.is_special());

        let resolution = resolve_winner(&config, 720.0 + 3.0 * 45.0 + 10.0);
        assert_eq!(resolution.index, 4);
        assert_eq!(resolution.winner.text(), "60%");
    }
}
