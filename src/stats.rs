/// Share of the stats section that must be on screen before the counters play.
pub const TRIGGER_RATIO: f64 = 0.3;
pub const FRAME_MS: u32 = 16;

const BASE_DURATION_MS: f64 = 1100.0;
const DURATION_STEP_MS: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatCard {
    pub target: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

pub const STATS: &[StatCard] = &[
    StatCard {
        target: 12,
        suffix: "+",
        label: "лет готовим водителей",
    },
    StatCard {
        target: 2500,
        suffix: "+",
        label: "выпускников",
    },
    StatCard {
        target: 94,
        suffix: "%",
        label: "сдают с первой попытки",
    },
];

pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

/// Count shown `elapsed_ms` into a count-up of `duration_ms`.
pub fn count_at(target: u32, elapsed_ms: f64, duration_ms: f64) -> u32 {
    if duration_ms <= 0.0 {
        return target;
    }
    let p = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    (target as f64 * ease_out_cubic(p)).round() as u32
}

pub fn card_duration(index: usize) -> f64 {
    BASE_DURATION_MS + index as f64 * DURATION_STEP_MS
}

/// Linear percentage of the whole sequence, rounded.
pub fn overall_progress(elapsed_ms: f64, total_ms: f64) -> u32 {
    if total_ms <= 0.0 {
        return 100;
    }
    ((elapsed_ms / total_ms).clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Fraction of an element spanning `top..bottom` that lies inside a
/// viewport of `viewport_height`.
pub fn visible_fraction(top: f64, bottom: f64, viewport_height: f64) -> f64 {
    let height = bottom - top;
    if height <= 0.0 {
        return 0.0;
    }
    let visible = bottom.min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub values: Vec<u32>,
    pub progress: u32,
    pub done: bool,
}

/// Cards count up one after another, each over its own duration, while the
/// progress bar runs linearly across the whole sequence.
#[derive(Clone, Copy, Debug)]
pub struct Playback {
    cards: &'static [StatCard],
}

impl Playback {
    pub fn new(cards: &'static [StatCard]) -> Self {
        Self { cards }
    }

    pub fn total_ms(&self) -> f64 {
        (0..self.cards.len()).map(card_duration).sum()
    }

    pub fn initial(&self) -> Frame {
        Frame {
            values: vec![0; self.cards.len()],
            progress: 0,
            done: false,
        }
    }

    pub fn finished(&self) -> Frame {
        Frame {
            values: self.cards.iter().map(|card| card.target).collect(),
            progress: 100,
            done: true,
        }
    }

    pub fn frame(&self, elapsed_ms: f64) -> Frame {
        let total = self.total_ms();
        if elapsed_ms >= total {
            return self.finished();
        }

        let mut card_start = 0.0;
        let values = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let duration = card_duration(i);
                let value = count_at(card.target, elapsed_ms - card_start, duration);
                card_start += duration;
                value
            })
            .collect();

        Frame {
            values,
            progress: overall_progress(elapsed_ms, total),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: &[StatCard] = &[
        StatCard {
            target: 100,
            suffix: "",
            label: "a",
        },
        StatCard {
            target: 50,
            suffix: "%",
            label: "b",
        },
    ];

    mod easing_tests {
        use super::*;

        #[test]
        fn ease_out_cubic_endpoints_and_midpoint() {
            assert_eq!(ease_out_cubic(0.0), 0.0);
            assert_eq!(ease_out_cubic(1.0), 1.0);
            assert_eq!(ease_out_cubic(0.5), 0.875);
        }

        #[test]
        fn count_rounds_eased_value() {
            assert_eq!(count_at(100, 550.0, 1100.0), 88);
            assert_eq!(count_at(100, 0.0, 1100.0), 0);
        }

        #[test]
        fn count_clamps_outside_its_window() {
            assert_eq!(count_at(100, -200.0, 1100.0), 0);
            assert_eq!(count_at(100, 5000.0, 1100.0), 100);
        }

        #[test]
        fn durations_grow_per_card() {
            assert_eq!(card_duration(0), 1100.0);
            assert_eq!(card_duration(1), 1250.0);
            assert_eq!(card_duration(2), 1400.0);
        }

        #[test]
        fn progress_is_linear() {
            assert_eq!(overall_progress(0.0, 2000.0), 0);
            assert_eq!(overall_progress(500.0, 2000.0), 25);
            assert_eq!(overall_progress(9000.0, 2000.0), 100);
        }
    }

    mod playback_tests {
        use super::*;

        #[test]
        fn cards_play_in_sequence() {
            let playback = Playback::new(CARDS);
            let frame = playback.frame(550.0);

            assert_eq!(frame.values, vec![88, 0]);
            assert!(!frame.done);
        }

        #[test]
        fn second_card_starts_after_first_finishes() {
            let playback = Playback::new(CARDS);
            let frame = playback.frame(1100.0 + 625.0);

            assert_eq!(frame.values, vec![100, 44]);
            assert_eq!(frame.progress, 73);
        }

        #[test]
        fn ends_on_exact_targets() {
            let playback = Playback::new(CARDS);

            assert_eq!(playback.total_ms(), 2350.0);
            assert_eq!(playback.frame(2350.0), playback.finished());
            assert_eq!(playback.finished().values, vec![100, 50]);
            assert_eq!(playback.finished().progress, 100);
        }

        #[test]
        fn starts_from_zero() {
            let playback = Playback::new(CARDS);
            assert_eq!(playback.frame(0.0), playback.initial());
        }
    }

    mod visibility_tests {
        use super::*;

        #[test]
        fn below_viewport_is_hidden() {
            assert_eq!(visible_fraction(900.0, 1300.0, 800.0), 0.0);
        }

        #[test]
        fn partly_scrolled_in() {
            // 120 of 400px on screen.
            let fraction = visible_fraction(680.0, 1080.0, 800.0);
            assert!(fraction >= TRIGGER_RATIO);
            assert!(visible_fraction(700.0, 1100.0, 800.0) < TRIGGER_RATIO);
        }

        #[test]
        fn taller_than_viewport_counts_visible_part() {
            assert_eq!(visible_fraction(-500.0, 1500.0, 1000.0), 0.5);
        }

        #[test]
        fn collapsed_element_is_hidden() {
            assert_eq!(visible_fraction(100.0, 100.0, 800.0), 0.0);
        }
    }
}
