//! The reveal timeline, computed once per pack.
//!
//! All offsets are measured from the moment the opening animation reports
//! completion. Steps are sorted by offset; ties keep their listed order, so
//! the phase change always precedes the first flip scheduled at the same
//! instant.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning constants for the reveal timeline.
///
/// These are presentation values, not correctness constraints: any
/// non-negative values work, and the slide-in stays monotonic in the card
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Extra slide-in time per card.
    pub slide_in_per_card: Duration,
    /// Fixed slide-in time before the first card can flip.
    pub slide_in_base: Duration,
    /// Gap between consecutive card flips.
    pub reveal_interval: Duration,
    /// Pause after the last card's reveal before the session is done.
    pub settle: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            slide_in_per_card: Duration::from_millis(140),
            slide_in_base: Duration::from_millis(400),
            reveal_interval: Duration::from_millis(700),
            settle: Duration::from_millis(500),
        }
    }
}

/// What happens at a scheduled instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealAction {
    /// `Opening` → `Revealing`.
    BeginRevealing,
    /// Flip the card at this index face up.
    Reveal(usize),
    /// `Revealing` → `Done`.
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStep {
    /// Offset from the end of the opening animation.
    pub at: Duration,
    pub action: RevealAction,
}

impl RevealTiming {
    /// Time the cards spend sliding into view before revealing starts.
    pub fn slide_in(&self, card_count: usize) -> Duration {
        times(self.slide_in_per_card, card_count) + self.slide_in_base
    }

    /// Offset of card `index`'s flip.
    pub fn reveal_at(&self, card_count: usize, index: usize) -> Duration {
        self.slide_in(card_count) + times(self.reveal_interval, index)
    }

    /// Offset of the transition to `Done`: one interval after the last flip
    /// (for its animation) plus the settle pause.
    pub fn finish_at(&self, card_count: usize) -> Duration {
        self.slide_in(card_count) + times(self.reveal_interval, card_count) + self.settle
    }

    /// The full timeline for a pack of `card_count` cards.
    pub fn schedule(&self, card_count: usize) -> Vec<RevealStep> {
        let mut steps = Vec::with_capacity(card_count + 2);
        steps.push(RevealStep {
            at: self.slide_in(card_count),
            action: RevealAction::BeginRevealing,
        });
        steps.extend((0..card_count).map(|i| RevealStep {
            at: self.reveal_at(card_count, i),
            action: RevealAction::Reveal(i),
        }));
        steps.push(RevealStep {
            at: self.finish_at(card_count),
            action: RevealAction::Finish,
        });
        // Stable: equal offsets keep their listed order.
        steps.sort_by_key(|s| s.at);
        steps
    }
}

fn times(d: Duration, n: usize) -> Duration {
    d.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX))
}
