//! The pack-opening state machine.
//!
//! ```text
//! Loading ──► Sealed ──► Opening ──► Revealing ──► Done
//!    │
//!    └──► Expired
//! ```
//!
//! The session owns no clock. Callers feed it the fetch result, the open
//! action and the animation-complete signal, then call
//! [`RevealSession::advance`] with the time elapsed since the animation
//! finished. [`RevealDriver`](crate::reveal::RevealDriver) does this on tokio
//! timers.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::schedule::{RevealAction, RevealStep, RevealTiming};
use crate::error::{ChorepackError, Result};
use crate::models::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Sealed,
    Opening,
    Revealing,
    Done,
    Expired,
}

impl Phase {
    /// `Done` and `Expired` are never left.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Expired)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Sealed => "sealed",
            Phase::Opening => "opening",
            Phase::Revealing => "revealing",
            Phase::Done => "done",
            Phase::Expired => "expired",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealEvent {
    PhaseChanged(Phase),
    /// The pack was opened; start the tear animation and report back through
    /// `animation_complete` when it ends.
    StartOpeningAnimation,
    CardRevealed(usize),
}

/// One page view of a pack.
#[derive(Debug, Clone)]
pub struct RevealSession {
    phase: Phase,
    cards: Vec<Card>,
    revealed: Vec<bool>,
    timing: RevealTiming,
    pending: VecDeque<RevealStep>,
    torn_down: bool,
}

impl Default for RevealSession {
    fn default() -> Self {
        Self::new(RevealTiming::default())
    }
}

impl RevealSession {
    /// A fresh session in `Loading`.
    pub fn new(timing: RevealTiming) -> Self {
        Self {
            phase: Phase::Loading,
            cards: Vec::new(),
            revealed: Vec::new(),
            timing,
            pending: VecDeque::new(),
            torn_down: false,
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Face-up flags, one per card.
    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn timing(&self) -> &RevealTiming {
        &self.timing
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Steps armed by `animation_complete` that have not fired yet.
    pub fn pending(&self) -> impl Iterator<Item = &RevealStep> {
        self.pending.iter()
    }

    /// Offset of the next pending step, if any.
    pub fn next_due(&self) -> Option<Duration> {
        if self.torn_down {
            return None;
        }
        self.pending.front().map(|s| s.at)
    }

    // -- Transitions -------------------------------------------------------

    /// Feed the result of the pack lookup.
    ///
    /// A non-empty card list seals the pack. An error of any kind, or an
    /// empty list, expires the session. There is no retry.
    pub fn load(&mut self, fetched: Result<Vec<Card>>) -> Result<Vec<RevealEvent>> {
        self.expect_phase(Phase::Loading, "load a pack")?;

        match fetched {
            Ok(cards) if !cards.is_empty() => {
                self.revealed = vec![false; cards.len()];
                self.cards = cards;
                Ok(vec![self.enter(Phase::Sealed)])
            }
            Ok(_) => Ok(vec![self.enter(Phase::Expired)]),
            Err(e) => {
                tracing::debug!(error = %e, "pack lookup failed");
                Ok(vec![self.enter(Phase::Expired)])
            }
        }
    }

    /// The user opened the pack.
    pub fn open(&mut self) -> Result<Vec<RevealEvent>> {
        self.expect_phase(Phase::Sealed, "open the pack")?;
        Ok(vec![
            self.enter(Phase::Opening),
            RevealEvent::StartOpeningAnimation,
        ])
    }

    /// The opening animation finished: arm the reveal timeline.
    ///
    /// Nothing changes until [`advance`](Self::advance) reaches the first
    /// step, which moves the session to `Revealing` once the slide-in delay
    /// has passed.
    pub fn animation_complete(&mut self) -> Result<()> {
        self.expect_phase(Phase::Opening, "finish the opening animation")?;
        if !self.pending.is_empty() {
            return Err(ChorepackError::InvalidInput(
                "Reveal timeline is already armed".to_string(),
            ));
        }
        self.pending = self.timing.schedule(self.cards.len()).into();
        Ok(())
    }

    /// Apply every pending step due at or before `elapsed` (measured from
    /// the end of the opening animation), strictly in timeline order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }

        while let Some(step) = self.pending.front().copied() {
            if step.at > elapsed {
                break;
            }
            self.pending.pop_front();
            events.extend(self.apply(step.action));
        }

        events
    }

    /// Tear the session down. Pending steps are dropped and no later call
    /// can change the phase or flags.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            tracing::debug!(phase = %self.phase, dropped = self.pending.len(), "reveal session torn down");
        }
        self.torn_down = true;
        self.pending.clear();
    }

    // -- Internals ---------------------------------------------------------

    fn apply(&mut self, action: RevealAction) -> Option<RevealEvent> {
        match action {
            RevealAction::BeginRevealing => Some(self.enter(Phase::Revealing)),
            RevealAction::Reveal(i) => {
                let flag = self.revealed.get_mut(i)?;
                *flag = true;
                tracing::debug!(card = i, "card revealed");
                Some(RevealEvent::CardRevealed(i))
            }
            RevealAction::Finish => Some(self.enter(Phase::Done)),
        }
    }

    fn enter(&mut self, phase: Phase) -> RevealEvent {
        tracing::debug!(from = %self.phase, to = %phase, "reveal phase change");
        self.phase = phase;
        RevealEvent::PhaseChanged(phase)
    }

    fn expect_phase(&self, expected: Phase, action: &str) -> Result<()> {
        if self.torn_down {
            return Err(ChorepackError::InvalidInput(format!(
                "Cannot {} after the session was torn down",
                action
            )));
        }
        if self.phase != expected {
            return Err(ChorepackError::InvalidInput(format!(
                "Cannot {} while {}",
                action, self.phase
            )));
        }
        Ok(())
    }
}
