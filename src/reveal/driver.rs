//! Tokio timer driver for a [`RevealSession`].
//!
//! Once the opening animation completes, a single task walks the session's
//! timeline, sleeping until each step and applying it. Steps are applied by
//! that one task, so card flips can never overtake each other. Tearing the
//! driver down (explicitly or by dropping it) cancels the task and marks the
//! session torn down under the same lock the task applies steps with, so no
//! flip lands afterwards.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::session::{Phase, RevealEvent, RevealSession};
use crate::error::{ChorepackError, Result};
use crate::models::Card;

/// Drives a [`RevealSession`] in real (tokio) time.
///
/// Events for the presentation layer arrive on the receiver returned by
/// [`RevealDriver::new`].
pub struct RevealDriver {
    session: Arc<Mutex<RevealSession>>,
    events: mpsc::UnboundedSender<RevealEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RevealDriver {
    pub fn new(session: RevealSession) -> (Self, mpsc::UnboundedReceiver<RevealEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let driver = Self {
            session: Arc::new(Mutex::new(session)),
            events,
            cancel: CancellationToken::new(),
            task: None,
        };
        (driver, rx)
    }

    pub fn phase(&self) -> Result<Phase> {
        Ok(self.lock()?.phase())
    }

    pub fn revealed(&self) -> Result<Vec<bool>> {
        Ok(self.lock()?.revealed().to_vec())
    }

    pub fn cards(&self) -> Result<Vec<Card>> {
        Ok(self.lock()?.cards().to_vec())
    }

    /// Feed the pack lookup result. See [`RevealSession::load`].
    pub fn load(&self, fetched: Result<Vec<Card>>) -> Result<()> {
        let events = self.lock()?.load(fetched)?;
        self.emit(events);
        Ok(())
    }

    /// The user opened the pack. See [`RevealSession::open`].
    pub fn open(&self) -> Result<()> {
        let events = self.lock()?.open()?;
        self.emit(events);
        Ok(())
    }

    /// The opening animation finished: start the reveal timers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn animation_complete(&mut self) -> Result<()> {
        self.lock()?.animation_complete()?;

        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        let cancel = self.cancel.clone();
        let start = Instant::now();

        self.task = Some(tokio::spawn(async move {
            loop {
                let due = match session.lock().ok().and_then(|s| s.next_due()) {
                    Some(due) => due,
                    None => break,
                };

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep_until(start + due) => {}
                }

                let fired = match session.lock() {
                    Ok(mut s) => s.advance(due),
                    Err(_) => break,
                };
                for event in fired {
                    // The receiver may be gone; the session still advances.
                    let _ = events.send(event);
                }
            }
        }));

        Ok(())
    }

    /// Cancel every pending step. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        if let Ok(mut s) = self.session.lock() {
            s.teardown();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn emit(&self, events: Vec<RevealEvent>) {
        for event in events {
            let _ = self.events.send(event);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RevealSession>> {
        self.session
            .lock()
            .map_err(|_| ChorepackError::InvalidInput("Reveal session lock poisoned".into()))
    }
}

impl Drop for RevealDriver {
    fn drop(&mut self) {
        self.teardown();
    }
}
