//! Async wrapper around [`ChorepackSdk`] for use in tokio services.
//!
//! DuckDB calls are blocking, so every SDK operation runs on tokio's blocking
//! pool via [`tokio::task::spawn_blocking`]. The SDK sits behind a
//! [`Mutex`]; operations are serialized, which matches the single-writer
//! connection underneath.
//!
//! # Example
//!
//! ```no_run
//! use chorepack::AsyncChorepackSdk;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncChorepackSdk::builder()
//!         .in_memory()
//!         .origin("https://chores.example")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let packs = sdk.generate_packs(2, 3).await;
//!     let total = sdk.run(|s| s.cards().count()).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{ChorepackError, Result};
use crate::models::{Card, PlayerPack};
use crate::reveal::{RevealDriver, RevealEvent, RevealSession, RevealTiming};
use crate::{ChorepackSdk, ChorepackSdkBuilder};

use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// AsyncChorepackSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for an [`AsyncChorepackSdk`]. Mirrors [`ChorepackSdkBuilder`].
#[derive(Debug, Clone, Default)]
pub struct AsyncChorepackSdkBuilder {
    inner: ChorepackSdkBuilder,
}

impl AsyncChorepackSdkBuilder {
    /// Seed the builder from the environment. See
    /// [`ChorepackSdkBuilder::from_env`].
    pub fn from_env() -> Self {
        Self {
            inner: ChorepackSdkBuilder::from_env(),
        }
    }

    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        self.inner = self.inner.database_path(path);
        self
    }

    pub fn in_memory(mut self) -> Self {
        self.inner = self.inner.in_memory();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.inner = self.inner.origin(origin);
        self
    }

    pub fn reveal_timing(mut self, timing: RevealTiming) -> Self {
        self.inner = self.inner.reveal_timing(timing);
        self
    }

    /// Build the SDK. Opening the database runs on the blocking pool.
    pub async fn build(self) -> Result<AsyncChorepackSdk> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = inner.build()?;
            let timing = sdk.reveal_timing();
            Ok(AsyncChorepackSdk {
                inner: Arc::new(Mutex::new(sdk)),
                timing,
            })
        })
        .await
        .map_err(|e| ChorepackError::InvalidInput(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncChorepackSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`ChorepackSdk`]. Cheap to clone.
#[derive(Clone)]
pub struct AsyncChorepackSdk {
    inner: Arc<Mutex<ChorepackSdk>>,
    timing: RevealTiming,
}

impl AsyncChorepackSdk {
    pub fn builder() -> AsyncChorepackSdkBuilder {
        AsyncChorepackSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use chorepack::AsyncChorepackSdk;
    /// # async fn example(sdk: AsyncChorepackSdk) -> chorepack::Result<()> {
    /// let cards = sdk.run(|s| s.cards().list()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ChorepackSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| ChorepackError::InvalidInput("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ChorepackError::InvalidInput(format!("Task join error: {e}")))?
    }

    /// Every card in the collection, newest first.
    pub async fn list_cards(&self) -> Result<Vec<Card>> {
        self.run(|s| s.cards().list()).await
    }

    /// Insert or update a card.
    pub async fn save_card(&self, card: Card) -> Result<Card> {
        self.run(move |s| s.cards().save(&card)).await
    }

    pub async fn delete_card(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.run(move |s| s.cards().delete(&id)).await
    }

    /// Generate one pack per player from the whole collection.
    pub async fn generate_packs(
        &self,
        player_count: usize,
        cards_per_player: usize,
    ) -> Result<Vec<PlayerPack>> {
        self.run(move |s| s.generate_packs(player_count, cards_per_player))
            .await
    }

    /// Resolve a pack token into its cards.
    pub async fn get_pack(&self, token: &str) -> Result<Vec<Card>> {
        let token = token.to_string();
        self.run(move |s| s.packs().get_pack(&token)).await
    }

    /// Look up `token` and hand back a timer-driven reveal for it.
    ///
    /// The driver starts `Sealed` or `Expired`; any lookup failure,
    /// including a storage error, lands in `Expired`.
    pub async fn open_pack(
        &self,
        token: &str,
    ) -> (RevealDriver, mpsc::UnboundedReceiver<RevealEvent>) {
        let fetched = self.get_pack(token).await;
        let (driver, rx) = RevealDriver::new(RevealSession::new(self.timing));
        // A new driver is in Loading; load is only rejected after teardown.
        let _ = driver.load(fetched);
        (driver, rx)
    }
}
