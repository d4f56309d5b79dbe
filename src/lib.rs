//! Chore card packs.
//!
//! Curate a collection of chore cards, hand out rarity-weighted random packs
//! of them through expiring share links, and drive the phased reveal when a
//! recipient opens one. Cards and packs live in DuckDB, either in a local
//! database file or in memory.
//!
//! # Quick start
//!
//! ```no_run
//! use chorepack::{Card, ChorepackSdk, Rarity};
//!
//! let sdk = ChorepackSdk::builder()
//!     .in_memory()
//!     .origin("https://chores.example")
//!     .build()
//!     .unwrap();
//!
//! sdk.cards().save(&Card::new("Take out the bins", Rarity::Common)).unwrap();
//! sdk.cards().save(&Card::new("Clean the oven", Rarity::Legendary)).unwrap();
//!
//! // Two players, three cards each
//! let packs = sdk.generate_packs(2, 3).unwrap();
//! println!("{}", packs[0].shareable_link);
//!
//! // The recipient's side
//! let mut session = sdk.open_pack(&packs[0].token);
//! session.open().unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod booster;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod reveal;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncChorepackSdk;
pub use connection::Connection;
pub use error::{ChorepackError, Result};
pub use models::{Card, Pack, PlayerPack, Rarity};
pub use reveal::{Phase, RevealEvent, RevealSession, RevealTiming};
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ChorepackSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ChorepackSdk`].
///
/// The share-link origin has no default: building without one fails with
/// [`ChorepackError::NotConfigured`].
#[derive(Debug, Clone, Default)]
pub struct ChorepackSdkBuilder {
    database: Option<PathBuf>,
    in_memory: bool,
    origin: Option<String>,
    timing: RevealTiming,
}

impl ChorepackSdkBuilder {
    /// Seed a builder from `CHOREPACK_ORIGIN` and `CHOREPACK_DATABASE`.
    ///
    /// Unset variables leave the corresponding option unset.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(origin) = std::env::var(config::ORIGIN_ENV) {
            if !origin.trim().is_empty() {
                builder.origin = Some(origin);
            }
        }
        if let Ok(path) = std::env::var(config::DATABASE_ENV) {
            if !path.trim().is_empty() {
                builder.database = Some(PathBuf::from(path));
            }
        }
        builder
    }

    /// Store cards and packs in the DuckDB file at `path`.
    ///
    /// If neither this nor [`in_memory`](Self::in_memory) is called, the
    /// platform data directory is used (see
    /// [`config::default_database_path`]).
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database = Some(path.as_ref().to_path_buf());
        self.in_memory = false;
        self
    }

    /// Keep everything in memory. Nothing survives the SDK being dropped.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self.database = None;
        self
    }

    /// Public origin that share links are built under, e.g.
    /// `https://chores.example`.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Override the reveal timeline constants.
    pub fn reveal_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Open the database and build the SDK.
    pub fn build(self) -> Result<ChorepackSdk> {
        let origin = self.origin.ok_or_else(|| {
            ChorepackError::NotConfigured(format!(
                "no share-link origin; call .origin(..) or set {}",
                config::ORIGIN_ENV
            ))
        })?;

        let conn = if self.in_memory {
            Connection::open_in_memory()?
        } else {
            Connection::open(self.database.unwrap_or_else(config::default_database_path))?
        };

        Ok(ChorepackSdk {
            conn,
            origin,
            timing: self.timing,
        })
    }
}

// ---------------------------------------------------------------------------
// ChorepackSdk
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the database [`Connection`] and hands out lightweight borrowing
/// wrappers for the card collection, the pack store and the generator.
pub struct ChorepackSdk {
    conn: Connection,
    origin: String,
    timing: RevealTiming,
}

impl ChorepackSdk {
    pub fn builder() -> ChorepackSdkBuilder {
        ChorepackSdkBuilder::default()
    }

    // -- Component accessors -----------------------------------------------

    /// Access the card collection.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.conn)
    }

    /// Access the pack store.
    pub fn packs(&self) -> queries::PackStore<'_> {
        queries::PackStore::new(&self.conn)
    }

    /// A pack generator that persists to this SDK's pack store and builds
    /// links under the configured origin.
    pub fn generator(&self) -> booster::PackGenerator<queries::PackStore<'_>> {
        booster::PackGenerator::new(self.packs(), self.origin.clone())
    }

    // -- Lifecycle operations ----------------------------------------------

    /// Generate one pack per player from the whole card collection.
    pub fn generate_packs(
        &self,
        player_count: usize,
        cards_per_player: usize,
    ) -> Result<Vec<PlayerPack>> {
        let pool = self.cards().list()?;
        self.generator().generate(player_count, cards_per_player, &pool)
    }

    /// Start a reveal session for `token`, already loaded.
    ///
    /// The session is `Sealed` if the pack resolved, `Expired` otherwise.
    pub fn open_pack(&self, token: &str) -> RevealSession {
        let mut session = RevealSession::new(self.timing);
        // A fresh session is always in Loading, so load cannot be rejected.
        let _ = session.load(self.packs().get_pack(token));
        session
    }

    /// The share link for a token under the configured origin.
    pub fn share_link(&self, token: &str) -> String {
        config::share_link(&self.origin, token)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn reveal_timing(&self) -> RevealTiming {
        self.timing
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the SDK and close the database.
    pub fn close(self) {
        drop(self);
    }
}

impl fmt::Display for ChorepackSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let database = match self.conn.path() {
            Some(p) => p.display().to_string(),
            None => ":memory:".to_string(),
        };
        write!(f, "ChorepackSdk(database={}, origin={})", database, self.origin)
    }
}
