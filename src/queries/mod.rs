//! Query modules over the DuckDB-backed collection.
//!
//! Each module provides a query struct that borrows a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning `Result<T>`.

pub mod cards;
pub mod packs;

pub use cards::CardQuery;
pub use packs::{PackRegistry, PackStore};
