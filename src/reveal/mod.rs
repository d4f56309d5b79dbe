//! Client-side pack opening: phase state machine and reveal timeline.

#[cfg(feature = "async")]
pub mod driver;
pub mod schedule;
pub mod session;

#[cfg(feature = "async")]
pub use driver::RevealDriver;
pub use schedule::{RevealAction, RevealStep, RevealTiming};
pub use session::{Phase, RevealEvent, RevealSession};
