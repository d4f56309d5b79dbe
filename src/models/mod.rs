pub mod card;
pub mod pack;

pub use card::*;
pub use pack::*;
