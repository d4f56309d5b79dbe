pub mod cards;
pub mod packs;
