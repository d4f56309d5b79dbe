pub mod draw;
pub mod generator;

pub use draw::{draw_cards, draw_cards_with};
pub use generator::PackGenerator;
