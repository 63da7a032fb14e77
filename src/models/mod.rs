pub mod formation;
pub mod lineup;
pub mod player;

pub use formation::*;
pub use lineup::*;
pub use player::*;
