//! Core data models for the tournament.

mod ids;
mod outcome;
mod pairing;
mod player;
mod round;
mod score;

pub use ids::*;
pub use outcome::*;
pub use pairing::*;
pub use player::*;
pub use round::*;
pub use score::*;
