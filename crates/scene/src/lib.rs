pub mod country;
pub mod guesses;
pub mod picking;
pub mod resolve;
pub mod selection;

pub use country::*;
