pub mod geo;
pub mod transform;
pub mod vec;

pub use geo::*;
pub use transform::*;
pub use vec::*;
