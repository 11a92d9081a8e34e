pub mod debounce;
pub mod frame;

pub use debounce::*;
pub use frame::*;
