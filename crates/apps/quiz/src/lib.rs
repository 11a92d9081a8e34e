//! Interaction core of the country quiz globe.
//!
//! Pointer and keyboard events enter through [`dispatcher::InteractionDispatcher`],
//! which owns the motion state, the selection state and the collaborators
//! (renderer and guess panel). Everything runs on one thread, one frame at a
//! time.

pub mod config;
pub mod dispatcher;
pub mod globe_controller;
pub mod presentation;

pub use config::*;
pub use dispatcher::*;
pub use globe_controller::*;
pub use presentation::*;
