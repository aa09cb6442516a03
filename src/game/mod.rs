//! Core game module containing shared components, resources, events, and constants.

mod components;
mod constants;
mod events;
mod resources;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
