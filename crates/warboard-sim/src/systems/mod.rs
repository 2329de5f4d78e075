//! Systems that resolve actions on the battlefield.
//!
//! Systems are free functions over the battlefield, the side states and the
//! engine's RNG. They own no state of their own.

pub mod combat;
pub mod economy;
pub mod missile;
pub mod radar;
pub mod snapshot;
pub mod territory;
