//! Adversary policy for WarBoard.
//!
//! Decides a computer-controlled side's turn: a scored missile strike or a
//! unit advance, falling back to passing.

pub mod maneuver;
pub mod policy;
pub mod targeting;

pub use policy::{decide, AdversaryContext, Decision, PolicyParams, UnitSlot};
pub use warboard_core as core;

#[cfg(test)]
mod tests;
