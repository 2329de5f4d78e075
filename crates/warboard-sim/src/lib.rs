//! Simulation engine for WarBoard.
//!
//! Owns the hecs world holding every board asset, resolves moves, clashes
//! and missile strikes turn by turn, and produces GameStateSnapshots for
//! the presentation layer.

pub mod action;
pub mod battlefield;
pub mod engine;
pub mod phase;
pub mod side;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use warboard_core as core;
