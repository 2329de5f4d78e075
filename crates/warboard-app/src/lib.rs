//! WarBoard host.
//!
//! Wires the simulation crates together: TOML configuration, the real-time
//! game loop thread, and an autopilot that plays the human side so whole
//! matches can run unattended.

pub mod autopilot;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod runner;
pub mod state;

pub use warboard_core as core;
