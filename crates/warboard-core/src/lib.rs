//! Core types and definitions for the WarBoard simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! board geometry, components, rules, catalogues, commands, events and
//! state snapshots. It has no dependency on any runtime or host.

pub mod board;
pub mod catalogue;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod market;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
