//! Core types and definitions for the IRONCLASH arena.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tank configurations, components, commands, frame snapshots, events,
//! and constants. It has no dependency on the simulation or any renderer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod presets;
pub mod state;
pub mod types;
