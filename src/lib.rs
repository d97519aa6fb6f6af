//! City Simulation Library
//!
//! Deterministic procedural city generation with lane traffic that can run
//! independently or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
