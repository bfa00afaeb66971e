//! Simulation engine for VOIDRIFT.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and
//! produces GameStateSnapshots for the frontend. Completely headless and
//! deterministic: one seed, one run.

pub mod engine;
pub mod player;
pub mod score;
pub mod systems;
pub mod timers;
pub mod upgrades;

pub use engine::{GameEngine, SimConfig};
pub use voidrift_core as core;

#[cfg(test)]
mod tests;
