//! Boss adversary state machines for VOIDRIFT.
//!
//! Pure functions over plain data: phase thresholds, attack scheduling,
//! projectile patterns, and the dive choreography. No ECS dependency;
//! the sim crate bridges these into the world.

pub mod dive;
pub mod phases;

pub use voidrift_core as core;

#[cfg(test)]
mod tests;
