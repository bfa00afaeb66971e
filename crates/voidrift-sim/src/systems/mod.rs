//! Simulation systems, run in a fixed order each tick by the engine.

pub mod boss;
pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod enemy_ai;
pub mod leveling;
pub mod movement;
pub mod snapshot;
pub mod status;
pub mod wave_spawner;
pub mod weapons;

use voidrift_core::constants::*;

/// Collision radius for an enemy, accounting for elite size.
pub fn enemy_radius(is_elite: bool) -> f64 {
    if is_elite {
        ENEMY_RADIUS * ELITE_SIZE_MULT
    } else {
        ENEMY_RADIUS
    }
}
