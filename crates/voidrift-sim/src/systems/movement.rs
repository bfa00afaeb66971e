//! Player movement and velocity integration.

use hecs::World;

use voidrift_core::components::{Stunned, XpOrb};
use voidrift_core::constants::*;
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;

/// Move the player from input and integrate every (Position, Velocity)
/// entity. XP orbs are excluded; the leveling system owns their motion.
pub fn movement_system(world: &mut World, player: &mut PlayerState, dt: f64) {
    let (mut mx, mut my) = (player.move_x, player.move_y);
    let mag = (mx * mx + my * my).sqrt();
    if mag > 1.0 {
        mx /= mag;
        my /= mag;
    }
    player.pos.x = (player.pos.x + mx * player.derived.speed * dt)
        .clamp(PLAYER_EDGE_MARGIN, ARENA_WIDTH - PLAYER_EDGE_MARGIN);
    player.pos.y = (player.pos.y + my * player.derived.speed * dt)
        .clamp(PLAYER_EDGE_MARGIN, ARENA_HEIGHT - PLAYER_EDGE_MARGIN);

    for (_, (pos, vel)) in world
        .query::<(&mut Position, &Velocity)>()
        .without::<&XpOrb>()
        .without::<&Stunned>()
        .iter()
    {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}
