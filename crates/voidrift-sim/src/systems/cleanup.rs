//! End-of-tick cleanup: despawn marked entities and out-of-bounds
//! projectiles.

use hecs::{Entity, World};

use voidrift_core::components::{Dead, EnemyShot, PlayerShot, SeekerMissile};
use voidrift_core::constants::*;
use voidrift_core::types::Position;

fn shot_out_of_bounds(pos: &Position) -> bool {
    pos.x < -SHOT_DESPAWN_MARGIN
        || pos.x > ARENA_WIDTH + SHOT_DESPAWN_MARGIN
        || pos.y < -SHOT_DESPAWN_MARGIN
        || pos.y > ARENA_HEIGHT + SHOT_DESPAWN_MARGIN
}

/// Despawn everything marked `Dead` plus any projectile that left the
/// arena.
pub fn cleanup_system(world: &mut World) {
    let mut doomed: Vec<Entity> = world
        .query::<&Dead>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for (entity, pos) in world
        .query::<&Position>()
        .with::<&PlayerShot>()
        .without::<&Dead>()
        .iter()
    {
        if shot_out_of_bounds(pos) {
            doomed.push(entity);
        }
    }
    for (entity, pos) in world
        .query::<&Position>()
        .with::<&EnemyShot>()
        .without::<&Dead>()
        .iter()
    {
        if shot_out_of_bounds(pos) {
            doomed.push(entity);
        }
    }
    for (entity, pos) in world
        .query::<&Position>()
        .with::<&SeekerMissile>()
        .without::<&Dead>()
        .iter()
    {
        if shot_out_of_bounds(pos) {
            doomed.push(entity);
        }
    }

    for entity in doomed {
        let _ = world.despawn(entity);
    }
}
