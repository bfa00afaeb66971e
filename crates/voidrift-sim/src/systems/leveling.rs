//! XP orbs, magnet pull, and level thresholds.

use hecs::{Entity, World};

use voidrift_core::components::{Dead, XpOrb};
use voidrift_core::constants::*;
use voidrift_core::events::{FxEvent, GameEvent, SoundCue};
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;

/// Experience progression. Overflow XP carries into the next level, and
/// multiple level-ups bank as pending card offers.
#[derive(Debug, Default)]
pub struct XpState {
    pub xp: u32,
    pub level: u32,
    /// Level-ups awaiting a card offer.
    pub pending_levels: u32,
}

impl XpState {
    /// XP required to clear the current level.
    pub fn threshold(&self) -> u32 {
        XP_THRESHOLD_BASE + XP_THRESHOLD_PER_LEVEL * self.level
    }
}

/// Run one tick of orb motion, collection, and level-ups.
pub fn leveling_system(
    world: &mut World,
    xp: &mut XpState,
    player: &PlayerState,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    now: f64,
    dt: f64,
) {
    let player_pos = player.pos;
    let magnet = player.derived.magnet;
    let mut collected: Vec<(Entity, u32)> = Vec::new();

    for (entity, (pos, vel, orb)) in world
        .query::<(&mut Position, &mut Velocity, &mut XpOrb)>()
        .without::<&Dead>()
        .iter()
    {
        let dist = pos.distance_to(&player_pos);
        if orb.pull_started.is_none() && dist <= magnet {
            orb.pull_started = Some(now);
        }
        match orb.pull_started {
            Some(started) => {
                // Pull ramps quadratically the longer the grab holds
                let held = now - started;
                let speed = ORB_PULL_BASE_SPEED + ORB_PULL_ACCEL * held * held;
                *vel = Velocity::from_angle(pos.angle_to(&player_pos), speed);
            }
            None => {
                vel.x *= ORB_DRAG;
                vel.y *= ORB_DRAG;
            }
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;

        if dist <= ORB_COLLECT_RADIUS {
            collected.push((entity, orb.value));
        }
    }

    for (entity, value) in collected {
        let _ = world.insert_one(entity, Dead);
        xp.xp += value;
        fx.push(FxEvent::Sound {
            cue: SoundCue::Pickup,
        });
    }

    while xp.xp >= xp.threshold() {
        xp.xp -= xp.threshold();
        xp.level += 1;
        xp.pending_levels += 1;
        events.push(GameEvent::LevelUp { level: xp.level });
        fx.push(FxEvent::Sound {
            cue: SoundCue::LevelUp,
        });
    }
}
