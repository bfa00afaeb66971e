//! Per-kind enemy behavior: steering, fire timers, diver lunges, and
//! bomber detonations.
//!
//! The pass is collect-then-apply: steering and state transitions happen
//! inside the query, while shot spawns and detonations are buffered and
//! applied afterward.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use voidrift_core::components::{
    BehaviorState, BomberStage, Dead, DiverStage, Enemy, EnemyShot, Stunned,
};
use voidrift_core::config::waves::{BOMBER_AOE_RADIUS, BOMBER_DETONATE_RADIUS, BOMBER_TELEGRAPH_SECS};
use voidrift_core::constants::*;
use voidrift_core::events::{FxEvent, GameEvent, SoundCue};
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::upgrades::UpgradeLedger;

use super::damage::damage_player;

/// Run one tick of enemy behavior.
#[allow(clippy::too_many_arguments)]
pub fn enemy_ai_system(
    world: &mut World,
    player: &mut PlayerState,
    ledger: &mut UpgradeLedger,
    score: &mut ScoreState,
    wave_damage_taken: &mut bool,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    rng: &mut ChaCha8Rng,
    now: f64,
) {
    let player_pos = player.pos;
    let mut shots: Vec<(Position, Velocity)> = Vec::new();
    let mut detonations: Vec<(Entity, Position)> = Vec::new();
    let mut out_of_bounds: Vec<Entity> = Vec::new();

    for (entity, (pos, vel, enemy, behavior)) in world
        .query::<(&Position, &mut Velocity, &mut Enemy, &mut BehaviorState)>()
        .without::<&Dead>()
        .without::<&Stunned>()
        .iter()
    {
        if pos.x < -ENEMY_DESPAWN_MARGIN
            || pos.x > ARENA_WIDTH + ENEMY_DESPAWN_MARGIN
            || pos.y < -ENEMY_DESPAWN_MARGIN
            || pos.y > ARENA_HEIGHT + ENEMY_DESPAWN_MARGIN
        {
            out_of_bounds.push(entity);
            continue;
        }

        let aim = pos.angle_to(&player_pos);
        match behavior {
            BehaviorState::Chase => {
                *vel = Velocity::from_angle(aim, enemy.speed);
            }
            BehaviorState::Weave => {
                let sway = ((now - enemy.spawned_at) * WEAVER_SWAY_RATE).sin()
                    * WEAVER_SWAY_AMPLITUDE;
                let base = Velocity::from_angle(aim, enemy.speed);
                // Perpendicular sway around the homing direction
                let perp_x = -aim.sin();
                let perp_y = aim.cos();
                *vel = Velocity::new(base.x + perp_x * sway, base.y + perp_y * sway);
            }
            BehaviorState::Diver {
                stage,
                stage_started,
            } => {
                let elapsed = now - *stage_started;
                match stage {
                    DiverStage::Creep => {
                        *vel = Velocity::from_angle(aim, enemy.speed * DIVER_CREEP_SPEED_FACTOR);
                        if elapsed >= DIVER_TELEGRAPH_AT_SECS {
                            *stage = DiverStage::Telegraph;
                        }
                    }
                    DiverStage::Telegraph => {
                        *vel = Velocity::default();
                        if elapsed >= DIVER_LUNGE_AT_SECS {
                            *stage = DiverStage::Lunge;
                            // Velocity locks in here and never retargets
                            *vel = Velocity::from_angle(aim, enemy.speed * 3.0);
                        }
                    }
                    DiverStage::Lunge => {}
                }
            }
            BehaviorState::Leader => {
                *vel = Velocity::from_angle(aim, enemy.speed);
                if enemy.fire_interval.is_finite() && now >= enemy.next_fire_at {
                    enemy.next_fire_at = now + enemy.fire_interval;
                    for i in 0..LEADER_BURST_COUNT {
                        let t = i as f64 - (LEADER_BURST_COUNT - 1) as f64 / 2.0;
                        let angle = aim + t * LEADER_BURST_HALF_ANGLE;
                        shots.push((*pos, Velocity::from_angle(angle, ENEMY_SHOT_SPEED)));
                    }
                }
                continue;
            }
            BehaviorState::Bomber { stage } => {
                match stage {
                    BomberStage::Approach => {
                        *vel = Velocity::from_angle(aim, enemy.speed);
                        if pos.distance_to(&player_pos) <= BOMBER_DETONATE_RADIUS {
                            *stage = BomberStage::Telegraph { started: now };
                            *vel = Velocity::default();
                        }
                    }
                    BomberStage::Telegraph { started } => {
                        *vel = Velocity::default();
                        if now - *started >= BOMBER_TELEGRAPH_SECS {
                            detonations.push((entity, *pos));
                        }
                    }
                }
                continue;
            }
        }

        // Grunt and weaver single aimed shots
        if enemy.fire_interval.is_finite() && now >= enemy.next_fire_at {
            enemy.next_fire_at = now + enemy.fire_interval;
            shots.push((*pos, Velocity::from_angle(aim, ENEMY_SHOT_SPEED)));
        }
    }

    // Stunned enemies hold still
    for (_, vel) in world
        .query::<&mut Velocity>()
        .with::<(&Enemy, &Stunned)>()
        .iter()
    {
        *vel = Velocity::default();
    }

    // Drifted far out: destroy silently, no rewards
    for entity in out_of_bounds {
        let _ = world.insert_one(entity, Dead);
    }

    // Bombers self-destruct without rewards; the blast can hit the player
    for (entity, pos) in detonations {
        let _ = world.insert_one(entity, Dead);
        fx.push(FxEvent::Explosion {
            x: pos.x,
            y: pos.y,
            radius: BOMBER_AOE_RADIUS,
        });
        fx.push(FxEvent::Sound {
            cue: SoundCue::Explosion,
        });
        if pos.distance_to(&player_pos) <= BOMBER_AOE_RADIUS {
            let _ = damage_player(
                world,
                player,
                ledger,
                score,
                wave_damage_taken,
                events,
                fx,
                rng,
                now,
            );
        }
    }

    let live_shots = world.query::<&EnemyShot>().iter().count();
    let budget = MAX_ENEMY_SHOTS.saturating_sub(live_shots);
    for (pos, vel) in shots.into_iter().take(budget) {
        world.spawn((
            pos,
            vel,
            EnemyShot {
                damage: CONTACT_DAMAGE,
            },
        ));
    }
}
