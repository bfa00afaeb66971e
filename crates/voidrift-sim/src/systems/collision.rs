//! Collision resolution: player shots against enemies and the boss,
//! seeker missiles, enemy shots against the player, and ramming contact.
//!
//! Queries collect hit pairs first; all mutation happens afterward
//! through the damage pipeline.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use voidrift_core::components::{Dead, Enemy, EnemyShot, PlayerShot, SeekerMissile};
use voidrift_core::constants::*;
use voidrift_core::events::{FxEvent, GameEvent};
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::upgrades::UpgradeLedger;

use super::boss::{damage_boss, BossEncounter};
use super::damage::{
    damage_enemy, damage_player, flush_novas, DamageOutcome, KillCtx, NebulaParams,
};
use super::enemy_radius;

const MISSILE_RADIUS: f64 = 12.0;

/// Run one tick of collision resolution.
#[allow(clippy::too_many_arguments)]
pub fn collision_system(
    world: &mut World,
    boss: &mut Option<BossEncounter>,
    player: &mut PlayerState,
    ledger: &mut UpgradeLedger,
    score: &mut ScoreState,
    wave_damage_taken: &mut bool,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    rng: &mut ChaCha8Rng,
    nebula: Option<NebulaParams>,
    now: f64,
) {
    let enemies: Vec<(Entity, Position, f64)> = world
        .query::<(&Position, &Enemy)>()
        .without::<&Dead>()
        .iter()
        .map(|(entity, (pos, enemy))| (entity, *pos, enemy_radius(enemy.is_elite)))
        .collect();

    // -- Player shots --
    let mut impacts: Vec<(Entity, f64, bool, f64)> = Vec::new(); // enemy, damage, crit, knock angle
    let mut boss_impacts: Vec<f64> = Vec::new();
    let mut spent_shots: Vec<Entity> = Vec::new();
    let mut first_hits: u32 = 0;

    for (shot_entity, (pos, vel, shot)) in world
        .query::<(&Position, &Velocity, &mut PlayerShot)>()
        .without::<&Dead>()
        .iter()
    {
        // Boss hits consume the shot outright
        if let Some(encounter) = boss.as_ref() {
            if encounter.vulnerable
                && encounter.pos.distance_to(pos) <= BOSS_RADIUS + PLAYER_SHOT_RADIUS
            {
                if shot.hit_ids.is_empty() {
                    first_hits += 1;
                }
                boss_impacts.push(shot.damage);
                spent_shots.push(shot_entity);
                continue;
            }
        }

        let knock_angle = vel.y.atan2(vel.x);
        for (enemy_entity, enemy_pos, radius) in &enemies {
            if pos.distance_to(enemy_pos) > radius + PLAYER_SHOT_RADIUS {
                continue;
            }
            let bits = enemy_entity.to_bits().get();
            if shot.hit_ids.contains(&bits) {
                continue;
            }
            if shot.hit_ids.is_empty() {
                first_hits += 1;
            }
            shot.hit_ids.push(bits);
            impacts.push((*enemy_entity, shot.damage, shot.is_crit, knock_angle));
            if shot.pierce_used >= shot.pierce {
                spent_shots.push(shot_entity);
                break;
            }
            shot.pierce_used += 1;
        }
    }
    score.shots_hit += first_hits;

    {
        let mut ctx = KillCtx {
            now,
            rng: &mut *rng,
            player: &mut *player,
            ledger: &*ledger,
            score: &mut *score,
            events: &mut *events,
            fx: &mut *fx,
            nebula,
            force_nova: false,
            nova_queue: Vec::new(),
        };
        for (entity, damage, is_crit, knock_angle) in impacts {
            if damage_enemy(world, entity, damage, is_crit, &mut ctx) != DamageOutcome::Gone {
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    pos.x += knock_angle.cos() * HIT_KNOCKBACK;
                    pos.y += knock_angle.sin() * HIT_KNOCKBACK;
                }
            }
        }
        flush_novas(world, &mut ctx);
    }
    if let Some(encounter) = boss.as_mut() {
        for damage in boss_impacts {
            damage_boss(encounter, damage, fx);
        }
    }
    for shot in spent_shots {
        let _ = world.insert_one(shot, Dead);
    }

    // -- Seeker missiles --
    let mut missile_hits: Vec<(Entity, Entity, f64)> = Vec::new();
    let mut missile_boss_hits: Vec<(Entity, f64)> = Vec::new();
    for (missile_entity, (pos, missile)) in world
        .query::<(&Position, &SeekerMissile)>()
        .without::<&Dead>()
        .iter()
    {
        if let Some(encounter) = boss.as_ref() {
            if encounter.vulnerable
                && encounter.pos.distance_to(pos) <= BOSS_RADIUS + MISSILE_RADIUS
            {
                missile_boss_hits.push((missile_entity, missile.damage));
                continue;
            }
        }
        if let Some((enemy_entity, _, _)) = enemies
            .iter()
            .find(|(_, enemy_pos, radius)| pos.distance_to(enemy_pos) <= radius + MISSILE_RADIUS)
        {
            missile_hits.push((missile_entity, *enemy_entity, missile.damage));
        }
    }
    {
        let mut ctx = KillCtx {
            now,
            rng: &mut *rng,
            player: &mut *player,
            ledger: &*ledger,
            score: &mut *score,
            events: &mut *events,
            fx: &mut *fx,
            nebula,
            force_nova: false,
            nova_queue: Vec::new(),
        };
        for (missile, enemy, damage) in missile_hits {
            let _ = world.insert_one(missile, Dead);
            damage_enemy(world, enemy, damage, false, &mut ctx);
        }
        flush_novas(world, &mut ctx);
    }
    for (missile, damage) in missile_boss_hits {
        let _ = world.insert_one(missile, Dead);
        if let Some(encounter) = boss.as_mut() {
            damage_boss(encounter, damage, fx);
        }
    }

    // -- Enemy shots vs player --
    let incoming: Vec<Entity> = world
        .query::<&Position>()
        .with::<&EnemyShot>()
        .without::<&Dead>()
        .iter()
        .filter(|(_, pos)| {
            player.pos.distance_to(pos) <= PLAYER_RADIUS + ENEMY_SHOT_RADIUS
        })
        .map(|(entity, _)| entity)
        .collect();
    for shot in incoming {
        let _ = world.insert_one(shot, Dead);
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

    // -- Ramming contact: the enemy dies too, without rewards --
    let rammers: Vec<Entity> = enemies
        .iter()
        .filter(|(_, pos, radius)| player.pos.distance_to(pos) <= PLAYER_RADIUS + radius)
        .map(|(entity, _, _)| *entity)
        .collect();
    for enemy in rammers {
        if world.get::<&Dead>(enemy).is_ok() {
            continue;
        }
        let _ = world.insert_one(enemy, Dead);
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
