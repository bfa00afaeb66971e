//! Support weapons: Plasma Burst, Seeker Drone, Orbital Cannon, and the
//! Nebula Rounds cloud parameters.

use hecs::{Entity, World};

use voidrift_core::components::{Dead, Enemy, SeekerMissile};
use voidrift_core::enums::WeaponId;
use voidrift_core::events::{FxEvent, SoundCue};
use voidrift_core::types::{Position, Velocity};

use crate::systems::damage::{damage_enemies_in_radius, flush_novas, KillCtx, NebulaParams};

use super::{spawn_player_shot, WeaponCtx, WeaponRegistry};

/// Orbital satellite: orbit radius, spin rate, and bullet speed.
pub const ORBITAL_RADIUS: f64 = 120.0;
pub const ORBITAL_ANGULAR_RATE: f64 = 2.0;
const ORBITAL_SHOT_SPEED: f64 = 700.0;

const PLASMA_BASE_RADIUS: f64 = 150.0;
const SEEKER_SPEED: f64 = 500.0;

const NEBULA_RADIUS: f64 = 70.0;
const NEBULA_TICK_SECS: f64 = 0.5;

/// Cloud parameters for the installed Nebula Rounds level, if any.
pub fn nebula_params(weapons: &WeaponRegistry, derived_damage: f64) -> Option<NebulaParams> {
    let level = weapons.level_of(WeaponId::NebulaRounds);
    if level == 0 {
        return None;
    }
    let fraction = if level >= 3 { 0.5 } else { 0.3 };
    Some(NebulaParams {
        duration_secs: level as f64,
        damage_per_tick: (derived_damage * fraction).max(1.0),
        radius: NEBULA_RADIUS,
        tick_secs: NEBULA_TICK_SECS,
    })
}

/// Plasma Burst: expanding ring around the ship.
pub fn fire_plasma_burst(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let mut radius = PLASMA_BASE_RADIUS * ctx.player.derived.blast_area;
    if level >= 3 {
        radius *= 1.5;
    }
    let damage = ctx.ledger.final_damage(ctx.player.derived.damage * 1.5, false);
    let center = ctx.player.pos;

    ctx.fx.push(FxEvent::Explosion {
        x: center.x,
        y: center.y,
        radius,
    });
    let mut kctx = KillCtx {
        now: ctx.now,
        rng: &mut *ctx.rng,
        player: &mut *ctx.player,
        ledger: &*ctx.ledger,
        score: &mut *ctx.score,
        events: &mut *ctx.events,
        fx: &mut *ctx.fx,
        nebula: ctx.nebula,
        force_nova: false,
        nova_queue: Vec::new(),
    };
    damage_enemies_in_radius(world, center, radius, damage, &mut kctx);
    flush_novas(world, &mut kctx);
}

/// Launch the drone volley at the nearest enemies.
pub fn launch_seeker_missiles(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let count = [1u32, 1, 2][level.clamp(1, 3) as usize - 1];
    let damage = ctx.ledger.final_damage(ctx.player.derived.damage * 2.0, false);
    let origin = ctx.player.pos;

    let target = nearest_enemy(world, origin);
    for i in 0..count {
        // Launch sideways-up so the homing arc reads on screen
        let angle = -std::f64::consts::FRAC_PI_2 + (i as f64 - (count - 1) as f64 / 2.0) * 0.6;
        world.spawn((
            origin,
            Velocity::from_angle(angle, SEEKER_SPEED),
            SeekerMissile {
                damage,
                speed: SEEKER_SPEED,
                target_id: target.map(|(entity, _)| entity.to_bits().get()),
            },
        ));
    }
}

/// Re-aim every missile at its target, retargeting when the target dies.
pub fn steer_seeker_missiles(world: &mut World, _dt: f64) {
    let enemies: Vec<(Entity, Position)> = world
        .query::<&Position>()
        .with::<&Enemy>()
        .without::<&Dead>()
        .iter()
        .map(|(entity, pos)| (entity, *pos))
        .collect();

    for (_, (pos, vel, missile)) in world
        .query::<(&Position, &mut Velocity, &mut SeekerMissile)>()
        .iter()
    {
        let target_pos = missile
            .target_id
            .and_then(|bits| Entity::from_bits(bits))
            .and_then(|target| {
                enemies
                    .iter()
                    .find(|(entity, _)| *entity == target)
                    .map(|(_, p)| *p)
            });
        let target_pos = match target_pos {
            Some(p) => Some(p),
            None => {
                // Target gone: lock the closest live enemy
                let next = enemies
                    .iter()
                    .min_by(|(_, a), (_, b)| {
                        pos.manhattan_to(a).total_cmp(&pos.manhattan_to(b))
                    })
                    .copied();
                missile.target_id = next.map(|(entity, _)| entity.to_bits().get());
                next.map(|(_, p)| p)
            }
        };
        if let Some(tp) = target_pos {
            *vel = Velocity::from_angle(pos.angle_to(&tp), missile.speed);
        }
    }
}

/// Each satellite fires one aimed bullet at the closest enemy.
pub fn fire_orbital_cannon(
    world: &mut World,
    weapons: &WeaponRegistry,
    level: u8,
    ctx: &mut WeaponCtx,
) {
    let satellites = if level >= 3 { 2 } else { 1 };
    let pierce = ctx.player.derived.pierce;
    for i in 0..satellites {
        let angle = weapons.orbital_angle + i as f64 * std::f64::consts::PI;
        let sat = Position::new(
            ctx.player.pos.x + angle.cos() * ORBITAL_RADIUS,
            ctx.player.pos.y + angle.sin() * ORBITAL_RADIUS,
        );
        let Some((_, target_pos)) = nearest_enemy(world, sat) else {
            continue;
        };
        let is_crit = ctx
            .ledger
            .roll_crit(ctx.player.derived.crit_chance, false, ctx.rng);
        let damage = ctx.ledger.final_damage(ctx.player.derived.damage, is_crit);
        let vel = Velocity::from_angle(sat.angle_to(&target_pos), ORBITAL_SHOT_SPEED);
        spawn_player_shot(world, ctx.score, sat, vel, damage, is_crit, pierce);
    }
    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Shot,
    });
}

fn nearest_enemy(world: &World, from: Position) -> Option<(Entity, Position)> {
    world
        .query::<&Position>()
        .with::<&Enemy>()
        .without::<&Dead>()
        .iter()
        .min_by(|(_, a), (_, b)| from.manhattan_to(a).total_cmp(&from.manhattan_to(b)))
        .map(|(entity, pos)| (entity, *pos))
}
