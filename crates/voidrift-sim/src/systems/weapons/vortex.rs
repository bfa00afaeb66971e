//! Spatial weapons: Black Hole grenades, the permanent Event Horizon
//! well, and the Warp Strike teleport.

use hecs::{Entity, World};

use voidrift_core::components::{Dead, Enemy, GravityWell, Stunned};
use voidrift_core::constants::*;
use voidrift_core::enums::WeaponId;
use voidrift_core::events::{FxEvent, SoundCue};
use voidrift_core::types::Position;

use crate::systems::damage::{damage_enemies_in_radius, flush_novas, KillCtx};
use crate::timers::TimerAction;

use super::{WeaponCtx, WeaponRegistry};

/// Cluster scan radius when picking a grenade or warp target.
const CLUSTER_RADIUS: f64 = 150.0;

const BLACK_HOLE_RADIUS: f64 = 200.0;
const BLACK_HOLE_PULL: f64 = 200.0;
const BLACK_HOLE_LIFETIME: f64 = 3.0;
const WELL_TICK_SECS: f64 = 0.5;
/// 50 DMG/s at the 0.5s tick.
const WELL_TICK_DAMAGE: f64 = 25.0;

/// Event Horizon anchor point (upper-center of the arena).
const HORIZON_X: f64 = ARENA_WIDTH / 2.0;
const HORIZON_Y: f64 = 700.0;

const WARP_BLAST_RADIUS: f64 = 120.0;
const WARP_STUN_SECS: f64 = 1.0;
/// The player snaps back shortly after the detonation.
const WARP_RETURN_DELAY: f64 = 0.2;

/// Center of the densest enemy cluster, falling back to the boss.
pub(crate) fn cluster_target(world: &World, boss_pos: Option<Position>) -> Option<Position> {
    let positions: Vec<Position> = world
        .query::<&Position>()
        .with::<&Enemy>()
        .without::<&Dead>()
        .iter()
        .map(|(_, pos)| *pos)
        .collect();
    if positions.is_empty() {
        return boss_pos;
    }
    // Ties go to the first candidate scanned
    let mut best: Option<(Position, usize)> = None;
    for candidate in &positions {
        let count = positions
            .iter()
            .filter(|other| candidate.distance_to(other) <= CLUSTER_RADIUS)
            .count();
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((*candidate, count));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Keep the permanent well in sync with the installed level. Re-placing
/// on a level change swaps the old well out.
pub fn maintain_event_horizon(world: &mut World, weapons: &mut WeaponRegistry, blast_area: f64) {
    let level = weapons.level_of(WeaponId::EventHorizon);
    if level == 0 || weapons.horizon_placed_level == level {
        return;
    }
    if let Some(old) = weapons.horizon_entity.take().and_then(Entity::from_bits) {
        let _ = world.despawn(old);
    }
    let radius = if level >= 2 { 300.0 } else { 200.0 } * blast_area;
    let pull = if level >= 2 { 80.0 } else { 50.0 };
    let entity = world.spawn((
        Position::new(HORIZON_X, HORIZON_Y),
        GravityWell {
            radius,
            pull_strength: pull,
            damage_per_tick: (level >= 3).then_some(WELL_TICK_DAMAGE),
            expires_at: None,
            next_tick_at: 0.0,
        },
    ));
    weapons.horizon_entity = Some(entity.to_bits().get());
    weapons.horizon_placed_level = level;
}

/// Lob a grenade at the densest cluster.
pub fn throw_black_hole(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let boss_pos = ctx.boss.as_ref().map(|b| b.pos);
    let Some(target) = cluster_target(world, boss_pos) else {
        return;
    };
    world.spawn((
        target,
        GravityWell {
            radius: BLACK_HOLE_RADIUS * ctx.player.derived.blast_area,
            pull_strength: BLACK_HOLE_PULL,
            damage_per_tick: (level >= 3).then_some(WELL_TICK_DAMAGE),
            expires_at: Some(ctx.now + BLACK_HOLE_LIFETIME),
            next_tick_at: ctx.now + WELL_TICK_SECS,
        },
    ));
    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Warp,
    });
}

/// Teleport to the densest cluster, detonate, and snap back.
pub fn warp_strike(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let boss_pos = ctx.boss.as_ref().map(|b| b.pos);
    let Some(target) = cluster_target(world, boss_pos) else {
        return;
    };
    let origin = ctx.player.pos;
    ctx.fx.push(FxEvent::WarpFlash {
        x: origin.x,
        y: origin.y,
    });
    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Warp,
    });
    ctx.player.pos = target;
    ctx.timers.schedule(
        ctx.now + WARP_RETURN_DELAY,
        TimerAction::WarpReturn {
            x: origin.x,
            y: origin.y,
        },
    );
    if let Some(secs) = ctx.ledger.warp_invuln_secs {
        ctx.player
            .grant_invulnerability(ctx.now + secs + WARP_RETURN_DELAY);
    }

    let raw = [100.0, 150.0, 200.0][level.clamp(1, 3) as usize - 1];
    let damage = ctx.ledger.final_damage(raw, false);
    let radius = WARP_BLAST_RADIUS * ctx.player.derived.blast_area;

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
    damage_enemies_in_radius(world, target, radius, damage, &mut kctx);
    flush_novas(world, &mut kctx);

    if level >= 3 {
        let survivors: Vec<Entity> = world
            .query::<(&Position, &Enemy)>()
            .without::<&Dead>()
            .iter()
            .filter(|(_, (pos, _))| target.distance_to(pos) <= radius)
            .map(|(entity, _)| entity)
            .collect();
        for entity in survivors {
            let _ = world.insert_one(
                entity,
                Stunned {
                    until: ctx.now + WARP_STUN_SECS,
                },
            );
        }
    }
}
