//! Beam weapons. Both claim the main-gun slot: the Twin Laser Array
//! deals continuous column damage, the Photon Devastator periodically
//! sweeps the whole arena.

use hecs::{Entity, World};

use voidrift_core::components::{Dead, Enemy};
use voidrift_core::constants::*;
use voidrift_core::events::{FxEvent, SoundCue};
use voidrift_core::types::Position;

use crate::systems::boss;
use crate::systems::damage::{damage_enemy, flush_novas, KillCtx};
use crate::systems::enemy_radius;

use super::WeaponCtx;

/// Twin laser damage tick interval.
pub const LASER_TICK_SECS: f64 = 0.1;

/// Lateral offset of each laser from the ship centerline.
const LASER_OFFSET: f64 = 25.0;

/// Per-tick damage fraction of the derived damage stat.
const LASER_TICK_FRACTION: f64 = 0.5;

/// One 0.1s damage tick of the twin lasers. The beams run straight up
/// from the ship; anything overlapping either column takes the tick.
pub fn tick_twin_laser(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let lv_mult = [1.0, 1.3, 1.6][level.clamp(1, 3) as usize - 1];
    let overcharge = ctx.ledger.laser_overcharge.unwrap_or(0.0);
    let mut half_width = if level >= 3 { 25.0 } else { 15.0 };
    if overcharge > 0.0 {
        half_width += 10.0;
    }
    let base = ctx.player.derived.damage * lv_mult * (1.0 + overcharge) * LASER_TICK_FRACTION;
    let damage = ctx.ledger.final_damage(base, false);
    let origin = ctx.player.pos;
    let beam_xs = [origin.x - LASER_OFFSET, origin.x + LASER_OFFSET];

    let victims: Vec<Entity> = world
        .query::<(&Position, &Enemy)>()
        .without::<&Dead>()
        .iter()
        .filter(|(_, (pos, enemy))| {
            pos.y < origin.y
                && beam_xs
                    .iter()
                    .any(|bx| (pos.x - bx).abs() <= half_width + enemy_radius(enemy.is_elite))
        })
        .map(|(entity, _)| entity)
        .collect();

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
    for entity in victims {
        damage_enemy(world, entity, damage, false, &mut kctx);
    }
    flush_novas(world, &mut kctx);

    if let Some(encounter) = ctx.boss.as_mut() {
        let in_beam = encounter.pos.y < origin.y
            && beam_xs
                .iter()
                .any(|bx| (encounter.pos.x - bx).abs() <= half_width + BOSS_RADIUS);
        if in_beam {
            boss::damage_boss(encounter, damage, ctx.fx);
        }
    }
}

/// Photon Devastator: one arena-wide pulse hitting everything at once.
pub fn fire_photon_devastator(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let mut base = ctx.player.derived.damage * 3.0;
    if level >= 2 {
        base *= 1.5;
    }
    let damage = ctx.ledger.final_damage(base, false);

    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Explosion,
    });
    ctx.fx.push(FxEvent::ScreenShake { intensity: 0.8 });

    let victims: Vec<Entity> = world
        .query::<&Enemy>()
        .without::<&Dead>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

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
    for entity in victims {
        damage_enemy(world, entity, damage, false, &mut kctx);
    }
    flush_novas(world, &mut kctx);

    if let Some(encounter) = ctx.boss.as_mut() {
        boss::damage_boss(encounter, damage, ctx.fx);
    }
}
