//! Projectile guns: the main gun (with Spread Cannon shaping), the Rear
//! Guard turret, and the Bullet Storm overdrive.

use hecs::World;

use voidrift_core::enums::WeaponId;
use voidrift_core::events::{FxEvent, SoundCue};
use voidrift_core::types::Velocity;

use super::{spawn_player_shot, WeaponCtx, WeaponRegistry, STORM_DURATION_SECS};
use voidrift_core::constants::PLAYER_SHOT_SPEED;

/// Angular step between shots in a fan (radians).
const FAN_STEP: f64 = 10.0 * std::f64::consts::PI / 180.0;

/// Fire the main volley: one crit roll for the whole fan.
pub fn fire_main_gun(world: &mut World, weapons: &WeaponRegistry, _level: u8, ctx: &mut WeaponCtx) {
    if weapons.main_gun_overridden() {
        return;
    }
    let storm = weapons.storm_active(ctx.now);
    let spread_cannon = weapons.level_of(WeaponId::SpreadCannon);
    let mut count = ctx.player.derived.spread;
    let mut base = ctx.player.derived.damage;
    if spread_cannon > 0 {
        count = count.max([3, 5, 7][spread_cannon as usize - 1]);
        if spread_cannon >= 3 {
            base *= 1.15;
        }
    }
    if storm && weapons.storm_level >= 3 {
        base *= 1.5;
    }

    let is_crit = ctx
        .ledger
        .roll_crit(ctx.player.derived.crit_chance, storm, ctx.rng);
    let damage = ctx.ledger.final_damage(base, is_crit);
    let pierce = ctx.player.derived.pierce;
    let aim = ctx.player.aim_angle;
    let pos = ctx.player.pos;

    for i in 0..count {
        let t = i as f64 - (count - 1) as f64 / 2.0;
        let vel = Velocity::from_angle(aim + t * FAN_STEP, PLAYER_SHOT_SPEED);
        spawn_player_shot(world, ctx.score, pos, vel, damage, is_crit, pierce);
    }
    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Shot,
    });
}

/// Rear Guard: a backward fan on its own timer.
pub fn fire_rear_guard(world: &mut World, level: u8, ctx: &mut WeaponCtx) {
    let count = [1u32, 2, 3][level.clamp(1, 3) as usize - 1];
    let mut base = ctx.player.derived.damage;
    if level >= 3 {
        base *= 1.5;
    }
    let is_crit = ctx
        .ledger
        .roll_crit(ctx.player.derived.crit_chance, false, ctx.rng);
    let damage = ctx.ledger.final_damage(base, is_crit);
    let pierce = ctx.player.derived.pierce;
    let aim = ctx.player.aim_angle + std::f64::consts::PI;
    let pos = ctx.player.pos;

    for i in 0..count {
        let t = i as f64 - (count - 1) as f64 / 2.0;
        let vel = Velocity::from_angle(aim + t * FAN_STEP, PLAYER_SHOT_SPEED);
        spawn_player_shot(world, ctx.score, pos, vel, damage, is_crit, pierce);
    }
}

/// Bullet Storm: open the overdrive window. The main gun reads the
/// window for its rate and damage boost.
pub fn start_bullet_storm(weapons: &mut WeaponRegistry, level: u8, ctx: &mut WeaponCtx) {
    weapons.storm_until = ctx.now + STORM_DURATION_SECS;
    weapons.storm_level = level;
    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Shot,
    });
    ctx.fx.push(FxEvent::ScreenShake { intensity: 0.5 });
}
