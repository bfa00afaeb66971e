//! The weapon framework: one registry of installed weapons sharing a
//! cooldown contract, dispatched to per-weapon fire functions.
//!
//! Every slot tracks its own `last_fired`; a new install starts far in
//! the past so the weapon fires on its first eligible tick. Passive
//! weapons (Spread Cannon, Nebula Rounds) never fire themselves; they
//! reshape the main gun and the kill pipeline instead.

pub mod beams;
pub mod guns;
pub mod support;
pub mod vortex;

use hecs::World;
use rand_chacha::ChaCha8Rng;

use voidrift_core::components::PlayerShot;
use voidrift_core::constants::*;
use voidrift_core::enums::WeaponId;
use voidrift_core::events::{FxEvent, GameEvent};
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::timers::TimerQueue;
use crate::upgrades::UpgradeLedger;

use super::boss::BossEncounter;
use super::damage::NebulaParams;

/// Bullet Storm burst length.
pub const STORM_DURATION_SECS: f64 = 3.0;

/// Main-gun fire-rate multiplier while the storm is active.
pub const STORM_RATE_FACTOR: f64 = 10.0;

/// One installed weapon.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSlot {
    pub id: WeaponId,
    pub level: u8,
    pub last_fired: f64,
}

/// All installed weapons plus the cross-weapon state they share.
#[derive(Debug)]
pub struct WeaponRegistry {
    pub slots: Vec<WeaponSlot>,
    /// Orbital satellite angle, advanced every tick.
    pub orbital_angle: f64,
    /// Level at which the Event Horizon well was last placed (0 = none).
    pub horizon_placed_level: u8,
    /// Entity bits of the placed permanent well.
    pub horizon_entity: Option<u64>,
    /// Bullet Storm window end.
    pub storm_until: f64,
    pub storm_level: u8,
}

impl Default for WeaponRegistry {
    fn default() -> Self {
        Self {
            slots: vec![WeaponSlot {
                id: WeaponId::MainGun,
                level: 1,
                last_fired: f64::NEG_INFINITY,
            }],
            orbital_angle: 0.0,
            horizon_placed_level: 0,
            horizon_entity: None,
            storm_until: f64::NEG_INFINITY,
            storm_level: 0,
        }
    }
}

impl WeaponRegistry {
    pub fn add_or_level(&mut self, id: WeaponId, level: u8, _now: f64) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.level = slot.level.max(level);
        } else {
            self.slots.push(WeaponSlot {
                id,
                level,
                last_fired: f64::NEG_INFINITY,
            });
        }
    }

    pub fn level_of(&self, id: WeaponId) -> u8 {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.level)
            .unwrap_or(0)
    }

    /// A beam weapon has claimed the main-gun firing slot.
    pub fn main_gun_overridden(&self) -> bool {
        self.slots.iter().any(|s| s.id.overrides_main_gun())
    }

    pub fn storm_active(&self, now: f64) -> bool {
        now < self.storm_until
    }
}

/// Seconds between shots for a firing weapon; `None` for passives.
pub fn fire_interval(
    id: WeaponId,
    level: u8,
    player: &PlayerState,
    storm_active: bool,
) -> Option<f64> {
    let lv = level.clamp(1, 3) as usize - 1;
    let cooldown_mult = (1.0 - player.derived.cooldown).max(0.1);
    let base = match id {
        WeaponId::MainGun => {
            let mut interval = 1.0 / player.derived.fire_rate.max(0.1);
            if storm_active {
                interval /= STORM_RATE_FACTOR;
            }
            interval
        }
        WeaponId::RearGuard => [0.8, 0.6, 0.4][lv],
        WeaponId::PlasmaBurst => [4.0, 3.0, 2.0][lv],
        WeaponId::SeekerDrone => [5.0, 3.0, 3.0][lv],
        WeaponId::TwinLaser => beams::LASER_TICK_SECS,
        WeaponId::OrbitalCannon => [2.0, 1.5, 1.0][lv],
        WeaponId::BlackHole => [8.0, 6.0, 4.0][lv],
        WeaponId::WarpStrike => [10.0, 7.0, 5.0][lv],
        WeaponId::PhotonDevastator => [3.0, 2.5, 2.0][lv],
        WeaponId::BulletStorm => [12.0, 10.0, 8.0][lv],
        WeaponId::SpreadCannon | WeaponId::NebulaRounds | WeaponId::EventHorizon => return None,
    };
    Some(base * cooldown_mult)
}

/// Shared mutable context threaded through the fire functions.
pub struct WeaponCtx<'a> {
    pub now: f64,
    pub dt: f64,
    pub rng: &'a mut ChaCha8Rng,
    pub player: &'a mut PlayerState,
    pub ledger: &'a mut UpgradeLedger,
    pub score: &'a mut ScoreState,
    pub timers: &'a mut TimerQueue,
    pub events: &'a mut Vec<GameEvent>,
    pub fx: &'a mut Vec<FxEvent>,
    pub boss: &'a mut Option<BossEncounter>,
    pub nebula: Option<NebulaParams>,
}

/// Spawn one player projectile, respecting the pool cap. Counts toward
/// accuracy.
pub fn spawn_player_shot(
    world: &mut World,
    score: &mut ScoreState,
    pos: Position,
    vel: Velocity,
    damage: f64,
    is_crit: bool,
    pierce: u32,
) {
    let live = world.query::<&PlayerShot>().iter().count();
    if live >= MAX_PLAYER_SHOTS {
        return;
    }
    score.shots_fired += 1;
    world.spawn((
        pos,
        vel,
        PlayerShot {
            damage,
            is_crit,
            pierce,
            pierce_used: 0,
            hit_ids: Vec::new(),
        },
    ));
}

/// Run one tick of the weapon framework: advance continuous state, then
/// fire every slot whose cooldown has elapsed.
pub fn weapons_system(world: &mut World, weapons: &mut WeaponRegistry, ctx: &mut WeaponCtx) {
    if weapons.level_of(WeaponId::OrbitalCannon) > 0 {
        weapons.orbital_angle += support::ORBITAL_ANGULAR_RATE * ctx.dt;
    }
    support::steer_seeker_missiles(world, ctx.dt);
    vortex::maintain_event_horizon(world, weapons, ctx.player.derived.blast_area);

    let storm = weapons.storm_active(ctx.now);
    let due: Vec<(usize, WeaponId, u8)> = weapons
        .slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let interval = fire_interval(slot.id, slot.level, ctx.player, storm)?;
            (ctx.now - slot.last_fired >= interval).then_some((i, slot.id, slot.level))
        })
        .collect();

    for (i, id, level) in due {
        weapons.slots[i].last_fired = ctx.now;
        match id {
            WeaponId::MainGun => guns::fire_main_gun(world, weapons, level, ctx),
            WeaponId::RearGuard => guns::fire_rear_guard(world, level, ctx),
            WeaponId::BulletStorm => guns::start_bullet_storm(weapons, level, ctx),
            WeaponId::TwinLaser => beams::tick_twin_laser(world, level, ctx),
            WeaponId::PhotonDevastator => beams::fire_photon_devastator(world, level, ctx),
            WeaponId::PlasmaBurst => support::fire_plasma_burst(world, level, ctx),
            WeaponId::SeekerDrone => support::launch_seeker_missiles(world, level, ctx),
            WeaponId::OrbitalCannon => support::fire_orbital_cannon(world, weapons, level, ctx),
            WeaponId::BlackHole => vortex::throw_black_hole(world, level, ctx),
            WeaponId::WarpStrike => vortex::warp_strike(world, level, ctx),
            WeaponId::EventHorizon | WeaponId::SpreadCannon | WeaponId::NebulaRounds => {}
        }
    }
}
