//! Ongoing status effects: shield recharge, life steal, nebula clouds,
//! gravity wells, and stun expiry.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use voidrift_core::components::{Dead, Enemy, GravityWell, NebulaCloud, Stunned};
use voidrift_core::constants::*;
use voidrift_core::events::{FxEvent, GameEvent, TextStyle};
use voidrift_core::types::Position;

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::upgrades::UpgradeLedger;

use super::damage::{damage_enemies_in_radius, flush_novas, KillCtx, NebulaParams};

/// Damage tick interval shared by clouds and wells.
const FIELD_TICK_SECS: f64 = 0.5;

/// Run one tick of status effects.
#[allow(clippy::too_many_arguments)]
pub fn status_system(
    world: &mut World,
    player: &mut PlayerState,
    ledger: &mut UpgradeLedger,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    rng: &mut ChaCha8Rng,
    nebula: Option<NebulaParams>,
    now: f64,
    dt: f64,
) {
    // Void Shield mid-wave recharge
    if let Some(recharge) = ledger.specials.void_shield_recharge {
        if player.shield >= player.derived.shield_max {
            ledger.specials.void_shield_next_at = now + recharge;
        } else if now >= ledger.specials.void_shield_next_at {
            player.shield = (player.shield + 1.0).min(player.derived.shield_max);
            ledger.specials.void_shield_next_at = now + recharge;
        }
    }

    // Life steal: one heal per full unit of banked damage
    while player.lifesteal_accum >= LIFE_STEAL_UNIT {
        player.lifesteal_accum -= LIFE_STEAL_UNIT;
        player.heal(1.0);
        fx.push(FxEvent::FloatingText {
            x: player.pos.x,
            y: player.pos.y,
            text: "+1".to_string(),
            style: TextStyle::Heal,
        });
    }

    // Nebula clouds: expiry and damage ticks
    let mut expired: Vec<Entity> = Vec::new();
    let mut cloud_ticks: Vec<(Position, f64, f64)> = Vec::new();
    for (entity, (pos, cloud)) in world
        .query::<(&Position, &mut NebulaCloud)>()
        .without::<&Dead>()
        .iter()
    {
        if now >= cloud.expires_at {
            expired.push(entity);
            continue;
        }
        if now >= cloud.next_tick_at {
            cloud.next_tick_at = now + FIELD_TICK_SECS;
            cloud_ticks.push((*pos, cloud.radius, cloud.damage_per_tick));
        }
    }

    // Gravity wells: expiry, pull snapshot, damage ticks
    let mut pulls: Vec<(Position, f64, f64)> = Vec::new();
    let mut well_ticks: Vec<(Position, f64, f64)> = Vec::new();
    for (entity, (pos, well)) in world
        .query::<(&Position, &mut GravityWell)>()
        .without::<&Dead>()
        .iter()
    {
        if let Some(expires_at) = well.expires_at {
            if now >= expires_at {
                expired.push(entity);
                continue;
            }
        }
        pulls.push((*pos, well.radius, well.pull_strength));
        if let Some(damage) = well.damage_per_tick {
            if now >= well.next_tick_at {
                well.next_tick_at = now + FIELD_TICK_SECS;
                well_ticks.push((*pos, well.radius, damage));
            }
        }
    }

    // Drag enemies toward well centers, faster near the middle
    for (center, radius, strength) in &pulls {
        for (_, (pos, _)) in world
            .query::<(&mut Position, &Enemy)>()
            .without::<&Dead>()
            .iter()
        {
            let dist = center.distance_to(pos);
            if dist > *radius || dist < 1.0 {
                continue;
            }
            let speed = strength * (2.0 - dist / radius);
            let angle = pos.angle_to(center);
            pos.x += angle.cos() * speed * dt;
            pos.y += angle.sin() * speed * dt;
        }
    }

    if !cloud_ticks.is_empty() || !well_ticks.is_empty() {
        let force_nova = ledger.wells_force_nova;
        let mut ctx = KillCtx {
            now,
            rng,
            player,
            ledger,
            score,
            events,
            fx,
            nebula,
            force_nova: false,
            nova_queue: Vec::new(),
        };
        for (center, radius, damage) in cloud_ticks {
            damage_enemies_in_radius(world, center, radius, damage, &mut ctx);
        }
        // Heat Death: well kills always chain into novas
        ctx.force_nova = force_nova;
        for (center, radius, damage) in well_ticks {
            damage_enemies_in_radius(world, center, radius, damage, &mut ctx);
        }
        flush_novas(world, &mut ctx);
    }

    for entity in expired {
        let _ = world.insert_one(entity, Dead);
    }

    // Stun expiry
    let recovered: Vec<Entity> = world
        .query::<&Stunned>()
        .iter()
        .filter(|(_, stun)| now >= stun.until)
        .map(|(entity, _)| entity)
        .collect();
    for entity in recovered {
        let _ = world.remove_one::<Stunned>(entity);
    }
}
