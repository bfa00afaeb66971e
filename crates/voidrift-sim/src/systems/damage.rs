//! The shared damage and kill pipeline.
//!
//! Every source of enemy damage (bullets, beams, bursts, clouds, novas)
//! funnels through `damage_enemy`, and every kill through `kill_enemy`,
//! so rewards, Death Nova chains, and nebula clouds behave the same no
//! matter what landed the hit. The `Dead` marker guards the pipeline:
//! a kill's side effects run exactly once.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use voidrift_core::components::{Dead, Enemy, NebulaCloud, XpOrb};
use voidrift_core::config::waves::EnemyArchetype;
use voidrift_core::constants::*;
use voidrift_core::events::{FxEvent, GameEvent, SoundCue, TextStyle};
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::upgrades::UpgradeLedger;

use super::enemy_radius;

/// Base radius of a Death Nova explosion, scaled by blast area.
pub const NOVA_RADIUS: f64 = 120.0;

/// Radius of the Pulsar Shield break burst.
pub const PULSAR_BURST_RADIUS: f64 = 150.0;

/// Nebula cloud left at a kill site when Nebula Rounds is installed.
#[derive(Debug, Clone, Copy)]
pub struct NebulaParams {
    pub duration_secs: f64,
    pub damage_per_tick: f64,
    pub radius: f64,
    pub tick_secs: f64,
}

/// Shared mutable context for the kill pipeline.
pub struct KillCtx<'a> {
    pub now: f64,
    pub rng: &'a mut ChaCha8Rng,
    pub player: &'a mut PlayerState,
    pub ledger: &'a UpgradeLedger,
    pub score: &'a mut ScoreState,
    pub events: &'a mut Vec<GameEvent>,
    pub fx: &'a mut Vec<FxEvent>,
    /// Cloud left on kills (Nebula Rounds installed).
    pub nebula: Option<NebulaParams>,
    /// Kills from this source always nova (Heat Death synergy).
    pub force_nova: bool,
    /// Pending nova explosions: (x, y, damage).
    pub nova_queue: Vec<(f64, f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// A shield point absorbed the entire hit.
    Absorbed,
    Damaged,
    Killed,
    /// Target already dead or gone.
    Gone,
}

/// Apply one hit to an enemy. Shield points absorb hits whole; the kill
/// pipeline runs when HP reaches zero.
pub fn damage_enemy(
    world: &mut World,
    entity: Entity,
    amount: f64,
    is_crit: bool,
    ctx: &mut KillCtx,
) -> DamageOutcome {
    if world.get::<&Dead>(entity).is_ok() {
        return DamageOutcome::Gone;
    }
    let (killed, pos) = {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            return DamageOutcome::Gone;
        };
        if enemy.shield > 0 {
            enemy.shield -= 1;
            ctx.fx.push(FxEvent::Sound {
                cue: SoundCue::ShieldBreak,
            });
            return DamageOutcome::Absorbed;
        }
        enemy.hp -= amount;
        ctx.player.lifesteal_accum += amount * ctx.player.derived.life_steal;
        let killed = enemy.hp <= 0.0;
        drop(enemy);
        let pos = world
            .get::<&Position>(entity)
            .map(|p| *p)
            .unwrap_or_default();
        (killed, pos)
    };

    if is_crit {
        ctx.fx.push(FxEvent::FloatingText {
            x: pos.x,
            y: pos.y,
            text: format!("{}", amount as i64),
            style: TextStyle::Crit,
        });
    }

    if killed {
        kill_enemy(world, entity, ctx);
        DamageOutcome::Killed
    } else {
        ctx.fx.push(FxEvent::Sound {
            cue: SoundCue::EnemyHit,
        });
        DamageOutcome::Damaged
    }
}

/// Run the kill pipeline for one enemy: mark dead, award score and
/// streak, drop the XP orb, leave a nebula cloud, roll Death Nova.
pub fn kill_enemy(world: &mut World, entity: Entity, ctx: &mut KillCtx) {
    if world.get::<&Dead>(entity).is_ok() {
        return;
    }
    let Ok(enemy) = world.get::<&Enemy>(entity).map(|e| (*e).clone()) else {
        return;
    };
    let pos = world
        .get::<&Position>(entity)
        .map(|p| *p)
        .unwrap_or_default();
    let _ = world.insert_one(entity, Dead);

    let points = ctx.score.add_kill(enemy.kind, enemy.is_elite);
    ctx.player.record_kill();
    ctx.events.push(GameEvent::EnemyKilled {
        kind: enemy.kind,
        elite: enemy.is_elite,
        x: pos.x,
        y: pos.y,
        points,
    });
    ctx.fx.push(FxEvent::Sound {
        cue: SoundCue::Explosion,
    });
    ctx.fx.push(FxEvent::Explosion {
        x: pos.x,
        y: pos.y,
        radius: enemy_radius(enemy.is_elite),
    });

    let base_xp = EnemyArchetype::of(enemy.kind).xp;
    let value = if enemy.is_elite {
        (base_xp as f64 * ELITE_XP_MULT).round() as u32
    } else {
        base_xp
    };
    spawn_orb(world, pos, value, ctx.rng);

    if let Some(nebula) = ctx.nebula {
        world.spawn((
            pos,
            NebulaCloud {
                radius: nebula.radius,
                damage_per_tick: nebula.damage_per_tick,
                expires_at: ctx.now + nebula.duration_secs,
                next_tick_at: ctx.now + nebula.tick_secs,
            },
        ));
    }

    if let Some((chance, damage)) = ctx.ledger.specials.death_nova {
        let triggered = ctx.force_nova || ctx.rng.gen::<f64>() < chance;
        if triggered {
            ctx.nova_queue.push((pos.x, pos.y, damage));
        }
    }
}

/// Drop an XP orb with a random burst velocity.
pub fn spawn_orb(world: &mut World, pos: Position, value: u32, rng: &mut ChaCha8Rng) {
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let speed = rng.gen::<f64>() * ORB_BURST_SPEED;
    world.spawn((
        pos,
        Velocity::from_angle(angle, speed),
        XpOrb {
            value,
            pull_started: None,
        },
    ));
}

/// Detonate all queued novas. Nova kills can queue further novas, so
/// this loops until the chain exhausts.
pub fn flush_novas(world: &mut World, ctx: &mut KillCtx) {
    let radius = NOVA_RADIUS * ctx.player.derived.blast_area;
    while let Some((x, y, damage)) = ctx.nova_queue.pop() {
        let center = Position::new(x, y);
        ctx.fx.push(FxEvent::Explosion { x, y, radius });
        let victims: Vec<Entity> = world
            .query::<(&Position, &Enemy)>()
            .without::<&Dead>()
            .iter()
            .filter(|(_, (pos, enemy))| {
                center.distance_to(pos) <= radius + enemy_radius(enemy.is_elite)
            })
            .map(|(entity, _)| entity)
            .collect();
        for entity in victims {
            damage_enemy(world, entity, damage, false, ctx);
        }
    }
}

/// Apply area damage around a point to every enemy in range.
pub fn damage_enemies_in_radius(
    world: &mut World,
    center: Position,
    radius: f64,
    amount: f64,
    ctx: &mut KillCtx,
) -> u32 {
    let victims: Vec<Entity> = world
        .query::<(&Position, &Enemy)>()
        .without::<&Dead>()
        .iter()
        .filter(|(_, (pos, enemy))| {
            center.distance_to(pos) <= radius + enemy_radius(enemy.is_elite)
        })
        .map(|(entity, _)| entity)
        .collect();
    let mut hits = 0;
    for entity in &victims {
        if damage_enemy(world, *entity, amount, false, ctx) != DamageOutcome::Gone {
            hits += 1;
        }
    }
    hits
}

/// What happened when the player took a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHitOutcome {
    Ignored,
    ShieldAbsorbed,
    Damaged,
    Revived,
    Dead,
}

/// Apply one hit to the player: shield first, then hull, then the
/// Undying Protocol revive. Grants the post-hit invulnerability window.
#[allow(clippy::too_many_arguments)]
pub fn damage_player(
    world: &mut World,
    player: &mut PlayerState,
    ledger: &mut UpgradeLedger,
    score: &mut ScoreState,
    wave_damage_taken: &mut bool,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    rng: &mut ChaCha8Rng,
    now: f64,
) -> PlayerHitOutcome {
    if player.god_mode || player.is_invulnerable(now) {
        return PlayerHitOutcome::Ignored;
    }
    *wave_damage_taken = true;
    player.kill_streak = 0;

    if player.shield >= 1.0 {
        player.shield -= 1.0;
        fx.push(FxEvent::Sound {
            cue: SoundCue::ShieldBreak,
        });
        // Pulsar Shield: breaking the last point releases a burst.
        if player.shield < 1.0 && ledger.specials.pulsar_burst > 0.0 {
            let burst = ledger.final_damage(ledger.specials.pulsar_burst, false);
            let center = player.pos;
            let mut ctx = KillCtx {
                now,
                rng: &mut *rng,
                player: &mut *player,
                ledger: &*ledger,
                score: &mut *score,
                events: &mut *events,
                fx: &mut *fx,
                nebula: None,
                force_nova: false,
                nova_queue: Vec::new(),
            };
            damage_enemies_in_radius(world, center, PULSAR_BURST_RADIUS, burst, &mut ctx);
            flush_novas(world, &mut ctx);
        }
        player.grant_invulnerability(now + PLAYER_HIT_INVULN_SECS);
        return PlayerHitOutcome::ShieldAbsorbed;
    }

    player.hp -= CONTACT_DAMAGE;
    fx.push(FxEvent::Sound {
        cue: SoundCue::PlayerHit,
    });
    fx.push(FxEvent::ScreenShake { intensity: 1.0 });

    if player.hp <= 0.0 && ledger.specials.undying_available {
        ledger.specials.undying_available = false;
        player.hp = ledger.specials.undying_hp;
        player.grant_invulnerability(now + ledger.specials.undying_invuln_secs);
        events.push(GameEvent::PlayerRevived { hp: player.hp });
        return PlayerHitOutcome::Revived;
    }

    events.push(GameEvent::PlayerDamaged {
        hp_remaining: player.hp.max(0.0),
    });

    if player.hp <= 0.0 {
        return PlayerHitOutcome::Dead;
    }

    if ledger.specials.quantum_invuln_secs > 0.0 {
        player.grant_invulnerability(now + ledger.specials.quantum_invuln_secs);
    } else {
        player.grant_invulnerability(now + PLAYER_HIT_INVULN_SECS);
    }
    PlayerHitOutcome::Damaged
}
