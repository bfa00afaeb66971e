//! Wave scheduling and enemy spawning.
//!
//! Timed waves advance when their duration elapses; boss waves advance
//! only after the boss falls, on a delayed timer. The spawner keeps the
//! minimum-alive floor topped up immediately and otherwise spawns on the
//! wave's interval.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use voidrift_core::components::{BehaviorState, BomberStage, Dead, DiverStage, Enemy};
use voidrift_core::config::waves::{EnemyArchetype, WaveConfig};
use voidrift_core::constants::*;
use voidrift_core::enums::{EnemyKind, MusicPhase};
use voidrift_core::events::{FxEvent, GameEvent};
use voidrift_core::types::{Position, Velocity};

use crate::score::ScoreState;
use crate::timers::{TimerAction, TimerQueue};

/// Wave progression state.
#[derive(Debug)]
pub struct WaveState {
    /// Current 1-based wave number.
    pub wave: u32,
    pub cfg: WaveConfig,
    pub started_at: f64,
    pub next_spawn_at: f64,
    /// Whether the player took any damage this wave.
    pub damage_taken: bool,
    /// Boss wave and the boss has not fallen yet (includes the spawn delay).
    pub boss_pending: bool,
    /// An AdvanceWave timer is already scheduled.
    pub advancing: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave: 0,
            cfg: WaveConfig::for_wave(1),
            started_at: 0.0,
            next_spawn_at: 0.0,
            damage_taken: false,
            boss_pending: false,
            advancing: false,
        }
    }
}

impl WaveState {
    pub fn is_boss_wave(&self) -> bool {
        self.cfg.boss_hp.is_some()
    }

    /// Start the given wave: load its config, announce it, and on boss
    /// waves schedule the boss spawn.
    pub fn start(
        &mut self,
        wave: u32,
        now: f64,
        timers: &mut TimerQueue,
        events: &mut Vec<GameEvent>,
        fx: &mut Vec<FxEvent>,
    ) {
        self.wave = wave;
        self.cfg = WaveConfig::for_wave(wave);
        self.started_at = now;
        self.next_spawn_at = now + self.cfg.spawn_interval;
        self.damage_taken = false;
        self.advancing = false;
        self.boss_pending = self.is_boss_wave();

        let boss = self.is_boss_wave();
        events.push(GameEvent::WaveStarted { wave, boss });
        // Early waves keep the calm track
        fx.push(FxEvent::Music {
            phase: if boss {
                MusicPhase::Boss
            } else if wave <= 3 {
                MusicPhase::Cruise
            } else {
                MusicPhase::Combat
            },
        });
        if let Some(hp) = self.cfg.boss_hp {
            timers.schedule(now + BOSS_SPAWN_DELAY_SECS, TimerAction::SpawnBoss { hp });
        }
    }
}

/// Run one tick of wave progression and spawning.
#[allow(clippy::too_many_arguments)]
pub fn wave_spawner_system(
    world: &mut World,
    waves: &mut WaveState,
    score: &mut ScoreState,
    rng: &mut ChaCha8Rng,
    player_pos: Position,
    timers: &mut TimerQueue,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    now: f64,
) {
    // Timed waves end on their clock; boss waves end via AdvanceWave.
    if waves.cfg.duration > 0.0 && now - waves.started_at >= waves.cfg.duration {
        if !waves.damage_taken {
            let bonus = score.add_perfect_wave();
            events.push(GameEvent::PerfectWave {
                wave: waves.wave,
                bonus,
            });
        }
        let next = waves.wave + 1;
        waves.start(next, now, timers, events, fx);
        return;
    }

    let alive = world
        .query::<&Enemy>()
        .without::<&Dead>()
        .iter()
        .count() as u32;

    // Any spawn re-arms the interval, floor top-ups included.
    if alive < waves.cfg.min_alive || now >= waves.next_spawn_at {
        spawn_enemy(world, waves, rng, player_pos, events, fx, now);
        waves.next_spawn_at = now + waves.cfg.spawn_interval;
    }
}

/// Spawn one enemy from the wave's weighted pool at an arena edge.
fn spawn_enemy(
    world: &mut World,
    waves: &WaveState,
    rng: &mut ChaCha8Rng,
    player_pos: Position,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    now: f64,
) {
    let Some(kind) = pick_kind(&waves.cfg, rng) else {
        return;
    };
    let pos = edge_position(rng, player_pos);
    let arch = EnemyArchetype::of(kind);
    let is_elite = rng.gen::<f64>() < ELITE_CHANCE;

    let mut hp = arch.hp * waves.cfg.hp_multiplier;
    let mut speed = arch.speed;
    if is_elite {
        (hp, speed) = elite_stats(hp, speed);
    }
    let jitter = rng.gen::<f64>() * ENEMY_FIRE_JITTER_SECS;

    let behavior = match kind {
        EnemyKind::Grunt => BehaviorState::Chase,
        EnemyKind::Weaver => BehaviorState::Weave,
        EnemyKind::Diver => BehaviorState::Diver {
            stage: DiverStage::Creep,
            stage_started: now,
        },
        EnemyKind::FormationLeader => BehaviorState::Leader,
        EnemyKind::Bomber => BehaviorState::Bomber {
            stage: BomberStage::Approach,
        },
    };

    world.spawn((
        pos,
        Velocity::default(),
        Enemy {
            kind,
            hp,
            max_hp: hp,
            shield: arch.shield,
            speed,
            is_elite,
            spawned_at: now,
            fire_interval: arch.fire_interval,
            next_fire_at: now + arch.fire_interval + jitter,
        },
        behavior,
    ));

    if is_elite {
        events.push(GameEvent::EliteSpawned {
            kind,
            x: pos.x,
            y: pos.y,
        });
        fx.push(FxEvent::WarpFlash { x: pos.x, y: pos.y });
    }
}

/// Elite multipliers, rounded to whole stat values.
pub(crate) fn elite_stats(hp: f64, speed: f64) -> (f64, f64) {
    ((hp * ELITE_HP_MULT).round(), (speed * ELITE_SPEED_MULT).round())
}

fn pick_kind(cfg: &WaveConfig, rng: &mut ChaCha8Rng) -> Option<EnemyKind> {
    let total: u32 = cfg.pool.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in &cfg.pool {
        if roll < *weight {
            return Some(*kind);
        }
        roll -= weight;
    }
    None
}

/// Pick a spawn point just outside a random arena edge, pushed away from
/// the player if the roll lands too close.
fn edge_position(rng: &mut ChaCha8Rng, player_pos: Position) -> Position {
    let mut pos = match rng.gen_range(0..4u32) {
        // Top
        0 => Position::new(rng.gen::<f64>() * ARENA_WIDTH, -SPAWN_EDGE_OFFSET),
        // Bottom
        1 => Position::new(
            rng.gen::<f64>() * ARENA_WIDTH,
            ARENA_HEIGHT + SPAWN_EDGE_OFFSET,
        ),
        // Left
        2 => Position::new(
            -SPAWN_EDGE_OFFSET,
            SPAWN_EDGE_BAND + rng.gen::<f64>() * (ARENA_HEIGHT - 2.0 * SPAWN_EDGE_BAND),
        ),
        // Right
        _ => Position::new(
            ARENA_WIDTH + SPAWN_EDGE_OFFSET,
            SPAWN_EDGE_BAND + rng.gen::<f64>() * (ARENA_HEIGHT - 2.0 * SPAWN_EDGE_BAND),
        ),
    };

    if player_pos.distance_to(&pos) < SPAWN_MIN_PLAYER_DIST {
        let angle = player_pos.angle_to(&pos);
        pos = Position::new(
            player_pos.x + angle.cos() * SPAWN_PUSH_DIST,
            player_pos.y + angle.sin() * SPAWN_PUSH_DIST,
        );
    }
    pos
}
