//! The boss encounter: entry, hover sway, phase escalation, attack
//! casting, the dive, and the horn-mode second life.
//!
//! Phase transitions only escalate. The one exception is scripted: at
//! 25% HP on the first life the boss plays a cutscene, heals to full,
//! and re-enters at phase 4 with every attack timer and the dive reset.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use voidrift_boss::dive::{self, DiveContext, DiveState};
use voidrift_boss::phases::{
    cone_pattern, dive_fan_pattern, due_attacks, follow_up_delays, phase_for_hp_ratio,
    scream_pattern, spiral_pattern, sway_offset, AttackKind, AttackTimers,
};
use voidrift_core::components::{Dead, EnemyShot};
use voidrift_core::constants::*;
use voidrift_core::enums::DiveStage;
use voidrift_core::events::{FxEvent, GameEvent, SoundCue};
use voidrift_core::types::{Position, Velocity};

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::timers::{TimerAction, TimerQueue};
use crate::upgrades::UpgradeLedger;

use super::damage::{damage_player, spawn_orb};
use super::wave_spawner::WaveState;

/// XP orb value dropped on defeat.
pub const BOSS_XP_VALUE: u32 = 500;

/// Beam sweep shot speed (normal / horn).
const BEAM_SHOT_SPEED: f64 = 380.0;
const BEAM_SHOT_SPEED_HORN: f64 = 500.0;

/// Wing mount offsets for the beam sweep.
const WING_OFFSET_X: f64 = 70.0;
const WING_OFFSET_Y: f64 = 40.0;

/// Live boss state. Lives outside the ECS world; there is at most one.
#[derive(Debug)]
pub struct BossEncounter {
    pub wave: u32,
    pub hp: f64,
    pub max_hp: f64,
    pub phase: u8,
    pub horn: bool,
    pub pos: Position,
    pub spawned_at: f64,
    pub cutscene_until: Option<f64>,
    /// Updated each tick; damage only lands while true.
    pub vulnerable: bool,
    pub sway_elapsed: f64,
    /// Dive pauses increment, resumes decrement.
    pub sway_paused: u32,
    pub timers: AttackTimers,
    pub dive: DiveState,
    pub spiral_angle: f64,
}

impl BossEncounter {
    pub fn new(wave: u32, hp: f64, now: f64) -> Self {
        Self {
            wave,
            hp,
            max_hp: hp,
            phase: 1,
            horn: false,
            pos: Position::new(ARENA_WIDTH / 2.0, -BOSS_RADIUS),
            spawned_at: now,
            cutscene_until: None,
            vulnerable: false,
            sway_elapsed: 0.0,
            sway_paused: 0,
            timers: AttackTimers::default(),
            dive: DiveState::new(now + BOSS_DIVE_INTERVAL),
            spiral_angle: 0.0,
        }
    }

    fn hover() -> Position {
        Position::new(ARENA_WIDTH / 2.0, BOSS_HOVER_Y)
    }

    fn entry_done(&self, now: f64) -> bool {
        now - self.spawned_at >= BOSS_ENTRY_SECS
    }
}

/// Apply one hit to the boss. The first life is floored at 1 HP; it
/// only ends through the horn-mode cutscene.
pub fn damage_boss(encounter: &mut BossEncounter, amount: f64, fx: &mut Vec<FxEvent>) -> bool {
    if !encounter.vulnerable {
        return false;
    }
    encounter.hp -= amount;
    if !encounter.horn {
        encounter.hp = encounter.hp.max(1.0);
    }
    fx.push(FxEvent::Sound {
        cue: SoundCue::EnemyHit,
    });
    true
}

/// Run one tick of the boss encounter.
#[allow(clippy::too_many_arguments)]
pub fn boss_system(
    world: &mut World,
    boss: &mut Option<BossEncounter>,
    waves: &mut WaveState,
    player: &mut PlayerState,
    ledger: &mut UpgradeLedger,
    score: &mut ScoreState,
    timers: &mut TimerQueue,
    events: &mut Vec<GameEvent>,
    fx: &mut Vec<FxEvent>,
    rng: &mut ChaCha8Rng,
    now: f64,
    dt: f64,
) {
    let Some(encounter) = boss.as_mut() else {
        return;
    };

    // Eased entry descent from above the arena
    if !encounter.entry_done(now) {
        let t = ((now - encounter.spawned_at) / BOSS_ENTRY_SECS).min(1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        encounter.pos = Position::new(
            ARENA_WIDTH / 2.0,
            -BOSS_RADIUS + (BOSS_HOVER_Y + BOSS_RADIUS) * eased,
        );
        encounter.vulnerable = false;
        return;
    }

    // Horn-mode cutscene: everything boss-side suspends until it ends
    if let Some(until) = encounter.cutscene_until {
        encounter.vulnerable = false;
        if now < until {
            return;
        }
        encounter.cutscene_until = None;
        encounter.hp = encounter.max_hp;
        encounter.horn = true;
        encounter.phase = 4;
        encounter.timers.reset();
        encounter.dive.reset(now);
        events.push(GameEvent::BossHornMode);
        fx.push(FxEvent::Sound {
            cue: SoundCue::BossRoar,
        });
        fx.push(FxEvent::ScreenShake { intensity: 1.0 });
    }
    encounter.vulnerable = true;

    // First life ends at 25%: start the cutscene and clear the bullet field
    if !encounter.horn && encounter.hp / encounter.max_hp <= BOSS_PHASE4_RATIO {
        encounter.cutscene_until = Some(now + BOSS_CUTSCENE_SECS);
        encounter.vulnerable = false;
        let shots: Vec<Entity> = world
            .query::<&EnemyShot>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for shot in shots {
            let _ = world.insert_one(shot, Dead);
        }
        fx.push(FxEvent::Sound {
            cue: SoundCue::BossRoar,
        });
        fx.push(FxEvent::ScreenShake { intensity: 1.0 });
        return;
    }

    // Defeat waits for the dive to finish; the killing blow lands once
    // the boss is back at hover.
    if encounter.hp <= 0.0 && encounter.dive.stage == DiveStage::Idle {
        let points = score.add_boss_kill(encounter.wave);
        events.push(GameEvent::BossDefeated {
            wave: encounter.wave,
            horn: encounter.horn,
            points,
        });
        fx.push(FxEvent::Explosion {
            x: encounter.pos.x,
            y: encounter.pos.y,
            radius: BOSS_RADIUS * 2.0,
        });
        fx.push(FxEvent::Sound {
            cue: SoundCue::Explosion,
        });
        spawn_orb(world, encounter.pos, BOSS_XP_VALUE, rng);
        waves.boss_pending = false;
        waves.advancing = true;
        timers.schedule(now + POST_BOSS_WAVE_DELAY_SECS, TimerAction::AdvanceWave);
        *boss = None;
        return;
    }

    let ratio = encounter.hp / encounter.max_hp;
    let target_phase = if encounter.horn {
        4
    } else {
        phase_for_hp_ratio(ratio)
    };
    if target_phase > encounter.phase {
        encounter.phase = target_phase;
        events.push(GameEvent::BossPhaseChanged {
            phase: encounter.phase,
        });
        fx.push(FxEvent::Sound {
            cue: SoundCue::BossRoar,
        });
    }

    // Dive choreography owns the position for its duration
    let hover = BossEncounter::hover();
    let update = dive::advance(
        &mut encounter.dive,
        &DiveContext {
            now,
            dt,
            phase: encounter.phase,
            player_x: player.pos.x,
            pos: encounter.pos,
            hover,
        },
    );
    if update.sway_pause {
        encounter.sway_paused += 1;
    }
    if update.sway_resume {
        encounter.sway_paused = encounter.sway_paused.saturating_sub(1);
    }
    if update.warn_fx {
        fx.push(FxEvent::Sound {
            cue: SoundCue::BossDive,
        });
        fx.push(FxEvent::ScreenShake { intensity: 0.6 });
    }
    if let Some(pos) = update.new_pos {
        encounter.pos = pos;
    }
    if update.fire_fan {
        spawn_pattern(world, encounter.pos, &dive_fan_pattern());
    }

    if encounter.dive.stage == DiveStage::Idle && encounter.sway_paused == 0 {
        let rate = if encounter.phase >= 4 {
            BOSS_PHASE4_SPEED_FACTOR
        } else {
            1.0
        };
        encounter.sway_elapsed += dt * rate;
        encounter.pos = Position::new(
            hover.x + sway_offset(encounter.sway_elapsed, encounter.horn),
            hover.y,
        );
    }

    if encounter.dive.stage == DiveStage::Idle {
        for kind in due_attacks(&encounter.timers, encounter.phase, encounter.horn, now) {
            encounter.timers.mark_fired(kind, now);
            cast_attack(world, encounter, player.pos, kind, fx);
            for delay in follow_up_delays(kind, encounter.phase) {
                timers.schedule(now + delay, TimerAction::BossFollowUp { kind });
            }
        }
    }

    // Ram damage while plunging through the player
    if encounter.pos.distance_to(&player.pos) <= BOSS_RADIUS + PLAYER_RADIUS {
        let _ = damage_player(
            world,
            player,
            ledger,
            score,
            &mut waves.damage_taken,
            events,
            fx,
            rng,
            now,
        );
    }
}

/// Cast one attack pattern from the boss's current position.
pub fn cast_attack(
    world: &mut World,
    encounter: &mut BossEncounter,
    player_pos: Position,
    kind: AttackKind,
    fx: &mut Vec<FxEvent>,
) {
    match kind {
        AttackKind::BeamSweep => {
            let speed = if encounter.horn {
                BEAM_SHOT_SPEED_HORN
            } else {
                BEAM_SHOT_SPEED
            };
            for side in [-1.0, 1.0] {
                let mount = Position::new(
                    encounter.pos.x + side * WING_OFFSET_X,
                    encounter.pos.y + WING_OFFSET_Y,
                );
                let angle = mount.angle_to(&player_pos);
                spawn_boss_shot(world, mount, Velocity::from_angle(angle, speed));
            }
            fx.push(FxEvent::Sound {
                cue: SoundCue::Shot,
            });
        }
        AttackKind::ConeSpray => {
            spawn_pattern(world, encounter.pos, &cone_pattern(encounter.horn));
            fx.push(FxEvent::Sound {
                cue: SoundCue::Shot,
            });
        }
        AttackKind::SpiralBurst => {
            spawn_pattern(
                world,
                encounter.pos,
                &spiral_pattern(encounter.spiral_angle, encounter.horn),
            );
            encounter.spiral_angle += BOSS_SPIRAL_STEP;
        }
        AttackKind::ScreamBurst => {
            spawn_pattern(world, encounter.pos, &scream_pattern());
            fx.push(FxEvent::Sound {
                cue: SoundCue::BossScream,
            });
            fx.push(FxEvent::ScreenShake { intensity: 0.8 });
        }
    }
}

fn spawn_pattern(world: &mut World, origin: Position, pattern: &[(f64, f64)]) {
    for &(angle, speed) in pattern {
        spawn_boss_shot(world, origin, Velocity::from_angle(angle, speed));
    }
}

fn spawn_boss_shot(world: &mut World, pos: Position, vel: Velocity) {
    let live = world.query::<&EnemyShot>().iter().count();
    if live >= MAX_ENEMY_SHOTS {
        return;
    }
    world.spawn((
        pos,
        vel,
        EnemyShot {
            damage: CONTACT_DAMAGE,
        },
    ));
}
