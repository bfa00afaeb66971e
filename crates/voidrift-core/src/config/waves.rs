//! Enemy archetype stats and the wave schedule.
//!
//! Fifteen authored waves, then a procedural escalation formula. Waves 10
//! and 15 (and every 5th escalation wave) are boss waves: `duration` is
//! zero and the wave only ends when the boss falls.

use crate::enums::EnemyKind;

/// Base stats for one enemy archetype.
#[derive(Debug, Clone, Copy)]
pub struct EnemyArchetype {
    /// Movement speed (px/s).
    pub speed: f64,
    pub hp: f64,
    /// Shield points; each absorbs one hit entirely.
    pub shield: u32,
    /// Seconds between shots. `f64::INFINITY` = never fires.
    pub fire_interval: f64,
    /// XP orb value on kill.
    pub xp: u32,
}

impl EnemyArchetype {
    pub fn of(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Grunt => Self {
                speed: 90.0,
                hp: 10.0,
                shield: 0,
                fire_interval: 3.0,
                xp: 5,
            },
            EnemyKind::Weaver => Self {
                speed: 110.0,
                hp: 15.0,
                shield: 0,
                fire_interval: 5.0,
                xp: 12,
            },
            EnemyKind::Diver => Self {
                speed: 200.0,
                hp: 18.0,
                shield: 0,
                fire_interval: f64::INFINITY,
                xp: 15,
            },
            EnemyKind::FormationLeader => Self {
                speed: 70.0,
                hp: 30.0,
                shield: 2,
                fire_interval: 4.5,
                xp: 30,
            },
            EnemyKind::Bomber => Self {
                speed: 60.0,
                hp: 40.0,
                shield: 2,
                fire_interval: f64::INFINITY,
                xp: 20,
            },
        }
    }
}

/// Bomber-specific tuning.
pub const BOMBER_DETONATE_RADIUS: f64 = 220.0;
pub const BOMBER_TELEGRAPH_SECS: f64 = 1.2;
pub const BOMBER_AOE_RADIUS: f64 = 180.0;

/// A single wave definition.
#[derive(Debug, Clone)]
pub struct WaveConfig {
    /// Minimum enemies kept alive; below this, spawns are immediate.
    pub min_alive: u32,
    /// Seconds between interval spawns.
    pub spawn_interval: f64,
    /// Wave length in seconds. 0 = runs until the boss is defeated.
    pub duration: f64,
    /// Weighted spawn pool.
    pub pool: Vec<(EnemyKind, u32)>,
    /// Boss HP if this is a boss wave.
    pub boss_hp: Option<f64>,
    /// Multiplier applied to spawned enemies' HP (before the elite roll).
    pub hp_multiplier: f64,
}

impl WaveConfig {
    /// Config for a 1-based wave number: authored table, then escalation.
    pub fn for_wave(wave: u32) -> WaveConfig {
        let authored = authored_waves();
        if wave >= 1 && (wave as usize) <= authored.len() {
            authored[wave as usize - 1].clone()
        } else {
            escalation_config(wave)
        }
    }
}

/// The fifteen authored waves.
pub fn authored_waves() -> Vec<WaveConfig> {
    use EnemyKind::*;
    let wave = |min_alive: u32,
                spawn_interval: f64,
                duration: f64,
                hp_multiplier: f64,
                pool: Vec<(EnemyKind, u32)>| WaveConfig {
        min_alive,
        spawn_interval,
        duration,
        pool,
        boss_hp: None,
        hp_multiplier,
    };

    vec![
        // 1: grunts only, gentle opener
        wave(2, 3.5, 22.0, 1.0, vec![(Grunt, 1)]),
        // 2: weavers join
        wave(3, 3.0, 22.0, 1.0, vec![(Grunt, 2), (Weaver, 1)]),
        // 3: divers join
        wave(5, 2.5, 25.0, 1.0, vec![(Grunt, 2), (Weaver, 2), (Diver, 1)]),
        // 4: all standard types
        wave(
            8,
            2.0,
            25.0,
            1.0,
            vec![(Grunt, 2), (Weaver, 2), (Diver, 1), (FormationLeader, 1)],
        ),
        // 5: bombers join
        wave(
            12,
            1.5,
            28.0,
            1.0,
            vec![
                (Grunt, 2),
                (Weaver, 2),
                (Diver, 2),
                (FormationLeader, 1),
                (Bomber, 1),
            ],
        ),
        // 6: all types, heavier
        wave(
            14,
            1.2,
            28.0,
            1.0,
            vec![
                (Grunt, 3),
                (Weaver, 2),
                (Diver, 2),
                (FormationLeader, 1),
                (Bomber, 1),
            ],
        ),
        // 7: leader-heavy
        wave(
            16,
            1.0,
            30.0,
            1.0,
            vec![
                (Grunt, 1),
                (Weaver, 1),
                (Diver, 3),
                (FormationLeader, 2),
                (Bomber, 1),
            ],
        ),
        // 8
        wave(
            18,
            0.9,
            30.0,
            1.0,
            vec![
                (Grunt, 2),
                (Weaver, 2),
                (Diver, 2),
                (FormationLeader, 3),
                (Bomber, 1),
            ],
        ),
        // 9: pre-boss barrage
        wave(
            20,
            0.7,
            30.0,
            1.0,
            vec![
                (Grunt, 2),
                (Weaver, 3),
                (Diver, 3),
                (FormationLeader, 2),
                (Bomber, 1),
            ],
        ),
        // 10: first boss + grunt harassment
        WaveConfig {
            min_alive: 5,
            spawn_interval: 2.0,
            duration: 0.0,
            pool: vec![(Grunt, 1)],
            boss_hp: Some(2000.0),
            hp_multiplier: 1.0,
        },
        // 11-14: scaling HP
        wave(
            18,
            0.8,
            28.0,
            1.2,
            vec![
                (Grunt, 2),
                (Weaver, 2),
                (Diver, 2),
                (FormationLeader, 2),
                (Bomber, 1),
            ],
        ),
        wave(
            20,
            0.7,
            28.0,
            1.3,
            vec![
                (Grunt, 1),
                (Weaver, 2),
                (Diver, 3),
                (FormationLeader, 2),
                (Bomber, 1),
            ],
        ),
        wave(
            22,
            0.7,
            30.0,
            1.4,
            vec![
                (Grunt, 2),
                (Weaver, 2),
                (Diver, 3),
                (FormationLeader, 3),
                (Bomber, 1),
            ],
        ),
        wave(
            24,
            0.6,
            30.0,
            1.5,
            vec![
                (Diver, 3),
                (FormationLeader, 3),
                (Weaver, 2),
                (Grunt, 1),
                (Bomber, 2),
            ],
        ),
        // 15: second boss + harassment
        WaveConfig {
            min_alive: 8,
            spawn_interval: 1.5,
            duration: 0.0,
            pool: vec![(Grunt, 2), (Weaver, 1)],
            boss_hp: Some(3500.0),
            hp_multiplier: 1.0,
        },
    ]
}

/// Procedural config past the authored table. Every 5th wave is a boss
/// wave with filler harassment.
pub fn escalation_config(wave: u32) -> WaveConfig {
    use EnemyKind::*;
    let past = wave.saturating_sub(15);
    let scale = 1.0 + past as f64 * 0.1;
    let min_alive = (20 + past / 2).min(30);
    let spawn_interval = (0.8 / scale).max(0.4);

    if wave % 5 == 0 {
        return WaveConfig {
            min_alive: 8,
            spawn_interval: 1.5,
            duration: 0.0,
            pool: vec![(Grunt, 2), (Weaver, 1)],
            boss_hp: Some(600.0 + (wave as f64 - 10.0) * 40.0),
            hp_multiplier: scale,
        };
    }

    WaveConfig {
        min_alive,
        spawn_interval,
        duration: 30.0,
        pool: vec![
            (Grunt, 2),
            (Weaver, 2),
            (Diver, 3),
            (FormationLeader, 2),
            (Bomber, 1),
        ],
        boss_hp: None,
        hp_multiplier: scale,
    }
}
