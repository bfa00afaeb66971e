//! Events emitted by the simulation for the frontend and collaborators.
//!
//! `GameEvent` is the gameplay-significant stream (scoring, persistence,
//! run history); `FxEvent` is fire-and-forget presentation feedback
//! (sounds, floating text, screen shake).

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, MusicPhase};
use crate::state::AttemptRecord;

/// Gameplay events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    RunStarted { seed: String },
    WaveStarted { wave: u32, boss: bool },
    /// Wave cleared without the player taking damage.
    PerfectWave { wave: u32, bonus: u64 },
    EliteSpawned { kind: EnemyKind, x: f64, y: f64 },
    EnemyKilled {
        kind: EnemyKind,
        elite: bool,
        x: f64,
        y: f64,
        points: u64,
    },
    LevelUp { level: u32 },
    CardsOffered { ids: Vec<String> },
    UpgradeChosen { id: String, level: u8 },
    SynergyUnlocked { name: String },
    BossSpawned { wave: u32, max_hp: f64 },
    BossPhaseChanged { phase: u8 },
    /// Horn-mode transition: full heal, phase 4, second life.
    BossHornMode,
    BossDefeated { wave: u32, horn: bool, points: u64 },
    PlayerDamaged { hp_remaining: f64 },
    PlayerRevived { hp: f64 },
    RunEnded { record: AttemptRecord },
}

/// Presentation feedback events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxEvent {
    Sound { cue: SoundCue },
    Music { phase: MusicPhase },
    FloatingText {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
    Explosion { x: f64, y: f64, radius: f64 },
    ScreenShake { intensity: f64 },
    WarpFlash { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SoundCue {
    Shot,
    EnemyHit,
    Explosion,
    PlayerHit,
    ShieldBreak,
    Pickup,
    LevelUp,
    CardPick,
    Synergy,
    BossRoar,
    BossScream,
    BossDive,
    Warp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TextStyle {
    Damage,
    Crit,
    Heal,
    Bonus,
    Warning,
}
