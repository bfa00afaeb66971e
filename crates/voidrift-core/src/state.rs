//! Game state snapshot: the complete visible state sent to the frontend
//! each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{FxEvent, GameEvent};
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub music: MusicPhase,
    pub wave: u32,
    pub player: PlayerView,
    pub stats: StatsView,
    pub xp: XpView,
    pub score: ScoreView,
    pub enemies: Vec<EnemyView>,
    pub player_shots: Vec<PlayerShotView>,
    pub enemy_shots: Vec<ShotView>,
    pub orbs: Vec<OrbView>,
    pub clouds: Vec<FieldView>,
    pub wells: Vec<FieldView>,
    pub boss: Option<BossView>,
    pub offered_cards: Vec<CardView>,
    pub events: Vec<GameEvent>,
    pub fx: Vec<FxEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub aim_angle: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub shield_max: f64,
    pub invulnerable: bool,
    pub kill_streak: u32,
}

/// Derived attributes for the HUD stats panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsView {
    pub damage: f64,
    pub fire_rate: f64,
    pub speed: f64,
    pub magnet: f64,
    pub crit_chance: f64,
    pub pierce: u32,
    pub spread: u32,
    pub cooldown: f64,
    pub blast_area: f64,
    pub life_steal: f64,
    pub luck: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XpView {
    pub xp: u32,
    pub threshold: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub total_kills: u32,
    pub accuracy: f64,
    pub perfect_waves: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Position,
    pub hp_ratio: f64,
    pub shield: u32,
    pub elite: bool,
    /// Diver/bomber telegraph highlight.
    pub telegraphing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShotView {
    pub position: Position,
    pub is_crit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotView {
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbView {
    pub position: Position,
    pub value: u32,
}

/// Shared view for area effects (nebula clouds, gravity wells).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldView {
    pub position: Position,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    pub phase: u8,
    pub horn_mode: bool,
    pub cutscene: bool,
    pub dive: DiveStage,
}

/// A level-up card offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Level this pick would set (1-based).
    pub next_level: u8,
    pub label: String,
    pub description: String,
}

/// Final run breakdown handed to the persistence layer when a run ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub seed: String,
    pub final_score: u64,
    pub base_score: u64,
    pub survival_bonus: u64,
    pub accuracy: f64,
    pub accuracy_multiplier: f64,
    pub wave_reached: u32,
    pub level_reached: u32,
    pub survival_secs: f64,
    pub total_kills: u32,
    pub elite_kills: u32,
    pub boss_kills: u32,
    pub kills_by_kind: Vec<(EnemyKind, u32)>,
    pub perfect_waves: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub best_kill_streak: u32,
}
