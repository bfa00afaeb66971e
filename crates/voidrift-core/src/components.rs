//! ECS components. Plain data only; behavior lives in the sim systems.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;

/// Core enemy component.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: f64,
    pub max_hp: f64,
    /// Remaining shield points. Each point absorbs one hit entirely.
    pub shield: u32,
    pub speed: f64,
    pub is_elite: bool,
    pub spawned_at: f64,
    /// Seconds between shots. `f64::INFINITY` = never fires.
    pub fire_interval: f64,
    pub next_fire_at: f64,
}

/// Per-kind behavior state advanced by the enemy AI system.
#[derive(Debug, Clone)]
pub enum BehaviorState {
    /// Direct homing (grunt).
    Chase,
    /// Homing with a lateral sine sway (weaver).
    Weave,
    Diver {
        stage: DiverStage,
        stage_started: f64,
    },
    /// Slow drift toward the player, spread bursts on the fire timer.
    Leader,
    Bomber {
        stage: BomberStage,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiverStage {
    /// Slow approach while lining up.
    Creep,
    /// Brief hold before committing.
    Telegraph,
    /// Straight-line charge; velocity is locked in when the lunge starts.
    Lunge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BomberStage {
    Approach,
    /// Stopped, counting down to detonation.
    Telegraph { started: f64 },
}

/// A player projectile.
#[derive(Debug, Clone)]
pub struct PlayerShot {
    pub damage: f64,
    pub is_crit: bool,
    /// How many enemies this shot may pass through after the first hit.
    pub pierce: u32,
    pub pierce_used: u32,
    /// Entities already hit (entity bits), so an overlapping piercing shot
    /// never damages the same enemy twice.
    pub hit_ids: Vec<u64>,
}

/// An enemy or boss projectile.
#[derive(Debug, Clone, Copy)]
pub struct EnemyShot {
    pub damage: f64,
}

/// Homing missile spawned by the seeker drone.
#[derive(Debug, Clone, Copy)]
pub struct SeekerMissile {
    pub damage: f64,
    pub speed: f64,
    /// Current target (entity bits). Retargeted when the target dies.
    pub target_id: Option<u64>,
}

/// An XP pickup dropped by a kill.
#[derive(Debug, Clone, Copy)]
pub struct XpOrb {
    pub value: u32,
    /// Set when the magnet grabs the orb; pull speed ramps from this time.
    pub pull_started: Option<f64>,
}

/// Lingering damage cloud left at a kill site (Nebula Rounds).
#[derive(Debug, Clone, Copy)]
pub struct NebulaCloud {
    pub radius: f64,
    pub damage_per_tick: f64,
    pub expires_at: f64,
    pub next_tick_at: f64,
}

/// Pulling vortex (Black Hole grenade / Event Horizon).
#[derive(Debug, Clone, Copy)]
pub struct GravityWell {
    pub radius: f64,
    /// Pull speed at the rim scaling up toward the center (px/s).
    pub pull_strength: f64,
    /// Periodic damage at level 3.
    pub damage_per_tick: Option<f64>,
    /// `None` = permanent (Event Horizon).
    pub expires_at: Option<f64>,
    pub next_tick_at: f64,
}

/// Stunned enemies skip behavior and movement until the deadline.
#[derive(Debug, Clone, Copy)]
pub struct Stunned {
    pub until: f64,
}

/// Marks an entity for despawn at end of tick. The kill pipeline checks
/// this before running, so a kill's side effects happen exactly once.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dead;
