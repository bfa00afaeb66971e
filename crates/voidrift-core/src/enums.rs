//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// Simulation advancing normally.
    Active,
    /// A level-up card offer is open; the whole simulation is suspended.
    CardSelect,
    Paused,
    GameOver,
}

/// Music intensity cue for the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicPhase {
    #[default]
    Cruise,
    Combat,
    Boss,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow direct chaser.
    Grunt,
    /// Faster chaser with a lateral sine sway; fires aimed shots.
    Weaver,
    /// Creeps in, telegraphs, then lunges in a straight line.
    Diver,
    /// Slow shielded drifter firing spread bursts.
    FormationLeader,
    /// Shielded walker that telegraphs and detonates near the player.
    Bomber,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Grunt,
        EnemyKind::Weaver,
        EnemyKind::Diver,
        EnemyKind::FormationLeader,
        EnemyKind::Bomber,
    ];
}

/// Upgrade rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Grey,
    Green,
    Blue,
    Purple,
    Red,
    Gold,
}

impl Rarity {
    /// Base draw weight before luck adjustment.
    pub fn base_weight(&self) -> f64 {
        match self {
            Rarity::Grey => 100.0,
            Rarity::Green => 50.0,
            Rarity::Blue => 20.0,
            Rarity::Purple => 8.0,
            Rarity::Red => 3.0,
            Rarity::Gold => 1.0,
        }
    }

    /// Weight added per point of luck.
    pub fn luck_coefficient(&self) -> f64 {
        match self {
            Rarity::Grey => 0.0,
            Rarity::Green => 0.5,
            Rarity::Blue => 0.2,
            Rarity::Purple => 0.1,
            Rarity::Red => 0.03,
            Rarity::Gold => 0.01,
        }
    }

    /// Earliest wave at which this rarity can appear in a draw.
    pub fn min_wave(&self) -> u32 {
        match self {
            Rarity::Red => 3,
            Rarity::Gold => 5,
            _ => 1,
        }
    }
}

/// Upgrade category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeType {
    Passive,
    Weapon,
    Defense,
    Utility,
    Cosmic,
}

/// Player attributes touched by the modifier stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Damage,
    FireRate,
    Speed,
    Shield,
    MaxHp,
    Magnet,
    Crit,
    Pierce,
    Spread,
    Cooldown,
    BlastArea,
    LifeSteal,
    Luck,
}

impl Stat {
    pub const COUNT: usize = 13;

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Weapon identifier. `MainGun` is always installed; the rest unlock
/// through upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponId {
    MainGun,
    SpreadCannon,
    RearGuard,
    PlasmaBurst,
    SeekerDrone,
    NebulaRounds,
    TwinLaser,
    OrbitalCannon,
    BlackHole,
    WarpStrike,
    EventHorizon,
    PhotonDevastator,
    BulletStorm,
}

impl WeaponId {
    /// Weapons that claim the main-gun firing slot while installed.
    pub fn overrides_main_gun(&self) -> bool {
        matches!(self, WeaponId::TwinLaser | WeaponId::PhotonDevastator)
    }
}

/// Boss dive choreography stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiveStage {
    #[default]
    Idle,
    Warning,
    Tracking,
    Diving,
    Returning,
}
