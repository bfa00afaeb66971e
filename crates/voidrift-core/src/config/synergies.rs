//! Synergy pairs: one-time bonuses unlocked by owning two specific
//! upgrades (or, for the wildcard pair, any RED plus any GOLD).

use crate::enums::Rarity;

/// How a synergy member is matched against the owned-upgrade set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynergyKey {
    Id(&'static str),
    AnyOfRarity(Rarity),
}

/// Combat effect applied on unlock. Presentation-side synergies carry
/// `Announce` only; the frontend reacts to the unlock event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynergyEffect {
    /// Flat spread bonus (Galaxy Spray).
    SpreadBonus(f64),
    /// Percent bonus to the six core stats (Transcendence).
    AllStatsPercent(f64),
    /// Warp Strike grants phase invulnerability on arrival (Ghost Blade).
    WarpInvuln { secs: f64 },
    /// Black-hole kills always trigger Death Nova (Heat Death).
    GuaranteedNovaFromWells,
    /// Crits guaranteed while Bullet Storm is active (Nova Strike).
    StormGuaranteedCrits,
    /// Twin Laser widens and gains bonus damage (Annihilator Beam).
    LaserOvercharge { damage_bonus: f64 },
    Announce,
}

#[derive(Debug, Clone)]
pub struct SynergyDef {
    pub first: SynergyKey,
    pub second: SynergyKey,
    pub name: &'static str,
    pub effect: SynergyEffect,
    pub description: &'static str,
}

pub fn synergy_table() -> Vec<SynergyDef> {
    use SynergyEffect::*;
    use SynergyKey::*;
    vec![
        SynergyDef {
            first: Id("Gn01"),
            second: Id("B01"),
            name: "Galaxy Spray",
            effect: SpreadBonus(9.0),
            description: "9-shot spread fills the entire screen width",
        },
        SynergyDef {
            first: Id("B04"),
            second: Id("P02"),
            name: "Swarm Protocol",
            effect: Announce,
            description: "Drones and cannon fire in coordinated bursts",
        },
        SynergyDef {
            first: Id("B03"),
            second: Id("P03"),
            name: "Singularity Pulse",
            effect: Announce,
            description: "Burst pulls enemies inward then explodes them outward",
        },
        SynergyDef {
            first: Id("P05"),
            second: Id("R04"),
            name: "Nova Strike",
            effect: StormGuaranteedCrits,
            description: "During storm, crits guaranteed",
        },
        SynergyDef {
            first: Id("P04"),
            second: Id("P08"),
            name: "Ghost Blade",
            effect: WarpInvuln { secs: 0.5 },
            description: "Warp Strike triggers phase invincibility on arrival",
        },
        SynergyDef {
            first: Id("P01"),
            second: Id("P06"),
            name: "Annihilator Beam",
            effect: LaserOvercharge { damage_bonus: 0.8 },
            description: "Lasers widen and gain 80% bonus DMG",
        },
        SynergyDef {
            first: Id("R06"),
            second: Id("R01"),
            name: "Heat Death",
            effect: GuaranteedNovaFromWells,
            description: "Black hole kills cause nova chains",
        },
        SynergyDef {
            first: AnyOfRarity(Rarity::Red),
            second: AnyOfRarity(Rarity::Gold),
            name: "Transcendence",
            effect: AllStatsPercent(0.15),
            description: "+15% to all stats as a one-time bonus",
        },
    ]
}
