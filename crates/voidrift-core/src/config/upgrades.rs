//! The upgrade catalog: six rarity tiers, forty upgrades.
//!
//! Each upgrade carries per-level stat deltas and/or a special payload.
//! Levels are value-symmetric: applying level N first removes level N-1's
//! deltas, so the catalog lists absolute per-level values.

use crate::enums::{Rarity, Stat, UpgradeType, WeaponId};

/// One modifier-stack adjustment.
#[derive(Debug, Clone, Copy)]
pub struct StatDelta {
    pub stat: Stat,
    pub amount: f64,
    /// True = percent modifier, false = flat.
    pub percent: bool,
}

/// Bespoke mechanics not expressible as stat deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecialEffect {
    /// Restore 1 HP; the upgrade's level resets so it can be offered again.
    Heal,
    /// Also restores 1 HP when picked (Max HP upgrades).
    HealOnPick,
    /// Shield points recharge mid-wave on this interval.
    VoidShield { recharge_secs: f64 },
    /// Invulnerability window granted on taking a hit.
    QuantumPhase { invuln_secs: f64 },
    /// Damage burst released when the shield breaks.
    PulsarShield { burst_damage: f64 },
    /// One revive at this HP with a short invulnerability.
    Undying { revive_hp: f64, invuln_secs: f64 },
    /// Global damage multiplier. At 2.5 the crit formula changes tier.
    Singularity { multiplier: f64 },
    /// Flat damage added on critical hits.
    TargetingAi { crit_damage_bonus: f64 },
    /// Chance for kills to explode, chaining into nearby enemies.
    DeathNova { chance: f64, damage: f64 },
    /// Crit chance bonus per consecutive crit in the chain.
    CritCascade { chain_bonus: f64 },
    CosmicRebirth,
    Supernova,
    GodModeCore,
    Arsenal,
}

#[derive(Debug, Clone)]
pub struct UpgradeLevel {
    pub label: &'static str,
    pub stats: Vec<StatDelta>,
    pub special: Option<SpecialEffect>,
}

#[derive(Debug, Clone)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub rarity: Rarity,
    pub kind: UpgradeType,
    pub max_level: u8,
    /// Weapon registered/leveled when this upgrade is taken.
    pub weapon: Option<WeaponId>,
    pub levels: Vec<UpgradeLevel>,
    pub description: &'static str,
}

fn flat(stat: Stat, amount: f64) -> StatDelta {
    StatDelta {
        stat,
        amount,
        percent: false,
    }
}

fn pct(stat: Stat, amount: f64) -> StatDelta {
    StatDelta {
        stat,
        amount,
        percent: true,
    }
}

fn lv(label: &'static str, stats: Vec<StatDelta>) -> UpgradeLevel {
    UpgradeLevel {
        label,
        stats,
        special: None,
    }
}

fn lv_special(
    label: &'static str,
    stats: Vec<StatDelta>,
    special: SpecialEffect,
) -> UpgradeLevel {
    UpgradeLevel {
        label,
        stats,
        special: Some(special),
    }
}

fn weapon_levels(labels: [&'static str; 3]) -> Vec<UpgradeLevel> {
    labels.into_iter().map(|l| lv(l, vec![])).collect()
}

/// The full catalog. Built on demand; draws are rare enough that a
/// rebuilt table beats a lazy static here.
pub fn catalog() -> Vec<UpgradeDef> {
    use SpecialEffect::*;
    use Stat::*;
    use UpgradeType::*;

    let def = |id,
               name,
               rarity,
               kind,
               max_level,
               weapon,
               levels,
               description| UpgradeDef {
        id,
        name,
        rarity,
        kind,
        max_level,
        weapon,
        levels,
        description,
    };

    vec![
        // ---- Grey: common ----
        def(
            "G01",
            "Thruster Tweak",
            Rarity::Grey,
            Passive,
            3,
            None,
            vec![
                lv("+8% Speed", vec![pct(Speed, 0.08)]),
                lv("+16% Speed", vec![pct(Speed, 0.16)]),
                lv("+25% Speed", vec![pct(Speed, 0.25)]),
            ],
            "Minor engine calibration. Dodge bullets just a bit easier.",
        ),
        def(
            "G02",
            "Targeting Lens",
            Rarity::Grey,
            Passive,
            3,
            None,
            vec![
                lv("+1 DMG", vec![flat(Damage, 1.0)]),
                lv("+2 DMG", vec![flat(Damage, 2.0)]),
                lv("+4 DMG", vec![flat(Damage, 4.0)]),
            ],
            "Polished optics. Your shots land a little harder.",
        ),
        def(
            "G03",
            "Reactor Tick",
            Rarity::Grey,
            Passive,
            3,
            None,
            vec![
                lv("-5% Cooldown", vec![flat(Cooldown, 0.05)]),
                lv("-10% Cooldown", vec![flat(Cooldown, 0.10)]),
                lv("-15% Cooldown", vec![flat(Cooldown, 0.15)]),
            ],
            "Small reactor tweak lets weapons recycle slightly faster.",
        ),
        def(
            "G04",
            "Gravity Coil",
            Rarity::Grey,
            Passive,
            3,
            None,
            vec![
                lv("+20 Magnet", vec![flat(Magnet, 20.0)]),
                lv("+40 Magnet", vec![flat(Magnet, 40.0)]),
                lv("+60 Magnet", vec![flat(Magnet, 60.0)]),
            ],
            "Increased magnetic field pulls XP orbs from further away.",
        ),
        def(
            "G05",
            "Hull Patch",
            Rarity::Grey,
            Utility,
            3,
            None,
            vec![
                lv_special("Restore 1 HP", vec![], Heal),
                lv_special("Restore 1 HP", vec![], Heal),
                lv_special("Restore 1 HP", vec![], Heal),
            ],
            "Quick field repair. Each pick restores 1 HP up to current max.",
        ),
        def(
            "G06",
            "Lucky Charm",
            Rarity::Grey,
            Passive,
            3,
            None,
            vec![
                lv("+2 Luck", vec![flat(Luck, 2.0)]),
                lv("+4 Luck", vec![flat(Luck, 4.0)]),
                lv("+7 Luck", vec![flat(Luck, 7.0)]),
            ],
            "Slightly weights the roll pool toward higher rarities.",
        ),
        // ---- Green: uncommon ----
        def(
            "Gn01",
            "Dual Burner",
            Rarity::Green,
            Passive,
            3,
            None,
            vec![
                lv("+1 Spread (2 shots)", vec![flat(Spread, 1.0)]),
                lv("+2 Spread (3 shots)", vec![flat(Spread, 2.0)]),
                lv("+3 Spread (4 shots)", vec![flat(Spread, 3.0)]),
            ],
            "Side nozzles fire additional parallel shots.",
        ),
        def(
            "Gn02",
            "Overcharged Cell",
            Rarity::Green,
            Passive,
            3,
            None,
            vec![
                lv("+3 DMG", vec![flat(Damage, 3.0)]),
                lv("+6 DMG", vec![flat(Damage, 6.0)]),
                lv("+10 DMG", vec![flat(Damage, 10.0)]),
            ],
            "Hotter plasma, more kinetic force per round.",
        ),
        def(
            "Gn03",
            "Combat Stims",
            Rarity::Green,
            Passive,
            3,
            None,
            vec![
                lv("+0.2 Fire Rate", vec![flat(FireRate, 0.2)]),
                lv("+0.4 Fire Rate", vec![flat(FireRate, 0.4)]),
                lv("+0.6 Fire Rate", vec![flat(FireRate, 0.6)]),
            ],
            "Neural combat protocols increase trigger response.",
        ),
        def(
            "Gn04",
            "Micro Shield",
            Rarity::Green,
            Defense,
            3,
            None,
            vec![
                lv("+1 Shield", vec![flat(Shield, 1.0)]),
                lv("+2 Shield", vec![flat(Shield, 2.0)]),
                lv("+3 Shield", vec![flat(Shield, 3.0)]),
            ],
            "Small energy barrier absorbs hits before hull damage.",
        ),
        def(
            "Gn05",
            "Lucky Stars",
            Rarity::Green,
            Passive,
            3,
            None,
            vec![
                lv("+5% Crit", vec![flat(Crit, 0.05)]),
                lv("+10% Crit", vec![flat(Crit, 0.10)]),
                lv("+15% Crit", vec![flat(Crit, 0.15)]),
            ],
            "Random targeting glitches somehow result in critical strikes.",
        ),
        def(
            "Gn06",
            "Ion Refractor",
            Rarity::Green,
            Passive,
            3,
            None,
            vec![
                lv("+1 Pierce", vec![flat(Pierce, 1.0)]),
                lv("+2 Pierce", vec![flat(Pierce, 2.0)]),
                lv("+3 Pierce", vec![flat(Pierce, 3.0)]),
            ],
            "Shots now punch through one enemy to hit the next.",
        ),
        def(
            "Gn07",
            "Warp Boosters",
            Rarity::Green,
            Passive,
            3,
            None,
            vec![
                lv("+15% Speed", vec![pct(Speed, 0.15)]),
                lv("+25% Speed", vec![pct(Speed, 0.25)]),
                lv("+40% Speed", vec![pct(Speed, 0.40)]),
            ],
            "Experimental engine pods. You feel the difference immediately.",
        ),
        def(
            "Gn08",
            "Max HP Upgrade",
            Rarity::Green,
            Defense,
            3,
            None,
            vec![
                lv_special("+1 Max HP", vec![flat(MaxHp, 1.0)], HealOnPick),
                lv_special("+2 Max HP", vec![flat(MaxHp, 2.0)], HealOnPick),
                lv_special("+3 Max HP", vec![flat(MaxHp, 3.0)], HealOnPick),
            ],
            "Reinforced life support. Also heals 1 HP on pickup.",
        ),
        // ---- Blue: rare ----
        def(
            "B01",
            "Spread Cannon",
            Rarity::Blue,
            Weapon,
            3,
            Some(WeaponId::SpreadCannon),
            weapon_levels(["3-shot spread", "5-shot spread", "7-shot spread +15% DMG"]),
            "Replaces single shot with a fanning spread of bolts.",
        ),
        def(
            "B02",
            "Rear Guard",
            Rarity::Blue,
            Weapon,
            3,
            Some(WeaponId::RearGuard),
            weapon_levels(["1 shot backward", "2 shots backward", "3 shots backward +DMG"]),
            "Auto-turret fires behind you. No more running from Divers.",
        ),
        def(
            "B03",
            "Plasma Burst",
            Rarity::Blue,
            Weapon,
            3,
            Some(WeaponId::PlasmaBurst),
            weapon_levels([
                "AoE burst every 4s",
                "AoE burst every 3s",
                "AoE burst every 2s +50% radius",
            ]),
            "Periodic expanding plasma ring damages all nearby enemies.",
        ),
        def(
            "B04",
            "Seeker Drone",
            Rarity::Blue,
            Weapon,
            3,
            Some(WeaponId::SeekerDrone),
            weapon_levels([
                "1 homing missile per 5s",
                "1 homing missile per 3s",
                "2 homing missiles per 3s",
            ]),
            "Deploys a mini-drone that targets the nearest enemy.",
        ),
        def(
            "B05",
            "Chrono Capacitor",
            Rarity::Blue,
            Passive,
            3,
            None,
            vec![
                lv("-20% Cooldown", vec![flat(Cooldown, 0.20)]),
                lv("-35% Cooldown", vec![flat(Cooldown, 0.35)]),
                lv("-50% Cooldown", vec![flat(Cooldown, 0.50)]),
            ],
            "Quantum timing chip. Everything fires faster.",
        ),
        def(
            "B06",
            "Void Shield",
            Rarity::Blue,
            Defense,
            3,
            None,
            vec![
                lv_special(
                    "+2 Shield, recharge 8s",
                    vec![flat(Shield, 2.0)],
                    VoidShield { recharge_secs: 8.0 },
                ),
                lv_special(
                    "+3 Shield, recharge 6s",
                    vec![flat(Shield, 3.0)],
                    VoidShield { recharge_secs: 6.0 },
                ),
                lv_special(
                    "+4 Shield, recharge 4s",
                    vec![flat(Shield, 4.0)],
                    VoidShield { recharge_secs: 4.0 },
                ),
            ],
            "Void-energy barrier. Recharges mid-wave, not just between waves.",
        ),
        def(
            "B07",
            "Nebula Rounds",
            Rarity::Blue,
            Weapon,
            3,
            Some(WeaponId::NebulaRounds),
            weapon_levels([
                "Kills leave 1s damage cloud",
                "2s damage cloud",
                "3s damage cloud +DMG",
            ]),
            "Kills leave toxic nebula clouds that deal tick damage.",
        ),
        def(
            "B08",
            "Targeting AI",
            Rarity::Blue,
            Passive,
            3,
            None,
            vec![
                lv_special(
                    "+20% Crit, +5 crit DMG",
                    vec![flat(Crit, 0.20)],
                    TargetingAi {
                        crit_damage_bonus: 5.0,
                    },
                ),
                lv_special(
                    "+30% Crit, +10 crit DMG",
                    vec![flat(Crit, 0.30)],
                    TargetingAi {
                        crit_damage_bonus: 10.0,
                    },
                ),
                lv_special(
                    "+40% Crit, +15 crit DMG",
                    vec![flat(Crit, 0.40)],
                    TargetingAi {
                        crit_damage_bonus: 15.0,
                    },
                ),
            ],
            "AI-assisted targeting drastically increases precision strikes.",
        ),
        // ---- Purple: epic ----
        def(
            "P01",
            "Twin Laser Array",
            Rarity::Purple,
            Weapon,
            3,
            Some(WeaponId::TwinLaser),
            weapon_levels([
                "Dual lasers replace cannon",
                "+30% laser DMG",
                "+60% DMG, beams widen",
            ]),
            "Replaces your cannon with two continuous laser beams.",
        ),
        def(
            "P02",
            "Orbital Cannon",
            Rarity::Purple,
            Weapon,
            3,
            Some(WeaponId::OrbitalCannon),
            weapon_levels([
                "Satellite fires every 2s",
                "Every 1.5s +DMG",
                "Dual satellite, every 1s",
            ]),
            "A weapons satellite orbits you, firing independently.",
        ),
        def(
            "P03",
            "Black Hole Grenade",
            Rarity::Purple,
            Weapon,
            3,
            Some(WeaponId::BlackHole),
            weapon_levels([
                "Grenade every 8s, pulls enemies",
                "Every 6s, bigger pull",
                "Every 4s, enemies take 50 DMG/s",
            ]),
            "Creates a micro black hole that drags enemies toward center.",
        ),
        def(
            "P04",
            "Quantum Phase",
            Rarity::Purple,
            Defense,
            3,
            None,
            vec![
                lv_special("0.5s invuln on hit", vec![], QuantumPhase { invuln_secs: 0.5 }),
                lv_special("0.8s invuln on hit", vec![], QuantumPhase { invuln_secs: 0.8 }),
                lv_special(
                    "1.2s invuln + speed burst",
                    vec![],
                    QuantumPhase { invuln_secs: 1.2 },
                ),
            ],
            "Ship briefly phases out of realspace when hit. Built-in parry.",
        ),
        def(
            "P05",
            "Crit Cascade",
            Rarity::Purple,
            Passive,
            3,
            None,
            vec![
                lv_special("+5% crit per chain", vec![], CritCascade { chain_bonus: 0.05 }),
                lv_special("+10% crit per chain", vec![], CritCascade { chain_bonus: 0.10 }),
                lv_special("+15% crit per chain", vec![], CritCascade { chain_bonus: 0.15 }),
            ],
            "Critical hits feed a momentum chain. Land enough and every shot crits.",
        ),
        def(
            "P06",
            "Dark Matter Core",
            Rarity::Purple,
            Passive,
            3,
            None,
            vec![
                lv(
                    "+10 DMG, +0.5 Rate",
                    vec![flat(Damage, 10.0), flat(FireRate, 0.5)],
                ),
                lv(
                    "+20 DMG, +1.0 Rate",
                    vec![flat(Damage, 20.0), flat(FireRate, 1.0)],
                ),
                lv(
                    "+35 DMG, +1.5 Rate",
                    vec![flat(Damage, 35.0), flat(FireRate, 1.5)],
                ),
            ],
            "Unstable dark matter power source. Raw performance upgrade.",
        ),
        def(
            "P07",
            "Pulsar Shield",
            Rarity::Purple,
            Defense,
            3,
            None,
            vec![
                lv_special(
                    "Shield break: 20 DMG burst",
                    vec![],
                    PulsarShield { burst_damage: 20.0 },
                ),
                lv_special(
                    "Shield break: 40 DMG burst",
                    vec![],
                    PulsarShield { burst_damage: 40.0 },
                ),
                lv_special(
                    "Shield break: 80 DMG + stun",
                    vec![],
                    PulsarShield { burst_damage: 80.0 },
                ),
            ],
            "When shield breaks, releases a damaging energy pulse outward.",
        ),
        def(
            "P08",
            "Warp Strike",
            Rarity::Purple,
            Weapon,
            3,
            Some(WeaponId::WarpStrike),
            weapon_levels([
                "Teleport + 100 DMG every 10s",
                "150 DMG every 7s",
                "200 DMG + stun every 5s",
            ]),
            "You blink to the nearest enemy cluster and detonate.",
        ),
        // ---- Red: legendary ----
        def(
            "R01",
            "Event Horizon",
            Rarity::Red,
            Weapon,
            3,
            Some(WeaponId::EventHorizon),
            weapon_levels([
                "Permanent vortex pulls enemies",
                "Bigger pull radius",
                "Enemies take 50 DMG/s",
            ]),
            "A permanent gravitational anomaly warps the battlefield.",
        ),
        def(
            "R02",
            "Photon Devastator",
            Rarity::Red,
            Weapon,
            3,
            Some(WeaponId::PhotonDevastator),
            weapon_levels(["Screen beam every 3s", "Every 2.5s +50% DMG", "Every 2s, full pierce"]),
            "Screen-wide beam fires periodically. Nothing survives it.",
        ),
        def(
            "R03",
            "Undying Protocol",
            Rarity::Red,
            Defense,
            3,
            None,
            vec![
                lv_special(
                    "Revive with 1 HP (once)",
                    vec![],
                    Undying {
                        revive_hp: 1.0,
                        invuln_secs: 1.0,
                    },
                ),
                lv_special(
                    "Revive with 2 HP",
                    vec![],
                    Undying {
                        revive_hp: 2.0,
                        invuln_secs: 1.0,
                    },
                ),
                lv_special(
                    "Revive with 3 HP + invuln",
                    vec![],
                    Undying {
                        revive_hp: 3.0,
                        invuln_secs: 2.0,
                    },
                ),
            ],
            "Emergency resurrection software. One get-out-of-death-free card.",
        ),
        def(
            "R04",
            "Bullet Storm",
            Rarity::Red,
            Weapon,
            3,
            Some(WeaponId::BulletStorm),
            weapon_levels(["3s of 10x fire every 12s", "Every 10s", "Every 8s + damage boost"]),
            "Systems briefly overload. Absolute carnage for 3 seconds.",
        ),
        def(
            "R05",
            "Singularity Engine",
            Rarity::Red,
            Passive,
            3,
            None,
            vec![
                lv_special("All DMG x1.5", vec![], Singularity { multiplier: 1.5 }),
                lv_special("All DMG x2.0", vec![], Singularity { multiplier: 2.0 }),
                lv_special("All DMG x2.5, crits x3", vec![], Singularity { multiplier: 2.5 }),
            ],
            "Rewires your ship's power matrix. Everything hits harder.",
        ),
        def(
            "R06",
            "Death Nova",
            Rarity::Red,
            Passive,
            3,
            None,
            vec![
                lv_special(
                    "5% kill explosion (80 DMG)",
                    vec![],
                    DeathNova {
                        chance: 0.05,
                        damage: 80.0,
                    },
                ),
                lv_special(
                    "10% kill explosion (120 DMG)",
                    vec![],
                    DeathNova {
                        chance: 0.10,
                        damage: 120.0,
                    },
                ),
                lv_special(
                    "20% kill explosion (200 DMG)",
                    vec![],
                    DeathNova {
                        chance: 0.20,
                        damage: 200.0,
                    },
                ),
            ],
            "Enemies randomly detonate on death, chaining into nearby foes.",
        ),
        // ---- Gold: cosmic ----
        def(
            "Au01",
            "COSMIC REBIRTH",
            Rarity::Gold,
            Cosmic,
            1,
            None,
            vec![lv_special("Full HP + 30% all stats", vec![], CosmicRebirth)],
            "The universe resets your ship to peak condition. One time.",
        ),
        def(
            "Au02",
            "SUPERNOVA FORM",
            Rarity::Gold,
            Cosmic,
            1,
            None,
            vec![lv_special("20s invincible + 500% DMG", vec![], Supernova)],
            "You become a star for 20 seconds. Save it for the boss.",
        ),
        def(
            "Au03",
            "GOD MODE CORE",
            Rarity::Gold,
            Cosmic,
            1,
            None,
            vec![lv_special("+5 HP, +5 Shield, x2 DMG, -50% CD", vec![], GodModeCore)],
            "Pure cosmic energy reforges your entire ship. The complete package.",
        ),
        def(
            "Au04",
            "GALACTIC ARSENAL",
            Rarity::Gold,
            Cosmic,
            1,
            None,
            vec![lv_special("Unlock ALL weapons", vec![], Arsenal)],
            "Every weapon system activates at once. Beautiful chaos.",
        ),
    ]
}

/// Weapon upgrade ids granted by GALACTIC ARSENAL (all at level 1).
pub const ARSENAL_IDS: [&str; 11] = [
    "B01", "B02", "B03", "B04", "P01", "P02", "P03", "P08", "R01", "R02", "R04",
];

/// Look up a catalog entry by id.
pub fn find(catalog: &[UpgradeDef], id: &str) -> Option<usize> {
    catalog.iter().position(|d| d.id == id)
}
