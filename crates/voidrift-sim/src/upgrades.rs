//! The upgrade ledger: owned levels, luck-weighted card draws, level
//! application, specials, and synergy unlocks.

use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use voidrift_core::config::synergies::{synergy_table, SynergyEffect, SynergyKey};
use voidrift_core::config::upgrades::{catalog, SpecialEffect, UpgradeDef, ARSENAL_IDS};
use voidrift_core::enums::{Rarity, Stat};
use voidrift_core::events::{FxEvent, GameEvent, SoundCue};
use voidrift_core::state::CardView;

use crate::player::PlayerState;
use crate::systems::weapons::WeaponRegistry;
use crate::timers::{TimerAction, TimerQueue};

/// Supernova's temporary damage bonus (+500%), applied on the stat stack
/// and reversed when the timer fires.
pub const SUPERNOVA_BONUS_PCT: f64 = 5.0;
const SUPERNOVA_SECS: f64 = 20.0;

/// Stats touched by "all stats" bonuses (Cosmic Rebirth, Transcendence).
const CORE_STATS: [Stat; 6] = [
    Stat::Damage,
    Stat::FireRate,
    Stat::Speed,
    Stat::Magnet,
    Stat::Crit,
    Stat::BlastArea,
];

/// Bespoke mechanics state driven by special upgrades.
#[derive(Debug, Clone)]
pub struct SpecialState {
    /// Singularity Engine's global multiplier (1.0 = none).
    pub singularity_mult: f64,
    pub crit_dmg_bonus: f64,
    pub crit_cascade_bonus: f64,
    pub crit_chain: u32,
    /// (chance, damage) for kill explosions.
    pub death_nova: Option<(f64, f64)>,
    pub void_shield_recharge: Option<f64>,
    pub void_shield_next_at: f64,
    /// Invulnerability window granted on hit (Quantum Phase).
    pub quantum_invuln_secs: f64,
    /// Burst released when the shield breaks (Pulsar Shield).
    pub pulsar_burst: f64,
    pub undying_available: bool,
    pub undying_hp: f64,
    pub undying_invuln_secs: f64,
}

impl Default for SpecialState {
    fn default() -> Self {
        Self {
            singularity_mult: 1.0,
            crit_dmg_bonus: 0.0,
            crit_cascade_bonus: 0.0,
            crit_chain: 0,
            death_nova: None,
            void_shield_recharge: None,
            void_shield_next_at: 0.0,
            quantum_invuln_secs: 0.0,
            pulsar_burst: 0.0,
            undying_available: false,
            undying_hp: 0.0,
            undying_invuln_secs: 0.0,
        }
    }
}

/// One card in an open offer.
#[derive(Debug, Clone, Copy)]
pub struct CardOffer {
    pub catalog_idx: usize,
    /// Level this pick would set (1-based).
    pub next_level: u8,
}

/// Owned upgrades plus all special/synergy state.
pub struct UpgradeLedger {
    catalog: Vec<UpgradeDef>,
    levels: HashMap<&'static str, u8>,
    unlocked_synergies: Vec<&'static str>,
    pub specials: SpecialState,
    // Synergy combat flags
    pub warp_invuln_secs: Option<f64>,
    pub storm_guaranteed_crits: bool,
    pub wells_force_nova: bool,
    pub laser_overcharge: Option<f64>,
}

impl Default for UpgradeLedger {
    fn default() -> Self {
        Self {
            catalog: catalog(),
            levels: HashMap::new(),
            unlocked_synergies: Vec::new(),
            specials: SpecialState::default(),
            warp_invuln_secs: None,
            storm_guaranteed_crits: false,
            wells_force_nova: false,
            laser_overcharge: None,
        }
    }
}

impl UpgradeLedger {
    pub fn level(&self, id: &str) -> u8 {
        self.catalog
            .iter()
            .find(|d| d.id == id)
            .and_then(|d| self.levels.get(d.id))
            .copied()
            .unwrap_or(0)
    }

    pub fn catalog(&self) -> &[UpgradeDef] {
        &self.catalog
    }

    #[cfg(test)]
    pub(crate) fn set_level(&mut self, id: &'static str, level: u8) {
        self.levels.insert(id, level);
    }

    pub fn synergies(&self) -> &[&'static str] {
        &self.unlocked_synergies
    }

    fn owns_any_of_rarity(&self, rarity: Rarity) -> bool {
        self.catalog
            .iter()
            .any(|d| d.rarity == rarity && self.levels.get(d.id).copied().unwrap_or(0) > 0)
    }

    /// Draw up to three cards without replacement. The pool excludes maxed
    /// upgrades and rarities gated behind later waves; luck shifts the
    /// weights toward higher tiers.
    pub fn draw_cards(&self, wave: u32, luck: f64, rng: &mut ChaCha8Rng) -> Vec<CardOffer> {
        let mut pool: Vec<(usize, f64)> = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, def)| {
                let owned = self.levels.get(def.id).copied().unwrap_or(0);
                owned < def.max_level && wave >= def.rarity.min_wave()
            })
            .map(|(idx, def)| {
                let weight = def.rarity.base_weight() + luck * def.rarity.luck_coefficient();
                (idx, weight.max(0.0))
            })
            .collect();

        let mut drawn = Vec::new();
        for _ in 0..3 {
            let total: f64 = pool.iter().map(|(_, w)| w).sum();
            if pool.is_empty() || total <= 0.0 {
                break;
            }
            let mut roll = rng.gen::<f64>() * total;
            let mut picked = pool.len() - 1;
            for (i, (_, weight)) in pool.iter().enumerate() {
                roll -= weight;
                if roll <= 0.0 {
                    picked = i;
                    break;
                }
            }
            let (idx, _) = pool.remove(picked);
            let owned = self.levels.get(self.catalog[idx].id).copied().unwrap_or(0);
            drawn.push(CardOffer {
                catalog_idx: idx,
                next_level: owned + 1,
            });
        }
        drawn
    }

    pub fn card_views(&self, offers: &[CardOffer]) -> Vec<CardView> {
        offers
            .iter()
            .map(|offer| {
                let def = &self.catalog[offer.catalog_idx];
                let level = &def.levels[offer.next_level as usize - 1];
                CardView {
                    id: def.id.to_string(),
                    name: def.name.to_string(),
                    rarity: def.rarity,
                    next_level: offer.next_level,
                    label: level.label.to_string(),
                    description: def.description.to_string(),
                }
            })
            .collect()
    }

    /// Apply one picked card: reverse the previous level's deltas, apply
    /// the new level's, run specials, then re-check synergies.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &mut self,
        catalog_idx: usize,
        player: &mut PlayerState,
        weapons: &mut WeaponRegistry,
        timers: &mut TimerQueue,
        events: &mut Vec<GameEvent>,
        fx: &mut Vec<FxEvent>,
        now: f64,
    ) {
        let Some(def) = self.catalog.get(catalog_idx).cloned() else {
            warn!(catalog_idx, "upgrade apply: unknown catalog index");
            return;
        };
        let old_level = self.levels.get(def.id).copied().unwrap_or(0);
        let new_level = (old_level + 1).min(def.max_level);
        let level_def = &def.levels[new_level as usize - 1];

        // Hull Patch: heal and stay re-offerable.
        if level_def.special == Some(SpecialEffect::Heal) {
            player.heal(1.0);
            self.levels.insert(def.id, 0);
            events.push(GameEvent::UpgradeChosen {
                id: def.id.to_string(),
                level: 0,
            });
            fx.push(FxEvent::Sound {
                cue: SoundCue::CardPick,
            });
            return;
        }

        // Value-symmetric replacement: remove the old level first.
        if old_level > 0 {
            for delta in &def.levels[old_level as usize - 1].stats {
                if delta.percent {
                    player.mods.add_percent(delta.stat, -delta.amount);
                } else {
                    player.mods.add_flat(delta.stat, -delta.amount);
                }
            }
        }
        let shield_cap_before = player.derived.shield_max;
        for delta in &level_def.stats {
            if delta.percent {
                player.mods.add_percent(delta.stat, delta.amount);
            } else {
                player.mods.add_flat(delta.stat, delta.amount);
            }
        }
        player.recompute();
        // Capacity growth also fills the shield by the same amount.
        let cap_gain = player.derived.shield_max - shield_cap_before;
        if cap_gain > 0.0 {
            player.shield = (player.shield + cap_gain).min(player.derived.shield_max);
        }

        if let Some(weapon) = def.weapon {
            weapons.add_or_level(weapon, new_level, now);
        }

        if let Some(special) = level_def.special {
            self.apply_special(special, player, weapons, timers, now);
        }

        self.levels.insert(def.id, new_level);
        events.push(GameEvent::UpgradeChosen {
            id: def.id.to_string(),
            level: new_level,
        });
        fx.push(FxEvent::Sound {
            cue: SoundCue::CardPick,
        });

        self.check_synergies(player, events, fx);
    }

    fn apply_special(
        &mut self,
        special: SpecialEffect,
        player: &mut PlayerState,
        weapons: &mut WeaponRegistry,
        timers: &mut TimerQueue,
        now: f64,
    ) {
        match special {
            SpecialEffect::Heal => {}
            SpecialEffect::HealOnPick => player.heal(1.0),
            SpecialEffect::VoidShield { recharge_secs } => {
                self.specials.void_shield_recharge = Some(recharge_secs);
                self.specials.void_shield_next_at = now + recharge_secs;
                player.shield = player.derived.shield_max;
            }
            SpecialEffect::QuantumPhase { invuln_secs } => {
                self.specials.quantum_invuln_secs = invuln_secs;
            }
            SpecialEffect::PulsarShield { burst_damage } => {
                self.specials.pulsar_burst = burst_damage;
            }
            SpecialEffect::Undying {
                revive_hp,
                invuln_secs,
            } => {
                self.specials.undying_available = true;
                self.specials.undying_hp = revive_hp;
                self.specials.undying_invuln_secs = invuln_secs;
            }
            SpecialEffect::Singularity { multiplier } => {
                self.specials.singularity_mult = multiplier;
            }
            SpecialEffect::TargetingAi { crit_damage_bonus } => {
                self.specials.crit_dmg_bonus = crit_damage_bonus;
            }
            SpecialEffect::DeathNova { chance, damage } => {
                self.specials.death_nova = Some((chance, damage));
            }
            SpecialEffect::CritCascade { chain_bonus } => {
                self.specials.crit_cascade_bonus = chain_bonus;
            }
            SpecialEffect::CosmicRebirth => {
                for stat in CORE_STATS {
                    player.mods.add_percent(stat, 0.30);
                }
                player.recompute();
                player.hp = player.derived.max_hp;
            }
            SpecialEffect::Supernova => {
                player.mods.add_percent(Stat::Damage, SUPERNOVA_BONUS_PCT);
                player.recompute();
                player.grant_invulnerability(now + SUPERNOVA_SECS);
                timers.schedule(now + SUPERNOVA_SECS, TimerAction::EndSupernova);
            }
            SpecialEffect::GodModeCore => {
                player.mods.add_flat(Stat::MaxHp, 5.0);
                player.mods.add_flat(Stat::Shield, 5.0);
                player.mods.add_percent(Stat::Damage, 1.0);
                player.mods.add_flat(Stat::Cooldown, 0.5);
                player.recompute();
                player.heal(5.0);
                player.shield = player.derived.shield_max;
            }
            SpecialEffect::Arsenal => {
                for id in ARSENAL_IDS {
                    if self.levels.get(id).copied().unwrap_or(0) > 0 {
                        continue;
                    }
                    let Some(def) = self.catalog.iter().find(|d| d.id == id) else {
                        warn!(id, "arsenal: unknown upgrade id");
                        continue;
                    };
                    if let Some(weapon) = def.weapon {
                        weapons.add_or_level(weapon, 1, now);
                        self.levels.insert(def.id, 1);
                    }
                }
            }
        }
    }

    fn owns_key(&self, key: &SynergyKey) -> bool {
        match key {
            SynergyKey::Id(id) => self.levels.get(id).copied().unwrap_or(0) > 0,
            SynergyKey::AnyOfRarity(rarity) => self.owns_any_of_rarity(*rarity),
        }
    }

    fn check_synergies(
        &mut self,
        player: &mut PlayerState,
        events: &mut Vec<GameEvent>,
        fx: &mut Vec<FxEvent>,
    ) {
        let newly_unlocked: Vec<_> = synergy_table()
            .into_iter()
            .filter(|def| {
                !self.unlocked_synergies.contains(&def.name)
                    && self.owns_key(&def.first)
                    && self.owns_key(&def.second)
            })
            .collect();

        for def in newly_unlocked {
            self.unlocked_synergies.push(def.name);
            match def.effect {
                SynergyEffect::SpreadBonus(amount) => {
                    player.mods.add_flat(Stat::Spread, amount);
                    player.recompute();
                }
                SynergyEffect::AllStatsPercent(amount) => {
                    for stat in CORE_STATS {
                        player.mods.add_percent(stat, amount);
                    }
                    player.recompute();
                }
                SynergyEffect::WarpInvuln { secs } => {
                    self.warp_invuln_secs = Some(secs);
                }
                SynergyEffect::GuaranteedNovaFromWells => {
                    self.wells_force_nova = true;
                }
                SynergyEffect::StormGuaranteedCrits => {
                    self.storm_guaranteed_crits = true;
                }
                SynergyEffect::LaserOvercharge { damage_bonus } => {
                    self.laser_overcharge = Some(damage_bonus);
                }
                SynergyEffect::Announce => {}
            }
            events.push(GameEvent::SynergyUnlocked {
                name: def.name.to_string(),
            });
            fx.push(FxEvent::Sound {
                cue: SoundCue::Synergy,
            });
        }
    }

    /// Roll a crit for one shot. The cascade chain adds bonus chance per
    /// consecutive crit and resets on a miss.
    pub fn roll_crit(&mut self, crit_chance: f64, storm_active: bool, rng: &mut ChaCha8Rng) -> bool {
        let mut chance = crit_chance + self.specials.crit_chain as f64 * self.specials.crit_cascade_bonus;
        if self.storm_guaranteed_crits && storm_active {
            chance = 1.0;
        }
        let is_crit = rng.gen::<f64>() < chance.min(1.0);
        if self.specials.crit_cascade_bonus > 0.0 {
            if is_crit {
                self.specials.crit_chain += 1;
            } else {
                self.specials.crit_chain = 0;
            }
        }
        is_crit
    }

    /// Final per-hit damage. The Singularity multiplier applies before
    /// the crit branch; at 2.5+ crits collapse to `base*3 + bonus`.
    pub fn final_damage(&self, base: f64, is_crit: bool) -> f64 {
        let multiplier = self.specials.singularity_mult;
        let mut damage = base * multiplier;
        if is_crit {
            damage *= 2.0;
            damage += self.specials.crit_dmg_bonus;
            if multiplier >= 2.5 {
                damage = base * 3.0 + self.specials.crit_dmg_bonus;
            }
        }
        damage.round()
    }
}
