//! Player state: the flat/percent modifier stack, the derived attribute
//! block, and the mutable combat fields (HP, shield, position, aim).
//!
//! Every attribute derives as `base * (1 + sum_of_percents) + sum_of_flats`
//! clamped to its cap, recomputed in full on every mutation. Order of
//! acquisition never matters.

use voidrift_core::constants::*;
use voidrift_core::enums::Stat;
use voidrift_core::types::Position;

/// Base value before any modifiers.
pub fn base_value(stat: Stat) -> f64 {
    match stat {
        Stat::Damage => BASE_DAMAGE,
        Stat::FireRate => BASE_FIRE_RATE,
        Stat::Speed => BASE_SPEED,
        Stat::Shield => BASE_SHIELD,
        Stat::MaxHp => BASE_MAX_HP,
        Stat::Magnet => BASE_MAGNET,
        Stat::Crit => BASE_CRIT,
        Stat::Pierce => BASE_PIERCE,
        Stat::Spread => BASE_SPREAD,
        Stat::Cooldown => BASE_COOLDOWN,
        Stat::BlastArea => BASE_BLAST_AREA,
        Stat::LifeSteal => BASE_LIFE_STEAL,
        Stat::Luck => BASE_LUCK,
    }
}

/// Hard cap. Damage and luck are uncapped.
pub fn cap_value(stat: Stat) -> f64 {
    match stat {
        Stat::Damage | Stat::Luck => f64::INFINITY,
        Stat::FireRate => CAP_FIRE_RATE,
        Stat::Speed => CAP_SPEED,
        Stat::Shield => CAP_SHIELD,
        Stat::MaxHp => CAP_MAX_HP,
        Stat::Magnet => CAP_MAGNET,
        Stat::Crit => CAP_CRIT,
        Stat::Pierce => CAP_PIERCE,
        Stat::Spread => CAP_SPREAD,
        Stat::Cooldown => CAP_COOLDOWN,
        Stat::BlastArea => CAP_BLAST_AREA,
        Stat::LifeSteal => CAP_LIFE_STEAL,
    }
}

/// Accumulated modifiers per attribute.
#[derive(Debug, Clone, Default)]
pub struct ModifierStack {
    flat: [f64; Stat::COUNT],
    percent: [f64; Stat::COUNT],
}

impl ModifierStack {
    /// Add (or, with a negative amount, remove) a flat modifier.
    pub fn add_flat(&mut self, stat: Stat, amount: f64) {
        self.flat[stat.index()] += amount;
    }

    /// Add (or remove) a percent modifier.
    pub fn add_percent(&mut self, stat: Stat, amount: f64) {
        self.percent[stat.index()] += amount;
    }

    /// Derive one attribute's effective value.
    pub fn derive(&self, stat: Stat) -> f64 {
        let i = stat.index();
        let value = base_value(stat) * (1.0 + self.percent[i]) + self.flat[i];
        value.min(cap_value(stat)).max(0.0)
    }
}

/// The derived attribute block, recomputed after every stack mutation.
#[derive(Debug, Clone, Default)]
pub struct DerivedStats {
    pub damage: f64,
    pub fire_rate: f64,
    pub speed: f64,
    pub shield_max: f64,
    pub max_hp: f64,
    pub magnet: f64,
    pub crit_chance: f64,
    pub pierce: u32,
    pub spread: u32,
    pub cooldown: f64,
    pub blast_area: f64,
    pub life_steal: f64,
    pub luck: f64,
}

impl DerivedStats {
    pub fn from_stack(stack: &ModifierStack) -> Self {
        Self {
            damage: stack.derive(Stat::Damage),
            fire_rate: stack.derive(Stat::FireRate),
            speed: stack.derive(Stat::Speed),
            shield_max: stack.derive(Stat::Shield),
            max_hp: stack.derive(Stat::MaxHp),
            magnet: stack.derive(Stat::Magnet),
            crit_chance: stack.derive(Stat::Crit),
            pierce: stack.derive(Stat::Pierce).floor() as u32,
            spread: stack.derive(Stat::Spread).floor().max(1.0) as u32,
            cooldown: stack.derive(Stat::Cooldown),
            blast_area: stack.derive(Stat::BlastArea),
            life_steal: stack.derive(Stat::LifeSteal),
            luck: stack.derive(Stat::Luck),
        }
    }
}

/// The player's full mutable state.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub mods: ModifierStack,
    pub derived: DerivedStats,
    pub hp: f64,
    pub shield: f64,
    pub pos: Position,
    pub aim_angle: f64,
    /// Normalized movement input.
    pub move_x: f64,
    pub move_y: f64,
    pub invulnerable_until: f64,
    /// Debug toggle: the player ignores all incoming damage.
    pub god_mode: bool,
    /// Damage-dealt accumulator for life steal.
    pub lifesteal_accum: f64,
    pub kill_streak: u32,
    pub best_kill_streak: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        let mods = ModifierStack::default();
        let derived = DerivedStats::from_stack(&mods);
        let hp = derived.max_hp;
        let shield = derived.shield_max;
        Self {
            mods,
            derived,
            hp,
            shield,
            pos: Position::new(PLAYER_START_X, PLAYER_START_Y),
            aim_angle: -std::f64::consts::FRAC_PI_2,
            move_x: 0.0,
            move_y: 0.0,
            invulnerable_until: f64::NEG_INFINITY,
            god_mode: false,
            lifesteal_accum: 0.0,
            kill_streak: 0,
            best_kill_streak: 0,
        }
    }
}

impl PlayerState {
    /// Recompute derived attributes after a stack mutation and clamp the
    /// current pools to their (possibly lowered) maxima.
    pub fn recompute(&mut self) {
        self.derived = DerivedStats::from_stack(&self.mods);
        self.hp = self.hp.min(self.derived.max_hp);
        self.shield = self.shield.min(self.derived.shield_max);
    }

    pub fn heal(&mut self, amount: f64) {
        self.hp = (self.hp + amount).min(self.derived.max_hp);
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }

    pub fn grant_invulnerability(&mut self, until: f64) {
        if until > self.invulnerable_until {
            self.invulnerable_until = until;
        }
    }

    pub fn record_kill(&mut self) {
        self.kill_streak += 1;
        self.best_kill_streak = self.best_kill_streak.max(self.kill_streak);
    }
}
