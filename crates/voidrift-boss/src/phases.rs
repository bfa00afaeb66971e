//! Boss phase thresholds, attack scheduling, and projectile patterns.
//!
//! Phases only escalate: the sim clamps with `max` so healing (horn mode
//! aside) never walks a phase back. Horn mode pins phase 4 and compresses
//! every cooldown by the horn tempo.

use std::f64::consts::{FRAC_PI_2, TAU};

use voidrift_core::constants::*;

/// Phase for an HP ratio: 1 above 75%, 2 above 50%, 3 above 25%, else 4.
pub fn phase_for_hp_ratio(ratio: f64) -> u8 {
    if ratio > BOSS_PHASE2_RATIO {
        1
    } else if ratio > BOSS_PHASE3_RATIO {
        2
    } else if ratio > BOSS_PHASE4_RATIO {
        3
    } else {
        4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    /// Dual sweeping beams from the wing mounts.
    BeamSweep,
    /// 5-shot fan from the mouth.
    ConeSpray,
    /// 8-shot ring advancing a fixed step per cast.
    SpiralBurst,
    /// 16-shot full circle.
    ScreamBurst,
}

impl AttackKind {
    pub const ALL: [AttackKind; 4] = [
        AttackKind::BeamSweep,
        AttackKind::ConeSpray,
        AttackKind::SpiralBurst,
        AttackKind::ScreamBurst,
    ];
}

/// Last-fired times per attack. Fresh timers sit far in the past so every
/// unlocked attack is due immediately (matching the horn-mode reset).
#[derive(Debug, Clone, Copy)]
pub struct AttackTimers {
    last: [f64; 4],
}

impl Default for AttackTimers {
    fn default() -> Self {
        Self {
            last: [f64::NEG_INFINITY; 4],
        }
    }
}

impl AttackTimers {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn last_fired(&self, kind: AttackKind) -> f64 {
        self.last[Self::idx(kind)]
    }

    pub fn mark_fired(&mut self, kind: AttackKind, now: f64) {
        self.last[Self::idx(kind)] = now;
    }

    fn idx(kind: AttackKind) -> usize {
        match kind {
            AttackKind::BeamSweep => 0,
            AttackKind::ConeSpray => 1,
            AttackKind::SpiralBurst => 2,
            AttackKind::ScreamBurst => 3,
        }
    }
}

/// Cooldown for an attack at the given phase. `None` = not unlocked yet.
pub fn cooldown(kind: AttackKind, phase: u8, horn: bool) -> Option<f64> {
    let base = match kind {
        AttackKind::BeamSweep => Some(if phase >= 2 {
            BOSS_BEAM_COOLDOWN_P2
        } else {
            BOSS_BEAM_COOLDOWN
        }),
        AttackKind::ConeSpray if phase >= 2 => Some(if phase >= 3 {
            BOSS_CONE_COOLDOWN_P3
        } else {
            BOSS_CONE_COOLDOWN
        }),
        AttackKind::SpiralBurst if phase >= 3 => Some(BOSS_SPIRAL_COOLDOWN),
        AttackKind::ScreamBurst if phase >= 4 => Some(BOSS_SCREAM_COOLDOWN),
        _ => None,
    }?;
    Some(if horn { base / BOSS_HORN_TEMPO } else { base })
}

/// Delayed repeat casts after the main cast (high phases double/triple up).
pub fn follow_up_delays(kind: AttackKind, phase: u8) -> &'static [f64] {
    match kind {
        AttackKind::BeamSweep if phase >= 3 => &[BOSS_BEAM_FOLLOW_UP_DELAY],
        AttackKind::ConeSpray if phase >= 3 => &BOSS_CONE_FOLLOW_UP_DELAYS,
        _ => &[],
    }
}

/// All attacks whose cooldown has elapsed at `now`.
pub fn due_attacks(timers: &AttackTimers, phase: u8, horn: bool, now: f64) -> Vec<AttackKind> {
    AttackKind::ALL
        .into_iter()
        .filter(|&kind| {
            cooldown(kind, phase, horn)
                .map(|cd| now - timers.last_fired(kind) >= cd)
                .unwrap_or(false)
        })
        .collect()
}

/// Cone spray: 5 shots fanned around straight down, -30 deg to +30 deg.
pub fn cone_pattern(horn: bool) -> Vec<(f64, f64)> {
    let speed = if horn {
        BOSS_CONE_SHOT_SPEED_HORN
    } else {
        BOSS_CONE_SHOT_SPEED
    };
    (0..5)
        .map(|i| {
            let offset = (i as f64 - 2.0) * 15.0_f64.to_radians();
            (FRAC_PI_2 + offset, speed)
        })
        .collect()
}

/// Spiral burst: 8 shots evenly around the circle, offset by the
/// accumulated spiral angle. The caller advances the angle by
/// `BOSS_SPIRAL_STEP` per cast.
pub fn spiral_pattern(spiral_angle: f64, horn: bool) -> Vec<(f64, f64)> {
    let speed = if horn {
        BOSS_SPIRAL_SHOT_SPEED_HORN
    } else {
        BOSS_SPIRAL_SHOT_SPEED
    };
    (0..BOSS_SPIRAL_SHOTS)
        .map(|i| (spiral_angle + i as f64 * TAU / BOSS_SPIRAL_SHOTS as f64, speed))
        .collect()
}

/// Scream: 16 shots, full circle.
pub fn scream_pattern() -> Vec<(f64, f64)> {
    (0..BOSS_SCREAM_SHOTS)
        .map(|i| (i as f64 * TAU / BOSS_SCREAM_SHOTS as f64, BOSS_SCREAM_SHOT_SPEED))
        .collect()
}

/// Dive fan: 5 shots fanned toward the player below.
pub fn dive_fan_pattern() -> Vec<(f64, f64)> {
    (0..BOSS_DIVE_FAN_SHOTS)
        .map(|i| {
            let t = i as f64 / (BOSS_DIVE_FAN_SHOTS - 1) as f64;
            let offset = (t - 0.5) * 2.0 * BOSS_DIVE_FAN_HALF_ANGLE;
            (FRAC_PI_2 + offset, BOSS_DIVE_FAN_SHOT_SPEED)
        })
        .collect()
}

/// Hover sway x-offset for the given elapsed time.
pub fn sway_offset(elapsed_secs: f64, horn: bool) -> f64 {
    let amplitude = if horn {
        BOSS_SWAY_AMPLITUDE_HORN
    } else {
        BOSS_SWAY_AMPLITUDE
    };
    (elapsed_secs / BOSS_SWAY_PERIOD_SECS * TAU).sin() * amplitude
}
