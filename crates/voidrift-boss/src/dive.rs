//! Dive choreography: warning → tracking → diving → returning.
//!
//! Unlocked at phase 2. The dive owns the boss position for its whole
//! duration; the hover sway is paused on start and resumed on finish
//! through the `sway_pause_delta` counter the sim maintains.

use voidrift_core::constants::*;
use voidrift_core::enums::DiveStage;
use voidrift_core::types::Position;

#[derive(Debug, Clone, Copy)]
pub struct DiveState {
    pub stage: DiveStage,
    /// Seconds elapsed in the current stage.
    pub elapsed: f64,
    /// Earliest time the next dive may start.
    pub next_at: f64,
    /// X locked in when the plunge commits.
    pub target_x: f64,
    fan_fired: bool,
}

impl DiveState {
    pub fn new(first_at: f64) -> Self {
        Self {
            stage: DiveStage::Idle,
            elapsed: 0.0,
            next_at: first_at,
            target_x: 0.0,
            fan_fired: false,
        }
    }

    /// Reset to idle with the interval re-armed (horn-mode reset).
    pub fn reset(&mut self, now: f64) {
        self.stage = DiveStage::Idle;
        self.elapsed = 0.0;
        self.next_at = now + BOSS_DIVE_INTERVAL;
        self.fan_fired = false;
    }
}

/// Per-tick input to the dive machine.
pub struct DiveContext {
    pub now: f64,
    pub dt: f64,
    /// Boss phase; dives require phase 2+.
    pub phase: u8,
    pub player_x: f64,
    /// Current boss position.
    pub pos: Position,
    /// Hover point to return to.
    pub hover: Position,
}

/// Per-tick output.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiveUpdate {
    /// Position override while the dive owns movement.
    pub new_pos: Option<Position>,
    /// Fire the 5-shot fan this tick (once per dive, at 80% descent).
    pub fire_fan: bool,
    /// Dive started this tick: pause the hover sway.
    pub sway_pause: bool,
    /// Dive finished this tick: resume the hover sway.
    pub sway_resume: bool,
    /// Warning stage started: shake/flash cue.
    pub warn_fx: bool,
}

fn ease_in(t: f64) -> f64 {
    t * t
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Advance the dive machine by one tick.
pub fn advance(state: &mut DiveState, ctx: &DiveContext) -> DiveUpdate {
    let mut update = DiveUpdate::default();

    match state.stage {
        DiveStage::Idle => {
            if ctx.phase >= 2 && ctx.now >= state.next_at {
                state.stage = DiveStage::Warning;
                state.elapsed = 0.0;
                state.fan_fired = false;
                update.sway_pause = true;
                update.warn_fx = true;
            }
        }
        DiveStage::Warning => {
            state.elapsed += ctx.dt;
            if state.elapsed >= BOSS_DIVE_WARNING_SECS {
                state.stage = DiveStage::Tracking;
                state.elapsed = 0.0;
            }
        }
        DiveStage::Tracking => {
            state.elapsed += ctx.dt;
            // Glide horizontally toward the player before committing
            let dx = ctx.player_x - ctx.pos.x;
            let step = BOSS_DIVE_TRACK_SPEED * ctx.dt;
            let x = if dx.abs() <= step {
                ctx.player_x
            } else {
                ctx.pos.x + step * dx.signum()
            };
            update.new_pos = Some(Position::new(x, ctx.pos.y));
            if state.elapsed >= BOSS_DIVE_TRACKING_SECS {
                state.stage = DiveStage::Diving;
                state.elapsed = 0.0;
                state.target_x = x;
            }
        }
        DiveStage::Diving => {
            state.elapsed += ctx.dt;
            let progress = (state.elapsed / BOSS_DIVE_DESCENT_SECS).min(1.0);
            let y = ctx.hover.y + (BOSS_DIVE_TARGET_Y - ctx.hover.y) * ease_in(progress);
            update.new_pos = Some(Position::new(state.target_x, y));
            if progress >= BOSS_DIVE_FAN_AT && !state.fan_fired {
                state.fan_fired = true;
                update.fire_fan = true;
            }
            if progress >= 1.0 {
                state.stage = DiveStage::Returning;
                state.elapsed = 0.0;
            }
        }
        DiveStage::Returning => {
            state.elapsed += ctx.dt;
            let progress = (state.elapsed / BOSS_DIVE_RETURN_SECS).min(1.0);
            let t = ease_out(progress);
            let x = state.target_x + (ctx.hover.x - state.target_x) * t;
            let y = BOSS_DIVE_TARGET_Y + (ctx.hover.y - BOSS_DIVE_TARGET_Y) * t;
            update.new_pos = Some(Position::new(x, y));
            if progress >= 1.0 {
                state.stage = DiveStage::Idle;
                state.elapsed = 0.0;
                state.next_at = ctx.now + BOSS_DIVE_INTERVAL;
                update.sway_resume = true;
            }
        }
    }

    update
}
