//! Scheduled one-shot actions keyed to the simulation clock.
//!
//! The original presentation layer leaned on wall-clock delayed calls;
//! here every delayed effect goes through this queue so it pauses with
//! the sim and replays identically. Fired actions re-validate their
//! target's liveness; a vanished target is a normal no-op.

use voidrift_boss::phases::AttackKind;

/// A delayed effect.
#[derive(Debug, Clone, Copy)]
pub enum TimerAction {
    /// Boss materializes after the wave announcement.
    SpawnBoss { hp: f64 },
    /// Next wave starts after a boss defeat.
    AdvanceWave,
    /// Supernova form expires: reverse its damage bonus.
    EndSupernova,
    /// Warp Strike teleports the player back.
    WarpReturn { x: f64, y: f64 },
    /// Delayed repeat cast of a boss attack.
    BossFollowUp { kind: AttackKind },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at: f64,
    action: TimerAction,
}

/// Pending scheduled actions.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn schedule(&mut self, fire_at: f64, action: TimerAction) {
        self.entries.push(Scheduled { fire_at, action });
    }

    /// Remove and return all actions due at `now`, in firing order.
    pub fn drain_due(&mut self, now: f64) -> Vec<TimerAction> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.entries.retain(|entry| {
            if entry.fire_at <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        due.into_iter().map(|entry| entry.action).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
