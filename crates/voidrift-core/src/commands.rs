//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new run (from the menu or a finished run).
    StartRun,
    /// Set the movement input direction. Normalized internally;
    /// `(0, 0)` = stop.
    SetMoveInput { x: f64, y: f64 },
    /// Set the main-gun aim angle (radians).
    SetAimAngle { angle: f64 },
    /// Pick one of the offered level-up cards.
    ChooseCard { index: usize },
    Pause,
    Resume,
    /// Return to the main menu from a finished run.
    ReturnToMenu,
}
