//! Run scoring and the end-of-run breakdown.

use std::collections::HashMap;

use voidrift_core::constants::*;
use voidrift_core::enums::EnemyKind;
use voidrift_core::state::{AttemptRecord, ScoreView};

#[derive(Debug, Default)]
pub struct ScoreState {
    pub score: u64,
    pub kills_by_kind: HashMap<EnemyKind, u32>,
    pub total_kills: u32,
    pub elite_kills: u32,
    pub boss_kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub perfect_waves: u32,
}

impl ScoreState {
    pub fn add_kill(&mut self, kind: EnemyKind, elite: bool) -> u64 {
        *self.kills_by_kind.entry(kind).or_insert(0) += 1;
        self.total_kills += 1;
        let points = if elite {
            self.elite_kills += 1;
            SCORE_ELITE_KILL
        } else {
            SCORE_BASIC_KILL
        };
        self.score += points;
        points
    }

    pub fn add_boss_kill(&mut self, wave: u32) -> u64 {
        self.boss_kills += 1;
        let points = SCORE_BOSS_BASE + SCORE_BOSS_PER_WAVE * wave as u64;
        self.score += points;
        points
    }

    pub fn add_perfect_wave(&mut self) -> u64 {
        self.perfect_waves += 1;
        self.score += SCORE_PERFECT_WAVE;
        SCORE_PERFECT_WAVE
    }

    /// Hit ratio in [0, 1]; 1.0 when nothing has been fired yet.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            1.0
        } else {
            self.shots_hit as f64 / self.shots_fired as f64
        }
    }

    /// Final-score multiplier lerped across the accuracy range.
    pub fn accuracy_multiplier(&self) -> f64 {
        ACCURACY_MULT_MIN + (ACCURACY_MULT_MAX - ACCURACY_MULT_MIN) * self.accuracy()
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            total_kills: self.total_kills,
            accuracy: self.accuracy(),
            perfect_waves: self.perfect_waves,
        }
    }

    /// Final breakdown for the persistence layer.
    pub fn breakdown(
        &self,
        seed: &str,
        wave: u32,
        level: u32,
        survival_secs: f64,
        best_kill_streak: u32,
    ) -> AttemptRecord {
        let survival_bonus = (survival_secs * SURVIVAL_SCORE_PER_SEC) as u64;
        let multiplier = self.accuracy_multiplier();
        let final_score = ((self.score + survival_bonus) as f64 * multiplier).floor() as u64;

        let mut kills_by_kind: Vec<(EnemyKind, u32)> = self
            .kills_by_kind
            .iter()
            .map(|(&kind, &count)| (kind, count))
            .collect();
        kills_by_kind.sort_by_key(|(kind, _)| *kind as u8);

        AttemptRecord {
            seed: seed.to_string(),
            final_score,
            base_score: self.score,
            survival_bonus,
            accuracy: self.accuracy(),
            accuracy_multiplier: multiplier,
            wave_reached: wave,
            level_reached: level,
            survival_secs,
            total_kills: self.total_kills,
            elite_kills: self.elite_kills,
            boss_kills: self.boss_kills,
            kills_by_kind,
            perfect_waves: self.perfect_waves,
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
            best_kill_streak,
        }
    }
}
