#[cfg(test)]
mod tests {
    use voidrift_core::constants::*;
    use voidrift_core::enums::DiveStage;
    use voidrift_core::types::Position;

    use crate::dive::{self, DiveContext, DiveState};
    use crate::phases::*;

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(phase_for_hp_ratio(1.0), 1);
        assert_eq!(phase_for_hp_ratio(0.76), 1);
        assert_eq!(phase_for_hp_ratio(0.75), 2);
        assert_eq!(phase_for_hp_ratio(0.51), 2);
        assert_eq!(phase_for_hp_ratio(0.50), 3);
        assert_eq!(phase_for_hp_ratio(0.26), 3);
        assert_eq!(phase_for_hp_ratio(0.25), 4);
        assert_eq!(phase_for_hp_ratio(0.0), 4);
    }

    /// The sim clamps with `max`, so a heal mid-fight never lowers phase.
    #[test]
    fn test_phase_monotone_under_max_clamp() {
        let mut phase = 1u8;
        for ratio in [0.9, 0.6, 0.4, 0.55, 0.2, 0.8] {
            phase = phase.max(phase_for_hp_ratio(ratio));
        }
        assert_eq!(phase, 4);
    }

    #[test]
    fn test_attack_unlock_by_phase() {
        assert!(cooldown(AttackKind::BeamSweep, 1, false).is_some());
        assert!(cooldown(AttackKind::ConeSpray, 1, false).is_none());
        assert!(cooldown(AttackKind::ConeSpray, 2, false).is_some());
        assert!(cooldown(AttackKind::SpiralBurst, 2, false).is_none());
        assert!(cooldown(AttackKind::SpiralBurst, 3, false).is_some());
        assert!(cooldown(AttackKind::ScreamBurst, 3, false).is_none());
        assert!(cooldown(AttackKind::ScreamBurst, 4, false).is_some());
    }

    #[test]
    fn test_cooldowns_shorten_with_phase_and_horn() {
        let beam1 = cooldown(AttackKind::BeamSweep, 1, false).unwrap();
        let beam2 = cooldown(AttackKind::BeamSweep, 2, false).unwrap();
        assert!(beam2 < beam1);

        let cone2 = cooldown(AttackKind::ConeSpray, 2, false).unwrap();
        let cone3 = cooldown(AttackKind::ConeSpray, 3, false).unwrap();
        assert!(cone3 < cone2);

        let normal = cooldown(AttackKind::ScreamBurst, 4, false).unwrap();
        let horn = cooldown(AttackKind::ScreamBurst, 4, true).unwrap();
        assert!((horn - normal / BOSS_HORN_TEMPO).abs() < 1e-10);
    }

    #[test]
    fn test_fresh_timers_fire_immediately() {
        let timers = AttackTimers::default();
        let due = due_attacks(&timers, 4, false, 0.0);
        assert_eq!(due.len(), 4);

        let mut timers = AttackTimers::default();
        timers.mark_fired(AttackKind::BeamSweep, 0.0);
        let due = due_attacks(&timers, 1, false, 1.0);
        assert!(due.is_empty());
        let due = due_attacks(&timers, 1, false, BOSS_BEAM_COOLDOWN);
        assert_eq!(due, vec![AttackKind::BeamSweep]);
    }

    #[test]
    fn test_follow_up_casts() {
        assert!(follow_up_delays(AttackKind::BeamSweep, 2).is_empty());
        assert_eq!(follow_up_delays(AttackKind::BeamSweep, 3).len(), 1);
        assert!(follow_up_delays(AttackKind::ConeSpray, 2).is_empty());
        assert_eq!(follow_up_delays(AttackKind::ConeSpray, 3).len(), 2);
        assert!(follow_up_delays(AttackKind::ScreamBurst, 4).is_empty());
    }

    #[test]
    fn test_patterns() {
        let cone = cone_pattern(false);
        assert_eq!(cone.len(), 5);
        // Symmetric around straight down
        let down = std::f64::consts::FRAC_PI_2;
        assert!((cone[2].0 - down).abs() < 1e-10);
        assert!((cone[0].0 + cone[4].0 - 2.0 * down).abs() < 1e-10);

        let horn_cone = cone_pattern(true);
        assert!(horn_cone[0].1 > cone[0].1);

        assert_eq!(spiral_pattern(0.0, false).len(), BOSS_SPIRAL_SHOTS as usize);
        let a = spiral_pattern(0.0, false);
        let b = spiral_pattern(BOSS_SPIRAL_STEP, false);
        assert!((b[0].0 - a[0].0 - BOSS_SPIRAL_STEP).abs() < 1e-10);

        assert_eq!(scream_pattern().len(), BOSS_SCREAM_SHOTS as usize);
        assert_eq!(dive_fan_pattern().len(), BOSS_DIVE_FAN_SHOTS as usize);
    }

    #[test]
    fn test_sway_amplitude() {
        // Peak of the sine at a quarter period
        let quarter = BOSS_SWAY_PERIOD_SECS / 4.0;
        assert!((sway_offset(quarter, false) - BOSS_SWAY_AMPLITUDE).abs() < 1e-6);
        assert!((sway_offset(quarter, true) - BOSS_SWAY_AMPLITUDE_HORN).abs() < 1e-6);
    }

    fn run_dive(state: &mut DiveState, ticks: u32, phase: u8, start: f64) -> (u32, u32, u32) {
        let dt = DT;
        let hover = Position::new(ARENA_WIDTH / 2.0, BOSS_HOVER_Y);
        let mut pos = hover;
        let (mut fans, mut pauses, mut resumes) = (0, 0, 0);
        for i in 0..ticks {
            let ctx = DiveContext {
                now: start + i as f64 * dt,
                dt,
                phase,
                player_x: 200.0,
                pos,
                hover,
            };
            let update = dive::advance(state, &ctx);
            if let Some(p) = update.new_pos {
                pos = p;
            }
            fans += update.fire_fan as u32;
            pauses += update.sway_pause as u32;
            resumes += update.sway_resume as u32;
        }
        (fans, pauses, resumes)
    }

    #[test]
    fn test_dive_requires_phase_two() {
        let mut state = DiveState::new(0.0);
        let (fans, pauses, _) = run_dive(&mut state, 600, 1, 0.0);
        assert_eq!(state.stage, DiveStage::Idle);
        assert_eq!(fans, 0);
        assert_eq!(pauses, 0);
    }

    #[test]
    fn test_dive_full_cycle() {
        let mut state = DiveState::new(0.0);
        // Enough ticks for one complete dive
        let total = BOSS_DIVE_WARNING_SECS
            + BOSS_DIVE_TRACKING_SECS
            + BOSS_DIVE_DESCENT_SECS
            + BOSS_DIVE_RETURN_SECS;
        let ticks = (total / DT) as u32 + 10;
        let (fans, pauses, resumes) = run_dive(&mut state, ticks, 2, 0.0);
        assert_eq!(fans, 1, "fan fires exactly once per dive");
        assert_eq!(pauses, 1);
        assert_eq!(resumes, 1);
        assert_eq!(state.stage, DiveStage::Idle);
        // Interval re-armed
        assert!(state.next_at > total);
    }

    #[test]
    fn test_dive_tracks_player_before_plunge() {
        let mut state = DiveState::new(0.0);
        let ticks =
            ((BOSS_DIVE_WARNING_SECS + BOSS_DIVE_TRACKING_SECS) / DT) as u32 + 2;
        run_dive(&mut state, ticks, 3, 0.0);
        assert_eq!(state.stage, DiveStage::Diving);
        // Glided toward player_x = 200 from arena center
        assert!(state.target_x < ARENA_WIDTH / 2.0);
    }

    #[test]
    fn test_dive_reset_rearms() {
        let mut state = DiveState::new(0.0);
        run_dive(&mut state, 120, 2, 0.0);
        assert_ne!(state.stage, DiveStage::Idle);
        state.reset(100.0);
        assert_eq!(state.stage, DiveStage::Idle);
        assert!((state.next_at - (100.0 + BOSS_DIVE_INTERVAL)).abs() < 1e-10);
    }
}
