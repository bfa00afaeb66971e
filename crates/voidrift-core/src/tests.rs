#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::commands::PlayerCommand;
    use crate::config::synergies::synergy_table;
    use crate::config::upgrades::{catalog, SpecialEffect, ARSENAL_IDS};
    use crate::config::waves::{authored_waves, escalation_config, EnemyArchetype, WaveConfig};
    use crate::enums::*;
    use crate::events::{FxEvent, GameEvent, SoundCue};
    use crate::state::GameStateSnapshot;
    use crate::types::{Position, SimTime, Velocity};

    #[test]
    fn test_position_geometry() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.manhattan_to(&b) - 7.0).abs() < 1e-10);
        // y points down, so straight down is +PI/2
        let below = Position::new(0.0, 10.0);
        assert!((a.angle_to(&below) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    }

    #[test]
    fn test_velocity_from_angle() {
        let v = Velocity::from_angle(0.0, 100.0);
        assert!((v.x - 100.0).abs() < 1e-10);
        assert!(v.y.abs() < 1e-10);
        assert!((v.speed() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        // 60 ticks at 60Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartRun,
            PlayerCommand::SetMoveInput { x: 1.0, y: -0.5 },
            PlayerCommand::SetAimAngle { angle: 1.2 },
            PlayerCommand::ChooseCard { index: 2 },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_event_serde() {
        let events = vec![
            GameEvent::WaveStarted { wave: 3, boss: false },
            GameEvent::EnemyKilled {
                kind: EnemyKind::Weaver,
                elite: true,
                x: 10.0,
                y: 20.0,
                points: 50,
            },
            GameEvent::BossPhaseChanged { phase: 3 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: GameEvent = serde_json::from_str(&json).unwrap();
        }
        let fx = FxEvent::Sound {
            cue: SoundCue::BossRoar,
        };
        let json = serde_json::to_string(&fx).unwrap();
        let _back: FxEvent = serde_json::from_str(&json).unwrap();
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
    }

    #[test]
    fn test_archetype_table() {
        for kind in EnemyKind::ALL {
            let stats = EnemyArchetype::of(kind);
            assert!(stats.hp > 0.0);
            assert!(stats.speed > 0.0);
            assert!(stats.xp > 0);
        }
        // Divers and bombers never fire
        assert!(EnemyArchetype::of(EnemyKind::Diver).fire_interval.is_infinite());
        assert!(EnemyArchetype::of(EnemyKind::Bomber).fire_interval.is_infinite());
    }

    #[test]
    fn test_authored_waves() {
        let waves = authored_waves();
        assert_eq!(waves.len(), 15);
        // Waves 10 and 15 are boss-gated
        assert_eq!(waves[9].boss_hp, Some(2000.0));
        assert_eq!(waves[9].duration, 0.0);
        assert_eq!(waves[14].boss_hp, Some(3500.0));
        assert_eq!(waves[14].duration, 0.0);
        for w in &waves {
            assert!(!w.pool.is_empty());
            assert!(w.spawn_interval > 0.0);
            assert!(w.boss_hp.is_some() || w.duration > 0.0);
        }
    }

    #[test]
    fn test_escalation_config() {
        let w16 = escalation_config(16);
        assert!((w16.hp_multiplier - 1.1).abs() < 1e-10);
        assert!(w16.boss_hp.is_none());

        // Every 5th wave is a boss wave with scaling HP
        let w20 = escalation_config(20);
        assert_eq!(w20.boss_hp, Some(600.0 + 10.0 * 40.0));
        assert_eq!(w20.duration, 0.0);

        // min_alive caps at 30, interval floors at 0.4s
        let w99 = escalation_config(99);
        assert_eq!(w99.min_alive, 30);
        assert!((w99.spawn_interval - 0.4).abs() < 1e-10);

        // for_wave dispatches authored vs escalation
        assert_eq!(WaveConfig::for_wave(10).boss_hp, Some(2000.0));
        assert!(WaveConfig::for_wave(16).boss_hp.is_none());
    }

    #[test]
    fn test_upgrade_catalog_integrity() {
        let cat = catalog();
        let mut ids = HashSet::new();
        for def in &cat {
            assert!(ids.insert(def.id), "duplicate upgrade id {}", def.id);
            assert_eq!(
                def.levels.len(),
                def.max_level as usize,
                "{}: level count mismatch",
                def.id
            );
            if def.kind == UpgradeType::Weapon {
                assert!(def.weapon.is_some(), "{}: weapon upgrade without id", def.id);
            }
            if def.kind == UpgradeType::Cosmic {
                assert_eq!(def.max_level, 1, "{}: cosmics are one-shot", def.id);
            }
        }
        // Arsenal grants only real weapon upgrades
        for id in ARSENAL_IDS {
            let def = cat.iter().find(|d| d.id == id).expect(id);
            assert!(def.weapon.is_some());
        }
    }

    #[test]
    fn test_heal_upgrade_shape() {
        let cat = catalog();
        let heal = cat.iter().find(|d| d.id == "G05").unwrap();
        for level in &heal.levels {
            assert_eq!(level.special, Some(SpecialEffect::Heal));
            assert!(level.stats.is_empty());
        }
    }

    #[test]
    fn test_rarity_weights_and_gates() {
        assert!(Rarity::Grey.base_weight() > Rarity::Gold.base_weight());
        assert_eq!(Rarity::Red.min_wave(), 3);
        assert_eq!(Rarity::Gold.min_wave(), 5);
        assert_eq!(Rarity::Grey.min_wave(), 1);
        // Luck shifts toward higher tiers most strongly at green
        assert!(Rarity::Green.luck_coefficient() > Rarity::Gold.luck_coefficient());
    }

    #[test]
    fn test_synergy_table() {
        let table = synergy_table();
        assert_eq!(table.len(), 8);
        let names: HashSet<_> = table.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 8);
        // The wildcard pair is rarity-matched
        let transcendence = table.iter().find(|s| s.name == "Transcendence").unwrap();
        assert!(matches!(
            transcendence.first,
            crate::config::synergies::SynergyKey::AnyOfRarity(Rarity::Red)
        ));
    }

    #[test]
    fn test_main_gun_overrides() {
        assert!(WeaponId::TwinLaser.overrides_main_gun());
        assert!(WeaponId::PhotonDevastator.overrides_main_gun());
        assert!(!WeaponId::SpreadCannon.overrides_main_gun());
    }
}
