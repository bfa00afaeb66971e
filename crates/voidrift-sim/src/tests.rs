use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voidrift_core::commands::PlayerCommand;
use voidrift_core::components::{BehaviorState, Dead, Enemy, PlayerShot, XpOrb};
use voidrift_core::constants::*;
use voidrift_core::enums::{DiveStage, GamePhase, MusicPhase, Rarity, Stat, WeaponId};
use voidrift_core::events::{FxEvent, GameEvent};
use voidrift_core::types::{Position, Velocity};

use crate::engine::GameEngine;
use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::systems::boss::{boss_system, BossEncounter};
use crate::systems::collision::collision_system;
use crate::systems::damage::{
    damage_enemies_in_radius, damage_enemy, damage_player, DamageOutcome, KillCtx,
    PlayerHitOutcome,
};
use crate::systems::leveling::{leveling_system, XpState};
use crate::systems::wave_spawner::{elite_stats, wave_spawner_system, WaveState};
use crate::systems::weapons::{vortex, WeaponRegistry};
use crate::timers::{TimerAction, TimerQueue};
use crate::upgrades::UpgradeLedger;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn spawn_test_enemy(world: &mut World, pos: Position, hp: f64, shield: u32) -> hecs::Entity {
    world.spawn((
        pos,
        Velocity::default(),
        Enemy {
            kind: voidrift_core::enums::EnemyKind::Grunt,
            hp,
            max_hp: hp,
            shield,
            speed: 90.0,
            is_elite: false,
            spawned_at: 0.0,
            fire_interval: f64::INFINITY,
            next_fire_at: f64::INFINITY,
        },
        BehaviorState::Chase,
    ))
}

macro_rules! kill_ctx {
    ($rng:expr, $player:expr, $ledger:expr, $score:expr, $events:expr, $fx:expr) => {
        KillCtx {
            now: 0.0,
            rng: &mut $rng,
            player: &mut $player,
            ledger: &$ledger,
            score: &mut $score,
            events: &mut $events,
            fx: &mut $fx,
            nebula: None,
            force_nova: false,
            nova_queue: Vec::new(),
        }
    };
}

#[test]
fn same_seed_same_run() {
    let mut a = GameEngine::new("weekly-7");
    let mut b = GameEngine::new("weekly-7");
    for engine in [&mut a, &mut b] {
        engine.queue_command(PlayerCommand::StartRun);
        engine.queue_command(PlayerCommand::SetMoveInput { x: 0.6, y: -0.3 });
    }
    let mut last_a = None;
    let mut last_b = None;
    for _ in 0..300 {
        last_a = Some(a.tick());
        last_b = Some(b.tick());
    }
    let json_a = serde_json::to_string(&last_a).unwrap();
    let json_b = serde_json::to_string(&last_b).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn run_starts_on_wave_one() {
    let mut engine = GameEngine::new("seed");
    engine.queue_command(PlayerCommand::StartRun);
    let snapshot = engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(snapshot.wave, 1);
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::RunStarted { .. })));
}

#[test]
fn modifier_stack_derivation_and_caps() {
    let mut player = PlayerState::default();
    player.mods.add_percent(Stat::Speed, 0.5);
    player.mods.add_flat(Stat::Speed, 100.0);
    player.recompute();
    // 450 * 1.5 + 100 = 775, capped at 700
    assert_eq!(player.derived.speed, CAP_SPEED);

    player.mods.add_percent(Stat::Speed, -0.5);
    player.mods.add_flat(Stat::Speed, -100.0);
    player.recompute();
    assert_eq!(player.derived.speed, BASE_SPEED);
}

#[test]
fn upgrade_levels_replace_not_stack() {
    let mut ledger = UpgradeLedger::default();
    let mut player = PlayerState::default();
    let mut weapons = WeaponRegistry::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let idx = ledger
        .catalog()
        .iter()
        .position(|d| d.id == "G01")
        .unwrap();
    for _ in 0..3 {
        ledger.apply(idx, &mut player, &mut weapons, &mut timers, &mut events, &mut fx, 0.0);
    }
    assert_eq!(ledger.level("G01"), 3);
    // Level 3 is +25%, not the sum of all three levels
    assert!((player.derived.speed - BASE_SPEED * 1.25).abs() < 1e-9);
}

#[test]
fn hull_patch_heals_and_stays_offerable() {
    let mut ledger = UpgradeLedger::default();
    let mut player = PlayerState::default();
    player.hp = 3.0;
    let mut weapons = WeaponRegistry::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let idx = ledger
        .catalog()
        .iter()
        .position(|d| d.id == "G05")
        .unwrap();
    ledger.apply(idx, &mut player, &mut weapons, &mut timers, &mut events, &mut fx, 0.0);
    assert_eq!(player.hp, 4.0);
    assert_eq!(ledger.level("G05"), 0);
}

#[test]
fn galactic_arsenal_unlocks_all_weapons() {
    let mut ledger = UpgradeLedger::default();
    let mut player = PlayerState::default();
    let mut weapons = WeaponRegistry::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let idx = ledger
        .catalog()
        .iter()
        .position(|d| d.id == "Au04")
        .unwrap();
    ledger.apply(idx, &mut player, &mut weapons, &mut timers, &mut events, &mut fx, 0.0);
    // Main gun plus the 11 arsenal weapons
    assert_eq!(weapons.slots.len(), 12);
    assert_eq!(weapons.level_of(WeaponId::SpreadCannon), 1);
    // Owning red and gold upgrades at once trips the wildcard synergy
    assert!(ledger.synergies().contains(&"Transcendence"));
    assert!(ledger.synergies().contains(&"Swarm Protocol"));
}

#[test]
fn crit_formula_with_singularity_tier() {
    let mut ledger = UpgradeLedger::default();
    assert_eq!(ledger.final_damage(10.0, false), 10.0);
    assert_eq!(ledger.final_damage(10.0, true), 20.0);

    ledger.specials.crit_dmg_bonus = 5.0;
    assert_eq!(ledger.final_damage(10.0, true), 25.0);

    ledger.specials.singularity_mult = 2.0;
    // 10 * 2 * 2 + 5
    assert_eq!(ledger.final_damage(10.0, true), 45.0);

    ledger.specials.singularity_mult = 2.5;
    // At x2.5 the crit branch collapses to base * 3 + bonus
    assert_eq!(ledger.final_damage(10.0, true), 35.0);
    assert_eq!(ledger.final_damage(10.0, false), 25.0);
}

#[test]
fn supernova_boosts_the_damage_stat_not_the_crit_branch() {
    let mut ledger = UpgradeLedger::default();
    let mut player = PlayerState::default();
    let mut weapons = WeaponRegistry::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let idx = ledger
        .catalog()
        .iter()
        .position(|d| d.id == "Au02")
        .unwrap();
    ledger.apply(idx, &mut player, &mut weapons, &mut timers, &mut events, &mut fx, 0.0);

    // +500% lands on the stat stack, so crits still double normally
    assert_eq!(player.derived.damage, BASE_DAMAGE * 6.0);
    assert_eq!(ledger.final_damage(10.0, false), 10.0);
    assert_eq!(ledger.final_damage(10.0, true), 20.0);
    assert!(player.is_invulnerable(19.9));
    assert_eq!(timers.len(), 1);
}

#[test]
fn cosmic_rebirth_boosts_blast_area_not_max_hp() {
    let mut ledger = UpgradeLedger::default();
    let mut player = PlayerState::default();
    player.hp = 1.0;
    let mut weapons = WeaponRegistry::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let idx = ledger
        .catalog()
        .iter()
        .position(|d| d.id == "Au01")
        .unwrap();
    ledger.apply(idx, &mut player, &mut weapons, &mut timers, &mut events, &mut fx, 0.0);

    assert!((player.derived.blast_area - BASE_BLAST_AREA * 1.30).abs() < 1e-9);
    assert_eq!(player.derived.max_hp, BASE_MAX_HP);
    assert_eq!(player.hp, BASE_MAX_HP);
    assert!((player.derived.damage - BASE_DAMAGE * 1.30).abs() < 1e-9);
}

#[test]
fn crit_cascade_chain_grows_and_resets() {
    let mut ledger = UpgradeLedger::default();
    ledger.specials.crit_cascade_bonus = 0.1;
    let mut rng = test_rng();
    // Guaranteed crits keep growing the chain
    assert!(ledger.roll_crit(1.0, false, &mut rng));
    assert!(ledger.roll_crit(1.0, false, &mut rng));
    assert_eq!(ledger.specials.crit_chain, 2);
    // A guaranteed miss resets it
    assert!(!ledger.roll_crit(-1.0, false, &mut rng));
    assert_eq!(ledger.specials.crit_chain, 0);
}

#[test]
fn card_draw_respects_rarity_gates() {
    let ledger = UpgradeLedger::default();
    let mut rng = test_rng();
    for _ in 0..20 {
        let offers = ledger.draw_cards(1, 0.0, &mut rng);
        assert_eq!(offers.len(), 3);
        let mut ids: Vec<&str> = offers
            .iter()
            .map(|o| ledger.catalog()[o.catalog_idx].id)
            .collect();
        for offer in &offers {
            let rarity = ledger.catalog()[offer.catalog_idx].rarity;
            assert!(rarity != Rarity::Red && rarity != Rarity::Gold);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3, "draws must be without replacement");
    }
}

#[test]
fn maxed_catalog_draws_nothing() {
    let mut ledger = UpgradeLedger::default();
    let maxed: Vec<(&'static str, u8)> = ledger
        .catalog()
        .iter()
        .map(|d| (d.id, d.max_level))
        .collect();
    for (id, level) in maxed {
        ledger.set_level(id, level);
    }
    let mut rng = test_rng();
    assert!(ledger.draw_cards(99, 0.0, &mut rng).is_empty());
}

#[test]
fn area_kill_runs_one_chain_per_enemy() {
    let mut world = World::new();
    for i in 0..3 {
        spawn_test_enemy(&mut world, Position::new(i as f64 * 10.0, 0.0), 5.0, 0);
    }
    let mut rng = test_rng();
    let mut player = PlayerState::default();
    let ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut ctx = kill_ctx!(rng, player, ledger, score, events, fx);

    let hits = damage_enemies_in_radius(&mut world, Position::new(0.0, 0.0), 100.0, 999.0, &mut ctx);
    assert_eq!(hits, 3);
    assert_eq!(score.total_kills, 3);
    assert_eq!(world.query::<&XpOrb>().iter().count(), 3);
    let kill_events = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count();
    assert_eq!(kill_events, 3);
}

#[test]
fn cluster_tie_goes_to_first_candidate() {
    let mut world = World::new();
    let first = Position::new(100.0, 100.0);
    spawn_test_enemy(&mut world, first, 10.0, 0);
    spawn_test_enemy(&mut world, Position::new(800.0, 800.0), 10.0, 0);
    // Both singleton clusters count one; the scan keeps the first
    let target = vortex::cluster_target(&world, None);
    assert_eq!(target.map(|p| (p.x, p.y)), Some((first.x, first.y)));
}

#[test]
fn timer_queue_fires_in_order_and_retains_rest() {
    let mut timers = TimerQueue::default();
    timers.schedule(2.0, TimerAction::AdvanceWave);
    timers.schedule(1.0, TimerAction::EndSupernova);
    timers.schedule(5.0, TimerAction::AdvanceWave);
    let due = timers.drain_due(3.0);
    assert_eq!(due.len(), 2);
    assert!(matches!(due[0], TimerAction::EndSupernova));
    assert!(matches!(due[1], TimerAction::AdvanceWave));
    assert_eq!(timers.len(), 1);
}

#[test]
fn enemy_shield_absorbs_whole_hits() {
    let mut world = World::new();
    let enemy = spawn_test_enemy(&mut world, Position::new(0.0, 0.0), 10.0, 1);
    let mut rng = test_rng();
    let mut player = PlayerState::default();
    let ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut ctx = kill_ctx!(rng, player, ledger, score, events, fx);

    assert_eq!(
        damage_enemy(&mut world, enemy, 999.0, false, &mut ctx),
        DamageOutcome::Absorbed
    );
    assert_eq!(
        damage_enemy(&mut world, enemy, 5.0, false, &mut ctx),
        DamageOutcome::Damaged
    );
    assert_eq!(
        damage_enemy(&mut world, enemy, 5.0, false, &mut ctx),
        DamageOutcome::Killed
    );
    // Exactly once: the dead enemy absorbs nothing further
    assert_eq!(
        damage_enemy(&mut world, enemy, 5.0, false, &mut ctx),
        DamageOutcome::Gone
    );
    assert_eq!(score.total_kills, 1);
    assert_eq!(world.query::<&XpOrb>().iter().count(), 1);
}

#[test]
fn player_shield_then_hull_then_invuln() {
    let mut world = World::new();
    let mut player = PlayerState::default();
    let mut ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut damage_taken = false;
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut rng = test_rng();

    let outcome = damage_player(
        &mut world, &mut player, &mut ledger, &mut score, &mut damage_taken,
        &mut events, &mut fx, &mut rng, 0.0,
    );
    assert_eq!(outcome, PlayerHitOutcome::ShieldAbsorbed);
    assert_eq!(player.hp, BASE_MAX_HP);
    assert!(damage_taken);

    // Within the invulnerability window nothing lands
    let outcome = damage_player(
        &mut world, &mut player, &mut ledger, &mut score, &mut damage_taken,
        &mut events, &mut fx, &mut rng, 0.5,
    );
    assert_eq!(outcome, PlayerHitOutcome::Ignored);

    let outcome = damage_player(
        &mut world, &mut player, &mut ledger, &mut score, &mut damage_taken,
        &mut events, &mut fx, &mut rng, 2.0,
    );
    assert_eq!(outcome, PlayerHitOutcome::Damaged);
    assert_eq!(player.hp, BASE_MAX_HP - 1.0);
}

#[test]
fn god_mode_ignores_all_hits() {
    let mut world = World::new();
    let mut player = PlayerState::default();
    player.god_mode = true;
    player.shield = 0.0;
    let mut ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut damage_taken = false;
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut rng = test_rng();

    let outcome = damage_player(
        &mut world, &mut player, &mut ledger, &mut score, &mut damage_taken,
        &mut events, &mut fx, &mut rng, 0.0,
    );
    assert_eq!(outcome, PlayerHitOutcome::Ignored);
    assert_eq!(player.hp, BASE_MAX_HP);
    assert!(!damage_taken);
}

#[test]
fn undying_protocol_revives_once() {
    let mut world = World::new();
    let mut player = PlayerState::default();
    player.hp = 1.0;
    player.shield = 0.0;
    let mut ledger = UpgradeLedger::default();
    ledger.specials.undying_available = true;
    ledger.specials.undying_hp = 2.0;
    ledger.specials.undying_invuln_secs = 1.0;
    let mut score = ScoreState::default();
    let mut damage_taken = false;
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut rng = test_rng();

    let outcome = damage_player(
        &mut world, &mut player, &mut ledger, &mut score, &mut damage_taken,
        &mut events, &mut fx, &mut rng, 0.0,
    );
    assert_eq!(outcome, PlayerHitOutcome::Revived);
    assert_eq!(player.hp, 2.0);
    assert!(!ledger.specials.undying_available);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayerRevived { .. })));
}

#[test]
fn pierce_budget_spends_the_shot() {
    let mut world = World::new();
    spawn_test_enemy(&mut world, Position::new(0.0, 0.0), 100.0, 0);
    spawn_test_enemy(&mut world, Position::new(10.0, 0.0), 100.0, 0);
    let shot = world.spawn((
        Position::new(0.0, 0.0),
        Velocity::new(PLAYER_SHOT_SPEED, 0.0),
        PlayerShot {
            damage: 5.0,
            is_crit: false,
            pierce: 1,
            pierce_used: 0,
            hit_ids: Vec::new(),
        },
    ));
    let mut boss = None;
    let mut player = PlayerState::default();
    let mut ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut damage_taken = false;
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut rng = test_rng();

    collision_system(
        &mut world, &mut boss, &mut player, &mut ledger, &mut score, &mut damage_taken,
        &mut events, &mut fx, &mut rng, None, 0.0,
    );

    // One pierce point: two enemies hit, then the shot is spent
    assert_eq!(score.shots_hit, 1);
    assert!(world.get::<&Dead>(shot).is_ok());
    let damaged = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, e)| e.hp < e.max_hp)
        .count();
    assert_eq!(damaged, 2);
}

#[test]
fn floor_spawn_rearms_the_interval() {
    let mut world = World::new();
    let mut waves = WaveState::default();
    let mut score = ScoreState::default();
    let mut rng = test_rng();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    waves.start(1, 0.0, &mut timers, &mut events, &mut fx);

    // One short of the floor; the top-up lands just before the interval
    spawn_test_enemy(&mut world, Position::new(500.0, 500.0), 10.0, 0);
    wave_spawner_system(
        &mut world, &mut waves, &mut score, &mut rng, Position::new(540.0, 960.0),
        &mut timers, &mut events, &mut fx, 3.49,
    );
    assert_eq!(world.query::<&Enemy>().iter().count(), 2);

    // The top-up reset the timer, so the interval spawn must not fire
    wave_spawner_system(
        &mut world, &mut waves, &mut score, &mut rng, Position::new(540.0, 960.0),
        &mut timers, &mut events, &mut fx, 3.50,
    );
    assert_eq!(world.query::<&Enemy>().iter().count(), 2);
}

#[test]
fn perfect_wave_bonus_awarded_once() {
    let mut world = World::new();
    let mut waves = WaveState::default();
    let mut score = ScoreState::default();
    let mut rng = test_rng();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    waves.start(1, 0.0, &mut timers, &mut events, &mut fx);
    let duration = waves.cfg.duration;

    // No damage taken: duration expiry pays the bonus and advances
    wave_spawner_system(
        &mut world, &mut waves, &mut score, &mut rng, Position::new(540.0, 960.0),
        &mut timers, &mut events, &mut fx, duration,
    );
    assert_eq!(waves.wave, 2);
    assert_eq!(score.perfect_waves, 1);
    assert_eq!(score.score, SCORE_PERFECT_WAVE);

    // A damaged wave pays nothing
    waves.damage_taken = true;
    let now = duration + waves.cfg.duration;
    wave_spawner_system(
        &mut world, &mut waves, &mut score, &mut rng, Position::new(540.0, 960.0),
        &mut timers, &mut events, &mut fx, now,
    );
    assert_eq!(waves.wave, 3);
    let bonuses = events
        .iter()
        .filter(|e| matches!(e, GameEvent::PerfectWave { .. }))
        .count();
    assert_eq!(bonuses, 1);
}

#[test]
fn elite_stats_are_rounded() {
    // 16.5 * 2.5 = 41.25, 70 * 1.3 = 91
    assert_eq!(elite_stats(16.5, 70.0), (41.0, 91.0));
    assert_eq!(elite_stats(20.0, 105.0), (50.0, 137.0));
}

#[test]
fn early_waves_play_cruise_music() {
    let mut waves = WaveState::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();

    let mut fx = Vec::new();
    waves.start(1, 0.0, &mut timers, &mut events, &mut fx);
    assert!(fx.iter().any(|f| matches!(
        f,
        FxEvent::Music { phase: MusicPhase::Cruise }
    )));

    let mut fx = Vec::new();
    waves.start(4, 0.0, &mut timers, &mut events, &mut fx);
    assert!(fx.iter().any(|f| matches!(
        f,
        FxEvent::Music { phase: MusicPhase::Combat }
    )));

    let mut fx = Vec::new();
    waves.start(10, 0.0, &mut timers, &mut events, &mut fx);
    assert!(fx.iter().any(|f| matches!(
        f,
        FxEvent::Music { phase: MusicPhase::Boss }
    )));
}

#[test]
fn wave_start_schedules_boss_spawn() {
    let mut waves = WaveState::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    waves.start(10, 0.0, &mut timers, &mut events, &mut fx);
    assert!(waves.is_boss_wave());
    assert!(waves.boss_pending);
    assert_eq!(timers.len(), 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveStarted { wave: 10, boss: true })));
}

#[test]
fn horn_mode_full_heal_reset() {
    let mut world = World::new();
    let mut encounter = BossEncounter::new(10, 2000.0, -10.0);
    encounter.hp = 300.0;
    let mut boss = Some(encounter);
    let mut waves = WaveState::default();
    let mut player = PlayerState::default();
    let mut ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut rng = test_rng();

    // 15% HP on the first life: the cutscene starts
    boss_system(
        &mut world, &mut boss, &mut waves, &mut player, &mut ledger, &mut score,
        &mut timers, &mut events, &mut fx, &mut rng, 0.0, DT,
    );
    {
        let encounter = boss.as_ref().unwrap();
        assert!(encounter.cutscene_until.is_some());
        assert!(!encounter.vulnerable);
    }

    // After the cutscene: full heal, horn mode, phase 4, attacks due
    boss_system(
        &mut world, &mut boss, &mut waves, &mut player, &mut ledger, &mut score,
        &mut timers, &mut events, &mut fx, &mut rng, 3.0, DT,
    );
    let encounter = boss.as_ref().unwrap();
    assert!(encounter.horn);
    assert_eq!(encounter.hp, encounter.max_hp);
    assert_eq!(encounter.phase, 4);
    assert!(events.iter().any(|e| matches!(e, GameEvent::BossHornMode)));
    // Reset timers make every unlocked attack fire immediately
    assert!(world.query::<&voidrift_core::components::EnemyShot>().iter().count() > 0);
}

#[test]
fn boss_defeat_waits_for_dive_to_finish() {
    let mut world = World::new();
    let mut encounter = BossEncounter::new(10, 2000.0, -10.0);
    encounter.horn = true;
    encounter.phase = 4;
    let mut boss = Some(encounter);
    let mut waves = WaveState::default();
    let mut player = PlayerState::default();
    let mut ledger = UpgradeLedger::default();
    let mut score = ScoreState::default();
    let mut timers = TimerQueue::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    let mut rng = test_rng();

    // First tick starts the overdue dive
    let mut now = 0.0;
    boss_system(
        &mut world, &mut boss, &mut waves, &mut player, &mut ledger, &mut score,
        &mut timers, &mut events, &mut fx, &mut rng, now, DT,
    );
    assert_ne!(boss.as_ref().unwrap().dive.stage, DiveStage::Idle);

    // The killing blow lands mid-dive: the boss must survive until the
    // dive returns to hover
    boss.as_mut().unwrap().hp = 0.0;
    let mut dive_ticks = 0;
    while boss.as_ref().is_some_and(|b| b.dive.stage != DiveStage::Idle) {
        now += DT;
        boss_system(
            &mut world, &mut boss, &mut waves, &mut player, &mut ledger, &mut score,
            &mut timers, &mut events, &mut fx, &mut rng, now, DT,
        );
        dive_ticks += 1;
        assert!(dive_ticks < 600, "dive never completed");
    }
    assert!(dive_ticks > 10);
    assert!(boss.is_some());
    assert!(!events.iter().any(|e| matches!(e, GameEvent::BossDefeated { .. })));

    now += DT;
    boss_system(
        &mut world, &mut boss, &mut waves, &mut player, &mut ledger, &mut score,
        &mut timers, &mut events, &mut fx, &mut rng, now, DT,
    );
    assert!(boss.is_none());
    assert!(events.iter().any(|e| matches!(e, GameEvent::BossDefeated { .. })));
}

#[test]
fn xp_overflow_banks_multiple_levels() {
    let mut world = World::new();
    let mut xp = XpState::default();
    let player = PlayerState::default();
    let mut events = Vec::new();
    let mut fx = Vec::new();
    world.spawn((
        player.pos,
        Velocity::default(),
        XpOrb {
            value: 120,
            pull_started: None,
        },
    ));

    leveling_system(&mut world, &mut xp, &player, &mut events, &mut fx, 0.0, DT);

    // 120 XP clears 50 then 70 exactly
    assert_eq!(xp.level, 2);
    assert_eq!(xp.xp, 0);
    assert_eq!(xp.pending_levels, 2);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count(),
        2
    );
}

#[test]
fn accuracy_multiplier_scales_final_score() {
    let mut score = ScoreState::default();
    score.score = 1000;
    score.shots_fired = 100;
    score.shots_hit = 50;
    let record = score.breakdown("seed", 5, 3, 100.0, 7);
    assert_eq!(record.survival_bonus, 200);
    assert!((record.accuracy - 0.5).abs() < 1e-9);
    assert!((record.accuracy_multiplier - 1.25).abs() < 1e-9);
    assert_eq!(record.final_score, 1500);
    assert_eq!(record.best_kill_streak, 7);
}

#[test]
fn pause_suspends_simulation() {
    let mut engine = GameEngine::new("pause-test");
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick();
    engine.queue_command(PlayerCommand::Pause);
    let before = engine.tick();
    let after = engine.tick();
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert_eq!(before.time.tick, after.time.tick);
}
