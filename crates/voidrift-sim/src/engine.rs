//! The game engine: owns the ECS world and all run state, consumes
//! player commands at tick boundaries, runs the systems in a fixed
//! order, and emits one snapshot per tick.
//!
//! Everything is keyed to the simulation clock, which only advances
//! while the run is Active: card selection, pause, and menus suspend
//! the whole simulation including every scheduled timer.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use voidrift_core::commands::PlayerCommand;
use voidrift_core::constants::*;
use voidrift_core::enums::{DiveStage, GamePhase, MusicPhase, Stat};
use voidrift_core::events::{FxEvent, GameEvent, SoundCue};
use voidrift_core::state::GameStateSnapshot;
use voidrift_core::types::SimTime;

use crate::player::PlayerState;
use crate::score::ScoreState;
use crate::systems::boss::{self, BossEncounter};
use crate::systems::cleanup::cleanup_system;
use crate::systems::collision::collision_system;
use crate::systems::enemy_ai::enemy_ai_system;
use crate::systems::leveling::{leveling_system, XpState};
use crate::systems::movement::movement_system;
use crate::systems::snapshot::build_snapshot;
use crate::systems::status::status_system;
use crate::systems::wave_spawner::{wave_spawner_system, WaveState};
use crate::systems::weapons::{support, weapons_system, WeaponCtx, WeaponRegistry};
use crate::timers::{TimerAction, TimerQueue};
use crate::upgrades::{CardOffer, UpgradeLedger, SUPERNOVA_BONUS_PCT};

/// Fold a seed string into the RNG seed (FNV-1a).
fn seed_hash(seed: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Run inputs: the shared weekly seed plus the debug damage bypass.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: String,
    pub god_mode: bool,
}

pub struct GameEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    music: MusicPhase,
    seed: String,
    god_mode: bool,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    fx: Vec<FxEvent>,
    player: PlayerState,
    weapons: WeaponRegistry,
    ledger: UpgradeLedger,
    xp: XpState,
    score: ScoreState,
    waves: WaveState,
    boss: Option<BossEncounter>,
    timers: TimerQueue,
    offered: Vec<CardOffer>,
}

impl GameEngine {
    pub fn new(seed: impl Into<String>) -> Self {
        Self::with_config(SimConfig {
            seed: seed.into(),
            god_mode: false,
        })
    }

    pub fn with_config(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed_hash(&config.seed));
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::MainMenu,
            music: MusicPhase::Cruise,
            seed: config.seed,
            god_mode: config.god_mode,
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            fx: Vec::new(),
            player: PlayerState::default(),
            weapons: WeaponRegistry::default(),
            ledger: UpgradeLedger::default(),
            xp: XpState::default(),
            score: ScoreState::default(),
            waves: WaveState::default(),
            boss: None,
            timers: TimerQueue::default(),
            offered: Vec::new(),
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Queue a command for the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        for fx in &self.fx {
            if let FxEvent::Music { phase } = fx {
                self.music = *phase;
            }
        }

        let offered_cards = self.ledger.card_views(&self.offered);
        build_snapshot(
            &self.world,
            self.time,
            self.phase,
            self.music,
            &self.waves,
            &self.player,
            &self.xp,
            &self.score,
            &self.boss,
            offered_cards,
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.fx),
            self.time.elapsed_secs,
        )
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => self.start_run(),
            PlayerCommand::SetMoveInput { x, y } => {
                if x.is_finite() && y.is_finite() {
                    self.player.move_x = x.clamp(-1.0, 1.0);
                    self.player.move_y = y.clamp(-1.0, 1.0);
                }
            }
            PlayerCommand::SetAimAngle { angle } => {
                if angle.is_finite() {
                    self.player.aim_angle = angle;
                }
            }
            PlayerCommand::ChooseCard { index } => self.choose_card(index),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.phase = GamePhase::MainMenu;
                self.music = MusicPhase::Cruise;
            }
        }
    }

    /// Reset every piece of run state and open wave 1.
    fn start_run(&mut self) {
        debug!(seed = %self.seed, "starting run");
        self.world.clear();
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(seed_hash(&self.seed));
        self.player = PlayerState::default();
        self.player.god_mode = self.god_mode;
        self.weapons = WeaponRegistry::default();
        self.ledger = UpgradeLedger::default();
        self.xp = XpState::default();
        self.score = ScoreState::default();
        self.waves = WaveState::default();
        self.boss = None;
        self.timers.clear();
        self.offered.clear();
        self.phase = GamePhase::Active;

        self.events.push(GameEvent::RunStarted {
            seed: self.seed.clone(),
        });
        self.waves
            .start(1, 0.0, &mut self.timers, &mut self.events, &mut self.fx);
    }

    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let dt = self.time.dt();
        let nebula = support::nebula_params(&self.weapons, self.player.derived.damage);

        // 1. Scheduled one-shots
        for action in self.timers.drain_due(now) {
            self.apply_timer(action, now);
        }

        // 2. Wave progression and spawning
        wave_spawner_system(
            &mut self.world,
            &mut self.waves,
            &mut self.score,
            &mut self.rng,
            self.player.pos,
            &mut self.timers,
            &mut self.events,
            &mut self.fx,
            now,
        );

        // 3. Enemy behavior
        enemy_ai_system(
            &mut self.world,
            &mut self.player,
            &mut self.ledger,
            &mut self.score,
            &mut self.waves.damage_taken,
            &mut self.events,
            &mut self.fx,
            &mut self.rng,
            now,
        );

        // 4. Integration
        movement_system(&mut self.world, &mut self.player, dt);

        // 5. Weapons
        let mut weapon_ctx = WeaponCtx {
            now,
            dt,
            rng: &mut self.rng,
            player: &mut self.player,
            ledger: &mut self.ledger,
            score: &mut self.score,
            timers: &mut self.timers,
            events: &mut self.events,
            fx: &mut self.fx,
            boss: &mut self.boss,
            nebula,
        };
        weapons_system(&mut self.world, &mut self.weapons, &mut weapon_ctx);

        // 6. Collisions
        collision_system(
            &mut self.world,
            &mut self.boss,
            &mut self.player,
            &mut self.ledger,
            &mut self.score,
            &mut self.waves.damage_taken,
            &mut self.events,
            &mut self.fx,
            &mut self.rng,
            nebula,
            now,
        );

        // 7. Boss encounter
        boss::boss_system(
            &mut self.world,
            &mut self.boss,
            &mut self.waves,
            &mut self.player,
            &mut self.ledger,
            &mut self.score,
            &mut self.timers,
            &mut self.events,
            &mut self.fx,
            &mut self.rng,
            now,
            dt,
        );

        // 8. XP and level-ups
        leveling_system(
            &mut self.world,
            &mut self.xp,
            &self.player,
            &mut self.events,
            &mut self.fx,
            now,
            dt,
        );

        // 9. Status effects
        status_system(
            &mut self.world,
            &mut self.player,
            &mut self.ledger,
            &mut self.score,
            &mut self.events,
            &mut self.fx,
            &mut self.rng,
            nebula,
            now,
            dt,
        );

        // 10. Despawns
        cleanup_system(&mut self.world);

        if self.player.hp <= 0.0 {
            self.end_run(now);
            return;
        }

        // Open a card offer unless the boss cutscene holds the stage
        let cutscene = self
            .boss
            .as_ref()
            .is_some_and(|b| b.cutscene_until.is_some());
        if self.xp.pending_levels > 0 && !cutscene {
            self.offer_cards();
        }
    }

    fn apply_timer(&mut self, action: TimerAction, now: f64) {
        match action {
            TimerAction::SpawnBoss { hp } => {
                if self.waves.boss_pending && self.boss.is_none() {
                    self.boss = Some(BossEncounter::new(self.waves.wave, hp, now));
                    self.events.push(GameEvent::BossSpawned {
                        wave: self.waves.wave,
                        max_hp: hp,
                    });
                    self.fx.push(FxEvent::Sound {
                        cue: SoundCue::BossRoar,
                    });
                }
            }
            TimerAction::AdvanceWave => {
                let next = self.waves.wave + 1;
                self.waves
                    .start(next, now, &mut self.timers, &mut self.events, &mut self.fx);
            }
            TimerAction::EndSupernova => {
                self.player.mods.add_percent(Stat::Damage, -SUPERNOVA_BONUS_PCT);
                self.player.recompute();
            }
            TimerAction::WarpReturn { x, y } => {
                self.player.pos.x = x.clamp(PLAYER_EDGE_MARGIN, ARENA_WIDTH - PLAYER_EDGE_MARGIN);
                self.player.pos.y = y.clamp(PLAYER_EDGE_MARGIN, ARENA_HEIGHT - PLAYER_EDGE_MARGIN);
                self.fx.push(FxEvent::WarpFlash { x, y });
            }
            TimerAction::BossFollowUp { kind } => {
                // The boss may have fallen or dived since the cast
                if let Some(encounter) = self.boss.as_mut() {
                    if encounter.vulnerable && encounter.dive.stage == DiveStage::Idle {
                        boss::cast_attack(
                            &mut self.world,
                            encounter,
                            self.player.pos,
                            kind,
                            &mut self.fx,
                        );
                    }
                }
            }
        }
    }

    fn offer_cards(&mut self) {
        let offers = self
            .ledger
            .draw_cards(self.waves.wave, self.player.derived.luck, &mut self.rng);
        if offers.is_empty() {
            warn!("card pool exhausted, dropping pending level-ups");
            self.xp.pending_levels = 0;
            return;
        }
        let ids = offers
            .iter()
            .map(|offer| self.ledger.catalog()[offer.catalog_idx].id.to_string())
            .collect();
        self.events.push(GameEvent::CardsOffered { ids });
        self.offered = offers;
        self.phase = GamePhase::CardSelect;
    }

    fn choose_card(&mut self, index: usize) {
        if self.phase != GamePhase::CardSelect {
            return;
        }
        let Some(offer) = self.offered.get(index).copied() else {
            warn!(index, "card choice out of range");
            return;
        };
        let now = self.time.elapsed_secs;
        self.ledger.apply(
            offer.catalog_idx,
            &mut self.player,
            &mut self.weapons,
            &mut self.timers,
            &mut self.events,
            &mut self.fx,
            now,
        );
        self.offered.clear();
        self.xp.pending_levels = self.xp.pending_levels.saturating_sub(1);
        if self.xp.pending_levels > 0 {
            self.offer_cards();
        }
        if self.offered.is_empty() {
            self.phase = GamePhase::Active;
        }
    }

    fn end_run(&mut self, now: f64) {
        let record = self.score.breakdown(
            &self.seed,
            self.waves.wave,
            self.xp.level,
            now,
            self.player.best_kill_streak,
        );
        self.events.push(GameEvent::RunEnded { record });
        self.phase = GamePhase::GameOver;
        self.music = MusicPhase::Cruise;
        self.offered.clear();
    }
}
