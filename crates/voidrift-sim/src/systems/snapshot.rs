//! Snapshot assembly: project the world and engine state into the
//! serializable view sent to the frontend each tick.

use hecs::World;

use voidrift_core::components::{
    BehaviorState, BomberStage, Dead, DiverStage, Enemy, EnemyShot, GravityWell, NebulaCloud,
    PlayerShot, XpOrb,
};
use voidrift_core::enums::{GamePhase, MusicPhase};
use voidrift_core::events::{FxEvent, GameEvent};
use voidrift_core::state::*;
use voidrift_core::types::{Position, SimTime};

use crate::player::PlayerState;
use crate::score::ScoreState;

use super::boss::BossEncounter;
use super::leveling::XpState;
use super::wave_spawner::WaveState;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    phase: GamePhase,
    music: MusicPhase,
    waves: &WaveState,
    player: &PlayerState,
    xp: &XpState,
    score: &ScoreState,
    boss: &Option<BossEncounter>,
    offered_cards: Vec<CardView>,
    events: Vec<GameEvent>,
    fx: Vec<FxEvent>,
    now: f64,
) -> GameStateSnapshot {
    let enemies = world
        .query::<(&Position, &Enemy, &BehaviorState)>()
        .without::<&Dead>()
        .iter()
        .map(|(_, (pos, enemy, behavior))| EnemyView {
            kind: enemy.kind,
            position: *pos,
            hp_ratio: (enemy.hp / enemy.max_hp).clamp(0.0, 1.0),
            shield: enemy.shield,
            elite: enemy.is_elite,
            telegraphing: matches!(
                behavior,
                BehaviorState::Diver {
                    stage: DiverStage::Telegraph,
                    ..
                } | BehaviorState::Bomber {
                    stage: BomberStage::Telegraph { .. },
                }
            ),
        })
        .collect();

    let player_shots = world
        .query::<(&Position, &PlayerShot)>()
        .without::<&Dead>()
        .iter()
        .map(|(_, (pos, shot))| PlayerShotView {
            position: *pos,
            is_crit: shot.is_crit,
        })
        .collect();

    let enemy_shots = world
        .query::<&Position>()
        .with::<&EnemyShot>()
        .without::<&Dead>()
        .iter()
        .map(|(_, pos)| ShotView { position: *pos })
        .collect();

    let orbs = world
        .query::<(&Position, &XpOrb)>()
        .without::<&Dead>()
        .iter()
        .map(|(_, (pos, orb))| OrbView {
            position: *pos,
            value: orb.value,
        })
        .collect();

    let clouds = world
        .query::<(&Position, &NebulaCloud)>()
        .without::<&Dead>()
        .iter()
        .map(|(_, (pos, cloud))| FieldView {
            position: *pos,
            radius: cloud.radius,
        })
        .collect();

    let wells = world
        .query::<(&Position, &GravityWell)>()
        .without::<&Dead>()
        .iter()
        .map(|(_, (pos, well))| FieldView {
            position: *pos,
            radius: well.radius,
        })
        .collect();

    let boss = boss.as_ref().map(|encounter| BossView {
        position: encounter.pos,
        hp: encounter.hp.max(0.0),
        max_hp: encounter.max_hp,
        phase: encounter.phase,
        horn_mode: encounter.horn,
        cutscene: encounter.cutscene_until.is_some(),
        dive: encounter.dive.stage,
    });

    GameStateSnapshot {
        time,
        phase,
        music,
        wave: waves.wave,
        player: PlayerView {
            position: player.pos,
            aim_angle: player.aim_angle,
            hp: player.hp.max(0.0),
            max_hp: player.derived.max_hp,
            shield: player.shield,
            shield_max: player.derived.shield_max,
            invulnerable: player.is_invulnerable(now),
            kill_streak: player.kill_streak,
        },
        stats: StatsView {
            damage: player.derived.damage,
            fire_rate: player.derived.fire_rate,
            speed: player.derived.speed,
            magnet: player.derived.magnet,
            crit_chance: player.derived.crit_chance,
            pierce: player.derived.pierce,
            spread: player.derived.spread,
            cooldown: player.derived.cooldown,
            blast_area: player.derived.blast_area,
            life_steal: player.derived.life_steal,
            luck: player.derived.luck,
        },
        xp: XpView {
            xp: xp.xp,
            threshold: xp.threshold(),
            level: xp.level,
        },
        score: score.view(),
        enemies,
        player_shots,
        enemy_shots,
        orbs,
        clouds,
        wells,
        boss,
        offered_cards,
        events,
        fx,
    }
}
