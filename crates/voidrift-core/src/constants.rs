//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Arena width in pixels (portrait layout).
pub const ARENA_WIDTH: f64 = 1080.0;

/// Arena height in pixels.
pub const ARENA_HEIGHT: f64 = 1920.0;

/// How far outside an arena edge enemies spawn.
pub const SPAWN_EDGE_OFFSET: f64 = 60.0;

/// Side-edge spawns avoid this band at the top and bottom of the arena.
pub const SPAWN_EDGE_BAND: f64 = 100.0;

/// Minimum spawn distance from the player.
pub const SPAWN_MIN_PLAYER_DIST: f64 = 100.0;

/// Spawns inside the minimum distance are pushed out to this distance
/// along the player-to-spawn direction.
pub const SPAWN_PUSH_DIST: f64 = 120.0;

/// Enemies drifting this far past the arena bounds are force-destroyed
/// (no kill rewards).
pub const ENEMY_DESPAWN_MARGIN: f64 = 600.0;

/// Projectiles are despawned this far past the arena bounds.
pub const SHOT_DESPAWN_MARGIN: f64 = 50.0;

/// Player position is clamped this far inside the arena edges.
pub const PLAYER_EDGE_MARGIN: f64 = 40.0;

// --- Player ---

/// Player spawn position.
pub const PLAYER_START_X: f64 = ARENA_WIDTH / 2.0;
pub const PLAYER_START_Y: f64 = 1600.0;

/// Player collision radius.
pub const PLAYER_RADIUS: f64 = 24.0;

/// Invulnerability window after taking a hit (seconds).
pub const PLAYER_HIT_INVULN_SECS: f64 = 1.0;

/// Damage per enemy contact / enemy shot (hearts).
pub const CONTACT_DAMAGE: f64 = 1.0;

// --- Player base attributes ---

pub const BASE_DAMAGE: f64 = 10.0;
pub const BASE_FIRE_RATE: f64 = 1.0;
pub const BASE_SPEED: f64 = 450.0;
pub const BASE_SHIELD: f64 = 1.0;
pub const BASE_MAX_HP: f64 = 5.0;
pub const BASE_MAGNET: f64 = 80.0;
pub const BASE_CRIT: f64 = 0.05;
pub const BASE_PIERCE: f64 = 0.0;
pub const BASE_SPREAD: f64 = 1.0;
pub const BASE_COOLDOWN: f64 = 0.0;
pub const BASE_BLAST_AREA: f64 = 1.0;
pub const BASE_LIFE_STEAL: f64 = 0.0;
pub const BASE_LUCK: f64 = 0.0;

// --- Player attribute caps ---

pub const CAP_FIRE_RATE: f64 = 8.0;
pub const CAP_SPEED: f64 = 700.0;
pub const CAP_SHIELD: f64 = 8.0;
pub const CAP_MAX_HP: f64 = 10.0;
pub const CAP_MAGNET: f64 = 400.0;
pub const CAP_CRIT: f64 = 0.80;
pub const CAP_PIERCE: f64 = 5.0;
pub const CAP_SPREAD: f64 = 7.0;
pub const CAP_COOLDOWN: f64 = 0.6;
pub const CAP_BLAST_AREA: f64 = 2.5;
pub const CAP_LIFE_STEAL: f64 = 0.3;

// --- Enemies ---

/// Chance for a spawn to be promoted to an elite.
pub const ELITE_CHANCE: f64 = 0.08;

/// Elite stat multipliers.
pub const ELITE_HP_MULT: f64 = 2.5;
pub const ELITE_SPEED_MULT: f64 = 1.3;
pub const ELITE_SIZE_MULT: f64 = 1.4;

/// Elite kills drop this multiple of the base XP value.
pub const ELITE_XP_MULT: f64 = 2.5;

/// Base enemy collision radius.
pub const ENEMY_RADIUS: f64 = 26.0;

/// Seeded jitter added to each spawned enemy's fire interval (seconds).
pub const ENEMY_FIRE_JITTER_SECS: f64 = 0.5;

/// Enemy shot speed (px/s).
pub const ENEMY_SHOT_SPEED: f64 = 260.0;

/// Weaver lateral sine sway: amplitude (px) and angular rate (rad/s).
pub const WEAVER_SWAY_AMPLITUDE: f64 = 60.0;
pub const WEAVER_SWAY_RATE: f64 = 4.0;

/// Diver behavior timings: creep toward the player, a telegraph hold,
/// then a straight-line lunge.
pub const DIVER_TELEGRAPH_AT_SECS: f64 = 0.5;
pub const DIVER_LUNGE_AT_SECS: f64 = 1.0;
pub const DIVER_CREEP_SPEED_FACTOR: f64 = 0.4;

/// Formation leader fires a 3-shot spread; half-angle of the fan.
pub const LEADER_BURST_COUNT: u32 = 3;
pub const LEADER_BURST_HALF_ANGLE: f64 = 0.26;

// --- Projectile pools ---

/// Maximum live player shots; spawns beyond this are silently dropped.
pub const MAX_PLAYER_SHOTS: usize = 200;

/// Maximum live enemy shots.
pub const MAX_ENEMY_SHOTS: usize = 300;

/// Player shot speed (px/s) and collision radius.
pub const PLAYER_SHOT_SPEED: f64 = 900.0;
pub const PLAYER_SHOT_RADIUS: f64 = 8.0;
pub const ENEMY_SHOT_RADIUS: f64 = 10.0;

/// Knockback applied to an enemy per bullet hit (px).
pub const HIT_KNOCKBACK: f64 = 10.0;

/// Accumulated damage per life-steal healing unit.
pub const LIFE_STEAL_UNIT: f64 = 100.0;

// --- XP ---

/// Level threshold: `XP_THRESHOLD_BASE + XP_THRESHOLD_PER_LEVEL * level`.
pub const XP_THRESHOLD_BASE: u32 = 50;
pub const XP_THRESHOLD_PER_LEVEL: u32 = 20;

/// Orb pickup radius.
pub const ORB_COLLECT_RADIUS: f64 = 40.0;

/// Orb burst speed range on spawn (px/s).
pub const ORB_BURST_SPEED: f64 = 180.0;

/// Per-tick velocity damping while an orb is drifting free.
pub const ORB_DRAG: f64 = 0.96;

/// Magnet pull: starting speed plus quadratic ramp over pull time.
pub const ORB_PULL_BASE_SPEED: f64 = 80.0;
pub const ORB_PULL_ACCEL: f64 = 1200.0;

// --- Scoring ---

pub const SCORE_BASIC_KILL: u64 = 10;
pub const SCORE_ELITE_KILL: u64 = 50;
pub const SCORE_PERFECT_WAVE: u64 = 500;
pub const SCORE_BOSS_BASE: u64 = 1000;
pub const SCORE_BOSS_PER_WAVE: u64 = 100;
pub const SURVIVAL_SCORE_PER_SEC: f64 = 2.0;
pub const ACCURACY_MULT_MIN: f64 = 1.0;
pub const ACCURACY_MULT_MAX: f64 = 1.5;

// --- Wave flow ---

/// Delay between a boss-wave announcement and the boss spawn.
pub const BOSS_SPAWN_DELAY_SECS: f64 = 1.5;

/// Delay between a boss defeat and the next wave starting.
pub const POST_BOSS_WAVE_DELAY_SECS: f64 = 2.5;

// --- Boss ---

/// Boss collision radius.
pub const BOSS_RADIUS: f64 = 110.0;

/// Hover point the boss descends to on entry.
pub const BOSS_HOVER_Y: f64 = 280.0;

/// Entry descent duration (eased).
pub const BOSS_ENTRY_SECS: f64 = 1.5;

/// Hover sway: full sine period and amplitudes (normal / horn mode).
pub const BOSS_SWAY_PERIOD_SECS: f64 = 3.0;
pub const BOSS_SWAY_AMPLITUDE: f64 = 180.0;
pub const BOSS_SWAY_AMPLITUDE_HORN: f64 = 360.0;

/// Phase HP-ratio thresholds: above .75 phase 1, above .5 phase 2,
/// above .25 phase 3, at or below .25 phase 4.
pub const BOSS_PHASE2_RATIO: f64 = 0.75;
pub const BOSS_PHASE3_RATIO: f64 = 0.5;
pub const BOSS_PHASE4_RATIO: f64 = 0.25;

/// Horn-mode transition cutscene length.
pub const BOSS_CUTSCENE_SECS: f64 = 2.5;

/// Horn mode: attack cooldowns divide by this, projectile speeds use the
/// raised variant.
pub const BOSS_HORN_TEMPO: f64 = 1.4;

/// Movement speed factor in phase 4.
pub const BOSS_PHASE4_SPEED_FACTOR: f64 = 1.4;

// --- Boss attacks (cooldowns in seconds) ---

pub const BOSS_BEAM_COOLDOWN: f64 = 2.5;
pub const BOSS_BEAM_COOLDOWN_P2: f64 = 2.0;
pub const BOSS_BEAM_FOLLOW_UP_DELAY: f64 = 0.28;

pub const BOSS_CONE_COOLDOWN: f64 = 2.0;
pub const BOSS_CONE_COOLDOWN_P3: f64 = 1.5;
pub const BOSS_CONE_FOLLOW_UP_DELAYS: [f64; 2] = [0.4, 0.8];
pub const BOSS_CONE_SHOT_SPEED: f64 = 300.0;
pub const BOSS_CONE_SHOT_SPEED_HORN: f64 = 420.0;

pub const BOSS_SPIRAL_COOLDOWN: f64 = 0.8;
pub const BOSS_SPIRAL_SHOTS: u32 = 8;
pub const BOSS_SPIRAL_STEP: f64 = std::f64::consts::PI / 12.0;
pub const BOSS_SPIRAL_SHOT_SPEED: f64 = 250.0;
pub const BOSS_SPIRAL_SHOT_SPEED_HORN: f64 = 350.0;

pub const BOSS_SCREAM_COOLDOWN: f64 = 4.0;
pub const BOSS_SCREAM_SHOTS: u32 = 16;
pub const BOSS_SCREAM_SHOT_SPEED: f64 = 350.0;

// --- Boss dive ---

/// Seconds between dive attempts once unlocked (phase 2+).
pub const BOSS_DIVE_INTERVAL: f64 = 6.0;

/// Dive stage durations.
pub const BOSS_DIVE_WARNING_SECS: f64 = 0.7;
pub const BOSS_DIVE_TRACKING_SECS: f64 = 0.8;
pub const BOSS_DIVE_DESCENT_SECS: f64 = 0.6;
pub const BOSS_DIVE_RETURN_SECS: f64 = 0.9;

/// Depth the dive plunges to.
pub const BOSS_DIVE_TARGET_Y: f64 = 1400.0;

/// Descent fraction at which the dive fires its bullet fan.
pub const BOSS_DIVE_FAN_AT: f64 = 0.8;
pub const BOSS_DIVE_FAN_SHOTS: u32 = 5;
pub const BOSS_DIVE_FAN_HALF_ANGLE: f64 = 0.52;
pub const BOSS_DIVE_FAN_SHOT_SPEED: f64 = 320.0;

/// Horizontal glide speed while tracking the player before the plunge.
pub const BOSS_DIVE_TRACK_SPEED: f64 = 420.0;
