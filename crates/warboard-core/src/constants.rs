//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `RulesConfig`; the engine only ever reads
//! the config it was constructed with.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Board ---

/// Board width in tiles.
pub const GRID_WIDTH: i32 = 28;

/// Board height in tiles.
pub const GRID_HEIGHT: i32 = 13;

/// Kilometres represented by one tile (missile range conversion).
pub const KM_PER_TILE: u32 = 100;

/// Rendered tile edge in pixels. Only used to pace trajectories.
pub const TILE_PX: f64 = 38.0;

// --- Detection and interception ---

/// Radar detection range in tiles before bonuses.
pub const RADAR_RANGE_BASE: u32 = 4;

/// AntiAir engagement range in tiles before bonuses.
pub const AA_RANGE_BASE: u32 = 4;

// --- Economy ---

/// Money each side starts with.
pub const STARTING_MONEY: u32 = 120;

/// Paid to the defender when its AA destroys a missile.
pub const INTERCEPT_REWARD: u32 = 35;

/// Paid to the defender when its AA shoots down a jet.
pub const JET_KILL_REWARD: u32 = 25;

/// Money per percentage point of strike damage.
pub const MONEY_PER_DAMAGE: u32 = 5;

/// Money per destroyed asset tile.
pub const MONEY_PER_ASSET_HIT: u32 = 15;

// --- Strike damage ---

/// Fraction of a missile's rated damage applied when it hits at least one asset.
pub const STRIKE_DAMAGE_FACTOR: f64 = 0.75;

/// Extra damage per asset tile beyond the first.
pub const MULTI_HIT_BONUS: u32 = 4;

/// Cap on damage from a single strike.
pub const MAX_STRIKE_DAMAGE: u32 = 40;

/// Damage at which a side is destroyed.
pub const MAX_DAMAGE: u32 = 100;

// --- Pacing ---

/// Ticks between missile trajectory points.
pub const MISSILE_HOLD_TICKS: u32 = 2;

/// Minimum number of trajectory points for a missile.
pub const MISSILE_MIN_STEPS: u32 = 42;

/// Pixels covered by one missile trajectory point.
pub const MISSILE_PX_PER_STEP: f64 = 6.0;

/// Minimum interceptor flight length in ticks.
pub const INTERCEPTOR_MIN_STEPS: u32 = 12;

/// Pixels covered by one interceptor tick.
pub const INTERCEPTOR_PX_PER_STEP: f64 = 10.0;

/// How long the game-over screen lasts before returning to the menu (3 s).
pub const GAME_OVER_DISPLAY_TICKS: u32 = 3 * TICK_RATE;

// --- Adversary ---

/// Probability the adversary prefers a missile strike over a move.
pub const ADVERSARY_STRIKE_CHANCE: f64 = 0.5;

/// Upper bound on launch tiles the adversary evaluates per turn.
pub const ADVERSARY_LAUNCH_SAMPLES: usize = 60;

// --- Setup ---

/// Attempts made to find a free tile for each facility.
pub const FACILITY_PLACEMENT_ATTEMPTS: u32 = 200;

/// Rear columns nearest the midline in which the adversary seeds radars.
pub const RADAR_SEED_DEPTH: i32 = 4;

/// Max offset of a seeded AA battery from its radar, per axis.
pub const AA_SEED_SPREAD: i32 = 2;

// --- Default anti-radar missile owned by every side ---

pub const AR_MISSILE_NAME: &str = "AR Missile";
pub const AR_MISSILE_RANGE_KM: u32 = 700;
pub const AR_MISSILE_DAMAGE: u32 = 12;

/// Damage assumed for catalogue missiles that do not specify one.
pub const DEFAULT_MISSILE_DAMAGE: u32 = 25;

/// Splash radius assumed for catalogue missiles that do not specify one.
pub const DEFAULT_MISSILE_RADIUS: u32 = 1;
