//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance for "timer reached zero" comparisons on accumulated floats.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- World ---

/// Side length of the square arena in world units.
pub const WORLD_SIZE: f64 = 4000.0;

/// Spacing between background grid lines.
pub const GRID_SPACING: f64 = 40.0;

/// Default body radius for tanks.
pub const DEFAULT_TANK_RADIUS: f64 = 24.0;

/// Default body radius for bosses.
pub const DEFAULT_BOSS_RADIUS: f64 = 72.0;

/// Max health of a tank at max-health stat 1.0.
pub const BASE_TANK_HEALTH: f64 = 100.0;

// --- Weapons ---

/// Reload time of a barrel at a rate-of-fire stat of 1.0 (seconds).
pub const BASE_RELOAD_SECS: f64 = 0.6;

/// Lowest rate-of-fire used for reload division.
pub const MIN_RATE_OF_FIRE: f64 = 0.05;

/// Full jitter cone (radians) at spread 1.0.
pub const MAX_SPREAD_ANGLE: f64 = 0.6;

/// Owner velocity change per unit of barrel recoil.
pub const RECOIL_IMPULSE_SCALE: f64 = 12.0;

/// Exponential decay rate of the visual recoil counter (per second).
pub const RECOIL_VISUAL_DECAY_RATE: f64 = 12.0;

/// Bullet speed at a bullet-speed stat of 1.0 (units/s).
pub const BULLET_BASE_SPEED: f64 = 320.0;

/// Bullet damage at damage stat 1.0.
pub const BULLET_BASE_DAMAGE: f64 = 10.0;

/// Lifespan of a regular bullet (seconds).
pub const BULLET_LIFESPAN_SECS: f64 = 2.0;

/// Hits a bullet survives at penetration stat 1.0.
pub const BULLET_BASE_PENETRATION: f64 = 1.0;

/// Bullet radius as a fraction of the barrel's rendered width.
pub const BULLET_RADIUS_FRACTION: f64 = 0.5;

/// Exponential drag applied to traps (per second).
pub const TRAP_DRAG: f64 = 3.0;

/// Lifespan of a trap (seconds).
pub const TRAP_LIFESPAN_SECS: f64 = 8.0;

/// Length of a hitscan ray (world units).
pub const HITSCAN_RANGE: f64 = 900.0;

/// Visible lifetime of a beam particle (seconds).
pub const BEAM_LIFESPAN_SECS: f64 = 0.15;

/// Probability that a shot is a critical hit.
pub const CRIT_CHANCE: f64 = 0.08;

/// Damage multiplier for critical hits.
pub const CRIT_MULTIPLIER: f64 = 2.0;

/// Engagement radius of auto-turret barrels.
pub const AUTO_TURRET_RANGE: f64 = 600.0;

// --- Movement ---

/// Thrust acceleration at move-speed 1.0 (units/s²).
pub const TANK_ACCELERATION: f64 = 600.0;

/// Exponential velocity friction for tanks (per second).
pub const TANK_FRICTION: f64 = 4.0;

/// Damage per second dealt between overlapping hostile bodies at body-damage 1.0.
pub const CONTACT_DAMAGE_PER_SEC: f64 = 30.0;

/// Contact damage is summed and shown as one floating text per interval.
pub const CONTACT_TEXT_INTERVAL_SECS: f64 = 0.25;

/// Exponential drag for particles (per second).
pub const PARTICLE_DRAG: f64 = 2.0;

// --- Drones ---

/// Drone acceleration toward its chosen target (units/s²).
pub const DRONE_ACCELERATION: f64 = 900.0;

/// Fixed per-tick velocity decay factor for drones.
pub const DRONE_DAMPING: f64 = 0.9;

/// Radius in which a drone picks hostile targets on its own.
pub const DRONE_AGGRESSION_RADIUS: f64 = 450.0;

/// Idle orbit radius as a multiple of the owner's radius.
pub const DRONE_ORBIT_RADIUS_FACTOR: f64 = 2.5;

/// Angular rate of the idle orbit (rad/s).
pub const DRONE_ORBIT_RATE: f64 = 1.5;

/// Drone radius as a fraction of the owner's radius.
pub const DRONE_RADIUS_FRACTION: f64 = 0.45;

/// Hits a drone survives before it is spent.
pub const DRONE_PENETRATION: f64 = 3.0;

// --- Status / health ---

/// Damage-flash duration (seconds).
pub const FLASH_DURATION_SECS: f64 = 0.12;

/// Seconds without damage before regeneration starts.
pub const REGEN_DELAY_SECS: f64 = 5.0;

/// Fraction of max health regenerated per second at regen stat 1.0.
pub const BASE_REGEN_FRACTION: f64 = 0.02;

/// Burn damage per second as a fraction of the triggering hit.
pub const BURN_DPS_FRACTION: f64 = 0.25;

/// Burn duration from a thermal hit (seconds).
pub const BURN_DURATION_SECS: f64 = 2.0;

/// Speed multiplier applied by cryogenic hits.
pub const SLOW_MULTIPLIER: f64 = 0.6;

/// Slow duration from a cryogenic hit (seconds).
pub const SLOW_DURATION_SECS: f64 = 1.5;

/// Upper bound on fortify damage reduction.
pub const FORTIFY_MAX_REDUCTION: f64 = 0.9;

/// Score awarded per kill, multiplied by the victim's max health / 100.
pub const KILL_SCORE_BASE: f64 = 50.0;

// --- Visual timers ---

/// Seconds of idling before a stealth class is fully faded.
pub const STEALTH_FADE_SECS: f64 = 2.0;

/// Opacity floor for faded stealth classes.
pub const STEALTH_MIN_OPACITY: f64 = 0.15;

/// Lifetime window of floating combat text (seconds).
pub const FLOATING_TEXT_LIFETIME_SECS: f64 = 1.0;

/// Upward drift of floating combat text (units/s).
pub const FLOATING_TEXT_RISE_SPEED: f64 = 40.0;

/// Lifespan of hit sparks (seconds).
pub const SPARK_LIFESPAN_SECS: f64 = 0.35;

/// Lifespan of death debris and shockwaves (seconds).
pub const DEBRIS_LIFESPAN_SECS: f64 = 0.8;
