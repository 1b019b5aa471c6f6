//! Cosmic Catch - dodge asteroids, catch stars
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, effects, sessions)
//! - `highscores`: Top-10 leaderboard
//! - `persistence`: High score / leaderboard storage adapters
//! - `settings`: Player preferences and session configuration
//! - `audio`: Tone recipes for the sound cues the simulation emits

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use persistence::{JsonFileStore, MemoryStore, ScoreStore, StoreError};
pub use settings::{Settings, ShipColor};

/// Game configuration constants
pub mod consts {
    /// Default play area (renderer surface) size
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    /// Gap between the ship and the bottom edge at spawn
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    pub const PLAYER_TRAIL_LENGTH: usize = 10;

    /// Points per collectible
    pub const NORMAL_STAR_POINTS: u64 = 10;
    pub const BONUS_STAR_POINTS: u64 = 50;

    /// Timers (milliseconds of simulated time)
    pub const STATUS_DURATION_MS: f64 = 5000.0;
    pub const COMBO_TIMEOUT_MS: f64 = 2000.0;
    pub const FREEZE_DURATION_MS: f64 = 3000.0;
    pub const ACHIEVEMENT_BANNER_MS: f64 = 3000.0;

    /// Displacement multiplier while time is frozen
    pub const FREEZE_SLOWDOWN: f32 = 0.2;

    /// Magnet pull
    pub const MAGNET_RADIUS: f32 = 150.0;
    pub const MAGNET_PULL: f32 = 0.05;

    /// Powerups ignore difficulty
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.005;
    pub const POWERUP_SIZE: f32 = 25.0;
    pub const POWERUP_SPEED: f32 = 2.0;
    pub const POWERUP_SPIN: f32 = 0.05;

    /// Collectible variant thresholds (cumulative)
    pub const BONUS_STAR_THRESHOLD: f64 = 0.05;
    pub const FREEZE_STAR_THRESHOLD: f64 = 0.10;

    /// Particles
    pub const PARTICLE_LIFETIME: u32 = 30;
    pub const MAX_PARTICLES: usize = 256;

    /// Background starfield
    pub const BACKGROUND_STAR_COUNT: usize = 100;

    /// Frame gaps longer than this are treated as a stall, not play time
    pub const MAX_FRAME_DT_MS: f64 = 5000.0;
}

/// Current wall-clock time as unix milliseconds
pub fn unix_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
