//! Simulation module
//!
//! All gameplay logic lives here. Given the same seed, difficulty and
//! sequence of (input, dt) pairs a session plays out identically:
//! - Seeded RNG only (one `Pcg32` per session)
//! - Timers are expiry timestamps on the simulation clock
//! - No rendering, audio or storage dependencies; those are driven by events

pub mod achievements;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod entity;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, AchievementTracker, Progress};
pub use clock::SimClock;
pub use collision::{Aabb, magnet_pull};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use effects::{Combo, StatusEffects};
pub use entity::{
    BackgroundStar, Body, Collectible, CollectibleKind, Hazard, Particle, ParticleColor, Player,
    Powerup, PowerupKind,
};
pub use session::{Session, SessionConfig, SessionPhase, SessionSummary};
pub use spawn::{SpawnBatch, Spawner};
pub use state::{AchievementBanner, Arena, GameEvent, GameState, SoundCue};
pub use tick::{TickInput, TickOutcome, tick};
