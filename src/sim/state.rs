//! Game state and core simulation types
//!
//! Everything one session mutates lives in [`GameState`]. The renderer borrows
//! it read-only each frame; it serializes for a JS bridge or debugging.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::{Achievement, AchievementTracker, Progress};
use super::clock::SimClock;
use super::difficulty::{Difficulty, DifficultyProfile};
use super::effects::{Combo, StatusEffects};
use super::entity::{
    BackgroundStar, Collectible, CollectibleKind, Hazard, Particle, ParticleColor, Player,
    Powerup, PowerupKind,
};
use super::spawn::{SpawnBatch, Spawner};
use crate::consts::*;
use crate::settings::ShipColor;

/// Play area size (the render surface)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

/// Named sound cues; the audio adapter picks the actual sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundCue {
    Collect,
    BonusCollect,
    Hit,
    Powerup,
    Achievement,
}

impl SoundCue {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::Collect => "collect",
            SoundCue::BonusCollect => "bonus-collect",
            SoundCue::Hit => "hit",
            SoundCue::Powerup => "powerup",
            SoundCue::Achievement => "achievement",
        }
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    Collected {
        kind: CollectibleKind,
        points: u64,
        combo: u32,
    },
    LifeLost {
        remaining: u8,
    },
    PowerupActivated {
        kind: PowerupKind,
        refreshed: bool,
    },
    PowerupExpired(PowerupKind),
    FreezeStarted,
    ComboBroken {
        length: u32,
    },
    AchievementUnlocked(Achievement),
}

/// Achievement popup shown until `expires_at`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementBanner {
    pub achievement: Achievement,
    pub expires_at: f64,
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub arena: Arena,
    pub score: u64,
    pub lives: u8,
    pub combo: Combo,
    pub clock: SimClock,
    pub effects: StatusEffects,
    pub achievements: AchievementTracker,
    pub banner: Option<AchievementBanner>,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub collectibles: Vec<Collectible>,
    pub powerups: Vec<Powerup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Parallax starfield (not gameplay-affecting)
    pub background: Vec<BackgroundStar>,
    pub spawner: Spawner,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session: empty pools, full lives, new ship
    pub fn new(difficulty: Difficulty, arena: Arena, ship: ShipColor, seed: u64) -> Self {
        let profile = difficulty.profile();
        let mut rng = Pcg32::seed_from_u64(seed);
        let background = (0..BACKGROUND_STAR_COUNT)
            .map(|_| BackgroundStar::random(&mut rng, &arena))
            .collect();

        Self {
            seed,
            difficulty,
            profile,
            arena,
            score: 0,
            lives: profile.lives,
            combo: Combo::new(),
            clock: SimClock::new(),
            effects: StatusEffects::new(),
            achievements: AchievementTracker::new(),
            banner: None,
            player: Player::spawn(&arena, ship),
            hazards: Vec::new(),
            collectibles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            background,
            spawner: Spawner::new(),
            events: Vec::new(),
            rng,
        }
    }

    /// Lives exhausted; no further ticks are processed
    #[inline]
    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn max_combo(&self) -> u32 {
        self.combo.max
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed_ms
    }

    pub fn progress(&self) -> Progress {
        Progress {
            score: self.score,
            max_combo: self.combo.max,
            lives: self.lives,
            starting_lives: self.profile.lives,
            elapsed_ms: self.clock.elapsed_ms,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append a spawn batch to the entity pools
    pub fn push_spawns(&mut self, batch: SpawnBatch) {
        self.hazards.extend(batch.hazard);
        self.collectibles.extend(batch.collectible);
        self.powerups.extend(batch.powerup);
    }

    /// Particle burst at `origin`; oldest particles are dropped past the cap
    pub fn spawn_particles(&mut self, origin: Vec2, color: ParticleColor, count: usize) {
        for _ in 0..count {
            let particle = Particle::burst(&mut self.rng, origin, color);
            self.particles.push(particle);
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Cancel every pending status expiry and the combo timeout
    pub fn clear_timers(&mut self) {
        self.effects.clear();
        self.effects.sync_player(&mut self.player);
        self.combo.clear();
        self.clock.thaw();
        self.banner = None;
    }

    /// Adopt a new play-area size (window resize)
    pub fn resize(&mut self, arena: Arena) {
        self.arena = arena;
        self.player.clamp_to(&arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Difficulty::Medium, Arena::default(), ShipColor::Gold, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo.count, 0);
        assert_eq!(state.clock.elapsed_ms, 0.0);
        assert!(state.hazards.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.powerups.is_empty());
        assert_eq!(state.background.len(), BACKGROUND_STAR_COUNT);
        assert_eq!(state.player.ship, ShipColor::Gold);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(Difficulty::Easy, Arena::default(), ShipColor::Blue, 1);
        for _ in 0..30 {
            state.spawn_particles(Vec2::ZERO, ParticleColor::Red, 20);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_resize_reclamps_player() {
        let mut state = GameState::new(Difficulty::Easy, Arena::default(), ShipColor::Blue, 1);
        state.resize(Arena::new(200.0, 150.0));
        assert_eq!(state.player.body.pos, Vec2::new(160.0, 110.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Difficulty::Hard, Arena::default(), ShipColor::Purple, 5);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["lives"], 2);
        assert_eq!(json["difficulty"], "hard");
        assert!(json.get("rng").is_none());
    }
}
