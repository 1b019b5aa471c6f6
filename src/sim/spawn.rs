//! Per-tick spawning of asteroids, stars and power-ups
//!
//! The spawner only decides what appears; the tick appends the batch to the
//! entity pools. Asteroid pressure grows with score and is never capped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::entity::{Body, Collectible, CollectibleKind, Hazard, Powerup, PowerupKind};
use super::state::Arena;
use crate::consts::*;

/// What a single tick decided to spawn
#[derive(Debug, Clone, Default)]
pub struct SpawnBatch {
    pub hazard: Option<Hazard>,
    pub collectible: Option<Collectible>,
    pub powerup: Option<Powerup>,
}

impl SpawnBatch {
    pub fn is_empty(&self) -> bool {
        self.hazard.is_none() && self.collectible.is_none() && self.powerup.is_none()
    }
}

/// Per-tick asteroid chance: base rate, doubled every 1000 points
pub fn hazard_chance(profile: &DifficultyProfile, score: u64) -> f64 {
    profile.hazard_rate * (1.0 + score as f64 / 1000.0)
}

/// Map a uniform roll in [0, 1) to a star variant
pub fn collectible_kind(roll: f64) -> CollectibleKind {
    if roll < BONUS_STAR_THRESHOLD {
        CollectibleKind::BonusLarge
    } else if roll < FREEZE_STAR_THRESHOLD {
        CollectibleKind::Freeze
    } else {
        CollectibleKind::Normal
    }
}

/// Spawn x: anywhere the whole entity fits
fn spawn_x<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, size: f32) -> f32 {
    rng.random::<f32>() * (arena.width - size).max(0.0)
}

/// Entity factory; owns the id sequence for everything it spawns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    next_id: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Roll this tick's spawns: star, then asteroid, then power-up
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        profile: &DifficultyProfile,
        score: u64,
        arena: &Arena,
    ) -> SpawnBatch {
        let collectible = if rng.random::<f64>() < profile.collectible_rate {
            let kind = collectible_kind(rng.random::<f64>());
            Some(self.collectible(rng, kind, arena))
        } else {
            None
        };

        let hazard = if rng.random::<f64>() < hazard_chance(profile, score) {
            Some(self.hazard(rng, profile, score, arena))
        } else {
            None
        };

        let powerup = if rng.random::<f64>() < POWERUP_SPAWN_CHANCE {
            let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
            Some(self.powerup(rng, kind, arena))
        } else {
            None
        };

        SpawnBatch {
            hazard,
            collectible,
            powerup,
        }
    }

    /// New asteroid just above the top edge
    pub fn hazard<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        profile: &DifficultyProfile,
        score: u64,
        arena: &Arena,
    ) -> Hazard {
        let size = rng.random_range(25.0..40.0);
        let x = spawn_x(rng, arena, size);
        let speed = profile.hazard_speed + rng.random_range(0.0..2.0) + score as f32 / 500.0;
        Hazard {
            id: self.next_entity_id(),
            body: Body::falling(Vec2::new(x, -size), size, speed),
            rotation: 0.0,
            rotation_speed: rng.random_range(0.02..0.10),
        }
    }

    /// New star of the given variant just above the top edge
    pub fn collectible<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        kind: CollectibleKind,
        arena: &Arena,
    ) -> Collectible {
        let size = match kind {
            CollectibleKind::BonusLarge => 30.0,
            CollectibleKind::Freeze => 25.0,
            CollectibleKind::Normal => rng.random_range(20.0..30.0),
        };
        let x = spawn_x(rng, arena, size);
        let speed = rng.random_range(2.0..4.0);
        Collectible {
            id: self.next_entity_id(),
            kind,
            body: Body::falling(Vec2::new(x, -size), size, speed),
            rotation: 0.0,
            rotation_speed: rng.random_range(0.05..0.15),
        }
    }

    /// New power-up capsule just above the top edge
    pub fn powerup<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        kind: PowerupKind,
        arena: &Arena,
    ) -> Powerup {
        let x = spawn_x(rng, arena, POWERUP_SIZE);
        Powerup {
            id: self.next_entity_id(),
            kind,
            body: Body::falling(Vec2::new(x, -POWERUP_SIZE), POWERUP_SIZE, POWERUP_SPEED),
            rotation: 0.0,
        }
    }
}
