//! Moving bodies: the player ship and everything that falls past it
//!
//! All positions are top-left corners in play-area units, y grows downward.
//! Falling objects move a fixed displacement per tick, scaled by the clock's
//! motion scale while time is frozen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Arena;
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::ShipColor;

/// Position, size and per-tick velocity shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    /// Square body falling straight down
    pub fn falling(pos: Vec2, size: f32, speed: f32) -> Self {
        Self::new(pos, Vec2::splat(size), Vec2::new(0.0, speed))
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Advance by one tick of velocity, scaled
    #[inline]
    pub fn step(&mut self, scale: f32) {
        self.pos += self.vel * scale;
    }

    /// True once the body has scrolled past the bottom edge
    #[inline]
    pub fn has_exited(&self, arena: &Arena) -> bool {
        self.pos.y > arena.height
    }
}

/// Falling asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub body: Body,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Hazard {
    pub fn update(&mut self, scale: f32) {
        self.body.step(scale);
        self.rotation += self.rotation_speed;
    }
}

/// Star variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Normal,
    /// Rainbow star: big payout, unlocks Rainbow Hunter
    BonusLarge,
    /// Slows hazards and stars for a few seconds
    Freeze,
}

impl CollectibleKind {
    /// Points before the combo multiplier
    pub fn base_points(self) -> u64 {
        match self {
            CollectibleKind::Normal => NORMAL_STAR_POINTS,
            CollectibleKind::BonusLarge => BONUS_STAR_POINTS,
            CollectibleKind::Freeze => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectibleKind::Normal => "normal",
            CollectibleKind::BonusLarge => "bonus-large",
            CollectibleKind::Freeze => "freeze",
        }
    }
}

/// Falling star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub body: Body,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Collectible {
    pub fn update(&mut self, scale: f32) {
        self.body.step(scale);
        self.rotation += self.rotation_speed;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Shield,
    Magnet,
    SpeedBoost,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::Shield,
        PowerupKind::Magnet,
        PowerupKind::SpeedBoost,
    ];

    /// Slot in per-kind tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PowerupKind::Shield => 0,
            PowerupKind::Magnet => 1,
            PowerupKind::SpeedBoost => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerupKind::Shield => "Shield",
            PowerupKind::Magnet => "Magnet",
            PowerupKind::SpeedBoost => "Speed",
        }
    }
}

/// Falling power-up capsule. Not affected by time freeze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub body: Body,
    pub rotation: f32,
}

impl Powerup {
    pub fn update(&mut self) {
        self.body.step(1.0);
        self.rotation += POWERUP_SPIN;
    }
}

/// Particle colour, mapped to a palette by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Star pickup
    Gold,
    /// Freeze pickup
    Cyan,
    /// Asteroid impact
    Red,
    /// Power-up pickup
    Violet,
}

impl ParticleColor {
    pub fn hex(self) -> &'static str {
        match self {
            ParticleColor::Gold => "#ffd700",
            ParticleColor::Cyan => "#00ffff",
            ParticleColor::Red => "#ff6b6b",
            ParticleColor::Violet => "#8b5cf6",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Ticks left to live
    pub life: u32,
    pub color: ParticleColor,
}

impl Particle {
    /// Random burst particle at `origin`
    pub fn burst<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, color: ParticleColor) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
            size: rng.random_range(3.0..6.0),
            life: PARTICLE_LIFETIME,
            color,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    /// Fade factor 0-1 for rendering
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFETIME as f32
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Parallax decoration star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundStar {
    pub pos: Vec2,
    /// 1 (far) to 3 (near)
    pub layer: u8,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
}

impl BackgroundStar {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &Arena) -> Self {
        let layer: u8 = rng.random_range(1..=3);
        let pos = Vec2::new(
            rng.random::<f32>() * arena.width,
            rng.random::<f32>() * arena.height,
        );
        Self {
            pos,
            layer,
            size: match layer {
                1 => 1.0,
                2 => 1.5,
                _ => 2.0,
            },
            speed: layer as f32 * 0.3,
            opacity: 0.3 + layer as f32 * 0.2,
        }
    }

    /// Drift downward, wrapping back to the top at a new column
    pub fn update<R: Rng + ?Sized>(&mut self, scale: f32, arena: &Arena, rng: &mut R) {
        self.pos.y += self.speed * scale;
        if self.pos.y > arena.height {
            self.pos.y = 0.0;
            self.pos.x = rng.random::<f32>() * arena.width;
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub base_speed: f32,
    /// Current speed (doubled by speed boost)
    pub speed: f32,
    /// Shield active: asteroids pass through
    pub invincible: bool,
    /// Magnet active: nearby stars drift toward the ship
    pub magnet_active: bool,
    pub ship: ShipColor,
    /// Recent positions for the engine trail (newest first)
    pub trail: Vec<Vec2>,
}

impl Player {
    /// Fresh ship centred horizontally near the bottom edge
    pub fn spawn(arena: &Arena, ship: ShipColor) -> Self {
        let pos = Vec2::new(
            arena.width / 2.0 - PLAYER_SIZE / 2.0,
            arena.height - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
        );
        Self {
            body: Body::new(pos, Vec2::splat(PLAYER_SIZE), Vec2::ZERO),
            base_speed: PLAYER_BASE_SPEED,
            speed: PLAYER_BASE_SPEED,
            invincible: false,
            magnet_active: false,
            ship,
            trail: Vec::with_capacity(PLAYER_TRAIL_LENGTH + 1),
        }
    }

    /// Set velocity from directional intent; magnitude per axis never exceeds speed
    pub fn steer(&mut self, input: &TickInput) {
        self.body.vel = input.axes() * self.speed;
    }

    /// Move one tick and keep the ship inside the play area
    pub fn update(&mut self, arena: &Arena) {
        self.trail.insert(0, self.body.pos);
        self.trail.truncate(PLAYER_TRAIL_LENGTH);

        self.body.step(1.0);
        self.clamp_to(arena);
    }

    pub fn clamp_to(&mut self, arena: &Arena) {
        let max = (Vec2::new(arena.width, arena.height) - self.body.size).max(Vec2::ZERO);
        self.body.pos = self.body.pos.clamp(Vec2::ZERO, max);
    }

    /// Whether a speed boost is currently applied
    pub fn is_boosted(&self) -> bool {
        self.speed > self.base_speed
    }
}
