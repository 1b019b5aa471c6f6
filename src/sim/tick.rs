//! Per-frame simulation tick
//!
//! Order within a tick: clock, timer expiry, spawns, movement, magnet pass,
//! collisions (stars, asteroids, power-ups), particles, achievements. A tick
//! that costs the last life stops right there.

use glam::Vec2;

use super::achievements::Achievement;
use super::collision::magnet_pull;
use super::entity::{Collectible, CollectibleKind, ParticleColor, Powerup};
use super::state::{AchievementBanner, GameEvent, GameState, SoundCue};
use crate::consts::*;

/// Directional intent from the input adapter
///
/// Each axis is clamped to [-1, 1] and scaled by the ship's current speed,
/// so the adapter never needs to know about speed boosts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub x: f32,
    pub y: f32,
}

impl TickInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamped intent vector
    pub fn axes(&self) -> Vec2 {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Vec2::new(clamp(self.x), clamp(self.y))
    }
}

/// What the session controller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    LivesExhausted,
}

/// Advance the game by one frame of `dt_ms` real elapsed milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) -> TickOutcome {
    if state.is_over() {
        return TickOutcome::LivesExhausted;
    }

    state.clock.advance(dt_ms);
    let now = state.clock.now();
    expire_timers(state, now);

    let batch = state
        .spawner
        .roll(&mut state.rng, &state.profile, state.score, &state.arena);
    state.push_spawns(batch);

    let scale = state.clock.motion_scale();
    for star in &mut state.background {
        star.update(scale, &state.arena, &mut state.rng);
    }

    state.player.steer(input);
    state.player.update(&state.arena);

    for hazard in &mut state.hazards {
        hazard.update(scale);
    }
    for star in &mut state.collectibles {
        star.update(scale);
    }
    for powerup in &mut state.powerups {
        powerup.update();
    }

    if state.player.magnet_active {
        attract_collectibles(state);
    }

    resolve_collectibles(state, now);
    if resolve_hazards(state) == TickOutcome::LivesExhausted {
        log::info!(
            "Out of lives: score {} max combo {}",
            state.score,
            state.combo.max
        );
        return TickOutcome::LivesExhausted;
    }
    resolve_powerups(state, now);

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| p.is_alive());

    check_achievements(state, now);
    TickOutcome::Continue
}

/// Expire power-ups, the combo and the achievement banner
fn expire_timers(state: &mut GameState, now: f64) {
    for kind in state.effects.expire(now) {
        log::debug!("{} expired", kind.label());
        state.emit(GameEvent::PowerupExpired(kind));
    }
    state.effects.sync_player(&mut state.player);

    if let Some(length) = state.combo.expire(now) {
        state.emit(GameEvent::ComboBroken { length });
    }

    if state.banner.is_some_and(|b| now >= b.expires_at) {
        state.banner = None;
    }
}

/// Pull stars within the magnet radius toward the ship
fn attract_collectibles(state: &mut GameState) {
    let target = state.player.body.center();
    for star in state.collectibles.iter_mut().filter(|s| s.body.pos.y > 0.0) {
        if let Some(offset) = magnet_pull(star.body.center(), target) {
            star.body.pos += offset;
        }
    }
}

fn resolve_collectibles(state: &mut GameState, now: f64) {
    let player_box = state.player.body.aabb();
    let stars = std::mem::take(&mut state.collectibles);
    for star in stars {
        if star.body.aabb().overlaps(&player_box) {
            collect(state, &star, now);
        } else if !star.body.has_exited(&state.arena) {
            state.collectibles.push(star);
        }
    }
}

/// Score a star, advance the combo and apply its variant effect
fn collect(state: &mut GameState, star: &Collectible, now: f64) {
    let center = star.body.center();
    let points = star.kind.base_points() * state.combo.multiplier();

    match star.kind {
        CollectibleKind::BonusLarge => {
            state.emit(GameEvent::Sound(SoundCue::BonusCollect));
            if state.achievements.unlock(Achievement::RainbowHunter) {
                announce(state, Achievement::RainbowHunter, now);
            }
        }
        CollectibleKind::Freeze => {
            state.clock.freeze(FREEZE_DURATION_MS);
            state.emit(GameEvent::Sound(SoundCue::Powerup));
            state.emit(GameEvent::FreezeStarted);
            state.spawn_particles(center, ParticleColor::Cyan, 20);
        }
        CollectibleKind::Normal => {
            state.emit(GameEvent::Sound(SoundCue::Collect));
        }
    }

    state.score += points;
    state.combo.register(now);
    state.emit(GameEvent::Collected {
        kind: star.kind,
        points,
        combo: state.combo.count,
    });
    state.spawn_particles(center, ParticleColor::Gold, 15);
    log::debug!(
        "Collected {} star: +{} (combo {})",
        star.kind.as_str(),
        points,
        state.combo.count
    );

    check_achievements(state, now);
}

/// Asteroid impacts; shielded ships let asteroids pass straight through
fn resolve_hazards(state: &mut GameState) -> TickOutcome {
    let player_box = state.player.body.aabb();
    let shielded = state.player.invincible;
    let mut outcome = TickOutcome::Continue;

    let hazards = std::mem::take(&mut state.hazards);
    for hazard in hazards {
        if outcome == TickOutcome::LivesExhausted {
            state.hazards.push(hazard);
            continue;
        }
        if !shielded && hazard.body.aabb().overlaps(&player_box) {
            state.lives = state.lives.saturating_sub(1);
            state.emit(GameEvent::Sound(SoundCue::Hit));
            state.emit(GameEvent::LifeLost {
                remaining: state.lives,
            });
            state.spawn_particles(hazard.body.center(), ParticleColor::Red, 20);
            log::debug!("Hit by asteroid {}, {} lives left", hazard.id, state.lives);
            if state.lives == 0 {
                outcome = TickOutcome::LivesExhausted;
            }
            continue;
        }
        if !hazard.body.has_exited(&state.arena) {
            state.hazards.push(hazard);
        }
    }
    outcome
}

fn resolve_powerups(state: &mut GameState, now: f64) {
    let player_box = state.player.body.aabb();
    let powerups = std::mem::take(&mut state.powerups);
    for powerup in powerups {
        if powerup.body.aabb().overlaps(&player_box) {
            activate(state, &powerup, now);
        } else if !powerup.body.has_exited(&state.arena) {
            state.powerups.push(powerup);
        }
    }
}

fn activate(state: &mut GameState, powerup: &Powerup, now: f64) {
    let refreshed = state.effects.activate(powerup.kind, now);
    state.effects.sync_player(&mut state.player);
    state.emit(GameEvent::Sound(SoundCue::Powerup));
    state.emit(GameEvent::PowerupActivated {
        kind: powerup.kind,
        refreshed,
    });
    state.spawn_particles(powerup.body.center(), ParticleColor::Violet, 15);
    log::debug!("{} activated (refreshed: {})", powerup.kind.label(), refreshed);
}

fn check_achievements(state: &mut GameState, now: f64) {
    let progress = state.progress();
    for achievement in state.achievements.evaluate(&progress) {
        announce(state, achievement, now);
    }
}

/// Cue, event and banner for a fresh unlock
fn announce(state: &mut GameState, achievement: Achievement, now: f64) {
    log::info!("Achievement unlocked: {}", achievement.name());
    state.emit(GameEvent::Sound(SoundCue::Achievement));
    state.emit(GameEvent::AchievementUnlocked(achievement));
    state.banner = Some(AchievementBanner {
        achievement,
        expires_at: now + ACHIEVEMENT_BANNER_MS,
    });
}
