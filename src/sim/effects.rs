//! Timed status effects and the combo counter
//!
//! Both are driven by expiry timestamps on the simulation clock rather than
//! scheduled callbacks, so a refreshed timer can never be cancelled by a stale
//! one and nothing outlives the session that created it.

use serde::{Deserialize, Serialize};

use super::entity::{Player, PowerupKind};
use crate::consts::{COMBO_TIMEOUT_MS, STATUS_DURATION_MS};

/// Active power-up timers, one slot per [`PowerupKind`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    expires_at: [Option<f64>; 3],
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `kind` for a full duration from `now`
    ///
    /// Re-collecting an active power-up refreshes it to a full duration; it
    /// never stacks. Returns true if the effect was already running.
    pub fn activate(&mut self, kind: PowerupKind, now: f64) -> bool {
        let slot = &mut self.expires_at[kind.index()];
        let refreshed = slot.is_some_and(|t| now < t);
        *slot = Some(now + STATUS_DURATION_MS);
        refreshed
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        self.expires_at[kind.index()].is_some()
    }

    /// Milliseconds left on `kind`, zero when inactive
    pub fn remaining_ms(&self, kind: PowerupKind, now: f64) -> f64 {
        self.expires_at[kind.index()]
            .map(|t| (t - now).max(0.0))
            .unwrap_or(0.0)
    }

    /// Currently running effects, in slot order
    pub fn active(&self) -> impl Iterator<Item = PowerupKind> + '_ {
        PowerupKind::ALL.into_iter().filter(|k| self.is_active(*k))
    }

    /// Deactivate every effect whose timer has run out; returns what expired
    pub fn expire(&mut self, now: f64) -> Vec<PowerupKind> {
        let mut expired = Vec::new();
        for kind in PowerupKind::ALL {
            let slot = &mut self.expires_at[kind.index()];
            if slot.is_some_and(|t| now >= t) {
                *slot = None;
                expired.push(kind);
            }
        }
        expired
    }

    /// Cancel every pending expiry
    pub fn clear(&mut self) {
        self.expires_at = [None; 3];
    }

    /// Mirror the effect table onto the ship's flags and speed
    pub fn sync_player(&self, player: &mut Player) {
        player.invincible = self.is_active(PowerupKind::Shield);
        player.magnet_active = self.is_active(PowerupKind::Magnet);
        player.speed = if self.is_active(PowerupKind::SpeedBoost) {
            player.base_speed * 2.0
        } else {
            player.base_speed
        };
    }
}

/// Consecutive-collection counter with a rolling idle timeout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    /// Best combo this session, never decreases
    pub max: u32,
    expires_at: Option<f64>,
}

impl Combo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score multiplier for the next collection
    #[inline]
    pub fn multiplier(&self) -> u64 {
        if self.count >= 2 { self.count as u64 } else { 1 }
    }

    /// Count a collection at `now` and restart the idle timeout
    pub fn register(&mut self, now: f64) {
        self.count += 1;
        self.max = self.max.max(self.count);
        self.expires_at = Some(now + COMBO_TIMEOUT_MS);
    }

    /// Reset if the idle timeout has elapsed; returns the broken combo length
    pub fn expire(&mut self, now: f64) -> Option<u32> {
        match self.expires_at {
            Some(t) if now >= t => {
                let broken = self.count;
                self.count = 0;
                self.expires_at = None;
                Some(broken)
            }
            _ => None,
        }
    }

    /// Drop the pending timeout and the running count; `max` is kept
    pub fn clear(&mut self) {
        self.count = 0;
        self.expires_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}
