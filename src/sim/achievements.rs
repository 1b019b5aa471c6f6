//! Per-session achievements
//!
//! Each achievement is either a predicate over [`Progress`] checked once per
//! tick, or unlocked directly by gameplay (Rainbow Hunter). Either way it
//! fires at most once per session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    CenturyClub,
    ComboMaster,
    FlawlessRun,
    Survivor,
    RainbowHunter,
}

/// Snapshot of the session values achievements are judged on
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    pub score: u64,
    pub max_combo: u32,
    pub lives: u8,
    pub starting_lives: u8,
    pub elapsed_ms: f64,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::CenturyClub,
        Achievement::ComboMaster,
        Achievement::FlawlessRun,
        Achievement::Survivor,
        Achievement::RainbowHunter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::CenturyClub => "Century Club",
            Achievement::ComboMaster => "5x Combo Master",
            Achievement::FlawlessRun => "Flawless Run",
            Achievement::Survivor => "60 Second Survivor",
            Achievement::RainbowHunter => "Rainbow Hunter",
        }
    }

    /// Unlocked by a gameplay event rather than a predicate
    pub fn is_manual(self) -> bool {
        matches!(self, Achievement::RainbowHunter)
    }

    pub fn is_met(self, p: &Progress) -> bool {
        match self {
            Achievement::CenturyClub => p.score >= 100,
            Achievement::ComboMaster => p.max_combo >= 5,
            Achievement::FlawlessRun => p.score >= 50 && p.lives == p.starting_lives,
            Achievement::Survivor => p.elapsed_ms >= 60_000.0,
            Achievement::RainbowHunter => false,
        }
    }
}

/// Achievements unlocked this session, in unlock order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementTracker {
    unlocked: Vec<Achievement>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every locked predicate; returns the ones that just unlocked
    pub fn evaluate(&mut self, progress: &Progress) -> Vec<Achievement> {
        let fresh: Vec<Achievement> = Achievement::ALL
            .into_iter()
            .filter(|a| !a.is_manual() && !self.is_unlocked(*a) && a.is_met(progress))
            .collect();
        self.unlocked.extend_from_slice(&fresh);
        fresh
    }

    /// Unlock directly; false if it was already unlocked
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.is_unlocked(achievement) {
            return false;
        }
        self.unlocked.push(achievement);
        true
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }

    pub fn names(&self) -> Vec<String> {
        self.unlocked.iter().map(|a| a.name().to_string()).collect()
    }
}
