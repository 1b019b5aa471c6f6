//! Difficulty presets

use serde::{Deserialize, Serialize};

/// Difficulty selection. Unknown names fall back to [`Difficulty::Easy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Spawn rates, speeds and lives for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Per-tick asteroid chance at score 0
    pub hazard_rate: f64,
    /// Per-tick star chance
    pub collectible_rate: f64,
    /// Asteroid fall speed floor (units per tick)
    pub hazard_speed: f32,
    pub lives: u8,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a selection, falling back to easy
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using easy", s);
            Difficulty::default()
        })
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                hazard_rate: 0.01,
                collectible_rate: 0.025,
                hazard_speed: 2.0,
                lives: 5,
            },
            Difficulty::Medium => DifficultyProfile {
                hazard_rate: 0.018,
                collectible_rate: 0.02,
                hazard_speed: 3.0,
                lives: 3,
            },
            Difficulty::Hard => DifficultyProfile {
                hazard_rate: 0.025,
                collectible_rate: 0.015,
                hazard_speed: 4.0,
                lives: 2,
            },
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Self::parse_or_default(&s)
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.as_str().to_string()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
