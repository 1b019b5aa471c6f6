//! Player preferences and session configuration
//!
//! Persisted as JSON next to the score file. Missing fields take their
//! defaults and unknown difficulty/ship names fall back to easy/blue, so an
//! old or hand-edited file never blocks a session from starting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use crate::persistence::StoreError;
use crate::sim::{Arena, Difficulty, SessionConfig};

/// Name used when the player leaves theirs blank
pub const DEFAULT_PLAYER_NAME: &str = "Pilot";

/// Ship colour variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipColor {
    #[default]
    Blue,
    Red,
    Green,
    Purple,
    Gold,
}

/// Hull colours for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipPalette {
    pub main: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

impl ShipColor {
    pub const ALL: [ShipColor; 5] = [
        ShipColor::Blue,
        ShipColor::Red,
        ShipColor::Green,
        ShipColor::Purple,
        ShipColor::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipColor::Blue => "blue",
            ShipColor::Red => "red",
            ShipColor::Green => "green",
            ShipColor::Purple => "purple",
            ShipColor::Gold => "gold",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "blue" => Some(ShipColor::Blue),
            "red" => Some(ShipColor::Red),
            "green" => Some(ShipColor::Green),
            "purple" => Some(ShipColor::Purple),
            "gold" => Some(ShipColor::Gold),
            _ => None,
        }
    }

    /// Parse a selection, falling back to blue
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("Unknown ship colour {:?}, using blue", s);
            ShipColor::default()
        })
    }

    pub fn palette(&self) -> ShipPalette {
        match self {
            ShipColor::Blue => ShipPalette {
                main: "#4fc3f7",
                light: "#81d4fa",
                dark: "#0288d1",
            },
            ShipColor::Red => ShipPalette {
                main: "#ff6b6b",
                light: "#ff8787",
                dark: "#c92a2a",
            },
            ShipColor::Green => ShipPalette {
                main: "#51cf66",
                light: "#8ce99a",
                dark: "#2f9e44",
            },
            ShipColor::Purple => ShipPalette {
                main: "#cc5de8",
                light: "#e599f7",
                dark: "#9c36b5",
            },
            ShipColor::Gold => ShipPalette {
                main: "#ffd700",
                light: "#ffe066",
                dark: "#f59f00",
            },
        }
    }
}

impl From<String> for ShipColor {
    fn from(s: String) -> Self {
        Self::parse_or_default(&s)
    }
}

impl From<ShipColor> for String {
    fn from(c: ShipColor) -> Self {
        c.as_str().to_string()
    }
}

/// Trimmed player name, or the default when blank
pub fn normalize_player_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub ship: ShipColor,
    pub player_name: String,

    // === Play area ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed for reproducible runs (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            ship: ShipColor::Blue,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            master_volume: 0.8,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Session parameters derived from these settings
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            arena: Arena::new(self.arena_width, self.arena_height),
            ship: self.ship,
            seed: self.seed,
        }
    }

    /// Parse settings JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.player_name = normalize_player_name(&settings.player_name);
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
