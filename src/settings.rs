//! Game settings and difficulty presets
//!
//! The difficulty preset is read once at session start and is immutable for
//! the session; the simulation core never reads settings mid-game.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty levels, each selecting a full preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

/// Session parameters selected by a difficulty level
#[derive(Debug, Clone, Copy)]
pub struct DifficultyPreset {
    pub label: &'static str,
    /// Starting (and maximum) ship health
    pub start_health: f32,
    /// Initial asteroid/starfield speed multiplier
    pub speed_multiplier: f32,
    /// Minimum milliseconds between shots
    pub shoot_interval_ms: f64,
    /// Fraction of missing health restored by a health pickup
    pub heal_factor: f32,
}

impl Difficulty {
    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                label: "EASY",
                start_health: 40.0,
                speed_multiplier: 0.4,
                shoot_interval_ms: 80.0,
                heal_factor: 0.8,
            },
            Difficulty::Normal => DifficultyPreset {
                label: "NORMAL",
                start_health: 25.0,
                speed_multiplier: 0.5,
                shoot_interval_ms: 100.0,
                heal_factor: 0.6,
            },
            Difficulty::Hard => DifficultyPreset {
                label: "HARD",
                start_health: 15.0,
                speed_multiplier: 0.6,
                shoot_interval_ms: 120.0,
                heal_factor: 0.4,
            },
            Difficulty::Expert => DifficultyPreset {
                label: "EXPERT",
                start_health: 10.0,
                speed_multiplier: 0.7,
                shoot_interval_ms: 150.0,
                heal_factor: 0.2,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.preset().label
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

/// Persisted player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Selected difficulty (applied at the next session start)
    pub difficulty: Difficulty,
    /// Audio mute flag
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any
    /// error; a missing or corrupt file never prevents play.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Settings file unreadable ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        let normal = Difficulty::Normal.preset();
        assert_eq!(normal.start_health, 25.0);
        assert_eq!(normal.speed_multiplier, 0.5);
        assert_eq!(normal.shoot_interval_ms, 100.0);
        assert_eq!(normal.heal_factor, 0.6);

        let expert = Difficulty::Expert.preset();
        assert_eq!(expert.start_health, 10.0);
        assert_eq!(expert.heal_factor, 0.2);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for d in [
            Difficulty::Easy,
            Difficulty::Normal,
            Difficulty::Hard,
            Difficulty::Expert,
        ] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let settings = Settings::load_or_default(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.difficulty, Difficulty::Normal);
        assert!(!settings.muted);
    }
}
