//! Demo settings with persistence
//!
//! Settings are saved to `~/.config/thirdperson/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use serde::{Deserialize, Serialize};
use thirdperson_game::DEFAULT_PAWN_CLASS;
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub simulation: SimulationSettings,
    pub character: CharacterSettings,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("thirdperson"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk.
    ///
    /// A missing file is created with the defaults so there is something to edit.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            let settings = Self::default();
            match settings.save_to(&path) {
                Ok(()) => info!("No settings file found, wrote defaults to {:?}", path),
                Err(e) => warn!("No settings file found and writing defaults failed: {:#}", e),
            }
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write settings as TOML, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of frames to run
    pub frames: u32,
    /// Seconds per frame
    pub frame_delta: f32,
    /// Time scale multiplier
    pub time_scale: f32,
    /// Log the player state every this many frames
    pub log_interval: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 240,
            frame_delta: 1.0 / 60.0,
            time_scale: 1.0,
            log_interval: 30,
        }
    }
}

/// Player character settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Pawn class the game mode spawns
    pub pawn_class: String,
    /// Character config registered under `pawn_class`, replacing the stock one
    pub config_path: Option<PathBuf>,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            pawn_class: DEFAULT_PAWN_CLASS.to_string(),
            config_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DemoSettings::default();
        assert_eq!(settings.simulation.frames, 240);
        assert_eq!(settings.character.pawn_class, DEFAULT_PAWN_CLASS);
        assert!(settings.character.config_path.is_none());
    }

    #[test]
    fn test_saved_file_loads_back() {
        let dir = std::env::temp_dir().join(format!("thirdperson-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.toml");

        let mut settings = DemoSettings::default();
        settings.simulation.frames = 12;
        settings.save_to(&path).unwrap();

        let loaded = DemoSettings::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.simulation.frames, 12);
        assert_eq!(loaded.character.pawn_class, DEFAULT_PAWN_CLASS);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_partial_settings() {
        let settings = DemoSettings::parse(
            r#"
            [simulation]
            frames = 10

            [character]
            config_path = "/tmp/character.toml"
            "#,
        )
        .unwrap();
        assert_eq!(settings.simulation.frames, 10);
        assert_eq!(settings.simulation.log_interval, 30);
        assert_eq!(
            settings.character.config_path,
            Some(PathBuf::from("/tmp/character.toml"))
        );
    }
}
