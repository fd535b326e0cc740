//! Per-character configuration
//!
//! Every value here is editable per character instance. Missing TOML keys fall
//! back to their defaults:
//!
//! ```toml
//! base_turn_rate = 45.0
//!
//! [boost]
//! distance = 800.0
//!
//! [aim.camera_offset]
//! pitch = -10.0
//! yaw = 0.0
//! roll = 0.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::player::{AimConfig, BoostConfig, MovementConfig};

/// Full configuration of a third-person character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Collision capsule radius
    pub capsule_radius: f32,
    /// Collision capsule half height
    pub capsule_half_height: f32,
    /// Degrees per second for a full-scale turn-rate input
    pub base_turn_rate: f32,
    /// Degrees per second for a full-scale look-up-rate input
    pub base_look_up_rate: f32,
    /// Copy the control rotation's pitch onto the actor every frame
    pub use_controller_rotation_pitch: bool,
    /// Copy the control rotation's yaw onto the actor every frame
    pub use_controller_rotation_yaw: bool,
    /// Copy the control rotation's roll onto the actor every frame
    pub use_controller_rotation_roll: bool,
    pub boost: BoostConfig,
    pub aim: AimConfig,
    pub camera: CameraConfig,
    pub movement: MovementConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            capsule_radius: 42.0,
            capsule_half_height: 96.0,
            base_turn_rate: 45.0,
            base_look_up_rate: 45.0,
            use_controller_rotation_pitch: false,
            use_controller_rotation_yaw: false,
            use_controller_rotation_roll: false,
            boost: BoostConfig::default(),
            aim: AimConfig::default(),
            camera: CameraConfig::default(),
            movement: MovementConfig::default(),
        }
    }
}

impl CharacterConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded character config from {:?}", path);
        Ok(config)
    }
}
