//! Aim lock: face a designated target actor while the aim input is held

use serde::{Deserialize, Serialize};
use thirdperson_core::{find_look_at_rotation, ActorId, Rotator};
use tracing::{debug, trace};

use crate::camera::CameraRig;
use crate::host::CharacterHost;

use super::PlayerController;

/// Aim configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Rotation added on top of the look-at rotation for the camera
    pub camera_offset: Rotator,
}

/// Aim lock state
#[derive(Debug, Clone, Default)]
pub struct AimController {
    /// Configuration
    pub config: AimConfig,
    /// Actor to look at. Not owned; may refer to an actor that no longer exists
    pub target: Option<ActorId>,
    /// Whether the aim input is held
    is_aiming: bool,
}

impl AimController {
    /// Create an aim controller with custom config
    pub fn with_config(config: AimConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Check if aim lock is active
    pub fn is_aiming(&self) -> bool {
        self.is_aiming
    }

    /// Enter aim lock. The target is not validated here.
    pub fn start(&mut self) {
        self.is_aiming = true;
        debug!(aim_target = ?self.target, "Aim started");
    }

    /// Leave aim lock and stop the follow camera tracking the control rotation
    pub fn end(&mut self, rig: &mut CameraRig) {
        self.is_aiming = false;
        rig.camera.use_pawn_control_rotation = false;
        debug!("Aim ended");
    }

    /// Face the target for one frame.
    ///
    /// The controller gets the full look-at rotation plus the camera offset;
    /// the actor body only takes its yaw. Skipped when the target is missing.
    pub fn tick<H: CharacterHost + ?Sized>(
        &self,
        host: &mut H,
        controller: Option<&mut PlayerController>,
    ) {
        if !self.is_aiming {
            return;
        }

        let Some(target_location) = self.target.and_then(|id| host.actor_location(id)) else {
            trace!(aim_target = ?self.target, "Aim target unavailable");
            return;
        };

        let mut rotation = find_look_at_rotation(host.location(), target_location);
        if let Some(controller) = controller {
            controller.set_control_rotation(rotation + self.config.camera_offset);
        }

        rotation.pitch = 0.0;
        host.set_rotation(rotation);
    }
}
