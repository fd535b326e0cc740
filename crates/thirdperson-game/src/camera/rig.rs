//! Spring arm and follow camera

use glam::Vec3;
use thirdperson_core::Rotator;

use super::CameraConfig;

/// Arm that holds the camera behind the character
#[derive(Debug, Clone)]
pub struct SpringArm {
    /// Distance from the pivot to the camera when unobstructed
    pub target_arm_length: f32,
    /// Whether the arm follows the control rotation instead of the actor
    pub use_pawn_control_rotation: bool,
    /// Whether the arm shortens when blocked
    pub do_collision_test: bool,
    /// Clearance kept from blocking geometry
    pub collision_radius: f32,
}

/// Camera attached to the end of the arm
#[derive(Debug, Clone)]
pub struct FollowCamera {
    /// Whether the camera copies the control rotation instead of the arm's
    pub use_pawn_control_rotation: bool,
}

/// Final camera placement for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub location: Vec3,
    pub rotation: Rotator,
}

/// Camera boom plus follow camera
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// The boom (spring arm)
    pub boom: SpringArm,
    /// The camera on the end of the boom
    pub camera: FollowCamera,
    /// Pivot height above the actor location
    pub pivot_height: f32,
}

impl CameraRig {
    /// Create a rig with default configuration
    pub fn new() -> Self {
        Self::with_config(&CameraConfig::default())
    }

    /// Create a rig from configuration
    pub fn with_config(config: &CameraConfig) -> Self {
        Self {
            boom: SpringArm {
                target_arm_length: config.target_arm_length,
                use_pawn_control_rotation: config.boom_use_pawn_control_rotation,
                do_collision_test: config.do_collision_test,
                collision_radius: config.collision_radius,
            },
            camera: FollowCamera {
                use_pawn_control_rotation: config.camera_use_pawn_control_rotation,
            },
            pivot_height: config.pivot_height,
        }
    }

    /// Point the arm rotates around
    pub fn pivot(&self, actor_location: Vec3) -> Vec3 {
        actor_location + Vec3::Z * self.pivot_height
    }

    /// Orientation of the arm for this frame
    pub fn arm_rotation(
        &self,
        actor_rotation: Rotator,
        control_rotation: Option<Rotator>,
    ) -> Rotator {
        match control_rotation {
            Some(control) if self.boom.use_pawn_control_rotation => control,
            _ => actor_rotation,
        }
    }

    /// Arm length given the distance at which geometry blocks the arm, if any
    pub fn arm_length(&self, blocked_at: Option<f32>) -> f32 {
        match blocked_at {
            Some(distance) if self.boom.do_collision_test => (distance - self.boom.collision_radius)
                .clamp(0.0, self.boom.target_arm_length),
            _ => self.boom.target_arm_length,
        }
    }

    /// Compute the camera placement
    pub fn view(
        &self,
        actor_location: Vec3,
        actor_rotation: Rotator,
        control_rotation: Option<Rotator>,
        blocked_at: Option<f32>,
    ) -> CameraView {
        let arm_rotation = self.arm_rotation(actor_rotation, control_rotation);
        let length = self.arm_length(blocked_at);
        let location = self.pivot(actor_location) - arm_rotation.forward_vector() * length;

        let rotation = match control_rotation {
            Some(control) if self.camera.use_pawn_control_rotation => control,
            _ => arm_rotation,
        };

        CameraView { location, rotation }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
