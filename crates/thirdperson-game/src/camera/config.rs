//! Camera configuration

use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the pivot to the camera when nothing is in the way
    pub target_arm_length: f32,
    /// Rotate the arm with the controller's control rotation
    pub boom_use_pawn_control_rotation: bool,
    /// Rotate the camera itself with the control rotation, relative to the arm
    pub camera_use_pawn_control_rotation: bool,
    /// Pull the camera in when world geometry blocks the arm
    pub do_collision_test: bool,
    /// Clearance kept between the camera and blocking geometry
    pub collision_radius: f32,
    /// Pivot height above the actor location
    pub pivot_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target_arm_length: 300.0,
            boom_use_pawn_control_rotation: true,
            camera_use_pawn_control_rotation: false,
            do_collision_test: true,
            collision_radius: 12.0,
            pivot_height: 0.0,
        }
    }
}
