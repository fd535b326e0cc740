//! Player controller owning the control rotation
//!
//! Look input accumulates during the frame and is applied once by
//! [`PlayerController::update_rotation`]. The camera rig reads the resulting
//! control rotation.

use thirdperson_core::Rotator;

/// Player controller handling control rotation
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Multiplier applied to yaw input
    pub input_yaw_scale: f32,
    /// Multiplier applied to pitch input
    pub input_pitch_scale: f32,
    /// Lowest allowed view pitch in degrees
    pub view_pitch_min: f32,
    /// Highest allowed view pitch in degrees
    pub view_pitch_max: f32,
    /// Rotation the camera follows
    control_rotation: Rotator,
    /// Input accumulated since the last update
    rotation_input: Rotator,
}

impl PlayerController {
    /// Create a new player controller
    pub fn new() -> Self {
        Self {
            input_yaw_scale: 2.5,
            input_pitch_scale: -2.5,
            view_pitch_min: -89.9,
            view_pitch_max: 89.9,
            control_rotation: Rotator::ZERO,
            rotation_input: Rotator::ZERO,
        }
    }

    /// Current control rotation
    pub fn control_rotation(&self) -> Rotator {
        self.control_rotation
    }

    /// Replace the control rotation
    pub fn set_control_rotation(&mut self, rotation: Rotator) {
        self.control_rotation = rotation;
    }

    /// Input that will be applied on the next update
    pub fn pending_rotation_input(&self) -> Rotator {
        self.rotation_input
    }

    /// Accumulate yaw input
    pub fn add_yaw_input(&mut self, value: f32) {
        self.rotation_input.yaw += value * self.input_yaw_scale;
    }

    /// Accumulate pitch input
    pub fn add_pitch_input(&mut self, value: f32) {
        self.rotation_input.pitch += value * self.input_pitch_scale;
    }

    /// Apply accumulated input, clamp pitch and clear the accumulator
    pub fn update_rotation(&mut self) {
        let mut rotation = self.control_rotation + self.rotation_input;
        rotation.pitch = Rotator::normalize_axis(rotation.pitch)
            .clamp(self.view_pitch_min, self.view_pitch_max);
        rotation.yaw = Rotator::normalize_axis(rotation.yaw);
        rotation.roll = Rotator::normalize_axis(rotation.roll);

        self.control_rotation = rotation;
        self.rotation_input = Rotator::ZERO;
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_controller_creation() {
        let controller = PlayerController::new();
        assert_eq!(controller.control_rotation(), Rotator::ZERO);
    }

    #[test]
    fn test_input_is_scaled_and_applied_once() {
        let mut controller = PlayerController::new();
        controller.add_yaw_input(2.0);
        controller.add_pitch_input(-4.0);
        assert_eq!(controller.control_rotation(), Rotator::ZERO);

        controller.update_rotation();
        assert!((controller.control_rotation().yaw - 5.0).abs() < 1e-5);
        assert!((controller.control_rotation().pitch - 10.0).abs() < 1e-5);

        controller.update_rotation();
        assert!((controller.control_rotation().yaw - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_clamping() {
        let mut controller = PlayerController::new();
        controller.add_pitch_input(-40.0);
        controller.update_rotation();
        assert!((controller.control_rotation().pitch - 89.9).abs() < 1e-3);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut controller = PlayerController::new();
        controller.set_control_rotation(Rotator::from_yaw(170.0));
        controller.add_yaw_input(10.0);
        controller.update_rotation();
        assert!((controller.control_rotation().yaw + 165.0).abs() < 1e-3);
    }
}
