//! Walking, falling and jumping locomotion

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thirdperson_core::Rotator;

use crate::host::CharacterHost;

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in distance units per second
    pub max_walk_speed: f32,
    /// How fast input accelerates the character
    pub max_acceleration: f32,
    /// How fast the character stops on the ground without input
    pub braking_deceleration: f32,
    /// Initial upward velocity of a jump
    pub jump_z_velocity: f32,
    /// Fraction of acceleration available while falling
    pub air_control: f32,
    /// Gravity multiplier (1.0 = normal gravity)
    pub gravity_scale: f32,
    /// Downward acceleration before scaling
    pub gravity_z: f32,
    /// Turn the character towards the direction it moves in
    pub orient_rotation_to_movement: bool,
    /// Degrees per second used when orienting to movement
    pub rotation_rate: Rotator,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 600.0,
            max_acceleration: 2048.0,
            braking_deceleration: 2048.0,
            jump_z_velocity: 600.0,
            air_control: 0.2,
            gravity_scale: 1.0,
            gravity_z: -980.0,
            orient_rotation_to_movement: true,
            rotation_rate: Rotator::new(0.0, 540.0, 0.0),
        }
    }
}

impl MovementConfig {
    /// Get the current acceleration based on grounded state
    pub fn acceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.max_acceleration
        } else {
            self.max_acceleration * self.air_control
        }
    }
}

/// Locomotion driven by accumulated movement input
#[derive(Debug, Clone, Default)]
pub struct CharacterMovement {
    /// Movement configuration
    pub config: MovementConfig,
    /// Current velocity
    pub velocity: Vec3,
    /// Input accumulated since the last tick
    pending_input: Vec3,
    /// Whether a jump has been requested and not yet launched
    jump_requested: bool,
}

impl CharacterMovement {
    /// Create a movement component with custom config
    pub fn with_config(config: MovementConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Accumulate a world-space movement request
    pub fn add_input_vector(&mut self, input: Vec3) {
        self.pending_input += input;
    }

    /// Input accumulated so far this frame
    pub fn pending_input_vector(&self) -> Vec3 {
        self.pending_input
    }

    /// Take the accumulated input, clamped to unit length
    pub fn consume_input_vector(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_input).clamp_length_max(1.0)
    }

    /// Request a jump on the next grounded tick
    pub fn jump(&mut self) {
        self.jump_requested = true;
    }

    /// Cancel a pending jump request
    pub fn stop_jumping(&mut self) {
        self.jump_requested = false;
    }

    /// Drop horizontal velocity, keeping any fall or jump in progress
    pub fn stop_horizontal_movement(&mut self) {
        self.velocity.x = 0.0;
        self.velocity.y = 0.0;
    }

    /// Whether a jump is waiting to launch
    pub fn is_jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Integrate one frame of locomotion and move the host
    pub fn tick<H: CharacterHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        let input = self.consume_input_vector();
        if dt <= 0.0 {
            return;
        }

        let grounded = host.is_grounded();

        // Horizontal velocity
        let mut horizontal = Vec3::new(self.velocity.x, self.velocity.y, 0.0);
        let flat_input = Vec3::new(input.x, input.y, 0.0);
        if flat_input.length_squared() > 0.0 {
            let target_velocity = flat_input * self.config.max_walk_speed;
            horizontal = Self::move_towards_vec3(
                horizontal,
                target_velocity,
                self.config.acceleration(grounded) * dt,
            );
        } else if grounded {
            horizontal = Self::move_towards_vec3(
                horizontal,
                Vec3::ZERO,
                self.config.braking_deceleration * dt,
            );
        }

        // Vertical velocity
        let mut vertical = self.velocity.z;
        if grounded {
            if self.jump_requested {
                vertical = self.config.jump_z_velocity;
                self.jump_requested = false;
            } else if vertical < 0.0 {
                vertical = 0.0;
            }
        } else {
            vertical += self.config.gravity_z * self.config.gravity_scale * dt;
        }

        self.velocity = Vec3::new(horizontal.x, horizontal.y, vertical);

        let start = host.location();
        let result = host.sweep_to(start + self.velocity * dt);
        if result.blocking_hit {
            self.velocity = (result.location - start) / dt;
        }

        if self.config.orient_rotation_to_movement {
            self.orient_to_movement(host, horizontal, dt);
        }
    }

    /// Turn the host's yaw towards the horizontal velocity at the configured rate
    fn orient_to_movement<H: CharacterHost + ?Sized>(
        &self,
        host: &mut H,
        horizontal: Vec3,
        dt: f32,
    ) {
        if horizontal.length_squared() < 1.0e-4 {
            return;
        }

        let current = host.rotation();
        let desired_yaw = horizontal.y.atan2(horizontal.x).to_degrees();
        let max_step = self.config.rotation_rate.yaw * dt;
        let delta = Rotator::normalize_axis(desired_yaw - current.yaw).clamp(-max_step, max_step);

        host.set_rotation(Rotator::new(
            current.pitch,
            Rotator::normalize_axis(current.yaw + delta),
            current.roll,
        ));
    }

    /// Move a vector towards a target by a maximum delta
    fn move_towards_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
        let diff = target - current;
        let distance = diff.length();

        if distance <= max_delta || distance == 0.0 {
            target
        } else {
            current + diff / distance * max_delta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;

    #[test]
    fn test_move_towards() {
        let result = CharacterMovement::move_towards_vec3(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            5.0,
        );
        assert!((result.x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_input_is_consumed_and_clamped() {
        let mut movement = CharacterMovement::default();
        movement.add_input_vector(Vec3::X);
        movement.add_input_vector(Vec3::Y);
        let input = movement.consume_input_vector();
        assert!((input.length() - 1.0).abs() < 1e-5);
        assert_eq!(movement.pending_input_vector(), Vec3::ZERO);
    }

    #[test]
    fn test_walking_moves_and_orients() {
        let mut host = MockHost::new();
        let mut movement = CharacterMovement::default();

        for _ in 0..30 {
            movement.add_input_vector(Vec3::Y);
            movement.tick(&mut host, 1.0 / 60.0);
        }

        assert!(host.location.y > 0.0);
        assert!(host.location.x.abs() < 1e-3);
        assert!(movement.velocity.y <= movement.config.max_walk_speed + 1e-3);
        assert!((host.rotation.yaw - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_launches_only_when_grounded() {
        let mut host = MockHost::new();
        host.grounded = false;
        let mut movement = CharacterMovement::default();

        movement.jump();
        movement.tick(&mut host, 0.1);
        assert!(movement.velocity.z < 0.0);
        assert!(movement.is_jump_requested());

        host.grounded = true;
        movement.tick(&mut host, 0.1);
        assert_eq!(movement.velocity.z, 600.0);
        assert!(!movement.is_jump_requested());
    }

    #[test]
    fn test_stop_horizontal_keeps_vertical() {
        let mut movement = CharacterMovement::default();
        movement.velocity = Vec3::new(300.0, -200.0, -50.0);
        movement.stop_horizontal_movement();
        assert_eq!(movement.velocity, Vec3::new(0.0, 0.0, -50.0));
    }

    #[test]
    fn test_blocking_hit_stops_velocity() {
        let mut host = MockHost::new();
        host.wall_x = Some(1.0);
        let mut movement = CharacterMovement::default();
        movement.velocity = Vec3::new(600.0, 0.0, 0.0);

        movement.add_input_vector(Vec3::X);
        movement.tick(&mut host, 0.1);
        assert_eq!(host.location.x, 1.0);
        assert!((movement.velocity.x - 10.0).abs() < 1e-3);
    }
}
