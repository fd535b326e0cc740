//! Third-person character: boost dash and aim lock on top of walking locomotion

use glam::Vec3;
use thirdperson_core::{ActorId, Rotator};
use tracing::{debug, trace};

use crate::camera::CameraRig;
use crate::config::CharacterConfig;
use crate::host::CharacterHost;
use crate::input::{ButtonState, InputAction, InputAxis, InputEvent};

use super::{AimController, BoostController, CharacterMovement, PlayerController};

/// Player-controlled third-person character
#[derive(Debug, Clone)]
pub struct ThirdPersonCharacter {
    /// Degrees per second for a full-scale turn-rate input
    pub base_turn_rate: f32,
    /// Degrees per second for a full-scale look-up-rate input
    pub base_look_up_rate: f32,
    /// Which control rotation axes the actor copies every frame
    pub use_controller_rotation: [bool; 3],
    /// Boost dash
    pub boost: BoostController,
    /// Aim lock
    pub aim: AimController,
    /// Walking locomotion
    pub movement: CharacterMovement,
    /// Camera boom and follow camera
    pub camera: CameraRig,
    /// Possessing controller, if any
    controller: Option<PlayerController>,
}

impl ThirdPersonCharacter {
    /// Create a character with default configuration
    pub fn new() -> Self {
        Self::with_config(&CharacterConfig::default())
    }

    /// Create a character from configuration
    pub fn with_config(config: &CharacterConfig) -> Self {
        Self {
            base_turn_rate: config.base_turn_rate,
            base_look_up_rate: config.base_look_up_rate,
            use_controller_rotation: [
                config.use_controller_rotation_pitch,
                config.use_controller_rotation_yaw,
                config.use_controller_rotation_roll,
            ],
            boost: BoostController::with_config(config.boost.clone()),
            aim: AimController::with_config(config.aim.clone()),
            movement: CharacterMovement::with_config(config.movement.clone()),
            camera: CameraRig::with_config(&config.camera),
            controller: None,
        }
    }

    /// Attach a controller to this character
    pub fn possess(&mut self, controller: PlayerController) {
        self.controller = Some(controller);
    }

    /// Detach and return the controller
    pub fn unpossess(&mut self) -> Option<PlayerController> {
        self.controller.take()
    }

    /// The possessing controller
    pub fn controller(&self) -> Option<&PlayerController> {
        self.controller.as_ref()
    }

    /// Control rotation of the possessing controller
    pub fn control_rotation(&self) -> Option<Rotator> {
        self.controller.as_ref().map(PlayerController::control_rotation)
    }

    /// Check if a boost dash is in progress
    pub fn is_boosting(&self) -> bool {
        self.boost.is_boosting()
    }

    /// Check if aim lock is active
    pub fn is_aiming(&self) -> bool {
        self.aim.is_aiming()
    }

    /// Set or clear the aim target
    pub fn set_target(&mut self, target: Option<ActorId>) {
        self.aim.target = target;
    }

    /// Route an input event to its handler
    pub fn handle_input<H: CharacterHost + ?Sized>(&mut self, host: &mut H, event: &InputEvent) {
        match *event {
            InputEvent::Action { action, state } => match (action, state) {
                (InputAction::Jump, ButtonState::Pressed) => self.jump(),
                (InputAction::Jump, ButtonState::Released) => self.stop_jumping(),
                (InputAction::Boost, ButtonState::Pressed) => self.boost_start(&*host),
                (InputAction::Aim, ButtonState::Pressed) => self.aim_start(),
                (InputAction::Aim, ButtonState::Released) => self.aim_end(),
                (InputAction::ResetVr, ButtonState::Pressed) => self.on_reset_vr(host),
                _ => {}
            },
            InputEvent::Axis { axis, value } => match axis {
                InputAxis::MoveForward => self.move_forward(value),
                InputAxis::MoveRight => self.move_right(value),
                InputAxis::Turn => self.add_controller_yaw_input(value),
                InputAxis::TurnRate => self.turn_at_rate(&*host, value),
                InputAxis::LookUp => self.add_controller_pitch_input(value),
                InputAxis::LookUpRate => self.look_up_at_rate(&*host, value),
            },
            InputEvent::Touch {
                finger,
                location,
                state,
            } => match state {
                ButtonState::Pressed => self.touch_started(finger, location),
                ButtonState::Released => self.touch_stopped(finger, location),
            },
        }
    }

    /// Begin a boost dash unless one is already running.
    ///
    /// Walking momentum and a pending jump are discarded when the dash starts.
    pub fn boost_start<H: CharacterHost + ?Sized>(&mut self, host: &H) {
        if self.boost.start(host) {
            self.movement.stop_horizontal_movement();
            self.movement.stop_jumping();
        }
    }

    /// End the dash if the host has arrived at the end target
    pub fn boost_end<H: CharacterHost + ?Sized>(&mut self, host: &H) {
        self.boost.check_arrival(host.location());
    }

    /// Enter aim lock
    pub fn aim_start(&mut self) {
        self.aim.start();
    }

    /// Leave aim lock
    pub fn aim_end(&mut self) {
        self.aim.end(&mut self.camera);
    }

    /// Forward/backward movement request
    pub fn move_forward(&mut self, value: f32) {
        self.add_movement_along(value, |yaw| yaw.forward_vector());
    }

    /// Side-to-side movement request
    pub fn move_right(&mut self, value: f32) {
        self.add_movement_along(value, |yaw| yaw.right_vector());
    }

    /// Turn at a normalized rate (1.0 = `base_turn_rate` degrees per second)
    pub fn turn_at_rate<H: CharacterHost + ?Sized>(&mut self, host: &H, rate: f32) {
        self.add_controller_yaw_input(rate * self.base_turn_rate * host.delta_seconds());
    }

    /// Look up/down at a normalized rate (1.0 = `base_look_up_rate` degrees per second)
    pub fn look_up_at_rate<H: CharacterHost + ?Sized>(&mut self, host: &H, rate: f32) {
        self.add_controller_pitch_input(rate * self.base_look_up_rate * host.delta_seconds());
    }

    /// Yaw look input; dropped while aiming
    pub fn add_controller_yaw_input(&mut self, value: f32) {
        if self.is_aiming() {
            return;
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.add_yaw_input(value);
        }
    }

    /// Pitch look input; dropped while aiming
    pub fn add_controller_pitch_input(&mut self, value: f32) {
        if self.is_aiming() {
            return;
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.add_pitch_input(value);
        }
    }

    /// Request a jump
    pub fn jump(&mut self) {
        self.movement.jump();
    }

    /// Release the jump request
    pub fn stop_jumping(&mut self) {
        self.movement.stop_jumping();
    }

    /// Touch press; jumps
    pub fn touch_started(&mut self, finger: u64, location: Vec3) {
        trace!(finger, ?location, "Touch started");
        self.jump();
    }

    /// Touch release; stops jumping
    pub fn touch_stopped(&mut self, finger: u64, location: Vec3) {
        trace!(finger, ?location, "Touch stopped");
        self.stop_jumping();
    }

    /// Reset head-mounted display orientation and position
    pub fn on_reset_vr<H: CharacterHost + ?Sized>(&mut self, host: &mut H) {
        debug!("Resetting VR orientation");
        host.reset_vr();
    }

    /// Per-frame update.
    ///
    /// Look input gathered since the last frame is applied first, then
    /// locomotion, the dash, and finally the aim lock. While dashing, movement
    /// input is dropped but gravity and jumps still apply.
    pub fn tick<H: CharacterHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        if let Some(controller) = self.controller.as_mut() {
            controller.update_rotation();
        }

        if self.is_boosting() {
            self.movement.consume_input_vector();
        }
        self.movement.tick(host, dt);

        self.boost.tick(host, dt);
        self.aim.tick(host, self.controller.as_mut());

        self.face_control_rotation(host);
    }

    /// Copy the enabled control rotation axes onto the actor
    fn face_control_rotation<H: CharacterHost + ?Sized>(&self, host: &mut H) {
        let [pitch, yaw, roll] = self.use_controller_rotation;
        if !(pitch || yaw || roll) {
            return;
        }
        let Some(control) = self.control_rotation() else {
            return;
        };

        let mut rotation = host.rotation();
        if pitch {
            rotation.pitch = control.pitch;
        }
        if yaw {
            rotation.yaw = control.yaw;
        }
        if roll {
            rotation.roll = control.roll;
        }
        host.set_rotation(rotation);
    }

    /// Add movement along an axis of the controller's yaw-only rotation
    fn add_movement_along(&mut self, value: f32, axis: impl Fn(Rotator) -> Vec3) {
        if value == 0.0 || self.is_boosting() {
            return;
        }
        let Some(controller) = self.controller.as_ref() else {
            return;
        };

        let direction = axis(controller.control_rotation().yaw_only());
        self.movement.add_input_vector(direction * value);
    }
}

impl Default for ThirdPersonCharacter {
    fn default() -> Self {
        Self::new()
    }
}
