//! Input system with action and axis mapping
//!
//! Raw winit events go through [`InputHandler`], which turns them into
//! [`InputEvent`]s. The character only ever sees `InputEvent`s, so any other
//! input source can drive it by constructing events directly.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton, TouchPhase};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Discrete actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Jump (Space by default)
    Jump,
    /// Boost dash (Left Shift by default)
    Boost,
    /// Aim lock while held (right mouse button by default)
    Aim,
    /// Reset VR headset orientation (R by default)
    ResetVr,
}

/// Continuous axes, reported every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAxis {
    /// Forward/backward movement (W/S)
    MoveForward,
    /// Right/left movement (D/A)
    MoveRight,
    /// Absolute yaw delta (mouse X)
    Turn,
    /// Normalized yaw rate (Left/Right arrows, analog stick)
    TurnRate,
    /// Absolute pitch delta (mouse Y)
    LookUp,
    /// Normalized pitch rate (analog stick)
    LookUpRate,
}

impl InputAxis {
    pub const ALL: [InputAxis; 6] = [
        InputAxis::MoveForward,
        InputAxis::MoveRight,
        InputAxis::Turn,
        InputAxis::TurnRate,
        InputAxis::LookUp,
        InputAxis::LookUpRate,
    ];
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl From<ElementState> for ButtonState {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => ButtonState::Pressed,
            ElementState::Released => ButtonState::Released,
        }
    }
}

/// A single input event delivered to the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Action { action: InputAction, state: ButtonState },
    Axis { axis: InputAxis, value: f32 },
    Touch { finger: u64, location: Vec3, state: ButtonState },
}

impl InputEvent {
    pub fn pressed(action: InputAction) -> Self {
        InputEvent::Action {
            action,
            state: ButtonState::Pressed,
        }
    }

    pub fn released(action: InputAction) -> Self {
        InputEvent::Action {
            action,
            state: ButtonState::Released,
        }
    }

    pub fn axis(axis: InputAxis, value: f32) -> Self {
        InputEvent::Axis { axis, value }
    }
}

/// Binding of a physical input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

/// Maps physical inputs to actions and scaled axes
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key/button to action mappings
    actions: HashMap<InputBinding, InputAction>,
    /// Key to axis contributions
    axes: HashMap<InputBinding, (InputAxis, f32)>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            actions: HashMap::new(),
            axes: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind_axis(KeyCode::KeyW, InputAxis::MoveForward, 1.0);
        bindings.bind_axis(KeyCode::KeyS, InputAxis::MoveForward, -1.0);
        bindings.bind_axis(KeyCode::KeyD, InputAxis::MoveRight, 1.0);
        bindings.bind_axis(KeyCode::KeyA, InputAxis::MoveRight, -1.0);

        // Arrow keys as alternative
        bindings.bind_axis(KeyCode::ArrowUp, InputAxis::MoveForward, 1.0);
        bindings.bind_axis(KeyCode::ArrowDown, InputAxis::MoveForward, -1.0);
        bindings.bind_axis(KeyCode::ArrowRight, InputAxis::TurnRate, 1.0);
        bindings.bind_axis(KeyCode::ArrowLeft, InputAxis::TurnRate, -1.0);

        // Actions
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Boost);
        bindings.bind(KeyCode::KeyR, InputAction::ResetVr);
        bindings.bind_mouse(1, InputAction::Aim); // Right mouse button

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.actions.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.actions.insert(InputBinding::Mouse(button), action);
    }

    /// Bind a key to contribute `scale` to an axis while held
    pub fn bind_axis(&mut self, key: KeyCode, axis: InputAxis, scale: f32) {
        self.axes.insert(InputBinding::Key(key), (axis, scale));
    }

    /// Remove every binding of a key
    pub fn unbind(&mut self, key: KeyCode) {
        let binding = InputBinding::Key(key);
        self.actions.remove(&binding);
        self.axes.remove(&binding);
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.actions.get(binding).copied()
    }

    /// Get the axis contribution for a binding, if any
    pub fn get_axis(&self, binding: &InputBinding) -> Option<(InputAxis, f32)> {
        self.axes.get(binding).copied()
    }
}

/// Input handler that turns raw winit events into [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    /// Input bindings
    pub bindings: InputBindings,
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
    /// Bindings currently held down
    held: HashSet<InputBinding>,
    /// Action and touch events in arrival order
    queued: Vec<InputEvent>,
    /// Mouse movement accumulated this frame
    mouse_delta: (f32, f32),
    /// Analog values set by the caller (gamepad sticks)
    analog: HashMap<InputAxis, f32>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
            held: HashSet::new(),
            queued: Vec::new(),
            mouse_delta: (0.0, 0.0),
            analog: HashMap::new(),
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.handle_binding(InputBinding::Key(key_code), element_state);
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };
        self.handle_binding(InputBinding::Mouse(button_id), state);
    }

    /// Handle mouse movement (winit reports +Y downwards)
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        self.mouse_delta.0 += delta.0 as f32 * self.mouse_sensitivity;
        self.mouse_delta.1 += delta.1 as f32 * self.mouse_sensitivity * y_mult;
    }

    /// Handle a touch event. Moves are ignored.
    pub fn handle_touch(&mut self, finger: u64, location: (f64, f64), phase: TouchPhase) {
        let state = match phase {
            TouchPhase::Started => ButtonState::Pressed,
            TouchPhase::Ended | TouchPhase::Cancelled => ButtonState::Released,
            TouchPhase::Moved => return,
        };
        self.queued.push(InputEvent::Touch {
            finger,
            location: Vec3::new(location.0 as f32, location.1 as f32, 0.0),
            state,
        });
    }

    /// Set an analog axis value (e.g. a gamepad stick) until changed
    pub fn set_analog(&mut self, axis: InputAxis, value: f32) {
        self.analog.insert(axis, value);
    }

    /// Current value of an axis from held keys, analog input and mouse motion
    pub fn axis_value(&self, axis: InputAxis) -> f32 {
        let keys: f32 = self
            .held
            .iter()
            .filter_map(|binding| self.bindings.get_axis(binding))
            .filter(|(bound, _)| *bound == axis)
            .map(|(_, scale)| scale)
            .sum();

        let mouse = match axis {
            InputAxis::Turn => self.mouse_delta.0,
            InputAxis::LookUp => self.mouse_delta.1,
            _ => 0.0,
        };

        keys + mouse + self.analog.get(&axis).copied().unwrap_or(0.0)
    }

    /// Take this frame's events: queued actions first, then one event per axis.
    /// Clears per-frame mouse motion.
    pub fn drain_frame(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.queued);
        events.extend(
            InputAxis::ALL
                .iter()
                .map(|&axis| InputEvent::axis(axis, self.axis_value(axis))),
        );
        self.mouse_delta = (0.0, 0.0);
        events
    }

    fn handle_binding(&mut self, binding: InputBinding, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Ignore key repeat
                if !self.held.insert(binding) {
                    return;
                }
            }
            ElementState::Released => {
                self.held.remove(&binding);
            }
        }

        if let Some(action) = self.bindings.get_action(&binding) {
            self.queued.push(InputEvent::Action {
                action,
                state: state.into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_of(events: &[InputEvent], wanted: InputAxis) -> f32 {
        events
            .iter()
            .find_map(|event| match *event {
                InputEvent::Axis { axis, value } if axis == wanted => Some(value),
                _ => None,
            })
            .unwrap_or(f32::NAN)
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_action(&KeyCode::Space.into()),
            Some(InputAction::Jump)
        );
        assert_eq!(
            bindings.get_action(&InputBinding::Mouse(1)),
            Some(InputAction::Aim)
        );
        assert_eq!(
            bindings.get_axis(&KeyCode::KeyA.into()),
            Some((InputAxis::MoveRight, -1.0))
        );
    }

    #[test]
    fn test_unbind_removes_action_and_axis() {
        let mut bindings = InputBindings::default();
        bindings.bind(KeyCode::KeyW, InputAction::Jump);
        bindings.unbind(KeyCode::KeyW);
        assert_eq!(bindings.get_action(&KeyCode::KeyW.into()), None);
        assert_eq!(bindings.get_axis(&KeyCode::KeyW.into()), None);

        let mut handler = InputHandler::new();
        handler.bindings = bindings;
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed);
        let events = handler.drain_frame();
        assert_eq!(events.len(), InputAxis::ALL.len());
        assert_eq!(axis_of(&events, InputAxis::MoveForward), 0.0);
    }

    #[test]
    fn test_actions_are_queued_once_per_press() {
        let mut handler = InputHandler::new();
        let shift = PhysicalKey::Code(KeyCode::ShiftLeft);
        handler.handle_keyboard(shift, ElementState::Pressed);
        handler.handle_keyboard(shift, ElementState::Pressed);
        handler.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        handler.handle_mouse_button(MouseButton::Right, ElementState::Released);

        let events = handler.drain_frame();
        assert_eq!(events[0], InputEvent::pressed(InputAction::Boost));
        assert_eq!(events[1], InputEvent::pressed(InputAction::Aim));
        assert_eq!(events[2], InputEvent::released(InputAction::Aim));
        assert_eq!(events.len(), 3 + InputAxis::ALL.len());
    }

    #[test]
    fn test_axes_sum_held_keys_and_mouse() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed);
        handler.handle_mouse_motion((3.0, -2.0));
        handler.set_analog(InputAxis::LookUpRate, 0.5);

        let events = handler.drain_frame();
        assert_eq!(axis_of(&events, InputAxis::MoveForward), 1.0);
        assert_eq!(axis_of(&events, InputAxis::MoveRight), -1.0);
        assert_eq!(axis_of(&events, InputAxis::Turn), 3.0);
        assert_eq!(axis_of(&events, InputAxis::LookUp), -2.0);
        assert_eq!(axis_of(&events, InputAxis::LookUpRate), 0.5);

        // Held keys persist, mouse motion does not
        let events = handler.drain_frame();
        assert_eq!(axis_of(&events, InputAxis::MoveForward), 1.0);
        assert_eq!(axis_of(&events, InputAxis::Turn), 0.0);
    }

    #[test]
    fn test_touch_phases() {
        let mut handler = InputHandler::new();
        handler.handle_touch(7, (10.0, 20.0), TouchPhase::Started);
        handler.handle_touch(7, (11.0, 20.0), TouchPhase::Moved);
        handler.handle_touch(7, (11.0, 20.0), TouchPhase::Ended);

        let events = handler.drain_frame();
        assert!(matches!(
            events[0],
            InputEvent::Touch { finger: 7, state: ButtonState::Pressed, .. }
        ));
        assert!(matches!(
            events[1],
            InputEvent::Touch { finger: 7, state: ButtonState::Released, .. }
        ));
        assert!(matches!(events[2], InputEvent::Axis { .. }));
    }
}
