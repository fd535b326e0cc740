//! Third-person gameplay
//!
//! Provides the player character with its boost dash and aim lock, the
//! controller, locomotion, camera rig, input mapping, and a physics-backed
//! world to run it in.

pub mod camera;
pub mod config;
pub mod error;
pub mod game_mode;
pub mod host;
pub mod input;
pub mod player;
pub mod world;

pub use camera::{CameraConfig, CameraRig, CameraView};
pub use config::CharacterConfig;
pub use error::{ConfigError, SpawnError};
pub use game_mode::{GameMode, PawnRegistry, DEFAULT_PAWN_CLASS};
pub use host::{CharacterHost, MoveResult};
pub use input::{
    ButtonState, InputAction, InputAxis, InputBinding, InputBindings, InputEvent, InputHandler,
};
pub use player::{
    AimConfig, AimController, BoostConfig, BoostController, CharacterMovement, MovementConfig,
    PlayerController, ThirdPersonCharacter, BOOST_ARRIVAL_DISTANCE,
};
pub use world::{GameWorld, PawnHost, WorldActor};
