//! Player character module
//!
//! Provides the third-person character with its boost dash, aim lock,
//! walking locomotion and possessing controller.

mod aim;
mod boost;
mod character;
mod controller;
mod movement;

pub use aim::{AimConfig, AimController};
pub use boost::{BoostConfig, BoostController, BOOST_ARRIVAL_DISTANCE};
pub use character::ThirdPersonCharacter;
pub use controller::PlayerController;
pub use movement::{CharacterMovement, MovementConfig};
