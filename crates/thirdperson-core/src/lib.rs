//! Thirdperson Core - Core types and utilities
//!
//! This crate provides the foundational types shared by the physics and
//! gameplay crates:
//! - Mathematical primitives (re-exported from glam)
//! - Degree-based `Rotator` and the `Transform` of an actor
//! - Interpolation and look-at helpers
//! - Frame clock for delta time

pub mod interp;
pub mod rotator;
pub mod time;
pub mod types;

pub use glam::{Quat, Vec3};
pub use interp::{find_look_at_rotation, vinterp_to};
pub use rotator::Rotator;
pub use time::{GameTime, TimeConfig};
pub use types::{ActorId, Transform};
