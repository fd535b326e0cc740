//! Core types shared by the physics and gameplay crates

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Rotator;

/// Unique identifier for actors placed in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Create a new random actor ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an actor ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location and rotation of an actor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Rotator,
}

impl Transform {
    /// Create a new transform at the given location
    pub fn from_location(location: Vec3) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    /// Create a new transform with location and rotation
    pub fn from_location_rotation(location: Vec3, rotation: Rotator) -> Self {
        Self { location, rotation }
    }

    /// Get the forward direction (positive X in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward_vector()
    }

    /// Get the right direction (positive Y in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation.right_vector()
    }

    /// Rotation as a quaternion
    pub fn quat(&self) -> Quat {
        self.rotation.to_quat()
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.location += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_ids_are_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
    }

    #[test]
    fn test_actor_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ActorId::from_uuid(uuid);
        assert_eq!(id, ActorId(uuid));
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_transform_forward() {
        let transform =
            Transform::from_location_rotation(Vec3::new(1.0, 2.0, 3.0), Rotator::from_yaw(90.0));
        assert!((transform.forward() - Vec3::Y).length() < 1e-5);

        let mut moved = transform;
        moved.translate(transform.forward() * 10.0);
        assert!((moved.location - Vec3::new(1.0, 12.0, 3.0)).length() < 1e-4);
    }
}
