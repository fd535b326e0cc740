//! The narrow surface the character logic needs from whatever hosts it
//!
//! A host owns the actor's transform and collision shape. The character never
//! stores a host; every call that needs one borrows it for the duration of the
//! call.

use glam::Vec3;
use thirdperson_core::{ActorId, Rotator};

/// Outcome of a collision-aware move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Actor location after the move
    pub location: Vec3,
    /// Whether a blocking collision stopped the move
    pub blocking_hit: bool,
}

/// Capabilities consumed from the hosting world
pub trait CharacterHost {
    /// Current world-space location of the actor
    fn location(&self) -> Vec3;

    /// Current world-space rotation of the actor
    fn rotation(&self) -> Rotator;

    /// Replace the actor's rotation
    fn set_rotation(&mut self, rotation: Rotator);

    /// Unit vector the actor is facing
    fn forward_vector(&self) -> Vec3 {
        self.rotation().forward_vector()
    }

    /// Sweep the actor towards `target`, stopping at the first blocking contact
    fn sweep_to(&mut self, target: Vec3) -> MoveResult;

    /// Whether the actor is standing on walkable ground
    fn is_grounded(&self) -> bool;

    /// Seconds elapsed during the current frame
    fn delta_seconds(&self) -> f32;

    /// Location of another actor, or `None` if it no longer exists
    fn actor_location(&self, actor: ActorId) -> Option<Vec3>;

    /// Reset head-mounted display orientation and position
    fn reset_vr(&mut self) {}
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;

    use super::*;

    /// In-memory host with an optional wall on the X axis
    #[derive(Debug, Default)]
    pub struct MockHost {
        pub location: Vec3,
        pub rotation: Rotator,
        pub delta: f32,
        pub grounded: bool,
        pub wall_x: Option<f32>,
        pub actors: HashMap<ActorId, Vec3>,
        pub vr_resets: u32,
    }

    impl MockHost {
        pub fn new() -> Self {
            Self {
                delta: 1.0 / 60.0,
                grounded: true,
                ..Default::default()
            }
        }

        pub fn spawn_actor(&mut self, location: Vec3) -> ActorId {
            let id = ActorId::new();
            self.actors.insert(id, location);
            id
        }
    }

    impl CharacterHost for MockHost {
        fn location(&self) -> Vec3 {
            self.location
        }

        fn rotation(&self) -> Rotator {
            self.rotation
        }

        fn set_rotation(&mut self, rotation: Rotator) {
            self.rotation = rotation;
        }

        fn sweep_to(&mut self, target: Vec3) -> MoveResult {
            let blocked_at = self.wall_x.filter(|wall| target.x > *wall);
            self.location = match blocked_at {
                Some(wall) => Vec3::new(wall, target.y, target.z),
                None => target,
            };
            MoveResult {
                location: self.location,
                blocking_hit: blocked_at.is_some(),
            }
        }

        fn is_grounded(&self) -> bool {
            self.grounded
        }

        fn delta_seconds(&self) -> f32 {
            self.delta
        }

        fn actor_location(&self, actor: ActorId) -> Option<Vec3> {
            self.actors.get(&actor).copied()
        }

        fn reset_vr(&mut self) {
            self.vr_resets += 1;
        }
    }
}
