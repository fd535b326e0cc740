//! Thirdperson Physics - Collision queries using rapier3d
//!
//! The world here is static geometry only: ground, walls and actor boxes.
//! Characters are kinematic and integrate their own velocity, so nothing is
//! ever stepped; every change just refreshes the query pipeline.

mod character_body;

pub use character_body::{CharacterBody, CharacterBodyConfig, SweepResult};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Surface friction given to every static collider
const STATIC_FRICTION: f32 = 0.7;

/// First blocking hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderHandle,
    /// Distance from the ray origin
    pub distance: f32,
    pub point: Vec3,
}

/// Static collision geometry and the query pipeline over it
#[derive(Default)]
pub struct CollisionWorld {
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    islands: IslandManager,
    queries: QueryPipeline,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fixed collider and make it visible to queries
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.colliders.insert(collider);
        self.refresh();
        handle
    }

    /// Remove a collider. Unknown handles are ignored.
    pub fn remove(&mut self, handle: ColliderHandle) {
        if self
            .colliders
            .remove(handle, &mut self.islands, &mut self.bodies, false)
            .is_some()
        {
            self.refresh();
        }
    }

    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains(handle)
    }

    /// Number of colliders in the world
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Teleport a collider. Returns `false` for unknown handles.
    pub fn set_translation(&mut self, handle: ColliderHandle, position: Vec3) -> bool {
        let Some(collider) = self.colliders.get_mut(handle) else {
            return false;
        };
        collider.set_translation(vector![position.x, position.y, position.z]);
        self.refresh();
        true
    }

    /// Rebuild the query acceleration structure after colliders changed
    pub fn refresh(&mut self) {
        self.queries.update(&self.colliders);
    }

    pub(crate) fn query_pipeline(&self) -> &QueryPipeline {
        &self.queries
    }

    /// Infinite ground plane at height `z`, solid below
    pub fn add_ground(&mut self, z: f32) -> ColliderHandle {
        let up = Unit::new_normalize(vector![0.0, 0.0, 1.0]);
        self.insert(
            ColliderBuilder::halfspace(up)
                .translation(vector![0.0, 0.0, z])
                .friction(STATIC_FRICTION)
                .build(),
        )
    }

    /// Axis-aligned box centered at `center`
    pub fn add_box(&mut self, half_extents: Vec3, center: Vec3) -> ColliderHandle {
        self.insert(
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                .translation(vector![center.x, center.y, center.z])
                .friction(STATIC_FRICTION)
                .build(),
        )
    }

    /// Cast a ray against everything except `exclude`.
    ///
    /// `direction` need not be normalized; `max_distance` is measured along it
    /// after normalization.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<ColliderHandle>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );
        let mut filter = QueryFilter::default();
        if let Some(handle) = exclude {
            filter = filter.exclude_collider(handle);
        }

        let (collider, distance) =
            self.queries
                .cast_ray(&self.bodies, &self.colliders, &ray, max_distance, true, filter)?;
        Some(RayHit {
            collider,
            distance,
            point: origin + direction * distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut world = CollisionWorld::new();
        assert!(world.is_empty());

        let ground = world.add_ground(0.0);
        assert!(world.contains(ground));
        assert_eq!(world.len(), 1);

        world.remove(ground);
        assert!(!world.contains(ground));
        // Removing twice is harmless
        world.remove(ground);
    }

    #[test]
    fn test_raycast_hits_ground() {
        let mut world = CollisionWorld::new();
        world.add_ground(10.0);

        let hit = world
            .raycast(Vec3::new(0.0, 0.0, 1000.0), Vec3::new(0.0, 0.0, -5.0), 5000.0, None)
            .expect("ray should hit the ground");
        assert!((hit.distance - 990.0).abs() < 0.01);
        assert!((hit.point.z - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_raycast_respects_range_and_exclusion() {
        let mut world = CollisionWorld::new();
        let wall = world.add_box(Vec3::splat(10.0), Vec3::new(100.0, 0.0, 0.0));

        assert!(world.raycast(Vec3::ZERO, Vec3::X, 50.0, None).is_none());
        assert_eq!(
            world.raycast(Vec3::ZERO, Vec3::X, 500.0, None).map(|hit| hit.collider),
            Some(wall)
        );
        assert!(world.raycast(Vec3::ZERO, Vec3::X, 500.0, Some(wall)).is_none());
        assert!(world.raycast(Vec3::ZERO, Vec3::ZERO, 500.0, None).is_none());
    }

    #[test]
    fn test_moved_box_is_queried_at_new_position() {
        let mut world = CollisionWorld::new();
        let wall = world.add_box(Vec3::splat(10.0), Vec3::new(100.0, 0.0, 0.0));
        assert!(world.set_translation(wall, Vec3::new(0.0, 100.0, 0.0)));

        assert!(world.raycast(Vec3::ZERO, Vec3::X, 500.0, None).is_none());
        assert!(world.raycast(Vec3::ZERO, Vec3::Y, 500.0, None).is_some());
    }
}
