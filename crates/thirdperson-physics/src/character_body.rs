//! Swept character capsule using rapier's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::trace;

use crate::CollisionWorld;

/// Fraction of the requested travel that may go missing before a move counts as blocked
const BLOCKED_SHORTFALL: f32 = 0.01;

/// Capsule shape and walking limits
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule radius (default: 42)
    pub radius: f32,
    /// Capsule half height including the hemispherical caps (default: 96)
    pub half_height: f32,
    /// Steepest walkable slope in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Tallest ledge stepped up onto automatically (default: 45)
    pub step_height: f32,
    /// Gap kept between the capsule and what it touches (default: 2)
    pub skin_width: f32,
    /// Stick to the ground when walking down slopes and steps, up to this far
    pub ground_snap: Option<f32>,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            radius: 42.0,
            half_height: 96.0,
            max_slope_angle: 45.0,
            step_height: 45.0,
            skin_width: 2.0,
            ground_snap: Some(20.0),
        }
    }
}

impl CharacterBodyConfig {
    fn shape(&self) -> SharedShape {
        let segment_half = (self.half_height - self.radius).max(0.01);
        SharedShape::capsule_z(segment_half, self.radius)
    }

    fn controller(&self) -> KinematicCharacterController {
        let slope = self.max_slope_angle.to_radians();
        KinematicCharacterController {
            up: Vector::z_axis(),
            offset: CharacterLength::Absolute(self.skin_width),
            max_slope_climb_angle: slope,
            min_slope_slide_angle: slope,
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(self.step_height),
                min_width: CharacterLength::Relative(0.5),
                include_dynamic_bodies: false,
            }),
            snap_to_ground: self.ground_snap.map(CharacterLength::Absolute),
            ..Default::default()
        }
    }
}

/// Outcome of a swept move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Translation that was actually applied
    pub applied: Vec3,
    /// Whether an obstacle stopped the move short of the requested translation
    pub blocked: bool,
    /// Whether the body ended the move standing on ground
    pub grounded: bool,
}

/// Kinematic capsule whose location is its center
pub struct CharacterBody {
    pub config: CharacterBodyConfig,
    /// Capsule center
    pub position: Vec3,
    grounded: bool,
    collider: Option<ColliderHandle>,
    controller: KinematicCharacterController,
}

impl CharacterBody {
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    pub fn with_config(config: CharacterBodyConfig) -> Self {
        Self {
            controller: config.controller(),
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider: None,
        }
    }

    /// Add the capsule to the world with its center at `position`
    pub fn spawn(&mut self, world: &mut CollisionWorld, position: Vec3) -> ColliderHandle {
        self.despawn(world);
        self.position = position;

        let collider = ColliderBuilder::new(self.config.shape())
            .translation(vector![position.x, position.y, position.z])
            .friction(0.0)
            .build();
        let handle = world.insert(collider);
        self.collider = Some(handle);
        handle
    }

    /// Remove the capsule from the world
    pub fn despawn(&mut self, world: &mut CollisionWorld) {
        if let Some(handle) = self.collider.take() {
            world.remove(handle);
        }
    }

    /// The capsule collider, once spawned
    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }

    /// Move by `translation`, stopping at or sliding along obstacles.
    ///
    /// Without a spawned collider the body teleports and never reports a hit.
    pub fn move_by(
        &mut self,
        world: &mut CollisionWorld,
        translation: Vec3,
        dt: f32,
    ) -> SweepResult {
        let Some(handle) = self.collider else {
            self.position += translation;
            return SweepResult {
                applied: translation,
                blocked: false,
                grounded: self.grounded,
            };
        };

        let shape = self.config.shape();
        let start = Isometry::translation(self.position.x, self.position.y, self.position.z);
        let mut contacts = 0usize;
        let corrected = self.controller.move_shape(
            dt,
            &world.bodies,
            &world.colliders,
            world.query_pipeline(),
            shape.as_ref(),
            &start,
            vector![translation.x, translation.y, translation.z],
            QueryFilter::default().exclude_collider(handle),
            |_| contacts += 1,
        );

        let applied = Vec3::new(
            corrected.translation.x,
            corrected.translation.y,
            corrected.translation.z,
        );
        self.position += applied;
        self.grounded = corrected.grounded;
        world.set_translation(handle, self.position);

        let blocked = contacts > 0 && fell_short(translation, applied);
        if blocked {
            trace!(?translation, ?applied, contacts, "Sweep blocked");
        }

        SweepResult {
            applied,
            blocked,
            grounded: self.grounded,
        }
    }

    /// Sweep the capsule center towards an absolute target
    pub fn sweep_to(&mut self, world: &mut CollisionWorld, target: Vec3, dt: f32) -> SweepResult {
        self.move_by(world, target - self.position, dt)
    }

    /// Teleport without collision
    pub fn teleport(&mut self, world: &mut CollisionWorld, position: Vec3) {
        self.position = position;
        self.grounded = false;
        if let Some(handle) = self.collider {
            world.set_translation(handle, position);
        }
    }

    /// Bottom of the capsule
    pub fn foot_position(&self) -> Vec3 {
        self.position - Vec3::Z * self.config.half_height
    }

    /// Whether the last move ended on walkable ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether progress along the requested direction was cut short
fn fell_short(desired: Vec3, applied: Vec3) -> bool {
    let length = desired.length();
    if length <= f32::EPSILON {
        return false;
    }
    applied.dot(desired / length) < length * (1.0 - BLOCKED_SHORTFALL)
}
