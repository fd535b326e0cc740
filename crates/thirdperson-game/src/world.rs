//! Physics-backed world hosting the player character
//!
//! `GameWorld` owns the collision geometry, the frame clock, the non-player
//! actors, and the player pawn. It implements [`CharacterHost`] for the pawn
//! by lending out a short-lived [`PawnHost`] view during input and tick.

use std::collections::HashMap;

use glam::Vec3;
use rapier3d::prelude::ColliderHandle;
use thirdperson_core::{ActorId, GameTime, Rotator, TimeConfig, Transform};
use thirdperson_physics::{CharacterBody, CharacterBodyConfig, CollisionWorld};
use tracing::{debug, info};

use crate::camera::CameraView;
use crate::config::CharacterConfig;
use crate::error::SpawnError;
use crate::host::{CharacterHost, MoveResult};
use crate::input::InputEvent;
use crate::player::{PlayerController, ThirdPersonCharacter};

/// A non-player actor, such as an aim target
#[derive(Debug, Clone)]
pub struct WorldActor {
    pub transform: Transform,
    /// Box collider, if the actor blocks movement
    pub collider: Option<ColliderHandle>,
}

/// The possessed player pawn
struct Pawn {
    body: CharacterBody,
    rotation: Rotator,
    character: ThirdPersonCharacter,
}

/// Borrowed view of the world from the pawn's point of view
pub struct PawnHost<'a> {
    body: &'a mut CharacterBody,
    rotation: &'a mut Rotator,
    collision: &'a mut CollisionWorld,
    actors: &'a HashMap<ActorId, WorldActor>,
    delta_seconds: f32,
    vr_resets: &'a mut u32,
}

impl CharacterHost for PawnHost<'_> {
    fn location(&self) -> Vec3 {
        self.body.position
    }

    fn rotation(&self) -> Rotator {
        *self.rotation
    }

    fn set_rotation(&mut self, rotation: Rotator) {
        *self.rotation = rotation;
    }

    fn sweep_to(&mut self, target: Vec3) -> MoveResult {
        let result = self.body.sweep_to(self.collision, target, self.delta_seconds);
        MoveResult {
            location: self.body.position,
            blocking_hit: result.blocked,
        }
    }

    fn is_grounded(&self) -> bool {
        self.body.is_grounded()
    }

    fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    fn actor_location(&self, actor: ActorId) -> Option<Vec3> {
        self.actors.get(&actor).map(|a| a.transform.location)
    }

    fn reset_vr(&mut self) {
        *self.vr_resets += 1;
    }
}

/// The game world
pub struct GameWorld {
    /// Static collision geometry, including the player capsule
    pub collision: CollisionWorld,
    /// Frame clock
    pub time: GameTime,
    /// Non-player actors
    actors: HashMap<ActorId, WorldActor>,
    /// The player pawn, once spawned
    pawn: Option<Pawn>,
    /// Number of VR resets requested
    vr_resets: u32,
}

impl GameWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::with_time_config(TimeConfig::default())
    }

    /// Create an empty world with a custom frame clock
    pub fn with_time_config(config: TimeConfig) -> Self {
        Self {
            collision: CollisionWorld::new(),
            time: GameTime::new(config),
            actors: HashMap::new(),
            pawn: None,
            vr_resets: 0,
        }
    }

    /// Add an infinite ground plane at height `z`
    pub fn create_ground(&mut self, z: f32) -> ColliderHandle {
        self.collision.add_ground(z)
    }

    /// Add a static blocking box
    pub fn create_static_box(&mut self, half_extents: Vec3, center: Vec3) -> ColliderHandle {
        self.collision.add_box(half_extents, center)
    }

    /// Place an actor. With `half_extents` it also blocks movement.
    pub fn spawn_actor(&mut self, transform: Transform, half_extents: Option<Vec3>) -> ActorId {
        let id = ActorId::new();
        let collider =
            half_extents.map(|extents| self.create_static_box(extents, transform.location));
        self.actors.insert(
            id,
            WorldActor {
                transform,
                collider,
            },
        );
        debug!(%id, location = ?transform.location, "Spawned actor");
        id
    }

    /// Remove an actor. Returns `false` if it did not exist.
    pub fn destroy_actor(&mut self, id: ActorId) -> bool {
        let Some(actor) = self.actors.remove(&id) else {
            return false;
        };
        if let Some(handle) = actor.collider {
            self.collision.remove(handle);
        }
        debug!(%id, "Destroyed actor");
        true
    }

    /// Get an actor by id
    pub fn actor(&self, id: ActorId) -> Option<&WorldActor> {
        self.actors.get(&id)
    }

    /// Teleport an actor, dragging its collider along
    pub fn set_actor_location(&mut self, id: ActorId, location: Vec3) -> bool {
        let Some(actor) = self.actors.get_mut(&id) else {
            return false;
        };
        actor.transform.location = location;
        if let Some(handle) = actor.collider {
            self.collision.set_translation(handle, location);
        }
        true
    }

    /// Spawn the player pawn and possess it with a fresh controller
    pub fn spawn_player(
        &mut self,
        config: &CharacterConfig,
        location: Vec3,
        rotation: Rotator,
    ) -> Result<(), SpawnError> {
        if self.pawn.is_some() {
            return Err(SpawnError::PlayerAlreadySpawned);
        }

        let mut body = CharacterBody::with_config(CharacterBodyConfig {
            radius: config.capsule_radius,
            half_height: config.capsule_half_height,
            ..Default::default()
        });
        body.spawn(&mut self.collision, location);

        let mut controller = PlayerController::new();
        controller.set_control_rotation(rotation);

        let mut character = ThirdPersonCharacter::with_config(config);
        character.possess(controller);

        self.pawn = Some(Pawn {
            body,
            rotation,
            character,
        });
        info!(?location, ?rotation, "Spawned player");
        Ok(())
    }

    /// Remove the player pawn
    pub fn despawn_player(&mut self) -> Option<ThirdPersonCharacter> {
        let mut pawn = self.pawn.take()?;
        pawn.body.despawn(&mut self.collision);
        Some(pawn.character)
    }

    /// The player character, if spawned
    pub fn character(&self) -> Option<&ThirdPersonCharacter> {
        self.pawn.as_ref().map(|p| &p.character)
    }

    /// Mutable access to the player character, if spawned
    pub fn character_mut(&mut self) -> Option<&mut ThirdPersonCharacter> {
        self.pawn.as_mut().map(|p| &mut p.character)
    }

    /// Location and rotation of the player pawn
    pub fn player_transform(&self) -> Option<Transform> {
        self.pawn
            .as_ref()
            .map(|p| Transform::from_location_rotation(p.body.position, p.rotation))
    }

    /// Number of VR resets requested so far
    pub fn vr_resets(&self) -> u32 {
        self.vr_resets
    }

    /// Deliver an input event to the player character.
    ///
    /// Rate inputs scale by the current frame delta, so call this between
    /// [`GameWorld::begin_frame`] and [`GameWorld::end_frame`].
    pub fn handle_input(&mut self, event: &InputEvent) {
        let delta_seconds = self.time.delta_seconds();
        let Some(pawn) = self.pawn.as_mut() else {
            return;
        };
        let mut host = PawnHost {
            body: &mut pawn.body,
            rotation: &mut pawn.rotation,
            collision: &mut self.collision,
            actors: &self.actors,
            delta_seconds,
            vr_resets: &mut self.vr_resets,
        };
        pawn.character.handle_input(&mut host, event);
    }

    /// Advance the world by one frame of `raw_delta` seconds
    pub fn tick(&mut self, raw_delta: f32) {
        self.begin_frame(raw_delta);
        self.end_frame();
    }

    /// Advance the clock for a new frame; input handled afterwards sees its delta
    pub fn begin_frame(&mut self, raw_delta: f32) {
        self.time.advance(raw_delta);
    }

    /// Tick the player character with the delta set by [`GameWorld::begin_frame`]
    pub fn end_frame(&mut self) {
        let dt = self.time.delta_seconds();

        let Some(pawn) = self.pawn.as_mut() else {
            return;
        };
        let mut host = PawnHost {
            body: &mut pawn.body,
            rotation: &mut pawn.rotation,
            collision: &mut self.collision,
            actors: &self.actors,
            delta_seconds: dt,
            vr_resets: &mut self.vr_resets,
        };
        pawn.character.tick(&mut host, dt);
    }

    /// Freeze the frame clock; ticks keep running with a zero delta
    pub fn pause(&mut self) {
        self.time.pause();
        info!("World paused");
    }

    /// Unfreeze the frame clock
    pub fn resume(&mut self) {
        self.time.resume();
        info!("World resumed");
    }

    /// Where the follow camera sits this frame, pulled in by blocking geometry
    pub fn camera_view(&self) -> Option<CameraView> {
        let pawn = self.pawn.as_ref()?;
        let rig = &pawn.character.camera;
        let control = pawn.character.control_rotation();

        let pivot = rig.pivot(pawn.body.position);
        let back = -rig.arm_rotation(pawn.rotation, control).forward_vector();
        let reach = rig.boom.target_arm_length + rig.boom.collision_radius;
        let blocked_at = self
            .collision
            .raycast(pivot, back, reach, pawn.body.collider())
            .map(|hit| hit.distance);

        Some(rig.view(pawn.body.position, pawn.rotation, control, blocked_at))
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new()
    }
}
