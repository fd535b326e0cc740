//! Game mode: picks the pawn class the player spawns as

use std::collections::HashMap;

use glam::Vec3;
use thirdperson_core::Rotator;
use tracing::{info, warn};

use crate::config::CharacterConfig;
use crate::error::SpawnError;
use crate::world::GameWorld;

/// Asset path of the stock third-person character
pub const DEFAULT_PAWN_CLASS: &str = "/Game/ThirdPersonCPP/Blueprints/ThirdPersonCharacter";

/// Character classes available to spawn, keyed by asset path
#[derive(Debug, Clone, Default)]
pub struct PawnRegistry {
    classes: HashMap<String, CharacterConfig>,
}

impl PawnRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the stock character under [`DEFAULT_PAWN_CLASS`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_PAWN_CLASS, CharacterConfig::default());
        registry
    }

    /// Register or replace a class
    pub fn register(&mut self, path: impl Into<String>, config: CharacterConfig) {
        self.classes.insert(path.into(), config);
    }

    /// Look up a class by asset path
    pub fn find(&self, path: &str) -> Option<&CharacterConfig> {
        self.classes.get(path)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Game mode for the third-person template
#[derive(Debug, Clone, Default)]
pub struct GameMode {
    /// Class spawned for the player, if it was found at construction
    default_pawn_class: Option<(String, CharacterConfig)>,
}

impl GameMode {
    /// Resolve [`DEFAULT_PAWN_CLASS`] from the registry.
    ///
    /// A missing class leaves the default unset rather than failing.
    pub fn new(registry: &PawnRegistry) -> Self {
        Self::with_pawn_class(registry, DEFAULT_PAWN_CLASS)
    }

    /// Resolve an arbitrary pawn class from the registry
    pub fn with_pawn_class(registry: &PawnRegistry, path: &str) -> Self {
        let default_pawn_class = match registry.find(path) {
            Some(config) => {
                info!(class = path, "Default pawn class set");
                Some((path.to_string(), config.clone()))
            }
            None => {
                warn!(class = path, "Pawn class not found; default pawn left unset");
                None
            }
        };
        Self { default_pawn_class }
    }

    /// Asset path of the default pawn class
    pub fn default_pawn_class(&self) -> Option<&str> {
        self.default_pawn_class.as_ref().map(|(path, _)| path.as_str())
    }

    /// Configuration of the default pawn class
    pub fn default_pawn_config(&self) -> Option<&CharacterConfig> {
        self.default_pawn_class.as_ref().map(|(_, config)| config)
    }

    /// Spawn the player as the default pawn class
    pub fn spawn_default_pawn(
        &self,
        world: &mut GameWorld,
        location: Vec3,
        rotation: Rotator,
    ) -> Result<(), SpawnError> {
        let config = self.default_pawn_config().ok_or(SpawnError::NoDefaultPawnClass)?;
        world.spawn_player(config, location, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_class_is_resolved() {
        let registry = PawnRegistry::with_defaults();
        let mode = GameMode::new(&registry);
        assert_eq!(mode.default_pawn_class(), Some(DEFAULT_PAWN_CLASS));
        assert!(mode.default_pawn_config().is_some());
    }

    #[test]
    fn test_missing_class_leaves_default_unset() {
        let registry = PawnRegistry::new();
        assert!(registry.is_empty());

        let mode = GameMode::new(&registry);
        assert_eq!(mode.default_pawn_class(), None);

        let mut world = GameWorld::new();
        let err = mode
            .spawn_default_pawn(&mut world, Vec3::ZERO, Rotator::ZERO)
            .unwrap_err();
        assert_eq!(err, SpawnError::NoDefaultPawnClass);
        assert!(world.character().is_none());
    }

    #[test]
    fn test_spawn_uses_registered_config() {
        let mut config = CharacterConfig::default();
        config.base_turn_rate = 90.0;
        let mut registry = PawnRegistry::new();
        registry.register(DEFAULT_PAWN_CLASS, config);
        assert_eq!(registry.len(), 1);

        let mode = GameMode::new(&registry);
        let mut world = GameWorld::new();
        mode.spawn_default_pawn(&mut world, Vec3::new(0.0, 0.0, 100.0), Rotator::ZERO)
            .unwrap();
        assert_eq!(world.character().map(|c| c.base_turn_rate), Some(90.0));
    }
}
