use std::path::PathBuf;

/// Errors that can occur while loading character configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors that can occur while spawning the player pawn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("game mode has no default pawn class")]
    NoDefaultPawnClass,

    #[error("a player pawn is already spawned")]
    PlayerAlreadySpawned,
}
