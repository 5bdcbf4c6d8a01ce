//! Error types surfaced by the engine.
//!
//! Only caller-correctable conditions become `Err` values:
//! - `PlayError`: a rejected player action; combat state is unchanged
//! - `CatalogError`: conflicting catalog registration
//! - `ConfigError`: unusable configuration
//! - `SnapshotError`: snapshot encoding failure
//!
//! Bad references inside effect payloads are not errors at this level.
//! The interpreter logs and skips them.

use crate::core::InstanceId;

/// Reasons a card play is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("combat is already over")]
    CombatOver,

    #[error("cards can only be played during the player's main phase")]
    NotPlayerTurn,

    #[error("{0} is not in hand")]
    CardNotInHand(InstanceId),

    #[error("card definition `{0}` cannot be played")]
    Unplayable(String),

    #[error("card costs {cost} but only {available} energy is available")]
    NotEnoughEnergy { cost: i32, available: i32 },

    #[error("play limit of {limit} cards per turn reached")]
    PlayLimitReached { limit: u32 },

    #[error("target is missing or already defeated")]
    InvalidTarget,
}

/// Catalog registration failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} `{id}` is already registered")]
    Duplicate { kind: &'static str, id: String },
}

/// Configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse combat config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid combat config: {0}")]
    Invalid(String),
}

/// Snapshot encoding failures.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
}
