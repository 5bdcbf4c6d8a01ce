//! Core engine types: identifiers, elements, RNG, configuration, errors
//! and the shared combat state.
//!
//! This module contains the building blocks every other module shares.
//! Balance numbers live in `CombatConfig` rather than in the engine.

pub mod entity;
pub mod element;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{CombatantId, InstanceId};
pub use element::Element;
pub use rng::{GameRng, GameRngState};
pub use config::{CombatConfig, DamageMultipliers};
pub use error::{CatalogError, ConfigError, PlayError, SnapshotError};
pub use state::CombatState;
