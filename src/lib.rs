//! # resonance-combat
//!
//! A deterministic, turn-based card combat engine for roguelite games.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Cards, opponents and run modifiers are plain data in
//!    read-only catalogs. Behavior comes from a closed set of effect kinds.
//!
//! 2. **Single Writer**: One [`Combat`] owns all mutable state. Callers issue
//!    commands (`play_card`, `end_turn`) and read snapshots and events back.
//!
//! 3. **Deterministic**: Every random choice draws from seeded ChaCha
//!    streams, so a seed plus a command sequence replays a combat exactly.
//!
//! ## Combat Loop
//!
//! - The player spends energy to play cards; consecutive same-element plays
//!   build **momentum**, and hitting elemental weaknesses builds per-element
//!   **resonance**. Both unlock bonus payloads on cards.
//! - Opponents announce an **intent** one turn ahead, chosen by weighted
//!   roll under HP gates and cooldowns, and change **phase** as their HP
//!   crosses thresholds.
//!
//! ## Modules
//!
//! - `core`: Identifiers, elements, RNG, configuration, errors, combat state
//! - `status`: Status stores and stacking rules
//! - `combatant`: Player, opponents, health
//! - `damage`: Elemental multipliers, vulnerable, guard
//! - `cards`: Card definitions and instances
//! - `catalog`: Read-only definition registries
//! - `piles`: Draw, hand, discard and exhaust piles
//! - `effects`: Effect payloads and the interpreter
//! - `powers`: Triggered passive effects on the player
//! - `momentum`: Momentum streaks and resonance
//! - `intent`: Opponent move selection, phases and execution
//! - `combat`: The turn state machine, events and snapshots

pub mod core;
pub mod status;
pub mod combatant;
pub mod damage;
pub mod cards;
pub mod catalog;
pub mod piles;
pub mod effects;
pub mod powers;
pub mod momentum;
pub mod intent;
pub mod combat;

// Re-export commonly used types
pub use crate::core::{
    CombatConfig, CombatState, CombatantId, InstanceId,
    Element, GameRng,
    CatalogError, ConfigError, PlayError, SnapshotError,
};

pub use crate::status::{StatusDuration, StatusRules, StatusStore, StatusValue};

pub use crate::combatant::{Damageable, Health, Opponent, Player, StatusHolder};

pub use crate::cards::{CardDefinition, CardInstance, CardType, Keyword};

pub use crate::catalog::{Catalogs, ModifierDefinition, OpponentDefinition};

pub use crate::piles::Pile;

pub use crate::effects::{Effect, EffectPayload, EffectTarget, EffectInterpreter, ExecutionReport};

pub use crate::powers::{PowerSpec, PowerTrigger};

pub use crate::momentum::{MomentumModifier, MomentumTracker};

pub use crate::intent::{IntentKind, OpponentMove, PhaseAction, PhaseSchedule};

pub use crate::combat::{
    Combat, CombatEvent, CombatOutcome, CombatResult, CombatSetup,
    CombatSnapshot, PlayReport, TurnPhase,
};
