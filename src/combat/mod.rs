//! Running a combat.
//!
//! ## Key Types
//!
//! - [`Combat`]: the turn state machine; the only entry point callers need
//! - [`CombatSetup`]: player, deck, opponents and modifiers for one combat
//! - [`CombatEvent`]: observable happenings, drained after each command
//! - [`CombatSnapshot`]: owned, serializable view for rendering

mod event;
mod machine;
mod snapshot;

pub use event::{CombatEvent, CombatOutcome};
pub use machine::{Combat, CombatResult, CombatSetup, PlayReport, TurnPhase};
pub use snapshot::{CombatSnapshot, CombatantSnapshot, IntentSnapshot, StatusEntry};
