//! Opponent intents.
//!
//! ## Key Types
//!
//! - [`OpponentMove`]: one candidate action in a move set
//! - [`IntentSelector`]: per-opponent weighted selection under gating and cooldowns
//! - [`PhaseSchedule`]: HP-fraction thresholds and their transition actions
//! - [`execute_move`]: apply an opponent's chosen move to the combat

mod execute;
mod moves;
mod phases;
mod selector;

pub use execute::{execute_move, move_payload};
pub use moves::{
    CardGrant, DamageBonus, IntentKind, MoveStatus, MoveTarget, OpponentMove, WAIT_MOVE_ID,
};
pub use phases::{PhaseAction, PhaseSchedule, PhaseTracker, PhaseTransition};
pub use selector::{IntentSelector, IntentState};
