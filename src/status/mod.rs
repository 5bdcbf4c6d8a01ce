//! Status effects shared by every combatant.
//!
//! ## Key Types
//!
//! - `StatusStore`: per-combatant mapping from key to value
//! - `StatusValue`: bare stack or `(amount, duration)` pair
//! - `StatusRules`: which keys stack, which tick, and how re-application behaves
//! - `keys`: the status keys with built-in engine behavior

pub mod keys;
mod rules;
mod store;

pub use rules::{base_key, StackPolicy, StatusKind, StatusRules};
pub use store::{StatusDuration, StatusStore, StatusValue};
