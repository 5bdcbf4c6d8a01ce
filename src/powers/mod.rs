//! Persistent, stack-based passive effects on the player.
//!
//! ## Key Components
//!
//! - [`PowerSpec`]: trigger + payload, carried by a card definition
//! - [`Power`]: an attached instance with stacks and a duration
//! - [`PowerSet`]: the player's powers
//! - [`TriggerPoint`]: the turn moments at which powers are consulted

mod power;

pub use power::{Power, PowerSet, PowerSpec, PowerTrigger, TriggerPoint};
