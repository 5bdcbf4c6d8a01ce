//! Combat participants.
//!
//! Player and opponent are separate structs sharing two capabilities:
//!
//! - [`StatusHolder`]: owns a [`StatusStore`]
//! - [`Damageable`]: has [`Health`] and elemental affinities, so the damage
//!   pipeline can resolve hits against it
//!
//! Health is clamped to `[0, max]`; reaching 0 is defeat.

mod health;
mod opponent;
mod player;

pub use health::Health;
pub use opponent::Opponent;
pub use player::Player;

use crate::core::Element;
use crate::status::StatusStore;

/// Anything carrying status effects.
pub trait StatusHolder {
    fn statuses(&self) -> &StatusStore;
    fn statuses_mut(&mut self) -> &mut StatusStore;
}

/// Anything the damage pipeline can hit.
pub trait Damageable: StatusHolder {
    fn health(&self) -> &Health;
    fn health_mut(&mut self) -> &mut Health;

    /// Element this combatant takes extra damage from.
    fn weakness(&self) -> Option<Element> {
        None
    }

    /// Element this combatant takes reduced damage from.
    fn resistance(&self) -> Option<Element> {
        None
    }

    fn is_defeated(&self) -> bool {
        self.health().is_depleted()
    }

    /// Restore health up to the cap. Returns the amount actually healed.
    fn heal(&mut self, amount: i32) -> i32 {
        self.health_mut().restore(amount)
    }

    /// Current health as a percentage of maximum (0-100).
    fn hp_percent(&self) -> f64 {
        self.health().percent()
    }
}
