//! Identification of combat participants and card instances.
//!
//! ## Combatants
//!
//! A combat has exactly one player and an ordered list of opponents.
//! `CombatantId` names either side; opponents are addressed by their index
//! in the combat's fixed iteration order.
//!
//! ```
//! use resonance_combat::core::CombatantId;
//!
//! let target = CombatantId::Opponent(1);
//! assert!(target.is_opponent());
//! assert_eq!(target.opponent_index(), Some(1));
//! assert_eq!(CombatantId::Player.opponent_index(), None);
//! ```
//!
//! ## Card Instances
//!
//! Every card instance carries an `InstanceId` that stays stable while the
//! instance moves between piles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A participant in combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantId {
    /// The card-playing side.
    Player,
    /// An opposing combatant, by index in the combat's opponent list.
    Opponent(usize),
}

impl CombatantId {
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }

    #[must_use]
    pub const fn is_opponent(self) -> bool {
        matches!(self, Self::Opponent(_))
    }

    /// Index into the opponent list; `None` for the player.
    #[must_use]
    pub const fn opponent_index(self) -> Option<usize> {
        match self {
            Self::Opponent(index) => Some(index),
            Self::Player => None,
        }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Opponent(index) => write!(f, "opponent#{index}"),
        }
    }
}

/// Identity of one physical card for the length of a combat.
///
/// Copies of the same definition get distinct ids, and an id survives every
/// move between piles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// The id handed out after this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}
