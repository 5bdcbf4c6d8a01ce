//! Events for the presentation layer.
//!
//! The combat appends events as things happen; callers drain them with
//! [`Combat::drain_events`](super::Combat::drain_events) after each command.

use serde::{Deserialize, Serialize};

use crate::core::{CombatantId, Element, InstanceId};
use crate::intent::IntentKind;
use crate::piles::Pile;

/// How a finished combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Something observable that happened during combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    CardPlayed {
        instance: InstanceId,
        card_id: String,
        element: Element,
        cost: i32,
    },
    DamageDealt {
        source: CombatantId,
        target: CombatantId,
        hp_loss: i32,
        guard_absorbed: i32,
        weakness_hit: bool,
    },
    IntentChosen {
        opponent: usize,
        move_id: String,
        kind: IntentKind,
    },
    PhaseChanged {
        opponent: usize,
        from: u32,
        to: u32,
    },
    CardAddedToPile {
        instance: InstanceId,
        card_id: String,
        pile: Pile,
    },
    OpponentDefeated {
        opponent: usize,
    },
    Victory,
    Defeat,
}

impl CombatEvent {
    /// Check if this event ends the combat.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

impl From<CombatOutcome> for CombatEvent {
    fn from(outcome: CombatOutcome) -> Self {
        match outcome {
            CombatOutcome::Victory => Self::Victory,
            CombatOutcome::Defeat => Self::Defeat,
        }
    }
}
