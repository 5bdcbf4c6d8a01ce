//! Read-only views of a combat for rendering and persistence.
//!
//! A snapshot is plain owned data with no references into the engine, so
//! it can be handed to a UI, diffed between frames, or stored with
//! [`CombatSnapshot::to_bytes`].

use serde::{Deserialize, Serialize};

use super::machine::TurnPhase;
use crate::cards::CardInstance;
use crate::combatant::{Damageable, Opponent, StatusHolder};
use crate::core::{CombatState, Element, SnapshotError};
use crate::damage;
use crate::intent::IntentKind;
use crate::piles::Pile;
use crate::powers::Power;
use crate::status::{keys, StatusValue};

/// One status on a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub key: String,
    pub value: StatusValue,
}

/// An opponent's announced move, with damage projected against the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSnapshot {
    pub move_id: String,
    pub name: String,
    pub kind: IntentKind,
    /// Per-hit damage after strength, bonuses and the player's multipliers.
    pub damage: Option<i32>,
    pub hits: u32,
    pub guard: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub guard: i32,
    /// Sorted by key.
    pub statuses: Vec<StatusEntry>,
    pub intent: Option<IntentSnapshot>,
    pub phase: u32,
    pub defeated: bool,
}

/// Everything a UI needs to draw one combat frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub turn: u32,
    pub phase: TurnPhase,
    pub energy: i32,
    pub momentum: i32,
    pub last_element: Element,
    /// Non-zero resonance levels only.
    pub resonance: Vec<(Element, i32)>,
    pub player: CombatantSnapshot,
    pub opponents: Vec<CombatantSnapshot>,
    /// In hand order.
    pub hand: Vec<CardInstance>,
    /// Sorted by instance id so the snapshot does not leak draw order.
    pub draw_pile: Vec<CardInstance>,
    pub discard_pile: Vec<CardInstance>,
    pub exhaust_pile: Vec<CardInstance>,
    pub powers: Vec<Power>,
}

fn status_entries<T: StatusHolder + ?Sized>(holder: &T) -> Vec<StatusEntry> {
    holder
        .statuses()
        .sorted_entries()
        .into_iter()
        .map(|(key, value)| StatusEntry {
            key: key.to_string(),
            value,
        })
        .collect()
}

fn project_intent(opponent: &Opponent, state: &CombatState) -> Option<IntentSnapshot> {
    let mv = opponent.intent()?;
    let strength = opponent.statuses.get(keys::STRENGTH);
    let damage = mv.damage.map(|base| {
        let raw = base + mv.bonus_damage(opponent.hp_percent()) + strength;
        let (effective, _, _) =
            damage::effective_amount(raw, mv.element, &state.player, state.multipliers());
        effective
    });

    Some(IntentSnapshot {
        move_id: mv.id.clone(),
        name: mv.name.clone(),
        kind: mv.kind,
        damage,
        hits: mv.hits,
        guard: mv.guard,
    })
}

impl CombatantSnapshot {
    fn of_opponent(opponent: &Opponent, state: &CombatState) -> Self {
        Self {
            id: opponent.id.clone(),
            name: opponent.name.clone(),
            health: opponent.health.current(),
            max_health: opponent.health.max(),
            guard: opponent.statuses.guard(),
            statuses: status_entries(opponent),
            intent: project_intent(opponent, state),
            phase: opponent.phase(),
            defeated: opponent.is_defeated(),
        }
    }
}

impl CombatSnapshot {
    #[must_use]
    pub fn capture(state: &CombatState, phase: TurnPhase) -> Self {
        let player = &state.player;
        let pile = |pile: Pile| -> Vec<CardInstance> {
            state.piles.instances_in(pile).cloned().collect()
        };
        let mut draw_pile = pile(Pile::Draw);
        draw_pile.sort_by_key(|card| card.id);

        Self {
            turn: state.turn,
            phase,
            energy: player.energy,
            momentum: player.momentum.momentum(),
            last_element: player.momentum.last_element(),
            resonance: player.momentum.resonance_levels(),
            player: CombatantSnapshot {
                id: "player".to_string(),
                name: "Player".to_string(),
                health: player.health.current(),
                max_health: player.health.max(),
                guard: player.statuses.guard(),
                statuses: status_entries(player),
                intent: None,
                phase: 1,
                defeated: player.is_defeated(),
            },
            opponents: state
                .opponents
                .iter()
                .map(|o| CombatantSnapshot::of_opponent(o, state))
                .collect(),
            hand: pile(Pile::Hand),
            draw_pile,
            discard_pile: pile(Pile::Discard),
            exhaust_pile: pile(Pile::Exhaust),
            powers: player.powers.iter().cloned().collect(),
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// The hand card with the given definition id, if any.
    #[must_use]
    pub fn hand_card(&self, card_id: &str) -> Option<&CardInstance> {
        self.hand.iter().find(|card| card.card_id == card_id)
    }
}
