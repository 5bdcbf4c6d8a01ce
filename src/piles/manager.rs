//! Pile manager for card locations and movement.
//!
//! The `PileManager` owns every card instance in a combat and tracks which
//! pile holds it. Moving a card is a transfer of location, never a copy:
//! each instance is listed in exactly one pile.
//!
//! Every pile is ordered. For the draw pile the last entry is the top card;
//! logically the draw pile is shuffled and its order only matters for
//! debugging.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::{GameRng, InstanceId};

/// The piles a card can occupy during combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pile {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

impl Pile {
    pub const ALL: [Pile; 4] = [Pile::Draw, Pile::Hand, Pile::Discard, Pile::Exhaust];

    const fn index(self) -> usize {
        match self {
            Self::Draw => 0,
            Self::Hand => 1,
            Self::Discard => 2,
            Self::Exhaust => 3,
        }
    }
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Draw => "draw",
            Self::Hand => "hand",
            Self::Discard => "discard",
            Self::Exhaust => "exhaust",
        };
        f.write_str(name)
    }
}

/// Position for inserting a card into a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// End of the pile (top of the draw pile).
    Top,
    /// Start of the pile.
    Bottom,
    /// Insert at a specific index (clamped to the pile length).
    Index(usize),
}

/// Result of a single draw attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Card moved into the hand.
    Drawn(InstanceId),
    /// Hand was full; card went to the discard pile.
    Overflowed(InstanceId),
    /// Draw and discard piles were both empty.
    Empty,
}

/// Manages card instances across piles.
///
/// ```
/// use resonance_combat::cards::CardInstance;
/// use resonance_combat::core::InstanceId;
/// use resonance_combat::piles::{Pile, PileManager};
///
/// let mut piles = PileManager::new();
/// piles.insert(CardInstance::new(InstanceId(1), "strike"), Pile::Draw, None);
/// piles.insert(CardInstance::new(InstanceId(2), "defend"), Pile::Draw, None);
///
/// assert_eq!(piles.len(Pile::Draw), 2);
/// piles.move_to(InstanceId(2), Pile::Hand, None);
/// assert_eq!(piles.pile_of(InstanceId(2)), Some(Pile::Hand));
/// assert_eq!(piles.cards_in(Pile::Hand), &[InstanceId(2)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PileManager {
    /// Owned instances by id.
    instances: FxHashMap<InstanceId, CardInstance>,

    /// Card locations: instance id -> pile.
    locations: FxHashMap<InstanceId, Pile>,

    /// Ordered contents, indexed by `Pile::index`.
    order: [Vec<InstanceId>; 4],

    next_id: InstanceId,
}

impl PileManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an instance and place it in a pile.
    ///
    /// Returns `false` and leaves the manager unchanged if an instance with
    /// the same id is already owned.
    pub fn insert(
        &mut self,
        instance: CardInstance,
        pile: Pile,
        position: Option<PilePosition>,
    ) -> bool {
        let id = instance.id;
        if self.instances.contains_key(&id) {
            return false;
        }

        self.next_id = self.next_id.max(id.successor());
        self.instances.insert(id, instance);
        self.locations.insert(id, pile);
        self.place(id, pile, position);
        true
    }

    /// Allocate an id unused by any owned instance.
    pub fn alloc_id(&mut self) -> InstanceId {
        let id = self.next_id;
        self.next_id = id.successor();
        id
    }

    fn place(&mut self, id: InstanceId, pile: Pile, position: Option<PilePosition>) {
        let order = &mut self.order[pile.index()];
        match position.unwrap_or(PilePosition::Top) {
            PilePosition::Top => order.push(id),
            PilePosition::Bottom => order.insert(0, id),
            PilePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, id);
            }
        }
    }

    /// Move a card from its current pile to another.
    ///
    /// Returns the old pile, or `None` if the card isn't owned.
    pub fn move_to(
        &mut self,
        id: InstanceId,
        pile: Pile,
        position: Option<PilePosition>,
    ) -> Option<Pile> {
        let old = self.locations.get(&id).copied()?;

        self.order[old.index()].retain(|&e| e != id);
        self.locations.insert(id, pile);
        self.place(id, pile, position);

        Some(old)
    }

    /// Release an instance from the manager entirely.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pile = self.locations.remove(&id)?;
        self.order[pile.index()].retain(|&e| e != id);
        self.instances.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.instances.get_mut(&id)
    }

    #[must_use]
    pub fn pile_of(&self, id: InstanceId) -> Option<Pile> {
        self.locations.get(&id).copied()
    }

    #[must_use]
    pub fn is_in(&self, id: InstanceId, pile: Pile) -> bool {
        self.locations.get(&id) == Some(&pile)
    }

    /// Cards in a pile, in order (last entry is the top).
    #[must_use]
    pub fn cards_in(&self, pile: Pile) -> &[InstanceId] {
        &self.order[pile.index()]
    }

    /// Instances in a pile, in order.
    pub fn instances_in(&self, pile: Pile) -> impl Iterator<Item = &CardInstance> + '_ {
        self.order[pile.index()]
            .iter()
            .filter_map(move |id| self.instances.get(id))
    }

    #[must_use]
    pub fn len(&self, pile: Pile) -> usize {
        self.order[pile.index()].len()
    }

    #[must_use]
    pub fn is_empty(&self, pile: Pile) -> bool {
        self.order[pile.index()].is_empty()
    }

    /// Total number of owned instances.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.instances.len()
    }

    /// Shuffle a pile in place.
    pub fn shuffle(&mut self, pile: Pile, rng: &mut GameRng) {
        rng.shuffle(&mut self.order[pile.index()]);
    }

    /// Move the whole discard pile into the draw pile and shuffle it.
    pub fn reshuffle_discard(&mut self, rng: &mut GameRng) {
        let discard = std::mem::take(&mut self.order[Pile::Discard.index()]);
        for &id in &discard {
            self.locations.insert(id, Pile::Draw);
        }
        self.order[Pile::Draw.index()].extend(discard);
        self.shuffle(Pile::Draw, rng);
    }

    /// Draw the top card into the hand.
    ///
    /// An empty draw pile is refilled from the discard pile first. A hand
    /// already holding `max_hand` cards sends the drawn card to discard.
    pub fn draw(&mut self, rng: &mut GameRng, max_hand: usize) -> DrawOutcome {
        if self.is_empty(Pile::Draw) {
            if self.is_empty(Pile::Discard) {
                return DrawOutcome::Empty;
            }
            self.reshuffle_discard(rng);
        }

        let Some(id) = self.order[Pile::Draw.index()].last().copied() else {
            return DrawOutcome::Empty;
        };

        if self.len(Pile::Hand) >= max_hand {
            self.move_to(id, Pile::Discard, None);
            DrawOutcome::Overflowed(id)
        } else {
            self.move_to(id, Pile::Hand, None);
            DrawOutcome::Drawn(id)
        }
    }

    /// Consume the manager, returning every owned instance sorted by id.
    #[must_use]
    pub fn into_instances(self) -> Vec<CardInstance> {
        let mut instances: Vec<_> = self.instances.into_values().collect();
        instances.sort_by_key(|instance| instance.id);
        instances
    }
}
