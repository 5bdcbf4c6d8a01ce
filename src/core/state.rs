//! Combat state shared by the interpreter, intents and the turn machine.
//!
//! ## CombatState
//!
//! Everything a single in-progress combat owns:
//! - Player and opponents (health, statuses, momentum, powers, intents)
//! - Card piles
//! - Deterministic RNG streams (piles/targeting and intent rolls)
//! - Turn counters and the pending event log
//!
//! Health changes from damage go through [`CombatState::deal_damage`], which
//! runs the damage pipeline and then the phase and defeat checks.

use tracing::debug;

use super::config::{CombatConfig, DamageMultipliers};
use super::element::Element;
use super::entity::{CombatantId, InstanceId};
use super::rng::GameRng;
use crate::cards::CardInstance;
use crate::combat::{CombatEvent, CombatOutcome};
use crate::combatant::{Damageable, Opponent, Player};
use crate::damage::{self, DamageOutcome};
use crate::piles::{DrawOutcome, Pile, PileManager, PilePosition};
use crate::status::{keys, StatusDuration};

/// Mutable state of one combat.
#[derive(Clone, Debug)]
pub struct CombatState {
    pub config: CombatConfig,
    pub player: Player,
    pub opponents: Vec<Opponent>,
    pub piles: PileManager,

    /// Shuffles, draws and random targeting.
    pub rng: GameRng,

    /// Intent selection only, so card draws never shift intent rolls.
    pub intent_rng: GameRng,

    /// Round number (starts at 1).
    pub turn: u32,

    multipliers: DamageMultipliers,
    events: Vec<CombatEvent>,
}

impl CombatState {
    #[must_use]
    pub fn new(config: CombatConfig, player: Player, opponents: Vec<Opponent>) -> Self {
        let rng = GameRng::new(config.seed);
        let intent_rng = rng.for_context("intent");
        let multipliers = config.multipliers();
        Self {
            config,
            player,
            opponents,
            piles: PileManager::new(),
            rng,
            intent_rng,
            turn: 1,
            multipliers,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn multipliers(&self) -> &DamageMultipliers {
        &self.multipliers
    }

    // === Combatants ===

    /// Look up a combatant by id.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> Option<&dyn Damageable> {
        match id {
            CombatantId::Player => Some(&self.player),
            CombatantId::Opponent(i) => self.opponents.get(i).map(|o| o as &dyn Damageable),
        }
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut dyn Damageable> {
        match id {
            CombatantId::Player => Some(&mut self.player),
            CombatantId::Opponent(i) => self
                .opponents
                .get_mut(i)
                .map(|o| o as &mut dyn Damageable),
        }
    }

    /// Check if a combatant exists and has health left.
    #[must_use]
    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.combatant(id).is_some_and(|c| !c.is_defeated())
    }

    /// Indices of opponents still standing, in iteration order.
    #[must_use]
    pub fn living_opponents(&self) -> Vec<usize> {
        self.opponents
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_defeated())
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn first_living_opponent(&self) -> Option<usize> {
        self.opponents.iter().position(|o| !o.is_defeated())
    }

    /// Cards the player has played this turn, read from the turn-scoped
    /// `cards_played` status.
    #[must_use]
    pub fn plays_this_turn(&self) -> u32 {
        u32::try_from(self.player.statuses.get(keys::CARDS_PLAYED)).unwrap_or(0)
    }

    /// A living opponent chosen with the combat RNG.
    pub fn random_living_opponent(&mut self) -> Option<usize> {
        let living = self.living_opponents();
        self.rng.choose(&living).copied()
    }

    /// Flat damage bonus from the combatant's strength.
    #[must_use]
    pub fn strength_of(&self, id: CombatantId) -> i32 {
        self.combatant(id)
            .map_or(0, |c| c.statuses().get(keys::STRENGTH))
    }

    // === Health and statuses ===

    /// Resolve one hit through the damage pipeline.
    ///
    /// Returns `None` without doing anything when the target is missing or
    /// already defeated. After HP loss on an opponent, a fallen opponent has
    /// its intents halted and the defeat recorded; a surviving one runs its
    /// phase check.
    pub fn deal_damage(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        raw: i32,
        element: Element,
    ) -> Option<DamageOutcome> {
        if !self.is_alive(target) {
            return None;
        }

        let multipliers = self.multipliers;
        let outcome = damage::resolve(raw, element, self.combatant_mut(target)?, &multipliers);

        if outcome.effective > 0 {
            self.events.push(CombatEvent::DamageDealt {
                source,
                target,
                hp_loss: outcome.hp_loss,
                guard_absorbed: outcome.guard_absorbed,
                weakness_hit: outcome.was_weakness_hit,
            });
        }

        if outcome.hp_loss > 0 {
            if let CombatantId::Opponent(index) = target {
                self.after_opponent_hp_loss(index);
            }
        }

        Some(outcome)
    }

    fn after_opponent_hp_loss(&mut self, index: usize) {
        let Some(opponent) = self.opponents.get_mut(index) else {
            return;
        };

        // A killing blow never starts a new phase.
        if opponent.is_defeated() {
            debug!(opponent = %opponent.id, index, "opponent defeated");
            opponent.halt();
            self.events.push(CombatEvent::OpponentDefeated { opponent: index });
        } else if let Some((from, to)) = opponent.check_phase() {
            self.events.push(CombatEvent::PhaseChanged {
                opponent: index,
                from,
                to,
            });
        }
    }

    /// Apply a status to a living combatant.
    pub fn apply_status(
        &mut self,
        target: CombatantId,
        key: &str,
        amount: i32,
        duration: StatusDuration,
    ) -> bool {
        if !self.is_alive(target) {
            return false;
        }
        match self.combatant_mut(target) {
            Some(combatant) => {
                combatant.statuses_mut().apply(key, amount, duration);
                true
            }
            None => false,
        }
    }

    /// Grant guard to a living combatant.
    pub fn gain_guard(&mut self, target: CombatantId, amount: i32) -> bool {
        self.apply_status(target, keys::GUARD, amount, StatusDuration::Indefinite)
    }

    // === Piles ===

    /// Draw up to `count` cards. Returns how many reached the hand.
    pub fn draw_cards(&mut self, count: u32) -> u32 {
        let mut drawn = 0;
        for _ in 0..count {
            match self.piles.draw(&mut self.rng, self.config.max_hand_size) {
                DrawOutcome::Drawn(_) => drawn += 1,
                DrawOutcome::Overflowed(id) => {
                    debug!(%id, "hand full; drawn card discarded");
                }
                DrawOutcome::Empty => break,
            }
        }
        drawn
    }

    /// Create a new in-combat card instance in a pile.
    ///
    /// Cards added to the draw pile land at a random position. A card bound
    /// for a full hand goes to the discard pile instead.
    pub fn create_card(&mut self, card_id: &str, pile: Pile) -> InstanceId {
        let id = self.piles.alloc_id();

        let pile = if pile == Pile::Hand && self.piles.len(Pile::Hand) >= self.config.max_hand_size {
            Pile::Discard
        } else {
            pile
        };

        let position = match pile {
            Pile::Draw => {
                let len = self.piles.len(Pile::Draw);
                PilePosition::Index(self.rng.insertion_index(len))
            }
            _ => PilePosition::Top,
        };

        self.piles
            .insert(CardInstance::generated(id, card_id), pile, Some(position));
        self.events.push(CombatEvent::CardAddedToPile {
            instance: id,
            card_id: card_id.to_string(),
            pile,
        });
        id
    }

    // === Outcome and events ===

    /// Terminal outcome, if either side has been wiped out.
    #[must_use]
    pub fn outcome(&self) -> Option<CombatOutcome> {
        if self.player.is_defeated() {
            Some(CombatOutcome::Defeat)
        } else if self.opponents.iter().all(|o| o.is_defeated()) {
            Some(CombatOutcome::Victory)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OpponentDefinition;
    use crate::combatant::Health;
    use crate::intent::{OpponentMove, PhaseSchedule};
    use crate::momentum::MomentumTracker;
    use crate::status::StatusRules;
    use std::sync::Arc;

    fn state_with(defs: &[OpponentDefinition]) -> CombatState {
        let rules = Arc::new(StatusRules::default());
        let player = Player::new(Health::full(80), Arc::clone(&rules), MomentumTracker::default());
        let opponents = defs
            .iter()
            .map(|d| Opponent::from_definition(d, 8, Arc::clone(&rules)))
            .collect();
        CombatState::new(CombatConfig::default(), player, opponents)
    }

    fn dummy(id: &str, hp: i32) -> OpponentDefinition {
        OpponentDefinition::new(id, id, hp).with_move(OpponentMove::attack("jab", 3))
    }

    #[test]
    fn test_deal_damage_and_defeat() {
        let mut state = state_with(&[dummy("a", 10), dummy("b", 10)]);

        let out = state
            .deal_damage(CombatantId::Player, CombatantId::Opponent(0), 12, Element::Neutral)
            .unwrap();
        assert_eq!(out.hp_loss, 10);
        assert!(!state.is_alive(CombatantId::Opponent(0)));
        assert_eq!(state.first_living_opponent(), Some(1));
        assert_eq!(state.outcome(), None);

        let events = state.drain_events();
        assert!(events.contains(&CombatEvent::OpponentDefeated { opponent: 0 }));

        // Dead targets are skipped
        assert!(state
            .deal_damage(CombatantId::Player, CombatantId::Opponent(0), 5, Element::Neutral)
            .is_none());
        assert!(state.drain_events().is_empty());

        state.deal_damage(CombatantId::Player, CombatantId::Opponent(1), 10, Element::Neutral);
        assert_eq!(state.outcome(), Some(CombatOutcome::Victory));
    }

    #[test]
    fn test_player_defeat() {
        let mut state = state_with(&[dummy("a", 10)]);
        state.deal_damage(CombatantId::Opponent(0), CombatantId::Player, 200, Element::Neutral);
        assert_eq!(state.player.health.current(), 0);
        assert_eq!(state.outcome(), Some(CombatOutcome::Defeat));
    }

    #[test]
    fn test_phase_event_once() {
        let def = dummy("boss", 100).with_phases(PhaseSchedule::new(vec![0.5]));
        let mut state = state_with(&[def]);

        state.deal_damage(CombatantId::Player, CombatantId::Opponent(0), 40, Element::Neutral);
        state.deal_damage(CombatantId::Player, CombatantId::Opponent(0), 50, Element::Neutral);
        state.deal_damage(CombatantId::Player, CombatantId::Opponent(0), 5, Element::Neutral);

        let phase_events: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CombatEvent::PhaseChanged { .. }))
            .collect();
        assert_eq!(
            phase_events,
            vec![CombatEvent::PhaseChanged { opponent: 0, from: 1, to: 2 }]
        );
    }

    #[test]
    fn test_create_card_respects_hand_cap() {
        let mut state = state_with(&[dummy("a", 10)]);
        state.config.max_hand_size = 1;

        let first = state.create_card("burn", Pile::Hand);
        let second = state.create_card("burn", Pile::Hand);

        assert_eq!(state.piles.pile_of(first), Some(Pile::Hand));
        assert_eq!(state.piles.pile_of(second), Some(Pile::Discard));
        assert!(state.piles.get(second).unwrap().created_in_combat);
    }

    #[test]
    fn test_draw_cards_stops_when_empty() {
        let mut state = state_with(&[dummy("a", 10)]);
        state.create_card("strike", Pile::Draw);
        state.create_card("strike", Pile::Discard);

        assert_eq!(state.draw_cards(5), 2);
        assert_eq!(state.piles.len(Pile::Hand), 2);
    }
}
