//! The turn state machine.
//!
//! ## Phases
//!
//! ```text
//! PlayerTurnStart -> PlayerTurnMain -> PlayerTurnEnd -> OpponentTurn -> (next round)
//! ```
//!
//! Control returns to the caller only in `PlayerTurnMain` (waiting for a
//! card play or end turn) and in `Finished`. Victory and defeat are checked
//! after every operation that can change health.
//!
//! ## Player Turn Start
//!
//! 1. Reset guard and clear turn-scoped statuses
//! 2. Energy = base + modifier bonuses - drain (never below 0)
//! 3. Reset the play counter
//! 4. Fire turn-start powers, then modifier turn-start payloads
//! 5. Draw the configured hand size
//!
//! ## Player Turn End
//!
//! 1. Fire turn-end powers
//! 2. Exhaust ethereal cards, discard the rest of the hand except retained cards
//! 3. Reset momentum and decay resonance
//! 4. Tick player status and power durations
//!
//! ## Opponent Turn
//!
//! Each living opponent in order ticks its statuses, optionally resets its
//! guard, then executes its intent. Afterwards the round advances, cooldowns
//! tick and every living opponent picks its next intent.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::event::{CombatEvent, CombatOutcome};
use super::snapshot::CombatSnapshot;
use crate::cards::{CardInstance, Keyword};
use crate::catalog::{Catalogs, ModifierDefinition};
use crate::combatant::{Damageable, Health, Opponent, Player};
use crate::core::{
    CombatConfig, CombatState, CombatantId, ConfigError, Element, InstanceId, PlayError,
};
use crate::effects::{EffectInterpreter, EffectPayload, ExecutionReport};
use crate::intent;
use crate::momentum::MomentumTracker;
use crate::piles::Pile;
use crate::powers::TriggerPoint;
use crate::status::{keys, StatusDuration};

/// Where the combat currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    PlayerTurnStart,
    PlayerTurnMain,
    PlayerTurnEnd,
    OpponentTurn,
    Finished(CombatOutcome),
}

impl TurnPhase {
    #[must_use]
    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self {
            Self::Finished(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// Everything needed to start a combat.
#[derive(Clone, Debug, Default)]
pub struct CombatSetup {
    pub player_health: i32,
    pub player_max_health: i32,
    /// The player's deck; instances are returned by [`Combat::finish`].
    pub deck: Vec<CardInstance>,
    pub opponent_ids: Vec<String>,
    /// Active run-long modifier sources.
    pub modifier_ids: Vec<String>,
}

impl CombatSetup {
    #[must_use]
    pub fn new(player_health: i32, player_max_health: i32) -> Self {
        Self {
            player_health,
            player_max_health,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Vec<CardInstance>) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_opponent(mut self, id: impl Into<String>) -> Self {
        self.opponent_ids.push(id.into());
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, id: impl Into<String>) -> Self {
        self.modifier_ids.push(id.into());
        self
    }
}

/// Result of an accepted card play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    pub card_id: String,
    pub cost: i32,
    pub target: CombatantId,
    pub execution: ExecutionReport,
    /// Momentum after the play.
    pub momentum: i32,
    /// Set when this play ended the combat.
    pub outcome: Option<CombatOutcome>,
}

/// What the caller gets back once a combat is over or abandoned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatResult {
    /// `None` when the combat was abandoned before a terminal outcome.
    pub outcome: Option<CombatOutcome>,
    /// The original deck instances, single-combat modifiers cleared.
    pub deck: Vec<CardInstance>,
}

/// A single in-progress combat.
///
/// ## Example
///
/// ```
/// use resonance_combat::cards::{CardDefinition, CardInstance, CardType};
/// use resonance_combat::catalog::{Catalogs, OpponentDefinition};
/// use resonance_combat::combat::{Combat, CombatSetup, TurnPhase};
/// use resonance_combat::core::{CombatConfig, InstanceId};
/// use resonance_combat::effects::Effect;
/// use resonance_combat::intent::OpponentMove;
///
/// let mut catalogs = Catalogs::new();
/// catalogs.cards.register(
///     CardDefinition::new("strike", "Strike", CardType::Attack)
///         .with_cost(1)
///         .with_effect(Effect::damage(6)),
/// ).unwrap();
/// catalogs.opponents.register(
///     OpponentDefinition::new("slime", "Slime", 20).with_move(OpponentMove::attack("tackle", 3)),
/// ).unwrap();
///
/// let deck = (0..5).map(|i| CardInstance::new(InstanceId(i), "strike")).collect();
/// let setup = CombatSetup::new(50, 50).with_deck(deck).with_opponent("slime");
/// let mut combat = Combat::new(&catalogs, CombatConfig::default(), setup).unwrap();
///
/// assert_eq!(combat.phase(), TurnPhase::PlayerTurnMain);
/// let card = combat.hand()[0].id;
/// combat.play_card(card, None).unwrap();
/// assert_eq!(combat.opponents()[0].health.current(), 14);
/// ```
#[derive(Debug)]
pub struct Combat<'a> {
    catalogs: &'a Catalogs,
    modifiers: Vec<&'a ModifierDefinition>,
    state: CombatState,
    phase: TurnPhase,
}

impl<'a> Combat<'a> {
    /// Set up a combat and run it up to the player's first main phase.
    ///
    /// Unknown opponent and modifier ids are logged and skipped. With no
    /// opponents left the combat starts already won.
    pub fn new(
        catalogs: &'a Catalogs,
        config: CombatConfig,
        setup: CombatSetup,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let modifiers: Vec<&'a ModifierDefinition> = setup
            .modifier_ids
            .iter()
            .filter_map(|id| {
                let found = catalogs.modifier(id);
                if found.is_none() {
                    warn!(modifier = %id, "unknown modifier skipped");
                }
                found
            })
            .collect();

        let rules = Arc::new(config.status_rules.clone());
        let momentum = MomentumTracker::new(config.momentum_gain, config.resonance_decay)
            .with_modifiers(
                modifiers
                    .iter()
                    .flat_map(|m| m.momentum_modifiers.iter().copied()),
            );
        let player = Player::new(
            Health::new(setup.player_health, setup.player_max_health),
            Arc::clone(&rules),
            momentum,
        );

        let opponents: Vec<Opponent> = setup
            .opponent_ids
            .iter()
            .filter_map(|id| match catalogs.opponent(id) {
                Some(def) => Some(Opponent::from_definition(
                    def,
                    config.intent_history_len,
                    Arc::clone(&rules),
                )),
                None => {
                    warn!(opponent = %id, "unknown opponent skipped");
                    None
                }
            })
            .collect();

        let mut state = CombatState::new(config, player, opponents);
        for instance in setup.deck {
            let id = instance.id;
            if !state.piles.insert(instance, Pile::Draw, None) {
                warn!(%id, "duplicate deck instance skipped");
            }
        }
        state.piles.shuffle(Pile::Draw, &mut state.rng);

        let mut combat = Self {
            catalogs,
            modifiers,
            state,
            phase: TurnPhase::PlayerTurnStart,
        };
        combat.start();
        Ok(combat)
    }

    fn interpreter(&self) -> EffectInterpreter<'a> {
        EffectInterpreter::new(self.catalogs)
    }

    fn start(&mut self) {
        if self.check_outcome() {
            return;
        }
        self.choose_intents();
        self.begin_player_turn(true);
    }

    /// Run one payload per modifier, aimed at the first living opponent.
    fn run_modifier_payloads(&mut self, payload: fn(&ModifierDefinition) -> &EffectPayload) {
        let interpreter = self.interpreter();
        for modifier in &self.modifiers {
            if self.state.is_over() {
                break;
            }
            let Some(target) = self.state.first_living_opponent() else {
                break;
            };
            interpreter.execute(
                &mut self.state,
                payload(modifier),
                CombatantId::Player,
                CombatantId::Opponent(target),
                Element::Neutral,
            );
        }
    }

    /// Move to `Finished` if either side has been wiped out.
    fn check_outcome(&mut self) -> bool {
        if let TurnPhase::Finished(_) = self.phase {
            return true;
        }
        match self.state.outcome() {
            Some(outcome) => {
                debug!(?outcome, turn = self.state.turn, "combat finished");
                self.phase = TurnPhase::Finished(outcome);
                self.state.emit(outcome.into());
                true
            }
            None => false,
        }
    }

    fn choose_intents(&mut self) {
        let turn = self.state.turn;
        for index in 0..self.state.opponents.len() {
            let opponent = &mut self.state.opponents[index];
            if opponent.is_defeated() {
                continue;
            }
            let Some(chosen) = opponent.choose_intent(turn, &mut self.state.intent_rng) else {
                continue;
            };
            let event = CombatEvent::IntentChosen {
                opponent: index,
                move_id: chosen.id.clone(),
                kind: chosen.kind,
            };
            self.state.emit(event);
        }
    }

    fn begin_player_turn(&mut self, opening: bool) {
        self.phase = TurnPhase::PlayerTurnStart;

        let player = &mut self.state.player;
        player.statuses.reset_guard();
        player.statuses.clear_turn_scoped();

        let bonus: i32 = self.modifiers.iter().map(|m| m.energy_bonus).sum();
        let drain = player.statuses.get(keys::DRAIN);
        player.energy = (self.state.config.base_energy + bonus - drain).max(0);

        // Combat-start payloads run once, after the turn-1 refill.
        if opening {
            self.run_modifier_payloads(|m| &m.on_combat_start);
        }

        self.interpreter()
            .fire_powers(&mut self.state, TriggerPoint::TurnStart);
        self.run_modifier_payloads(|m| &m.on_turn_start);
        if self.check_outcome() {
            return;
        }

        let hand_size = self.state.config.hand_size as u32;
        self.state.draw_cards(hand_size);

        debug!(
            turn = self.state.turn,
            energy = self.state.player.energy,
            hand = self.state.piles.len(Pile::Hand),
            "player turn started"
        );
        self.phase = TurnPhase::PlayerTurnMain;
    }

    fn ensure_main_phase(&self) -> Result<(), PlayError> {
        match self.phase {
            TurnPhase::PlayerTurnMain => Ok(()),
            TurnPhase::Finished(_) => Err(PlayError::CombatOver),
            _ => Err(PlayError::NotPlayerTurn),
        }
    }

    /// Play a card from hand.
    ///
    /// `target` indexes the opponent list; `None` picks the first living
    /// opponent. A rejected play leaves the combat untouched.
    pub fn play_card(
        &mut self,
        instance: InstanceId,
        target: Option<usize>,
    ) -> Result<PlayReport, PlayError> {
        self.ensure_main_phase()?;

        if !self.state.piles.is_in(instance, Pile::Hand) {
            return Err(PlayError::CardNotInHand(instance));
        }
        let card = self
            .state
            .piles
            .get(instance)
            .ok_or(PlayError::CardNotInHand(instance))?;
        let upgraded = card.upgraded;
        let catalogs = self.catalogs;
        let def = catalogs
            .card(&card.card_id)
            .ok_or_else(|| PlayError::Unplayable(card.card_id.clone()))?;

        if def.cost_for(upgraded).is_some_and(|c| c < 0) {
            warn!(card = %def.id, "negative card cost treated as 0");
        }
        let cost = card
            .effective_cost(def.cost_for(upgraded))
            .ok_or_else(|| PlayError::Unplayable(def.id.clone()))?;

        if let Some(limit) = self.state.config.max_plays_per_turn {
            if self.state.plays_this_turn() >= limit {
                return Err(PlayError::PlayLimitReached { limit });
            }
        }

        let available = self.state.player.energy;
        if cost > available {
            return Err(PlayError::NotEnoughEnergy { cost, available });
        }

        let target_index = match target {
            Some(index) => {
                if !self.state.is_alive(CombatantId::Opponent(index)) {
                    return Err(PlayError::InvalidTarget);
                }
                index
            }
            None => self
                .state
                .first_living_opponent()
                .ok_or(PlayError::InvalidTarget)?,
        };
        let target = CombatantId::Opponent(target_index);

        // Validated; from here the play always goes through.
        self.state.player.spend_energy(cost);
        self.state
            .player
            .statuses
            .apply(keys::CARDS_PLAYED, 1, StatusDuration::Indefinite);
        self.state.emit(CombatEvent::CardPlayed {
            instance,
            card_id: def.id.clone(),
            element: def.element,
            cost,
        });
        debug!(card = %def.id, %instance, cost, %target, "card played");

        let interpreter = self.interpreter();
        let execution = interpreter.execute_card(&mut self.state, def, upgraded, target);

        let destination = if def.has_keyword(Keyword::Exhaust) {
            Pile::Exhaust
        } else {
            Pile::Discard
        };
        if self.state.piles.is_in(instance, Pile::Hand) {
            self.state.piles.move_to(instance, destination, None);
        }

        let tracker = &mut self.state.player.momentum;
        let momentum = tracker.on_card_played(def.element);
        if execution.weakness_hits > 0 && !def.element.is_neutral() {
            let gain = self.state.config.resonance_gain * execution.weakness_hits as i32;
            tracker.on_weakness_hit(def.element, gain);
        }

        if !self.state.is_over() {
            interpreter.fire_powers(&mut self.state, TriggerPoint::CardPlayed(def.element));
        }
        self.check_outcome();

        Ok(PlayReport {
            card_id: def.id.clone(),
            cost,
            target,
            execution,
            momentum,
            outcome: self.phase.outcome(),
        })
    }

    /// End the player's turn, run the opponent turn, and start the next
    /// player turn unless the combat ends on the way.
    ///
    /// Returns the phase the combat stopped in.
    pub fn end_turn(&mut self) -> Result<TurnPhase, PlayError> {
        self.ensure_main_phase()?;
        self.phase = TurnPhase::PlayerTurnEnd;

        let interpreter = self.interpreter();
        interpreter.fire_powers(&mut self.state, TriggerPoint::TurnEnd);
        if self.check_outcome() {
            return Ok(self.phase);
        }

        self.clean_up_hand();

        let player = &mut self.state.player;
        player.momentum.end_of_player_turn();
        let expired = player.statuses.tick_durations();
        if !expired.is_empty() {
            debug!(?expired, "player statuses expired");
        }
        player.powers.tick_durations();

        self.phase = TurnPhase::OpponentTurn;
        for index in 0..self.state.opponents.len() {
            let opponent = &mut self.state.opponents[index];
            if opponent.is_defeated() {
                continue;
            }
            opponent.statuses.tick_durations();
            if opponent.resets_guard() {
                opponent.statuses.reset_guard();
            }
            intent::execute_move(&mut self.state, &interpreter, index);
            if self.check_outcome() {
                return Ok(self.phase);
            }
        }

        self.state.turn += 1;
        for opponent in &mut self.state.opponents {
            opponent.selector_mut().tick_cooldowns();
        }
        self.choose_intents();
        self.begin_player_turn(false);

        Ok(self.phase)
    }

    fn clean_up_hand(&mut self) {
        let catalogs = self.catalogs;
        let retain_all = self.modifiers.iter().any(|m| m.retain_hand);
        let hand: Vec<InstanceId> = self.state.piles.cards_in(Pile::Hand).to_vec();

        for id in hand {
            let Some(card) = self.state.piles.get(id) else {
                continue;
            };
            let def = catalogs.card(&card.card_id);
            let has = |keyword| def.is_some_and(|d| d.has_keyword(keyword));

            if has(Keyword::Ethereal) {
                self.state.piles.move_to(id, Pile::Exhaust, None);
            } else if !(retain_all || card.modifiers.retain || has(Keyword::Retain)) {
                self.state.piles.move_to(id, Pile::Discard, None);
            }
        }
    }

    /// Apply a single-combat cost adjustment and retain flag to a card.
    ///
    /// Returns `false` if the instance is not in this combat.
    pub fn adjust_card(&mut self, instance: InstanceId, cost_delta: i32, retain: bool) -> bool {
        match self.state.piles.get_mut(instance) {
            Some(card) => {
                card.adjust_cost(cost_delta);
                card.modifiers.retain |= retain;
                true
            }
            None => false,
        }
    }

    // === Observation ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.phase.outcome()
    }

    #[must_use]
    pub fn state(&self) -> &CombatState {
        &self.state
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.state.player
    }

    #[must_use]
    pub fn opponents(&self) -> &[Opponent] {
        &self.state.opponents
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    /// Cards in a pile, in pile order.
    #[must_use]
    pub fn pile(&self, pile: Pile) -> Vec<&CardInstance> {
        self.state.piles.instances_in(pile).collect()
    }

    #[must_use]
    pub fn hand(&self) -> Vec<&CardInstance> {
        self.pile(Pile::Hand)
    }

    /// Render-ready view of the whole combat.
    #[must_use]
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot::capture(&self.state, self.phase)
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.state.drain_events()
    }

    /// Tear the combat down.
    ///
    /// Returns the original deck instances with single-combat modifiers
    /// cleared. Cards created during the combat are dropped.
    #[must_use]
    pub fn finish(self) -> CombatResult {
        let outcome = self.phase.outcome();
        let deck = self
            .state
            .piles
            .into_instances()
            .into_iter()
            .filter(|card| !card.created_in_combat)
            .map(|mut card| {
                card.clear_combat_modifiers();
                card
            })
            .collect();
        CombatResult { outcome, deck }
    }
}
