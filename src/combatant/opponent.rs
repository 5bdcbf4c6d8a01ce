//! Opponents built from catalog definitions.
//!
//! An opponent owns its intent selector and phase tracker. Crossing an HP
//! threshold runs the new phase's actions once; defeat halts the selector.

use std::sync::Arc;

use tracing::debug;

use super::{Damageable, Health, StatusHolder};
use crate::catalog::OpponentDefinition;
use crate::core::{Element, GameRng};
use crate::intent::{IntentSelector, OpponentMove, PhaseAction, PhaseSchedule, PhaseTracker};
use crate::status::{keys, StatusDuration, StatusRules, StatusStore};

/// An opposing combatant built from an [`OpponentDefinition`].
#[derive(Clone, Debug)]
pub struct Opponent {
    /// Definition id.
    pub id: String,
    pub name: String,
    pub health: Health,
    pub statuses: StatusStore,
    weakness: Option<Element>,
    resistance: Option<Element>,
    /// Active move set; phase transitions may swap it.
    moves: Vec<OpponentMove>,
    selector: IntentSelector,
    phases: Option<PhaseSchedule>,
    phase: PhaseTracker,
    resets_guard: bool,
}

impl Opponent {
    #[must_use]
    pub fn from_definition(
        def: &OpponentDefinition,
        history_len: usize,
        rules: Arc<StatusRules>,
    ) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            health: Health::full(def.max_health),
            statuses: StatusStore::with_rules(rules),
            weakness: def.weakness,
            resistance: def.resistance,
            moves: def.moves.clone(),
            selector: IntentSelector::new(history_len),
            phases: def.phases.clone(),
            phase: PhaseTracker::new(),
            resets_guard: def.resets_guard,
        }
    }

    #[must_use]
    pub fn moves(&self) -> &[OpponentMove] {
        &self.moves
    }

    #[must_use]
    pub fn selector(&self) -> &IntentSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut IntentSelector {
        &mut self.selector
    }

    /// The visible intent for the upcoming opponent turn.
    #[must_use]
    pub fn intent(&self) -> Option<&OpponentMove> {
        self.selector.current()
    }

    #[must_use]
    pub fn phase(&self) -> u32 {
        self.phase.current()
    }

    /// Whether guard is cleared at this opponent's own turn start.
    #[must_use]
    pub fn resets_guard(&self) -> bool {
        self.resets_guard
    }

    /// Choose the next intent. Returns `None` once defeated.
    pub fn choose_intent(&mut self, turn: u32, rng: &mut GameRng) -> Option<&OpponentMove> {
        let hp_percent = self.health.percent();
        self.selector
            .choose_next_move(&self.moves, hp_percent, turn, rng)
    }

    /// Re-evaluate the phase after HP loss, applying the transition for the
    /// highest newly reached phase. Returns `(from, to)` when the phase moved.
    pub fn check_phase(&mut self) -> Option<(u32, u32)> {
        let schedule = self.phases.as_ref()?;
        let from = self.phase.current();
        let to = self.phase.check(schedule, self.health.fraction())?;
        let actions = schedule.actions_for(to).to_vec();
        debug!(opponent = %self.id, from, to, "phase transition");
        for action in actions {
            self.apply_phase_action(action);
        }
        Some((from, to))
    }

    fn apply_phase_action(&mut self, action: PhaseAction) {
        match action {
            PhaseAction::SwapMoveSet(moves) => self.moves = moves,
            PhaseAction::ResetCooldowns => self.selector.clear_cooldowns(),
            PhaseAction::ClearHistory => self.selector.clear_history(),
            PhaseAction::ApplySelfStatus {
                key,
                amount,
                duration,
            } => self.statuses.apply(&key, amount, duration),
            PhaseAction::GainGuard(amount) => {
                self.statuses
                    .apply(keys::GUARD, amount, StatusDuration::Indefinite);
            }
        }
    }

    /// Stop intent selection after defeat.
    pub fn halt(&mut self) {
        self.selector.halt();
    }
}

impl StatusHolder for Opponent {
    fn statuses(&self) -> &StatusStore {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusStore {
        &mut self.statuses
    }
}

impl Damageable for Opponent {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn weakness(&self) -> Option<Element> {
        self.weakness
    }

    fn resistance(&self) -> Option<Element> {
        self.resistance
    }
}
