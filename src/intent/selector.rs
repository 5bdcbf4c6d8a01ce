//! Opponent intent selection.
//!
//! Each opponent owns an `IntentSelector` that cycles through
//! `AwaitingIntent -> IntentChosen -> Executing -> AwaitingIntent`.
//! Defeat moves it to `Halted`, which ends the cycle.
//!
//! ## Selection
//!
//! 1. Drop candidates that fail their HP gate, are cooling down, or are
//!    barred from the first turn.
//! 2. If nothing is left, substitute the `wait` move.
//! 3. Weighted draw over the survivors (weight 1 when unspecified).
//!
//! Cooldowns are decremented by [`IntentSelector::tick_cooldowns`], never
//! by selection itself.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::moves::OpponentMove;
use crate::core::GameRng;

/// Where an opponent is in its intent cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntentState {
    #[default]
    AwaitingIntent,
    IntentChosen,
    Executing,
    /// The opponent was defeated; no further intents.
    Halted,
}

/// Per-opponent intent state: current intent, cooldowns, recent moves.
#[derive(Clone, Debug)]
pub struct IntentSelector {
    state: IntentState,
    current: Option<OpponentMove>,
    cooldowns: FxHashMap<String, u32>,
    history: Vector<String>,
    history_len: usize,
}

impl IntentSelector {
    /// Create a selector remembering up to `history_len` past moves.
    #[must_use]
    pub fn new(history_len: usize) -> Self {
        Self {
            state: IntentState::AwaitingIntent,
            current: None,
            cooldowns: FxHashMap::default(),
            history: Vector::new(),
            history_len,
        }
    }

    /// Check if a move may be selected right now.
    #[must_use]
    pub fn is_available(&self, mv: &OpponentMove, hp_percent: f64, turn: u32) -> bool {
        mv.hp_gate_allows(hp_percent)
            && self.cooldown(&mv.id) == 0
            && !(mv.no_first_turn && turn == 1)
    }

    /// Choose and record the next intent.
    ///
    /// Returns `None` only once the selector has halted.
    pub fn choose_next_move(
        &mut self,
        moves: &[OpponentMove],
        hp_percent: f64,
        turn: u32,
        rng: &mut GameRng,
    ) -> Option<&OpponentMove> {
        if self.state == IntentState::Halted {
            return None;
        }

        let mut candidates: Vec<&OpponentMove> = moves
            .iter()
            .filter(|mv| self.is_available(mv, hp_percent, turn))
            .collect();

        let fallback = OpponentMove::wait();
        if candidates.is_empty() {
            warn!(turn, hp_percent, "no selectable move; substituting wait");
            candidates.push(&fallback);
        }

        let weights: Vec<f64> = candidates.iter().map(|mv| mv.effective_weight()).collect();
        let index = rng
            .choose_weighted(&weights)
            .unwrap_or(candidates.len() - 1);
        let chosen = candidates[index].clone();

        debug!(move_id = %chosen.id, turn, "intent chosen");

        self.history.push_back(chosen.id.clone());
        while self.history.len() > self.history_len {
            self.history.pop_front();
        }
        self.state = IntentState::IntentChosen;
        self.current = Some(chosen);
        self.current.as_ref()
    }

    /// Take the current intent for execution.
    pub fn begin_execution(&mut self) -> Option<OpponentMove> {
        if self.state != IntentState::IntentChosen {
            return None;
        }
        let mv = self.current.take()?;
        self.state = IntentState::Executing;
        Some(mv)
    }

    /// Finish executing a move: start its cooldown and clear the intent.
    ///
    /// The counter is set to `cooldown + 1` because one tick happens before
    /// the next selection; a cooldown of N blocks the next N selections.
    pub fn finish_execution(&mut self, mv: &OpponentMove) {
        if mv.cooldown > 0 {
            self.cooldowns.insert(mv.id.clone(), mv.cooldown + 1);
        }
        self.current = None;
        if self.state != IntentState::Halted {
            self.state = IntentState::AwaitingIntent;
        }
    }

    /// Decrement every cooldown by one.
    pub fn tick_cooldowns(&mut self) {
        for turns in self.cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.cooldowns.retain(|_, turns| *turns > 0);
    }

    /// Remaining cooldown for a move id.
    #[must_use]
    pub fn cooldown(&self, move_id: &str) -> u32 {
        self.cooldowns.get(move_id).copied().unwrap_or(0)
    }

    pub fn clear_cooldowns(&mut self) {
        self.cooldowns.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Stop the cycle permanently.
    pub fn halt(&mut self) {
        self.state = IntentState::Halted;
        self.current = None;
    }

    #[must_use]
    pub fn state(&self) -> IntentState {
        self.state
    }

    /// The visible intent, if one is chosen.
    #[must_use]
    pub fn current(&self) -> Option<&OpponentMove> {
        self.current.as_ref()
    }

    /// Recently selected move ids, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<String> {
        &self.history
    }
}
