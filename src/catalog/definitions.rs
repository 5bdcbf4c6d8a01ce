//! Opponent and modifier-source definitions.

use serde::{Deserialize, Serialize};

use super::registry::CatalogEntry;
use crate::cards::CardDefinition;
use crate::core::Element;
use crate::effects::EffectPayload;
use crate::intent::{OpponentMove, PhaseSchedule};
use crate::momentum::MomentumModifier;

impl CatalogEntry for CardDefinition {
    const KIND: &'static str = "card";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Static description of an opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentDefinition {
    pub id: String,
    pub name: String,
    pub max_health: i32,
    #[serde(default)]
    pub weakness: Option<Element>,
    #[serde(default)]
    pub resistance: Option<Element>,
    #[serde(default)]
    pub moves: Vec<OpponentMove>,
    #[serde(default)]
    pub phases: Option<PhaseSchedule>,
    /// Clear guard at this opponent's own turn start. Guard persists otherwise.
    #[serde(default)]
    pub resets_guard: bool,
}

impl OpponentDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_health: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_health,
            weakness: None,
            resistance: None,
            moves: Vec::new(),
            phases: None,
            resets_guard: false,
        }
    }

    #[must_use]
    pub fn with_weakness(mut self, element: Element) -> Self {
        self.weakness = Some(element);
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, element: Element) -> Self {
        self.resistance = Some(element);
        self
    }

    #[must_use]
    pub fn with_move(mut self, mv: OpponentMove) -> Self {
        self.moves.push(mv);
        self
    }

    #[must_use]
    pub fn with_phases(mut self, phases: PhaseSchedule) -> Self {
        self.phases = Some(phases);
        self
    }

    #[must_use]
    pub fn resetting_guard(mut self) -> Self {
        self.resets_guard = true;
        self
    }
}

impl CatalogEntry for OpponentDefinition {
    const KIND: &'static str = "opponent";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A run-long bonus source active for the whole combat.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    pub id: String,
    pub name: String,
    /// Extra energy at every player turn start.
    #[serde(default)]
    pub energy_bonus: i32,
    #[serde(default)]
    pub momentum_modifiers: Vec<MomentumModifier>,
    /// Also keep non-retained cards in hand at turn end.
    #[serde(default)]
    pub retain_hand: bool,
    #[serde(default)]
    pub on_combat_start: EffectPayload,
    #[serde(default)]
    pub on_turn_start: EffectPayload,
}

impl ModifierDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_energy_bonus(mut self, bonus: i32) -> Self {
        self.energy_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_momentum_modifier(mut self, modifier: MomentumModifier) -> Self {
        self.momentum_modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn retaining_hand(mut self) -> Self {
        self.retain_hand = true;
        self
    }

    #[must_use]
    pub fn on_combat_start(mut self, payload: EffectPayload) -> Self {
        self.on_combat_start = payload;
        self
    }

    #[must_use]
    pub fn on_turn_start(mut self, payload: EffectPayload) -> Self {
        self.on_turn_start = payload;
        self
    }
}

impl CatalogEntry for ModifierDefinition {
    const KIND: &'static str = "modifier";

    fn id(&self) -> &str {
        &self.id
    }
}
