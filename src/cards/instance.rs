//! Card instances - runtime card state.
//!
//! `CardInstance` is one specific copy of a card definition. It lives in
//! exactly one pile at a time and keeps its `InstanceId` while moving.
//!
//! ## Combat Modifiers
//!
//! Effects may adjust an instance for the rest of the combat (cheaper cost,
//! retain). `clear_combat_modifiers` wipes them when the combat ends.

use serde::{Deserialize, Serialize};

use crate::core::InstanceId;

/// Single-combat adjustments to one instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatModifiers {
    /// Added to the definition's cost (result floored at 0).
    pub cost_delta: i32,
    /// Keep in hand at end of turn regardless of keywords.
    pub retain: bool,
}

impl CombatModifiers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A card instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this instance.
    pub id: InstanceId,

    /// Reference to the card definition.
    pub card_id: String,

    pub upgraded: bool,

    #[serde(default)]
    pub modifiers: CombatModifiers,

    /// Created by an effect during the current combat rather than
    /// brought in from the deck.
    #[serde(default)]
    pub created_in_combat: bool,
}

impl CardInstance {
    /// Create a deck instance.
    #[must_use]
    pub fn new(id: InstanceId, card_id: impl Into<String>) -> Self {
        Self {
            id,
            card_id: card_id.into(),
            upgraded: false,
            modifiers: CombatModifiers::default(),
            created_in_combat: false,
        }
    }

    /// Create an upgraded deck instance.
    #[must_use]
    pub fn upgraded(id: InstanceId, card_id: impl Into<String>) -> Self {
        Self {
            upgraded: true,
            ..Self::new(id, card_id)
        }
    }

    /// Create an instance generated mid-combat.
    #[must_use]
    pub fn generated(id: InstanceId, card_id: impl Into<String>) -> Self {
        Self {
            created_in_combat: true,
            ..Self::new(id, card_id)
        }
    }

    /// Apply a cost adjustment for this combat.
    pub fn adjust_cost(&mut self, delta: i32) {
        self.modifiers.cost_delta += delta;
    }

    /// Effective cost given the definition's cost.
    ///
    /// Negative results are treated as 0.
    #[must_use]
    pub fn effective_cost(&self, base: Option<i32>) -> Option<i32> {
        base.map(|cost| (cost + self.modifiers.cost_delta).max(0))
    }

    /// Clear every single-combat modifier.
    pub fn clear_combat_modifiers(&mut self) {
        self.modifiers = CombatModifiers::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_instance() {
        let instance = CardInstance::new(InstanceId(10), "strike");
        assert_eq!(instance.id, InstanceId(10));
        assert_eq!(instance.card_id, "strike");
        assert!(!instance.upgraded);
        assert!(!instance.created_in_combat);
        assert!(instance.modifiers.is_empty());
    }

    #[test]
    fn test_upgraded_and_generated() {
        assert!(CardInstance::upgraded(InstanceId(1), "strike").upgraded);
        assert!(CardInstance::generated(InstanceId(2), "wound").created_in_combat);
    }

    #[test]
    fn test_effective_cost() {
        let mut instance = CardInstance::new(InstanceId(1), "strike");
        assert_eq!(instance.effective_cost(Some(2)), Some(2));

        instance.adjust_cost(-1);
        assert_eq!(instance.effective_cost(Some(2)), Some(1));

        instance.adjust_cost(-5);
        assert_eq!(instance.effective_cost(Some(2)), Some(0));

        assert_eq!(instance.effective_cost(None), None);
    }

    #[test]
    fn test_negative_base_cost_floors_to_zero() {
        let instance = CardInstance::new(InstanceId(1), "glitch");
        assert_eq!(instance.effective_cost(Some(-3)), Some(0));
    }

    #[test]
    fn test_clear_combat_modifiers() {
        let mut instance = CardInstance::new(InstanceId(1), "strike");
        instance.adjust_cost(-1);
        instance.modifiers.retain = true;

        instance.clear_combat_modifiers();
        assert!(instance.modifiers.is_empty());
    }

    #[test]
    fn test_serialization() {
        let mut instance = CardInstance::upgraded(InstanceId(7), "ember");
        instance.adjust_cost(1);

        let json = serde_json::to_string(&instance).unwrap();
        let deserialized: CardInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(instance, deserialized);
    }
}
