//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its element,
//! cost, effect payloads and keywords. Per-instance data (upgraded, combat
//! modifiers) lives in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Element;
use crate::effects::EffectPayload;
use crate::powers::PowerSpec;

/// Broad card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

/// Keywords that change how a card leaves the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    /// Goes to the exhaust pile instead of discard when played.
    Exhaust,
    /// Exhausted if still in hand at the end of the turn.
    Ethereal,
    /// Stays in hand at the end of the turn.
    Retain,
}

/// Bonus payload gated on the player's momentum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MomentumBonus {
    /// Momentum required (>=) when the card resolves.
    pub threshold: i32,
    pub effect: EffectPayload,
}

/// Replacement data for an upgraded instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardUpgrade {
    /// Upgraded cost. `None` keeps the base cost.
    #[serde(default)]
    pub cost: Option<i32>,
    /// Upgraded primary payload. `None` keeps the base payload.
    #[serde(default)]
    pub effect: Option<EffectPayload>,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use resonance_combat::cards::{CardDefinition, CardType, Keyword};
/// use resonance_combat::core::Element;
/// use resonance_combat::effects::Effect;
///
/// let card = CardDefinition::new("ember", "Ember", CardType::Attack)
///     .with_element(Element::Fire)
///     .with_cost(1)
///     .with_effect(Effect::damage(6))
///     .with_keyword(Keyword::Exhaust);
///
/// assert_eq!(card.cost_for(false), Some(1));
/// assert!(card.has_keyword(Keyword::Exhaust));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: String,

    /// Card name (for display/debugging).
    pub name: String,

    pub card_type: CardType,

    #[serde(default)]
    pub element: Element,

    /// Energy cost. `None` means the card can never be played.
    pub cost: Option<i32>,

    /// Primary payload.
    #[serde(default)]
    pub effect: EffectPayload,

    #[serde(default)]
    pub momentum_bonus: Option<MomentumBonus>,

    /// Fires when the player has resonance in this card's element.
    #[serde(default)]
    pub resonance_bonus: Option<EffectPayload>,

    #[serde(default)]
    pub upgrade: Option<CardUpgrade>,

    #[serde(default)]
    pub keywords: SmallVec<[Keyword; 2]>,

    /// Persistent power granted when an `ApplyPower` effect names this card.
    #[serde(default)]
    pub power: Option<PowerSpec>,
}

impl CardDefinition {
    /// Create a new, unplayable definition with an empty payload.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_type,
            element: Element::Neutral,
            cost: None,
            effect: EffectPayload::default(),
            momentum_bonus: None,
            resonance_bonus: None,
            upgrade: None,
            keywords: SmallVec::new(),
            power: None,
        }
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Append an effect to the primary payload.
    #[must_use]
    pub fn with_effect(mut self, effect: crate::effects::Effect) -> Self {
        self.effect.push(effect);
        self
    }

    #[must_use]
    pub fn with_momentum_bonus(mut self, threshold: i32, effect: EffectPayload) -> Self {
        self.momentum_bonus = Some(MomentumBonus { threshold, effect });
        self
    }

    #[must_use]
    pub fn with_resonance_bonus(mut self, effect: EffectPayload) -> Self {
        self.resonance_bonus = Some(effect);
        self
    }

    #[must_use]
    pub fn with_upgrade(mut self, upgrade: CardUpgrade) -> Self {
        self.upgrade = Some(upgrade);
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: PowerSpec) -> Self {
        self.power = Some(power);
        self
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Cost for a base or upgraded instance.
    #[must_use]
    pub fn cost_for(&self, upgraded: bool) -> Option<i32> {
        let base = self.cost?;
        if upgraded {
            if let Some(cost) = self.upgrade.as_ref().and_then(|u| u.cost) {
                return Some(cost);
            }
        }
        Some(base)
    }

    /// Primary payload for a base or upgraded instance.
    #[must_use]
    pub fn effect_for(&self, upgraded: bool) -> &EffectPayload {
        if upgraded {
            if let Some(effect) = self.upgrade.as_ref().and_then(|u| u.effect.as_ref()) {
                return effect;
            }
        }
        &self.effect
    }
}
