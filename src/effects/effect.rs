//! Effect definitions.
//!
//! Effects are declarative data. Cards, powers and modifiers carry an
//! `EffectPayload`; only the `EffectInterpreter` gives them meaning.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Element;
use crate::piles::Pile;
use crate::status::StatusDuration;

/// Who an effect lands on, relative to the (source, target) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    /// The source of the effect.
    #[serde(rename = "self")]
    SelfTarget,
    /// The chosen target.
    #[default]
    Target,
    /// Every living opponent.
    AllOpponents,
    /// One living opponent, chosen at random when the effect resolves.
    RandomOpponent,
}

fn one() -> u32 {
    1
}

/// An atomic combat effect.
///
/// ## Dispatch Order
///
/// Within one payload, effects resolve by kind in the order the variants
/// are declared here (damage first, powers last), keeping declaration
/// order among effects of the same kind. See [`Effect::dispatch_rank`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Deal damage through the damage pipeline, `hits` times.
    DealDamage {
        amount: i32,
        #[serde(default = "one")]
        hits: u32,
        #[serde(default)]
        target: EffectTarget,
    },

    /// Grant guard to the source.
    GainGuard { amount: i32 },

    /// Restore health to the source.
    Heal { amount: i32 },

    /// Apply a status. `element` turns `key` into a compound key
    /// such as `freeze_water`.
    ApplyStatus {
        key: String,
        amount: i32,
        duration: StatusDuration,
        #[serde(default)]
        target: EffectTarget,
        #[serde(default)]
        element: Option<Element>,
    },

    /// Draw cards (player only).
    DrawCards { count: u32 },

    /// Gain energy this turn (player only).
    GainEnergy { amount: i32 },

    /// Create new card instances in a pile.
    AddCard {
        card_id: String,
        pile: Pile,
        #[serde(default = "one")]
        count: u32,
    },

    /// Attach a persistent power to the player. `power_id` names the card
    /// definition whose power spec supplies the triggers.
    ApplyPower {
        power_id: String,
        stacks: i32,
        duration: StatusDuration,
    },
}

impl Effect {
    /// Position of this effect's kind in the fixed dispatch order.
    #[must_use]
    pub const fn dispatch_rank(&self) -> u8 {
        match self {
            Self::DealDamage { .. } => 0,
            Self::GainGuard { .. } => 1,
            Self::Heal { .. } => 2,
            Self::ApplyStatus { .. } => 3,
            Self::DrawCards { .. } => 4,
            Self::GainEnergy { .. } => 5,
            Self::AddCard { .. } => 6,
            Self::ApplyPower { .. } => 7,
        }
    }

    /// Single hit against the chosen target.
    pub fn damage(amount: i32) -> Self {
        Self::DealDamage {
            amount,
            hits: 1,
            target: EffectTarget::Target,
        }
    }

    /// Repeated hits against the chosen target.
    pub fn damage_hits(amount: i32, hits: u32) -> Self {
        Self::DealDamage {
            amount,
            hits,
            target: EffectTarget::Target,
        }
    }

    /// Single hit against every living opponent.
    pub fn damage_all(amount: i32) -> Self {
        Self::DealDamage {
            amount,
            hits: 1,
            target: EffectTarget::AllOpponents,
        }
    }

    pub fn guard(amount: i32) -> Self {
        Self::GainGuard { amount }
    }

    pub fn heal(amount: i32) -> Self {
        Self::Heal { amount }
    }

    pub fn draw(count: u32) -> Self {
        Self::DrawCards { count }
    }

    pub fn energy(amount: i32) -> Self {
        Self::GainEnergy { amount }
    }

    /// Apply a status to the chosen target.
    pub fn status(key: impl Into<String>, amount: i32, duration: StatusDuration) -> Self {
        Self::status_on(key, amount, duration, EffectTarget::Target)
    }

    /// Apply a status to an explicit recipient.
    pub fn status_on(
        key: impl Into<String>,
        amount: i32,
        duration: StatusDuration,
        target: EffectTarget,
    ) -> Self {
        Self::ApplyStatus {
            key: key.into(),
            amount,
            duration,
            target,
            element: None,
        }
    }

    pub fn add_card(card_id: impl Into<String>, pile: Pile, count: u32) -> Self {
        Self::AddCard {
            card_id: card_id.into(),
            pile,
            count,
        }
    }

    pub fn power(power_id: impl Into<String>, stacks: i32, duration: StatusDuration) -> Self {
        Self::ApplyPower {
            power_id: power_id.into(),
            stacks,
            duration,
        }
    }
}

/// An ordered collection of effects that resolve together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectPayload {
    effects: SmallVec<[Effect; 4]>,
}

impl EffectPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_effects(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self {
            effects: effects.into_iter().collect(),
        }
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Effects in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Effects in dispatch order (stable by kind rank).
    #[must_use]
    pub fn in_dispatch_order(&self) -> SmallVec<[&Effect; 4]> {
        let mut ordered: SmallVec<[&Effect; 4]> = self.effects.iter().collect();
        ordered.sort_by_key(|effect| effect.dispatch_rank());
        ordered
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }
}

impl FromIterator<Effect> for EffectPayload {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self::from_effects(iter)
    }
}
