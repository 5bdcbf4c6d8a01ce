//! Persistent powers.
//!
//! A power is attached to the player, keyed by the id of the card definition
//! that describes it. It is not applied once: the combat consults every
//! power at each trigger point and runs its payload once per stack.

use serde::{Deserialize, Serialize};

use crate::core::Element;
use crate::effects::EffectPayload;
use crate::status::StatusDuration;

/// A moment in the turn at which powers are consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerPoint {
    TurnStart,
    TurnEnd,
    CardPlayed(Element),
}

/// When a power fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerTrigger {
    /// At the start of each player turn.
    TurnStart,
    /// At the end of each player turn.
    TurnEnd,
    /// After each card play, optionally only for one element.
    CardPlayed {
        #[serde(default)]
        element: Option<Element>,
    },
}

impl PowerTrigger {
    /// Check if this trigger fires at `point`.
    #[must_use]
    pub fn fires_on(&self, point: TriggerPoint) -> bool {
        match (self, point) {
            (Self::TurnStart, TriggerPoint::TurnStart) => true,
            (Self::TurnEnd, TriggerPoint::TurnEnd) => true,
            (Self::CardPlayed { element }, TriggerPoint::CardPlayed(played)) => {
                element.map_or(true, |e| e == played)
            }
            _ => false,
        }
    }
}

/// Static description of a power, carried by a card definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerSpec {
    pub trigger: PowerTrigger,
    pub effect: EffectPayload,
}

impl PowerSpec {
    #[must_use]
    pub fn new(trigger: PowerTrigger, effect: EffectPayload) -> Self {
        Self { trigger, effect }
    }
}

/// A power attached to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    /// Card definition id that describes this power.
    pub source_card: String,
    pub stacks: i32,
    pub duration: StatusDuration,
}

/// The player's powers, in the order they were first applied.
#[derive(Clone, Debug, Default)]
pub struct PowerSet {
    powers: Vec<Power>,
}

impl PowerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add stacks of a power.
    ///
    /// Re-applying an existing power adds stacks and keeps the longer
    /// duration. Powers whose stacks drop to 0 or below are removed.
    pub fn apply(&mut self, source_card: &str, stacks: i32, duration: StatusDuration) {
        if stacks == 0 {
            return;
        }

        if let Some(pos) = self.powers.iter().position(|p| p.source_card == source_card) {
            let power = &mut self.powers[pos];
            power.stacks += stacks;
            power.duration = power.duration.max(duration);
            if power.stacks <= 0 {
                self.powers.remove(pos);
            }
        } else if stacks > 0 && duration.is_active() {
            self.powers.push(Power {
                source_card: source_card.to_string(),
                stacks,
                duration,
            });
        }
    }

    /// Stacks of a power (0 if absent).
    #[must_use]
    pub fn stacks(&self, source_card: &str) -> i32 {
        self.powers
            .iter()
            .find(|p| p.source_card == source_card)
            .map_or(0, |p| p.stacks)
    }

    /// Tick timed powers, removing those that expire. Returns expired ids.
    pub fn tick_durations(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        self.powers.retain_mut(|power| {
            if let StatusDuration::Turns(turns) = &mut power.duration {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(power.source_card.clone());
                    return false;
                }
            }
            true
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Power> {
        self.powers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_matching() {
        assert!(PowerTrigger::TurnStart.fires_on(TriggerPoint::TurnStart));
        assert!(!PowerTrigger::TurnStart.fires_on(TriggerPoint::TurnEnd));

        let any_card = PowerTrigger::CardPlayed { element: None };
        assert!(any_card.fires_on(TriggerPoint::CardPlayed(Element::Neutral)));

        let fire_only = PowerTrigger::CardPlayed {
            element: Some(Element::Fire),
        };
        assert!(fire_only.fires_on(TriggerPoint::CardPlayed(Element::Fire)));
        assert!(!fire_only.fires_on(TriggerPoint::CardPlayed(Element::Water)));
    }

    #[test]
    fn test_apply_stacks() {
        let mut powers = PowerSet::new();
        powers.apply("kindle", 1, StatusDuration::Turns(2));
        powers.apply("kindle", 2, StatusDuration::Indefinite);

        assert_eq!(powers.len(), 1);
        assert_eq!(powers.stacks("kindle"), 3);
        assert_eq!(
            powers.iter().next().unwrap().duration,
            StatusDuration::Indefinite
        );
    }

    #[test]
    fn test_apply_zero_or_negative_new_power() {
        let mut powers = PowerSet::new();
        powers.apply("kindle", 0, StatusDuration::Indefinite);
        powers.apply("kindle", -1, StatusDuration::Indefinite);
        powers.apply("kindle", 1, StatusDuration::Turns(0));
        assert!(powers.is_empty());
    }

    #[test]
    fn test_negative_stacks_remove() {
        let mut powers = PowerSet::new();
        powers.apply("kindle", 2, StatusDuration::Indefinite);
        powers.apply("kindle", -2, StatusDuration::Indefinite);
        assert!(powers.is_empty());
    }

    #[test]
    fn test_tick_durations() {
        let mut powers = PowerSet::new();
        powers.apply("brief", 1, StatusDuration::Turns(1));
        powers.apply("lasting", 1, StatusDuration::Indefinite);

        let expired = powers.tick_durations();
        assert_eq!(expired, vec!["brief".to_string()]);
        assert_eq!(powers.len(), 1);
        assert_eq!(powers.stacks("lasting"), 1);
    }
}
