//! Momentum and resonance tracking.
//!
//! ## Momentum
//!
//! Consecutive plays of the same element build momentum. A neutral card
//! leaves the streak untouched; a different element restarts it.
//!
//! ## Resonance
//!
//! Each element has its own resonance counter, raised whenever a card of
//! that element exploits an opponent's weakness and decayed at the end of
//! every player turn (never below 0).
//!
//! Both counters are mutated only through the tracker's methods; everything
//! else reads them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Element;

/// External boost to per-play momentum gain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomentumModifier {
    /// Element the bonus applies to. `None` applies to every element.
    #[serde(default)]
    pub element: Option<Element>,
    pub bonus: i32,
}

impl MomentumModifier {
    #[must_use]
    pub const fn any(bonus: i32) -> Self {
        Self { element: None, bonus }
    }

    #[must_use]
    pub const fn for_element(element: Element, bonus: i32) -> Self {
        Self {
            element: Some(element),
            bonus,
        }
    }

    #[must_use]
    pub fn applies_to(&self, element: Element) -> bool {
        self.element.map_or(true, |e| e == element)
    }
}

/// Momentum streak and per-element resonance for the player.
///
/// ```
/// use resonance_combat::core::Element;
/// use resonance_combat::momentum::MomentumTracker;
///
/// let mut tracker = MomentumTracker::new(1, 1);
/// tracker.on_card_played(Element::Fire);
/// tracker.on_card_played(Element::Fire);
/// assert_eq!(tracker.momentum(), 2);
///
/// tracker.on_card_played(Element::Water);
/// assert_eq!(tracker.momentum(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MomentumTracker {
    momentum: i32,
    last_element: Element,
    resonance: FxHashMap<Element, i32>,
    base_gain: i32,
    decay: i32,
    modifiers: Vec<MomentumModifier>,
}

impl MomentumTracker {
    /// Create a tracker with a per-play gain and per-turn resonance decay.
    #[must_use]
    pub fn new(base_gain: i32, decay: i32) -> Self {
        Self {
            momentum: 0,
            last_element: Element::Neutral,
            resonance: FxHashMap::default(),
            base_gain,
            decay,
            modifiers: Vec::new(),
        }
    }

    /// Attach external gain modifiers (builder pattern).
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = MomentumModifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    /// Momentum gained by one play of `element`.
    #[must_use]
    pub fn gain_for(&self, element: Element) -> i32 {
        let bonus: i32 = self
            .modifiers
            .iter()
            .filter(|m| m.applies_to(element))
            .map(|m| m.bonus)
            .sum();
        self.base_gain + bonus
    }

    /// Update the streak for a played card. Returns the new momentum.
    pub fn on_card_played(&mut self, element: Element) -> i32 {
        if element.is_neutral() {
            return self.momentum;
        }

        let gain = self.gain_for(element);
        if element == self.last_element {
            self.momentum += gain;
        } else {
            self.momentum = gain;
            self.last_element = element;
        }
        self.momentum
    }

    /// Raise an element's resonance after a weakness hit.
    pub fn on_weakness_hit(&mut self, element: Element, amount: i32) {
        if element.is_neutral() || amount <= 0 {
            return;
        }
        *self.resonance.entry(element).or_insert(0) += amount;
    }

    /// Reset the streak and decay every resonance counter.
    pub fn end_of_player_turn(&mut self) {
        self.momentum = 0;
        self.last_element = Element::Neutral;

        let decay = self.decay;
        for value in self.resonance.values_mut() {
            *value = (*value - decay).max(0);
        }
        self.resonance.retain(|_, value| *value > 0);
    }

    #[must_use]
    pub fn momentum(&self) -> i32 {
        self.momentum
    }

    #[must_use]
    pub fn last_element(&self) -> Element {
        self.last_element
    }

    /// Resonance for one element (0 if never built).
    #[must_use]
    pub fn resonance(&self, element: Element) -> i32 {
        self.resonance.get(&element).copied().unwrap_or(0)
    }

    /// Non-zero resonance counters in element order.
    #[must_use]
    pub fn resonance_levels(&self) -> Vec<(Element, i32)> {
        Element::ALL
            .iter()
            .map(|&element| (element, self.resonance(element)))
            .filter(|&(_, value)| value > 0)
            .collect()
    }
}

impl Default for MomentumTracker {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
