//! Damage resolution.
//!
//! ## Order of Operations
//!
//! Each step feeds the next, flooring after every multiplication:
//!
//! 1. weakness multiplier if the element matches the target's weakness,
//!    otherwise resistance multiplier if it matches the target's resistance
//! 2. vulnerable multiplier if the target has a positive `vulnerable` status
//! 3. guard absorbs as much as it can
//! 4. the remainder comes off health, which stops at 0
//!
//! This is the only place health is reduced by damage.

use tracing::trace;

use crate::combatant::Damageable;
use crate::core::{DamageMultipliers, Element};
use crate::status::keys;

/// What a single resolved hit did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Amount after multipliers, before guard.
    pub effective: i32,
    pub guard_absorbed: i32,
    pub hp_loss: i32,
    pub was_weakness_hit: bool,
    pub was_resistance_hit: bool,
}

impl DamageOutcome {
    /// Check if the hit changed anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.guard_absorbed == 0 && self.hp_loss == 0
    }
}

fn scale(amount: i32, multiplier: f64) -> i32 {
    (f64::from(amount) * multiplier).floor() as i32
}

/// Amount after elemental and vulnerable multipliers, with the matchup flags.
#[must_use]
pub fn effective_amount<T: Damageable + ?Sized>(
    raw: i32,
    element: Element,
    target: &T,
    multipliers: &DamageMultipliers,
) -> (i32, bool, bool) {
    if raw <= 0 {
        return (0, false, false);
    }

    let mut amount = raw;
    let mut weakness_hit = false;
    let mut resistance_hit = false;

    if target.weakness() == Some(element) {
        amount = scale(amount, multipliers.weakness);
        weakness_hit = true;
    } else if target.resistance() == Some(element) {
        amount = scale(amount, multipliers.resistance);
        resistance_hit = true;
    }

    if target.statuses().has_positive(keys::VULNERABLE) {
        amount = scale(amount, multipliers.vulnerable);
    }

    (amount.max(0), weakness_hit, resistance_hit)
}

/// Resolve one hit of `raw` damage of `element` against `target`.
///
/// A raw amount of 0 or less leaves the target untouched.
pub fn resolve<T: Damageable + ?Sized>(
    raw: i32,
    element: Element,
    target: &mut T,
    multipliers: &DamageMultipliers,
) -> DamageOutcome {
    if raw <= 0 {
        return DamageOutcome::default();
    }

    let (effective, was_weakness_hit, was_resistance_hit) =
        effective_amount(raw, element, target, multipliers);

    let guard_absorbed = target.statuses_mut().absorb_with_guard(effective);
    let hp_loss = target.health_mut().lose(effective - guard_absorbed);

    trace!(
        raw,
        %element,
        effective,
        guard_absorbed,
        hp_loss,
        was_weakness_hit,
        was_resistance_hit,
        "damage resolved"
    );

    DamageOutcome {
        effective,
        guard_absorbed,
        hp_loss,
        was_weakness_hit,
        was_resistance_hit,
    }
}
