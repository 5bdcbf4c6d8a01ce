//! Status kinds and their stacking policies.
//!
//! Every status key resolves to a `StatusKind`:
//! - `Stackable`: a bare accumulating number (guard, strength)
//! - `TurnScoped`: stackable, cleared at the start of the holder's turn
//! - `Timed(policy)`: an `(amount, duration)` pair that ticks down
//!
//! Compound keys such as `freeze_water` inherit the kind of their base key
//! unless an override names the compound key itself.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::keys;
use crate::core::Element;

/// How a timed status reacts to being re-applied while active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPolicy {
    /// The new `(amount, duration)` pair overwrites the old one.
    #[default]
    Replace,
    /// Amounts add together; the longer duration is kept.
    Additive,
}

/// Storage shape and lifecycle of a status key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Stackable,
    TurnScoped,
    Timed(StackPolicy),
}

impl StatusKind {
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Timed(_))
    }
}

/// Status policy table.
///
/// Built-in keys have fixed defaults; `overrides` lets game data change the
/// kind of any key, including built-ins. Unknown keys are timed with
/// replace semantics.
///
/// ```
/// use resonance_combat::status::{StatusRules, StatusKind, StackPolicy};
///
/// let rules = StatusRules::default()
///     .with_override("vulnerable", StatusKind::Timed(StackPolicy::Additive));
///
/// assert_eq!(rules.kind_of("strength"), StatusKind::Stackable);
/// assert_eq!(rules.kind_of("vulnerable"), StatusKind::Timed(StackPolicy::Additive));
/// assert_eq!(rules.kind_of("freeze_water"), StatusKind::Timed(StackPolicy::Replace));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusRules {
    pub overrides: FxHashMap<String, StatusKind>,
}

impl StatusRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the kind of a key (builder pattern).
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, kind: StatusKind) -> Self {
        self.overrides.insert(key.into(), kind);
        self
    }

    /// Resolve the kind of a status key.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> StatusKind {
        if let Some(kind) = self.overrides.get(key) {
            return *kind;
        }
        if let Some(base) = base_key(key) {
            if let Some(kind) = self.overrides.get(base) {
                return *kind;
            }
            return builtin_kind(base);
        }
        builtin_kind(key)
    }
}

/// Strip an element qualifier: `freeze_water` -> `freeze`.
#[must_use]
pub fn base_key(key: &str) -> Option<&str> {
    let (base, suffix) = key.rsplit_once('_')?;
    Element::ALL
        .iter()
        .any(|element| element.as_str() == suffix)
        .then_some(base)
}

fn builtin_kind(key: &str) -> StatusKind {
    match key {
        keys::GUARD | keys::STRENGTH => StatusKind::Stackable,
        keys::CARDS_PLAYED => StatusKind::TurnScoped,
        _ => StatusKind::Timed(StackPolicy::Replace),
    }
}
