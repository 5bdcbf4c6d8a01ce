//! Per-combatant status storage.
//!
//! A `StatusStore` maps status keys to either a bare accumulating number or
//! an `(amount, duration)` pair. The key's `StatusKind` (from `StatusRules`)
//! decides which shape is used.
//!
//! ## Invariants
//!
//! - A status with amount <= 0 is absent, except guard, which floors at 0
//!   and keeps its key once created.
//! - `tick_durations` is the only operation that shortens a duration.
//! - A timed entry whose duration reached 0 reads as 0 even before removal.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::keys;
use super::rules::{StackPolicy, StatusKind, StatusRules};

/// Remaining lifetime of a timed status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDuration {
    /// Number of the holder's turn boundaries left.
    Turns(u32),
    /// Never ticks down.
    Indefinite,
}

impl StatusDuration {
    /// Check if this duration still keeps a status alive.
    #[must_use]
    pub const fn is_active(self) -> bool {
        match self {
            Self::Turns(turns) => turns > 0,
            Self::Indefinite => true,
        }
    }

    /// The longer of two durations.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        match (self, other) {
            (Self::Indefinite, _) | (_, Self::Indefinite) => Self::Indefinite,
            (Self::Turns(a), Self::Turns(b)) => Self::Turns(a.max(b)),
        }
    }
}

/// Stored value of one status key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusValue {
    /// Accumulating number without a duration.
    Stack(i32),
    /// Amount that expires when its duration runs out.
    Timed { amount: i32, duration: StatusDuration },
}

impl StatusValue {
    /// The amount this value contributes to `get`.
    #[must_use]
    pub fn amount(&self) -> i32 {
        match *self {
            Self::Stack(amount) => amount,
            Self::Timed { amount, duration } if duration.is_active() => amount,
            Self::Timed { .. } => 0,
        }
    }
}

/// Status storage owned by exactly one combatant.
///
/// ```
/// use resonance_combat::status::{StatusStore, StatusDuration};
///
/// let mut store = StatusStore::new();
/// store.apply("strength", 2, StatusDuration::Indefinite);
/// store.apply("strength", 1, StatusDuration::Indefinite);
/// store.apply("vulnerable", 1, StatusDuration::Turns(2));
///
/// assert_eq!(store.get("strength"), 3);
/// assert!(store.has_positive("vulnerable"));
///
/// store.tick_durations();
/// store.tick_durations();
/// assert_eq!(store.get("vulnerable"), 0);
/// ```
#[derive(Clone, Debug)]
pub struct StatusStore {
    entries: FxHashMap<String, StatusValue>,
    rules: Arc<StatusRules>,
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusStore {
    /// Create an empty store using the built-in status rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(Arc::new(StatusRules::default()))
    }

    /// Create an empty store sharing a combat's status rules.
    #[must_use]
    pub fn with_rules(rules: Arc<StatusRules>) -> Self {
        Self {
            entries: FxHashMap::default(),
            rules,
        }
    }

    /// Apply a status.
    ///
    /// Stackable keys add `amount` to their running total and ignore
    /// `duration`. Timed keys follow their `StackPolicy` when `amount > 0`.
    /// A non-positive amount with an exhausted duration removes a timed key.
    pub fn apply(&mut self, key: &str, amount: i32, duration: StatusDuration) {
        match self.rules.kind_of(key) {
            StatusKind::Stackable | StatusKind::TurnScoped => self.add_stack(key, amount),
            StatusKind::Timed(policy) => self.apply_timed(key, amount, duration, policy),
        }
    }

    fn add_stack(&mut self, key: &str, amount: i32) {
        if amount == 0 {
            return;
        }

        let current = self.entries.get(key).map_or(0, StatusValue::amount);
        let total = current.saturating_add(amount);

        if key == keys::GUARD {
            if self.entries.contains_key(key) || total > 0 {
                self.entries.insert(key.to_string(), StatusValue::Stack(total.max(0)));
            }
        } else if total > 0 {
            self.entries.insert(key.to_string(), StatusValue::Stack(total));
        } else {
            self.entries.remove(key);
        }
    }

    fn apply_timed(&mut self, key: &str, amount: i32, duration: StatusDuration, policy: StackPolicy) {
        if amount <= 0 {
            if !duration.is_active() {
                self.entries.remove(key);
            } else if amount < 0 {
                self.reduce_timed(key, -amount);
            }
            return;
        }
        // Replacing with a depleted pair leaves nothing readable.
        if !duration.is_active() {
            self.entries.remove(key);
            return;
        }

        let value = match (policy, self.entries.get(key)) {
            (
                StackPolicy::Additive,
                Some(&StatusValue::Timed {
                    amount: existing,
                    duration: existing_duration,
                }),
            ) if existing_duration.is_active() => StatusValue::Timed {
                amount: existing.saturating_add(amount),
                duration: existing_duration.max(duration),
            },
            _ => StatusValue::Timed { amount, duration },
        };
        self.entries.insert(key.to_string(), value);
    }

    fn reduce_timed(&mut self, key: &str, by: i32) {
        if let Some(StatusValue::Timed { amount, .. }) = self.entries.get_mut(key) {
            *amount -= by;
            if *amount <= 0 {
                self.entries.remove(key);
            }
        }
    }

    /// Current amount of a status; 0 when absent or expired.
    #[must_use]
    pub fn get(&self, key: &str) -> i32 {
        self.entries.get(key).map_or(0, StatusValue::amount)
    }

    /// Check if a status currently has a positive amount.
    #[must_use]
    pub fn has_positive(&self, key: &str) -> bool {
        self.get(key) > 0
    }

    /// Check if a key is stored at all (guard may be stored at 0).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw stored value for a key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&StatusValue> {
        self.entries.get(key)
    }

    /// Remaining duration of a timed status.
    #[must_use]
    pub fn duration(&self, key: &str) -> Option<StatusDuration> {
        match self.entries.get(key) {
            Some(StatusValue::Timed { duration, .. }) => Some(*duration),
            _ => None,
        }
    }

    /// Decrement every timed duration by one, removing entries that expire.
    ///
    /// Call exactly once per turn boundary of the owning combatant.
    /// Returns the keys that expired.
    pub fn tick_durations(&mut self) -> Vec<String> {
        let mut expired = Vec::new();

        for (key, value) in self.entries.iter_mut() {
            if let StatusValue::Timed {
                duration: StatusDuration::Turns(turns),
                ..
            } = value
            {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(key.clone());
                }
            }
        }

        for key in &expired {
            self.entries.remove(key);
        }
        expired.sort();
        expired
    }

    /// Guard currently available.
    #[must_use]
    pub fn guard(&self) -> i32 {
        self.get(keys::GUARD)
    }

    /// Consume guard against an incoming amount.
    ///
    /// Returns the amount absorbed; guard never goes below 0.
    pub fn absorb_with_guard(&mut self, incoming: i32) -> i32 {
        let available = self.guard();
        let absorbed = incoming.clamp(0, available);
        if absorbed > 0 {
            self.entries
                .insert(keys::GUARD.to_string(), StatusValue::Stack(available - absorbed));
        }
        absorbed
    }

    /// Set guard back to 0, keeping the key if present.
    pub fn reset_guard(&mut self) {
        if let Some(value) = self.entries.get_mut(keys::GUARD) {
            *value = StatusValue::Stack(0);
        }
    }

    /// Remove every turn-scoped status.
    pub fn clear_turn_scoped(&mut self) {
        let rules = Arc::clone(&self.rules);
        self.entries
            .retain(|key, _| rules.kind_of(key) != StatusKind::TurnScoped);
    }

    /// Remove a status entirely.
    pub fn remove(&mut self, key: &str) -> Option<StatusValue> {
        self.entries.remove(key)
    }

    /// Iterate over entries sorted by key, for deterministic output.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&str, StatusValue)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, value)| (key.as_str(), *value))
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The rules this store resolves kinds with.
    #[must_use]
    pub fn rules(&self) -> &StatusRules {
        &self.rules
    }
}
