//! The card-playing side of a combat.

use std::sync::Arc;

use super::{Damageable, Health, StatusHolder};
use crate::momentum::MomentumTracker;
use crate::powers::PowerSet;
use crate::status::{StatusRules, StatusStore};

/// The player side of a combat.
#[derive(Clone, Debug)]
pub struct Player {
    pub health: Health,
    pub statuses: StatusStore,
    /// Energy available this turn.
    pub energy: i32,
    pub momentum: MomentumTracker,
    pub powers: PowerSet,
}

impl Player {
    #[must_use]
    pub fn new(health: Health, rules: Arc<StatusRules>, momentum: MomentumTracker) -> Self {
        Self {
            health,
            statuses: StatusStore::with_rules(rules),
            energy: 0,
            momentum,
            powers: PowerSet::new(),
        }
    }

    /// Spend energy if enough is available.
    pub fn spend_energy(&mut self, cost: i32) -> bool {
        if cost > self.energy {
            return false;
        }
        self.energy -= cost.max(0);
        true
    }
}

impl StatusHolder for Player {
    fn statuses(&self) -> &StatusStore {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusStore {
        &mut self.statuses
    }
}

impl Damageable for Player {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }
}
