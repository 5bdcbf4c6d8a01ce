//! Clamped hit points shared by both sides.

use serde::{Deserialize, Serialize};

/// Current and maximum health. `current` always stays in `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Create a health pool, clamping `current` into range.
    #[must_use]
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Full health pool.
    #[must_use]
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    #[must_use]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Remove up to `amount` health. Returns the health actually lost.
    pub fn lose(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Restore up to `amount` health. Returns the health actually restored.
    pub fn restore(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let restored = amount.min(self.max - self.current);
        self.current += restored;
        restored
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Current health as a fraction of maximum in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.max)
        }
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
