//! Combat configuration.
//!
//! The engine never hardcodes balance numbers. Games supply a
//! `CombatConfig` at combat start, either built in code or parsed from TOML:
//!
//! ```
//! use resonance_combat::core::CombatConfig;
//!
//! let config = CombatConfig::from_toml_str(r#"
//!     base_energy = 4
//!     hand_size = 6
//!     weakness_multiplier = 2.0
//! "#).unwrap();
//!
//! assert_eq!(config.base_energy, 4);
//! assert_eq!(config.hand_size, 6);
//! // Unspecified fields keep their defaults
//! assert_eq!(config.vulnerable_multiplier, 1.5);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::status::StatusRules;

/// Multipliers consumed by the damage pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageMultipliers {
    /// Applied when the source element matches the target's weakness (> 1).
    pub weakness: f64,
    /// Applied when the source element matches the target's resistance (< 1).
    pub resistance: f64,
    /// Applied when the target carries the vulnerable status (> 1).
    pub vulnerable: f64,
}

impl Default for DamageMultipliers {
    fn default() -> Self {
        Self {
            weakness: 1.5,
            resistance: 0.5,
            vulnerable: 1.5,
        }
    }
}

/// Complete combat configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Damage multiplier for hitting an elemental weakness.
    pub weakness_multiplier: f64,

    /// Damage multiplier for hitting an elemental resistance.
    pub resistance_multiplier: f64,

    /// Damage multiplier against a vulnerable target.
    pub vulnerable_multiplier: f64,

    /// Energy granted at the start of each player turn, before modifiers.
    pub base_energy: i32,

    /// Cards drawn at the start of each player turn.
    pub hand_size: usize,

    /// Cards drawn beyond this limit go straight to the discard pile.
    pub max_hand_size: usize,

    /// Cap on card plays per player turn. `None` for unlimited.
    pub max_plays_per_turn: Option<u32>,

    /// Momentum gained per same-element play, before modifiers.
    pub momentum_gain: i32,

    /// Resonance gained each time a card exploits a weakness.
    pub resonance_gain: i32,

    /// Resonance lost by every element at the end of each player turn.
    pub resonance_decay: i32,

    /// Number of past move ids each opponent remembers.
    pub intent_history_len: usize,

    /// Seed for the combat's deterministic RNG.
    pub seed: u64,

    /// Stacking policy per status key.
    pub status_rules: StatusRules,
}

impl Default for CombatConfig {
    fn default() -> Self {
        let multipliers = DamageMultipliers::default();
        Self {
            weakness_multiplier: multipliers.weakness,
            resistance_multiplier: multipliers.resistance,
            vulnerable_multiplier: multipliers.vulnerable,
            base_energy: 3,
            hand_size: 5,
            max_hand_size: 10,
            max_plays_per_turn: None,
            momentum_gain: 1,
            resonance_gain: 1,
            resonance_decay: 1,
            intent_history_len: 8,
            seed: 0,
            status_rules: StatusRules::default(),
        }
    }
}

impl CombatConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the per-turn play cap.
    #[must_use]
    pub fn with_play_limit(mut self, limit: u32) -> Self {
        self.max_plays_per_turn = Some(limit);
        self
    }

    /// Set the number of cards drawn each turn.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Multipliers for the damage pipeline.
    #[must_use]
    pub fn multipliers(&self) -> DamageMultipliers {
        DamageMultipliers {
            weakness: self.weakness_multiplier,
            resistance: self.resistance_multiplier,
            vulnerable: self.vulnerable_multiplier,
        }
    }

    /// Check the multiplier orderings and sizes the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weakness_multiplier <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "weakness_multiplier must exceed 1.0, got {}",
                self.weakness_multiplier
            )));
        }
        if !(0.0..1.0).contains(&self.resistance_multiplier) {
            return Err(ConfigError::Invalid(format!(
                "resistance_multiplier must be in [0, 1), got {}",
                self.resistance_multiplier
            )));
        }
        if self.vulnerable_multiplier <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "vulnerable_multiplier must exceed 1.0, got {}",
                self.vulnerable_multiplier
            )));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::Invalid("hand_size must be positive".to_string()));
        }
        if self.max_hand_size < self.hand_size {
            return Err(ConfigError::Invalid(format!(
                "max_hand_size {} is below hand_size {}",
                self.max_hand_size, self.hand_size
            )));
        }
        Ok(())
    }
}
