//! Elemental affinities.
//!
//! Cards, opponent moves, weaknesses and resistances all carry an `Element`.
//! `Neutral` never matches a weakness or resistance and never affects
//! momentum.

use serde::{Deserialize, Serialize};

/// Elemental affinity of a card, move, or combatant trait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Air,
    Lightning,
    Shadow,
}

impl Element {
    /// Every non-neutral element.
    pub const ALL: [Element; 6] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Lightning,
        Element::Shadow,
    ];

    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Lowercase name, used as the qualifier in compound status keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Lightning => "lightning",
            Self::Shadow => "shadow",
        }
    }

    /// Build a compound status key such as `freeze_water`.
    #[must_use]
    pub fn qualify(self, base_key: &str) -> String {
        format!("{base_key}_{}", self.as_str())
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
