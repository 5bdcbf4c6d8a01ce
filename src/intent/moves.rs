//! Opponent move data.
//!
//! An `OpponentMove` is one candidate action in an opponent's move set.
//! The selected move becomes the opponent's visible intent for the next
//! opponent turn.

use serde::{Deserialize, Serialize};

use crate::core::Element;
use crate::piles::Pile;
use crate::status::StatusDuration;

/// Id of the fallback move used when no candidate survives filtering.
pub const WAIT_MOVE_ID: &str = "wait";

/// Public category of an intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    #[default]
    Attack,
    Defend,
    Debuff,
    Buff,
    Dilemma,
    Special,
}

/// Recipient of a move's status application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    /// The opponent using the move.
    #[serde(rename = "self")]
    SelfTarget,
    #[default]
    Player,
}

/// A status applied by a move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveStatus {
    pub key: String,
    pub amount: i32,
    pub duration: StatusDuration,
    #[serde(default)]
    pub target: MoveTarget,
    /// Qualifies `key` into a compound key such as `freeze_water`.
    #[serde(default)]
    pub element: Option<Element>,
}

impl MoveStatus {
    /// The key actually written to the status store.
    #[must_use]
    pub fn resolved_key(&self) -> String {
        match self.element {
            Some(element) => element.qualify(&self.key),
            None => self.key.clone(),
        }
    }
}

/// Conditional extra damage for a move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageBonus {
    /// Added while the user's HP% is strictly below `percent`.
    BelowHpPercent { percent: f64, bonus: i32 },
}

impl DamageBonus {
    /// Bonus contributed at the given HP percentage.
    #[must_use]
    pub fn amount_at(&self, hp_percent: f64) -> i32 {
        match *self {
            Self::BelowHpPercent { percent, bonus } if hp_percent < percent => bonus,
            Self::BelowHpPercent { .. } => 0,
        }
    }
}

/// Cards a move shuffles into one of the player's piles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardGrant {
    pub card_id: String,
    pub pile: Pile,
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

/// One candidate action from an opponent's move set.
///
/// ## HP Gating
///
/// Thresholds are percentages of maximum health (0-100):
/// - `min_hp_threshold`: usable only while HP% is strictly below it
///   (a move gated at 50 is a desperation move)
/// - `max_hp_threshold`: usable only while HP% is at or above it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentMove {
    pub id: String,
    pub name: String,
    pub kind: IntentKind,

    /// Base damage per hit. `None` for moves that do not attack.
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default = "one")]
    pub hits: u32,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub damage_bonuses: Vec<DamageBonus>,

    /// Guard granted to the user.
    #[serde(default)]
    pub guard: Option<i32>,

    #[serde(default)]
    pub statuses: Vec<MoveStatus>,

    #[serde(default)]
    pub add_cards: Vec<CardGrant>,

    /// Selection weight; 1 when absent.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub min_hp_threshold: Option<f64>,
    #[serde(default)]
    pub max_hp_threshold: Option<f64>,

    /// Turns the move stays unavailable after use.
    #[serde(default)]
    pub cooldown: u32,

    /// Not selectable on the first turn of combat.
    #[serde(default)]
    pub no_first_turn: bool,
}

impl OpponentMove {
    /// Create a move with no effects.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: IntentKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            damage: None,
            hits: 1,
            element: Element::Neutral,
            damage_bonuses: Vec::new(),
            guard: None,
            statuses: Vec::new(),
            add_cards: Vec::new(),
            weight: None,
            min_hp_threshold: None,
            max_hp_threshold: None,
            cooldown: 0,
            no_first_turn: false,
        }
    }

    /// Single-hit attack.
    #[must_use]
    pub fn attack(id: impl Into<String>, damage: i32) -> Self {
        let id = id.into();
        let mut mv = Self::new(id.clone(), id, IntentKind::Attack);
        mv.damage = Some(damage);
        mv
    }

    /// Guard-only move.
    #[must_use]
    pub fn defend(id: impl Into<String>, guard: i32) -> Self {
        let id = id.into();
        let mut mv = Self::new(id.clone(), id, IntentKind::Defend);
        mv.guard = Some(guard);
        mv
    }

    /// The fallback move substituted when nothing else is selectable.
    #[must_use]
    pub fn wait() -> Self {
        let mut mv = Self::new(WAIT_MOVE_ID, "Wait", IntentKind::Special);
        mv.weight = Some(1.0);
        mv
    }

    #[must_use]
    pub fn with_hits(mut self, hits: u32) -> Self {
        self.hits = hits;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: i32) -> Self {
        self.guard = Some(guard);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: MoveStatus) -> Self {
        self.statuses.push(status);
        self
    }

    #[must_use]
    pub fn with_damage_bonus(mut self, bonus: DamageBonus) -> Self {
        self.damage_bonuses.push(bonus);
        self
    }

    #[must_use]
    pub fn with_card_grant(mut self, grant: CardGrant) -> Self {
        self.add_cards.push(grant);
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_min_hp(mut self, percent: f64) -> Self {
        self.min_hp_threshold = Some(percent);
        self
    }

    #[must_use]
    pub fn with_max_hp(mut self, percent: f64) -> Self {
        self.max_hp_threshold = Some(percent);
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    #[must_use]
    pub fn not_on_first_turn(mut self) -> Self {
        self.no_first_turn = true;
        self
    }

    /// Selection weight, defaulting to 1. Negative weights count as 0.
    #[must_use]
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0).max(0.0)
    }

    /// Check the HP gates against the user's current HP%.
    #[must_use]
    pub fn hp_gate_allows(&self, hp_percent: f64) -> bool {
        if let Some(min) = self.min_hp_threshold {
            if hp_percent >= min {
                return false;
            }
        }
        if let Some(max) = self.max_hp_threshold {
            if hp_percent < max {
                return false;
            }
        }
        true
    }

    /// Total conditional bonus damage at the given HP%.
    #[must_use]
    pub fn bonus_damage(&self, hp_percent: f64) -> i32 {
        self.damage_bonuses.iter().map(|b| b.amount_at(hp_percent)).sum()
    }
}
