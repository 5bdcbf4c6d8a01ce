//! Damage pipeline: elemental matchups, vulnerable, guard, health.

mod pipeline;

pub use pipeline::{effective_amount, resolve, DamageOutcome};
