//! Momentum streaks and elemental resonance.

mod tracker;

pub use tracker::{MomentumModifier, MomentumTracker};
