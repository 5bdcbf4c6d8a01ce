//! Card piles for a combat.
//!
//! ## Key Types
//!
//! - `Pile`: draw / hand / discard / exhaust
//! - `PileManager`: owns card instances and tracks their pile
//! - `PilePosition`: insertion point within a pile
//! - `DrawOutcome`: what a single draw did

pub mod manager;

pub use manager::{DrawOutcome, Pile, PileManager, PilePosition};
