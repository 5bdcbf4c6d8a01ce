//! Effect payloads and their interpreter.
//!
//! Effects are the building blocks of cards, powers, modifiers and
//! opponent moves:
//! - `Effect`: closed set of effect kinds
//! - `EffectPayload`: effects that resolve together
//! - `EffectInterpreter`: executes payloads against a `CombatState`
//!
//! ## Design Philosophy
//!
//! Payloads are plain data. The interpreter is an exhaustive match over
//! `Effect`, so adding a kind forces every dispatch site to handle it.

mod effect;
mod interpreter;

pub use effect::{Effect, EffectPayload, EffectTarget};
pub use interpreter::{EffectInterpreter, ExecutionReport, SkipReason, SkippedEffect};
