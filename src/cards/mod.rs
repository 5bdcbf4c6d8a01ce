//! Card system: definitions and instances.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Static card data (element, cost, payloads, keywords)
//! - `CardInstance`: One copy of a definition with per-instance state
//! - `Keyword`: Exhaust / Ethereal / Retain pile rules
//!
//! Definitions are looked up through `catalog::Catalogs`.

pub mod definition;
pub mod instance;

pub use definition::{CardDefinition, CardType, CardUpgrade, Keyword, MomentumBonus};
pub use instance::{CardInstance, CombatModifiers};
