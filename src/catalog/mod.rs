//! Read-only definition catalogs.
//!
//! ## Key Types
//!
//! - [`Catalog`]: id-keyed registry of one definition kind
//! - [`Catalogs`]: the three catalogs a combat reads from
//! - [`OpponentDefinition`], [`ModifierDefinition`]: static opponent and
//!   run-long bonus data
//!
//! Catalogs are built once and passed by reference into
//! [`Combat::new`](crate::combat::Combat::new).

mod definitions;
mod registry;

pub use definitions::{ModifierDefinition, OpponentDefinition};
pub use registry::{Catalog, CatalogEntry};

use crate::cards::CardDefinition;

/// Card, opponent and modifier catalogs.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub cards: Catalog<CardDefinition>,
    pub opponents: Catalog<OpponentDefinition>,
    pub modifiers: Catalog<ModifierDefinition>,
}

impl Catalogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn opponent(&self, id: &str) -> Option<&OpponentDefinition> {
        self.opponents.get(id)
    }

    #[must_use]
    pub fn modifier(&self, id: &str) -> Option<&ModifierDefinition> {
        self.modifiers.get(id)
    }
}
