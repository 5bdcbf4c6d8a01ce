//! Id-keyed catalog of immutable definitions.
//!
//! A `Catalog<T>` is built once at startup and then only read. Lookups by
//! unknown id return `None` so callers can fall back and log.

use rustc_hash::FxHashMap;

use crate::core::CatalogError;

/// A definition that can be stored in a [`Catalog`].
pub trait CatalogEntry {
    /// Human-readable kind, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Registry of definitions keyed by string id.
///
/// ## Example
///
/// ```
/// use resonance_combat::cards::{CardDefinition, CardType};
/// use resonance_combat::catalog::Catalog;
///
/// let mut cards = Catalog::new();
/// cards
///     .register(CardDefinition::new("ember", "Ember", CardType::Attack))
///     .unwrap();
///
/// assert_eq!(cards.get("ember").unwrap().name, "Ember");
/// assert!(cards.get("missing").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Catalog<T> {
    entries: FxHashMap<String, T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Fails if a definition with the same id already exists; the catalog is
    /// left unchanged.
    pub fn register(&mut self, entry: T) -> Result<(), CatalogError> {
        if self.entries.contains_key(entry.id()) {
            return Err(CatalogError::Duplicate {
                kind: T::KIND,
                id: entry.id().to_string(),
            });
        }
        self.entries.insert(entry.id().to_string(), entry);
        Ok(())
    }

    /// Register several definitions, stopping at the first duplicate.
    pub fn register_all(&mut self, entries: impl IntoIterator<Item = T>) -> Result<(), CatalogError> {
        for entry in entries {
            self.register(entry)?;
        }
        Ok(())
    }

    /// Builder-style registration.
    pub fn with(mut self, entry: T) -> Result<Self, CatalogError> {
        self.register(entry)?;
        Ok(self)
    }

    /// Get a definition by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Get the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Find definitions matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &T>
    where
        F: Fn(&T) -> bool,
    {
        self.entries.values().filter(move |e| predicate(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardType};
    use crate::core::Element;

    #[test]
    fn test_register_and_get() {
        let mut catalog = Catalog::new();
        catalog
            .register(CardDefinition::new("strike", "Strike", CardType::Attack))
            .unwrap();

        assert_eq!(catalog.get("strike").unwrap().name, "Strike");
        assert!(catalog.get("missing").is_none());
        assert!(catalog.contains("strike"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = Catalog::new();
        catalog
            .register(CardDefinition::new("strike", "Strike", CardType::Attack))
            .unwrap();

        let err = catalog
            .register(CardDefinition::new("strike", "Other", CardType::Skill))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Duplicate {
                kind: "card",
                id: "strike".to_string()
            }
        );
        assert_eq!(catalog.get("strike").unwrap().name, "Strike");
    }

    #[test]
    fn test_find_with_predicate() {
        let catalog = Catalog::new()
            .with(CardDefinition::new("ember", "Ember", CardType::Attack).with_element(Element::Fire))
            .unwrap()
            .with(CardDefinition::new("ripple", "Ripple", CardType::Attack).with_element(Element::Water))
            .unwrap()
            .with(CardDefinition::new("blaze", "Blaze", CardType::Skill).with_element(Element::Fire))
            .unwrap();

        let fire: Vec<_> = catalog.find(|c| c.element == Element::Fire).collect();
        assert_eq!(fire.len(), 2);
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn test_register_all_stops_at_duplicate() {
        let mut catalog = Catalog::new();
        let result = catalog.register_all([
            CardDefinition::new("a", "A", CardType::Attack),
            CardDefinition::new("a", "A2", CardType::Attack),
            CardDefinition::new("b", "B", CardType::Attack),
        ]);
        assert!(result.is_err());
        assert_eq!(catalog.len(), 1);
    }
}
