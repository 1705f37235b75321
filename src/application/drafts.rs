//! Session-scoped quote draft storage.
//!
//! Designs handed off from the builder are bridged into a session store
//! that survives screen navigation within one run of the application.
//! The store itself is an injected trait object so tests can use an
//! in-memory map instead of the filesystem.

use crate::domain::Design;
use std::collections::HashMap;
use tracing::warn;

/// Fixed key under which the JSON-encoded design list is stored.
pub const DESIGNS_KEY: &str = "designs";

/// Tab-session-scoped string storage. One writer, synchronous access.
pub trait SessionStore: std::fmt::Debug {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), String>;
    fn clear(&mut self, key: &str);
}

/// In-memory session store, used in tests and as the default for
/// [`crate::application::App::default`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The running list of designs the user wants a quote for.
///
/// Inserts are idempotent per design number: a design that is already
/// stored is never duplicated.
///
/// # Examples
///
/// ```
/// use devis::application::{DraftStore, MemoryStore};
/// use devis::domain::Design;
///
/// let mut drafts = DraftStore::new(Box::new(MemoryStore::default()));
/// let design = Design {
///     design_number: "PACK-cafe-1".to_string(),
///     product_name: "Pack Cafe".to_string(),
///     quantity: 2,
///     selected_size: "Standard".to_string(),
///     items: Vec::new(),
/// };
///
/// assert!(drafts.insert(design.clone()));
/// assert!(!drafts.insert(design));
/// assert_eq!(drafts.designs().len(), 1);
/// assert_eq!(drafts.total_quantity(), 2);
/// ```
#[derive(Debug)]
pub struct DraftStore {
    store: Box<dyn SessionStore>,
}

impl DraftStore {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Loads the stored design list. Unreadable content is treated as an
    /// empty list and logged; drafts are not worth failing over.
    pub fn designs(&self) -> Vec<Design> {
        match self.store.read(DESIGNS_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(designs) => designs,
                Err(e) => {
                    warn!(error = %e, "stored design list is unreadable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Appends and persists the design unless one with the same design
    /// number is already stored. Returns whether the list changed.
    pub fn insert(&mut self, design: Design) -> bool {
        let mut designs = self.designs();
        if designs
            .iter()
            .any(|d| d.design_number == design.design_number)
        {
            return false;
        }
        designs.push(design);
        self.persist(&designs);
        true
    }

    /// Removes the design with the given number. Returns whether anything
    /// was removed.
    pub fn remove(&mut self, design_number: &str) -> bool {
        let mut designs = self.designs();
        let before = designs.len();
        designs.retain(|d| d.design_number != design_number);
        if designs.len() == before {
            return false;
        }
        self.persist(&designs);
        true
    }

    /// Drops the whole draft list, called after a successful submission.
    pub fn clear(&mut self) {
        self.store.clear(DESIGNS_KEY);
    }

    pub fn total_quantity(&self) -> u32 {
        self.designs().iter().map(|d| d.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.designs().is_empty()
    }

    fn persist(&mut self, designs: &[Design]) {
        match serde_json::to_string(designs) {
            Ok(json) => {
                if let Err(e) = self.store.write(DESIGNS_KEY, &json) {
                    warn!(error = %e, "failed to persist design list");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode design list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(number: &str, quantity: u32) -> Design {
        Design {
            design_number: number.to_string(),
            product_name: "Pack Restaurant".to_string(),
            quantity,
            selected_size: "Standard".to_string(),
            items: Vec::new(),
        }
    }

    fn store() -> DraftStore {
        DraftStore::new(Box::new(MemoryStore::default()))
    }

    #[test]
    fn test_insert_and_read_back() {
        let mut drafts = store();
        assert!(drafts.is_empty());
        assert!(drafts.insert(design("PACK-restaurant-1", 2)));
        let designs = drafts.designs();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].design_number, "PACK-restaurant-1");
    }

    #[test]
    fn test_duplicate_design_number_is_never_stored_twice() {
        let mut drafts = store();
        assert!(drafts.insert(design("PACK-restaurant-1", 2)));
        assert!(!drafts.insert(design("PACK-restaurant-1", 9)));
        assert!(drafts.insert(design("D-2", 1)));
        assert!(!drafts.insert(design("D-2", 1)));
        assert!(!drafts.insert(design("PACK-restaurant-1", 2)));

        let designs = drafts.designs();
        assert_eq!(designs.len(), 2);
        // The original quantity wins; the duplicate insert is a no-op.
        assert_eq!(designs[0].quantity, 2);
    }

    #[test]
    fn test_total_quantity_sums_designs() {
        let mut drafts = store();
        drafts.insert(design("A", 2));
        drafts.insert(design("B", 3));
        assert_eq!(drafts.total_quantity(), 5);

        drafts.remove("A");
        assert_eq!(drafts.total_quantity(), 3);
    }

    #[test]
    fn test_remove_by_design_number() {
        let mut drafts = store();
        drafts.insert(design("A", 1));
        drafts.insert(design("B", 1));
        assert!(drafts.remove("A"));
        assert!(!drafts.remove("A"));
        assert_eq!(drafts.designs().len(), 1);
        assert_eq!(drafts.designs()[0].design_number, "B");
    }

    #[test]
    fn test_clear_empties_the_store() {
        let mut drafts = store();
        drafts.insert(design("A", 4));
        drafts.clear();
        assert!(drafts.is_empty());
        assert_eq!(drafts.total_quantity(), 0);
    }

    #[test]
    fn test_unreadable_stored_content_reads_as_empty() {
        let mut raw = MemoryStore::default();
        raw.write(DESIGNS_KEY, "not json at all").unwrap();
        let drafts = DraftStore::new(Box::new(raw));
        assert!(drafts.designs().is_empty());
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut drafts = store();
        for n in ["C", "A", "B"] {
            drafts.insert(design(n, 1));
        }
        let numbers: Vec<String> = drafts
            .designs()
            .iter()
            .map(|d| d.design_number.clone())
            .collect();
        assert_eq!(numbers, vec!["C", "A", "B"]);
    }
}
