//! Item (resource quantity) model.
//!
//! An item pairs a resource name with a quantity. The name is the
//! identity: two items compare equal when their names match, whatever
//! their quantities.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Dense index of a resource in a prepared [`Config`](super::Config).
pub type ItemId = usize;

/// A quantity of a named resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Resource name (identity key).
    pub name: String,
    /// Quantity needed, produced, or held.
    pub qty: i64,
}

impl Item {
    /// Creates a new item.
    pub fn new(name: impl Into<String>, qty: i64) -> Self {
        Self {
            name: name.into(),
            qty,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_name_only() {
        assert_eq!(Item::new("euro", 10), Item::new("euro", 99));
        assert_ne!(Item::new("euro", 10), Item::new("dollar", 10));
    }

    #[test]
    fn test_hash_ignores_quantity() {
        let set: HashSet<Item> = [Item::new("a", 1), Item::new("a", 2), Item::new("b", 1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
