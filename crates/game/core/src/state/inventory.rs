use std::collections::BTreeMap;

/// Item id to count multiset held by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.count(item) > 0
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(item.into()).or_insert(0) += quantity;
    }

    /// Adds one unit only if none is held yet. Returns true if granted.
    pub fn grant_once(&mut self, item: &str) -> bool {
        if self.contains(item) {
            return false;
        }
        self.add(item, 1);
        true
    }

    /// Removes a single unit. Returns false if the item was not held.
    pub fn remove_one(&mut self, item: &str) -> bool {
        match self.items.get_mut(item) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(item);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for (item, quantity) in iter {
            inventory.add(item, quantity);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_one_drops_empty_entries() {
        let mut inventory: Inventory = [("bullet", 2)].into_iter().collect();
        assert!(inventory.remove_one("bullet"));
        assert_eq!(inventory.count("bullet"), 1);
        assert!(inventory.remove_one("bullet"));
        assert!(!inventory.contains("bullet"));
        assert!(!inventory.remove_one("bullet"));
        assert!(inventory.is_empty());
    }

    #[test]
    fn grant_once_does_not_duplicate() {
        let mut inventory = Inventory::new();
        assert!(inventory.grant_once("pickaxe"));
        assert!(!inventory.grant_once("pickaxe"));
        assert_eq!(inventory.count("pickaxe"), 1);
    }
}
