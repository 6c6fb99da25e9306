//! # Favorites
//!
//! In-memory set of favorited details, unique by `id`, kept in the order
//! they were added. Owned by the composition root and handed to whatever
//! needs it; nothing here is global.

use log::debug;

use crate::catalog::CatalogItemDetail;

#[derive(Debug, Default, Clone)]
pub struct FavoritesStore {
    items: Vec<CatalogItemDetail>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the item if one with the same `id` is present, otherwise
    /// appends it. Returns whether the item is a favorite afterwards.
    pub fn toggle(&mut self, item: CatalogItemDetail) -> bool {
        if let Some(pos) = self.items.iter().position(|fav| fav.id == item.id) {
            let removed = self.items.remove(pos);
            debug!("Removed favorite {} (#{})", removed.name, removed.id);
            false
        } else {
            debug!("Added favorite {} (#{})", item.name, item.id);
            self.items.push(item);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.iter().any(|fav| fav.id == id)
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} favorites", self.items.len());
        self.items.clear();
    }

    /// Favorites in insertion order.
    pub fn items(&self) -> &[CatalogItemDetail] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::detail;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = FavoritesStore::new();
        assert!(store.toggle(detail(25, "pikachu")));
        assert!(store.contains(25));
        assert!(!store.toggle(detail(25, "pikachu")));
        assert!(store.is_empty());
        assert!(!store.contains(25));
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let mut store = FavoritesStore::new();
        store.toggle(detail(1, "bulbasaur"));
        store.toggle(detail(4, "charmander"));
        let before: Vec<u32> = store.items().iter().map(|d| d.id).collect();

        store.toggle(detail(7, "squirtle"));
        store.toggle(detail(7, "squirtle"));

        let after: Vec<u32> = store.items().iter().map(|d| d.id).collect();
        assert_eq!(before, after);
        assert!(!store.contains(7));
    }

    #[test]
    fn test_membership_is_by_id_not_payload() {
        let mut store = FavoritesStore::new();
        store.toggle(detail(25, "pikachu"));
        // Same id, different payload: still treated as the same favorite.
        assert!(!store.toggle(detail(25, "PIKACHU")));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_insertion_order_preserved_after_removal() {
        let mut store = FavoritesStore::new();
        for (id, name) in [(1, "bulbasaur"), (4, "charmander"), (7, "squirtle")] {
            store.toggle(detail(id, name));
        }
        store.toggle(detail(4, "charmander"));
        let ids: Vec<u32> = store.items().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 7]);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = FavoritesStore::new();
        store.toggle(detail(1, "bulbasaur"));
        store.toggle(detail(2, "ivysaur"));
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(1));
    }
}
