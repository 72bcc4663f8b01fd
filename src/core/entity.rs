//! Game entity system with simple integer IDs

use crate::Result;
use crate::SealsError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for game entities
///
/// IDs are handed out in creation order and never reused within a game,
/// so a returned-to-deck card comes back with a fresh ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    pub fn new(id: u32) -> Self {
        EntityId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ID of a card instance
pub type CardId = EntityId;

/// Central storage for all card instances
///
/// Uses FxHashMap for fast hashing of integer keys. Iteration order is not
/// stable, so engine code never iterates the store to decide game outcomes;
/// it walks zones and slots instead.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    entities: FxHashMap<EntityId, T>,
    next_id: u32,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            entities: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Generate a new unique EntityId
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, id: EntityId, entity: T) {
        self.entities.insert(id, entity);
    }

    pub fn get(&self, id: EntityId) -> Result<&T> {
        self.entities
            .get(&id)
            .ok_or(SealsError::CardNotFound(id.as_u32()))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut T> {
        self.entities
            .get_mut(&id)
            .ok_or(SealsError::CardNotFound(id.as_u32()))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Remove an entity (cards returned to a deck are despawned)
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entities.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &T)> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_store() {
        let mut store = EntityStore::new();
        let id1 = store.next_id();
        let id2 = store.next_id();

        assert_eq!(id1.as_u32(), 0);
        assert_eq!(id2.as_u32(), 1);

        store.insert(id1, "Archangel");
        store.insert(id2, "Cherubim");

        assert_eq!(store.len(), 2);
        assert_eq!(*store.get(id1).unwrap(), "Archangel");
        assert!(store.get(EntityId::new(999)).is_err());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = EntityStore::new();
        let id1 = store.next_id();
        store.insert(id1, 1);
        store.remove(id1);
        let id2 = store.next_id();
        assert_ne!(id1, id2);
        assert!(!store.contains(id1));
    }
}
