//! Set of entities matched by the system.

use std::slice;

use slotmap::SecondaryMap;

use crate::ecs::Entity;

/// Set of entities with constant time insertion and removal.
///
/// Entities are iterated in insertion order until the first removal:
/// removed entity is replaced by the last one.
///
#[derive(Default)]
pub struct Index {
    positions: SecondaryMap<Entity, usize>,
    order: Vec<Entity>,
}

impl Index {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the entity was already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.positions.contains_key(entity) {
            return false;
        }
        self.positions.insert(entity, self.order.len());
        self.order.push(entity);
        true
    }

    /// Returns `false` if the entity was not present.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let position = match self.positions.remove(entity) {
            Some(position) => position,
            None => return false,
        };
        self.order.swap_remove(position);
        if let Some(&moved) = self.order.get(position) {
            self.positions.insert(moved, position);
        }
        true
    }

    /// Returns `true` if the entity is present.
    pub fn contains(&self, entity: Entity) -> bool {
        self.positions.contains_key(entity)
    }

    /// Count of entities in the index.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if there are no entities.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns iterator over entities in the order of processing.
    pub fn iter(&self) -> slice::Iter<'_, Entity> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut entities = SlotMap::<Entity, ()>::with_key();
        let first = entities.insert(());
        let second = entities.insert(());
        let third = entities.insert(());

        let mut index = Index::new();
        assert!(index.insert(third));
        assert!(index.insert(first));
        assert!(!index.insert(third));
        assert!(index.insert(second));
        assert_eq!(index.iter().copied().collect::<Vec<_>>(), [third, first, second]);

        assert!(index.remove(first));
        assert!(!index.remove(first));
        assert!(!index.contains(first));
        assert_eq!(index.iter().copied().collect::<Vec<_>>(), [third, second]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_remove_from_middle() {
        let mut entities = SlotMap::<Entity, ()>::with_key();
        let all: Vec<_> = (0..5).map(|_| entities.insert(())).collect();

        let mut index = Index::new();
        for &entity in &all {
            index.insert(entity);
        }
        assert!(index.remove(all[1]));
        assert!(index.remove(all[2]));

        assert_eq!(index.len(), 3);
        assert_eq!(index.iter().count(), 3);
        for (number, &entity) in all.iter().enumerate() {
            assert_eq!(index.contains(entity), number != 1 && number != 2);
        }
        for (position, &entity) in index.iter().enumerate() {
            assert_eq!(index.positions[entity], position);
        }

        assert!(index.remove(all[4]));
        assert!(index.remove(all[0]));
        assert!(index.remove(all[3]));
        assert!(index.is_empty());
        assert!(index.insert(all[2]));
        assert_eq!(index.iter().copied().collect::<Vec<_>>(), [all[2]]);
    }
}
