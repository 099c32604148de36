//! Utilities for *entities* in ECS.

use slotmap::{new_key_type, Key, SlotMap};

use super::component::Components;

new_key_type! {
    /// Unique identifier of the *entity* of ECS.
    ///
    /// Identifier stays the same for the whole lifetime of the entity
    /// and is never reused by another entity of the same pool.
    ///
    pub struct Entity;
}

impl Entity {
    /// Unsigned integer representation of this identifier.
    pub fn id(self) -> u64 {
        self.data().as_ffi()
    }
}

/// Storage for all entities of ECS with their components.
pub type EntityStorage = SlotMap<Entity, Components>;
