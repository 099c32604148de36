//! Utilities for engine error handling.

use thiserror::Error;

use crate::ecs::{ComponentType, Entity, ListenerId};

/// Result of any operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// General error type of the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity was never spawned by the pool or was already despawned.
    #[error("entity {0:?} does not exist in the pool")]
    EntityNotFound(Entity),
    /// Listener is borrowed outside of the pool, so it cannot be notified about a change.
    #[error("listener {0:?} is borrowed and cannot be notified")]
    ListenerBusy(ListenerId),
    /// System requires the same component type twice.
    #[error("system `{system}` requires two distinct component types, but `{component}` is used twice")]
    DuplicateComponentType {
        system: &'static str,
        component: ComponentType,
    },
    /// System has indexed an entity which does not own all of its required components.
    ///
    /// This means that the pool has not delivered some component notification,
    /// so the index of the system cannot be trusted anymore.
    ///
    #[error("system `{system}` has indexed entity {entity:?} without its required components")]
    StaleIndex {
        system: &'static str,
        entity: Entity,
    },
}
