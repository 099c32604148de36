//! Entity Component System (ECS) utilities for game engine.

pub use component::{Component, ComponentType, Components};
pub use entity::Entity;
pub use pool::{ComponentEvent, ComponentListener, EntityPool, ListenerId};
pub use system::{First, Second, Signature, System, TypedSystem};

pub(crate) use system::Run;

use entity::EntityStorage;

mod component;
mod entity;
mod pool;
mod system;
