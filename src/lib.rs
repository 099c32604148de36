//! Reactive entity component system core.
//!
//! Systems declare a pair of required component types and keep track of matching
//! entities incrementally from notifications of the [`EntityPool`](ecs::EntityPool),
//! so no system ever scans the whole world to find its entities.
//!

pub use app::{Engine, GameTime, SystemHandle};

pub mod app;
pub mod config;
pub mod ecs;
pub mod error;
