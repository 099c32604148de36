//! Utilities for *systems* in ECS.

use std::any::type_name;

use crate::app::GameTime;
use crate::error::{Error, Result};

use super::{ComponentEvent, ComponentListener, Entity, EntityPool};

use index::Index;
pub use signature::Signature;

mod index;
mod signature;

/// First component type handled by the system `S`.
pub type First<S> = <<S as System>::Signature as Signature>::First;

/// Second component type handled by the system `S`.
pub type Second<S> = <<S as System>::Signature as Signature>::Second;

/// Objects of this trait represent *system* of ECS.
///
/// System handles every entity which owns both component types of its [`Signature`].
/// Once per frame [`pre_update`](System::pre_update) is called,
/// then [`process`](System::process) for each matched entity,
/// then [`post_update`](System::post_update).
///
pub trait System: 'static {
    /// Component types which will be handled by this system.
    type Signature: Signature;

    /// Called once per frame before any entity is processed.
    fn pre_update(&mut self, _time: &GameTime) {}

    /// Handles components of one matched entity.
    fn process(&mut self, time: &GameTime, first: &mut First<Self>, second: &mut Second<Self>);

    /// Called once per frame after all entities were processed.
    fn post_update(&mut self, _time: &GameTime) {}
}

/// System together with the set of entities it currently handles.
///
/// Set of entities is maintained incrementally from pool notifications:
/// the entity is present if and only if it owns both required component types.
///
pub struct TypedSystem<S>
where
    S: System,
{
    system: S,
    index: Index,
}

impl<S> TypedSystem<S>
where
    S: System,
{
    /// Creates system with an empty index.
    ///
    /// # Errors
    /// An error is returned if both required component types are the same.
    ///
    pub fn new(system: S) -> Result<Self> {
        let [first, second] = <S::Signature as Signature>::component_types();
        if first == second {
            return Err(Error::DuplicateComponentType {
                system: type_name::<S>(),
                component: first,
            });
        }
        Ok(Self {
            system,
            index: Index::new(),
        })
    }

    /// Name of the system used for diagnostics.
    pub fn name(&self) -> &'static str {
        type_name::<S>()
    }

    /// Immutable reference to the user-defined system.
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Mutable reference to the user-defined system.
    pub fn system_mut(&mut self) -> &mut S {
        &mut self.system
    }

    /// Returns `true` if the entity is handled by this system.
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains(entity)
    }

    /// Count of handled entities.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no entity is handled.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns iterator over handled entities in the order of processing.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.index.iter().copied()
    }

    /// Indexes entities of the pool which already own both required components.
    pub fn populate(&mut self, pool: &EntityPool) {
        for (entity, components) in pool.entities() {
            if <S::Signature as Signature>::matches(components) && self.index.insert(entity) {
                log::trace!("{} tracks entity {:?}", self.name(), entity);
            }
        }
    }

    /// Runs the system for one frame.
    ///
    /// # Errors
    /// An error is returned if some handled entity does not own required components anymore.
    ///
    pub(crate) fn update(&mut self, time: &GameTime, pool: &mut EntityPool) -> Result<()> {
        self.system.pre_update(time);
        for &entity in self.index.iter() {
            let pair = pool
                .components_mut(entity)
                .and_then(|components| components.get_pair_mut::<First<S>, Second<S>>());
            let (first, second) = match pair {
                Some(pair) => pair,
                None => {
                    let system = type_name::<S>();
                    log::error!("{} has stale entity {:?} in its index", system, entity);
                    return Err(Error::StaleIndex { system, entity });
                }
            };
            self.system.process(time, first, second);
        }
        self.system.post_update(time);
        Ok(())
    }
}

impl<S> ComponentListener for TypedSystem<S>
where
    S: System,
{
    fn on_component_added(&mut self, event: &ComponentEvent<'_>) {
        let entity = event.entity();
        if self.index.contains(entity) {
            return;
        }
        if <S::Signature as Signature>::matches(event.components()) {
            self.index.insert(entity);
            log::trace!("{} tracks entity {:?}", self.name(), entity);
        }
    }

    fn on_component_removed(&mut self, event: &ComponentEvent<'_>) {
        let entity = event.entity();
        if !self.index.contains(entity) {
            return;
        }
        if !<S::Signature as Signature>::matches(event.components()) {
            self.index.remove(entity);
            log::trace!("{} untracks entity {:?}", self.name(), entity);
        }
    }
}

/// Object safe interface of [`TypedSystem`] used by the engine to drive all systems.
pub(crate) trait Run: ComponentListener {
    fn name(&self) -> &'static str;

    fn update(&mut self, time: &GameTime, pool: &mut EntityPool) -> Result<()>;
}

impl<S> Run for TypedSystem<S>
where
    S: System,
{
    fn name(&self) -> &'static str {
        TypedSystem::name(self)
    }

    fn update(&mut self, time: &GameTime, pool: &mut EntityPool) -> Result<()> {
        TypedSystem::update(self, time, pool)
    }
}
