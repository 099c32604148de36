//! Utilities for the pool of entities and notifications about their components.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};

use super::{Component, ComponentType, Components, Entity, EntityStorage};

new_key_type! {
    /// Unique identifier of the listener subscribed to the pool.
    pub struct ListenerId;
}

/// Notification about component which was attached to or detached from the entity.
pub struct ComponentEvent<'a> {
    entity: Entity,
    components: &'a Components,
    component_type: ComponentType,
}

impl<'a> ComponentEvent<'a> {
    pub(crate) fn new(
        entity: Entity,
        components: &'a Components,
        component_type: ComponentType,
    ) -> Self {
        Self {
            entity,
            components,
            component_type,
        }
    }

    /// Entity which components were changed.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Components of the entity as they are after the change.
    pub fn components(&self) -> &'a Components {
        self.components
    }

    /// Type of the component which was attached or detached.
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }
}

/// Objects of this trait receive notifications from [`EntityPool`].
///
/// Notifications are delivered synchronously, right after the mutation
/// of the entity and before control returns to the caller.
///
pub trait ComponentListener {
    /// Component was attached to the entity.
    fn on_component_added(&mut self, event: &ComponentEvent<'_>);

    /// Component was detached from the entity.
    fn on_component_removed(&mut self, event: &ComponentEvent<'_>);
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Added,
    Removed,
}

/// Authoritative storage of all entities and their components.
#[derive(Default)]
pub struct EntityPool {
    entities: EntityStorage,
    listeners: SlotMap<ListenerId, Rc<RefCell<dyn ComponentListener>>>,
}

impl EntityPool {
    /// Creates an empty pool without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new entity without any components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.entities.insert(Components::new());
        log::debug!("spawned entity {:?}", entity);
        entity
    }

    /// Destroys the entity.
    ///
    /// All of its components are detached one by one before,
    /// so listeners are notified about each of them.
    ///
    /// # Errors
    /// An error is returned if the entity does not exist
    /// or some subscribed listener is currently borrowed;
    /// the pool is left unchanged in both cases.
    ///
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        self.ensure_listeners_free()?;
        let types: Vec<_> = self
            .components(entity)
            .ok_or(Error::EntityNotFound(entity))?
            .types()
            .collect();
        for component_type in types {
            let detached = self
                .entities
                .get_mut(entity)
                .map_or(false, |components| components.remove_type(component_type));
            if detached {
                self.notify(entity, component_type, Change::Removed);
            }
        }
        self.entities.remove(entity);
        log::debug!("despawned entity {:?}", entity);
        Ok(())
    }

    /// Attaches component of type `T` to the entity.
    ///
    /// If component of this type was already attached, it will be replaced by value
    /// and listeners will not be notified, because set of component types stays the same.
    ///
    /// Returns previously attached component, if any.
    ///
    /// # Errors
    /// An error is returned if the entity does not exist
    /// or some subscribed listener is currently borrowed;
    /// the pool is left unchanged in both cases.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Result<Option<T>>
    where
        T: Component,
    {
        self.ensure_listeners_free()?;
        let components = self
            .entities
            .get_mut(entity)
            .ok_or(Error::EntityNotFound(entity))?;
        let prev = components.insert(component);
        if prev.is_none() {
            let component_type = ComponentType::of::<T>();
            log::debug!("attached {} to entity {:?}", component_type, entity);
            self.notify(entity, component_type, Change::Added);
        }
        Ok(prev)
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// Returns component that was attached to the entity.
    ///
    /// # Errors
    /// An error is returned if the entity does not exist
    /// or some subscribed listener is currently borrowed;
    /// the pool is left unchanged in both cases.
    ///
    pub fn remove<T>(&mut self, entity: Entity) -> Result<Option<T>>
    where
        T: Component,
    {
        self.ensure_listeners_free()?;
        let components = self
            .entities
            .get_mut(entity)
            .ok_or(Error::EntityNotFound(entity))?;
        let removed = components.remove::<T>();
        if removed.is_some() {
            let component_type = ComponentType::of::<T>();
            log::debug!("detached {} from entity {:?}", component_type, entity);
            self.notify(entity, component_type, Change::Removed);
        }
        Ok(removed)
    }

    /// Returns `true` if the entity exists in this pool.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.components(entity)
            .map_or(false, |components| components.has::<T>())
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.components(entity)?.get()
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.entities.get_mut(entity)?.get_mut()
    }

    /// Read-only view of all components attached to the entity.
    pub fn components(&self, entity: Entity) -> Option<&Components> {
        self.entities.get(entity)
    }

    /// Components may be changed in place, but attaching or detaching them
    /// must go through the pool, otherwise listeners will miss it.
    pub(crate) fn components_mut(&mut self, entity: Entity) -> Option<&mut Components> {
        self.entities.get_mut(entity)
    }

    /// Returns iterator over all entities of the pool.
    pub fn entities(&self) -> impl Iterator<Item = (Entity, &Components)> {
        self.entities.iter()
    }

    /// Count of entities in the pool.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the pool has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Subscribes listener to component notifications of this pool.
    pub fn subscribe(&mut self, listener: Rc<RefCell<dyn ComponentListener>>) -> ListenerId {
        self.listeners.insert(listener)
    }

    /// Unsubscribes listener, so it will not receive notifications anymore.
    ///
    /// Returns `true` if listener was subscribed.
    ///
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Listeners are borrowed only inside `notify`, so the check holds
    /// until the mutation which follows it is dispatched.
    fn ensure_listeners_free(&self) -> Result<()> {
        for (id, listener) in &self.listeners {
            if listener.try_borrow_mut().is_err() {
                log::warn!("listener {:?} is borrowed, pool cannot be changed", id);
                return Err(Error::ListenerBusy(id));
            }
        }
        Ok(())
    }

    fn notify(&self, entity: Entity, component_type: ComponentType, change: Change) {
        let components = match self.entities.get(entity) {
            Some(components) => components,
            None => return,
        };
        let event = ComponentEvent::new(entity, components, component_type);
        for listener in self.listeners.values() {
            let mut listener = listener.borrow_mut();
            match change {
                Change::Added => listener.on_component_added(&event),
                Change::Removed => listener.on_component_removed(&event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(Entity, &'static str, bool)>,
    }

    impl ComponentListener for Recorder {
        fn on_component_added(&mut self, event: &ComponentEvent<'_>) {
            assert!(event.components().contains(event.component_type()));
            let name = event.component_type().name();
            self.events.push((event.entity(), name, true));
        }

        fn on_component_removed(&mut self, event: &ComponentEvent<'_>) {
            assert!(!event.components().contains(event.component_type()));
            let name = event.component_type().name();
            self.events.push((event.entity(), name, false));
        }
    }

    fn recorder(pool: &mut EntityPool) -> (ListenerId, Rc<RefCell<Recorder>>) {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let id = pool.subscribe(recorder.clone());
        (id, recorder)
    }

    #[test]
    fn test_insert_notifies_once() {
        let mut pool = EntityPool::new();
        let (_, recorder) = recorder(&mut pool);

        let entity = pool.spawn();
        assert_eq!(pool.insert(entity, 1_u8).unwrap(), None);
        assert_eq!(pool.insert(entity, 2_u8).unwrap(), Some(1));
        assert_eq!(pool.get::<u8>(entity), Some(&2));

        let recorder = recorder.borrow();
        assert_eq!(recorder.events.len(), 1);
        assert_eq!(recorder.events[0], (entity, "u8", true));
    }

    #[test]
    fn test_remove_notifies() {
        let mut pool = EntityPool::new();
        let (_, recorder) = recorder(&mut pool);

        let entity = pool.spawn();
        pool.insert(entity, 'x').unwrap();
        assert_eq!(pool.remove::<char>(entity).unwrap(), Some('x'));
        assert_eq!(pool.remove::<char>(entity).unwrap(), None);
        assert!(!pool.has::<char>(entity));

        let recorder = recorder.borrow();
        assert_eq!(
            recorder.events.as_slice(),
            [(entity, "char", true), (entity, "char", false)],
        );
    }

    #[test]
    fn test_despawn() {
        let mut pool = EntityPool::new();
        let (_, recorder) = recorder(&mut pool);

        let entity = pool.spawn();
        pool.insert(entity, 1_i32).unwrap();
        pool.insert(entity, 1.0_f32).unwrap();
        pool.despawn(entity).unwrap();

        assert!(!pool.contains(entity));
        assert!(pool.is_empty());
        let removed = recorder
            .borrow()
            .events
            .iter()
            .filter(|(_, _, added)| !added)
            .count();
        assert_eq!(removed, 2);

        assert!(matches!(pool.despawn(entity), Err(Error::EntityNotFound(e)) if e == entity));
        assert!(pool.insert(entity, 0_u64).is_err());
        assert!(pool.remove::<u64>(entity).is_err());
    }

    #[test]
    fn test_borrowed_listener() {
        let mut pool = EntityPool::new();
        let (id, recorder) = recorder(&mut pool);
        let entity = pool.spawn();
        pool.insert(entity, 1_u16).unwrap();

        {
            let _view = recorder.borrow();
            assert!(matches!(pool.insert(entity, 'a'), Err(Error::ListenerBusy(busy)) if busy == id));
            assert!(matches!(pool.remove::<u16>(entity), Err(Error::ListenerBusy(_))));
            assert!(matches!(pool.despawn(entity), Err(Error::ListenerBusy(_))));
        }

        assert!(pool.contains(entity));
        assert!(!pool.has::<char>(entity));
        assert_eq!(pool.get::<u16>(entity), Some(&1));
        assert_eq!(recorder.borrow().events.len(), 1);

        pool.insert(entity, 'a').unwrap();
        assert_eq!(recorder.borrow().events.len(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut pool = EntityPool::new();
        let (id, recorder) = recorder(&mut pool);

        let entity = pool.spawn();
        pool.insert(entity, true).unwrap();
        assert!(pool.unsubscribe(id));
        assert!(!pool.unsubscribe(id));
        pool.remove::<bool>(entity).unwrap();

        assert_eq!(recorder.borrow().events.len(), 1);
    }
}
