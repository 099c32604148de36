//! Storage for all **components** attached to a single entity.

use std::any::Any;
use std::collections::HashMap;

use super::{Component, ComponentType};

/// Type-erased component container of one entity.
///
/// Holds at most one component of each type.
///
#[derive(Default)]
pub struct Components {
    components: HashMap<ComponentType, Box<dyn Any + Send + Sync>>,
}

impl Components {
    /// Creates an empty component container.
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Inserts component of type `T`.
    /// If component of this type was already present, it will be replaced by value.
    ///
    /// Returns previously stored component, if any.
    ///
    pub fn insert<T>(&mut self, component: T) -> Option<T>
    where
        T: Component,
    {
        let prev = self
            .components
            .insert(ComponentType::of::<T>(), Box::new(component))?;
        prev.downcast::<T>().ok().map(|prev| *prev)
    }

    /// Removes component of type `T`.
    ///
    /// Returns component that was stored in the container.
    ///
    pub fn remove<T>(&mut self) -> Option<T>
    where
        T: Component,
    {
        let boxed = self.components.remove(&ComponentType::of::<T>())?;
        boxed.downcast::<T>().ok().map(|component| *component)
    }

    /// Removes component by its type identity, dropping it.
    ///
    /// Returns `true` if component of this type was present.
    ///
    pub fn remove_type(&mut self, component_type: ComponentType) -> bool {
        self.components.remove(&component_type).is_some()
    }

    /// Returns `true` if component of type `T` is present.
    pub fn has<T>(&self) -> bool
    where
        T: Component,
    {
        self.contains(ComponentType::of::<T>())
    }

    /// Returns `true` if component with given type identity is present.
    pub fn contains(&self, component_type: ComponentType) -> bool {
        self.components.contains_key(&component_type)
    }

    /// Retrieves an immutable reference to component of type `T`.
    pub fn get<T>(&self) -> Option<&T>
    where
        T: Component,
    {
        let boxed = self.components.get(&ComponentType::of::<T>())?;
        boxed.downcast_ref::<T>()
    }

    /// Retrieves a mutable reference to component of type `T`.
    pub fn get_mut<T>(&mut self) -> Option<&mut T>
    where
        T: Component,
    {
        let boxed = self.components.get_mut(&ComponentType::of::<T>())?;
        boxed.downcast_mut::<T>()
    }

    /// Retrieves mutable references to components of two different types at once.
    ///
    /// Returns `None` if any of them is absent or if `A` and `B` are the same type.
    ///
    pub fn get_pair_mut<A, B>(&mut self) -> Option<(&mut A, &mut B)>
    where
        A: Component,
        B: Component,
    {
        let first_type = ComponentType::of::<A>();
        let second_type = ComponentType::of::<B>();
        if first_type == second_type {
            return None;
        }

        let mut first = None;
        let mut second = None;
        for (component_type, boxed) in self.components.iter_mut() {
            if *component_type == first_type {
                first = boxed.downcast_mut::<A>();
            } else if *component_type == second_type {
                second = boxed.downcast_mut::<B>();
            }
        }
        Some((first?, second?))
    }

    /// Returns iterator over type identities of all stored components.
    pub fn types(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.components.keys().copied()
    }

    /// Count of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if there are no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
