//! Utilities for signature of *systems* in ECS.

use crate::ecs::{Component, ComponentType, Components};

/// Signature of the *system* in ECS.
///
/// Describes the pair of component types handled by the system.
/// Implemented for tuples of two components.
///
pub trait Signature: 'static {
    /// First required component type.
    type First: Component;
    /// Second required component type.
    type Second: Component;

    /// Identities of both required types, in declaration order.
    fn component_types() -> [ComponentType; 2] {
        [
            ComponentType::of::<Self::First>(),
            ComponentType::of::<Self::Second>(),
        ]
    }

    /// Returns `true` if components contain both required types.
    fn matches(components: &Components) -> bool {
        components.has::<Self::First>() && components.has::<Self::Second>()
    }
}

impl<A, B> Signature for (A, B)
where
    A: Component,
    B: Component,
{
    type First = A;
    type Second = B;
}
