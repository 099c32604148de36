#![cfg(test)]

use super::*;

#[derive(Debug, PartialEq)]
struct Position(i32, i32);

#[derive(Debug, PartialEq)]
struct Velocity(i32, i32);

#[test]
fn test_insertion() {
    let mut components = Components::new();

    assert_eq!(components.insert(Position(1, 2)), None);
    assert!(components.has::<Position>());
    assert!(!components.has::<Velocity>());
    assert_eq!(components.get::<Position>(), Some(&Position(1, 2)));
    assert_eq!(components.get::<Velocity>(), None);

    assert_eq!(components.remove::<Position>(), Some(Position(1, 2)));
    assert!(!components.has::<Position>());
    assert!(components.is_empty());
}

#[test]
fn test_replace() {
    let mut components = Components::new();

    assert_eq!(components.insert(123_u32), None);
    assert_eq!(components.insert(456_u32), Some(123));
    assert_eq!(components.len(), 1);
    assert_eq!(components.remove::<u32>(), Some(456));
    assert_eq!(components.remove::<u32>(), None);
}

#[test]
fn test_pair() {
    let mut components = Components::new();
    components.insert(Position(0, 0));
    assert!(components.get_pair_mut::<Position, Velocity>().is_none());

    components.insert(Velocity(1, -1));
    let (position, velocity) = components.get_pair_mut::<Position, Velocity>().unwrap();
    position.0 += velocity.0;
    position.1 += velocity.1;
    assert_eq!(components.get::<Position>(), Some(&Position(1, -1)));

    assert!(components.get_pair_mut::<Position, Position>().is_none());
}

#[test]
fn test_component_type() {
    assert_eq!(ComponentType::of::<Position>(), ComponentType::of::<Position>());
    assert_ne!(ComponentType::of::<Position>(), ComponentType::of::<Velocity>());
    assert!(ComponentType::of::<Velocity>().name().ends_with("Velocity"));

    let mut components = Components::new();
    components.insert(Velocity(0, 0));
    assert!(components.contains(ComponentType::of::<Velocity>()));
    assert_eq!(components.types().collect::<Vec<_>>(), [ComponentType::of::<Velocity>()]);
    assert!(components.remove_type(ComponentType::of::<Velocity>()));
    assert!(!components.remove_type(ComponentType::of::<Velocity>()));
}
