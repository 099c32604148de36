//! Utilities for engine initialization and per-frame updates.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use crate::config::{Config, ENGINE_NAME, ENGINE_VERSION};
use crate::ecs::{EntityPool, ListenerId, Run, System, TypedSystem};
use crate::error::Result;

pub use time::GameTime;

mod time;

/// Handle to the system registered in the [`Engine`].
pub struct SystemHandle<S>
where
    S: System,
{
    id: ListenerId,
    system: Rc<RefCell<TypedSystem<S>>>,
}

impl<S> SystemHandle<S>
where
    S: System,
{
    /// Identifier of the system, used to remove it from the engine.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Immutably borrows the system.
    ///
    /// While the borrow is alive, the pool refuses to attach or detach components
    /// and returns [`Error::ListenerBusy`](crate::error::Error::ListenerBusy).
    ///
    /// # Panics
    ///
    /// Panics if the system is currently mutably borrowed.
    ///
    pub fn borrow(&self) -> Ref<'_, TypedSystem<S>> {
        self.system.borrow()
    }

    /// Mutably borrows the system.
    ///
    /// While the borrow is alive, the pool refuses to attach or detach components
    /// and returns [`Error::ListenerBusy`](crate::error::Error::ListenerBusy).
    ///
    /// # Panics
    ///
    /// Panics if the system is currently borrowed.
    ///
    pub fn borrow_mut(&self) -> RefMut<'_, TypedSystem<S>> {
        self.system.borrow_mut()
    }
}

impl<S> Clone for SystemHandle<S>
where
    S: System,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            system: Rc::clone(&self.system),
        }
    }
}

struct Registered {
    id: ListenerId,
    system: Rc<RefCell<dyn Run>>,
}

/// Owner of the entity pool and all systems, driving them frame by frame.
pub struct Engine {
    config: Config,
    time: GameTime,
    pool: EntityPool,
    systems: Vec<Registered>,
}

impl Engine {
    /// Creates engine with an empty pool and no systems.
    pub fn new(config: Config) -> Self {
        log::info!(
            "{} v{} initialized for {} v{}",
            ENGINE_NAME,
            *ENGINE_VERSION,
            config.name(),
            config.version(),
        );
        Self {
            config,
            time: GameTime::ZERO,
            pool: EntityPool::new(),
            systems: Vec::new(),
        }
    }

    /// Configuration the engine was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Timing of the last frame.
    pub fn time(&self) -> &GameTime {
        &self.time
    }

    /// Pool of all entities.
    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    /// Pool of all entities; changes are delivered to systems immediately.
    pub fn pool_mut(&mut self) -> &mut EntityPool {
        &mut self.pool
    }

    /// Registers system and subscribes it to component notifications of the pool.
    ///
    /// Entities which already own both required components are indexed right away.
    /// Systems are updated in order of registration.
    ///
    /// # Errors
    /// An error is returned if the system requires the same component type twice.
    ///
    pub fn add_system<S>(&mut self, system: S) -> Result<SystemHandle<S>>
    where
        S: System,
    {
        let mut system = TypedSystem::new(system)?;
        system.populate(&self.pool);
        log::debug!(
            "registered system {} with {} entities",
            system.name(),
            system.len(),
        );

        let system = Rc::new(RefCell::new(system));
        let id = self.pool.subscribe(system.clone());
        self.systems.push(Registered {
            id,
            system: system.clone(),
        });
        Ok(SystemHandle { id, system })
    }

    /// Unregisters system, so it will not be updated nor notified anymore.
    ///
    /// Returns `true` if the system was registered.
    ///
    pub fn remove_system(&mut self, id: ListenerId) -> bool {
        let position = match self.systems.iter().position(|registered| registered.id == id) {
            Some(position) => position,
            None => return false,
        };
        let registered = self.systems.remove(position);
        self.pool.unsubscribe(id);
        log::debug!("unregistered system {}", registered.system.borrow().name());
        true
    }

    /// Count of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Advances game time by `delta` and updates every system once.
    ///
    /// # Errors
    /// An error is returned if some system has lost track of its entities;
    /// systems registered after it are not updated in this frame.
    ///
    pub fn update(&mut self, delta: Duration) -> Result<()> {
        self.time.advance(delta);
        log::trace!("frame {} started", self.time.frame());
        for registered in &self.systems {
            registered
                .system
                .borrow_mut()
                .update(&self.time, &mut self.pool)?;
        }
        Ok(())
    }

    /// Updates every system once with the configured time step.
    pub fn tick(&mut self) -> Result<()> {
        self.update(self.config.time_step())
    }

    /// Runs given count of frames with the configured time step.
    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        for _ in 0..frames {
            self.tick()?;
        }
        Ok(())
    }

    /// Ticks until the configured frame limit is reached.
    ///
    /// Without a frame limit the engine runs until some system fails.
    ///
    pub fn run(&mut self) -> Result<()> {
        while self
            .config
            .frame_limit()
            .map_or(true, |limit| self.time.frame() < limit)
        {
            self.tick()?;
        }
        log::info!("finished after {} frames", self.time.frame());
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
