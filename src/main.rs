//! Small simulation running on top of the `ecsl` engine.

use std::error::Error;

use log::LevelFilter;

use ecsl::config::Config;
use ecsl::ecs::System;
use ecsl::{Engine, GameTime};

mod logger;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");
const FRAMES: u64 = 180;

#[derive(Debug, Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone, Copy)]
struct Health(f32);

/// Damage per second.
#[derive(Debug, Clone, Copy)]
struct Poison(f32);

/// Moves entities by their velocity.
struct Movement {
    moved: usize,
}

impl System for Movement {
    type Signature = (Position, Velocity);

    fn pre_update(&mut self, _time: &GameTime) {
        self.moved = 0;
    }

    fn process(&mut self, time: &GameTime, position: &mut Position, velocity: &mut Velocity) {
        let delta = time.delta().as_secs_f32();
        position.x += velocity.dx * delta;
        position.y += velocity.dy * delta;
        self.moved += 1;
    }

    fn post_update(&mut self, time: &GameTime) {
        if time.frame() % 60 == 0 {
            log::info!("frame {}: moved {} entities", time.frame(), self.moved);
        }
    }
}

/// Applies poison damage to health.
struct Decay;

impl System for Decay {
    type Signature = (Health, Poison);

    fn process(&mut self, time: &GameTime, health: &mut Health, poison: &mut Poison) {
        health.0 = (health.0 - poison.0 * time.delta().as_secs_f32()).max(0.0);
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let _handle = logger::init(LevelFilter::Debug)?;
    log::info!("logger initialized successfully");

    let version = APP_VERSION_STR.parse()?;
    let config = Config::new(APP_NAME.to_string(), version, ecsl::config::DEFAULT_TIME_STEP)
        .with_frame_limit(Some(FRAMES));
    let mut engine = Engine::new(config);

    let movement = engine.add_system(Movement { moved: 0 })?;
    let decay = engine.add_system(Decay)?;

    let pool = engine.pool_mut();
    let mut poisoned = Vec::new();
    for index in 0..10 {
        let entity = pool.spawn();
        let offset = index as f32;
        pool.insert(entity, Position { x: offset, y: 0.0 })?;
        if index % 2 == 0 {
            pool.insert(entity, Velocity { dx: 1.0, dy: offset })?;
        }
        if index % 3 == 0 {
            pool.insert(entity, Health(100.0))?;
            pool.insert(entity, Poison(5.0 + offset))?;
            poisoned.push(entity);
        }
    }

    engine.run_frames(FRAMES / 2)?;

    // cure half of the poisoned entities and let the rest keep decaying
    for &entity in poisoned.iter().step_by(2) {
        engine.pool_mut().remove::<Poison>(entity)?;
    }
    engine.run()?;

    log::info!(
        "{} entities moving, {} entities poisoned",
        movement.borrow().len(),
        decay.borrow().len(),
    );
    for &entity in &poisoned {
        if let Some(health) = engine.pool().get::<Health>(entity) {
            log::info!("entity {} has {:.1} health", entity.id(), health.0);
        }
    }
    Ok(())
}
