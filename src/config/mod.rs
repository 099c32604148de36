//! Configuration utilities for the engine and your game.

use std::time::Duration;

use semver::Version;

/// This struct represents general configuration of the engine.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    time_step: Duration,
    frame_limit: Option<u64>,
}

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version = ENGINE_VERSION_STR
        .parse()
        .expect("package version must be valid semver");
}

/// Time step of 60 frames per second.
pub const DEFAULT_TIME_STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);

impl Config {
    /// Creates new configuration with given name, version and fixed time step of one frame.
    pub const fn new(name: String, version: Version, time_step: Duration) -> Self {
        Self {
            name,
            version,
            time_step,
            frame_limit: None,
        }
    }

    /// Sets count of frames after which [`Engine::run`](crate::app::Engine::run) stops.
    pub fn with_frame_limit(mut self, frame_limit: Option<u64>) -> Self {
        self.frame_limit = frame_limit;
        self
    }

    /// Name of your game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Time which passes between two frames of [`Engine::tick`](crate::app::Engine::tick).
    pub fn time_step(&self) -> Duration {
        self.time_step
    }

    /// Count of frames to run, if the game should stop by itself.
    pub fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            "Hello World".to_string(),
            Version::new(0, 0, 0),
            DEFAULT_TIME_STEP,
        )
    }
}
