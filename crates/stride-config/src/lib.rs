//! Configuration system for Stride.
//!
//! Author-time tunables for locomotion, the chase camera, and the host loop.
//! Settings persist to disk as RON, accept CLI overrides via clap, and are
//! validated once before any controller is activated.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, LocomotionConfig, LocomotionStrategy, SimulationConfig,
};
pub use error::ConfigError;
