//! Command-line overrides for Stride configuration.

use std::path::PathBuf;

use clap::Args;

use crate::{Config, LocomotionStrategy};

/// Command-line arguments shared by every Stride binary.
///
/// CLI values override settings loaded from `config.ron`. Binaries embed this
/// with `#[command(flatten)]`.
#[derive(Args, Debug, Clone, Default)]
pub struct CliArgs {
    /// Walk speed in units per second.
    #[arg(long)]
    pub walk_speed: Option<f32>,

    /// Sprint speed in units per second.
    #[arg(long)]
    pub sprint_speed: Option<f32>,

    /// Use the velocity-set locomotion strategy instead of position integration.
    #[arg(long)]
    pub velocity_set: bool,

    /// Camera look sensitivity in degrees per look unit.
    #[arg(long)]
    pub sensitivity: Option<f32>,

    /// Fixed simulation rate in Hz.
    #[arg(long)]
    pub fixed_hz: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(speed) = args.walk_speed {
            self.locomotion.walk_speed = speed;
        }
        if let Some(speed) = args.sprint_speed {
            self.locomotion.sprint_speed = speed;
        }
        if args.velocity_set {
            self.locomotion.strategy = LocomotionStrategy::VelocitySet;
        }
        if let Some(sensitivity) = args.sensitivity {
            self.camera.sensitivity = sensitivity;
        }
        if let Some(hz) = args.fixed_hz {
            self.simulation.fixed_hz = hz;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            walk_speed: Some(3.0),
            sensitivity: Some(0.25),
            velocity_set: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.locomotion.walk_speed, 3.0);
        assert_eq!(config.camera.sensitivity, 0.25);
        assert_eq!(config.locomotion.strategy, LocomotionStrategy::VelocitySet);
        // Non-overridden fields retain defaults
        assert_eq!(config.locomotion.sprint_speed, 7.0);
        assert_eq!(config.simulation.fixed_hz, 50);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
