//! Configuration structs with sensible defaults, validation, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Character locomotion tunables.
    pub locomotion: LocomotionConfig,
    /// Chase camera tunables.
    pub camera: CameraConfig,
    /// Host loop timing.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How the locomotion controller writes horizontal motion into the rigid body.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocomotionStrategy {
    /// Advance the body's horizontal position directly each fixed step.
    #[default]
    KinematicPosition,
    /// Overwrite the body's horizontal velocity and let physics integrate it.
    VelocitySet,
}

/// Locomotion configuration. Speeds are in length units per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Which rigid-body write strategy to use.
    pub strategy: LocomotionStrategy,
    /// Horizontal speed while walking.
    pub walk_speed: f32,
    /// Horizontal speed while sprinting.
    pub sprint_speed: f32,
    /// Slerp rate toward the movement direction (per second).
    pub rotation_speed: f32,
    /// Magnitude of the upward jump impulse.
    pub jump_force: f32,
    /// Height above the character's base where the ground ray starts.
    pub ground_probe_offset: f32,
    /// Maximum length of the ground ray.
    pub ground_probe_distance: f32,
    /// Bitmask of collider layers that count as ground.
    pub ground_layer_mask: u32,
    /// Move-input magnitude above which the character counts as walking.
    pub walk_threshold: f32,
    /// Clear the sprint flag when a jump is latched.
    pub jump_cancels_sprint: bool,
}

/// Chase camera configuration. Angles are in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit distance behind the target.
    pub distance: f32,
    /// Vertical offset added to the orbit position.
    pub height: f32,
    /// Degrees of rotation per unit of look delta.
    pub sensitivity: f32,
    /// Approximate time for the follow smoothing to reach its target, in seconds.
    pub follow_smooth_time: f32,
    /// Lower pitch bound (looking up at the target).
    pub min_pitch: f32,
    /// Upper pitch bound (looking down at the target).
    pub max_pitch: f32,
    /// Height above the target's origin that the camera looks at.
    pub look_at_height: f32,
}

/// Host loop timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed simulation rate in Hz.
    pub fixed_hz: u32,
    /// Upper bound on fixed steps per rendered frame.
    pub max_steps_per_frame: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write a JSON log file next to the config.
    pub json_log_file: bool,
}

// --- Default implementations ---

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            strategy: LocomotionStrategy::KinematicPosition,
            walk_speed: 4.0,
            sprint_speed: 7.0,
            rotation_speed: 10.0,
            jump_force: 6.0,
            ground_probe_offset: 0.1,
            ground_probe_distance: 0.3,
            ground_layer_mask: 1,
            walk_threshold: 0.1,
            jump_cancels_sprint: false,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            height: 2.0,
            sensitivity: 2.0,
            follow_smooth_time: 0.05,
            min_pitch: -30.0,
            max_pitch: 60.0,
            look_at_height: 0.5,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 50,
            max_steps_per_frame: 10,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_log_file: false,
        }
    }
}

impl SimulationConfig {
    /// Duration of one fixed step in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        1.0 / f64::from(self.fixed_hz.max(1))
    }
}

// --- Validation ---

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a non-negative finite number, got {value}"),
        })
    }
}

fn open_pitch(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > -90.0 && value < 90.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must lie strictly between -90 and 90 degrees, got {value}"),
        })
    }
}

impl LocomotionConfig {
    /// Checks every tunable against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("locomotion.walk_speed", self.walk_speed)?;
        positive("locomotion.sprint_speed", self.sprint_speed)?;
        non_negative("locomotion.rotation_speed", self.rotation_speed)?;
        non_negative("locomotion.jump_force", self.jump_force)?;
        non_negative("locomotion.ground_probe_offset", self.ground_probe_offset)?;
        positive("locomotion.ground_probe_distance", self.ground_probe_distance)?;
        non_negative("locomotion.walk_threshold", self.walk_threshold)?;
        Ok(())
    }
}

impl CameraConfig {
    /// Checks every tunable against its allowed range.
    ///
    /// Pitch bounds must stay strictly inside (-90, 90) so the camera-relative
    /// movement basis never collapses to a vertical vector.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("camera.distance", self.distance)?;
        if !self.height.is_finite() {
            return Err(ConfigError::Invalid {
                field: "camera.height",
                reason: "must be finite".to_string(),
            });
        }
        non_negative("camera.sensitivity", self.sensitivity)?;
        positive("camera.follow_smooth_time", self.follow_smooth_time)?;
        open_pitch("camera.min_pitch", self.min_pitch)?;
        open_pitch("camera.max_pitch", self.max_pitch)?;
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::Invalid {
                field: "camera.min_pitch",
                reason: format!(
                    "min_pitch ({}) exceeds max_pitch ({})",
                    self.min_pitch, self.max_pitch
                ),
            });
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Checks the loop timing values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_hz == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.fixed_hz",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.max_steps_per_frame",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for Stride, e.g. `~/.config/stride` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stride"))
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.camera.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
