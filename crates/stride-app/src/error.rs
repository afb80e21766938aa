//! Host error type.

use stride_config::ConfigError;
use stride_player::LocomotionError;

/// Fatal setup errors. The demo binary logs these and exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("locomotion activation failed: {0}")]
    Locomotion(#[from] LocomotionError),
}
