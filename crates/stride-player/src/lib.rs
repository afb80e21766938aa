//! Third-person character core: fixed-step locomotion and a per-frame chase camera.
//!
//! The two halves meet only through the character's transform (the camera
//! follows it) and the camera's orientation (locomotion moves relative to it).

pub mod animation;
pub mod basis;
pub mod chase_camera;
pub mod locomotion;
pub mod smoothing;

pub use animation::{AnimationSignals, AnimationSink};
pub use basis::{CameraOrientationSource, MovementBasis, look_rotation};
pub use chase_camera::{CameraState, ChaseCamera};
pub use locomotion::{CharacterState, Collaborator, LocomotionController, LocomotionError};
pub use smoothing::smooth_damp;
