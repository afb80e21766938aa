//! Host loop for the character core: ECS resources, frame stages and a
//! headless driver.
//!
//! Each frame runs `PreUpdate` (input bridging), then zero or more
//! `FixedUpdate` steps (locomotion followed by physics), then `LateUpdate`
//! (chase camera), so the camera always sees the transform produced by every
//! fixed step of the frame.

pub mod app;
pub mod error;
pub mod resources;
pub mod schedule;
pub mod script;
pub mod systems;

pub use app::{SPAWN_POSITION, StrideApp, build_world};
pub use error::AppError;
pub use resources::{CameraRig, Devices, FrameTime, InputRes, PlayerRig};
pub use schedule::{FrameSchedule, FrameSchedules};
pub use script::{InputScript, ScriptAction};
