//! Input contracts for the locomotion and camera cores.
//!
//! The cores never touch devices. They read one immutable [`InputSnapshot`]
//! per tick from an [`InputSampler`]. [`InputBuffer`] is the host-pushed
//! sampler, and [`DeviceBridge`] feeds it from winit events with fixed bindings.

pub mod buffer;
pub mod device;
pub mod snapshot;

pub use buffer::InputBuffer;
pub use device::DeviceBridge;
pub use snapshot::{InputEvent, InputEvents, InputSampler, InputSnapshot};
