//! Scripted device input for headless runs.
//!
//! A script is a list of device actions keyed by frame number. They are fed
//! through the same [`DeviceBridge`](stride_input::DeviceBridge) a windowed
//! host would use, so bindings behave identically.

use bevy_ecs::prelude::Resource;
use stride_input::InputBuffer;
use stride_input::device::{DeviceBridge, RawKeyEvent};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// One scripted device event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    Key(KeyCode, ElementState),
    MouseButton(MouseButton, ElementState),
    /// Raw mouse motion in device counts.
    MouseMotion { dx: f64, dy: f64 },
    /// Release every held key, as on focus loss.
    ReleaseAll,
}

impl ScriptAction {
    /// Feeds this action through `bridge` into `buffer`.
    pub fn apply(self, bridge: &mut DeviceBridge, buffer: &mut InputBuffer) {
        match self {
            Self::Key(code, state) => bridge.on_key(
                RawKeyEvent {
                    key: PhysicalKey::Code(code),
                    state,
                    repeat: false,
                },
                buffer,
            ),
            Self::MouseButton(button, state) => bridge.on_mouse_button(button, state, buffer),
            Self::MouseMotion { dx, dy } => bridge.on_raw_motion(dx, dy, buffer),
            Self::ReleaseAll => bridge.release_all(buffer),
        }
    }
}

/// Frame-ordered device actions.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputScript {
    actions: Vec<(u64, ScriptAction)>,
    cursor: usize,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` for `frame`. Actions on the same frame keep insertion order.
    #[must_use]
    pub fn at(mut self, frame: u64, action: ScriptAction) -> Self {
        let index = self.actions.partition_point(|(f, _)| *f <= frame);
        self.actions.insert(index, (frame, action));
        self
    }

    /// Presses `code` at `start` and releases it at `end`.
    #[must_use]
    pub fn hold(self, code: KeyCode, start: u64, end: u64) -> Self {
        self.at(start, ScriptAction::Key(code, ElementState::Pressed))
            .at(end, ScriptAction::Key(code, ElementState::Released))
    }

    /// Presses and releases `code` on the same frame.
    #[must_use]
    pub fn tap(self, code: KeyCode, frame: u64) -> Self {
        self.hold(code, frame, frame)
    }

    /// Adds `(dx, dy)` of raw mouse motion on every frame in `start..end`.
    #[must_use]
    pub fn drag(mut self, start: u64, end: u64, dx: f64, dy: f64) -> Self {
        for frame in start..end {
            self = self.at(frame, ScriptAction::MouseMotion { dx, dy });
        }
        self
    }

    /// Walk, sprint and jump, orbit the camera, strafe and attack.
    /// Frame numbers are derived from `frame_hz` so the timeline is in seconds.
    pub fn demo(frame_hz: f64) -> Self {
        let at = |seconds: f64| (seconds * frame_hz).round() as u64;
        Self::new()
            .hold(KeyCode::KeyW, at(0.5), at(4.0))
            .hold(KeyCode::ShiftLeft, at(1.5), at(3.0))
            .tap(KeyCode::Space, at(2.0))
            .drag(at(4.0), at(5.0), 8.0, 0.0)
            .drag(at(5.0), at(5.5), 0.0, -6.0)
            .hold(KeyCode::KeyD, at(5.5), at(7.0))
            .at(at(6.0), ScriptAction::MouseButton(MouseButton::Left, ElementState::Pressed))
            .at(at(6.1), ScriptAction::MouseButton(MouseButton::Left, ElementState::Released))
            .tap(KeyCode::Space, at(7.5))
            .at(at(8.0), ScriptAction::ReleaseAll)
    }

    /// Applies every action scheduled up to and including `frame`.
    /// Returns how many were applied.
    pub fn play_until(
        &mut self,
        frame: u64,
        bridge: &mut DeviceBridge,
        buffer: &mut InputBuffer,
    ) -> usize {
        let start = self.cursor;
        while let Some((at, action)) = self.actions.get(self.cursor).copied() {
            if at > frame {
                break;
            }
            action.apply(bridge, buffer);
            self.cursor += 1;
        }
        self.cursor - start
    }

    /// Whether every action has been played.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
