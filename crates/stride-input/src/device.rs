//! Translates winit device events into an [`InputBuffer`].
//!
//! Bindings are fixed: WASD or arrow keys move, raw mouse motion looks,
//! Space jumps, Left Shift sprints while held, and the left mouse button
//! attacks. Physical key codes are used so movement is layout independent.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::buffer::InputBuffer;
use crate::snapshot::InputEvent;

/// Default scale from raw mouse counts to look units.
pub const DEFAULT_LOOK_SCALE: f32 = 0.05;

/// Minimal description of a key event, free of platform handles.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat.
    pub repeat: bool,
}

/// Stateful bridge from device events to the input buffer.
#[derive(Debug, Clone)]
pub struct DeviceBridge {
    held: HashSet<KeyCode>,
    look_scale: f32,
}

impl Default for DeviceBridge {
    fn default() -> Self {
        Self::new(DEFAULT_LOOK_SCALE)
    }
}

impl DeviceBridge {
    /// Creates a bridge with the given mouse look scale.
    #[must_use]
    pub fn new(look_scale: f32) -> Self {
        Self {
            held: HashSet::new(),
            look_scale,
        }
    }

    /// Processes a winit [`KeyEvent`].
    pub fn on_key_event(&mut self, event: &KeyEvent, buffer: &mut InputBuffer) {
        self.on_key(
            RawKeyEvent {
                key: event.physical_key,
                state: event.state,
                repeat: event.repeat,
            },
            buffer,
        );
    }

    /// Processes a [`RawKeyEvent`]. Auto-repeats are ignored.
    pub fn on_key(&mut self, event: RawKeyEvent, buffer: &mut InputBuffer) {
        if event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.key else {
            return;
        };

        let pressed = event.state == ElementState::Pressed;
        let was_held = if pressed {
            !self.held.insert(code)
        } else {
            self.held.remove(&code)
        };
        // Ignore duplicate presses and releases of keys we never saw go down.
        if was_held == pressed {
            return;
        }

        match code {
            KeyCode::Space if pressed => buffer.push_event(InputEvent::JumpPressed),
            KeyCode::ShiftLeft => buffer.push_event(if pressed {
                InputEvent::SprintStart
            } else {
                InputEvent::SprintEnd
            }),
            _ => {}
        }
        buffer.set_move(self.move_vector());
    }

    /// Processes a mouse button change.
    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        buffer: &mut InputBuffer,
    ) {
        if button == MouseButton::Left && state == ElementState::Pressed {
            buffer.push_event(InputEvent::AttackPressed);
        }
    }

    /// Processes a `DeviceEvent::MouseMotion` raw delta.
    ///
    /// Screen-space y grows downward; look y grows upward.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64, buffer: &mut InputBuffer) {
        buffer.add_look(Vec2::new(dx as f32, -dy as f32) * self.look_scale);
    }

    /// Releases every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self, buffer: &mut InputBuffer) {
        if self.held.contains(&KeyCode::ShiftLeft) {
            buffer.push_event(InputEvent::SprintEnd);
        }
        self.held.clear();
        buffer.set_move(Vec2::ZERO);
    }

    /// Digital move vector from the held keys, normalized on diagonals.
    #[must_use]
    pub fn move_vector(&self) -> Vec2 {
        let axis = |neg: [KeyCode; 2], pos: [KeyCode; 2]| -> f32 {
            let n = neg.iter().any(|k| self.held.contains(k));
            let p = pos.iter().any(|k| self.held.contains(k));
            f32::from(u8::from(p)) - f32::from(u8::from(n))
        };
        let x = axis(
            [KeyCode::KeyA, KeyCode::ArrowLeft],
            [KeyCode::KeyD, KeyCode::ArrowRight],
        );
        let y = axis(
            [KeyCode::KeyS, KeyCode::ArrowDown],
            [KeyCode::KeyW, KeyCode::ArrowUp],
        );
        Vec2::new(x, y).normalize_or_zero()
    }
}
