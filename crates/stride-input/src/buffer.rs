//! Host-pushed input buffer implementing [`InputSampler`].
//!
//! The host writes device state into an [`InputBuffer`] as events arrive and
//! the core reads snapshots out of it at tick boundaries. Edge events latch
//! until the next fixed step; look deltas accumulate until the next frame.

use glam::Vec2;
use tracing::trace;

use crate::snapshot::{InputEvent, InputEvents, InputSampler, InputSnapshot};

/// Accumulates host input between ticks.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    move_vector: Vec2,
    look_accum: Vec2,
    pending: InputEvents,
}

impl InputBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current move level. Each axis is clamped to `[-1, 1]`.
    pub fn set_move(&mut self, move_vector: Vec2) {
        self.move_vector = move_vector.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Adds a look delta to the frame accumulator.
    pub fn add_look(&mut self, delta: Vec2) {
        self.look_accum += delta;
    }

    /// Latches an edge event for the next fixed step.
    ///
    /// Sprint start and end cancel each other: only the most recent sprint
    /// transition is delivered. Repeating an event within one step collapses
    /// it to a single delivery.
    pub fn push_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::SprintStart => self.pending.remove(InputEvent::SprintEnd),
            InputEvent::SprintEnd => self.pending.remove(InputEvent::SprintStart),
            InputEvent::JumpPressed | InputEvent::AttackPressed => {}
        }
        if self.pending.contains(event) {
            trace!(?event, "edge event already latched this step");
        }
        self.pending.insert(event);
    }

    /// Current move level.
    #[must_use]
    pub fn move_vector(&self) -> Vec2 {
        self.move_vector
    }

    /// Look delta accumulated since the last frame sample.
    #[must_use]
    pub fn pending_look(&self) -> Vec2 {
        self.look_accum
    }

    /// Edge events waiting for the next fixed step.
    #[must_use]
    pub fn pending_events(&self) -> InputEvents {
        self.pending
    }
}

impl InputSampler for InputBuffer {
    fn sample_step(&mut self) -> InputSnapshot {
        let events = std::mem::take(&mut self.pending);
        InputSnapshot::new(self.move_vector, Vec2::ZERO, events)
    }

    fn sample_frame(&mut self) -> InputSnapshot {
        let look = std::mem::take(&mut self.look_accum);
        InputSnapshot::new(self.move_vector, look, InputEvents::NONE)
    }
}
