//! Immutable per-tick input snapshots and the sampler contract.

use glam::Vec2;

/// A discrete, edge-triggered input event.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum InputEvent {
    /// Sprint button went down.
    SprintStart,
    /// Sprint button went up.
    SprintEnd,
    /// Jump button went down.
    JumpPressed,
    /// Attack button went down.
    AttackPressed,
}

/// Set of edge events delivered with one snapshot. Each event appears at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvents {
    sprint_start: bool,
    sprint_end: bool,
    jump_pressed: bool,
    attack_pressed: bool,
}

impl InputEvents {
    /// No events.
    pub const NONE: Self = Self {
        sprint_start: false,
        sprint_end: false,
        jump_pressed: false,
        attack_pressed: false,
    };

    /// Returns a copy with `event` added.
    #[must_use]
    pub fn with(mut self, event: InputEvent) -> Self {
        self.insert(event);
        self
    }

    /// Adds `event` to the set.
    pub fn insert(&mut self, event: InputEvent) {
        *self.slot_mut(event) = true;
    }

    /// Removes `event` from the set.
    pub fn remove(&mut self, event: InputEvent) {
        *self.slot_mut(event) = false;
    }

    /// Whether `event` is present.
    #[must_use]
    pub fn contains(&self, event: InputEvent) -> bool {
        match event {
            InputEvent::SprintStart => self.sprint_start,
            InputEvent::SprintEnd => self.sprint_end,
            InputEvent::JumpPressed => self.jump_pressed,
            InputEvent::AttackPressed => self.attack_pressed,
        }
    }

    /// Whether no event is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    fn slot_mut(&mut self, event: InputEvent) -> &mut bool {
        match event {
            InputEvent::SprintStart => &mut self.sprint_start,
            InputEvent::SprintEnd => &mut self.sprint_end,
            InputEvent::JumpPressed => &mut self.jump_pressed,
            InputEvent::AttackPressed => &mut self.attack_pressed,
        }
    }
}

/// One tick's worth of player input.
///
/// The move vector is clamped to `[-1, 1]` per axis but is not normalized.
/// The look delta is in device units and unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    move_vector: Vec2,
    look_delta: Vec2,
    events: InputEvents,
}

impl InputSnapshot {
    /// A snapshot with no movement, no look, and no events.
    pub const IDLE: Self = Self {
        move_vector: Vec2::ZERO,
        look_delta: Vec2::ZERO,
        events: InputEvents::NONE,
    };

    /// Builds a snapshot, clamping each move axis to `[-1, 1]`.
    #[must_use]
    pub fn new(move_vector: Vec2, look_delta: Vec2, events: InputEvents) -> Self {
        Self {
            move_vector: move_vector.clamp(Vec2::NEG_ONE, Vec2::ONE),
            look_delta,
            events,
        }
    }

    /// Snapshot carrying only a move vector.
    #[must_use]
    pub fn moving(move_vector: Vec2) -> Self {
        Self::new(move_vector, Vec2::ZERO, InputEvents::NONE)
    }

    /// Snapshot carrying only a look delta.
    #[must_use]
    pub fn looking(look_delta: Vec2) -> Self {
        Self::new(Vec2::ZERO, look_delta, InputEvents::NONE)
    }

    /// Returns a copy with `event` added.
    #[must_use]
    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.insert(event);
        self
    }

    /// 2D movement intent, x = strafe right, y = forward.
    #[must_use]
    pub fn move_vector(&self) -> Vec2 {
        self.move_vector
    }

    /// Look delta since the previous render tick.
    #[must_use]
    pub fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    /// Edge events delivered with this snapshot.
    #[must_use]
    pub fn events(&self) -> InputEvents {
        self.events
    }

    /// Shorthand for `events().contains(event)`.
    #[must_use]
    pub fn has(&self, event: InputEvent) -> bool {
        self.events.contains(event)
    }
}

/// Source of input snapshots, polled by the host once per tick.
///
/// Locomotion consumes [`sample_step`](Self::sample_step) once per fixed step;
/// the chase camera consumes [`sample_frame`](Self::sample_frame) once per
/// rendered frame. The two rates are independent.
pub trait InputSampler {
    /// Snapshot for one fixed step. Drains pending edge events; look delta is left
    /// for the frame sampler and reported as zero.
    fn sample_step(&mut self) -> InputSnapshot;

    /// Snapshot for one rendered frame. Drains the accumulated look delta; edge
    /// events are left for the step sampler and reported as empty.
    fn sample_frame(&mut self) -> InputSnapshot;
}
