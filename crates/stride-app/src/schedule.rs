//! Frame stage labels and the ordered schedule runner.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};
use tracing::warn;

/// Slack when comparing the accumulator against the fixed step, so a frame
/// spanning exactly N steps runs N despite rounding in the running sum.
const STEP_EPSILON: f64 = 1e-9;

/// Labels for each frame stage, run in the order listed.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSchedule {
    /// Bridge device events into the input buffer.
    PreUpdate,
    /// Locomotion then physics, at the fixed rate.
    FixedUpdate,
    /// Camera and presentation, once per frame after all fixed steps.
    LateUpdate,
}

/// Ordered collection of [`Schedule`]s that drives one frame.
///
/// `FixedUpdate` uses a time accumulator so the simulation ticks at a stable
/// rate regardless of the frame rate. `LateUpdate` always observes the
/// transforms produced by every fixed step of the same frame.
pub struct FrameSchedules {
    schedules: Vec<(FrameSchedule, Schedule)>,
    fixed_accumulator: f64,
    fixed_dt: f64,
    max_fixed_steps: u32,
}

impl FrameSchedules {
    /// Creates the stages with a fixed step of `fixed_dt` seconds and at most
    /// `max_fixed_steps` fixed steps per frame.
    pub fn new(fixed_dt: f64, max_fixed_steps: u32) -> Self {
        let schedules = [
            FrameSchedule::PreUpdate,
            FrameSchedule::FixedUpdate,
            FrameSchedule::LateUpdate,
        ]
        .into_iter()
        .map(|label| (label, Schedule::default()))
        .collect();

        Self {
            schedules,
            fixed_accumulator: 0.0,
            fixed_dt,
            max_fixed_steps,
        }
    }

    /// Register a system (or system tuple) into a specific stage.
    pub fn add_system<M>(&mut self, stage: FrameSchedule, system: impl IntoSystemConfigs<M>) {
        if let Some(schedule) = self.get_schedule_mut(&stage) {
            schedule.add_systems(system);
        }
    }

    /// Run all stages in order for one frame and return the number of fixed
    /// steps taken.
    ///
    /// When the step cap is hit the remaining backlog is dropped, so a long
    /// stall slows the simulation down instead of snowballing.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) -> u32 {
        self.run_stage(FrameSchedule::PreUpdate, world);

        self.fixed_accumulator += frame_dt;
        let mut steps: u32 = 0;
        while self.step_due() && steps < self.max_fixed_steps {
            self.run_stage(FrameSchedule::FixedUpdate, world);
            self.fixed_accumulator = (self.fixed_accumulator - self.fixed_dt).max(0.0);
            steps += 1;
        }
        if self.step_due() {
            warn!(
                "Dropping {:.1}ms of simulation after {steps} fixed steps",
                self.fixed_accumulator * 1000.0
            );
            self.fixed_accumulator %= self.fixed_dt;
        }

        self.run_stage(FrameSchedule::LateUpdate, world);
        steps
    }

    fn step_due(&self) -> bool {
        self.fixed_accumulator + STEP_EPSILON >= self.fixed_dt
    }

    /// Returns the current fixed-update accumulator value in seconds.
    pub fn fixed_accumulator(&self) -> f64 {
        self.fixed_accumulator
    }

    /// Returns the fixed timestep in seconds.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Returns a mutable reference to the schedule for a given stage.
    pub fn get_schedule_mut(&mut self, stage: &FrameSchedule) -> Option<&mut Schedule> {
        self.schedules
            .iter_mut()
            .find(|(label, _)| label == stage)
            .map(|(_, schedule)| schedule)
    }

    fn run_stage(&mut self, target: FrameSchedule, world: &mut World) {
        if let Some(schedule) = self.get_schedule_mut(&target) {
            schedule.run(world);
        }
    }
}
