//! Animation-state outputs driven by locomotion.

use std::collections::HashMap;

/// Bool signal: movement input above the walk threshold.
pub const IS_WALKING: &str = "isWalking";
/// Bool signal: the character is airborne.
pub const IS_JUMPING: &str = "isJumping";
/// Bool signal: sprint is active.
pub const IS_SPRINTING: &str = "isSprinting";
/// Trigger fired on an attack press.
pub const ATTACK: &str = "attack";

/// Receiver of animation parameters. Fire-and-forget.
pub trait AnimationSink {
    /// Sets a named boolean parameter.
    fn set_bool(&mut self, name: &'static str, value: bool);
    /// Fires a named one-shot trigger.
    fn trigger(&mut self, name: &'static str);
}

/// Records the latest value of each bool and queues triggers until drained.
#[derive(Debug, Default, Clone)]
pub struct AnimationSignals {
    bools: HashMap<&'static str, bool>,
    triggers: Vec<&'static str>,
}

impl AnimationSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written for `name`, `false` if never written.
    pub fn get(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Triggers fired since the last drain.
    pub fn pending_triggers(&self) -> &[&'static str] {
        &self.triggers
    }

    /// Takes and clears the queued triggers.
    pub fn drain_triggers(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.triggers)
    }
}

impl AnimationSink for AnimationSignals {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    fn trigger(&mut self, name: &'static str) {
        self.triggers.push(name);
    }
}
