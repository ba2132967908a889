//! Animation collaborator contract.
//!
//! The behavior core writes named parameters to an [`AnimationSink`] and never
//! reads animation state back; the sink has no influence on the state machine.

use std::collections::HashMap;

/// Animator parameter names written by the behavior core.
pub mod param {
    /// Movement speed (float)
    pub const SPEED: &str = "Speed";
    /// Walking (bool)
    pub const WALK: &str = "Walk";
    /// Running (bool)
    pub const RUN: &str = "Run";
    /// Biting (bool)
    pub const BITE: &str = "Bite";
    /// Crawling locomotion (bool)
    pub const CRAWL: &str = "Crawl";
    /// Crawler body type (bool)
    pub const CRAWLER: &str = "Crawler";
    /// Eating (bool)
    pub const EAT: &str = "Eat";
    /// Wolf walking (bool)
    pub const IS_WALKING: &str = "IsWalking";
    /// Wolf attack crouch (bool)
    pub const IS_CROUCHING: &str = "IsCrouching";
    /// Wolf death pose (bool)
    pub const IS_SITTING: &str = "IsSitting";
    /// Stagger pulse (trigger)
    pub const HIT: &str = "Hit";
    /// Melee swing pulse (trigger)
    pub const ATTACK: &str = "Attack";
    /// Stand-up pulse (trigger)
    pub const WAKE: &str = "Wake";
    /// Death animation A (trigger)
    pub const DEATH_1: &str = "Death1";
    /// Death animation B (trigger)
    pub const DEATH_2: &str = "Death2";
}

/// Sink for named animator parameter writes.
pub trait AnimationSink {
    /// Writes a float parameter.
    fn set_float(&mut self, name: &str, value: f32);

    /// Writes a bool parameter.
    fn set_bool(&mut self, name: &str, value: bool);

    /// Pulses a trigger parameter.
    fn trigger(&mut self, name: &str);
}

/// Animation sink that discards every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimator;

impl AnimationSink for NullAnimator {
    fn set_float(&mut self, _name: &str, _value: f32) {}
    fn set_bool(&mut self, _name: &str, _value: bool) {}
    fn trigger(&mut self, _name: &str) {}
}

/// Animation sink that records every write, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
    triggers: Vec<String>,
}

impl RecordingAnimator {
    /// Creates an empty recording animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last float value written for a parameter.
    #[must_use]
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Last bool value written for a parameter.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Every trigger pulsed, in order.
    #[must_use]
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Number of times a specific trigger was pulsed.
    #[must_use]
    pub fn trigger_count(&self, name: &str) -> usize {
        self.triggers.iter().filter(|t| *t == name).count()
    }
}

impl AnimationSink for RecordingAnimator {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_owned(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_owned(), value);
    }

    fn trigger(&mut self, name: &str) {
        self.triggers.push(name.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_animator_tracks_writes() {
        let mut anim = RecordingAnimator::new();
        anim.set_float(param::SPEED, 1.5);
        anim.set_bool(param::WALK, true);
        anim.trigger(param::HIT);
        anim.trigger(param::HIT);

        assert_eq!(anim.float(param::SPEED), Some(1.5));
        assert_eq!(anim.flag(param::WALK), Some(true));
        assert_eq!(anim.trigger_count(param::HIT), 2);
        assert_eq!(anim.float(param::WALK), None);
    }

    #[test]
    fn test_null_animator_accepts_writes() {
        let mut anim = NullAnimator;
        anim.set_float(param::SPEED, 0.0);
        anim.set_bool(param::RUN, false);
        anim.trigger(param::DEATH_1);
    }
}
