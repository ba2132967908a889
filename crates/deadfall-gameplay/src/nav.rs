//! Path-following collaborator contract.
//!
//! The behavior core never touches pathfinding internals; it drives an opaque
//! [`Navigator`] that moves the entity toward a destination and answers a few
//! queries about progress. A missing or disabled navigator degrades the tick
//! to a no-op rather than failing.

use serde::{Deserialize, Serialize};

/// Path-following service wrapping engine navigation for one entity.
pub trait Navigator {
    /// Current world position of the entity.
    fn position(&self) -> (f32, f32);

    /// Sets the point the entity should move toward.
    fn set_destination(&mut self, point: (f32, f32));

    /// Halts movement, keeping the current destination.
    fn stop(&mut self);

    /// Resumes movement toward the current destination.
    fn resume(&mut self);

    /// Distance left along the current path.
    fn remaining_distance(&self) -> f32;

    /// Current velocity vector.
    fn velocity(&self) -> (f32, f32);

    /// Sets the movement speed in units per second.
    fn set_speed(&mut self, speed: f32);

    /// Snaps a candidate point onto navigable ground, if any lies within
    /// `max_distance` of it.
    fn sample_point(&self, point: (f32, f32), max_distance: f32) -> Option<(f32, f32)>;

    /// Permanently disables navigation (death path).
    fn disable(&mut self);
}

/// Category of a tracked target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetTag {
    /// The player character
    Player,
    /// A food object (bait, carcass)
    Food,
}

/// Read-only view of the current target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// World position of the target
    pub position: (f32, f32),
    /// What kind of thing the target is
    pub tag: TargetTag,
}

impl TargetInfo {
    /// Creates a player target at a position.
    #[must_use]
    pub const fn player(position: (f32, f32)) -> Self {
        Self {
            position,
            tag: TargetTag::Player,
        }
    }

    /// Creates a food target at a position.
    #[must_use]
    pub const fn food(position: (f32, f32)) -> Self {
        Self {
            position,
            tag: TargetTag::Food,
        }
    }
}

/// Mock navigator for testing.
///
/// Optionally integrates straight-line movement toward the destination when
/// [`MockNavigator::step`] is called, so tests can simulate pursuit without a
/// real pathfinder.
#[derive(Debug, Clone)]
pub struct MockNavigator {
    position: (f32, f32),
    destination: Option<(f32, f32)>,
    stopped: bool,
    disabled: bool,
    speed: f32,
    velocity: (f32, f32),
    /// Whether `sample_point` succeeds
    pub sampling_ok: bool,
    /// Number of `sample_point` calls observed
    pub sample_calls: std::cell::Cell<usize>,
    /// Every destination ever set
    pub destinations: Vec<(f32, f32)>,
}

impl MockNavigator {
    /// Creates a mock navigator at a starting position.
    #[must_use]
    pub fn new(position: (f32, f32)) -> Self {
        Self {
            position,
            destination: None,
            stopped: false,
            disabled: false,
            speed: 1.0,
            velocity: (0.0, 0.0),
            sampling_ok: true,
            sample_calls: std::cell::Cell::new(0),
            destinations: Vec::new(),
        }
    }

    /// Makes every `sample_point` call fail.
    #[must_use]
    pub fn with_sampling_failure(mut self) -> Self {
        self.sampling_ok = false;
        self
    }

    /// Returns the last destination set, if any.
    #[must_use]
    pub fn destination(&self) -> Option<(f32, f32)> {
        self.destination
    }

    /// Whether movement is currently halted.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether navigation has been disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Integrates straight-line movement toward the destination for `dt`
    /// seconds.
    pub fn step(&mut self, dt: f32) {
        if self.stopped || self.disabled {
            self.velocity = (0.0, 0.0);
            return;
        }
        let Some(dest) = self.destination else {
            self.velocity = (0.0, 0.0);
            return;
        };
        let dx = dest.0 - self.position.0;
        let dy = dest.1 - self.position.1;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < 1e-4 {
            self.velocity = (0.0, 0.0);
            return;
        }
        let step = (self.speed * dt).min(dist);
        let (nx, ny) = (dx / dist, dy / dist);
        self.position.0 += nx * step;
        self.position.1 += ny * step;
        self.velocity = (nx * self.speed, ny * self.speed);
    }
}

impl Navigator for MockNavigator {
    fn position(&self) -> (f32, f32) {
        self.position
    }

    fn set_destination(&mut self, point: (f32, f32)) {
        if self.disabled {
            return;
        }
        self.destination = Some(point);
        self.destinations.push(point);
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.velocity = (0.0, 0.0);
    }

    fn resume(&mut self) {
        if !self.disabled {
            self.stopped = false;
        }
    }

    fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(dest) => {
                let dx = dest.0 - self.position.0;
                let dy = dest.1 - self.position.1;
                (dx * dx + dy * dy).sqrt()
            }
            None => 0.0,
        }
    }

    fn velocity(&self) -> (f32, f32) {
        self.velocity
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn sample_point(&self, point: (f32, f32), _max_distance: f32) -> Option<(f32, f32)> {
        self.sample_calls.set(self.sample_calls.get() + 1);
        if self.sampling_ok {
            Some(point)
        } else {
            None
        }
    }

    fn disable(&mut self) {
        self.disabled = true;
        self.stopped = true;
        self.velocity = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_navigator_moves_toward_destination() {
        let mut nav = MockNavigator::new((0.0, 0.0));
        nav.set_speed(2.0);
        nav.set_destination((10.0, 0.0));
        nav.step(1.0);
        assert!((nav.position().0 - 2.0).abs() < 1e-5);
        assert!(nav.velocity().0 > 0.0);
    }

    #[test]
    fn test_mock_navigator_stop_halts_movement() {
        let mut nav = MockNavigator::new((0.0, 0.0));
        nav.set_destination((10.0, 0.0));
        nav.stop();
        nav.step(1.0);
        assert_eq!(nav.position(), (0.0, 0.0));
        assert_eq!(nav.velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_mock_navigator_disable_is_permanent() {
        let mut nav = MockNavigator::new((0.0, 0.0));
        nav.disable();
        nav.resume();
        nav.set_destination((5.0, 5.0));
        nav.step(1.0);
        assert_eq!(nav.position(), (0.0, 0.0));
        assert!(nav.destination().is_none());
    }

    #[test]
    fn test_mock_navigator_remaining_distance() {
        let mut nav = MockNavigator::new((0.0, 0.0));
        nav.set_destination((3.0, 4.0));
        assert!((nav.remaining_distance() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_mock_navigator_sampling_failure() {
        let nav = MockNavigator::new((0.0, 0.0)).with_sampling_failure();
        assert!(nav.sample_point((1.0, 1.0), 2.0).is_none());
    }

    #[test]
    fn test_target_info_constructors() {
        let p = TargetInfo::player((1.0, 2.0));
        assert_eq!(p.tag, TargetTag::Player);
        let f = TargetInfo::food((0.0, 0.0));
        assert_eq!(f.tag, TargetTag::Food);
    }
}
