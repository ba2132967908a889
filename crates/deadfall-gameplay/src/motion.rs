//! Patrol and wander motion for agents whose target is out of detection range.
//!
//! Two styles exist: cyclic waypoint routes (zombies placed along a path) and
//! radius wander (wolves roaming around their current position). Both drive
//! the navigator only; actual movement stays inside the path-follow service.

use serde::{Deserialize, Serialize};

use crate::nav::Navigator;
use crate::rng::GameRng;

/// Retry budget when sampling a reachable wander point.
pub const SAMPLE_RETRIES: usize = 30;

/// Distance at which a wander point counts as reached.
pub const ARRIVE_DISTANCE: f32 = 1.5;

/// Snap distance handed to the navigator when sampling.
const SNAP_DISTANCE: f32 = 2.0;

/// Calculates distance between two points.
pub(crate) fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Calculates angle from position a to b.
pub(crate) fn direction_angle(from: (f32, f32), to: (f32, f32)) -> f32 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    dy.atan2(dx)
}

/// Cyclic waypoint route with a dwell pause at each stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRoute {
    points: Vec<(f32, f32)>,
    current: usize,
    dwell: f32,
    threshold: f32,
    wait_timer: f32,
    started: bool,
}

impl WaypointRoute {
    /// Creates a route over the given points.
    #[must_use]
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self {
            points,
            current: 0,
            dwell: 2.0,
            threshold: 0.5,
            wait_timer: 0.0,
            started: false,
        }
    }

    /// Sets the dwell time at each waypoint.
    #[must_use]
    pub const fn with_dwell(mut self, dwell: f32) -> Self {
        self.dwell = dwell;
        self
    }

    /// Sets the arrival threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Index of the waypoint currently targeted.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Advances the route: waits at a reached waypoint until the dwell timer
    /// elapses, then moves on to the next point (cyclic).
    pub fn tick<N: Navigator + ?Sized>(&mut self, dt: f32, nav: &mut N) {
        if self.points.is_empty() {
            return;
        }
        if !self.started {
            self.started = true;
            nav.set_destination(self.points[self.current % self.points.len()]);
            return;
        }
        if nav.remaining_distance() < self.threshold {
            self.wait_timer += dt;
            if self.wait_timer >= self.dwell {
                self.current = (self.current + 1) % self.points.len();
                nav.set_destination(self.points[self.current]);
                self.wait_timer = 0.0;
            }
        }
    }
}

/// Random wander within a radius, re-targeted on a dwell timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanderState {
    radius: f32,
    dwell_min: f32,
    dwell_max: f32,
    timer: f32,
    target: Option<(f32, f32)>,
}

impl WanderState {
    /// Creates a wander state over the given radius.
    #[must_use]
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            dwell_min: 5.0,
            dwell_max: 10.0,
            timer: 0.0,
            target: None,
        }
    }

    /// Sets the dwell timer window.
    #[must_use]
    pub const fn with_dwell(mut self, min: f32, max: f32) -> Self {
        self.dwell_min = min;
        self.dwell_max = max;
        self
    }

    /// Current wander destination, if one has been picked.
    #[must_use]
    pub const fn target(&self) -> Option<(f32, f32)> {
        self.target
    }

    /// Advances the wander clock, re-targeting when the current point is
    /// reached or the dwell timer runs out.
    ///
    /// Sampling failure is non-fatal: the previous destination stays active
    /// and the timer still resets.
    pub fn tick<N: Navigator + ?Sized>(
        &mut self,
        dt: f32,
        position: (f32, f32),
        nav: &mut N,
        rng: &mut GameRng,
    ) {
        self.timer -= dt;
        let arrived = self
            .target
            .map_or(true, |t| distance(position, t) <= ARRIVE_DISTANCE);
        if arrived || self.timer <= 0.0 {
            if let Some(point) = sample_reachable(position, self.radius, nav, rng) {
                self.target = Some(point);
                nav.set_destination(point);
            }
            self.timer = rng.range(self.dwell_min, self.dwell_max);
        }
    }
}

/// Samples a reachable point within `radius` of `origin`, retrying up to
/// [`SAMPLE_RETRIES`] times before giving up.
fn sample_reachable<N: Navigator + ?Sized>(
    origin: (f32, f32),
    radius: f32,
    nav: &N,
    rng: &mut GameRng,
) -> Option<(f32, f32)> {
    for _ in 0..SAMPLE_RETRIES {
        let angle = rng.next_f32() * std::f32::consts::TAU;
        let dist = rng.next_f32() * radius;
        let candidate = (
            origin.0 + angle.cos() * dist,
            origin.1 + angle.sin() * dist,
        );
        if let Some(point) = nav.sample_point(candidate, SNAP_DISTANCE) {
            return Some(point);
        }
    }
    None
}

/// How an agent moves when its target is out of detection range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatrolMode {
    /// Stand in place
    Hold,
    /// Follow a cyclic waypoint route
    Waypoints(WaypointRoute),
    /// Roam random points within a radius
    Wander(WanderState),
}

impl PatrolMode {
    /// Advances whichever patrol style is active.
    pub fn tick<N: Navigator + ?Sized>(
        &mut self,
        dt: f32,
        position: (f32, f32),
        nav: &mut N,
        rng: &mut GameRng,
    ) {
        match self {
            Self::Hold => {}
            Self::Waypoints(route) => route.tick(dt, nav),
            Self::Wander(wander) => wander.tick(dt, position, nav, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::MockNavigator;

    #[test]
    fn test_waypoint_route_sets_first_destination() {
        let mut route = WaypointRoute::new(vec![(10.0, 0.0), (0.0, 10.0)]);
        let mut nav = MockNavigator::new((0.0, 0.0));
        route.tick(0.1, &mut nav);
        assert_eq!(nav.destination(), Some((10.0, 0.0)));
    }

    #[test]
    fn test_waypoint_route_advances_after_dwell() {
        let mut route = WaypointRoute::new(vec![(1.0, 0.0), (0.0, 1.0)]).with_dwell(2.0);
        let mut nav = MockNavigator::new((0.0, 0.0));
        nav.set_speed(10.0);
        route.tick(0.1, &mut nav);

        // Walk to the first waypoint.
        nav.step(1.0);
        assert!(nav.remaining_distance() < 0.5);

        // Dwell has not elapsed yet: still targeting waypoint 0.
        route.tick(1.0, &mut nav);
        assert_eq!(route.current_index(), 0);

        // Dwell elapses: advance to waypoint 1.
        route.tick(1.5, &mut nav);
        assert_eq!(route.current_index(), 1);
        assert_eq!(nav.destination(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_waypoint_route_cycles() {
        let mut route = WaypointRoute::new(vec![(1.0, 0.0), (2.0, 0.0)]).with_dwell(0.0);
        let mut nav = MockNavigator::new((0.0, 0.0));
        nav.set_speed(100.0);
        route.tick(0.1, &mut nav);
        for _ in 0..2 {
            nav.step(1.0);
            route.tick(0.1, &mut nav);
        }
        // After visiting both waypoints the route wraps back to index 0.
        assert_eq!(route.current_index(), 0);
    }

    #[test]
    fn test_empty_route_is_noop() {
        let mut route = WaypointRoute::new(Vec::new());
        let mut nav = MockNavigator::new((0.0, 0.0));
        route.tick(1.0, &mut nav);
        assert!(nav.destination().is_none());
    }

    #[test]
    fn test_wander_picks_target_within_radius() {
        let mut wander = WanderState::new(10.0);
        let mut nav = MockNavigator::new((0.0, 0.0));
        let mut rng = GameRng::new(42);

        wander.tick(0.1, (0.0, 0.0), &mut nav, &mut rng);

        let target = wander.target().expect("target picked");
        assert!(distance((0.0, 0.0), target) <= 10.0 + 1e-4);
        assert_eq!(nav.destination(), Some(target));
    }

    #[test]
    fn test_wander_retargets_on_arrival() {
        let mut wander = WanderState::new(10.0).with_dwell(100.0, 100.0);
        let mut nav = MockNavigator::new((0.0, 0.0));
        let mut rng = GameRng::new(42);

        wander.tick(0.1, (0.0, 0.0), &mut nav, &mut rng);
        let first = wander.target().expect("target picked");

        // Standing on the target forces a re-pick even with a long dwell.
        wander.tick(0.1, first, &mut nav, &mut rng);
        assert!(wander.target().is_some());
        assert!(nav.destinations.len() >= 2);
    }

    #[test]
    fn test_wander_sampling_failure_keeps_destination() {
        let mut wander = WanderState::new(10.0).with_dwell(0.0, 0.0);
        let mut nav = MockNavigator::new((0.0, 0.0));
        let mut rng = GameRng::new(42);

        // First pick succeeds.
        wander.tick(0.1, (0.0, 0.0), &mut nav, &mut rng);
        let first = wander.target().expect("target picked");

        // Every subsequent sample fails; destination must be retained.
        nav.sampling_ok = false;
        nav.sample_calls.set(0);
        wander.tick(1.0, (50.0, 50.0), &mut nav, &mut rng);

        assert_eq!(nav.sample_calls.get(), SAMPLE_RETRIES);
        assert_eq!(wander.target(), Some(first));
        assert_eq!(nav.destination(), Some(first));
    }

    #[test]
    fn test_wander_deterministic_under_seed() {
        let run = |seed: u64| {
            let mut wander = WanderState::new(10.0);
            let mut nav = MockNavigator::new((0.0, 0.0));
            let mut rng = GameRng::new(seed);
            wander.tick(0.1, (0.0, 0.0), &mut nav, &mut rng);
            wander.target()
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn test_patrol_mode_hold_is_noop() {
        let mut mode = PatrolMode::Hold;
        let mut nav = MockNavigator::new((0.0, 0.0));
        let mut rng = GameRng::new(1);
        mode.tick(1.0, (0.0, 0.0), &mut nav, &mut rng);
        assert!(nav.destination().is_none());
    }
}
