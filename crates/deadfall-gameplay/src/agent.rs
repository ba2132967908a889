//! Hostile agent behavior controller.
//!
//! One controller per hostile entity (zombie or wolf). Each tick reads the
//! distance to the target, classifies it into a behavior zone
//! (attack / chase / patrol), and executes that zone's action, possibly
//! entering a timed sub-action that locks the state machine until it
//! finishes. Death is terminal and cancels whatever is in flight.
//!
//! Collaborators (navigator, animation sink, damage receiver) are injected at
//! the call sites; the controller holds no engine references.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use deadfall_common::EntityId;

use crate::action::{ActionKind, SubAction};
use crate::animation::{param, AnimationSink};
use crate::motion::{direction_angle, distance, PatrolMode, WanderState};
use crate::nav::{Navigator, TargetInfo, TargetTag};
use crate::player::DamageReceiver;
use crate::rng::GameRng;
use crate::variant::{AgentVariant, HitLocation};

/// Behavior zone derived from distance-to-target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Within melee reach
    Attack,
    /// Within detection radius
    Chase,
    /// Out of detection range
    Patrol,
}

/// Classifies distance-to-target into a behavior zone.
///
/// Strict priority order, evaluated every tick, no hysteresis. The attack
/// boundary is inclusive: at exactly attack range the agent attacks.
#[must_use]
pub fn classify_zone(dist: f32, attack_range: f32, detection_radius: f32) -> Zone {
    if dist <= attack_range {
        Zone::Attack
    } else if dist <= detection_radius {
        Zone::Chase
    } else {
        Zone::Patrol
    }
}

/// State of the behavior machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Following waypoints or wandering; target out of range
    Patrol,
    /// Closing on the target
    Chase,
    /// In reach, waiting on the attack cooldown
    Attack,
    /// Running a timed sub-action; no transitions until it ends
    Locked(SubAction),
    /// Terminal
    Dead,
}

impl BehaviorState {
    /// Whether a sub-action currently owns control.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Whether the agent is dead.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Outcome of an external hit call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Absorbed without effect (dead, or locked for variants that ignore hits)
    Ignored,
    /// Damage applied; the agent survived
    Damaged(f32),
    /// The hit killed the agent
    Died,
}

/// Per-agent tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Radius at which the agent notices its target
    pub detection_radius: f32,
    /// Base melee reach (before the difficulty ramp)
    pub attack_range: f32,
    /// Base movement speed (before the difficulty ramp)
    pub speed: f32,
    /// Minimum delay between attack activations
    pub attack_cooldown: f32,
    /// Damage dealt by a bite
    pub bite_damage: f32,
    /// Damage dealt by a melee swing
    pub melee_damage: f32,
    /// Exponential turn smoothing rate while facing the target
    pub turn_rate: f32,
    /// Fraction of the detection radius where walk flips to run
    pub run_split: f32,
}

impl AgentConfig {
    /// Default tunables for a variant.
    #[must_use]
    pub fn for_variant(variant: AgentVariant) -> Self {
        Self {
            detection_radius: variant.default_detection_radius(),
            attack_range: variant.default_attack_range(),
            speed: variant.default_speed(),
            attack_cooldown: variant.attack_cooldown(),
            bite_damage: if variant.is_zombie() { 20.0 } else { 10.0 },
            melee_damage: 10.0,
            turn_rate: 5.0,
            run_split: 0.5,
        }
    }

    /// Sets the detection radius.
    #[must_use]
    pub const fn with_detection_radius(mut self, radius: f32) -> Self {
        self.detection_radius = radius;
        self
    }

    /// Sets the base attack range.
    #[must_use]
    pub const fn with_attack_range(mut self, range: f32) -> Self {
        self.attack_range = range;
        self
    }

    /// Sets the base speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the attack cooldown.
    #[must_use]
    pub const fn with_attack_cooldown(mut self, cooldown: f32) -> Self {
        self.attack_cooldown = cooldown;
        self
    }

    /// Sets the bite damage.
    #[must_use]
    pub const fn with_bite_damage(mut self, damage: f32) -> Self {
        self.bite_damage = damage;
        self
    }
}

/// Hostile agent behavior controller, one per entity.
#[derive(Debug, Clone)]
pub struct HostileAgent {
    id: EntityId,
    variant: AgentVariant,
    config: AgentConfig,
    position: (f32, f32),
    facing: f32,
    health: f32,
    max_health: f32,
    state: BehaviorState,
    last_action_time: Option<f32>,
    session_time: f32,
    has_stood_up: bool,
    patrol: PatrolMode,
    rng: GameRng,
    collider_enabled: bool,
    effective_speed: f32,
    effective_range: f32,
}

impl HostileAgent {
    /// Creates an agent with variant-default tunables.
    #[must_use]
    pub fn new(variant: AgentVariant, position: (f32, f32), rng: GameRng) -> Self {
        Self::with_config(variant, position, AgentConfig::for_variant(variant), rng)
    }

    /// Creates an agent with explicit tunables.
    #[must_use]
    pub fn with_config(
        variant: AgentVariant,
        position: (f32, f32),
        config: AgentConfig,
        rng: GameRng,
    ) -> Self {
        let patrol = match variant {
            AgentVariant::Wolf => PatrolMode::Wander(WanderState::new(10.0)),
            AgentVariant::Walker | AgentVariant::Crawler => PatrolMode::Hold,
        };
        Self {
            id: EntityId::new(),
            variant,
            position,
            facing: 0.0,
            health: variant.base_health(),
            max_health: variant.base_health(),
            state: BehaviorState::Patrol,
            last_action_time: None,
            session_time: 0.0,
            has_stood_up: !matches!(variant, AgentVariant::Crawler),
            patrol,
            rng,
            collider_enabled: true,
            effective_speed: config.speed,
            effective_range: config.attack_range,
            config,
        }
    }

    /// Sets starting (and maximum) health.
    #[must_use]
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    /// Sets the patrol style.
    #[must_use]
    pub fn with_patrol(mut self, patrol: PatrolMode) -> Self {
        self.patrol = patrol;
        self
    }

    /// Seeds the session clock (agents spawned mid-session ramp from the
    /// current session time, not from zero).
    #[must_use]
    pub const fn with_session_time(mut self, session_time: f32) -> Self {
        self.session_time = session_time;
        self
    }

    /// Entity ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Agent variant.
    #[must_use]
    pub const fn variant(&self) -> AgentVariant {
        self.variant
    }

    /// Current behavior state.
    #[must_use]
    pub const fn state(&self) -> &BehaviorState {
        &self.state
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Last position read from the navigator.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Facing angle in radians.
    #[must_use]
    pub const fn facing(&self) -> f32 {
        self.facing
    }

    /// Whether the agent is dead.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    /// Whether the collision response is still active.
    #[must_use]
    pub const fn collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    /// Whether a crawler has stood up (always true for other variants).
    #[must_use]
    pub const fn has_stood_up(&self) -> bool {
        self.has_stood_up
    }

    /// Movement speed after the difficulty ramp.
    #[must_use]
    pub const fn effective_speed(&self) -> f32 {
        self.effective_speed
    }

    /// Attack range after the difficulty ramp.
    #[must_use]
    pub const fn effective_range(&self) -> f32 {
        self.effective_range
    }

    /// Tunables.
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Overrides base speed and attack range (spawner customization).
    pub fn set_custom_stats(&mut self, speed: f32, attack_range: f32) {
        self.config.speed = speed;
        self.config.attack_range = attack_range;
        self.effective_speed = speed;
        self.effective_range = attack_range;
    }

    /// Writes the variant's initial animator parameters (spawn time).
    pub fn init_animator<A: AnimationSink + ?Sized>(&self, anim: &mut A) {
        match self.variant {
            AgentVariant::Walker | AgentVariant::Crawler => {
                let crawler = matches!(self.variant, AgentVariant::Crawler);
                anim.set_bool(param::CRAWLER, crawler);
                anim.set_bool(param::CRAWL, crawler);
                anim.set_bool(param::EAT, false);
                anim.set_bool(param::BITE, false);
                anim.set_bool(param::RUN, false);
                anim.set_bool(param::WALK, !crawler);
            }
            AgentVariant::Wolf => {
                anim.set_float(param::SPEED, 0.0);
                anim.set_bool(param::IS_WALKING, true);
                anim.set_bool(param::IS_CROUCHING, false);
                anim.set_bool(param::IS_SITTING, false);
            }
        }
    }

    /// Advances the behavior machine by `dt` seconds.
    ///
    /// A locked sub-action owns control until it finishes or the agent dies;
    /// zone classification is skipped entirely for those ticks. A missing
    /// target degrades the tick to a halt, not a failure.
    pub fn tick<N, A, D>(
        &mut self,
        dt: f32,
        target: Option<&TargetInfo>,
        nav: &mut N,
        anim: &mut A,
        victim: &mut D,
    ) where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
        D: DamageReceiver + ?Sized,
    {
        if self.state.is_dead() {
            return;
        }
        self.session_time += dt;
        self.position = nav.position();

        if self.state.is_locked() {
            self.advance_locked(dt, target, nav, anim, victim);
            return;
        }

        let Some(target) = target else {
            nav.stop();
            anim.set_float(param::SPEED, 0.0);
            return;
        };

        // Difficulty ramp, recomputed every tick from session time.
        self.effective_speed = self
            .variant
            .effective_speed(self.config.speed, self.session_time);
        self.effective_range = self
            .variant
            .effective_range(self.config.attack_range, self.session_time);
        nav.set_speed(self.effective_speed);

        let dist = distance(self.position, target.position);
        match classify_zone(dist, self.effective_range, self.config.detection_radius) {
            Zone::Attack => self.attack_zone(dt, target, nav, anim),
            Zone::Chase => self.chase_zone(target, nav, anim),
            Zone::Patrol => self.patrol_zone(dt, nav, anim),
        }
    }

    /// Applies an external hit.
    ///
    /// Dead agents absorb everything. A critical-location hit kills variants
    /// with a weak point even while locked; otherwise zombie variants ignore
    /// hits for the duration of a sub-action. Wolves take flat damage with no
    /// critical path and no stagger.
    pub fn hit<N, A>(
        &mut self,
        amount: f32,
        location: HitLocation,
        nav: &mut N,
        anim: &mut A,
    ) -> HitOutcome
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        if self.state.is_dead() {
            return HitOutcome::Ignored;
        }

        if self.variant.has_critical_location() && location == HitLocation::Head {
            self.die(nav, anim);
            return HitOutcome::Died;
        }

        if self.state.is_locked() && self.variant.ignores_hits_while_locked() {
            return HitOutcome::Ignored;
        }

        let damage = if self.variant.is_zombie() {
            amount * location.damage_multiplier()
        } else {
            amount
        };
        self.health = (self.health - damage).max(0.0);
        debug!(
            agent = self.id.raw(),
            damage,
            health = self.health,
            "agent damaged"
        );

        if self.health <= 0.0 {
            self.die(nav, anim);
            return HitOutcome::Died;
        }

        if self.variant.staggers_on_hit() {
            // Stagger lock; deliberately leaves the attack cooldown untouched.
            anim.set_bool(param::BITE, false);
            self.start_action(SubAction::new(ActionKind::HitReaction, 0.8), nav, anim);
        }
        HitOutcome::Damaged(damage)
    }

    /// Kills the agent. Idempotent: a second call is a no-op.
    pub fn die<N, A>(&mut self, nav: &mut N, anim: &mut A)
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        if self.state.is_dead() {
            return;
        }
        // Cancels any in-flight sub-action.
        self.state = BehaviorState::Dead;
        self.health = 0.0;
        self.collider_enabled = false;
        nav.stop();
        nav.disable();

        match self.variant {
            AgentVariant::Walker | AgentVariant::Crawler => {
                let death = if self.rng.chance(0.5) {
                    param::DEATH_1
                } else {
                    param::DEATH_2
                };
                anim.trigger(death);
                anim.set_bool(param::CRAWL, false);
                anim.set_bool(param::WALK, false);
                anim.set_bool(param::EAT, false);
                anim.set_bool(param::BITE, false);
            }
            AgentVariant::Wolf => {
                anim.set_float(param::SPEED, 0.0);
                anim.set_bool(param::IS_WALKING, false);
                anim.set_bool(param::IS_CROUCHING, false);
                anim.set_bool(param::IS_SITTING, true);
            }
        }
        info!(
            agent = self.id.raw(),
            variant = self.variant.display_name(),
            "agent died"
        );
    }

    // --- zone handlers ---

    fn attack_zone<N, A>(&mut self, dt: f32, target: &TargetInfo, nav: &mut N, anim: &mut A)
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        nav.stop();
        self.face_toward(target.position, dt);

        if target.tag == TargetTag::Food {
            self.start_action(SubAction::new(ActionKind::Eat, 2.0), nav, anim);
            return;
        }

        if matches!(self.variant, AgentVariant::Crawler) && !self.has_stood_up {
            self.start_action(SubAction::new(ActionKind::StandUp, 2.5), nav, anim);
            return;
        }

        if self.cooldown_ready() {
            self.start_attack(nav, anim);
        } else {
            self.state = BehaviorState::Attack;
            anim.set_float(param::SPEED, 0.0);
        }
    }

    fn chase_zone<N, A>(&mut self, target: &TargetInfo, nav: &mut N, anim: &mut A)
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        nav.resume();
        nav.set_destination(target.position);

        let dist = distance(self.position, target.position);
        let run_split = self.config.detection_radius * self.config.run_split;
        if self.variant.is_zombie() {
            // Walk animation speed mirrors the navigator's real velocity.
            let (vx, vy) = nav.velocity();
            anim.set_float(param::SPEED, (vx * vx + vy * vy).sqrt());
            if self.has_stood_up {
                let should_run = dist <= run_split && dist > self.effective_range;
                anim.set_bool(param::RUN, should_run);
                anim.set_bool(param::WALK, !should_run);
            }
        } else {
            // Wolf: walk outside half the detection radius, run inside it.
            if dist > run_split {
                anim.set_float(param::SPEED, 0.0);
                anim.set_bool(param::IS_WALKING, true);
            } else {
                anim.set_float(param::SPEED, 1.0);
                anim.set_bool(param::IS_WALKING, false);
            }
            anim.set_bool(param::IS_CROUCHING, false);
            anim.set_bool(param::IS_SITTING, false);
        }
        self.state = BehaviorState::Chase;
    }

    fn patrol_zone<N, A>(&mut self, dt: f32, nav: &mut N, anim: &mut A)
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        nav.resume();
        self.patrol.tick(dt, self.position, nav, &mut self.rng);

        let (vx, vy) = nav.velocity();
        let speed = (vx * vx + vy * vy).sqrt();
        if self.variant.is_zombie() {
            anim.set_float(param::SPEED, speed);
            anim.set_bool(param::RUN, false);
            anim.set_bool(param::WALK, speed > 0.1);
        } else {
            anim.set_float(param::SPEED, 0.0);
            anim.set_bool(param::IS_WALKING, true);
            anim.set_bool(param::IS_CROUCHING, false);
            anim.set_bool(param::IS_SITTING, false);
        }
        self.state = BehaviorState::Patrol;
    }

    // --- sub-action machinery ---

    /// Picks and starts one attack action, stamping the cooldown clock.
    fn start_attack<N, A>(&mut self, nav: &mut N, anim: &mut A)
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        self.last_action_time = Some(self.session_time);
        let action = match self.variant {
            // Wolves always bite.
            AgentVariant::Wolf => {
                SubAction::new(ActionKind::Bite, 0.5).with_payload(0.3, self.config.bite_damage)
            }
            // Upright zombies pick between a bite and a melee swing.
            AgentVariant::Walker | AgentVariant::Crawler => {
                if self.rng.chance(0.5) {
                    SubAction::new(ActionKind::MeleeAttack, 1.0)
                        .with_payload(0.5, self.config.melee_damage)
                } else {
                    SubAction::new(ActionKind::Bite, 2.5).with_payload(1.25, self.config.bite_damage)
                }
            }
        };
        self.start_action(action, nav, anim);
    }

    /// Enters the `Locked` state and writes the action's animator parameters.
    fn start_action<N, A>(&mut self, action: SubAction, nav: &mut N, anim: &mut A)
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        nav.stop();
        match action.kind() {
            ActionKind::Bite => {
                if self.variant.is_zombie() {
                    anim.set_bool(param::BITE, true);
                } else {
                    anim.set_float(param::SPEED, 0.0);
                    anim.set_bool(param::IS_WALKING, false);
                    anim.set_bool(param::IS_CROUCHING, true);
                }
            }
            ActionKind::MeleeAttack => anim.trigger(param::ATTACK),
            ActionKind::StandUp => anim.trigger(param::WAKE),
            ActionKind::HitReaction => anim.trigger(param::HIT),
            ActionKind::Eat => anim.set_bool(param::EAT, true),
        }
        debug!(
            agent = self.id.raw(),
            kind = action.kind().display_name(),
            "sub-action started"
        );
        self.state = BehaviorState::Locked(action);
    }

    /// Advances the in-flight sub-action; the locked action owns control.
    fn advance_locked<N, A, D>(
        &mut self,
        dt: f32,
        target: Option<&TargetInfo>,
        nav: &mut N,
        anim: &mut A,
        victim: &mut D,
    ) where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
        D: DamageReceiver + ?Sized,
    {
        if let Some(t) = target {
            self.face_toward(t.position, dt);
        }

        let (kind, progress) = match &mut self.state {
            BehaviorState::Locked(sub) => (sub.kind(), sub.advance(dt)),
            _ => return,
        };

        if let Some(damage) = progress.fired {
            victim.take_damage(damage);
        }
        if progress.finished {
            self.finish_action(kind, target, nav, anim);
        }
    }

    /// Unlocks after a finished sub-action and applies its exit effects.
    fn finish_action<N, A>(
        &mut self,
        kind: ActionKind,
        target: Option<&TargetInfo>,
        nav: &mut N,
        anim: &mut A,
    ) where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        match kind {
            ActionKind::Bite => {
                if self.variant.is_zombie() {
                    anim.set_bool(param::BITE, false);
                } else {
                    anim.set_bool(param::IS_CROUCHING, false);
                }
            }
            ActionKind::MeleeAttack => anim.set_bool(param::BITE, false),
            ActionKind::StandUp => {
                self.has_stood_up = true;
                anim.set_bool(param::CRAWLER, false);
                anim.set_bool(param::CRAWL, false);
                anim.set_bool(param::WALK, true);
                debug!(agent = self.id.raw(), "crawler stood up");
            }
            ActionKind::HitReaction => {}
            ActionKind::Eat => anim.set_bool(param::EAT, false),
        }
        nav.resume();
        // Reclassified from scratch next tick.
        self.state = BehaviorState::Patrol;

        // Standing up chains directly into an attack evaluation.
        if kind == ActionKind::StandUp {
            if let Some(t) = target {
                if t.tag == TargetTag::Player
                    && distance(self.position, t.position) <= self.effective_range
                    && self.cooldown_ready()
                {
                    self.start_attack(nav, anim);
                }
            }
        }
    }

    fn cooldown_ready(&self) -> bool {
        self.last_action_time
            .map_or(true, |t| {
                self.session_time >= t + self.config.attack_cooldown
            })
    }

    /// Rotates toward a point with exponential smoothing, never snapping.
    fn face_toward(&mut self, point: (f32, f32), dt: f32) {
        let desired = direction_angle(self.position, point);
        let mut delta = desired - self.facing;
        while delta > std::f32::consts::PI {
            delta -= std::f32::consts::TAU;
        }
        while delta < -std::f32::consts::PI {
            delta += std::f32::consts::TAU;
        }
        let t = (self.config.turn_rate * dt).min(1.0);
        self.facing += delta * t;
    }
}
