//! Zombie and wolf spawners.
//!
//! Spawners construct agents with initial stats and own everything the
//! behavior core does not: auto-spawn pacing, spawn placement (fixed points
//! or a ring around the player), and the corpse decay delay after death.
//! The two spawners keep separate stat policies; the zombie spawner ramps
//! difficulty by spawn index, the wolf spawner does not.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use deadfall_common::EntityId;

use crate::agent::{HitOutcome, HostileAgent};
use crate::animation::AnimationSink;
use crate::events::{EventBus, GameEvent};
use crate::nav::Navigator;
use crate::rng::GameRng;
use crate::variant::{AgentVariant, HitLocation};

/// Error types for spawner operations.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// Agent not found in the roster
    #[error("agent not found: {0:?}")]
    NotFound(EntityId),
    /// Nowhere to place a spawn
    #[error("no spawn points configured and no player position available")]
    NoSpawnLocation,
}

/// Result type for spawner operations.
pub type SpawnResult<T> = Result<T, SpawnError>;

/// Live hostile agents, keyed by entity ID.
#[derive(Debug, Default)]
pub struct AgentRoster {
    agents: AHashMap<EntityId, HostileAgent>,
}

impl AgentRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns whether there are no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Gets an agent.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&HostileAgent> {
        self.agents.get(&entity)
    }

    /// Gets a mutable agent.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut HostileAgent> {
        self.agents.get_mut(&entity)
    }

    /// Adds an agent, returning its ID.
    pub fn insert(&mut self, agent: HostileAgent) -> EntityId {
        let id = agent.id();
        self.agents.insert(id, agent);
        id
    }

    /// Removes an agent.
    pub fn remove(&mut self, entity: EntityId) -> SpawnResult<HostileAgent> {
        self.agents
            .remove(&entity)
            .ok_or(SpawnError::NotFound(entity))
    }

    /// Returns iterator over all agents.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &HostileAgent)> {
        self.agents.iter().map(|(&id, agent)| (id, agent))
    }

    /// Returns mutable iterator over all agents.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut HostileAgent)> {
        self.agents.iter_mut().map(|(&id, agent)| (id, agent))
    }

    /// Forwards a hit to an agent and publishes the outcome on the bus.
    pub fn apply_hit<N, A>(
        &mut self,
        entity: EntityId,
        amount: f32,
        location: HitLocation,
        nav: &mut N,
        anim: &mut A,
        bus: &EventBus,
    ) -> SpawnResult<HitOutcome>
    where
        N: Navigator + ?Sized,
        A: AnimationSink + ?Sized,
    {
        let agent = self
            .agents
            .get_mut(&entity)
            .ok_or(SpawnError::NotFound(entity))?;
        let outcome = agent.hit(amount, location, nav, anim);
        match outcome {
            HitOutcome::Damaged(damage) => {
                bus.publish(GameEvent::AgentDamaged {
                    entity_id: entity,
                    damage,
                });
            }
            HitOutcome::Died => {
                bus.publish(GameEvent::AgentDied { entity_id: entity });
            }
            HitOutcome::Ignored => {}
        }
        Ok(outcome)
    }
}

/// Placement and pacing configuration shared by both spawners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Fixed spawn points on the map
    pub spawn_points: Vec<(f32, f32)>,
    /// Ring radius for spawns placed around the player
    pub spawn_distance: f32,
    /// Whether the interval timer spawns automatically
    pub auto_spawn: bool,
    /// Seconds between automatic spawns
    pub spawn_interval: f32,
    /// Seconds a corpse stays in the roster after death
    pub decay_delay: f32,
    /// Seed for deterministic placement and stat rolls
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            spawn_points: Vec::new(),
            spawn_distance: 20.0,
            auto_spawn: false,
            spawn_interval: 5.0,
            decay_delay: 3.0,
            seed: 12345,
        }
    }
}

impl SpawnConfig {
    /// Creates a config with the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Sets fixed spawn points.
    #[must_use]
    pub fn with_spawn_points(mut self, points: Vec<(f32, f32)>) -> Self {
        self.spawn_points = points;
        self
    }

    /// Enables automatic spawning at an interval.
    #[must_use]
    pub const fn with_auto_spawn(mut self, interval: f32) -> Self {
        self.auto_spawn = true;
        self.spawn_interval = interval;
        self
    }
}

/// Picks a spawn position: on a ring around the player, or at a random fixed
/// spawn point.
fn pick_spawn_position(
    config: &SpawnConfig,
    rng: &mut GameRng,
    near_player: bool,
    player_pos: Option<(f32, f32)>,
) -> SpawnResult<(f32, f32)> {
    if near_player {
        if let Some(p) = player_pos {
            let angle = rng.next_f32() * std::f32::consts::TAU;
            return Ok((
                p.0 + angle.cos() * config.spawn_distance,
                p.1 + angle.sin() * config.spawn_distance,
            ));
        }
    }
    rng.choose(&config.spawn_points)
        .copied()
        .ok_or(SpawnError::NoSpawnLocation)
}

/// Starts decay timers for newly dead agents and reaps expired corpses.
fn sweep_corpses(
    decay: &mut AHashMap<EntityId, f32>,
    dt: f32,
    delay: f32,
    roster: &mut AgentRoster,
    bus: &EventBus,
) {
    for (id, agent) in roster.iter() {
        if agent.is_dead() && !decay.contains_key(&id) {
            decay.insert(id, delay);
        }
    }

    let mut expired = Vec::new();
    for (id, remaining) in decay.iter_mut() {
        *remaining -= dt;
        if *remaining <= 0.0 {
            expired.push(*id);
        }
    }
    for id in expired {
        decay.remove(&id);
        if roster.remove(id).is_ok() {
            bus.publish(GameEvent::AgentDecayed { entity_id: id });
            debug!(agent = id.raw(), "corpse decayed");
        }
    }
}

/// Spawner for zombie agents with an index-based difficulty table.
#[derive(Debug)]
pub struct ZombieSpawner {
    config: SpawnConfig,
    rng: GameRng,
    spawned_count: u32,
    spawn_timer: f32,
    session_time: f32,
    decay: AHashMap<EntityId, f32>,
}

impl ZombieSpawner {
    /// Creates a zombie spawner.
    #[must_use]
    pub fn new(config: SpawnConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            spawned_count: 0,
            spawn_timer: 0.0,
            session_time: 0.0,
            decay: AHashMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Number of zombies spawned so far.
    #[must_use]
    pub const fn spawned_count(&self) -> u32 {
        self.spawned_count
    }

    /// Spawns one zombie, near the player or at a fixed spawn point.
    pub fn spawn(
        &mut self,
        near_player: bool,
        player_pos: Option<(f32, f32)>,
        roster: &mut AgentRoster,
        bus: &EventBus,
    ) -> SpawnResult<EntityId> {
        let position = pick_spawn_position(&self.config, &mut self.rng, near_player, player_pos)?;
        let agent = self.build_agent(position);
        let variant = agent.variant();
        let id = roster.insert(agent);

        info!(
            agent = id.raw(),
            variant = variant.display_name(),
            index = self.spawned_count,
            "zombie spawned"
        );
        bus.publish(GameEvent::AgentSpawned {
            entity_id: id,
            variant,
        });
        self.spawned_count += 1;
        Ok(id)
    }

    /// Advances the auto-spawn timer and the corpse decay sweep.
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Option<(f32, f32)>,
        roster: &mut AgentRoster,
        bus: &EventBus,
    ) {
        self.session_time += dt;
        if self.config.auto_spawn {
            self.spawn_timer += dt;
            if self.spawn_timer >= self.config.spawn_interval {
                self.spawn_timer = 0.0;
                if let Err(err) = self.spawn(true, player_pos, roster, bus) {
                    warn!(%err, "auto-spawn skipped");
                }
            }
        }
        sweep_corpses(
            &mut self.decay,
            dt,
            self.config.decay_delay,
            roster,
            bus,
        );
    }

    /// Builds a zombie from the per-index stat table.
    ///
    /// The first two spawns are fixed teaching encounters; later spawns roll
    /// stats against a difficulty multiplier that grows with the index.
    fn build_agent(&mut self, position: (f32, f32)) -> HostileAgent {
        let rng = self.rng.derive();
        let agent = match self.spawned_count {
            0 => {
                let mut agent = HostileAgent::new(AgentVariant::Walker, position, rng)
                    .with_health(50.0);
                agent.set_custom_stats(0.5, 2.0);
                agent
            }
            1 => {
                let mut agent = HostileAgent::new(AgentVariant::Crawler, position, rng)
                    .with_health(80.0);
                agent.set_custom_stats(0.7, 2.5);
                agent
            }
            n => {
                let difficulty = 1.0 + n as f32 * 0.1;
                let variant = if self.rng.chance(0.5) {
                    AgentVariant::Walker
                } else {
                    AgentVariant::Crawler
                };
                let speed = self.rng.range(0.5, 2.5) * difficulty;
                let range = self.rng.range(2.0, 4.0);
                let mut agent = HostileAgent::new(variant, position, rng)
                    .with_health(100.0 * difficulty);
                agent.set_custom_stats(speed, range);
                agent
            }
        };
        agent.with_session_time(self.session_time)
    }
}

/// Spawner for wolf agents. Applies no stat customization.
#[derive(Debug)]
pub struct WolfSpawner {
    config: SpawnConfig,
    rng: GameRng,
    spawned_count: u32,
    spawn_timer: f32,
    session_time: f32,
    decay: AHashMap<EntityId, f32>,
}

impl WolfSpawner {
    /// Creates a wolf spawner.
    #[must_use]
    pub fn new(config: SpawnConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            spawned_count: 0,
            spawn_timer: 0.0,
            session_time: 0.0,
            decay: AHashMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Number of wolves spawned so far.
    #[must_use]
    pub const fn spawned_count(&self) -> u32 {
        self.spawned_count
    }

    /// Spawns one wolf, near the player or at a fixed spawn point.
    pub fn spawn(
        &mut self,
        near_player: bool,
        player_pos: Option<(f32, f32)>,
        roster: &mut AgentRoster,
        bus: &EventBus,
    ) -> SpawnResult<EntityId> {
        let position = pick_spawn_position(&self.config, &mut self.rng, near_player, player_pos)?;
        let child_rng = self.rng.derive();
        let agent = HostileAgent::new(AgentVariant::Wolf, position, child_rng)
            .with_session_time(self.session_time);
        let id = roster.insert(agent);

        info!(agent = id.raw(), index = self.spawned_count, "wolf spawned");
        bus.publish(GameEvent::AgentSpawned {
            entity_id: id,
            variant: AgentVariant::Wolf,
        });
        self.spawned_count += 1;
        Ok(id)
    }

    /// Advances the auto-spawn timer and the corpse decay sweep.
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Option<(f32, f32)>,
        roster: &mut AgentRoster,
        bus: &EventBus,
    ) {
        self.session_time += dt;
        if self.config.auto_spawn {
            self.spawn_timer += dt;
            if self.spawn_timer >= self.config.spawn_interval {
                self.spawn_timer = 0.0;
                if let Err(err) = self.spawn(true, player_pos, roster, bus) {
                    warn!(%err, "auto-spawn skipped");
                }
            }
        }
        sweep_corpses(
            &mut self.decay,
            dt,
            self.config.decay_delay,
            roster,
            bus,
        );
    }
}
