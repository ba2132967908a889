//! # Deadfall Gameplay
//!
//! Hostile agent behavior core for Deadfall.
//!
//! This crate provides the tick-driven AI layer and its collaborators:
//! - Hostile agent state machine (patrol / chase / attack / locked / dead)
//! - Timed sub-actions with exactly-once damage payloads
//! - Variant policies (walker, crawler, wolf)
//! - Waypoint patrol and radius wander motion
//! - Zombie and wolf spawners with corpse decay
//! - Player health with delayed regeneration
//! - Event bus for inter-system communication
//! - RON tuning file support
//!
//! The core drives opaque collaborators (navigator, animation sink, damage
//! receiver) injected at the call sites; no engine state is touched directly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod action;
pub mod agent;
pub mod animation;
pub mod config;
pub mod events;
pub mod motion;
pub mod nav;
pub mod player;
pub mod rng;
pub mod spawner;
pub mod variant;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::*;
    pub use crate::agent::*;
    pub use crate::animation::*;
    pub use crate::config::*;
    pub use crate::events::*;
    pub use crate::motion::*;
    pub use crate::nav::*;
    pub use crate::player::*;
    pub use crate::rng::*;
    pub use crate::spawner::*;
    pub use crate::variant::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    /// Full loop: spawn a wolf, let it close on the player, bite, die to a
    /// gunshot, and decay out of the roster.
    #[test]
    fn test_wolf_lifecycle() {
        let bus = EventBus::new(64);
        let mut roster = AgentRoster::new();
        let config = SpawnConfig::with_seed(9).with_spawn_points(vec![(4.0, 0.0)]);
        let mut spawner = WolfSpawner::new(config);

        let id = spawner
            .spawn(false, None, &mut roster, &bus)
            .expect("wolf spawns");

        let mut nav = MockNavigator::new((4.0, 0.0));
        let mut anim = RecordingAnimator::new();
        let mut player = PlayerHealth::new(100.0);
        let target = TargetInfo::player((0.0, 0.0));

        // Chase in, bite, and hurt the player.
        for _ in 0..200 {
            let agent = roster.get_mut(id).expect("wolf alive");
            agent.tick(0.05, Some(&target), &mut nav, &mut anim, &mut player);
            nav.step(0.05);
            player.tick(0.05);
            if player.health() < 100.0 {
                break;
            }
        }
        assert!(player.health() < 100.0);

        // Two shots kill it.
        let agent = roster.get_mut(id).expect("wolf alive");
        agent.hit(50.0, HitLocation::Torso, &mut nav, &mut anim);
        agent.hit(50.0, HitLocation::Torso, &mut nav, &mut anim);
        assert!(agent.is_dead());

        // The spawner reaps the corpse after the decay delay.
        for _ in 0..40 {
            spawner.update(0.1, None, &mut roster, &bus);
        }
        assert!(roster.get(id).is_none());
    }

    /// Zombie path: crawler spawned by the table stands up, then attacks.
    #[test]
    fn test_crawler_spawn_and_attack() {
        let bus = EventBus::new(64);
        let mut roster = AgentRoster::new();
        let config = SpawnConfig::with_seed(9).with_spawn_points(vec![(1.0, 0.0)]);
        let mut spawner = ZombieSpawner::new(config);

        // Index 1 is the fixed crawler encounter.
        spawner.spawn(false, None, &mut roster, &bus).expect("walker");
        let id = spawner.spawn(false, None, &mut roster, &bus).expect("crawler");

        let mut nav = MockNavigator::new((1.0, 0.0));
        let mut anim = RecordingAnimator::new();
        let mut player = PlayerHealth::new(100.0);
        let target = TargetInfo::player((0.0, 0.0));

        let agent = roster.get_mut(id).expect("crawler");
        assert_eq!(agent.variant(), AgentVariant::Crawler);
        agent.init_animator(&mut anim);
        assert_eq!(anim.flag("Crawler"), Some(true));

        for _ in 0..120 {
            agent.tick(0.1, Some(&target), &mut nav, &mut anim, &mut player);
        }
        assert!(agent.has_stood_up());
        assert!(player.health() < 100.0);
    }
}
