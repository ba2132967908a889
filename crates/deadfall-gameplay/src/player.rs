//! Player health pool and the damage-receiver contract.
//!
//! Sub-action payloads are delivered through the [`DamageReceiver`] trait;
//! [`PlayerHealth`] is the survival-game implementation with delayed
//! regeneration and a terminal death latch.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Health pool that hostile agents deal damage into.
pub trait DamageReceiver {
    /// Applies damage to the pool.
    fn take_damage(&mut self, amount: f32);
}

/// Player health with automatic recovery.
///
/// Health regenerates at `recovery_rate` per second once `recovery_delay`
/// seconds have passed without taking damage. Death is terminal: once health
/// reaches zero no further mutation occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHealth {
    /// Current health
    health: f32,
    /// Maximum health
    max_health: f32,
    /// Seconds without damage before recovery starts
    recovery_delay: f32,
    /// Health recovered per second
    recovery_rate: f32,
    /// Seconds since the last damage taken
    since_damage: f32,
    /// Death latch
    dead: bool,
}

impl Default for PlayerHealth {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl PlayerHealth {
    /// Creates a full health pool.
    #[must_use]
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            recovery_delay: 3.0,
            recovery_rate: 10.0,
            since_damage: 0.0,
            dead: false,
        }
    }

    /// Sets the recovery delay.
    #[must_use]
    pub const fn with_recovery_delay(mut self, delay: f32) -> Self {
        self.recovery_delay = delay;
        self
    }

    /// Sets the recovery rate.
    #[must_use]
    pub const fn with_recovery_rate(mut self, rate: f32) -> Self {
        self.recovery_rate = rate;
        self
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

    /// Health as a fraction of maximum (0.0 to 1.0).
    #[must_use]
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    /// Whether the player has died.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Advances the recovery clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.dead {
            return;
        }
        self.since_damage += dt;
        if self.health < self.max_health && self.since_damage > self.recovery_delay {
            self.health = (self.health + self.recovery_rate * dt).min(self.max_health);
        }
    }
}

impl DamageReceiver for PlayerHealth {
    fn take_damage(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        self.since_damage = 0.0;
        debug!(amount, health = self.health, "player damaged");
        if self.health <= 0.0 {
            self.dead = true;
            info!("player died");
        }
    }
}

/// Bare health pool test double that counts incoming damage calls.
#[derive(Debug, Clone, Default)]
pub struct HealthPool {
    /// Total damage received
    pub total_damage: f32,
    /// Number of `take_damage` calls
    pub hits: usize,
}

impl HealthPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DamageReceiver for HealthPool {
    fn take_damage(&mut self, amount: f32) {
        self.total_damage += amount;
        self.hits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_reduces_health() {
        let mut player = PlayerHealth::new(100.0);
        player.take_damage(30.0);
        assert_eq!(player.health(), 70.0);
        assert!(!player.is_dead());
    }

    #[test]
    fn test_no_recovery_before_delay() {
        let mut player = PlayerHealth::new(100.0);
        player.take_damage(50.0);
        player.tick(2.0);
        assert_eq!(player.health(), 50.0);
    }

    #[test]
    fn test_recovery_after_delay() {
        let mut player = PlayerHealth::new(100.0);
        player.take_damage(50.0);
        // Pass the delay, then recover for one second.
        player.tick(3.5);
        player.tick(1.0);
        assert!(player.health() > 50.0);
    }

    #[test]
    fn test_recovery_clamps_at_max() {
        let mut player = PlayerHealth::new(100.0);
        player.take_damage(5.0);
        player.tick(60.0);
        player.tick(60.0);
        assert_eq!(player.health(), 100.0);
    }

    #[test]
    fn test_damage_resets_recovery_clock() {
        let mut player = PlayerHealth::new(100.0);
        player.take_damage(20.0);
        player.tick(2.9);
        player.take_damage(10.0);
        player.tick(2.9);
        assert_eq!(player.health(), 70.0);
    }

    #[test]
    fn test_death_is_terminal() {
        let mut player = PlayerHealth::new(100.0);
        player.take_damage(150.0);
        assert!(player.is_dead());
        assert_eq!(player.health(), 0.0);

        player.tick(100.0);
        assert_eq!(player.health(), 0.0);

        player.take_damage(10.0);
        assert_eq!(player.health(), 0.0);
    }

    #[test]
    fn test_health_percent() {
        let mut player = PlayerHealth::new(200.0);
        player.take_damage(50.0);
        assert!((player.health_percent() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_health_pool_counts_hits() {
        let mut pool = HealthPool::new();
        pool.take_damage(10.0);
        pool.take_damage(20.0);
        assert_eq!(pool.hits, 2);
        assert_eq!(pool.total_damage, 30.0);
    }
}
