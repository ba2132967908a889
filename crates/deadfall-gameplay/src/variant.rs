//! Agent variants and their per-variant policies.
//!
//! A variant is pure data dispatch: it selects which sub-action set, damage
//! policy, and difficulty ramp apply to an agent. There is no behavioral
//! inheritance; the behavior core asks the variant for its policy values.

use serde::{Deserialize, Serialize};

/// Hostile agent variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentVariant {
    /// Upright zombie, attacks from the start
    Walker,
    /// Crawling zombie, must stand up before it can attack
    Crawler,
    /// Predator, always bites, no critical-hit weak point
    Wolf,
}

impl AgentVariant {
    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Walker => "Walker",
            Self::Crawler => "Crawler",
            Self::Wolf => "Wolf",
        }
    }

    /// Check if this variant is a zombie type.
    #[must_use]
    pub const fn is_zombie(self) -> bool {
        matches!(self, Self::Walker | Self::Crawler)
    }

    /// Default radius at which the agent notices its target.
    #[must_use]
    pub const fn default_detection_radius(self) -> f32 {
        match self {
            Self::Walker | Self::Crawler => 12.0,
            Self::Wolf => 15.0,
        }
    }

    /// Default melee reach before the difficulty ramp is applied.
    #[must_use]
    pub const fn default_attack_range(self) -> f32 {
        2.0
    }

    /// Default base movement speed.
    #[must_use]
    pub const fn default_speed(self) -> f32 {
        match self {
            Self::Walker | Self::Crawler => 1.0,
            Self::Wolf => 3.5,
        }
    }

    /// Minimum delay between attack activations.
    ///
    /// Zombies are paced by the action lock itself; wolves carry an explicit
    /// cooldown between bites.
    #[must_use]
    pub const fn attack_cooldown(self) -> f32 {
        match self {
            Self::Walker | Self::Crawler => 0.0,
            Self::Wolf => 1.5,
        }
    }

    /// Default starting health.
    #[must_use]
    pub const fn base_health(self) -> f32 {
        100.0
    }

    /// Whether a hit to the critical location kills outright.
    #[must_use]
    pub const fn has_critical_location(self) -> bool {
        self.is_zombie()
    }

    /// Whether a surviving hit staggers the agent into a hit-reaction lock.
    #[must_use]
    pub const fn staggers_on_hit(self) -> bool {
        self.is_zombie()
    }

    /// Whether non-critical hits are absorbed while a sub-action is running.
    #[must_use]
    pub const fn ignores_hits_while_locked(self) -> bool {
        self.is_zombie()
    }

    /// Speed after the session-time difficulty ramp.
    ///
    /// Zombies speed up by as much as 2.0 over the first two minutes; wolves
    /// do not ramp.
    #[must_use]
    pub fn effective_speed(self, base: f32, session_time: f32) -> f32 {
        match self {
            Self::Walker | Self::Crawler => base + (session_time / 60.0).min(2.0),
            Self::Wolf => base,
        }
    }

    /// Attack range after the session-time difficulty ramp.
    #[must_use]
    pub fn effective_range(self, base: f32, session_time: f32) -> f32 {
        match self {
            Self::Walker | Self::Crawler => base + (session_time / 120.0).min(2.0),
            Self::Wolf => base,
        }
    }
}

/// Body location reported by the hit source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitLocation {
    /// Critical location: instant death for variants with a weak point
    Head,
    /// Center mass, double damage
    Torso,
    /// Default location
    Limb,
}

impl HitLocation {
    /// Damage multiplier applied for zombie variants.
    ///
    /// `Head` never reaches this path; it resolves as an instant kill first.
    #[must_use]
    pub const fn damage_multiplier(self) -> f32 {
        match self {
            Self::Head | Self::Torso => 2.0,
            Self::Limb => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_display_names() {
        assert_eq!(AgentVariant::Walker.display_name(), "Walker");
        assert_eq!(AgentVariant::Wolf.display_name(), "Wolf");
    }

    #[test]
    fn test_variant_classification() {
        assert!(AgentVariant::Walker.is_zombie());
        assert!(AgentVariant::Crawler.is_zombie());
        assert!(!AgentVariant::Wolf.is_zombie());
    }

    #[test]
    fn test_zombie_speed_ramp_caps() {
        let v = AgentVariant::Walker;
        assert_eq!(v.effective_speed(1.0, 0.0), 1.0);
        assert!((v.effective_speed(1.0, 60.0) - 2.0).abs() < 1e-6);
        // Capped at +2.0 after two minutes
        assert!((v.effective_speed(1.0, 500.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zombie_range_ramp_caps() {
        let v = AgentVariant::Crawler;
        assert!((v.effective_range(2.0, 120.0) - 3.0).abs() < 1e-6);
        assert!((v.effective_range(2.0, 1000.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_wolf_does_not_ramp() {
        let v = AgentVariant::Wolf;
        assert_eq!(v.effective_speed(3.5, 600.0), 3.5);
        assert_eq!(v.effective_range(2.0, 600.0), 2.0);
    }

    #[test]
    fn test_ramp_monotonic() {
        let v = AgentVariant::Walker;
        let mut last = 0.0f32;
        for i in 0..200 {
            let t = i as f32;
            let s = v.effective_speed(1.0, t);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn test_damage_policy_flags() {
        assert!(AgentVariant::Walker.has_critical_location());
        assert!(!AgentVariant::Wolf.has_critical_location());
        assert!(AgentVariant::Crawler.staggers_on_hit());
        assert!(!AgentVariant::Wolf.staggers_on_hit());
    }

    #[test]
    fn test_hit_location_multipliers() {
        assert_eq!(HitLocation::Torso.damage_multiplier(), 2.0);
        assert_eq!(HitLocation::Limb.damage_multiplier(), 1.0);
    }
}
