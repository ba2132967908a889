//! Timed sub-actions that lock the behavior state machine.
//!
//! A sub-action is a fixed-duration exclusive behavior (bite, melee swing,
//! stand-up, hit reaction, eat). While one is running the agent is `Locked`:
//! motion stops and no new sub-action may start. An optional damage payload
//! fires exactly once at a fixed offset into the action, independent of the
//! tick rate.

use serde::{Deserialize, Serialize};

/// Kind of timed sub-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Lunge bite
    Bite,
    /// Swinging melee attack
    MeleeAttack,
    /// Crawler rising to its feet (one-shot per agent)
    StandUp,
    /// Stagger after surviving a hit
    HitReaction,
    /// Feeding on a food target
    Eat,
}

impl ActionKind {
    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bite => "Bite",
            Self::MeleeAttack => "MeleeAttack",
            Self::StandUp => "StandUp",
            Self::HitReaction => "HitReaction",
            Self::Eat => "Eat",
        }
    }

    /// Whether this sub-action deals damage to the target.
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::Bite | Self::MeleeAttack)
    }
}

/// Damage applied at a fixed offset into a sub-action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagePayload {
    /// Seconds from activation to the damage frame
    pub offset: f32,
    /// Damage dealt to the target
    pub damage: f32,
    /// Whether the payload has been delivered this activation
    pub fired: bool,
}

/// Result of advancing a sub-action by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionProgress {
    /// Damage to deliver this tick, if the payload frame was crossed
    pub fired: Option<f32>,
    /// Whether the action has run its full duration
    pub finished: bool,
}

/// A timed sub-action in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAction {
    kind: ActionKind,
    elapsed: f32,
    duration: f32,
    payload: Option<DamagePayload>,
}

impl SubAction {
    /// Creates a sub-action with no damage payload.
    #[must_use]
    pub fn new(kind: ActionKind, duration: f32) -> Self {
        Self {
            kind,
            elapsed: 0.0,
            duration: duration.max(0.01),
            payload: None,
        }
    }

    /// Attaches a damage payload at a fixed offset into the action.
    #[must_use]
    pub fn with_payload(mut self, offset: f32, damage: f32) -> Self {
        self.payload = Some(DamagePayload {
            offset: offset.clamp(0.0, self.duration),
            damage,
            fired: false,
        });
        self
    }

    /// Returns the action kind.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Seconds since activation.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total action duration in seconds.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds until the action completes.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Whether the payload has already been delivered.
    #[must_use]
    pub fn payload_fired(&self) -> bool {
        self.payload.is_some_and(|p| p.fired)
    }

    /// Advances the action clock by `dt` seconds.
    ///
    /// The payload fires on the tick its offset is crossed and never again,
    /// even if a single large `dt` crosses both the offset and the end of the
    /// action.
    pub fn advance(&mut self, dt: f32) -> ActionProgress {
        self.elapsed += dt.max(0.0);

        let mut fired = None;
        if let Some(payload) = &mut self.payload {
            if !payload.fired && self.elapsed >= payload.offset {
                payload.fired = true;
                fired = Some(payload.damage);
            }
        }

        ActionProgress {
            fired,
            finished: self.elapsed >= self.duration,
        }
    }
}
