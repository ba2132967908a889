//! RON-backed tuning file for agents and spawners.
//!
//! All gameplay tunables live in one [`GameTuning`] document so designers can
//! adjust ranges, cooldowns, and spawn pacing without touching code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use deadfall_common::{DeadfallError, DeadfallResult};

use crate::agent::AgentConfig;
use crate::spawner::SpawnConfig;
use crate::variant::AgentVariant;

/// Complete tunables document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTuning {
    /// Zombie agent tunables (walkers and crawlers)
    pub zombie: AgentConfig,
    /// Wolf agent tunables
    pub wolf: AgentConfig,
    /// Zombie spawner placement and pacing
    pub zombie_spawner: SpawnConfig,
    /// Wolf spawner placement and pacing
    pub wolf_spawner: SpawnConfig,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            zombie: AgentConfig::for_variant(AgentVariant::Walker),
            wolf: AgentConfig::for_variant(AgentVariant::Wolf),
            zombie_spawner: SpawnConfig::default(),
            wolf_spawner: SpawnConfig::default(),
        }
    }
}

impl GameTuning {
    /// Parses a tuning document from RON text.
    pub fn from_ron_str(text: &str) -> DeadfallResult<Self> {
        ron::from_str(text).map_err(|e| DeadfallError::Config(e.to_string()))
    }

    /// Serializes the tuning document to pretty RON.
    pub fn to_ron_string(&self) -> DeadfallResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| DeadfallError::Serialization(e.to_string()))
    }

    /// Loads a tuning document from a file.
    pub fn load(path: &Path) -> DeadfallResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_matches_variants() {
        let tuning = GameTuning::default();
        assert_eq!(tuning.zombie.detection_radius, 12.0);
        assert_eq!(tuning.wolf.detection_radius, 15.0);
        assert_eq!(tuning.wolf.attack_cooldown, 1.5);
        assert_eq!(tuning.zombie_spawner.spawn_distance, 20.0);
    }

    #[test]
    fn test_ron_roundtrip() {
        let tuning = GameTuning::default();
        let text = tuning.to_ron_string().expect("serialize");
        let parsed = GameTuning::from_ron_str(&text).expect("parse");
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_invalid_ron_reports_config_error() {
        let result = GameTuning::from_ron_str("this is not ron {{{");
        assert!(matches!(result, Err(DeadfallError::Config(_))));
    }

    #[test]
    fn test_edited_field_survives_roundtrip() {
        let mut tuning = GameTuning::default();
        tuning.wolf.bite_damage = 25.0;
        tuning.zombie_spawner.auto_spawn = true;

        let text = tuning.to_ron_string().expect("serialize");
        let parsed = GameTuning::from_ron_str(&text).expect("parse");
        assert_eq!(parsed.wolf.bite_damage, 25.0);
        assert!(parsed.zombie_spawner.auto_spawn);
    }
}
