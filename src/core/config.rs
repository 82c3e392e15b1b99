//! Planner configuration with documented constants
//!
//! Collects the tunables that the arena rules fix per deployment. A
//! config can be loaded from TOML; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::core::error::{HiveError, Result};
use crate::core::types::Role;

/// How the path planner treats cells inside the hazard field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardPolicy {
    /// Hazardous cells are never expanded
    Exclude,
    /// Hazardous cells stay usable but their traversal cost is inflated
    /// by this amount when ordering the frontier; the movement budget is
    /// charged only the real cost
    Penalize(u32),
}

impl Default for HazardPolicy {
    fn default() -> Self {
        HazardPolicy::Penalize(100)
    }
}

/// Configuration for one planning deployment
///
/// The movement and capacity values mirror the arena's unit classes and
/// rarely change; the hazard knobs are the ones worth tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Cells within this hex distance of a hostile structure are
    /// hazardous (the structure cell itself included)
    pub hazard_radius: u32,

    /// Hard exclusion vs. additive penalty for hazardous cells
    pub hazard_policy: HazardPolicy,

    /// Traversal cost at or above this value marks a cell impassable
    pub impassable_cost: u32,

    /// Movement points per turn for each unit class
    pub worker_movement: u32,
    pub guard_movement: u32,
    pub scout_movement: u32,

    /// Carry capacity for each unit class
    pub worker_capacity: u32,
    pub guard_capacity: u32,
    pub scout_capacity: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hazard_radius: 2,
            hazard_policy: HazardPolicy::default(),
            impassable_cost: 1000,

            worker_movement: 5,
            guard_movement: 4,
            scout_movement: 7,

            worker_capacity: 8,
            guard_capacity: 2,
            scout_capacity: 2,
        }
    }
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Movement-point budget for a unit class
    pub fn movement_points(&self, role: Role) -> u32 {
        match role {
            Role::Worker => self.worker_movement,
            Role::Guard => self.guard_movement,
            Role::Scout => self.scout_movement,
        }
    }

    /// Carry capacity for a unit class
    pub fn capacity(&self, role: Role) -> u32 {
        match role {
            Role::Worker => self.worker_capacity,
            Role::Guard => self.guard_capacity,
            Role::Scout => self.scout_capacity,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.impassable_cost < 2 {
            return Err(HiveError::Config(format!(
                "impassable_cost ({}) leaves no passable cost below it",
                self.impassable_cost
            )));
        }

        for (name, points) in [
            ("worker_movement", self.worker_movement),
            ("guard_movement", self.guard_movement),
            ("scout_movement", self.scout_movement),
        ] {
            if points == 0 {
                return Err(HiveError::Config(format!("{name} must be at least 1")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_movement_points_per_role() {
        let config = PlannerConfig::default();
        assert_eq!(config.movement_points(Role::Worker), 5);
        assert_eq!(config.movement_points(Role::Guard), 4);
        assert_eq!(config.movement_points(Role::Scout), 7);
    }

    #[test]
    fn test_capacity_per_role() {
        let config = PlannerConfig::default();
        assert_eq!(config.capacity(Role::Worker), 8);
        assert_eq!(config.capacity(Role::Guard), 2);
        assert_eq!(config.capacity(Role::Scout), 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PlannerConfig::from_toml_str("hazard_radius = 3").unwrap();
        assert_eq!(config.hazard_radius, 3);
        assert_eq!(config.impassable_cost, 1000);
        assert_eq!(config.hazard_policy, HazardPolicy::Penalize(100));
    }

    #[test]
    fn test_hazard_policy_from_toml() {
        let exclude = PlannerConfig::from_toml_str("hazard_policy = \"exclude\"").unwrap();
        assert_eq!(exclude.hazard_policy, HazardPolicy::Exclude);

        let penalize = PlannerConfig::from_toml_str("hazard_policy = { penalize = 50 }").unwrap();
        assert_eq!(penalize.hazard_policy, HazardPolicy::Penalize(50));
    }

    #[test]
    fn test_zero_movement_rejected() {
        let err = PlannerConfig::from_toml_str("guard_movement = 0");
        assert!(err.is_err());
    }
}
