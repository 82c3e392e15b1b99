//! Core type definitions used throughout the crate

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Unique identifier for a controlled agent, opaque string from the feed
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Turn counter from the feed
pub type TurnNo = u64;

/// Agent role, decoded from the feed's numeric unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Worker,
    Guard,
    Scout,
}

impl Role {
    /// Decode the feed's unit type code; agents with an unrecognized
    /// code have no role and degrade to a stay-in-place plan
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Role::Worker),
            1 => Some(Role::Guard),
            2 => Some(Role::Scout),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Role::Worker => 0,
            Role::Guard => 1,
            Role::Scout => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes_round_trip() {
        for code in 0..=2u8 {
            let role = Role::from_code(code).unwrap();
            assert_eq!(role.code(), code);
        }
    }

    #[test]
    fn test_unknown_role_code() {
        assert_eq!(Role::from_code(7), None);
    }

    #[test]
    fn test_agent_id_ordering() {
        let a = AgentId::from("a-1");
        let b = AgentId::from("a-2");
        assert!(a < b);
    }
}
