//! Per-turn snapshot of the arena, and the move set sent back
//!
//! Field names follow the arena feed verbatim (`turnNo`, `nextTurnIn`,
//! numeric `type` codes). Everything here is rebuilt each turn; the
//! planner core never mutates a snapshot.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::{HiveError, Result};
use crate::core::types::{AgentId, Role, TurnNo};
use crate::grid::{ArenaMap, Cell, HexCoord, Terrain};
use crate::planner::Path;

/// Resource classes and their per-unit score value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Apple,
    Bread,
    Nectar,
    Unknown(u8),
}

impl ResourceKind {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => ResourceKind::Apple,
            2 => ResourceKind::Bread,
            3 => ResourceKind::Nectar,
            other => ResourceKind::Unknown(other),
        }
    }

    /// Score value of a single carried unit
    pub fn unit_value(&self) -> u32 {
        match self {
            ResourceKind::Apple => 10,
            ResourceKind::Bread => 20,
            ResourceKind::Nectar => 60,
            ResourceKind::Unknown(_) => 0,
        }
    }
}

/// What an agent currently carries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CarriedLoad {
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub amount: u32,
}

/// One of our agents, as reported this turn
///
/// Capacity and the per-turn movement budget are properties of the unit
/// class and come from `PlannerConfig`, not from the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    #[serde(flatten)]
    pub coord: HexCoord,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub food: CarriedLoad,
}

impl Agent {
    pub fn role(&self) -> Option<Role> {
        Role::from_code(self.kind)
    }

    pub fn carrying(&self) -> bool {
        self.food.amount > 0
    }
}

/// A visible hostile agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileAgent {
    #[serde(flatten)]
    pub coord: HexCoord,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub health: i32,
}

/// A visible resource pile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(flatten)]
    pub coord: HexCoord,
    #[serde(rename = "type")]
    pub kind: u8,
    pub amount: u32,
}

impl Resource {
    pub fn resource_kind(&self) -> ResourceKind {
        ResourceKind::from_code(self.kind)
    }
}

/// One arena cell as delivered on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapCell {
    #[serde(flatten)]
    pub coord: HexCoord,
    #[serde(rename = "type")]
    pub kind: u8,
    pub cost: u32,
}

impl MapCell {
    pub fn to_cell(&self) -> Cell {
        Cell::new(self.coord, Terrain::from_code(self.kind), self.cost)
    }
}

/// Everything the feed reports for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub map: Vec<MapCell>,
    pub ants: Vec<Agent>,
    #[serde(default)]
    pub enemies: Vec<HostileAgent>,
    #[serde(default)]
    pub food: Vec<Resource>,
    pub home: Vec<HexCoord>,
    /// Primary structure cell of our side
    pub spot: HexCoord,
    #[serde(rename = "turnNo", default)]
    pub turn_no: TurnNo,
    /// Seconds until the server advances the turn
    #[serde(rename = "nextTurnIn", default)]
    pub next_turn_in: f64,
    #[serde(default)]
    pub score: i64,
}

impl TurnSnapshot {
    /// Structural validation, distinct from per-agent planning failures
    pub fn validate(&self) -> Result<()> {
        if self.map.is_empty() {
            return Err(HiveError::InvalidSnapshot("empty map".into()));
        }
        if self.home.is_empty() {
            return Err(HiveError::InvalidSnapshot("no home cells".into()));
        }

        let mut ids = AHashSet::with_capacity(self.ants.len());
        for agent in &self.ants {
            if !ids.insert(&agent.id) {
                return Err(HiveError::InvalidSnapshot(format!(
                    "duplicate agent id {}",
                    agent.id
                )));
            }
        }
        Ok(())
    }

    /// Build this turn's cell storage
    pub fn arena_map(&self, impassable_cost: u32) -> ArenaMap {
        ArenaMap::from_cells(self.map.iter().map(MapCell::to_cell), impassable_cost)
    }

    pub fn home_set(&self) -> AHashSet<HexCoord> {
        self.home.iter().copied().collect()
    }
}

/// One agent's move for this turn; a single-element path means "stay"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMove {
    #[serde(rename = "ant")]
    pub agent: AgentId,
    pub path: Path,
}

/// The full move set submitted for one turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnPlan {
    pub moves: Vec<AgentMove>,
}

impl TurnPlan {
    pub fn path_for(&self, id: &AgentId) -> Option<&Path> {
        self.moves
            .iter()
            .find(|entry| &entry.agent == id)
            .map(|entry| &entry.path)
    }
}
