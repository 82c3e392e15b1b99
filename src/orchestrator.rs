//! One planning pass per turn
//!
//! Builds the turn-scoped context (arena map, hazard field, claim
//! ledger, reservation set), plans guards first and everyone else in
//! ascending id order, and emits one path per agent. A failure while
//! planning a single agent degrades that agent to a stay path and never
//! aborts the rest of the turn.

use std::time::Instant;

use ahash::{AHashMap, AHashSet};

use crate::allocator::{
    ClaimLedger, GreedyValueScorer, ObjectiveScorer, Occupant, TaskAllocator, WorldView,
};
use crate::core::config::PlannerConfig;
use crate::core::error::Result;
use crate::core::types::Role;
use crate::grid::HexCoord;
use crate::hazard::HazardMap;
use crate::planner::path_cost;
use crate::snapshot::{Agent, AgentMove, TurnPlan, TurnSnapshot};

/// Sequences the whole side's planning for one turn
pub struct TurnOrchestrator {
    config: PlannerConfig,
    scorer: Box<dyn ObjectiveScorer>,
}

impl TurnOrchestrator {
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_scorer(config, Box::new(GreedyValueScorer))
    }

    /// Swap in a custom objective scorer
    pub fn with_scorer(config: PlannerConfig, scorer: Box<dyn ObjectiveScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan every controlled agent's move for this turn
    ///
    /// When `deadline` passes mid-turn, every agent not yet planned
    /// gets a stay path; the output always covers all agents.
    pub fn plan_turn(&self, snapshot: &TurnSnapshot, deadline: Option<Instant>) -> Result<TurnPlan> {
        snapshot.validate()?;

        let map = snapshot.arena_map(self.config.impassable_cost);
        let home = snapshot.home_set();
        let hazards = HazardMap::from_structures(
            map.hostile_structures(&home),
            self.config.hazard_radius,
        );
        let defense_posts = TaskAllocator::defense_posts(&home);

        let occupants: AHashMap<HexCoord, Occupant> = snapshot
            .ants
            .iter()
            .map(|agent| {
                (
                    agent.coord,
                    Occupant {
                        id: agent.id.clone(),
                        kind: agent.kind,
                    },
                )
            })
            .collect();

        // Reservation set, seeded with every unit position on the board
        let mut blocked: AHashSet<HexCoord> = snapshot
            .ants
            .iter()
            .map(|agent| agent.coord)
            .chain(snapshot.enemies.iter().map(|enemy| enemy.coord))
            .collect();

        let allocator = TaskAllocator::new(
            WorldView {
                map: &map,
                hazards: &hazards,
                home: &home,
                spot: snapshot.spot,
                resources: &snapshot.food,
                hostiles: &snapshot.enemies,
                occupants: &occupants,
                defense_posts: &defense_posts,
            },
            &self.config,
            self.scorer.as_ref(),
        );
        let mut claims = ClaimLedger::new();

        let mut moves = Vec::with_capacity(snapshot.ants.len());
        let mut expired = false;

        for agent in plan_order(&snapshot.ants) {
            if !expired {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        expired = true;
                        tracing::warn!(
                            turn = snapshot.turn_no,
                            "turn deadline reached, remaining agents stay in place"
                        );
                    }
                }
            }
            if expired {
                moves.push(AgentMove {
                    agent: agent.id.clone(),
                    path: vec![agent.coord],
                });
                continue;
            }

            // The agent may traverse or depart its own cell; everyone
            // after it may not
            blocked.remove(&agent.coord);
            let path = match allocator.assign(agent, &mut claims, &blocked) {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(agent = %agent.id, error = %err, "planning failed, staying put");
                    vec![agent.coord]
                }
            };
            blocked.insert(agent.coord);

            let destination = path.last().copied().unwrap_or(agent.coord);
            blocked.insert(destination);

            tracing::debug!(
                agent = %agent.id,
                steps = path.len() - 1,
                cost = path_cost(&map, &path),
                "agent planned"
            );
            moves.push(AgentMove {
                agent: agent.id.clone(),
                path,
            });
        }

        tracing::info!(
            turn = snapshot.turn_no,
            agents = moves.len(),
            hazards = hazards.len(),
            "turn planned"
        );
        Ok(TurnPlan { moves })
    }
}

/// Guards take precedence for reservations; within each group agents go
/// in ascending id order
fn plan_order(agents: &[Agent]) -> Vec<&Agent> {
    let mut guards: Vec<&Agent> = agents
        .iter()
        .filter(|agent| agent.role() == Some(Role::Guard))
        .collect();
    guards.sort_by(|a, b| a.id.cmp(&b.id));

    let mut others: Vec<&Agent> = agents
        .iter()
        .filter(|agent| agent.role() != Some(Role::Guard))
        .collect();
    others.sort_by(|a, b| a.id.cmp(&b.id));

    guards.into_iter().chain(others).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CarriedLoad;

    fn make_agent(id: &str, q: i32, r: i32, kind: u8) -> Agent {
        Agent {
            id: id.into(),
            coord: HexCoord::new(q, r),
            kind,
            health: 100,
            food: CarriedLoad::default(),
        }
    }

    #[test]
    fn test_plan_order_guards_first_then_by_id() {
        let agents = vec![
            make_agent("w-2", 0, 0, 0),
            make_agent("g-9", 1, 0, 1),
            make_agent("w-1", 2, 0, 0),
            make_agent("g-1", 3, 0, 1),
        ];
        let order: Vec<&str> = plan_order(&agents)
            .iter()
            .map(|agent| agent.id.0.as_str())
            .collect();
        assert_eq!(order, vec!["g-1", "g-9", "w-1", "w-2"]);
    }

    #[test]
    fn test_unknown_role_sorts_with_others() {
        let agents = vec![make_agent("z-1", 0, 0, 9), make_agent("g-1", 1, 0, 1)];
        let order: Vec<&str> = plan_order(&agents)
            .iter()
            .map(|agent| agent.id.0.as_str())
            .collect();
        assert_eq!(order, vec!["g-1", "z-1"]);
    }
}
