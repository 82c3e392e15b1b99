//! Per-agent objective selection
//!
//! One decision pass per agent, in the order fixed by the orchestrator.
//! Selected objectives are claimed immediately so later agents see them
//! as taken, and every branch degrades to a stay-in-place path instead
//! of failing.

pub mod claims;
pub mod scoring;

pub use claims::ClaimLedger;
pub use scoring::{GreedyValueScorer, ObjectiveScorer};

use ahash::{AHashMap, AHashSet};

use crate::core::config::PlannerConfig;
use crate::core::error::{HiveError, Result};
use crate::core::types::{AgentId, Role};
use crate::grid::{ArenaMap, HexCoord};
use crate::hazard::HazardMap;
use crate::planner::{Path, PathPlanner};
use crate::snapshot::{Agent, HostileAgent, Resource};

/// Friendly agent standing on a cell at turn start
#[derive(Debug, Clone)]
pub struct Occupant {
    pub id: AgentId,
    pub kind: u8,
}

/// Read-only view of one turn's world, shared by every agent's decision
pub struct WorldView<'a> {
    pub map: &'a ArenaMap,
    pub hazards: &'a HazardMap,
    pub home: &'a AHashSet<HexCoord>,
    /// Primary structure cell; exploration walks away from it
    pub spot: HexCoord,
    pub resources: &'a [Resource],
    pub hostiles: &'a [HostileAgent],
    pub occupants: &'a AHashMap<HexCoord, Occupant>,
    /// Neighbors of home cells that are not themselves home cells
    pub defense_posts: &'a AHashSet<HexCoord>,
}

/// Role-based greedy task assignment for one turn
pub struct TaskAllocator<'a> {
    world: WorldView<'a>,
    config: &'a PlannerConfig,
    scorer: &'a dyn ObjectiveScorer,
}

impl<'a> TaskAllocator<'a> {
    pub fn new(
        world: WorldView<'a>,
        config: &'a PlannerConfig,
        scorer: &'a dyn ObjectiveScorer,
    ) -> Self {
        Self {
            world,
            config,
            scorer,
        }
    }

    /// Compute all home-adjacent defense posts for a turn
    pub fn defense_posts(home: &AHashSet<HexCoord>) -> AHashSet<HexCoord> {
        let mut posts = AHashSet::new();
        for cell in home {
            for neighbor in cell.neighbors() {
                if !home.contains(&neighbor) {
                    posts.insert(neighbor);
                }
            }
        }
        posts
    }

    /// Pick this agent's objective and plan a path toward it
    ///
    /// The agent's own cell must not be in `blocked` while it is being
    /// planned; the orchestrator owns that bookkeeping.
    pub fn assign(
        &self,
        agent: &Agent,
        claims: &mut ClaimLedger,
        blocked: &AHashSet<HexCoord>,
    ) -> Result<Path> {
        let role = agent.role().ok_or_else(|| {
            HiveError::Planning(agent.id.clone(), format!("unknown unit class {}", agent.kind))
        })?;
        let budget = self.config.movement_points(role);
        let planner = PathPlanner::new(
            self.world.map,
            self.world.hazards,
            self.config.hazard_policy,
        );

        let path = match role {
            Role::Guard => self.guard_plan(agent, budget, claims, blocked, &planner),
            Role::Worker | Role::Scout => {
                if agent.carrying() {
                    self.deliver_plan(agent, role, budget, claims, blocked, &planner)
                } else {
                    self.gather_plan(agent, role, budget, claims, blocked, &planner)
                }
            }
        };
        Ok(path)
    }

    /// Guards hold the posts around home; with no post free they close
    /// on the nearest visible hostile
    fn guard_plan(
        &self,
        agent: &Agent,
        budget: u32,
        claims: &mut ClaimLedger,
        blocked: &AHashSet<HexCoord>,
        planner: &PathPlanner<'_>,
    ) -> Path {
        let current = agent.coord;

        if self.world.defense_posts.contains(&current) && !claims.post_claimed(current) {
            claims.claim_post(current);
            return vec![current];
        }

        let target = self
            .world
            .defense_posts
            .iter()
            .filter(|post| !claims.post_claimed(**post))
            .filter(|post| !blocked.contains(*post))
            .min_by_key(|post| (current.distance(post), **post));

        if let Some(&post) = target {
            claims.claim_post(post);
            return planner.plan(current, &[post], budget, blocked);
        }

        let hostile = self
            .world
            .hostiles
            .iter()
            .min_by_key(|h| (current.distance(&h.coord), h.coord));
        if let Some(hostile) = hostile {
            return planner.plan(current, &[hostile.coord], budget, blocked);
        }

        vec![current]
    }

    /// Carrying agents head for the nearest home cell free for their role
    fn deliver_plan(
        &self,
        agent: &Agent,
        role: Role,
        budget: u32,
        claims: &mut ClaimLedger,
        blocked: &AHashSet<HexCoord>,
        planner: &PathPlanner<'_>,
    ) -> Path {
        let current = agent.coord;

        let target = self
            .world
            .home
            .iter()
            .filter(|cell| !claims.home_claimed(role, **cell))
            .filter(|cell| !self.occupied_by_other_same_role(**cell, agent, role))
            .min_by_key(|cell| (current.distance(cell), **cell));

        match target {
            Some(&home_cell) => {
                claims.claim_home(role, home_cell);
                planner.plan(current, &[home_cell], budget, blocked)
            }
            // Every home cell taken this turn: wait where we are
            None => vec![current],
        }
    }

    /// Empty-handed agents chase the best-scoring free resource, or
    /// explore when none is available
    fn gather_plan(
        &self,
        agent: &Agent,
        role: Role,
        budget: u32,
        claims: &mut ClaimLedger,
        blocked: &AHashSet<HexCoord>,
        planner: &PathPlanner<'_>,
    ) -> Path {
        let current = agent.coord;

        let candidates: Vec<&Resource> = self
            .world
            .resources
            .iter()
            .filter(|res| res.amount > 0)
            .filter(|res| !claims.resource_claimed(role, res.coord))
            .filter(|res| !self.occupied_by_other_same_role(res.coord, agent, role))
            .collect();

        // Resources clear of the hazard field come first; when every
        // candidate sits in it, take them anyway rather than idling
        let safe: Vec<&Resource> = candidates
            .iter()
            .copied()
            .filter(|res| !self.world.hazards.is_hazard(res.coord))
            .collect();
        let pool = if safe.is_empty() { &candidates } else { &safe };

        let capacity = self.config.capacity(role);
        let best = pool.iter().max_by(|a, b| {
            let score_a = self
                .scorer
                .resource_score(role, capacity, a, current.distance(&a.coord));
            let score_b = self
                .scorer
                .resource_score(role, capacity, b, current.distance(&b.coord));
            // Equal scores: the lower coordinate wins, keeping the pass
            // reproducible
            score_a.cmp(&score_b).then_with(|| b.coord.cmp(&a.coord))
        });

        match best {
            Some(res) => {
                claims.claim_resource(role, res.coord);
                planner.plan(current, &[res.coord], budget, blocked)
            }
            None => self.explore_plan(agent, budget, blocked),
        }
    }

    /// Walk outward from the home spot one affordable hex at a time
    fn explore_plan(&self, agent: &Agent, budget: u32, blocked: &AHashSet<HexCoord>) -> Path {
        let mut path = vec![agent.coord];
        let mut current = agent.coord;
        let mut remaining = budget;

        loop {
            let step = current
                .neighbors()
                .into_iter()
                .filter(|n| !blocked.contains(n))
                .filter(|n| !self.world.hazards.is_hazard(*n))
                .filter_map(|n| self.world.map.cost(n).map(|cost| (n, cost)))
                .filter(|(_, cost)| *cost < self.world.map.impassable_cost())
                .filter(|(_, cost)| *cost <= remaining)
                .max_by(|(a, _), (b, _)| {
                    let da = a.distance(&self.world.spot);
                    let db = b.distance(&self.world.spot);
                    da.cmp(&db).then_with(|| b.cmp(a))
                });

            let Some((next, cost)) = step else {
                break;
            };
            path.push(next);
            remaining -= cost;
            current = next;
        }

        path
    }

    fn occupied_by_other_same_role(&self, coord: HexCoord, agent: &Agent, role: Role) -> bool {
        self.world
            .occupants
            .get(&coord)
            .map(|occupant| {
                occupant.id != agent.id && Role::from_code(occupant.kind) == Some(role)
            })
            .unwrap_or(false)
    }
}
