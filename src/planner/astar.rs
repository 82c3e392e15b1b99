//! Weighted, budget-limited, multi-goal A* over the arena map
//!
//! Never fails: when no goal is reachable within budget the planner
//! returns the best-effort path toward the closest goal, and an agent
//! with no move at all gets its own cell back.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::core::config::HazardPolicy;
use crate::grid::{ArenaMap, HexCoord};
use crate::hazard::HazardMap;
use crate::planner::path::Path;

/// Node in the A* open set
#[derive(Debug, Clone, Copy)]
struct PathNode {
    coord: HexCoord,
    /// Ordering cost (hazard penalty included) when this entry was queued
    g: u32,
    /// f = g + h, the frontier ordering key
    f: u32,
    /// Insertion sequence; equal f pops in queue order so plans are
    /// reproducible
    seq: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Path search over one turn's arena state
pub struct PathPlanner<'a> {
    map: &'a ArenaMap,
    hazards: &'a HazardMap,
    policy: HazardPolicy,
}

impl<'a> PathPlanner<'a> {
    pub fn new(map: &'a ArenaMap, hazards: &'a HazardMap, policy: HazardPolicy) -> Self {
        Self {
            map,
            hazards,
            policy,
        }
    }

    /// Plan a path from `start` toward the nearest of `goals`
    ///
    /// The returned path starts at `start`, stays contiguous, and its
    /// summed destination costs never exceed `budget`. Cells in
    /// `blocked` are never entered. If no goal can be popped the path
    /// leads to the expanded node with the smallest heuristic seen, and
    /// degenerates to `[start]` when nothing can be expanded (or the
    /// goal set is empty).
    pub fn plan(
        &self,
        start: HexCoord,
        goals: &[HexCoord],
        budget: u32,
        blocked: &AHashSet<HexCoord>,
    ) -> Path {
        if goals.is_empty() {
            return vec![start];
        }
        let goal_set: AHashSet<HexCoord> = goals.iter().copied().collect();
        if goal_set.contains(&start) {
            return vec![start];
        }

        let heuristic = |coord: HexCoord| -> u32 {
            goals
                .iter()
                .map(|goal| coord.distance(goal))
                .min()
                .unwrap_or(u32::MAX)
        };

        let mut open = BinaryHeap::new();
        let mut came_from: AHashMap<HexCoord, HexCoord> = AHashMap::new();
        // Ordering cost per cell; hazard penalties inflate this one only
        let mut g_scores: AHashMap<HexCoord, u32> = AHashMap::new();
        // Real movement points spent per cell; this is what the budget caps
        let mut spent: AHashMap<HexCoord, u32> = AHashMap::new();

        g_scores.insert(start, 0);
        spent.insert(start, 0);

        let mut seq: u64 = 0;
        open.push(PathNode {
            coord: start,
            g: 0,
            f: heuristic(start),
            seq,
        });

        let mut best_node = start;
        let mut best_h = heuristic(start);

        while let Some(node) = open.pop() {
            // Stale entry: a cheaper path to this cell was queued after
            // this one; compare against the best known cost, never
            // against entry identity
            let known_g = *g_scores.get(&node.coord).unwrap_or(&u32::MAX);
            if node.g > known_g {
                continue;
            }

            if goal_set.contains(&node.coord) {
                return reconstruct_path(&came_from, node.coord);
            }

            let node_h = heuristic(node.coord);
            if node_h < best_h {
                best_h = node_h;
                best_node = node.coord;
            }

            let node_spent = *spent.get(&node.coord).unwrap_or(&0);

            for neighbor in node.coord.neighbors() {
                if blocked.contains(&neighbor) {
                    continue;
                }
                let Some(cell) = self.map.get(neighbor) else {
                    continue;
                };
                if cell.cost >= self.map.impassable_cost() {
                    continue;
                }

                let mut step = cell.cost;
                if self.hazards.is_hazard(neighbor) {
                    match self.policy {
                        HazardPolicy::Exclude => continue,
                        HazardPolicy::Penalize(penalty) => step += penalty,
                    }
                }

                let tentative_spent = node_spent + cell.cost;
                if tentative_spent > budget {
                    continue;
                }

                let tentative_g = node.g + step;
                let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&u32::MAX);
                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, node.coord);
                    g_scores.insert(neighbor, tentative_g);
                    spent.insert(neighbor, tentative_spent);

                    seq += 1;
                    open.push(PathNode {
                        coord: neighbor,
                        g: tentative_g,
                        f: tentative_g + heuristic(neighbor),
                        seq,
                    });
                }
            }
        }

        // Frontier exhausted: closest approach instead of failure
        reconstruct_path(&came_from, best_node)
    }
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &AHashMap<HexCoord, HexCoord>, mut current: HexCoord) -> Path {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Terrain};
    use crate::planner::path::{is_contiguous, path_cost};

    fn flat_map(width: i32, height: i32) -> ArenaMap {
        let mut map = ArenaMap::new(1000);
        for q in 0..width {
            for r in 0..height {
                map.insert(Cell::new(HexCoord::new(q, r), Terrain::Plain, 1));
            }
        }
        map
    }

    fn planner<'a>(map: &'a ArenaMap, hazards: &'a HazardMap) -> PathPlanner<'a> {
        PathPlanner::new(map, hazards, HazardPolicy::Penalize(100))
    }

    #[test]
    fn test_start_in_goals_returns_start() {
        let map = flat_map(5, 5);
        let hazards = HazardMap::default();
        let start = HexCoord::new(2, 2);
        let path = planner(&map, &hazards).plan(start, &[start], 5, &AHashSet::new());
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_empty_goals_returns_start() {
        let map = flat_map(5, 5);
        let hazards = HazardMap::default();
        let start = HexCoord::new(2, 2);
        let path = planner(&map, &hazards).plan(start, &[], 5, &AHashSet::new());
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_straight_line_reaches_goal() {
        let map = flat_map(8, 8);
        let hazards = HazardMap::default();
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(4, 0);

        let path = planner(&map, &hazards).plan(start, &[goal], 10, &AHashSet::new());
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len(), 5);
        assert!(is_contiguous(&path));
    }

    #[test]
    fn test_route_around_expensive_terrain() {
        let mut map = flat_map(8, 8);
        // Wall of rock across the direct line, gap at r = 3
        for r in 0..3 {
            map.insert(Cell::new(HexCoord::new(2, r), Terrain::Rock, 1000));
        }

        let hazards = HazardMap::default();
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(4, 0);

        let path = planner(&map, &hazards).plan(start, &[goal], 20, &AHashSet::new());
        assert_eq!(path.last(), Some(&goal));
        for coord in &path {
            assert!(map.is_passable(*coord) || *coord == start);
        }
    }

    #[test]
    fn test_budget_limits_path() {
        let map = flat_map(10, 1);
        let hazards = HazardMap::default();
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(9, 0);

        let path = planner(&map, &hazards).plan(start, &[goal], 3, &AHashSet::new());
        // Best effort: three steps toward the goal, not a failure
        assert_eq!(path, vec![
            HexCoord::new(0, 0),
            HexCoord::new(1, 0),
            HexCoord::new(2, 0),
            HexCoord::new(3, 0),
        ]);
        assert!(path_cost(&map, &path) <= 3);
    }

    #[test]
    fn test_blocked_cells_never_entered() {
        let map = flat_map(6, 6);
        let hazards = HazardMap::default();
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(3, 0);
        let blocked: AHashSet<HexCoord> = [HexCoord::new(1, 0)].into_iter().collect();

        let path = planner(&map, &hazards).plan(start, &[goal], 10, &blocked);
        assert_eq!(path.last(), Some(&goal));
        assert!(!path.contains(&HexCoord::new(1, 0)));
    }

    #[test]
    fn test_isolated_start_stays() {
        let map = flat_map(6, 6);
        let hazards = HazardMap::default();
        let start = HexCoord::new(3, 3);
        let blocked: AHashSet<HexCoord> = start.neighbors().into_iter().collect();

        let path = planner(&map, &hazards).plan(start, &[HexCoord::new(5, 5)], 10, &blocked);
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_penalized_hazard_avoided_when_detour_exists() {
        let map = flat_map(6, 6);
        let hazards = HazardMap::from_structures([HexCoord::new(2, 0)], 0);
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(4, 0);

        let path = planner(&map, &hazards).plan(start, &[goal], 20, &AHashSet::new());
        assert_eq!(path.last(), Some(&goal));
        assert!(!path.contains(&HexCoord::new(2, 0)));
    }

    #[test]
    fn test_penalized_hazard_used_when_only_route() {
        // Single-row corridor forces the hazardous cell
        let map = flat_map(5, 1);
        let hazards = HazardMap::from_structures([HexCoord::new(2, 0)], 0);
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(4, 0);

        let path = planner(&map, &hazards).plan(start, &[goal], 10, &AHashSet::new());
        assert_eq!(path.last(), Some(&goal));
        assert!(path.contains(&HexCoord::new(2, 0)));
        // Budget charged the real cost, not the penalty
        assert_eq!(path_cost(&map, &path), 4);
    }

    #[test]
    fn test_exclude_policy_never_enters_hazard() {
        let map = flat_map(5, 1);
        let hazards = HazardMap::from_structures([HexCoord::new(2, 0)], 0);
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(4, 0);

        let path = PathPlanner::new(&map, &hazards, HazardPolicy::Exclude).plan(
            start,
            &[goal],
            10,
            &AHashSet::new(),
        );
        // Corridor is cut; best effort stops before the hazard
        assert_eq!(path.last(), Some(&HexCoord::new(1, 0)));
    }

    #[test]
    fn test_multi_goal_picks_nearest() {
        let map = flat_map(10, 10);
        let hazards = HazardMap::default();
        let start = HexCoord::new(0, 0);
        let near = HexCoord::new(2, 0);
        let far = HexCoord::new(8, 0);

        let path = planner(&map, &hazards).plan(start, &[far, near], 20, &AHashSet::new());
        assert_eq!(path.last(), Some(&near));
    }

    #[test]
    fn test_replanning_is_deterministic() {
        let mut map = flat_map(8, 8);
        map.insert(Cell::new(HexCoord::new(3, 2), Terrain::Dirt, 2));
        map.insert(Cell::new(HexCoord::new(2, 3), Terrain::Dirt, 2));
        let hazards = HazardMap::from_structures([HexCoord::new(5, 5)], 1);
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(7, 7);

        let first = planner(&map, &hazards).plan(start, &[goal], 30, &AHashSet::new());
        let second = planner(&map, &hazards).plan(start, &[goal], 30, &AHashSet::new());
        assert_eq!(first, second);
    }
}
