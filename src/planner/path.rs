//! Path helpers shared by the planner and its callers

use crate::grid::{ArenaMap, HexCoord};

/// Ordered cell sequence; the first element is the agent's position at
/// planning time and a single-element path means "stay"
pub type Path = Vec<HexCoord>;

/// Movement points a path consumes: the sum of destination-cell costs,
/// start cell excluded
pub fn path_cost(map: &ArenaMap, path: &[HexCoord]) -> u32 {
    path.iter()
        .skip(1)
        .filter_map(|coord| map.cost(*coord))
        .sum()
}

/// Every consecutive pair of cells is hex-adjacent
pub fn is_contiguous(path: &[HexCoord]) -> bool {
    path.windows(2)
        .all(|pair| pair[0].neighbors().contains(&pair[1]))
}
