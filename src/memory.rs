//! Cross-turn record of observed cells
//!
//! Remembers every cell the feed has ever shown, newest observation
//! winning. The planner never requires this; a turn loop can use it to
//! pre-seed a snapshot with remembered cells outside the current
//! visibility window.

use ahash::{AHashMap, AHashSet};

use crate::grid::HexCoord;
use crate::snapshot::{MapCell, TurnSnapshot};

#[derive(Debug, Clone, Default)]
pub struct TerrainMemory {
    cells: AHashMap<HexCoord, MapCell>,
}

impl TerrainMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every cell of this snapshot
    pub fn observe(&mut self, snapshot: &TurnSnapshot) {
        for cell in &snapshot.map {
            self.cells.insert(cell.coord, cell.clone());
        }
    }

    pub fn known(&self, coord: HexCoord) -> Option<&MapCell> {
        self.cells.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Append remembered cells the snapshot does not currently see;
    /// visible cells are never overridden
    pub fn augment(&self, snapshot: &mut TurnSnapshot) {
        let visible: AHashSet<HexCoord> = snapshot.map.iter().map(|cell| cell.coord).collect();
        let mut remembered: Vec<&MapCell> = self
            .cells
            .values()
            .filter(|cell| !visible.contains(&cell.coord))
            .collect();
        // Stable append order keeps augmented snapshots reproducible
        remembered.sort_by_key(|cell| cell.coord);
        snapshot
            .map
            .extend(remembered.into_iter().cloned());
    }
}
