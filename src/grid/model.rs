//! Arena map: per-turn cell storage with O(1) lookups
//!
//! Rebuilt wholesale from each turn's snapshot; cells absent from the
//! snapshot are impassable, never free space.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::grid::hex::HexCoord;
use crate::grid::terrain::Terrain;

/// A single arena cell for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub coord: HexCoord,
    pub terrain: Terrain,
    /// Traversal cost charged on entering this cell; values at or above
    /// the impassable sentinel block movement entirely
    pub cost: u32,
}

impl Cell {
    pub fn new(coord: HexCoord, terrain: Terrain, cost: u32) -> Self {
        Self {
            coord,
            terrain,
            cost,
        }
    }
}

/// Cell storage for one turn of planning
#[derive(Debug, Clone, Default)]
pub struct ArenaMap {
    cells: AHashMap<HexCoord, Cell>,
    impassable_cost: u32,
}

impl ArenaMap {
    pub fn new(impassable_cost: u32) -> Self {
        Self {
            cells: AHashMap::new(),
            impassable_cost,
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, impassable_cost: u32) -> Self {
        let mut map = Self::new(impassable_cost);
        for cell in cells {
            map.insert(cell);
        }
        map
    }

    /// Insert or replace a cell
    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert(cell.coord, cell);
    }

    pub fn get(&self, coord: HexCoord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Traversal cost of a known cell; None for coordinates outside the
    /// snapshot
    pub fn cost(&self, coord: HexCoord) -> Option<u32> {
        self.cells.get(&coord).map(|cell| cell.cost)
    }

    /// A cell is passable when it is known and its cost is below the
    /// impassable sentinel
    pub fn is_passable(&self, coord: HexCoord) -> bool {
        self.cost(coord)
            .map(|cost| cost < self.impassable_cost)
            .unwrap_or(false)
    }

    pub fn impassable_cost(&self) -> u32 {
        self.impassable_cost
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All nest-terrain cells outside the given home set; these are the
    /// hostile structures visible this turn
    pub fn hostile_structures<'a>(
        &'a self,
        home: &'a AHashSet<HexCoord>,
    ) -> impl Iterator<Item = HexCoord> + 'a {
        self.cells
            .values()
            .filter(|cell| cell.terrain.is_nest() && !home.contains(&cell.coord))
            .map(|cell| cell.coord)
    }
}
