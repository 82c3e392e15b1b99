//! Hex coordinate system for the arena (odd-r offset coordinates)
//!
//! The arena feed addresses cells as (q, r) where the neighbor offsets
//! depend on the parity of r.

use serde::{Deserialize, Serialize};

/// Offset hex coordinate, used as a map key throughout
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// Neighbor offsets for even rows (r & 1 == 0)
const EVEN_ROW_OFFSETS: [(i32, i32); 6] = [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];

/// Neighbor offsets for odd rows (r & 1 == 1)
const ODD_ROW_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)];

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinates for this cell (x, y, z with x + y + z == 0)
    fn cube(&self) -> (i32, i32, i32) {
        let x = self.q - ((self.r - (self.r & 1)) / 2);
        let z = self.r;
        let y = -x - z;
        (x, y, z)
    }

    /// Manhattan distance in hex space
    pub fn distance(&self, other: &Self) -> u32 {
        let (x1, y1, z1) = self.cube();
        let (x2, y2, z2) = other.cube();
        (((x1 - x2).abs() + (y1 - y2).abs() + (z1 - z2).abs()) / 2) as u32
    }

    /// Get all 6 neighboring hex coordinates
    ///
    /// The offset table depends on row parity; both tables are fixed by
    /// the arena's layout and must not be reordered.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        let offsets = if self.r & 1 == 0 {
            &EVEN_ROW_OFFSETS
        } else {
            &ODD_ROW_OFFSETS
        };
        let mut out = [*self; 6];
        for (slot, (dq, dr)) in out.iter_mut().zip(offsets.iter()) {
            *slot = HexCoord::new(self.q + dq, self.r + dr);
        }
        out
    }

    /// All hexes within `range` steps of self (inclusive, self included)
    ///
    /// Walks the neighbor relation ring by ring so the result is exact
    /// under the offset scheme.
    pub fn within_range(&self, range: u32) -> Vec<HexCoord> {
        let mut seen = ahash::AHashSet::new();
        seen.insert(*self);
        let mut frontier = vec![*self];
        for _ in 0..range {
            let mut next = Vec::new();
            for coord in frontier {
                for neighbor in coord.neighbors() {
                    if seen.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            frontier = next;
        }
        let mut out: Vec<HexCoord> = seen.into_iter().collect();
        out.sort();
        out
    }
}
