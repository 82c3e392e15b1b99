//! Hazard field around hostile structures
//!
//! Every cell within the configured radius of a hostile structure is
//! unsafe this turn. The planner penalizes or excludes these cells; the
//! allocator filters objectives through them.

use ahash::AHashSet;

use crate::grid::HexCoord;

/// Set of coordinates considered unsafe for the current turn
#[derive(Debug, Clone, Default)]
pub struct HazardMap {
    unsafe_cells: AHashSet<HexCoord>,
}

impl HazardMap {
    /// Mark every cell within `radius` of each hostile structure,
    /// structure cells included
    pub fn from_structures(structures: impl IntoIterator<Item = HexCoord>, radius: u32) -> Self {
        let mut unsafe_cells = AHashSet::new();
        for structure in structures {
            unsafe_cells.extend(structure.within_range(radius));
        }
        Self { unsafe_cells }
    }

    pub fn is_hazard(&self, coord: HexCoord) -> bool {
        self.unsafe_cells.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.unsafe_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unsafe_cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_without_structures() {
        let hazards = HazardMap::from_structures(std::iter::empty(), 2);
        assert!(hazards.is_empty());
        assert!(!hazards.is_hazard(HexCoord::new(0, 0)));
    }

    #[test]
    fn test_structure_cell_is_hazard() {
        let hazards = HazardMap::from_structures([HexCoord::new(4, 4)], 2);
        assert!(hazards.is_hazard(HexCoord::new(4, 4)));
    }

    #[test]
    fn test_radius_boundary() {
        let structure = HexCoord::new(0, 0);
        let hazards = HazardMap::from_structures([structure], 2);

        for coord in structure.within_range(2) {
            assert!(hazards.is_hazard(coord), "{:?} inside radius", coord);
        }
        // Distance 3 cell stays safe
        assert!(!hazards.is_hazard(HexCoord::new(3, 0)));
        assert_eq!(hazards.len(), 19);
    }

    #[test]
    fn test_overlapping_structures_union() {
        let hazards =
            HazardMap::from_structures([HexCoord::new(0, 0), HexCoord::new(1, 0)], 1);
        assert!(hazards.is_hazard(HexCoord::new(0, 0)));
        assert!(hazards.is_hazard(HexCoord::new(2, 0)));
        // Overlap counted once
        assert!(hazards.len() < 14);
    }
}
