//! Within-turn objective claims
//!
//! A claim marks an objective as taken for the rest of the turn so two
//! agents are never routed to the identical target. Resource and home
//! claims are scoped per role; defense posts are global. The ledger is
//! rebuilt empty every turn.

use ahash::AHashSet;

use crate::core::types::Role;
use crate::grid::HexCoord;

#[derive(Debug, Clone, Default)]
pub struct ClaimLedger {
    resources: AHashSet<(Role, HexCoord)>,
    home_cells: AHashSet<(Role, HexCoord)>,
    defense_posts: AHashSet<HexCoord>,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim_resource(&mut self, role: Role, coord: HexCoord) {
        self.resources.insert((role, coord));
    }

    pub fn resource_claimed(&self, role: Role, coord: HexCoord) -> bool {
        self.resources.contains(&(role, coord))
    }

    pub fn claim_home(&mut self, role: Role, coord: HexCoord) {
        self.home_cells.insert((role, coord));
    }

    pub fn home_claimed(&self, role: Role, coord: HexCoord) -> bool {
        self.home_cells.contains(&(role, coord))
    }

    pub fn claim_post(&mut self, coord: HexCoord) {
        self.defense_posts.insert(coord);
    }

    pub fn post_claimed(&self, coord: HexCoord) -> bool {
        self.defense_posts.contains(&coord)
    }
}
