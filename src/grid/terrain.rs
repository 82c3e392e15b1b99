//! Terrain classes carried by the arena feed
//!
//! The feed tags every cell with a numeric type code; traversal cost is
//! delivered separately per cell, so terrain here is classification only.

use serde::{Deserialize, Serialize};

/// Terrain class of a single arena cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    /// Structure cell: one of our home cells or a hostile nest
    Nest,
    #[default]
    Plain,
    Dirt,
    Acid,
    /// Rock always arrives with the impassable sentinel cost
    Rock,
    /// Unrecognized code, kept verbatim; never treated as free space
    Unknown(u8),
}

impl Terrain {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Terrain::Nest,
            2 => Terrain::Plain,
            3 => Terrain::Dirt,
            4 => Terrain::Acid,
            5 => Terrain::Rock,
            other => Terrain::Unknown(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Terrain::Nest => 1,
            Terrain::Plain => 2,
            Terrain::Dirt => 3,
            Terrain::Acid => 4,
            Terrain::Rock => 5,
            Terrain::Unknown(other) => *other,
        }
    }

    /// Structure cells host either side's nest
    pub fn is_nest(&self) -> bool {
        matches!(self, Terrain::Nest)
    }
}
