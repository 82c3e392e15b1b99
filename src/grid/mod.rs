//! Hex grid primitives and the per-turn arena map

pub mod hex;
pub mod model;
pub mod terrain;

pub use hex::HexCoord;
pub use model::{ArenaMap, Cell};
pub use terrain::Terrain;
