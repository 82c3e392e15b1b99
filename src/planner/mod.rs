//! Budget-limited path search

pub mod astar;
pub mod path;

pub use astar::PathPlanner;
pub use path::{is_contiguous, path_cost, Path};
