//! Grid-constrained A* for agents standing on voxel surfaces, plus random target sampling.
#![forbid(unsafe_code)]

mod astar;
mod error;
mod obstacles;
mod target;
mod walk;

pub use astar::{MAX_VISITED, Waypoint, find_path};
pub use error::PathError;
pub use obstacles::ObstacleMask;
pub use target::find_target;
pub use walk::{PathQuery, Step};

#[cfg(test)]
mod tests;
