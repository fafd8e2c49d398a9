//! Voxel grid storage, heightmap, chunk regions, and world configuration.
#![forbid(unsafe_code)]

pub mod bounds;
pub mod chunk;
pub mod config;
pub mod error;
pub mod grid;
pub mod world;

pub use bounds::CellBounds;
pub use chunk::{ChunkCoord, ChunkRegion};
pub use config::{SceneSection, WorldConfig, WorldSection, load_config_from_path};
pub use error::{RegionError, WorldError};
pub use grid::{NEIGHBORS, WorldDesc};
pub use world::{Heightmap, LightLevel, World};
