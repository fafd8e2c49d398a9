//! Voxel record, block types, and block color palette.
#![forbid(unsafe_code)]

pub mod palette;
pub mod types;

pub use palette::BlockPalette;
pub use types::{MAX_LIGHT, Rgb, Voxel, VoxelType};
