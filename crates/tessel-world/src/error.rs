use crate::chunk::ChunkRegion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldError {
    InvalidDimensions { width: i32, height: i32, depth: i32 },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::InvalidDimensions {
                width,
                height,
                depth,
            } => write!(
                f,
                "world dimensions must be positive, got {}x{}x{}",
                width, height, depth
            ),
        }
    }
}

impl std::error::Error for WorldError {}

/// A request that reaches outside the grid. Callers are expected not to
/// issue these; the error exists so the mistake surfaces cheaply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionError {
    ChunkOutOfBounds(ChunkRegion),
    PointOutOfBounds { x: i32, y: i32, z: i32 },
}

impl std::fmt::Display for RegionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionError::ChunkOutOfBounds(c) => write!(
                f,
                "chunk at ({}, {}, {}) size {} is out of bounds",
                c.x, c.y, c.z, c.size
            ),
            RegionError::PointOutOfBounds { x, y, z } => {
                write!(f, "point ({}, {}, {}) is out of bounds", x, y, z)
            }
        }
    }
}

impl std::error::Error for RegionError {}
