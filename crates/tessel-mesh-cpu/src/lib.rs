//! CPU chunk mesher: face-culled quads with baked ambient occlusion and smooth light.
#![forbid(unsafe_code)]

mod face;
mod mesh_build;
mod mesher;

pub use face::Face;
pub use mesh_build::{ChunkMesh, ChunkVertex};
pub use mesher::{VertexLight, mesh_chunk, mesh_chunk_into, vertex_light};
