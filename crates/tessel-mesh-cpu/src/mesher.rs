use tessel_blocks::{MAX_LIGHT, Voxel, VoxelType};
use tessel_world::{ChunkRegion, RegionError, World};

use crate::face::Face;
use crate::mesh_build::{ChunkMesh, ChunkVertex};

/// Per-vertex shading: occlusion in `{0, 20, 40, 60}` and both light
/// channels normalized to `0..=255`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexLight {
    pub ao: u8,
    pub block: u8,
    pub sun: u8,
}

const AO_STEP: u8 = 20;

#[inline]
fn normalize(sum: u32, n: u32) -> u8 {
    (sum as f32 / n as f32 / MAX_LIGHT as f32 * 255.0) as u8
}

/// Shading for one corner of a face. `air` is the face's own Air cell and
/// `cells` the two edge neighbors and the diagonal around the corner, in
/// that order (see [`Face::corner_cells`]).
pub fn vertex_light(world: &World, air: &Voxel, cells: [(i32, i32, i32); 3]) -> VertexLight {
    let [e1, e2, diag] = cells.map(|(x, y, z)| world.voxel(x, y, z));
    let solid = |v: Option<&Voxel>| v.is_some_and(|v| v.ty != VoxelType::Air);
    let open = |v: Option<&Voxel>| v.is_some_and(|v| v.ty == VoxelType::Air);

    let (o1, o2, o3) = (solid(e1), solid(e2), solid(diag));
    let mut ao = 0;
    if o1 {
        ao += AO_STEP;
    }
    if o2 {
        ao += AO_STEP;
    }
    if (o1 && o2) || o3 {
        ao += AO_STEP;
    }

    let mut block = u32::from(air.block_light);
    let mut sun = u32::from(air.sunlight);
    let mut n = 1;
    let (a1, a2) = (open(e1), open(e2));
    let mut sample = |v: Option<&Voxel>| {
        if let Some(v) = v {
            block += u32::from(v.block_light);
            sun += u32::from(v.sunlight);
            n += 1;
        }
    };
    if a1 {
        sample(e1);
    }
    if a2 {
        sample(e2);
    }
    if (a1 || a2) && open(diag) {
        sample(diag);
    }

    VertexLight {
        ao,
        block: normalize(block, n),
        sun: normalize(sun, n),
    }
}

/// Meshes `chunk` into a fresh buffer.
pub fn mesh_chunk(world: &World, chunk: ChunkRegion) -> Result<ChunkMesh, RegionError> {
    let mut mesh = ChunkMesh::default();
    mesh_chunk_into(world, chunk, &mut mesh)?;
    Ok(mesh)
}

/// Meshes `chunk` into `out`, reusing its allocations. A face is emitted for
/// every side of a non-Air cell whose neighbor is an in-grid Air cell; cells
/// outside the chunk are read for culling and shading.
pub fn mesh_chunk_into(
    world: &World,
    chunk: ChunkRegion,
    out: &mut ChunkMesh,
) -> Result<(), RegionError> {
    world.check_chunk(chunk)?;
    out.clear_keep_capacity();
    let s = i32::from(chunk.size);

    for z in chunk.z..chunk.z + s {
        for y in chunk.y..chunk.y + s {
            for x in chunk.x..chunk.x + s {
                let Some(voxel) = world.voxel(x, y, z) else {
                    continue;
                };
                if voxel.ty == VoxelType::Air {
                    continue;
                }
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let air_pos = (x + dx, y + dy, z + dz);
                    let Some(air) = world.voxel(air_pos.0, air_pos.1, air_pos.2) else {
                        continue;
                    };
                    if air.ty != VoxelType::Air {
                        continue;
                    }
                    let mut quad = [ChunkVertex::default(); 4];
                    let mut ao = [0u8; 4];
                    for (i, corner) in face.corners().into_iter().enumerate() {
                        let shade = vertex_light(world, air, face.corner_cells(air_pos, corner));
                        let color = voxel.color.scaled(1.0 - f32::from(shade.ao) / 255.0);
                        ao[i] = shade.ao;
                        quad[i] = ChunkVertex {
                            pos: [
                                (x + corner.0 - chunk.x) as u8,
                                (y + corner.1 - chunk.y) as u8,
                                (z + corner.2 - chunk.z) as u8,
                            ],
                            color: [color.r, color.g, color.b],
                            light: [shade.block, shade.sun],
                        };
                    }
                    let flip = u16::from(ao[0]) + u16::from(ao[2]) > u16::from(ao[1]) + u16::from(ao[3]);
                    out.add_quad(quad, flip);
                }
            }
        }
    }
    out.finish();
    log::trace!(
        target: "mesh",
        "chunk at ({},{},{}) size {}: {} faces, radius {:.2}",
        chunk.x,
        chunk.y,
        chunk.z,
        chunk.size,
        out.face_count(),
        out.bounds.radius
    );
    Ok(())
}
