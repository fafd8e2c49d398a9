//! Collision boxes for a chunk: solid cells merged into axis-aligned runs.
#![forbid(unsafe_code)]

use tessel_blocks::VoxelType;
use tessel_geom::{Aabb, Vec3};
use tessel_world::{ChunkRegion, RegionError, World};

/// Box in chunk-local cells: origin `(x,y,z)` and extent `(w,h,d)` along x, y, z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderBox {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub w: u8,
    pub h: u8,
    pub d: u8,
}

impl ColliderBox {
    #[inline]
    pub fn volume(&self) -> usize {
        self.w as usize * self.h as usize * self.d as usize
    }

    #[inline]
    pub fn contains_local(&self, x: u8, y: u8, z: u8) -> bool {
        x >= self.x
            && x < self.x + self.w
            && y >= self.y
            && y < self.y + self.h
            && z >= self.z
            && z < self.z + self.d
    }

    /// World-space box for a physics engine.
    pub fn world_aabb(&self, chunk: ChunkRegion) -> Aabb {
        let min = Vec3::new(
            (chunk.x + i32::from(self.x)) as f32,
            (chunk.y + i32::from(self.y)) as f32,
            (chunk.z + i32::from(self.z)) as f32,
        );
        let size = Vec3::new(self.w as f32, self.h as f32, self.d as f32);
        Aabb::new(min, min + size)
    }
}

/// Claimed-cell bitmap reused across chunks.
#[derive(Debug, Default)]
pub struct ColliderScratch {
    claimed: Vec<bool>,
}

impl ColliderScratch {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, volume: usize) {
        self.claimed.clear();
        self.claimed.resize(volume, false);
    }
}

// Chunk-local cell is solid and not yet part of a box.
#[inline]
fn is_open(world: &World, chunk: ChunkRegion, claimed: &[bool], x: usize, y: usize, z: usize) -> bool {
    let solid = world
        .voxel_type(chunk.x + x as i32, chunk.y + y as i32, chunk.z + z as i32)
        .is_some_and(|t| t != VoxelType::Air);
    solid && !claimed[chunk.local_index(x, y, z)]
}

/// Greedy box merge over the solid cells of `chunk`.
pub fn extract_colliders(
    world: &World,
    chunk: ChunkRegion,
    scratch: &mut ColliderScratch,
) -> Result<Vec<ColliderBox>, RegionError> {
    let mut out = Vec::new();
    extract_colliders_into(world, chunk, scratch, &mut out)?;
    Ok(out)
}

/// Like [`extract_colliders`], appending into `out`. Returns the number of
/// boxes added.
///
/// Scans z, then y, then x. Each unclaimed solid cell starts a box that
/// extends along z first, then y over the whole z run, then x over the whole
/// y-z footprint; every covered cell is claimed so boxes never overlap.
pub fn extract_colliders_into(
    world: &World,
    chunk: ChunkRegion,
    scratch: &mut ColliderScratch,
    out: &mut Vec<ColliderBox>,
) -> Result<usize, RegionError> {
    world.check_chunk(chunk)?;
    let s = chunk.size as usize;
    scratch.reset(chunk.volume());
    let claimed = &mut scratch.claimed;
    let start = out.len();

    for z in 0..s {
        for y in 0..s {
            for x in 0..s {
                if !is_open(world, chunk, claimed, x, y, z) {
                    continue;
                }

                let mut depth = s - z;
                for i in z + 1..s {
                    if !is_open(world, chunk, claimed, x, y, i) {
                        depth = i - z;
                        break;
                    }
                }

                let mut height = s - y;
                for i in z..z + depth {
                    for j in y + 1..y + height {
                        if !is_open(world, chunk, claimed, x, j, i) {
                            height = j - y;
                            break;
                        }
                    }
                }

                let mut width = s - x;
                for i in z..z + depth {
                    for j in y..y + height {
                        for k in x + 1..x + width {
                            if !is_open(world, chunk, claimed, k, j, i) {
                                width = k - x;
                                break;
                            }
                        }
                    }
                }

                for i in z..z + depth {
                    for j in y..y + height {
                        for k in x..x + width {
                            claimed[chunk.local_index(k, j, i)] = true;
                        }
                    }
                }
                out.push(ColliderBox {
                    x: x as u8,
                    y: y as u8,
                    z: z as u8,
                    w: width as u8,
                    h: height as u8,
                    d: depth as u8,
                });
            }
        }
    }

    let added = out.len() - start;
    log::trace!(
        target: "physics",
        "chunk at ({},{},{}) size {}: {} boxes",
        chunk.x,
        chunk.y,
        chunk.z,
        chunk.size,
        added
    );
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_blocks::{Rgb, Voxel};
    use tessel_world::WorldDesc;

    fn world(n: i32) -> World {
        World::new(WorldDesc::new(n, n, n, 0).unwrap())
    }

    fn fill(w: &mut World, min: (i32, i32, i32), max: (i32, i32, i32)) {
        for z in min.2..=max.2 {
            for y in min.1..=max.1 {
                for x in min.0..=max.0 {
                    let i = w.address(x, y, z).unwrap();
                    w.voxels[i] = Voxel::new(VoxelType::Stone, Rgb::WHITE);
                }
            }
        }
    }

    #[test]
    fn solid_chunk_is_one_box() {
        let mut w = world(8);
        fill(&mut w, (0, 0, 0), (7, 7, 7));
        let boxes = extract_colliders(&w, ChunkRegion::new(4, 0, 4, 4), &mut ColliderScratch::new()).unwrap();
        assert_eq!(boxes, vec![ColliderBox { x: 0, y: 0, z: 0, w: 4, h: 4, d: 4 }]);
    }

    #[test]
    fn empty_chunk_has_no_boxes() {
        let w = world(8);
        let boxes = extract_colliders(&w, ChunkRegion::new(0, 0, 0, 8), &mut ColliderScratch::new()).unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn l_shape_splits_in_scan_order() {
        let mut w = world(4);
        // floor row along x at y=0,z=0 plus a post at x=0
        fill(&mut w, (0, 0, 0), (3, 0, 0));
        fill(&mut w, (0, 1, 0), (0, 2, 0));
        let boxes = extract_colliders(&w, ChunkRegion::new(0, 0, 0, 4), &mut ColliderScratch::new()).unwrap();
        // the post grows first from (0,0,0) along y, then the rest of the floor
        assert_eq!(
            boxes,
            vec![
                ColliderBox { x: 0, y: 0, z: 0, w: 1, h: 3, d: 1 },
                ColliderBox { x: 1, y: 0, z: 0, w: 3, h: 1, d: 1 },
            ]
        );
    }

    #[test]
    fn depth_run_stops_at_a_gap() {
        let mut w = world(6);
        fill(&mut w, (1, 1, 0), (1, 1, 1));
        fill(&mut w, (1, 1, 3), (1, 1, 5));
        let boxes = extract_colliders(&w, ChunkRegion::new(0, 0, 0, 6), &mut ColliderScratch::new()).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!((boxes[0].z, boxes[0].d), (0, 2));
        assert_eq!((boxes[1].z, boxes[1].d), (3, 3));
        let a = boxes[1].world_aabb(ChunkRegion::new(0, 0, 0, 6));
        assert_eq!(a.min, Vec3::new(1.0, 1.0, 3.0));
        assert_eq!(a.max, Vec3::new(2.0, 2.0, 6.0));
    }

    #[test]
    fn out_of_range_chunk_is_an_error() {
        let w = world(8);
        let mut s = ColliderScratch::new();
        assert!(extract_colliders(&w, ChunkRegion::new(0, 0, 5, 4), &mut s).is_err());
    }
}
