use rand::Rng;
use tessel_blocks::{MAX_LIGHT, Rgb, Voxel, VoxelType};

use crate::chunk::ChunkRegion;
use crate::error::RegionError;
use crate::grid::WorldDesc;

/// Per-column y of the topmost non-Air voxel. All-Air columns read 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heightmap {
    width: i32,
    depth: i32,
    heights: Vec<i32>,
}

impl Heightmap {
    pub fn new(width: i32, depth: i32) -> Self {
        Self {
            width,
            depth,
            heights: vec![0; width.max(0) as usize * depth.max(0) as usize],
        }
    }

    #[inline]
    fn slot(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || x >= self.width || z < 0 || z >= self.depth {
            return None;
        }
        Some(z as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn get(&self, x: i32, z: i32) -> Option<i32> {
        self.slot(x, z).map(|i| self.heights[i])
    }

    #[inline]
    pub fn set(&mut self, x: i32, z: i32, y: i32) {
        if let Some(i) = self.slot(x, z) {
            self.heights[i] = y;
        }
    }

    /// Lifts the column to `y` if it is currently lower.
    #[inline]
    pub fn raise(&mut self, x: i32, z: i32, y: i32) {
        if let Some(i) = self.slot(x, z) {
            if self.heights[i] < y {
                self.heights[i] = y;
            }
        }
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.heights
    }
}

/// Light at one cell, in raw levels `[0, MAX_LIGHT]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightLevel {
    pub block: u8,
    pub sun: u8,
}

impl LightLevel {
    #[inline]
    fn to_byte(level: u8) -> u8 {
        (level as f32 / MAX_LIGHT as f32 * 255.0) as u8
    }

    /// Block light in the high byte, sunlight in the low byte, each
    /// normalized to `0..=255`.
    #[inline]
    pub fn packed(self) -> u16 {
        (u16::from(Self::to_byte(self.block)) << 8) | u16::from(Self::to_byte(self.sun))
    }
}

/// The voxel grid plus its heightmap. Every other component borrows this for
/// the duration of one call.
#[derive(Clone, Debug)]
pub struct World {
    pub desc: WorldDesc,
    pub voxels: Vec<Voxel>,
    pub heightmap: Heightmap,
}

impl World {
    /// All-Air grid with a zeroed heightmap.
    pub fn new(desc: WorldDesc) -> Self {
        Self {
            desc,
            voxels: vec![Voxel::AIR; desc.volume()],
            heightmap: Heightmap::new(desc.width, desc.depth),
        }
    }

    #[inline]
    pub fn address(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        self.desc.address(x, y, z)
    }

    #[inline]
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        self.address(x, y, z).map(|i| &self.voxels[i])
    }

    /// Type at `(x,y,z)`; `None` outside the grid.
    #[inline]
    pub fn voxel_type(&self, x: i32, y: i32, z: i32) -> Option<VoxelType> {
        self.voxel(x, y, z).map(|v| v.ty)
    }

    /// True only for an in-grid Air cell.
    #[inline]
    pub fn is_air(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.voxel_type(x, y, z), Some(VoxelType::Air))
    }

    /// True only for an in-grid non-Air cell.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.voxel_type(x, y, z), Some(t) if t.is_solid())
    }

    /// Stored column height, 0 outside the grid.
    #[inline]
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        self.heightmap.get(x, z).unwrap_or(0)
    }

    /// Light at an interior cell; `None` within the one-cell margin or outside.
    pub fn light(&self, x: i32, y: i32, z: i32) -> Option<LightLevel> {
        if !self.desc.in_interior(x, y, z) {
            return None;
        }
        self.voxel(x, y, z).map(|v| LightLevel {
            block: v.block_light,
            sun: v.sunlight,
        })
    }

    pub fn check_chunk(&self, chunk: ChunkRegion) -> Result<(), RegionError> {
        if chunk.fits(&self.desc) {
            Ok(())
        } else {
            Err(RegionError::ChunkOutOfBounds(chunk))
        }
    }

    /// Generation-phase write. Sets type and jittered color and raises the
    /// heightmap; light is left untouched, so a bulk `propagate` must follow.
    /// Only meant for non-Air types. Out-of-range writes are ignored.
    pub fn place_voxel<R: Rng + ?Sized>(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        ty: VoxelType,
        color: Rgb,
        noise: u8,
        rng: &mut R,
    ) {
        let Some(i) = self.address(x, y, z) else {
            return;
        };
        let scale = if ty.is_emitter() { 2 } else { -1 };
        let mut jitter = |c: u8| -> u8 {
            let delta = if noise > 0 {
                rng.gen_range(0..i32::from(noise)) * scale
            } else {
                0
            };
            (i32::from(c) + delta).clamp(0, 255) as u8
        };
        let mut color = Rgb::new(jitter(color.r), jitter(color.g), jitter(color.b));
        if y <= self.desc.sea_level {
            color.r /= 2;
            color.g /= 2;
        }
        let v = &mut self.voxels[i];
        v.ty = ty;
        v.color = color;
        self.heightmap.raise(x, z, y);
    }

    /// Topmost non-Air y in the column by brute-force scan; 0 for all-Air
    /// columns and outside the grid.
    pub fn scan_column_height(&self, x: i32, z: i32) -> i32 {
        for y in (1..self.desc.height).rev() {
            if self.is_solid(x, y, z) {
                return y;
            }
        }
        0
    }

    /// Re-derives every column. Only used at initialization, e.g. after the
    /// grid has been filled wholesale.
    pub fn recompute_heightmap(&mut self) {
        for z in 0..self.desc.depth {
            for x in 0..self.desc.width {
                let h = self.scan_column_height(x, z);
                self.heightmap.set(x, z, h);
            }
        }
        log::debug!(
            target: "world",
            "heightmap recomputed for {}x{} columns",
            self.desc.width,
            self.desc.depth
        );
    }
}
