use std::fmt;

use tessel_blocks::{MAX_LIGHT, VoxelType};
use tessel_world::World;

/// A cell whose light contradicts its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightViolation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub ty: VoxelType,
    pub block_light: u8,
    pub sunlight: u8,
}

impl fmt::Display for LightViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}, {}) holds block {} sun {}",
            self.ty.name(),
            self.x,
            self.y,
            self.z,
            self.block_light,
            self.sunlight
        )
    }
}

/// Scans the grid for light that only Air may hold, and for levels above
/// the maximum. Emitters must read exactly full block light.
pub fn audit_light(world: &World) -> Vec<LightViolation> {
    let mut out = Vec::new();
    for (i, v) in world.voxels.iter().enumerate() {
        let ok = match v.ty {
            VoxelType::Air => v.block_light <= MAX_LIGHT && v.sunlight <= MAX_LIGHT,
            VoxelType::Light => v.block_light == MAX_LIGHT && v.sunlight == 0,
            _ => v.block_light == 0 && v.sunlight == 0,
        };
        if !ok {
            let (x, y, z) = world.desc.coords(i);
            out.push(LightViolation {
                x,
                y,
                z,
                ty: v.ty,
                block_light: v.block_light,
                sunlight: v.sunlight,
            });
        }
    }
    out
}
