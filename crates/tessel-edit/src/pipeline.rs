use tessel_blocks::{MAX_LIGHT, Rgb, VoxelType};
use tessel_lighting::{LightChannel, LightScratch, flood_light, remove_light};
use tessel_world::{CellBounds, NEIGHBORS, World};

/// Outcome of an edit that changed the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditReport {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub previous: VoxelType,
    pub ty: VoxelType,
    /// Every cell whose type, color or light was written.
    pub touched: CellBounds,
}

impl EditReport {
    #[inline]
    pub fn type_changed(&self) -> bool {
        self.previous != self.ty
    }
}

/// Writes one voxel and repairs the heightmap and both light fields.
///
/// Returns `None` when the cell is on the outer margin or outside the grid,
/// and when type and color already match. A color-only change is written
/// without touching light.
pub fn set_voxel(
    world: &mut World,
    scratch: &mut LightScratch,
    x: i32,
    y: i32,
    z: i32,
    ty: VoxelType,
    color: Rgb,
) -> Option<EditReport> {
    if !world.desc.in_interior(x, y, z) {
        log::trace!(target: "edit", "ignored edit at ({x},{y},{z}): outside interior");
        return None;
    }
    let i = world.address(x, y, z)?;
    let previous = world.voxels[i].ty;
    if previous == ty && world.voxels[i].color == color {
        return None;
    }

    world.voxels[i].ty = ty;
    world.voxels[i].color = color;
    let mut report = EditReport {
        x,
        y,
        z,
        previous,
        ty,
        touched: CellBounds::point(x, y, z),
    };
    if previous == ty {
        return Some(report);
    }

    update_height(world, x, y, z, ty);
    // stale bounds from an earlier pass
    scratch.take_touched();

    // Drop whatever the old cell contributed.
    if previous == VoxelType::Light {
        let level = world.voxels[i].block_light;
        world.voxels[i].block_light = 0;
        remove_light(world, LightChannel::Block, &[(i, level)], scratch);
    } else if previous == VoxelType::Air && ty != VoxelType::Air {
        for channel in LightChannel::ALL {
            let level = channel.get(&world.voxels[i]);
            if level != 0 {
                channel.set(&mut world.voxels[i], 0);
                remove_light(world, channel, &[(i, level)], scratch);
            }
        }
    }

    // Then let the new cell take part.
    if ty == VoxelType::Light {
        world.voxels[i].block_light = MAX_LIGHT;
        flood_light(world, LightChannel::Block, &[i], scratch);
    } else if ty == VoxelType::Air {
        let mut seeds = Vec::with_capacity(NEIGHBORS.len());
        for channel in LightChannel::ALL {
            seeds.clear();
            seeds.extend(NEIGHBORS.iter().filter_map(|&(dx, dy, dz)| {
                let n = world.address(x + dx, y + dy, z + dz)?;
                (channel.get(&world.voxels[n]) != 0).then_some(n)
            }));
            flood_light(world, channel, &seeds, scratch);
        }
    }

    if let Some(lit) = scratch.take_touched() {
        report.touched = report.touched.union(lit);
    }
    log::debug!(
        target: "edit",
        "{} -> {} at ({x},{y},{z}), touched {:?}..={:?}",
        previous.name(),
        ty.name(),
        report.touched.min,
        report.touched.max
    );
    Some(report)
}

fn update_height(world: &mut World, x: i32, y: i32, z: i32, ty: VoxelType) {
    let height = world.height_at(x, z);
    if ty == VoxelType::Air {
        if y == height {
            let mut h = y - 1;
            while h > 0 && world.is_air(x, h, z) {
                h -= 1;
            }
            world.heightmap.set(x, z, h);
        }
    } else if height < y {
        world.heightmap.set(x, z, y);
    }
}
