use rand::Rng;
use tessel_blocks::VoxelType;
use tessel_world::World;

use crate::obstacles::ObstacleMask;
use crate::walk::PathQuery;

// Targets never reach into the top few layers of the grid.
const CEILING_MARGIN: i32 = 5;

fn sample<R: Rng + ?Sized>(rng: &mut R, from: i32, to: i32) -> Option<i32> {
    (to > from).then(|| rng.gen_range(from..to))
}

/// Picks a random standable feet cell near `origin`, within `radius` on
/// each axis. A single column is sampled; `None` when that column has
/// nothing suitable, so callers simply retry.
///
/// Tree surfaces are rejected so agents do not wander onto canopies.
pub fn find_target<R: Rng + ?Sized>(
    world: &World,
    obstacles: &ObstacleMask,
    rng: &mut R,
    origin: (i32, i32, i32),
    radius: i32,
    height: i32,
) -> Option<(i32, i32, i32)> {
    let desc = &world.desc;
    let (ox, oy, oz) = origin;
    let x = sample(rng, (ox - radius).max(1), (ox + radius).min(desc.width - 1))?;
    let z = sample(rng, (oz - radius).max(1), (oz + radius).min(desc.depth - 1))?;

    let ground = world.height_at(x, z);
    if ground < desc.sea_level {
        return None;
    }
    let from_y = (oy - radius).max(desc.sea_level);
    let to_y = (oy.min(ground) + radius).min(desc.height - CEILING_MARGIN);
    let y = sample(rng, from_y, to_y)?;

    let start = world.address(x, y, z)?;
    if world.voxels[start].ty != VoxelType::Air || obstacles.is_blocked_index(start) {
        return None;
    }

    let query = PathQuery::new(world, obstacles, height);
    for sy in (desc.sea_level..y).rev() {
        match world.voxel_type(x, sy, z) {
            None | Some(VoxelType::Air) | Some(VoxelType::Tree) => continue,
            Some(_) => {}
        }
        if query.can_walk(x, sy, z) {
            log::trace!(target: "path", "target ({},{},{}) near {:?}", x, sy + 1, z, origin);
            return Some((x, sy + 1, z));
        }
    }
    None
}
