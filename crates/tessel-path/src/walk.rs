use tessel_blocks::VoxelType;
use tessel_world::World;

use crate::obstacles::ObstacleMask;

/// One move offered from a node: the node stepped into and what it costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub to: (i32, i32, i32),
    pub cost: u32,
}

const LATERAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Everything a walkability test reads, borrowed for one query. Nodes are
/// the Air cell an agent's feet occupy; the surface is the cell below.
#[derive(Clone, Copy)]
pub struct PathQuery<'a> {
    pub world: &'a World,
    pub obstacles: &'a ObstacleMask,
    /// Agent height in cells.
    pub height: i32,
}

impl<'a> PathQuery<'a> {
    pub fn new(world: &'a World, obstacles: &'a ObstacleMask, height: i32) -> Self {
        Self {
            world,
            obstacles,
            height,
        }
    }

    /// Whether `(x,y,z)` is a surface an agent can stand on: at or above sea
    /// level, non-Air, with `height` free Air cells stacked on top.
    pub fn can_walk(&self, x: i32, y: i32, z: i32) -> bool {
        if y < self.world.desc.sea_level {
            return false;
        }
        match self.world.voxel_type(x, y, z) {
            None | Some(VoxelType::Air) => return false,
            Some(_) => {}
        }
        (1..=self.height).all(|h| {
            self.world.address(x, y + h, z).is_some_and(|i| {
                self.world.voxels[i].ty == VoxelType::Air && !self.obstacles.is_blocked_index(i)
            })
        })
    }

    /// Moves out of `node`, at most one per lateral direction. The first
    /// option that applies wins: walk level (cost 1), step up one (cost 2),
    /// drop one (cost 2).
    pub fn neighbors_into(&self, node: (i32, i32, i32), out: &mut Vec<Step>) {
        out.clear();
        let (x, y, z) = node;
        for (dx, dz) in LATERAL {
            let (nx, nz) = (x + dx, z + dz);
            let step = if self.can_walk(nx, y - 1, nz) {
                Step { to: (nx, y, nz), cost: 1 }
            } else if self.can_walk(nx, y, nz) {
                Step { to: (nx, y + 1, nz), cost: 2 }
            } else if self.can_walk(nx, y - 2, nz) {
                Step { to: (nx, y - 1, nz), cost: 2 }
            } else {
                continue;
            };
            out.push(step);
        }
    }

    pub fn neighbors(&self, node: (i32, i32, i32)) -> Vec<Step> {
        let mut out = Vec::with_capacity(LATERAL.len());
        self.neighbors_into(node, &mut out);
        out
    }
}
