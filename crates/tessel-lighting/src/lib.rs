//! Flood-fill lighting over the voxel grid: block light and sunlight.
#![forbid(unsafe_code)]

use tessel_blocks::{MAX_LIGHT, Voxel, VoxelType};
use tessel_world::{CellBounds, NEIGHBORS, World};

mod audit;

pub use audit::{LightViolation, audit_light};

/// The two independent light fields stored on each voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Block,
    Sun,
}

impl LightChannel {
    pub const ALL: [LightChannel; 2] = [LightChannel::Block, LightChannel::Sun];

    #[inline]
    pub fn get(self, v: &Voxel) -> u8 {
        match self {
            LightChannel::Block => v.block_light,
            LightChannel::Sun => v.sunlight,
        }
    }

    #[inline]
    pub fn set(self, v: &mut Voxel, level: u8) {
        match self {
            LightChannel::Block => v.block_light = level,
            LightChannel::Sun => v.sunlight = level,
        }
    }

    #[inline]
    fn is_sun(self) -> bool {
        matches!(self, LightChannel::Sun)
    }
}

/// Reusable frontier buffers for flood and removal passes, plus the bounding
/// box of every cell a pass has written since the last [`LightScratch::take_touched`].
///
/// Buffers are cleared at the start of each pass; nothing carries over
/// between calls except allocated capacity.
#[derive(Debug, Default)]
pub struct LightScratch {
    frontier: Vec<usize>,
    next: Vec<usize>,
    removal: Vec<(usize, u8)>,
    removal_next: Vec<(usize, u8)>,
    reflood: Vec<usize>,
    touched: Option<CellBounds>,
}

impl LightScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells written since the last call, or `None` if no light changed.
    pub fn take_touched(&mut self) -> Option<CellBounds> {
        self.touched.take()
    }

    /// Folds an externally written cell into the touched box.
    #[inline]
    pub fn touch(&mut self, x: i32, y: i32, z: i32) {
        touch(&mut self.touched, x, y, z);
    }
}

#[inline]
fn touch(touched: &mut Option<CellBounds>, x: i32, y: i32, z: i32) {
    match touched {
        Some(b) => b.grow(x, y, z),
        None => *touched = Some(CellBounds::point(x, y, z)),
    }
}

/// Spreads light outward from `seeds`, which must already hold their level.
/// Returns the number of cells raised.
pub fn flood_light(
    world: &mut World,
    channel: LightChannel,
    seeds: &[usize],
    scratch: &mut LightScratch,
) -> usize {
    scratch.frontier.clear();
    scratch.frontier.extend_from_slice(seeds);
    let raised = flood_frontier(
        world,
        channel,
        &mut scratch.frontier,
        &mut scratch.next,
        &mut scratch.touched,
    );
    log::trace!(target: "lighting", "flood {:?}: {} seeds raised {} cells", channel, seeds.len(), raised);
    raised
}

// Level-synchronous BFS. `frontier` is consumed; both buffers end empty.
fn flood_frontier(
    world: &mut World,
    channel: LightChannel,
    frontier: &mut Vec<usize>,
    next: &mut Vec<usize>,
    touched: &mut Option<CellBounds>,
) -> usize {
    let sun = channel.is_sun();
    let mut raised = 0;
    while !frontier.is_empty() {
        next.clear();
        for &cell in frontier.iter() {
            let light = channel.get(&world.voxels[cell]);
            if light == 0 {
                continue;
            }
            let (x, y, z) = world.desc.coords(cell);
            for (n, &(dx, dy, dz)) in NEIGHBORS.iter().enumerate() {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                let Some(ni) = world.address(nx, ny, nz) else {
                    continue;
                };
                if world.voxels[ni].ty != VoxelType::Air {
                    continue;
                }
                // Full sunlight keeps its level straight down and stays out
                // of the open air above the terrain sideways and upward.
                let level = if sun && n == 0 && light == MAX_LIGHT {
                    light
                } else {
                    if sun && n != 0 && light == MAX_LIGHT && ny > world.height_at(nx, nz) {
                        continue;
                    }
                    light - 1
                };
                let v = &mut world.voxels[ni];
                if channel.get(v) >= level {
                    continue;
                }
                channel.set(v, level);
                touch(touched, nx, ny, nz);
                raised += 1;
                next.push(ni);
            }
        }
        std::mem::swap(frontier, next);
    }
    next.clear();
    raised
}

/// Cascading removal. Each source is a cell index paired with the level it
/// held before being darkened; the caller has already zeroed it. Cells lit
/// only through a removed path go dark, then surviving neighbors re-flood
/// into the hole. Returns the number of cells darkened.
pub fn remove_light(
    world: &mut World,
    channel: LightChannel,
    sources: &[(usize, u8)],
    scratch: &mut LightScratch,
) -> usize {
    let sun = channel.is_sun();
    let LightScratch {
        frontier,
        next,
        removal,
        removal_next,
        reflood,
        touched,
    } = scratch;
    removal.clear();
    removal.extend_from_slice(sources);
    reflood.clear();

    let mut darkened = 0;
    while !removal.is_empty() {
        removal_next.clear();
        for &(cell, light) in removal.iter() {
            let (x, y, z) = world.desc.coords(cell);
            for (n, &(dx, dy, dz)) in NEIGHBORS.iter().enumerate() {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                let Some(ni) = world.address(nx, ny, nz) else {
                    continue;
                };
                let v = &mut world.voxels[ni];
                if v.ty != VoxelType::Air {
                    // Neighboring emitters are alternate sources for the hole.
                    if !sun && v.ty.is_emitter() && v.block_light > 0 {
                        reflood.push(ni);
                    }
                    continue;
                }
                let level = channel.get(v);
                if level == 0 {
                    continue;
                }
                if level < light || (sun && n == 0 && light == MAX_LIGHT && level == MAX_LIGHT) {
                    channel.set(v, 0);
                    touch(touched, nx, ny, nz);
                    darkened += 1;
                    removal_next.push((ni, level));
                } else {
                    reflood.push(ni);
                }
            }
        }
        std::mem::swap(removal, removal_next);
    }

    let reflood_seeds = reflood.len();
    frontier.clear();
    frontier.append(reflood);
    let raised = flood_frontier(world, channel, frontier, next, touched);
    log::trace!(
        target: "lighting",
        "remove {:?}: {} sources darkened {} cells, {} reflood seeds raised {}",
        channel,
        sources.len(),
        darkened,
        reflood_seeds,
        raised
    );
    darkened
}

/// Full propagation after bulk generation. Assumes every light value is
/// zero. Seeds sunlight on the Air cells of the top row and block light on
/// every emitter, then floods sunlight before block light.
pub fn propagate(world: &mut World, scratch: &mut LightScratch) {
    let top = world.desc.height - 1;
    let mut sun_seeds = Vec::new();
    let mut block_seeds = Vec::new();
    for (i, v) in world.voxels.iter_mut().enumerate() {
        match v.ty {
            VoxelType::Air => {
                if world.desc.coords(i).1 == top {
                    v.sunlight = MAX_LIGHT;
                    sun_seeds.push(i);
                }
            }
            VoxelType::Light => {
                v.block_light = MAX_LIGHT;
                block_seeds.push(i);
            }
            _ => {}
        }
    }
    let sun = flood_light(world, LightChannel::Sun, &sun_seeds, scratch);
    let block = flood_light(world, LightChannel::Block, &block_seeds, scratch);
    scratch.touched = None;
    log::debug!(
        target: "lighting",
        "propagate: {} sky seeds lit {} cells, {} emitters lit {} cells",
        sun_seeds.len(),
        sun,
        block_seeds.len(),
        block
    );
}
