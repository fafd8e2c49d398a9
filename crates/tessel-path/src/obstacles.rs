use tessel_world::WorldDesc;

/// Transient per-cell occupancy (other agents and the like), indexed like
/// the voxel grid. Supplied per query and never stored in the world.
#[derive(Clone, Debug)]
pub struct ObstacleMask {
    desc: WorldDesc,
    cells: Vec<bool>,
}

impl ObstacleMask {
    pub fn new(desc: WorldDesc) -> Self {
        Self {
            desc,
            cells: vec![false; desc.volume()],
        }
    }

    /// Mask with every in-grid point blocked; out-of-range points are ignored.
    pub fn from_points<I>(desc: WorldDesc, points: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32, i32)>,
    {
        let mut mask = Self::new(desc);
        for (x, y, z) in points {
            mask.set(x, y, z, true);
        }
        mask
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, blocked: bool) {
        if let Some(i) = self.desc.address(x, y, z) {
            self.cells[i] = blocked;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32, z: i32) -> bool {
        self.desc
            .address(x, y, z)
            .is_some_and(|i| self.is_blocked_index(i))
    }

    #[inline]
    pub fn is_blocked_index(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|b| **b).count()
    }
}
