use crate::chunk::ChunkCoord;

/// Inclusive integer box over grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBounds {
    pub min: (i32, i32, i32),
    pub max: (i32, i32, i32),
}

impl CellBounds {
    #[inline]
    pub fn point(x: i32, y: i32, z: i32) -> Self {
        Self {
            min: (x, y, z),
            max: (x, y, z),
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.min.0
            && x <= self.max.0
            && y >= self.min.1
            && y <= self.max.1
            && z >= self.min.2
            && z <= self.max.2
    }

    #[inline]
    pub fn grow(&mut self, x: i32, y: i32, z: i32) {
        self.min = (self.min.0.min(x), self.min.1.min(y), self.min.2.min(z));
        self.max = (self.max.0.max(x), self.max.1.max(y), self.max.2.max(z));
    }

    #[inline]
    pub fn union(mut self, other: CellBounds) -> CellBounds {
        self.grow(other.min.0, other.min.1, other.min.2);
        self.grow(other.max.0, other.max.1, other.max.2);
        self
    }

    #[inline]
    pub fn expanded(self, by: i32) -> CellBounds {
        CellBounds {
            min: (self.min.0 - by, self.min.1 - by, self.min.2 - by),
            max: (self.max.0 + by, self.max.1 + by, self.max.2 + by),
        }
    }

    /// Every chunk of edge `size` that intersects the box.
    pub fn chunks(&self, size: u8) -> impl Iterator<Item = ChunkCoord> + use<> {
        let lo = ChunkCoord::containing(self.min.0, self.min.1, self.min.2, size);
        let hi = ChunkCoord::containing(self.max.0, self.max.1, self.max.2, size);
        (lo.cz..=hi.cz).flat_map(move |cz| {
            (lo.cy..=hi.cy)
                .flat_map(move |cy| (lo.cx..=hi.cx).map(move |cx| ChunkCoord::new(cx, cy, cz)))
        })
    }
}
