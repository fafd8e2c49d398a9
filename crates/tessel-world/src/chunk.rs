use crate::grid::WorldDesc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// Chunk containing world cell `(x,y,z)`.
    #[inline]
    pub fn containing(x: i32, y: i32, z: i32, size: u8) -> Self {
        let s = i32::from(size.max(1));
        Self {
            cx: x.div_euclid(s),
            cy: y.div_euclid(s),
            cz: z.div_euclid(s),
        }
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

/// Cube `[x, x+size) x [y, y+size) x [z, z+size)` of the grid. Not stored;
/// passed to the mesher and collider extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRegion {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub size: u8,
}

impl ChunkRegion {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32, size: u8) -> Self {
        Self { x, y, z, size }
    }

    #[inline]
    pub fn from_coord(coord: ChunkCoord, size: u8) -> Self {
        let s = i32::from(size);
        Self {
            x: coord.cx * s,
            y: coord.cy * s,
            z: coord.cz * s,
            size,
        }
    }

    #[inline]
    pub fn volume(&self) -> usize {
        let s = self.size as usize;
        s * s * s
    }

    /// Whether the whole cube lies inside the grid.
    #[inline]
    pub fn fits(&self, desc: &WorldDesc) -> bool {
        let s = i32::from(self.size);
        self.x >= 0
            && self.y >= 0
            && self.z >= 0
            && self.x + s <= desc.width
            && self.y + s <= desc.height
            && self.z + s <= desc.depth
    }

    /// Index into a `size^3` scratch buffer for chunk-local `(x,y,z)`.
    #[inline]
    pub fn local_index(&self, x: usize, y: usize, z: usize) -> usize {
        let s = self.size as usize;
        (z * s + y) * s + x
    }
}
