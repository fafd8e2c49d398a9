use crate::error::WorldError;

/// Face neighbor offsets. Straight down comes first: sunlight treats that
/// direction specially and keys off index 0.
pub const NEIGHBORS: [(i32, i32, i32); 6] = [
    (0, -1, 0),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
    (0, 1, 0),
];

/// Immutable grid dimensions plus the sea level threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldDesc {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    pub sea_level: i32,
}

impl WorldDesc {
    pub fn new(width: i32, height: i32, depth: i32, sea_level: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 || depth <= 0 {
            return Err(WorldError::InvalidDimensions {
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            sea_level,
        })
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height && z >= 0 && z < self.depth
    }

    /// True when the cell keeps a one-cell margin from every grid face, so all
    /// six of its neighbors exist.
    #[inline]
    pub fn in_interior(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 1
            && x < self.width - 1
            && y >= 1
            && y < self.height - 1
            && z >= 1
            && z < self.depth - 1
    }

    /// Flat cell index, or `None` outside the grid. Edges never wrap.
    #[inline]
    pub fn address(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.contains(x, y, z) {
            return None;
        }
        Some((z as usize * self.height as usize + y as usize) * self.width as usize + x as usize)
    }

    /// Inverse of [`WorldDesc::address`].
    #[inline]
    pub fn coords(&self, index: usize) -> (i32, i32, i32) {
        let layer = self.width as usize * self.height as usize;
        let z = index / layer;
        let rem = index % layer;
        let y = rem / self.width as usize;
        let x = rem % self.width as usize;
        (x as i32, y as i32, z as i32)
    }

    /// Heightmap slot for column `(x,z)`.
    #[inline]
    pub fn column(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || x >= self.width || z < 0 || z >= self.depth {
            return None;
        }
        Some(z as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert!(WorldDesc::new(0, 4, 4, 0).is_err());
        assert!(WorldDesc::new(4, -1, 4, 0).is_err());
        assert!(WorldDesc::new(4, 4, 0, 0).is_err());
        assert!(WorldDesc::new(1, 1, 1, 0).is_ok());
    }

    #[test]
    fn address_matches_flatten_formula() {
        let d = WorldDesc::new(5, 7, 3, 0).unwrap();
        assert_eq!(d.address(0, 0, 0), Some(0));
        assert_eq!(d.address(1, 0, 0), Some(1));
        assert_eq!(d.address(0, 1, 0), Some(5));
        assert_eq!(d.address(0, 0, 1), Some(35));
        assert_eq!(d.address(4, 6, 2), Some(d.volume() - 1));
    }

    #[test]
    fn out_of_range_is_none() {
        let d = WorldDesc::new(4, 4, 4, 0).unwrap();
        assert_eq!(d.address(-1, 0, 0), None);
        assert_eq!(d.address(0, 4, 0), None);
        assert_eq!(d.address(0, 0, 4), None);
        assert_eq!(d.column(4, 0), None);
    }

    #[test]
    fn interior_excludes_the_margin() {
        let d = WorldDesc::new(4, 4, 4, 0).unwrap();
        assert!(!d.in_interior(0, 1, 1));
        assert!(!d.in_interior(3, 1, 1));
        assert!(d.in_interior(1, 1, 1));
        assert!(d.in_interior(2, 2, 2));
    }

    #[test]
    fn down_is_the_first_neighbor() {
        assert_eq!(NEIGHBORS[0], (0, -1, 0));
        let sum = NEIGHBORS
            .iter()
            .fold((0, 0, 0), |a, n| (a.0 + n.0, a.1 + n.1, a.2 + n.2));
        assert_eq!(sum, (0, 0, 0));
    }
}
