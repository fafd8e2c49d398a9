use tessel_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosZ = 2,
    NegZ = 3,
    PosX = 4,
    NegX = 5,
}

impl Face {
    /// Emission order within one voxel.
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
        Face::PosX,
        Face::NegX,
    ];

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
        }
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (x, y, z) = self.delta();
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Unit-cube corners of the quad, counter-clockwise seen from outside.
    /// Add to the voxel's own coordinate for the vertex position.
    #[inline]
    pub fn corners(self) -> [(i32, i32, i32); 4] {
        match self {
            Face::PosY => [(0, 1, 1), (1, 1, 1), (1, 1, 0), (0, 1, 0)],
            Face::NegY => [(0, 0, 0), (1, 0, 0), (1, 0, 1), (0, 0, 1)],
            Face::PosZ => [(0, 0, 1), (1, 0, 1), (1, 1, 1), (0, 1, 1)],
            Face::NegZ => [(1, 0, 0), (0, 0, 0), (0, 1, 0), (1, 1, 0)],
            Face::PosX => [(1, 0, 1), (1, 0, 0), (1, 1, 0), (1, 1, 1)],
            Face::NegX => [(0, 0, 0), (0, 0, 1), (0, 1, 1), (0, 1, 0)],
        }
    }

    /// The three cells around `corner` in the layer of the face-adjacent Air
    /// cell `air`: the two edge neighbors, then the diagonal.
    #[inline]
    pub fn corner_cells(
        self,
        air: (i32, i32, i32),
        corner: (i32, i32, i32),
    ) -> [(i32, i32, i32); 3] {
        let step = |c: i32| if c == 1 { 1 } else { -1 };
        let (sx, sy, sz) = (step(corner.0), step(corner.1), step(corner.2));
        let (ax, ay, az) = air;
        match self {
            Face::PosY | Face::NegY => [(ax + sx, ay, az), (ax, ay, az + sz), (ax + sx, ay, az + sz)],
            Face::PosZ | Face::NegZ => [(ax + sx, ay, az), (ax, ay + sy, az), (ax + sx, ay + sy, az)],
            Face::PosX | Face::NegX => [(ax, ay, az + sz), (ax, ay + sy, az), (ax, ay + sy, az + sz)],
        }
    }
}
