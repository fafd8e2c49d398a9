use bytemuck::{Pod, Zeroable};
use tessel_geom::{Aabb, BoundingSphere, Vec3};

/// One mesh vertex, laid out for direct upload.
///
/// `pos` is chunk-local; `light` is `[block, sun]`, each normalized to `0..=255`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub pos: [u8; 3],
    pub color: [u8; 3],
    pub light: [u8; 2],
}

#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    pub vertices: Vec<ChunkVertex>,
    pub indices: Vec<u32>,
    pub bounds: BoundingSphere,
    aabb: Aabb,
}

impl ChunkMesh {
    /// Clears all arrays but retains capacity for reuse across chunks.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.bounds = BoundingSphere::default();
        self.aabb = Aabb::EMPTY;
    }

    /// Appends a quad as two triangles. With `flip` the shared diagonal runs
    /// from corner 1 to corner 3 instead of 0 to 2.
    pub fn add_quad(&mut self, corners: [ChunkVertex; 4], flip: bool) {
        let base = self.vertices.len() as u32;
        let f = u32::from(flip);
        for v in corners {
            self.aabb
                .grow(Vec3::new(v.pos[0] as f32, v.pos[1] as f32, v.pos[2] as f32));
            self.vertices.push(v);
        }
        self.indices.extend_from_slice(&[
            base + f,
            base + f + 1,
            base + f + 2,
            base + f + 2,
            base + (f + 3) % 4,
            base + f,
        ]);
    }

    /// Seals the bounding sphere from the vertices emitted so far.
    #[inline]
    pub fn finish(&mut self) {
        self.bounds = self.aabb.bounding_sphere();
    }

    /// Number of quads; each contributes two triangles.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Box of every emitted chunk-local vertex position.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// The index buffer narrowed to 16 bits, when every index fits.
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        if self.vertices.len() > usize::from(u16::MAX) + 1 {
            return None;
        }
        Some(self.indices.iter().map(|&i| i as u16).collect())
    }

    /// Interleaved vertex bytes, 8 per vertex.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
