use std::collections::HashMap;

use tessel_world::{CellBounds, ChunkCoord, ChunkRegion, WorldDesc};

use crate::pipeline::EditReport;

#[derive(Default, Debug, Clone, Copy)]
pub struct RevisionStats {
    pub rev_entries: usize,
    pub built_entries: usize,
}

/// Change tracking for chunk-sized rebuild units. Each bump stamps every
/// chunk whose mesh or colliders could read a touched cell.
pub struct ChunkRevisions {
    desc: WorldDesc,
    size: u8,
    rev: HashMap<ChunkCoord, u64>,   // latest change affecting chunk
    built: HashMap<ChunkCoord, u64>, // last built rev for chunk
    counter: u64,
}

impl ChunkRevisions {
    pub fn new(desc: WorldDesc, size: u8) -> Self {
        Self {
            desc,
            size: size.max(1),
            rev: HashMap::new(),
            built: HashMap::new(),
            counter: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn stats(&self) -> RevisionStats {
        RevisionStats {
            rev_entries: self.rev.len(),
            built_entries: self.built.len(),
        }
    }

    /// Region covered by chunk `coord`.
    #[inline]
    pub fn region(&self, coord: ChunkCoord) -> ChunkRegion {
        ChunkRegion::from_coord(coord, self.size)
    }

    /// Chunks that read any cell of `touched`. Meshing samples one cell past
    /// the chunk edge, so the box grows by one before it is split. Chunks
    /// that fall outside the grid are skipped.
    pub fn affected_chunks(&self, touched: &CellBounds) -> Vec<ChunkCoord> {
        let d = &self.desc;
        let grown = touched.expanded(1);
        let clamped = CellBounds {
            min: (grown.min.0.max(0), grown.min.1.max(0), grown.min.2.max(0)),
            max: (
                grown.max.0.min(d.width - 1),
                grown.max.1.min(d.height - 1),
                grown.max.2.min(d.depth - 1),
            ),
        };
        if clamped.min.0 > clamped.max.0 || clamped.min.1 > clamped.max.1 || clamped.min.2 > clamped.max.2 {
            return Vec::new();
        }
        let mut out: Vec<ChunkCoord> = clamped.chunks(self.size).collect();
        out.sort();
        out
    }

    /// Stamps every affected chunk. Returns the new monotonically increasing stamp.
    pub fn bump_region(&mut self, touched: &CellBounds) -> u64 {
        self.counter = self.counter.wrapping_add(1).max(1);
        let stamp = self.counter;
        for c in self.affected_chunks(touched) {
            self.rev.insert(c, stamp);
        }
        stamp
    }

    pub fn bump_edit(&mut self, report: &EditReport) -> u64 {
        self.bump_region(&report.touched)
    }

    pub fn get_rev(&self, coord: ChunkCoord) -> u64 {
        self.rev.get(&coord).copied().unwrap_or(0)
    }

    pub fn mark_built(&mut self, coord: ChunkCoord, rev: u64) {
        // Only update if this is a newer revision
        let e = self.built.entry(coord).or_insert(0);
        if rev > *e {
            *e = rev;
        }
    }

    pub fn needs_rebuild(&self, coord: ChunkCoord) -> bool {
        self.get_rev(coord) > self.get_built_rev(coord)
    }

    pub fn get_built_rev(&self, coord: ChunkCoord) -> u64 {
        self.built.get(&coord).copied().unwrap_or(0)
    }

    /// Every chunk with a pending rebuild, in coordinate order.
    pub fn dirty_chunks(&self) -> Vec<ChunkCoord> {
        let mut out: Vec<ChunkCoord> = self
            .rev
            .keys()
            .copied()
            .filter(|c| self.needs_rebuild(*c))
            .collect();
        out.sort();
        out
    }
}
