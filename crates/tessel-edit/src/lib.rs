//! Single-voxel edits with incremental relighting and chunk revisions.
#![forbid(unsafe_code)]

mod pipeline;
mod revisions;

pub use pipeline::{EditReport, set_voxel};
pub use revisions::{ChunkRevisions, RevisionStats};
