//! Render batch assembly output and options.

use cairn_chunk::VisibleBlock;
use cairn_geom::Aabb;

#[derive(Clone, Copy, Debug, Default)]
pub struct BatchOptions {
    /// Cull against the frustum captured on an earlier call instead of the
    /// live one. Captures on first use; clears when passed unset.
    pub use_frozen_frustum: bool,
    /// Emit the bounding box of every drawn chunk as a debug primitive.
    pub draw_chunk_borders: bool,
}

/// Draw list for one frame: visible blocks of every chunk that passed the
/// frustum test, concatenated in chunk-iteration order. No voxel-level sort.
#[derive(Clone, Debug, Default)]
pub struct RenderBatch {
    pub blocks: Vec<VisibleBlock>,
    pub chunk_borders: Vec<Aabb>,
    pub chunks_drawn: usize,
    pub chunks_culled: usize,
}
