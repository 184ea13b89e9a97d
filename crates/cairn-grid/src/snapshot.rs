//! Flat snapshot value for bulk import/export. File I/O lives with the
//! caller; this is only the exchange format.

use cairn_blocks::Voxel;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub chunk_size: (usize, usize, usize),
    pub chunk_count: (usize, usize),
    /// Chunk-major: chunk index order, each chunk in local-index order.
    pub voxels: Vec<Voxel>,
}

impl WorldSnapshot {
    pub fn capacity(&self) -> usize {
        self.chunk_size.0
            * self.chunk_size.1
            * self.chunk_size.2
            * self.chunk_count.0
            * self.chunk_count.1
    }
}
