//! Voxel id type and the diagnostic render palette.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

pub mod palette;

pub use palette::{Palette, PaletteEntry, PaletteError};

/// Opaque voxel type id. Zero is reserved for air; all other values carry
/// meaning only through an external palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Voxel {
    pub id: u16,
}

impl Voxel {
    pub const AIR: Voxel = Voxel { id: 0 };

    #[inline]
    pub const fn new(id: u16) -> Self {
        Self { id }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == 0
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.id != 0
    }
}
