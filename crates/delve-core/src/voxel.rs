use crate::constants::ORIENTATION_COUNT;
use crate::shape::{Rotation, ShapeCode, Stance};
use crate::types::MaterialId;
use serde::{Deserialize, Serialize};

/// One terrain cell: material plus packed shape. Copied, never referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Voxel {
    pub material: MaterialId,
    pub shape: ShapeCode,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        material: MaterialId::AIR,
        shape: ShapeCode::AIR,
    };

    pub fn new(material: MaterialId, shape: ShapeCode) -> Self {
        Self { material, shape }
    }

    /// A full upright cube of the given material.
    pub fn solid(material: MaterialId) -> Self {
        Self::new(material, ShapeCode::full_cube())
    }

    /// Solidity is decided by the shape alone.
    pub fn is_air(self) -> bool {
        self.shape.is_air()
    }
}

/// One of the 12 discrete sub-cell orientations (stance * 4 + rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Orientation(u8);

impl Orientation {
    pub fn new(stance: Stance, rotation: Rotation) -> Self {
        Orientation(stance as u8 * 4 + rotation as u8)
    }

    /// Wraps indices outside 0..12 rather than rejecting them.
    pub fn from_index(index: u8) -> Self {
        Orientation(index % ORIENTATION_COUNT)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn stance(self) -> Stance {
        Stance::from_bits(self.0 / 4)
    }

    pub fn rotation(self) -> Rotation {
        Rotation::from_bits(self.0 % 4)
    }
}

/// One cell of a voxel's construction sub-grid.
///
/// Emptiness is `shape == 0` only; material and orientation mean nothing
/// on an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SubCell {
    pub shape: u8,
    pub material: MaterialId,
    pub orientation: Orientation,
}

impl SubCell {
    pub const EMPTY: SubCell = SubCell {
        shape: 0,
        material: MaterialId::AIR,
        orientation: Orientation(0),
    };

    pub fn new(shape: u8, material: MaterialId, orientation: Orientation) -> Self {
        Self {
            shape,
            material,
            orientation,
        }
    }

    pub fn is_empty(self) -> bool {
        self.shape == 0
    }
}
