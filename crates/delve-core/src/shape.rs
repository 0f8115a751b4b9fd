//! Packed 16-bit block shape code.
//!
//! Bit layout:
//!   [0:3]   base shape id (air, cube, slope, corners...)
//!   [4:5]   rotation (N/E/S/W)
//!   [6:7]   stance (upright/sideways/inverted)
//!   [8:15]  height in 1/25 block units
//!
//! Components wider than their field are masked, not rejected: encoding
//! base 17 stores base 1. Callers keep components in range.

use crate::constants::SHAPE_HEIGHT_UNITS_PER_BLOCK;
use serde::{Deserialize, Serialize};

const BASE_MASK: u16 = 0x0F;
const ROTATION_MASK: u16 = 0x03;
const STANCE_MASK: u16 = 0x03;
const HEIGHT_MASK: u16 = 0xFF;

const ROTATION_SHIFT: u16 = 4;
const STANCE_SHIFT: u16 = 6;
const HEIGHT_SHIFT: u16 = 8;

/// A block's form, rotation, stance and height packed into 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShapeCode(pub u16);

impl ShapeCode {
    pub const AIR: ShapeCode = ShapeCode(0);

    /// Pack the four components. Each is masked to its bit width first.
    pub fn encode(base: u8, rotation: u8, stance: u8, height: u8) -> Self {
        let base = base as u16 & BASE_MASK;
        let rotation = rotation as u16 & ROTATION_MASK;
        let stance = stance as u16 & STANCE_MASK;
        let height = height as u16 & HEIGHT_MASK;
        ShapeCode(
            base | (rotation << ROTATION_SHIFT) | (stance << STANCE_SHIFT) | (height << HEIGHT_SHIFT),
        )
    }

    /// Unpack into (base, rotation, stance, height).
    pub fn decode(self) -> (u8, u8, u8, u8) {
        (self.base(), self.rotation(), self.stance(), self.height())
    }

    /// Full-height upright cube facing north.
    pub fn full_cube() -> Self {
        Self::from_parts(BaseShape::Cube, Rotation::North, Stance::Upright, SHAPE_HEIGHT_UNITS_PER_BLOCK)
    }

    /// Typed constructor.
    pub fn from_parts(base: BaseShape, rotation: Rotation, stance: Stance, height: u8) -> Self {
        Self::encode(base as u8, rotation as u8, stance as u8, height)
    }

    pub fn base(self) -> u8 {
        (self.0 & BASE_MASK) as u8
    }

    pub fn rotation(self) -> u8 {
        ((self.0 >> ROTATION_SHIFT) & ROTATION_MASK) as u8
    }

    pub fn stance(self) -> u8 {
        ((self.0 >> STANCE_SHIFT) & STANCE_MASK) as u8
    }

    pub fn height(self) -> u8 {
        ((self.0 >> HEIGHT_SHIFT) & HEIGHT_MASK) as u8
    }

    /// Air is base shape 0, whatever the other fields hold.
    pub fn is_air(self) -> bool {
        self.base() == 0
    }

    pub fn base_shape(self) -> BaseShape {
        BaseShape::from_bits(self.base())
    }

    pub fn rotation_kind(self) -> Rotation {
        Rotation::from_bits(self.rotation())
    }

    pub fn stance_kind(self) -> Stance {
        Stance::from_bits(self.stance())
    }
}

/// Base shape ids stored in the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum BaseShape {
    Air = 0,
    Cube = 1,
    Slope = 2,
    OuterCorner = 3,
    InnerCorner = 4,
    /// Ids 5..=15 are reserved; they decode to this variant.
    Unknown = 15,
}

impl BaseShape {
    pub fn from_bits(bits: u8) -> Self {
        match bits & BASE_MASK as u8 {
            0 => BaseShape::Air,
            1 => BaseShape::Cube,
            2 => BaseShape::Slope,
            3 => BaseShape::OuterCorner,
            4 => BaseShape::InnerCorner,
            _ => BaseShape::Unknown,
        }
    }
}

/// Horizontal quarter-turn. North is the unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

    pub fn from_bits(bits: u8) -> Self {
        match bits & ROTATION_MASK as u8 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Vertical stance of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stance {
    Upright = 0,
    Sideways = 1,
    Inverted = 2,
}

impl Stance {
    pub const ALL: [Stance; 3] = [Stance::Upright, Stance::Sideways, Stance::Inverted];

    /// Bit pattern 3 is unused and reads as upright.
    pub fn from_bits(bits: u8) -> Self {
        match bits & STANCE_MASK as u8 {
            1 => Stance::Sideways,
            2 => Stance::Inverted,
            _ => Stance::Upright,
        }
    }
}
