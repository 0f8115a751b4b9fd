//! Collision geometry in block-local fixed-point units.
//!
//! All coordinates are integers in 1/1000 block, 0..1000 per axis inside
//! the block. Ranges are half-open: 1000 is the first unit of the next
//! cell. No floating point here.

use crate::constants::{FIXED_ONE, FIXED_PER_HEIGHT_UNIT};
use crate::shape::{BaseShape, Rotation, ShapeCode, Stance};

/// Queries every collision geometry answers.
pub trait CollisionShape {
    /// Surface height at a horizontal position, 0..=1000 for in-block shapes.
    fn height_at(&self, local_x: i32, local_z: i32) -> i32;

    /// Whether the block-local point lies inside the solid part.
    fn contains_point(&self, local_x: i32, local_y: i32, local_z: i32) -> bool;
}

fn in_block(v: i32) -> bool {
    (0..FIXED_ONE).contains(&v)
}

/// Axis-aligned box anchored at the block origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxShape {
    pub size_x: i32,
    pub size_y: i32,
    pub size_z: i32,
}

impl BoxShape {
    pub const FULL: BoxShape = BoxShape {
        size_x: FIXED_ONE,
        size_y: FIXED_ONE,
        size_z: FIXED_ONE,
    };
}

impl CollisionShape for BoxShape {
    fn height_at(&self, _local_x: i32, _local_z: i32) -> i32 {
        self.size_y
    }

    fn contains_point(&self, local_x: i32, local_y: i32, local_z: i32) -> bool {
        local_x >= 0
            && local_x < self.size_x
            && local_y >= 0
            && local_y < self.size_y
            && local_z >= 0
            && local_z < self.size_z
    }
}

/// Ramp rising linearly along local +Z from `min_height` to `max_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeShape {
    pub min_height: i32,
    pub max_height: i32,
}

impl CollisionShape for SlopeShape {
    fn height_at(&self, _local_x: i32, local_z: i32) -> i32 {
        self.min_height + (self.max_height - self.min_height) * local_z / FIXED_ONE
    }

    fn contains_point(&self, local_x: i32, local_y: i32, local_z: i32) -> bool {
        in_block(local_x)
            && in_block(local_z)
            && local_y >= 0
            && local_y < self.height_at(local_x, local_z)
    }
}

/// Corner ramp. An outer corner peaks only at the (+X, +Z) corner and
/// follows `min(x, z)`; an inner corner is high along both far edges and
/// follows `max(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerShape {
    pub min_height: i32,
    pub max_height: i32,
    pub inner: bool,
}

impl CollisionShape for CornerShape {
    fn height_at(&self, local_x: i32, local_z: i32) -> i32 {
        let t = if self.inner {
            local_x.max(local_z)
        } else {
            local_x.min(local_z)
        };
        self.min_height + (self.max_height - self.min_height) * t / FIXED_ONE
    }

    fn contains_point(&self, local_x: i32, local_y: i32, local_z: i32) -> bool {
        in_block(local_x)
            && in_block(local_z)
            && local_y >= 0
            && local_y < self.height_at(local_x, local_z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Box(BoxShape),
    Slope(SlopeShape),
    Corner(CornerShape),
}

impl CollisionShape for Geometry {
    fn height_at(&self, local_x: i32, local_z: i32) -> i32 {
        match self {
            Geometry::Box(s) => s.height_at(local_x, local_z),
            Geometry::Slope(s) => s.height_at(local_x, local_z),
            Geometry::Corner(s) => s.height_at(local_x, local_z),
        }
    }

    fn contains_point(&self, local_x: i32, local_y: i32, local_z: i32) -> bool {
        match self {
            Geometry::Box(s) => s.contains_point(local_x, local_y, local_z),
            Geometry::Slope(s) => s.contains_point(local_x, local_y, local_z),
            Geometry::Corner(s) => s.contains_point(local_x, local_y, local_z),
        }
    }
}

/// Geometry placed in a block according to a shape code's rotation and stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub geometry: Geometry,
    pub rotation: Rotation,
    pub stance: Stance,
}

impl Collider {
    /// Build the collider for a shape code. `None` for air.
    ///
    /// Heights convert at 40 units per 1/25 step and saturate at one block.
    /// Reserved base ids collide as full cubes so that they agree with
    /// `Voxel::is_air`.
    pub fn from_shape(code: ShapeCode) -> Option<Collider> {
        let height = (code.height() as i32 * FIXED_PER_HEIGHT_UNIT).min(FIXED_ONE);
        let geometry = match code.base_shape() {
            BaseShape::Air => return None,
            BaseShape::Cube => Geometry::Box(BoxShape {
                size_y: height,
                ..BoxShape::FULL
            }),
            BaseShape::Slope => Geometry::Slope(SlopeShape {
                min_height: 0,
                max_height: height,
            }),
            BaseShape::OuterCorner => Geometry::Corner(CornerShape {
                min_height: 0,
                max_height: height,
                inner: false,
            }),
            BaseShape::InnerCorner => Geometry::Corner(CornerShape {
                min_height: 0,
                max_height: height,
                inner: true,
            }),
            BaseShape::Unknown => Geometry::Box(BoxShape::FULL),
        };
        Some(Collider {
            geometry,
            rotation: code.rotation_kind(),
            stance: code.stance_kind(),
        })
    }

    /// Map a block-local horizontal position into the unrotated frame.
    /// Each quarter turn is a bijection on 0..1000, so out-of-block
    /// coordinates stay out of the block.
    fn unrotate(&self, x: i32, z: i32) -> (i32, i32) {
        let last = FIXED_ONE - 1;
        match self.rotation {
            Rotation::North => (x, z),
            Rotation::East => (last - z, x),
            Rotation::South => (last - x, last - z),
            Rotation::West => (z, last - x),
        }
    }
}

impl CollisionShape for Collider {
    fn height_at(&self, local_x: i32, local_z: i32) -> i32 {
        let (x, z) = self.unrotate(local_x, local_z);
        match self.stance {
            Stance::Upright => self.geometry.height_at(x, z),
            // Hangs from the ceiling: any material in the column reaches the top.
            Stance::Inverted => {
                if self.geometry.height_at(x, z) > 0 {
                    FIXED_ONE
                } else {
                    0
                }
            }
            // Up axis along +Z; heights are monotone in it, so the top row decides.
            Stance::Sideways => {
                if self.geometry.contains_point(x, z, FIXED_ONE - 1) {
                    FIXED_ONE
                } else {
                    0
                }
            }
        }
    }

    fn contains_point(&self, local_x: i32, local_y: i32, local_z: i32) -> bool {
        let (x, z) = self.unrotate(local_x, local_z);
        match self.stance {
            Stance::Upright => self.geometry.contains_point(x, local_y, z),
            Stance::Inverted => {
                in_block(local_y) && self.geometry.contains_point(x, FIXED_ONE - 1 - local_y, z)
            }
            Stance::Sideways => {
                in_block(local_y) && in_block(z) && self.geometry.contains_point(x, z, local_y)
            }
        }
    }
}
