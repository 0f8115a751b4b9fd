//! Per-tick systems. Each takes the state it reads and writes explicitly.

pub mod mining;
pub mod movement;
pub mod placement;

use crate::entity::Body;
use delve_core::collision::{Collider, CollisionShape};
use delve_core::math::{fixed_fraction, fixed_to_block_pos};
use delve_core::types::{FixedPos, WorldCoord};
use delve_world::World;

/// Whether a fixed-point world position lies inside solid geometry.
///
/// Full cubes are solid everywhere in their cell; other shapes answer
/// through their collider.
pub fn solid_at(world: &World, pos: FixedPos) -> bool {
    let voxel = world.voxel_at(fixed_to_block_pos(pos));
    Collider::from_shape(voxel.shape).is_some_and(|collider| {
        collider.contains_point(
            fixed_fraction(pos.x),
            fixed_fraction(pos.y),
            fixed_fraction(pos.z),
        )
    })
}

/// Whether `target` lies within `reach` blocks of the feet block on every
/// axis (Chebyshev distance).
pub fn within_reach(body: &Body, target: WorldCoord, reach: i32) -> bool {
    let feet = body.block_position();
    let reach = reach.max(0).unsigned_abs();
    (0..3).all(|axis| target[axis].abs_diff(feet[axis]) <= reach)
}
