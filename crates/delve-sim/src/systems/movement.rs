//! Fixed-point movement, jumping and gravity.
//!
//! An entity is a vertical column `height` blocks tall standing on its
//! position. Horizontal axes are resolved independently so that a blocked
//! axis does not stop motion along the other (wall sliding).

use super::solid_at;
use crate::entity::Body;
use crate::intent::Intent;
use delve_core::collision::{Collider, CollisionShape};
use delve_core::constants::{FIXED_ONE, GROUND_PROBE};
use delve_core::math::{fixed_fraction, fixed_mul, fixed_to_block};
use delve_core::types::FixedPos;
use delve_world::World;
use glam::IVec3;

/// Whether the entity's column collides with the world at `pos`.
pub fn column_blocked(world: &World, pos: FixedPos, height: i32) -> bool {
    (0..height).any(|level| solid_at(world, pos + IVec3::new(0, level * FIXED_ONE, 0)))
}

/// Whether solid ground lies just below the feet.
pub fn on_ground(body: &Body, world: &World) -> bool {
    let probe = body.position.y.saturating_sub(GROUND_PROBE);
    solid_at(world, IVec3::new(body.position.x, probe, body.position.z))
}

/// Move horizontally by `move_x`/`move_z` (1000 = full speed), X then Z.
/// Each axis is applied only if the column at its destination is clear.
pub fn apply_movement(body: &mut Body, world: &World, move_x: i32, move_z: i32) {
    let dx = fixed_mul(move_x, body.speed);
    if dx != 0 {
        let candidate = body.position + IVec3::new(dx, 0, 0);
        if !column_blocked(world, candidate, body.height) {
            body.position = candidate;
        }
    }

    let dz = fixed_mul(move_z, body.speed);
    if dz != 0 {
        let candidate = body.position + IVec3::new(0, 0, dz);
        if !column_blocked(world, candidate, body.height) {
            body.position = candidate;
        }
    }
}

/// Start a jump if one is requested and the entity stands on ground.
pub fn apply_jump(body: &mut Body, intent: &Intent, world: &World) {
    if intent.jump && on_ground(body, world) {
        body.velocity_y = body.jump_force;
    }
}

/// Integrate one tick of gravity.
///
/// Falling entities land exactly on the highest surface between their
/// feet and the candidate position, so no fall speed can pass through a
/// block. Rising entities stop when their head would enter solid geometry.
/// Downward speed never exceeds `max_fall_speed`.
pub fn apply_gravity(body: &mut Body, world: &World, gravity: i32, max_fall_speed: i32) {
    body.velocity_y = body.velocity_y.saturating_sub(gravity).max(-max_fall_speed);
    let target_y = body.position.y.saturating_add(body.velocity_y);

    if body.velocity_y < 0 {
        if let Some(surface) = landing_surface(world, body.position, target_y) {
            body.position.y = surface;
            body.velocity_y = 0;
            return;
        }
    } else if body.velocity_y > 0 {
        let head = IVec3::new(
            body.position.x,
            target_y.saturating_add(body.height.saturating_mul(FIXED_ONE) - 1),
            body.position.z,
        );
        if solid_at(world, head) {
            body.velocity_y = 0;
            return;
        }
    }

    body.position.y = target_y;
}

/// Highest collider surface in `[target_y, pos.y]` below the column at `pos`.
fn landing_surface(world: &World, pos: FixedPos, target_y: i32) -> Option<i32> {
    let fx = fixed_fraction(pos.x);
    let fz = fixed_fraction(pos.z);
    let bx = fixed_to_block(pos.x);
    let bz = fixed_to_block(pos.z);

    let top = fixed_to_block(pos.y);
    let bottom = fixed_to_block(target_y);
    for by in (bottom..=top).rev() {
        let voxel = world.voxel_at(IVec3::new(bx, by, bz));
        let Some(collider) = Collider::from_shape(voxel.shape) else {
            continue;
        };
        let height = collider.height_at(fx, fz);
        if height == 0 {
            continue;
        }
        let Some(surface) = by.checked_mul(FIXED_ONE).and_then(|base| base.checked_add(height))
        else {
            continue;
        };
        if surface <= pos.y && surface >= target_y {
            return Some(surface);
        }
    }
    None
}
