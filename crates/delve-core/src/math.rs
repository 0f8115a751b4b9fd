//! Coordinate and fixed-point conversions. Every conversion here rounds
//! toward negative infinity so that negative coordinates land in the cell
//! extending below zero.

use crate::constants::{CHUNK_SIZE, FIXED_ONE};
use crate::types::{ChunkCoord, FixedPos, LocalCoord, WorldCoord};
use glam::IVec3;

/// Integer division rounding toward negative infinity. `size` must be positive.
///
/// Same result as `(n - size + 1) / size` for negative `n`.
pub fn floor_div(n: i32, size: i32) -> i32 {
    debug_assert!(size > 0, "floor_div by non-positive size {size}");
    n.div_euclid(size)
}

/// Convert a world-space voxel coordinate to its containing chunk coordinate.
pub fn world_to_chunk(world: WorldCoord) -> ChunkCoord {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        floor_div(world.x, cs),
        floor_div(world.y, cs),
        floor_div(world.z, cs),
    )
}

/// Convert a world-space voxel coordinate to its local offset within a chunk.
pub fn world_to_local(world: WorldCoord) -> LocalCoord {
    world - world_to_chunk(world) * CHUNK_SIZE as i32
}

/// Convert a chunk coordinate and local offset back to world-space.
pub fn chunk_local_to_world(chunk: ChunkCoord, local: LocalCoord) -> WorldCoord {
    chunk * CHUNK_SIZE as i32 + local
}

/// Fixed-point (x1000) value to the block containing it.
pub fn fixed_to_block(n: i32) -> i32 {
    floor_div(n, FIXED_ONE)
}

/// Block coordinate to the fixed-point position of its minimum corner.
pub fn block_to_fixed(block: i32) -> i32 {
    block * FIXED_ONE
}

/// Offset of a fixed-point value inside its block, in 0..FIXED_ONE.
pub fn fixed_fraction(n: i32) -> i32 {
    n.rem_euclid(FIXED_ONE)
}

/// Fixed-point position to the block containing it, per axis.
pub fn fixed_to_block_pos(pos: FixedPos) -> WorldCoord {
    IVec3::new(
        fixed_to_block(pos.x),
        fixed_to_block(pos.y),
        fixed_to_block(pos.z),
    )
}

/// Scale a fixed-point value by a fixed-point factor (a * b / 1000),
/// truncating toward zero. Intermediate product is 64-bit.
pub fn fixed_mul(a: i32, b: i32) -> i32 {
    ((a as i64 * b as i64) / FIXED_ONE as i64) as i32
}
