//! Single source of truth for shared constants.
//! Tuning values that tests need to vary live in `SimConfig` instead;
//! the values here are the defaults it starts from.

/// Side length of a chunk in voxels.
pub const CHUNK_SIZE: u32 = 16;

/// Total voxels per chunk (16^3).
pub const VOXELS_PER_CHUNK: u32 = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Side length of a voxel's construction sub-grid.
pub const SUBGRID_SIZE: u32 = 3;

/// Width in bits of each field of a packed sub-cell position key.
pub const SUB_CELL_KEY_FIELD_BITS: u32 = 8;

/// Fixed-point scale: one block = 1000 units.
pub const FIXED_ONE: i32 = 1000;

/// Shape heights are stored in 1/25 block units.
pub const SHAPE_HEIGHT_UNITS_PER_BLOCK: u8 = 25;

/// Fixed-point units per shape height unit (1000 / 25).
pub const FIXED_PER_HEIGHT_UNIT: i32 = FIXED_ONE / SHAPE_HEIGHT_UNITS_PER_BLOCK as i32;

/// Number of discrete sub-cell orientations (3 stances x 4 rotations).
pub const ORIENTATION_COUNT: u8 = 12;

/// Default duration of one simulation tick in milliseconds.
pub const DEFAULT_TICK_MS: u32 = 17;

/// Default downward acceleration per tick (fixed-point units per tick^2).
pub const DEFAULT_GRAVITY: i32 = 20;

/// Default terminal fall speed (fixed-point units per tick, positive).
pub const DEFAULT_MAX_FALL_SPEED: i32 = 1000;

/// Default vertical velocity applied by a jump (fixed-point units per tick).
pub const DEFAULT_JUMP_FORCE: i32 = 180;

/// Default horizontal speed (fixed-point units per tick at full intent).
pub const DEFAULT_SPEED: i32 = 80;

/// Nominal mining speed. Hardness values are milliseconds at this speed.
pub const DEFAULT_MINING_SPEED: u32 = 1000;

/// Default entity height in whole blocks.
pub const DEFAULT_ENTITY_HEIGHT: i32 = 2;

/// Default block placement reach in blocks.
pub const DEFAULT_REACH: i32 = 5;

/// Distance below the feet probed for ground contact (fixed-point units).
pub const GROUND_PROBE: i32 = 1;
