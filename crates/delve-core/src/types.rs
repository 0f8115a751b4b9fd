use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Newtype for material identifiers. 0 = air/empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct MaterialId(pub u8);

impl MaterialId {
    pub const AIR: MaterialId = MaterialId(0);
}

/// Chunk coordinate in chunk-space (each unit = CHUNK_SIZE voxels).
pub type ChunkCoord = IVec3;

/// World coordinate in voxel-space.
pub type WorldCoord = IVec3;

/// Voxel offset inside a chunk, each axis in 0..CHUNK_SIZE.
pub type LocalCoord = IVec3;

/// Position in fixed-point block units (x1000).
pub type FixedPos = IVec3;

/// Sort key giving chunk coordinates a total order (x, then y, then z).
/// `IVec3` is not `Ord`; everything that enumerates chunks goes through this.
pub fn coord_key(coord: IVec3) -> [i32; 3] {
    [coord.x, coord.y, coord.z]
}
