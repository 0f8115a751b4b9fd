use delve_core::constants::{CHUNK_SIZE, SUBGRID_SIZE, SUB_CELL_KEY_FIELD_BITS, VOXELS_PER_CHUNK};
use delve_core::types::{ChunkCoord, LocalCoord};
use delve_core::voxel::{SubCell, Voxel};
use std::collections::HashMap;

/// Pack a voxel-local coordinate (0..16 per axis) and a sub-grid coordinate
/// (0..3 per axis) into one key, 8 bits per component:
///   [0:7] voxel x, [8:15] voxel y, [16:23] voxel z,
///   [24:31] sub x, [32:39] sub y, [40:47] sub z.
pub fn sub_cell_key(local: LocalCoord, sub: LocalCoord) -> u64 {
    debug_assert!(in_chunk(local), "voxel coordinate {local} outside chunk");
    debug_assert!(
        sub.min_element() >= 0 && sub.max_element() < SUBGRID_SIZE as i32,
        "sub-cell coordinate {sub} outside sub-grid"
    );
    let field = |v: i32, slot: u32| ((v as u64) & 0xFF) << (slot * SUB_CELL_KEY_FIELD_BITS);
    field(local.x, 0)
        | field(local.y, 1)
        | field(local.z, 2)
        | field(sub.x, 3)
        | field(sub.y, 4)
        | field(sub.z, 5)
}

/// Inverse of [`sub_cell_key`]: (voxel local, sub-grid) coordinates.
pub fn unpack_sub_cell_key(key: u64) -> (LocalCoord, LocalCoord) {
    let field = |slot: u32| ((key >> (slot * SUB_CELL_KEY_FIELD_BITS)) & 0xFF) as i32;
    (
        LocalCoord::new(field(0), field(1), field(2)),
        LocalCoord::new(field(3), field(4), field(5)),
    )
}

fn in_chunk(local: LocalCoord) -> bool {
    local.min_element() >= 0 && local.max_element() < CHUNK_SIZE as i32
}

/// Dense 16^3 voxel array plus sparse sub-cell constructions.
///
/// Local coordinates are not range-checked in release builds. Callers
/// (the `World`) pre-validate them. Debug builds assert each axis; release
/// builds only keep the slice bound check on the flattened index, so an
/// out-of-range axis that still lands inside the array aliases another
/// cell instead of failing.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    voxels: Vec<Voxel>,
    /// Only non-empty cells are stored.
    sub_cells: HashMap<u64, SubCell>,
    non_air: u32,
}

impl Chunk {
    /// A chunk filled with air.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            voxels: vec![Voxel::AIR; VOXELS_PER_CHUNK as usize],
            sub_cells: HashMap::new(),
            non_air: 0,
        }
    }

    /// Build from a fully populated voxel array in x-fastest order.
    pub fn from_voxels(coord: ChunkCoord, voxels: Vec<Voxel>) -> Self {
        assert_eq!(
            voxels.len(),
            VOXELS_PER_CHUNK as usize,
            "chunk voxel array must hold exactly {VOXELS_PER_CHUNK} entries"
        );
        let non_air = voxels.iter().filter(|v| !v.is_air()).count() as u32;
        Self {
            coord,
            voxels,
            sub_cells: HashMap::new(),
            non_air,
        }
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        let cs = CHUNK_SIZE as i32;
        debug_assert!((0..cs).contains(&x), "local x {x} out of range");
        debug_assert!((0..cs).contains(&y), "local y {y} out of range");
        debug_assert!((0..cs).contains(&z), "local z {z} out of range");
        (x + y * cs + z * cs * cs) as usize
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.voxels[Self::index(x, y, z)]
    }

    /// Store a voxel, returning the one it replaced.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) -> Voxel {
        let slot = &mut self.voxels[Self::index(x, y, z)];
        let previous = *slot;
        *slot = voxel;
        match (previous.is_air(), voxel.is_air()) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
        previous
    }

    /// Read a sub-cell. A miss is `SubCell::EMPTY`, never an error.
    pub fn get_sub_cell(&self, local: LocalCoord, sub: LocalCoord) -> SubCell {
        self.sub_cells
            .get(&sub_cell_key(local, sub))
            .copied()
            .unwrap_or(SubCell::EMPTY)
    }

    /// Write a sub-cell. Writing an empty cell removes the entry.
    pub fn set_sub_cell(&mut self, local: LocalCoord, sub: LocalCoord, cell: SubCell) -> SubCell {
        let key = sub_cell_key(local, sub);
        let previous = if cell.is_empty() {
            self.sub_cells.remove(&key)
        } else {
            self.sub_cells.insert(key, cell)
        };
        previous.unwrap_or(SubCell::EMPTY)
    }

    /// Number of stored (non-empty) sub-cells.
    pub fn sub_cell_count(&self) -> usize {
        self.sub_cells.len()
    }

    /// Stored sub-cells ordered by key.
    pub fn sub_cell_entries(&self) -> Vec<(u64, SubCell)> {
        let mut entries: Vec<(u64, SubCell)> =
            self.sub_cells.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    /// All voxels in x-fastest order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Whether this chunk contains any non-air voxels.
    pub fn has_non_air(&self) -> bool {
        self.non_air > 0
    }

    pub fn non_air_count(&self) -> u32 {
        self.non_air
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::types::MaterialId;
    use delve_core::voxel::Orientation;
    use glam::IVec3;
    use std::collections::HashSet;

    #[test]
    fn test_new_chunk_is_air() {
        let chunk = Chunk::new(IVec3::ZERO);
        assert_eq!(chunk.voxels().len(), VOXELS_PER_CHUNK as usize);
        assert!(chunk.voxels().iter().all(|v| v.is_air()));
        assert!(!chunk.has_non_air());
    }

    #[test]
    fn test_voxel_access_at_bounds() {
        let mut chunk = Chunk::new(IVec3::ZERO);
        let stone = Voxel::solid(MaterialId(1));
        let dirt = Voxel::solid(MaterialId(2));
        chunk.set_voxel(0, 0, 0, stone);
        chunk.set_voxel(15, 15, 15, dirt);
        assert_eq!(chunk.get_voxel(0, 0, 0), stone);
        assert_eq!(chunk.get_voxel(15, 15, 15), dirt);
        assert_eq!(chunk.get_voxel(15, 0, 0), Voxel::AIR);
        assert_eq!(chunk.get_voxel(0, 15, 0), Voxel::AIR);
        assert_eq!(chunk.get_voxel(0, 0, 15), Voxel::AIR);
        assert_eq!(chunk.non_air_count(), 2);
    }

    #[test]
    fn test_every_local_position_is_distinct() {
        let mut chunk = Chunk::new(IVec3::ZERO);
        let mut i = 0u32;
        for z in 0..16 {
            for y in 0..16 {
                for x in 0..16 {
                    chunk.set_voxel(x, y, z, Voxel::solid(MaterialId((i % 255 + 1) as u8)));
                    i += 1;
                }
            }
        }
        let mut i = 0u32;
        for z in 0..16 {
            for y in 0..16 {
                for x in 0..16 {
                    assert_eq!(chunk.get_voxel(x, y, z).material, MaterialId((i % 255 + 1) as u8));
                    i += 1;
                }
            }
        }
        assert_eq!(chunk.non_air_count(), VOXELS_PER_CHUNK);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "local x 16 out of range")]
    fn test_out_of_range_asserts_in_debug() {
        let chunk = Chunk::new(IVec3::ZERO);
        let _ = chunk.get_voxel(16, 0, 0);
    }

    #[test]
    fn test_set_voxel_returns_previous_and_tracks_count() {
        let mut chunk = Chunk::new(IVec3::ZERO);
        let stone = Voxel::solid(MaterialId(1));
        assert_eq!(chunk.set_voxel(3, 4, 5, stone), Voxel::AIR);
        assert_eq!(chunk.set_voxel(3, 4, 5, stone), stone);
        assert_eq!(chunk.non_air_count(), 1);
        assert_eq!(chunk.set_voxel(3, 4, 5, Voxel::AIR), stone);
        assert_eq!(chunk.non_air_count(), 0);
    }

    #[test]
    fn test_sub_cell_key_injective() {
        let mut keys = HashSet::new();
        for vz in 0..16 {
            for vy in 0..16 {
                for vx in 0..16 {
                    for sz in 0..3 {
                        for sy in 0..3 {
                            for sx in 0..3 {
                                let key = sub_cell_key(
                                    IVec3::new(vx, vy, vz),
                                    IVec3::new(sx, sy, sz),
                                );
                                assert!(keys.insert(key), "collision at {vx},{vy},{vz}/{sx},{sy},{sz}");
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(keys.len(), 16 * 16 * 16 * 27);
    }

    #[test]
    fn test_sub_cell_key_fits_48_bits_and_unpacks() {
        let local = IVec3::new(15, 15, 15);
        let sub = IVec3::new(2, 2, 2);
        let key = sub_cell_key(local, sub);
        assert!(key < 1 << 48);
        assert_eq!(unpack_sub_cell_key(key), (local, sub));
    }

    #[test]
    fn test_sub_cell_miss_is_empty() {
        let chunk = Chunk::new(IVec3::ZERO);
        assert_eq!(
            chunk.get_sub_cell(IVec3::new(1, 2, 3), IVec3::new(0, 1, 2)),
            SubCell::EMPTY
        );
    }

    #[test]
    fn test_sub_cell_clear_removes_entry() {
        let mut chunk = Chunk::new(IVec3::ZERO);
        let local = IVec3::new(15, 0, 7);
        let sub = IVec3::new(2, 0, 1);
        let brick = SubCell::new(1, MaterialId(4), Orientation::from_index(6));
        chunk.set_sub_cell(local, sub, brick);
        assert_eq!(chunk.get_sub_cell(local, sub), brick);
        assert_eq!(chunk.sub_cell_count(), 1);

        // An empty cell with leftover material still counts as a removal.
        let cleared = SubCell::new(0, MaterialId(4), Orientation::default());
        assert_eq!(chunk.set_sub_cell(local, sub, cleared), brick);
        assert_eq!(chunk.sub_cell_count(), 0);
        assert_eq!(chunk.get_sub_cell(local, sub), SubCell::EMPTY);
    }

    #[test]
    fn test_sub_cell_entries_sorted() {
        let mut chunk = Chunk::new(IVec3::ZERO);
        let cell = SubCell::new(2, MaterialId(1), Orientation::default());
        chunk.set_sub_cell(IVec3::new(9, 0, 0), IVec3::ZERO, cell);
        chunk.set_sub_cell(IVec3::new(1, 0, 0), IVec3::ZERO, cell);
        chunk.set_sub_cell(IVec3::new(0, 0, 0), IVec3::new(0, 0, 2), cell);
        let keys: Vec<u64> = chunk.sub_cell_entries().iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 3);
    }
}
