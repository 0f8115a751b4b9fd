pub mod chunk;
pub mod chunk_map;
pub mod raycast;
pub mod terrain;

use chunk::Chunk;
use chunk_map::ChunkMap;
use delve_core::config::SimConfig;
use delve_core::constants::CHUNK_SIZE;
use delve_core::direction::ALL_DIRECTIONS;
use delve_core::math::{world_to_chunk, world_to_local};
use delve_core::types::{coord_key, ChunkCoord, LocalCoord, WorldCoord};
use delve_core::voxel::{SubCell, Voxel};
use glam::IVec3;
use std::collections::BTreeSet;
use terrain::TerrainGenerator;

/// World index: maps unbounded world coordinates to (chunk, local) pairs.
///
/// Two read paths exist. `get_voxel` allocates the chunk on a miss, which
/// keeps the lazily infinite world. `voxel_at` never allocates and answers
/// from the terrain generator for unloaded chunks; systems and raycasts use
/// it so read-only queries do not grow the world.
pub struct World {
    chunk_map: ChunkMap,
    terrain: TerrainGenerator,
    /// Chunks whose derived data (meshes) must be rebuilt.
    dirty: BTreeSet<[i32; 3]>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(TerrainGenerator::empty())
    }
}

impl World {
    pub fn new(terrain: TerrainGenerator) -> Self {
        Self {
            chunk_map: ChunkMap::new(),
            terrain,
            dirty: BTreeSet::new(),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(TerrainGenerator::from_config(config))
    }

    /// Chunk containing a world coordinate (floor division by 16).
    pub fn chunk_coord_of(world: WorldCoord) -> ChunkCoord {
        world_to_chunk(world)
    }

    /// Offset of a world coordinate inside its chunk.
    pub fn local_coord_of(world: WorldCoord) -> LocalCoord {
        world_to_local(world)
    }

    /// The sole chunk allocation path.
    pub fn get_or_create_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let (chunk, created) = self.chunk_map.get_or_create(coord, &self.terrain);
        if created {
            self.dirty.insert(coord_key(coord));
        }
        chunk
    }

    /// Read a voxel, allocating its chunk if it is not loaded yet.
    pub fn get_voxel(&mut self, pos: WorldCoord) -> Voxel {
        let local = world_to_local(pos);
        self.get_or_create_chunk(world_to_chunk(pos))
            .get_voxel(local.x, local.y, local.z)
    }

    /// Read a voxel without allocating.
    pub fn voxel_at(&self, pos: WorldCoord) -> Voxel {
        match self.chunk_map.get(&world_to_chunk(pos)) {
            Some(chunk) => {
                let local = world_to_local(pos);
                chunk.get_voxel(local.x, local.y, local.z)
            }
            None => self.terrain.voxel_at(pos),
        }
    }

    pub fn is_solid(&self, pos: WorldCoord) -> bool {
        !self.voxel_at(pos).is_air()
    }

    /// Write a voxel, returning the previous one. Marks the chunk (and
    /// loaded neighbours sharing the touched face) dirty when the value
    /// changes.
    pub fn set_voxel(&mut self, pos: WorldCoord, voxel: Voxel) -> Voxel {
        let local = world_to_local(pos);
        let coord = world_to_chunk(pos);
        let previous = self
            .get_or_create_chunk(coord)
            .set_voxel(local.x, local.y, local.z, voxel);
        if previous != voxel {
            self.mark_dirty(coord, local);
        }
        previous
    }

    /// Read a construction sub-cell without allocating.
    pub fn get_sub_cell(&self, pos: WorldCoord, sub: LocalCoord) -> SubCell {
        self.chunk_map
            .get(&world_to_chunk(pos))
            .map(|chunk| chunk.get_sub_cell(world_to_local(pos), sub))
            .unwrap_or(SubCell::EMPTY)
    }

    /// Write a construction sub-cell; an empty cell clears it.
    pub fn set_sub_cell(&mut self, pos: WorldCoord, sub: LocalCoord, cell: SubCell) -> SubCell {
        let local = world_to_local(pos);
        let coord = world_to_chunk(pos);
        let previous = self.get_or_create_chunk(coord).set_sub_cell(local, sub, cell);
        if previous != cell && !(previous.is_empty() && cell.is_empty()) {
            self.mark_dirty(coord, local);
        }
        previous
    }

    fn mark_dirty(&mut self, coord: ChunkCoord, local: LocalCoord) {
        self.dirty.insert(coord_key(coord));
        let last = CHUNK_SIZE as i32 - 1;
        for dir in ALL_DIRECTIONS {
            let beyond = local + dir.offset();
            if beyond.min_element() >= 0 && beyond.max_element() <= last {
                continue;
            }
            let neighbor = coord + dir.offset();
            if self.chunk_map.contains(&neighbor) {
                self.dirty.insert(coord_key(neighbor));
            }
        }
    }

    /// Drain chunk-modification notifications in sorted order.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.dirty)
            .into_iter()
            .map(|[x, y, z]| IVec3::new(x, y, z))
            .collect()
    }

    /// Loaded chunk coordinates in sorted order.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        self.chunk_map.coords_sorted()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunk_map.get(&coord)
    }

    /// Get the chunk map for reading.
    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::config::TerrainKind;
    use delve_core::types::MaterialId;
    use delve_core::voxel::Orientation;

    fn flat_world() -> World {
        World::new(TerrainGenerator::new(
            TerrainKind::Flat { height: 2 },
            0,
            MaterialId(3),
            MaterialId(2),
            MaterialId(1),
        ))
    }

    #[test]
    fn test_chunk_coord_of() {
        assert_eq!(World::chunk_coord_of(IVec3::new(-1, 0, 0)), IVec3::new(-1, 0, 0));
        assert_eq!(World::chunk_coord_of(IVec3::new(16, 0, 0)), IVec3::new(1, 0, 0));
        assert_eq!(World::chunk_coord_of(IVec3::new(-17, 0, 0)), IVec3::new(-2, 0, 0));
        assert_eq!(World::local_coord_of(IVec3::new(-17, 0, 0)), IVec3::new(15, 0, 0));
    }

    #[test]
    fn test_get_voxel_allocates() {
        let mut world = World::default();
        assert_eq!(world.get_voxel(IVec3::new(-1, -1, -1)), Voxel::AIR);
        assert!(world.chunk(IVec3::new(-1, -1, -1)).is_some());
        assert_eq!(world.chunk_map().loaded_count(), 1);
    }

    #[test]
    fn test_voxel_at_does_not_allocate() {
        let world = flat_world();
        assert_eq!(world.voxel_at(IVec3::new(100, 1, -100)).material, MaterialId(3));
        assert!(world.voxel_at(IVec3::new(100, 2, -100)).is_air());
        assert_eq!(world.chunk_map().loaded_count(), 0);
    }

    #[test]
    fn test_set_then_get_negative_coords() {
        let mut world = World::default();
        let pos = IVec3::new(-1, -16, -17);
        let stone = Voxel::solid(MaterialId(1));
        assert_eq!(world.set_voxel(pos, stone), Voxel::AIR);
        assert_eq!(world.get_voxel(pos), stone);
        assert_eq!(world.voxel_at(pos), stone);
        // Must not have landed in chunk zero.
        assert!(world.chunk(IVec3::ZERO).is_none());
        assert!(world.chunk(IVec3::new(-1, -1, -2)).is_some());
    }

    #[test]
    fn test_loaded_chunk_overrides_terrain() {
        let mut world = flat_world();
        let pos = IVec3::new(5, 1, 5);
        assert!(world.is_solid(pos));
        world.set_voxel(pos, Voxel::AIR);
        assert!(!world.is_solid(pos));
        // Other voxels of the generated chunk still match the terrain.
        assert!(world.is_solid(IVec3::new(6, 1, 5)));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut world = World::default();
        world.get_or_create_chunk(IVec3::ZERO);
        world.get_or_create_chunk(IVec3::new(-1, 0, 0));
        assert_eq!(world.take_dirty_chunks().len(), 2, "new chunks need meshes");
        assert!(world.take_dirty_chunks().is_empty());

        // Interior edit dirties only its chunk.
        world.set_voxel(IVec3::new(5, 5, 5), Voxel::solid(MaterialId(1)));
        assert_eq!(world.take_dirty_chunks(), vec![IVec3::ZERO]);

        // Border edit also dirties the loaded neighbour across that face.
        world.set_voxel(IVec3::new(0, 5, 5), Voxel::solid(MaterialId(1)));
        assert_eq!(world.take_dirty_chunks(), vec![IVec3::new(-1, 0, 0), IVec3::ZERO]);

        // Writing the same value is not a change.
        world.set_voxel(IVec3::new(0, 5, 5), Voxel::solid(MaterialId(1)));
        assert!(world.take_dirty_chunks().is_empty());
    }

    #[test]
    fn test_corner_edit_dirties_each_touching_face() {
        let mut world = World::default();
        for coord in [
            IVec3::ZERO,
            IVec3::new(1, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(0, 0, -1),
            IVec3::new(0, 0, 1),
            IVec3::new(-1, 0, 0),
        ] {
            world.get_or_create_chunk(coord);
        }
        world.take_dirty_chunks();

        world.set_voxel(IVec3::new(15, 15, 0), Voxel::solid(MaterialId(1)));
        let mut dirty = world.take_dirty_chunks();
        dirty.sort_by_key(|c| c.to_array());
        assert_eq!(
            dirty,
            vec![IVec3::new(0, 0, -1), IVec3::ZERO, IVec3::new(0, 1, 0), IVec3::new(1, 0, 0)]
        );
    }

    #[test]
    fn test_sub_cells_through_world() {
        let mut world = World::default();
        let pos = IVec3::new(-3, 4, 20);
        let sub = IVec3::new(1, 2, 0);
        assert_eq!(world.get_sub_cell(pos, sub), SubCell::EMPTY);
        let cell = SubCell::new(2, MaterialId(5), Orientation::from_index(3));
        world.set_sub_cell(pos, sub, cell);
        assert_eq!(world.get_sub_cell(pos, sub), cell);
        world.take_dirty_chunks();
        world.set_sub_cell(pos, sub, SubCell::EMPTY);
        assert_eq!(world.get_sub_cell(pos, sub), SubCell::EMPTY);
        assert_eq!(world.take_dirty_chunks(), vec![World::chunk_coord_of(pos)]);
        let chunk = world.chunk(World::chunk_coord_of(pos)).expect("allocated");
        assert_eq!(chunk.sub_cell_count(), 0);
    }
}
