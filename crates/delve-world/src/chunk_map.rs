use crate::chunk::Chunk;
use crate::terrain::TerrainGenerator;
use delve_core::types::{coord_key, ChunkCoord};
use std::collections::HashMap;

/// Spatial container for all allocated chunks.
///
/// Chunks are created on demand and never dropped implicitly.
#[derive(Debug, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the chunk at `coord`, generating and registering it if absent.
    /// The flag reports whether the chunk was created by this call.
    pub fn get_or_create(&mut self, coord: ChunkCoord, terrain: &TerrainGenerator) -> (&mut Chunk, bool) {
        let mut created = false;
        let chunk = self.chunks.entry(coord).or_insert_with(|| {
            created = true;
            log::debug!("allocating chunk {coord}");
            terrain.generate_chunk(coord)
        });
        (chunk, created)
    }

    /// Get a chunk by coordinate.
    pub fn get(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    /// Loaded chunk coordinates in (x, y, z) order.
    pub fn coords_sorted(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_unstable_by_key(|c| coord_key(*c));
        coords
    }

    /// Number of loaded chunks.
    pub fn loaded_count(&self) -> u32 {
        self.chunks.len() as u32
    }
}
