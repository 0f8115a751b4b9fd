use crate::chunk::Chunk;
use delve_core::config::{SimConfig, TerrainKind};
use delve_core::constants::{CHUNK_SIZE, VOXELS_PER_CHUNK};
use delve_core::types::{ChunkCoord, MaterialId, WorldCoord};
use delve_core::voxel::Voxel;

/// Depth of the fill layer beneath the surface block.
const FILL_DEPTH: i32 = 3;

/// Fills new chunks. Every voxel is a pure function of its world
/// position, so reading an unloaded position and generating its chunk
/// always agree.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    kind: TerrainKind,
    surface: MaterialId,
    fill: MaterialId,
    deep: MaterialId,
    /// Permutation table for simplex noise (doubled for wrapping).
    perm: [u8; 512],
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::empty()
    }
}

impl TerrainGenerator {
    /// A generator that produces only air.
    pub fn empty() -> Self {
        Self::new(TerrainKind::Empty, 0, MaterialId(1), MaterialId(1), MaterialId(1))
    }

    pub fn new(kind: TerrainKind, seed: u64, surface: MaterialId, fill: MaterialId, deep: MaterialId) -> Self {
        Self {
            kind,
            surface,
            fill,
            deep,
            perm: Self::build_permutation(seed),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.terrain,
            config.world_seed,
            config.surface_material,
            config.fill_material,
            config.deep_material,
        )
    }

    pub fn kind(&self) -> TerrainKind {
        self.kind
    }

    /// Generate a fully populated chunk.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        if self.kind == TerrainKind::Empty {
            return Chunk::new(coord);
        }

        let mut voxels = vec![Voxel::AIR; VOXELS_PER_CHUNK as usize];
        let cs = CHUNK_SIZE as i32;
        let base = coord * cs;

        for lz in 0..cs {
            for lx in 0..cs {
                // One height lookup per column.
                let height = self.column_height(base.x + lx, base.z + lz);
                for ly in 0..cs {
                    let idx = (lx + ly * cs + lz * cs * cs) as usize;
                    voxels[idx] = self.layer_voxel(base.y + ly, height);
                }
            }
        }

        Chunk::from_voxels(coord, voxels)
    }

    /// The voxel generation places at a world position.
    pub fn voxel_at(&self, pos: WorldCoord) -> Voxel {
        match self.kind {
            TerrainKind::Empty => Voxel::AIR,
            _ => self.layer_voxel(pos.y, self.column_height(pos.x, pos.z)),
        }
    }

    /// First air Y above the ground in a column.
    pub fn column_height(&self, wx: i32, wz: i32) -> i32 {
        match self.kind {
            TerrainKind::Empty => i32::MIN,
            TerrainKind::Flat { height } => height,
            TerrainKind::Hills {
                base_height,
                amplitude,
            } => {
                let x = wx as f64;
                let z = wz as f64;
                let scale = 0.02;
                // 3 octaves, weights 4:2:1 of the amplitude.
                let mut h = 0.0f64;
                h += self.simplex2d(x * scale, z * scale) * 4.0;
                h += self.simplex2d(x * scale * 2.0 + 100.0, z * scale * 2.0 + 100.0) * 2.0;
                h += self.simplex2d(x * scale * 4.0 + 200.0, z * scale * 4.0 + 200.0);
                base_height + (h / 7.0 * amplitude as f64).round() as i32
            }
        }
    }

    fn layer_voxel(&self, wy: i32, height: i32) -> Voxel {
        if wy >= height {
            Voxel::AIR
        } else if wy == height - 1 {
            Voxel::solid(self.surface)
        } else if wy >= height - 1 - FILL_DEPTH {
            Voxel::solid(self.fill)
        } else {
            Voxel::solid(self.deep)
        }
    }

    /// 2D simplex noise. Returns value in [-1, 1].
    fn simplex2d(&self, x: f64, z: f64) -> f64 {
        const F2: f64 = 0.5 * (1.7320508075688772 - 1.0); // (sqrt(3)-1)/2
        const G2: f64 = (3.0 - 1.7320508075688772) / 6.0; // (3-sqrt(3))/6

        let s = (x + z) * F2;
        let i = (x + s).floor();
        let j = (z + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = z - (j - t);

        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;

        let gi0 = self.perm[ii + self.perm[jj] as usize] as usize % 12;
        let gi1 = self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize % 12;
        let gi2 = self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize % 12;

        let n0 = Self::corner_contribution(gi0, x0, y0);
        let n1 = Self::corner_contribution(gi1, x1, y1);
        let n2 = Self::corner_contribution(gi2, x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    fn corner_contribution(gi: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let t = t * t;
            t * t * Self::grad2d(gi, x, y)
        }
    }

    fn grad2d(hash: usize, x: f64, y: f64) -> f64 {
        const GRAD: [[f64; 2]; 12] = [
            [1.0, 1.0],
            [-1.0, 1.0],
            [1.0, -1.0],
            [-1.0, -1.0],
            [1.0, 0.0],
            [-1.0, 0.0],
            [0.0, 1.0],
            [0.0, -1.0],
            [1.0, 1.0],
            [-1.0, 1.0],
            [1.0, -1.0],
            [-1.0, -1.0],
        ];
        let g = &GRAD[hash % 12];
        g[0] * x + g[1] * y
    }

    fn build_permutation(seed: u64) -> [u8; 512] {
        let mut p: [u8; 256] = [0; 256];
        for (i, val) in p.iter_mut().enumerate() {
            *val = i as u8;
        }

        // Fisher-Yates with an LCG stream.
        let mut rng = seed;
        for i in (1..256).rev() {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let j = (rng >> 33) as usize % (i + 1);
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, val) in perm.iter_mut().enumerate() {
            *val = p[i & 255];
        }
        perm
    }
}
