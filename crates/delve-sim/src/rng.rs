//! Deterministic hashing.
//!
//! `sim_hash` is a stateless PCG-style mix used wherever the simulation
//! needs pseudo-randomness. `StateDigest` is a 64-bit FNV-1a over explicit
//! little-endian bytes, used to compare simulation states across machines.

/// Hash a position and tick into a deterministic pseudo-random u32.
pub fn sim_hash(x: i32, y: i32, z: i32, tick: u32) -> u32 {
    let mut state = (x as u32)
        .wrapping_mul(0x9E3779B9)
        .wrapping_add((y as u32).wrapping_mul(0x517CC1B7))
        .wrapping_add((z as u32).wrapping_mul(0x6C62272E))
        .wrapping_add(tick.wrapping_mul(0x2545F491));

    state = state ^ (state >> 16);
    state = state.wrapping_mul(0x45D9F3B);
    state = state ^ (state >> 16);
    state = state.wrapping_mul(0x45D9F3B);
    state = state ^ (state >> 16);

    state
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Incremental FNV-1a. Byte order is fixed, unlike `std::hash::Hasher`'s
/// integer helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDigest(u64);

impl Default for StateDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl StateDigest {
    pub fn new() -> Self {
        Self(FNV_OFFSET)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn finish(self) -> u64 {
        self.0
    }
}
