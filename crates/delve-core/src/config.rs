use crate::constants::*;
use crate::error::ConfigError;
use crate::types::MaterialId;
use serde::{Deserialize, Serialize};

/// How chunks are filled when first allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Every chunk starts as air.
    Empty,
    /// Solid ground up to (and excluding) world Y = `height`.
    Flat { height: i32 },
    /// Seeded simplex heightmap around `base_height`.
    Hills { base_height: i32, amplitude: i32 },
}

/// Tuning values consumed by the simulation systems.
///
/// Passed explicitly into every system so tests can vary them. All
/// distances are fixed-point (x1000) unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Duration of one tick in milliseconds. Mining progress advances by this much.
    pub tick_ms: u32,
    /// Vertical velocity lost per tick.
    pub gravity: i32,
    /// Largest downward speed gravity can build up.
    pub max_fall_speed: i32,
    /// Horizontal displacement per tick at full move intent.
    pub default_speed: i32,
    /// Vertical velocity set by a jump.
    pub default_jump_force: i32,
    /// Mining speed; 1000 is nominal.
    pub default_mining_speed: u32,
    /// Entity height in whole blocks.
    pub entity_height: i32,
    /// Maximum placement distance in whole blocks (Chebyshev).
    pub reach: i32,
    /// Seed for terrain generation.
    pub world_seed: u64,
    pub terrain: TerrainKind,
    /// Material used for the terrain surface layer.
    pub surface_material: MaterialId,
    /// Material below the surface layer.
    pub fill_material: MaterialId,
    /// Material for deep terrain.
    pub deep_material: MaterialId,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            gravity: DEFAULT_GRAVITY,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,
            default_speed: DEFAULT_SPEED,
            default_jump_force: DEFAULT_JUMP_FORCE,
            default_mining_speed: DEFAULT_MINING_SPEED,
            entity_height: DEFAULT_ENTITY_HEIGHT,
            reach: DEFAULT_REACH,
            world_seed: 42,
            terrain: TerrainKind::Flat { height: 4 },
            surface_material: MaterialId(3),
            fill_material: MaterialId(2),
            deep_material: MaterialId(1),
        }
    }
}

impl SimConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickDuration);
        }
        if self.gravity < 0 {
            return Err(ConfigError::NegativeGravity(self.gravity));
        }
        if self.max_fall_speed < 1 {
            return Err(ConfigError::InvalidMaxFallSpeed(self.max_fall_speed));
        }
        if self.entity_height < 1 {
            return Err(ConfigError::InvalidEntityHeight(self.entity_height));
        }
        if self.reach < 1 {
            return Err(ConfigError::InvalidReach(self.reach));
        }
        for (field, value) in [
            ("default_speed", self.default_speed),
            ("default_jump_force", self.default_jump_force),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }
        Ok(())
    }
}
