//! Built-in data shipped with the game, embedded at compile time.

use crate::loader::{load_config_from_str, load_materials_from_str, LoadError};
use delve_core::config::SimConfig;
use delve_core::material::MaterialTable;

pub const MATERIALS_RON: &str = include_str!("../../../data/materials.ron");
pub const SIM_CONFIG_RON: &str = include_str!("../../../data/sim.ron");

/// Material ids of the base table.
pub const MAT_AIR: u8 = 0;
pub const MAT_STONE: u8 = 1;
pub const MAT_DIRT: u8 = 2;
pub const MAT_GRASS: u8 = 3;
pub const MAT_WOOD: u8 = 4;
pub const MAT_SAND: u8 = 5;
pub const MAT_PLANKS: u8 = 6;
pub const MAT_IRON_ORE: u8 = 7;

/// Parse and validate the base material table.
pub fn default_materials() -> Result<MaterialTable, LoadError> {
    load_materials_from_str(MATERIALS_RON)
}

/// Parse and validate the base simulation config.
pub fn default_config() -> Result<SimConfig, LoadError> {
    load_config_from_str(SIM_CONFIG_RON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::types::MaterialId;

    #[test]
    fn test_default_materials_load() {
        let table = default_materials().expect("base materials should load");
        assert_eq!(table.len(), 8);
        assert_eq!(table.hardness(MaterialId(MAT_STONE)), Some(1500));
        assert_eq!(table.get(MaterialId(MAT_AIR)).map(|m| m.name.as_str()), Some("Air"));
        for id in [MAT_DIRT, MAT_GRASS, MAT_WOOD, MAT_SAND, MAT_PLANKS, MAT_IRON_ORE] {
            assert!(table.get(MaterialId(id)).is_some(), "missing material {id}");
        }
    }

    #[test]
    fn test_default_config_matches_code_defaults() {
        let config = default_config().expect("base config should load");
        assert_eq!(config, SimConfig::default());
    }
}
